//! Domain types: price zones, zone-local timestamps, normalized price points.

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two Danish day-ahead settlement zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// West Denmark (Jutland and Funen).
    Dk1,
    /// East Denmark (Zealand and islands).
    Dk2,
}

impl Zone {
    /// Both zones in report column order.
    pub const ALL: [Zone; 2] = [Zone::Dk1, Zone::Dk2];

    /// Zone code as used by the market-data feed.
    pub fn code(self) -> &'static str {
        match self {
            Zone::Dk1 => "DK1",
            Zone::Dk2 => "DK2",
        }
    }

    /// Human-readable label used as the report column header.
    pub fn label(self) -> &'static str {
        match self {
            Zone::Dk1 => "Jylland + Fyn",
            Zone::Dk2 => "Sjælland + Øer",
        }
    }

    /// Recognize a feed zone code. Anything else is not one of ours.
    pub fn from_code(code: &str) -> Option<Zone> {
        match code {
            "DK1" => Some(Zone::Dk1),
            "DK2" => Some(Zone::Dk2),
            _ => None,
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Wall-clock time in the zone's local time, as published by the feed.
///
/// No offset is attached and no timezone arithmetic is ever performed on it.
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalTimestamp(NaiveDateTime);

impl LocalTimestamp {
    pub fn new(inner: NaiveDateTime) -> Self {
        Self(inner)
    }

    pub fn naive(self) -> NaiveDateTime {
        self.0
    }

    /// Drop minutes, seconds and sub-seconds.
    pub fn truncate_to_hour(self) -> Self {
        let midnight = self.0.date().and_time(NaiveTime::MIN);
        Self(midnight + Duration::hours(i64::from(self.0.hour())))
    }

    pub fn plus_hours(self, hours: i64) -> Self {
        Self(self.0 + Duration::hours(hours))
    }

    /// Minute precision with a `T` separator, the form the market-data API expects.
    pub fn to_query_param(self) -> String {
        self.0.format("%Y-%m-%dT%H:%M").to_string()
    }
}

impl From<NaiveDateTime> for LocalTimestamp {
    fn from(inner: NaiveDateTime) -> Self {
        Self(inner)
    }
}

/// Date and time separated by a single space, minute precision.
impl fmt::Display for LocalTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M"))
    }
}

/// A normalized, tax-inclusive retail price for one delivery slot in one zone.
///
/// `price` is in DKK per kWh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: LocalTimestamp,
    pub zone: Zone,
    pub price: f64,
}

/// A value held once per zone.
///
/// Exactly two zones exist, so this is a pair of named slots rather than a map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerZone<T> {
    pub dk1: T,
    pub dk2: T,
}

impl<T> PerZone<T> {
    pub fn get(&self, zone: Zone) -> &T {
        match zone {
            Zone::Dk1 => &self.dk1,
            Zone::Dk2 => &self.dk2,
        }
    }

    pub fn get_mut(&mut self, zone: Zone) -> &mut T {
        match zone {
            Zone::Dk1 => &mut self.dk1,
            Zone::Dk2 => &mut self.dk2,
        }
    }

    /// Apply `f` to each zone's value, keeping the zone association.
    pub fn map<U>(&self, mut f: impl FnMut(Zone, &T) -> U) -> PerZone<U> {
        PerZone {
            dk1: f(Zone::Dk1, &self.dk1),
            dk2: f(Zone::Dk2, &self.dk2),
        }
    }

    /// Iterate `(zone, value)` in column order.
    pub fn iter(&self) -> impl Iterator<Item = (Zone, &T)> {
        Zone::ALL.into_iter().map(move |z| (z, self.get(z)))
    }
}
