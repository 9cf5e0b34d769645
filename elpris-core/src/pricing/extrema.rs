//! Lowest and highest price per zone over the window.

use super::partition::ZoneSeries;
use crate::domain::{PerZone, PricePoint};

/// Rendered in place of a timestamp when a zone has no points.
pub const SENTINEL_TIME: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extrema {
    Observed { min: PricePoint, max: PricePoint },
    /// The zone had no points; reported as time `-`, price 0.
    Empty,
}

impl Extrema {
    pub fn min(&self) -> Option<&PricePoint> {
        match self {
            Extrema::Observed { min, .. } => Some(min),
            Extrema::Empty => None,
        }
    }

    pub fn max(&self) -> Option<&PricePoint> {
        match self {
            Extrema::Observed { max, .. } => Some(max),
            Extrema::Empty => None,
        }
    }
}

/// Single linear scan seeded by the first point.
///
/// Comparisons are strict, so among equal prices the earliest point in the
/// series is kept.
pub fn find_extrema(series: &ZoneSeries) -> Extrema {
    let mut points = series.points().iter();
    let Some(first) = points.next() else {
        return Extrema::Empty;
    };

    let (mut min, mut max) = (first, first);
    for p in points {
        if p.price < min.price {
            min = p;
        }
        if p.price > max.price {
            max = p;
        }
    }

    Extrema::Observed {
        min: *min,
        max: *max,
    }
}

pub fn zone_extrema(series: &PerZone<ZoneSeries>) -> PerZone<Extrema> {
    series.map(|_, s| find_extrema(s))
}
