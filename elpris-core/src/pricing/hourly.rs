//! Hourly averaging across sub-hourly delivery slots.

use super::partition::ZoneSeries;
use crate::domain::{LocalTimestamp, PerZone, Zone};
use std::collections::BTreeMap;

/// Mean price per zone for one clock hour. `None` when the zone has no samples.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyRow {
    pub hour: LocalTimestamp,
    pub means: PerZone<Option<f64>>,
}

/// Bucket every point by its hour and average each bucket per zone.
///
/// Rows come back in ascending hour order. Hours where neither zone has a
/// sample produce no row.
pub fn aggregate_hourly(series: &PerZone<ZoneSeries>) -> Vec<HourlyRow> {
    let mut buckets: BTreeMap<LocalTimestamp, PerZone<Vec<f64>>> = BTreeMap::new();

    for zone in Zone::ALL {
        for point in series.get(zone).points() {
            buckets
                .entry(point.timestamp.truncate_to_hour())
                .or_default()
                .get_mut(zone)
                .push(point.price);
        }
    }

    buckets
        .into_iter()
        .map(|(hour, samples)| HourlyRow {
            hour,
            means: samples.map(|_, prices| mean(prices)),
        })
        .collect()
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PricePoint;
    use crate::pricing::partition::partition;
    use chrono::NaiveDate;

    fn pt(zone: Zone, hour: u32, minute: u32, price: f64) -> PricePoint {
        PricePoint {
            timestamp: LocalTimestamp::new(
                NaiveDate::from_ymd_opt(2025, 3, 14)
                    .unwrap()
                    .and_hms_opt(hour, minute, 0)
                    .unwrap(),
            ),
            zone,
            price,
        }
    }

    #[test]
    fn quarter_hours_collapse_into_hourly_mean() {
        let rows = aggregate_hourly(&partition(vec![
            pt(Zone::Dk1, 10, 0, 0.125),
            pt(Zone::Dk1, 10, 15, 0.375),
        ]));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].hour.to_string(), "2025-03-14 10:00");
        assert!((rows[0].means.dk1.unwrap() - 0.25).abs() < 1e-12);
        assert_eq!(rows[0].means.dk2, None);
    }

    #[test]
    fn rows_are_ordered_by_hour() {
        let rows = aggregate_hourly(&partition(vec![
            pt(Zone::Dk2, 14, 30, 1.0),
            pt(Zone::Dk1, 9, 45, 2.0),
            pt(Zone::Dk1, 11, 0, 3.0),
        ]));
        let hours: Vec<String> = rows.iter().map(|r| r.hour.to_string()).collect();
        assert_eq!(
            hours,
            vec!["2025-03-14 09:00", "2025-03-14 11:00", "2025-03-14 14:00"]
        );
    }

    #[test]
    fn hour_missing_in_one_zone_is_none_not_zero() {
        let rows = aggregate_hourly(&partition(vec![
            pt(Zone::Dk1, 10, 0, 1.0),
            pt(Zone::Dk2, 11, 0, 2.0),
        ]));
        assert_eq!(rows[0].means, PerZone { dk1: Some(1.0), dk2: None });
        assert_eq!(rows[1].means, PerZone { dk1: None, dk2: Some(2.0) });
    }

    #[test]
    fn zero_price_is_a_real_mean() {
        let rows = aggregate_hourly(&partition(vec![pt(Zone::Dk2, 3, 0, 0.0)]));
        assert_eq!(rows[0].means.dk2, Some(0.0));
    }

    #[test]
    fn no_points_no_rows() {
        assert!(aggregate_hourly(&PerZone::default()).is_empty());
    }
}
