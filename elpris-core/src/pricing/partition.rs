//! Split price points into one chronological series per zone.

use crate::domain::{PerZone, PricePoint};

/// Price points for a single zone, sorted ascending by timestamp.
///
/// Points with equal timestamps keep their input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneSeries(Vec<PricePoint>);

impl ZoneSeries {
    pub fn from_unsorted(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.timestamp);
        Self(points)
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub fn partition(points: Vec<PricePoint>) -> PerZone<ZoneSeries> {
    let mut buckets: PerZone<Vec<PricePoint>> = PerZone::default();
    for point in points {
        buckets.get_mut(point.zone).push(point);
    }
    PerZone {
        dk1: ZoneSeries::from_unsorted(buckets.dk1),
        dk2: ZoneSeries::from_unsorted(buckets.dk2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LocalTimestamp, Zone};
    use chrono::NaiveDate;

    fn pt(zone: Zone, hour: u32, price: f64) -> PricePoint {
        PricePoint {
            timestamp: LocalTimestamp::new(
                NaiveDate::from_ymd_opt(2025, 3, 14)
                    .unwrap()
                    .and_hms_opt(hour, 0, 0)
                    .unwrap(),
            ),
            zone,
            price,
        }
    }

    #[test]
    fn splits_by_zone_and_sorts() {
        let series = partition(vec![
            pt(Zone::Dk2, 12, 1.0),
            pt(Zone::Dk1, 11, 2.0),
            pt(Zone::Dk2, 9, 3.0),
            pt(Zone::Dk1, 8, 4.0),
        ]);
        let dk1: Vec<f64> = series.dk1.points().iter().map(|p| p.price).collect();
        let dk2: Vec<f64> = series.dk2.points().iter().map(|p| p.price).collect();
        assert_eq!(dk1, vec![4.0, 2.0]);
        assert_eq!(dk2, vec![3.0, 1.0]);
    }

    #[test]
    fn equal_timestamps_keep_input_order() {
        let series = partition(vec![pt(Zone::Dk1, 10, 5.0), pt(Zone::Dk1, 10, 6.0)]);
        let prices: Vec<f64> = series.dk1.points().iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![5.0, 6.0]);
    }

    #[test]
    fn empty_zone_yields_empty_series() {
        let series = partition(vec![pt(Zone::Dk1, 10, 5.0)]);
        assert!(series.dk2.is_empty());
        assert_eq!(series.dk1.len(), 1);
    }
}
