//! Raw feed record → tax-inclusive DKK/kWh price point.

use crate::data::RawRecord;
use crate::domain::{PricePoint, Zone};

/// kWh per MWh.
const KWH_PER_MWH: f64 = 1000.0;

/// Convert a pre-tax DKK/MWh wholesale price into a tax-inclusive DKK/kWh retail price.
pub fn retail_price(dkk_per_mwh: f64, tax_factor: f64) -> f64 {
    dkk_per_mwh / KWH_PER_MWH * tax_factor
}

/// Normalize one record, or `None` if its zone is not one of ours.
///
/// The timestamp is copied as-is.
pub fn normalize(record: &RawRecord, dkk_per_eur: f64, tax_factor: f64) -> Option<PricePoint> {
    let zone = Zone::from_code(&record.area)?;
    let wholesale = record.quote().to_native(dkk_per_eur);
    Some(PricePoint {
        timestamp: record.time,
        zone,
        price: retail_price(wholesale, tax_factor),
    })
}

/// Points kept from a batch of records, plus how many were dropped.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub points: Vec<PricePoint>,
    pub discarded: usize,
}

pub fn normalize_all(records: &[RawRecord], dkk_per_eur: f64, tax_factor: f64) -> Normalized {
    let mut out = Normalized {
        points: Vec::with_capacity(records.len()),
        discarded: 0,
    };

    for record in records {
        match normalize(record, dkk_per_eur, tax_factor) {
            Some(point) => out.points.push(point),
            None => {
                tracing::debug!(area = %record.area, time = %record.time, "discarding record from unknown zone");
                out.discarded += 1;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LocalTimestamp;
    use chrono::NaiveDate;

    const RATE: f64 = 7.4604;

    fn rec(area: &str, dkk: Option<f64>, eur: Option<f64>) -> RawRecord {
        RawRecord {
            time: LocalTimestamp::new(
                NaiveDate::from_ymd_opt(2025, 3, 14)
                    .unwrap()
                    .and_hms_opt(10, 0, 0)
                    .unwrap(),
            ),
            area: area.to_string(),
            price_dkk: dkk,
            price_eur: eur,
        }
    }

    #[test]
    fn native_price_is_scaled_and_taxed() {
        let p = normalize(&rec("DK1", Some(100.0), Some(1.0)), RATE, 1.25).unwrap();
        assert!((p.price - 0.125).abs() < 1e-12);
        assert_eq!(p.zone, Zone::Dk1);
    }

    #[test]
    fn eur_fallback_uses_rate() {
        let p = normalize(&rec("DK2", None, Some(50.0)), RATE, 1.25).unwrap();
        let expected = 50.0 * RATE / 1000.0 * 1.25;
        assert!((p.price - expected).abs() < 1e-12);
    }

    #[test]
    fn both_missing_defaults_to_zero() {
        let p = normalize(&rec("DK2", None, None), RATE, 1.25).unwrap();
        assert_eq!(p.price, 0.0);
    }

    #[test]
    fn negative_wholesale_prices_pass_through() {
        let p = normalize(&rec("DK1", Some(-20.0), None), RATE, 1.25).unwrap();
        assert!((p.price + 0.025).abs() < 1e-12);
    }

    #[test]
    fn unknown_zones_are_discarded_and_counted() {
        let records = vec![
            rec("DK1", Some(100.0), None),
            rec("SE4", Some(100.0), None),
            rec("DK2", Some(100.0), None),
        ];
        let out = normalize_all(&records, RATE, 1.25);
        assert_eq!(out.points.len(), 2);
        assert_eq!(out.discarded, 1);
    }

    #[test]
    fn timestamp_is_copied_verbatim() {
        let r = rec("DK1", Some(1.0), None);
        assert_eq!(normalize(&r, RATE, 1.25).unwrap().timestamp, r.time);
    }
}
