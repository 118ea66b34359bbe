//! Cyclical seasonality encoding of the last calibration purchase.
//!
//! Encodes the day-of-year as a sin/cos pair with period 365 so the seasonal
//! position has no discontinuity at the year boundary.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use chrono::{Datelike, NaiveDateTime};
use repurchase_core::{CustomerId, CyclicalDayOfYear, Transaction};

/// Days in the encoding period.
const PERIOD_DAYS: f64 = 365.0;

/// Encode a day-of-year position on the unit circle.
#[inline]
pub fn encode_day_of_year(day_of_year: u32) -> CyclicalDayOfYear {
    let angle = 2.0 * PI * day_of_year as f64 / PERIOD_DAYS;
    CyclicalDayOfYear {
        sin: angle.sin(),
        cos: angle.cos(),
    }
}

/// Compute the cyclical day-of-year of each customer's last calibration
/// purchase.
pub fn cyclical_last_purchase(calib: &[Transaction]) -> BTreeMap<CustomerId, CyclicalDayOfYear> {
    let mut last_purchase: BTreeMap<&str, NaiveDateTime> = BTreeMap::new();
    for transaction in calib {
        last_purchase
            .entry(transaction.customer_id.as_str())
            .and_modify(|latest| {
                if transaction.invoice_date > *latest {
                    *latest = transaction.invoice_date;
                }
            })
            .or_insert(transaction.invoice_date);
    }

    last_purchase
        .into_iter()
        .map(|(customer_id, latest)| (customer_id.to_string(), encode_day_of_year(latest.ordinal())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn make_transaction(customer_id: &str, y: i32, m: u32, d: u32) -> Transaction {
        Transaction {
            customer_id: customer_id.to_string(),
            invoice_no: "536365".to_string(),
            invoice_date: NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            stock_code: "85123".to_string(),
            quantity: 1,
            unit_price: 10.0,
            country: "United Kingdom".to_string(),
            revenue: 10.0,
        }
    }

    #[test]
    fn test_on_unit_circle() {
        for day_of_year in [1, 90, 180, 365] {
            let encoded = encode_day_of_year(day_of_year);
            assert_relative_eq!(
                encoded.sin * encoded.sin + encoded.cos * encoded.cos,
                1.0,
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_known_day_of_year() {
        // Feb 1 is day 32.
        let angle = 2.0 * PI * 32.0 / 365.0;
        let encoded = encode_day_of_year(32);
        assert_relative_eq!(encoded.sin, angle.sin());
        assert_relative_eq!(encoded.cos, angle.cos());
    }

    #[test]
    fn test_uses_last_purchase() {
        let calib = vec![
            make_transaction("A", 2011, 1, 10),
            make_transaction("A", 2011, 2, 1),
            make_transaction("A", 2011, 1, 20),
        ];

        let encoded = cyclical_last_purchase(&calib);
        let expected = encode_day_of_year(32);
        assert_relative_eq!(encoded["A"].sin, expected.sin);
        assert_relative_eq!(encoded["A"].cos, expected.cos);
    }
}
