//! Monetary aggregates over daily revenue.
//!
//! Revenue is summed per (customer, calendar day) first, then those daily
//! sums are aggregated per customer.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use repurchase_core::{CustomerId, RevenueAggregates, Transaction};
use statrs::statistics::Statistics;

/// Compute per-customer monetary aggregates over a calibration window.
///
/// Every calibration customer gets an entry. The sample standard deviation
/// is NaN for single-day customers; those rows never survive the feature
/// table's timing filter.
pub fn revenue_aggregates(calib: &[Transaction]) -> BTreeMap<CustomerId, RevenueAggregates> {
    let mut daily_revenue: BTreeMap<&str, BTreeMap<NaiveDate, f64>> = BTreeMap::new();
    for transaction in calib {
        *daily_revenue
            .entry(transaction.customer_id.as_str())
            .or_default()
            .entry(transaction.invoice_day())
            .or_insert(0.0) += transaction.revenue;
    }

    let mut aggregates = BTreeMap::new();
    for (customer_id, days) in daily_revenue {
        let daily_sums: Vec<f64> = days.into_values().collect();
        aggregates.insert(
            customer_id.to_string(),
            RevenueAggregates {
                mean: (&daily_sums).mean(),
                stdev: (&daily_sums).std_dev(),
                min: (&daily_sums).min(),
                max: (&daily_sums).max(),
                sum: daily_sums.iter().sum(),
            },
        );
    }
    aggregates
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDateTime;

    fn ts(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2011, 1, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn make_transaction(customer_id: &str, invoice_date: NaiveDateTime, revenue: f64) -> Transaction {
        Transaction {
            customer_id: customer_id.to_string(),
            invoice_no: "536365".to_string(),
            invoice_date,
            stock_code: "85123".to_string(),
            quantity: 1,
            unit_price: revenue,
            country: "United Kingdom".to_string(),
            revenue,
        }
    }

    #[test]
    fn test_daily_sums_before_aggregation() {
        // Day 1 has two lines (6 + 4 = 10), days 5 and 9 one line each.
        let calib = vec![
            make_transaction("A", ts(1, 9), 6.0),
            make_transaction("A", ts(1, 15), 4.0),
            make_transaction("A", ts(5, 9), 20.0),
            make_transaction("A", ts(9, 9), 40.0),
        ];

        let aggregates = revenue_aggregates(&calib);
        let a = &aggregates["A"];
        // Daily revenues [10, 20, 40].
        assert_relative_eq!(a.mean, 70.0 / 3.0, max_relative = 1e-12);
        assert_relative_eq!(a.stdev, 233.33333333333334_f64.sqrt(), max_relative = 1e-12);
        assert_relative_eq!(a.min, 10.0);
        assert_relative_eq!(a.max, 40.0);
        assert_relative_eq!(a.sum, 70.0);
    }

    #[test]
    fn test_every_calibration_customer_has_an_entry() {
        let calib = vec![
            make_transaction("A", ts(1, 9), 5.0),
            make_transaction("B", ts(2, 9), 7.0),
        ];

        let aggregates = revenue_aggregates(&calib);
        assert_eq!(aggregates.len(), 2);
        assert_relative_eq!(aggregates["B"].sum, 7.0);
        assert!(aggregates["B"].stdev.is_nan()); // single day, undefined
    }

    #[test]
    fn test_empty_window() {
        assert!(revenue_aggregates(&[]).is_empty());
    }
}
