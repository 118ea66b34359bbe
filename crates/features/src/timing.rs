//! Inter-purchase timing aggregates.
//!
//! Collapses each customer's calibration purchases to distinct calendar days
//! and aggregates the gaps between consecutive days.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use repurchase_core::{CustomerId, GapAggregates, Transaction};
use statrs::statistics::Statistics;

/// Compute per-customer gap aggregates over a calibration window.
///
/// Multiple purchases on the same calendar day count once (the first
/// chronologically). Customers with fewer than two gaps (fewer than three
/// distinct purchase days) have an undefined sample standard deviation and
/// get no entry; callers propagate that as a drop, not a zero-fill.
pub fn gap_aggregates(calib: &[Transaction]) -> BTreeMap<CustomerId, GapAggregates> {
    let mut purchase_days: BTreeMap<&str, BTreeSet<NaiveDate>> = BTreeMap::new();
    for transaction in calib {
        purchase_days
            .entry(transaction.customer_id.as_str())
            .or_default()
            .insert(transaction.invoice_day());
    }

    let mut aggregates = BTreeMap::new();
    for (customer_id, days) in purchase_days {
        let gaps: Vec<f64> = days
            .iter()
            .zip(days.iter().skip(1))
            .map(|(previous, next)| (*next - *previous).num_days() as f64)
            .collect();
        if gaps.len() < 2 {
            continue;
        }

        aggregates.insert(
            customer_id.to_string(),
            GapAggregates {
                mean_days: (&gaps).mean(),
                stdev_days: (&gaps).std_dev(),
                min_days: (&gaps).min(),
                max_days: (&gaps).max(),
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

    fn make_transaction(customer_id: &str, invoice_date: NaiveDateTime) -> Transaction {
        Transaction {
            customer_id: customer_id.to_string(),
            invoice_no: "536365".to_string(),
            invoice_date,
            stock_code: "85123".to_string(),
            quantity: 1,
            unit_price: 10.0,
            country: "United Kingdom".to_string(),
            revenue: 10.0,
        }
    }

    #[test]
    fn test_even_gaps() {
        // Purchase days 1, 5, 9 -> gaps [4, 4].
        let calib = vec![
            make_transaction("A", ts(1, 9)),
            make_transaction("A", ts(5, 9)),
            make_transaction("A", ts(9, 9)),
        ];

        let aggregates = gap_aggregates(&calib);
        let a = &aggregates["A"];
        assert_relative_eq!(a.mean_days, 4.0);
        assert_relative_eq!(a.stdev_days, 0.0);
        assert_relative_eq!(a.min_days, 4.0);
        assert_relative_eq!(a.max_days, 4.0);
    }

    #[test]
    fn test_uneven_gaps() {
        // Purchase days 1, 3, 9 -> gaps [2, 6]; sample stdev of [2, 6].
        let calib = vec![
            make_transaction("A", ts(1, 9)),
            make_transaction("A", ts(3, 9)),
            make_transaction("A", ts(9, 9)),
        ];

        let aggregates = gap_aggregates(&calib);
        let a = &aggregates["A"];
        assert_relative_eq!(a.mean_days, 4.0);
        assert_relative_eq!(a.stdev_days, 8.0_f64.sqrt());
        assert_relative_eq!(a.min_days, 2.0);
        assert_relative_eq!(a.max_days, 6.0);
    }

    #[test]
    fn test_same_day_purchases_collapse() {
        // Three purchases on day 1 plus days 5 and 9 still give gaps [4, 4].
        let calib = vec![
            make_transaction("A", ts(1, 8)),
            make_transaction("A", ts(1, 12)),
            make_transaction("A", ts(1, 18)),
            make_transaction("A", ts(5, 9)),
            make_transaction("A", ts(9, 9)),
        ];

        let aggregates = gap_aggregates(&calib);
        let a = &aggregates["A"];
        assert_relative_eq!(a.mean_days, 4.0);
        assert_relative_eq!(a.max_days, 4.0);
    }

    #[test]
    fn test_below_three_distinct_days_excluded() {
        let calib = vec![
            make_transaction("A", ts(1, 9)),
            make_transaction("A", ts(5, 9)),
            make_transaction("B", ts(2, 9)),
        ];

        let aggregates = gap_aggregates(&calib);
        assert!(aggregates.is_empty());
    }

    #[test]
    fn test_customers_aggregated_independently() {
        let calib = vec![
            make_transaction("A", ts(1, 9)),
            make_transaction("B", ts(2, 9)),
            make_transaction("A", ts(5, 9)),
            make_transaction("B", ts(4, 9)),
            make_transaction("A", ts(9, 9)),
            make_transaction("B", ts(10, 9)),
        ];

        let aggregates = gap_aggregates(&calib);
        assert_eq!(aggregates.len(), 2);
        assert_relative_eq!(aggregates["A"].mean_days, 4.0);
        assert_relative_eq!(aggregates["B"].mean_days, 4.0);
        assert_relative_eq!(aggregates["B"].min_days, 2.0);
        assert_relative_eq!(aggregates["B"].max_days, 6.0);
    }
}
