//! Recency/frequency/monetary summary over daily purchase periods.
//!
//! Purchases are grouped into calendar-day periods per customer. Frequency
//! counts repeat periods, recency spans first to last period, tenure spans
//! first period to the calibration cutoff, and monetary value averages
//! revenue over repeat periods only (the first period is excluded).

use std::collections::BTreeMap;

use chrono::NaiveDate;
use repurchase_core::{CustomerId, RfmSummary, Transaction};

/// Compute per-customer RFM summaries over a calibration window.
///
/// Every calibration customer gets an entry; a single-period customer has
/// frequency 0, recency 0, and monetary value 0.
pub fn rfm_summaries(
    calib: &[Transaction],
    calib_period_end: NaiveDate,
) -> BTreeMap<CustomerId, RfmSummary> {
    let mut period_revenue: BTreeMap<&str, BTreeMap<NaiveDate, f64>> = BTreeMap::new();
    for transaction in calib {
        *period_revenue
            .entry(transaction.customer_id.as_str())
            .or_default()
            .entry(transaction.invoice_day())
            .or_insert(0.0) += transaction.revenue;
    }

    let mut summaries = BTreeMap::new();
    for (customer_id, periods) in period_revenue {
        let Some((&first, _)) = periods.iter().next() else {
            continue;
        };
        let Some((&last, _)) = periods.iter().next_back() else {
            continue;
        };

        let frequency = (periods.len() - 1) as f64;
        let recency = (last - first).num_days() as f64;
        let tenure = (calib_period_end - first).num_days() as f64;
        let monetary_value = if periods.len() > 1 {
            periods.values().skip(1).sum::<f64>() / frequency
        } else {
            0.0
        };

        summaries.insert(
            customer_id.to_string(),
            RfmSummary {
                frequency,
                recency,
                tenure,
                monetary_value,
                tenure_minus_recency: tenure - recency,
            },
        );
    }
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDateTime;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2011, 1, d).unwrap()
    }

    fn ts(d: u32, h: u32) -> NaiveDateTime {
        date(d).and_hms_opt(h, 0, 0).unwrap()
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
    fn test_repeat_customer() {
        // Purchase days 1, 5, 11; cutoff day 16.
        let calib = vec![
            make_transaction("A", ts(1, 9), 10.0),
            make_transaction("A", ts(5, 9), 20.0),
            make_transaction("A", ts(11, 9), 40.0),
        ];

        let summaries = rfm_summaries(&calib, date(16));
        let summary = &summaries["A"];
        assert_relative_eq!(summary.frequency, 2.0);
        assert_relative_eq!(summary.recency, 10.0);
        assert_relative_eq!(summary.tenure, 15.0);
        // Repeat periods only: (20 + 40) / 2.
        assert_relative_eq!(summary.monetary_value, 30.0);
        assert_relative_eq!(summary.tenure_minus_recency, 5.0);
    }

    #[test]
    fn test_same_day_lines_form_one_period() {
        let calib = vec![
            make_transaction("A", ts(1, 9), 10.0),
            make_transaction("A", ts(5, 9), 15.0),
            make_transaction("A", ts(5, 17), 5.0),
        ];

        let summaries = rfm_summaries(&calib, date(10));
        let summary = &summaries["A"];
        assert_relative_eq!(summary.frequency, 1.0);
        assert_relative_eq!(summary.recency, 4.0);
        // Single repeat period summing to 20.
        assert_relative_eq!(summary.monetary_value, 20.0);
    }

    #[test]
    fn test_single_period_customer() {
        let calib = vec![make_transaction("A", ts(3, 9), 10.0)];

        let summaries = rfm_summaries(&calib, date(16));
        let summary = &summaries["A"];
        assert_relative_eq!(summary.frequency, 0.0);
        assert_relative_eq!(summary.recency, 0.0);
        assert_relative_eq!(summary.tenure, 13.0);
        assert_relative_eq!(summary.monetary_value, 0.0);
        assert_relative_eq!(summary.tenure_minus_recency, 13.0);
    }
}
