//! Forward-looking label construction.
//!
//! Derives the binary "purchased again next month" label from the holdout
//! window, aligned with the feature table.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use repurchase_core::{add_month, day_start, FeatureRow, LabelRow, Transaction};

/// Build the label table for a feature table and its holdout window.
///
/// The label is true iff the customer's earliest holdout purchase falls
/// within `[calib_period_end, calib_period_end + 1 month)`. A customer with
/// no holdout purchase labels false. Output rows follow the feature rows
/// one-for-one, so y aligns with X by construction.
pub fn labels(
    features: &[FeatureRow],
    holdout: &[Transaction],
    calib_period_end: NaiveDate,
) -> Vec<LabelRow> {
    let mut first_holdout: BTreeMap<&str, NaiveDateTime> = BTreeMap::new();
    for transaction in holdout {
        first_holdout
            .entry(transaction.customer_id.as_str())
            .and_modify(|earliest| {
                if transaction.invoice_date < *earliest {
                    *earliest = transaction.invoice_date;
                }
            })
            .or_insert(transaction.invoice_date);
    }

    let month_start = day_start(calib_period_end);
    let month_end = day_start(add_month(calib_period_end));

    features
        .iter()
        .map(|row| {
            let purchase_next_month = first_holdout
                .get(row.customer_id.as_str())
                .map(|&first| first >= month_start && first < month_end)
                .unwrap_or(false);
            LabelRow {
                customer_id: row.customer_id.clone(),
                purchase_next_month,
            }
        })
        .collect()
}
