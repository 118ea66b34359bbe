//! Calibration/holdout window splitting at a rolling monthly cutoff.

use chrono::NaiveDate;
use repurchase_core::{day_start, SplitPolicy, Transaction};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One calibration/holdout partition of a transaction log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowSplit {
    /// Rows with `invoice_date` at or before midnight of the cutoff date.
    pub calib: Vec<Transaction>,
    /// Rows strictly after the cutoff.
    pub holdout: Vec<Transaction>,
    /// Calibration cutoff date.
    pub calib_period_end: NaiveDate,
}

/// Partition `transactions` at the policy's cutoff for `observation_end`.
///
/// The partition is exhaustive and disjoint. An observation date outside the
/// table's span leaves one side empty; that is valid and flows through as
/// empty downstream tables.
pub fn split(
    observation_end: NaiveDate,
    transactions: &[Transaction],
    policy: SplitPolicy,
) -> WindowSplit {
    let calib_period_end = policy.calib_period_end(observation_end);
    let cutoff = day_start(calib_period_end);

    let mut calib = Vec::new();
    let mut holdout = Vec::new();
    for transaction in transactions {
        if transaction.invoice_date <= cutoff {
            calib.push(transaction.clone());
        } else {
            holdout.push(transaction.clone());
        }
    }

    debug!(
        %calib_period_end,
        calib_rows = calib.len(),
        holdout_rows = holdout.len(),
        "split transaction log"
    );

    WindowSplit {
        calib,
        holdout,
        calib_period_end,
    }
}
