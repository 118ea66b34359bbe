//! Observation-date sequence generation.
//!
//! Produces one observation date per calendar month across a transaction
//! log's span, skipping boundary months that lack enough history or any
//! holdout.

use chrono::{Datelike, Months, NaiveDate};
use repurchase_core::{ObservationWindowConfig, Transaction};

/// Generate the rolling observation-date sequence for a transaction log.
///
/// Dates step one calendar month from the first invoice date. The leading
/// months (insufficient purchase history) and trailing month (no holdout
/// available) are excluded per configuration. An empty log, or a span
/// shorter than the skipped months, yields an empty sequence.
pub fn observation_end_dates(
    transactions: &[Transaction],
    config: &ObservationWindowConfig,
) -> Vec<NaiveDate> {
    let Some(first) = transactions.iter().map(|t| t.invoice_day()).min() else {
        return Vec::new();
    };
    let Some(last) = transactions.iter().map(|t| t.invoice_day()).max() else {
        return Vec::new();
    };

    let num_months = whole_months_between(first, last);
    let dates: Vec<NaiveDate> = (0..=num_months)
        .map(|offset| first + Months::new(offset))
        .collect();

    let leading = config.skip_leading_months as usize;
    let trailing = config.skip_trailing_months as usize;
    if dates.len() <= leading + trailing {
        return Vec::new();
    }
    dates[leading..dates.len() - trailing].to_vec()
}

/// Count of whole calendar months from `first` to `last`.
fn whole_months_between(first: NaiveDate, last: NaiveDate) -> u32 {
    let mut months =
        (last.year() - first.year()) * 12 + (last.month() as i32 - first.month() as i32);
    if last.day() < first.day() {
        months -= 1;
    }
    months.max(0) as u32
}
