//! Raw invoice cleaning into the canonical transaction table.
//!
//! Normalizes raw retail invoice records into the cleaned form the feature
//! pipeline assumes: known customer, numeric non-cancellation invoice
//! number, positive unit price, sellable stock code, revenue present.

use chrono::NaiveDateTime;
use repurchase_core::Transaction;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// An invoice record as it arrives from upstream parsing, before cleaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawInvoice {
    /// Customer key, absent on anonymous rows.
    pub customer_id: Option<String>,
    /// Invoice identifier; a leading `C` marks a cancellation.
    pub invoice_no: String,
    /// Purchase timestamp.
    pub invoice_date: NaiveDateTime,
    /// Item code; may denote fees, gifts, or internal test rows.
    pub stock_code: String,
    /// Units purchased, negative on returns.
    pub quantity: i64,
    /// Price per unit, non-positive on returns and adjustments.
    pub unit_price: f64,
    /// Customer country.
    pub country: String,
    /// Line revenue when supplied upstream.
    pub revenue: Option<f64>,
}

/// Counts of rows dropped per cleaning rule.
#[derive(Debug, Clone, Default)]
pub struct CleaningStats {
    /// Total rows seen.
    pub total_rows: u64,
    /// Rows without a customer key.
    pub missing_customer: u64,
    /// Internal test rows (stock code contains "TEST").
    pub test_rows: u64,
    /// Cancellation invoices.
    pub cancellations: u64,
    /// Rows with a non-numeric invoice number.
    pub non_numeric_invoice: u64,
    /// Returns and adjustments (unit price not positive).
    pub returns: u64,
    /// Rows whose stock code denotes a non-item.
    pub non_item_codes: u64,
    /// Rows kept.
    pub kept: u64,
}

impl CleaningStats {
    /// Total rows dropped.
    pub fn dropped(&self) -> u64 {
        self.total_rows - self.kept
    }

    /// Reset statistics.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Cleans raw invoice records into canonical transactions.
pub struct InvoiceCleaner {
    stats: CleaningStats,
}

impl InvoiceCleaner {
    /// Create a new invoice cleaner.
    pub fn new() -> Self {
        Self {
            stats: CleaningStats::default(),
        }
    }

    /// Clean a batch of raw invoices.
    pub fn clean(&mut self, raw: Vec<RawInvoice>) -> Vec<Transaction> {
        let transactions: Vec<Transaction> = raw
            .into_iter()
            .filter_map(|invoice| self.clean_one(invoice))
            .collect();

        debug!(
            total = self.stats.total_rows,
            kept = self.stats.kept,
            dropped = self.stats.dropped(),
            "cleaned invoice batch"
        );

        transactions
    }

    /// Clean a single raw invoice.
    fn clean_one(&mut self, raw: RawInvoice) -> Option<Transaction> {
        self.stats.total_rows += 1;

        let Some(customer_id) = raw.customer_id else {
            self.stats.missing_customer += 1;
            return None;
        };
        if raw.stock_code.to_ascii_uppercase().contains("TEST") {
            self.stats.test_rows += 1;
            return None;
        }
        if raw.invoice_no.chars().any(|c| c.eq_ignore_ascii_case(&'c')) {
            self.stats.cancellations += 1;
            return None;
        }
        if raw.invoice_no.parse::<u64>().is_err() {
            self.stats.non_numeric_invoice += 1;
            return None;
        }
        if raw.unit_price <= 0.0 {
            self.stats.returns += 1;
            return None;
        }
        let Some(stock_code) = normalize_stock_code(&raw.stock_code) else {
            self.stats.non_item_codes += 1;
            return None;
        };

        let revenue = raw
            .revenue
            .unwrap_or(raw.unit_price * raw.quantity as f64);

        self.stats.kept += 1;
        Some(Transaction {
            customer_id,
            invoice_no: raw.invoice_no,
            invoice_date: raw.invoice_date,
            stock_code,
            quantity: raw.quantity,
            unit_price: raw.unit_price,
            country: raw.country,
            revenue,
        })
    }

    /// Get cleaning statistics.
    pub fn stats(&self) -> &CleaningStats {
        &self.stats
    }
}

impl Default for InvoiceCleaner {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize a stock code, or reject it as a non-item.
///
/// Carriage charges (`C2`/`C3`), gift codes, and codes without a single
/// digit denote fees or vouchers rather than sellable items. Trailing
/// letters on real codes are variant markers and are stripped.
fn normalize_stock_code(code: &str) -> Option<String> {
    if code == "C2" || code == "C3" {
        return None;
    }
    if code.starts_with("gift") {
        return None;
    }
    if !code.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(
        code.trim_end_matches(|c: char| !c.is_ascii_digit())
            .to_string(),
    )
}

/// Concatenate two overlapping invoice logs.
///
/// The log whose latest invoice is older is kept whole; the later log
/// contributes only rows after `end_of_overlap`, so the overlap period is
/// not double counted.
pub fn concat_invoice_logs(
    first: &[Transaction],
    second: &[Transaction],
    end_of_overlap: NaiveDateTime,
) -> Vec<Transaction> {
    let max_date = |log: &[Transaction]| log.iter().map(|t| t.invoice_date).max();

    let (earlier, later) = match (max_date(first), max_date(second)) {
        (Some(first_max), Some(second_max)) if first_max > second_max => (second, first),
        _ => (first, second),
    };

    let mut combined = earlier.to_vec();
    combined.extend(
        later
            .iter()
            .filter(|t| t.invoice_date > end_of_overlap)
            .cloned(),
    );
    combined
}
