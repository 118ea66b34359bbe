//! Data ingestion and normalization for the repurchase-datasets pipeline.
//!
//! This crate handles:
//! - Raw invoice cleaning into the canonical transaction table
//! - Overlapping invoice-log concatenation
//! - Observation-date sequence generation

pub mod calendar;
pub mod cleaning;

pub use calendar::observation_end_dates;
pub use cleaning::{concat_invoice_logs, CleaningStats, InvoiceCleaner, RawInvoice};
