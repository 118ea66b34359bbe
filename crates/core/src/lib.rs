//! Core types and configuration for the repurchase-datasets pipeline.
//!
//! This crate provides shared types used across all other crates:
//! - The canonical transaction record and split policy
//! - Per-customer feature and label rows
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, FeatureConfig, NaiveBaselineConfig, ObservationWindowConfig};
pub use error::{Error, Result};
pub use types::*;
