//! Naive repurchase baseline.
//!
//! Predicts a repurchase for customers whose mean inter-purchase gap is
//! shorter than an average month. Used only as a benchmark for model lift.

use chrono::NaiveDate;
use repurchase_core::{Config, SplitPolicy, Transaction};
use repurchase_features::{gap_aggregates, window};
use serde::{Deserialize, Serialize};

/// Naive baseline predictions for one observation date.
///
/// Each series covers the same customer population, in the same order, as
/// the feature table built for that policy's calibration window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaiveWindowLabels {
    /// Observation date anchoring the splits.
    pub observation_end: NaiveDate,
    /// Baseline predictions for the TRAIN-policy population.
    pub y_train: Vec<bool>,
    /// Baseline predictions for the TEST-policy population.
    pub y_test: Vec<bool>,
}

/// Compute the naive baseline series for a sequence of observation dates.
pub fn naive_labels(
    transactions: &[Transaction],
    observation_end_dates: &[NaiveDate],
    config: &Config,
) -> Vec<NaiveWindowLabels> {
    observation_end_dates
        .iter()
        .map(|&observation_end| NaiveWindowLabels {
            observation_end,
            y_train: policy_series(transactions, observation_end, SplitPolicy::Train, config),
            y_test: policy_series(transactions, observation_end, SplitPolicy::Test, config),
        })
        .collect()
}

fn policy_series(
    transactions: &[Transaction],
    observation_end: NaiveDate,
    policy: SplitPolicy,
    config: &Config,
) -> Vec<bool> {
    let split = window::split(observation_end, transactions, policy);
    // Gap aggregates are keyed and ordered by customer, matching the feature
    // table population for the same window.
    gap_aggregates(&split.calib)
        .values()
        .map(|gaps| gaps.mean_days < config.naive.mean_gap_threshold_days)
        .collect()
}
