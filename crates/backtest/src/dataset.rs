//! Train/test dataset assembly for one observation date.
//!
//! Orchestrates window splitting, feature building, and label building under
//! both splitting policies.

use chrono::NaiveDate;
use repurchase_core::{Config, CustomerFeatures, SplitPolicy, Transaction};
use repurchase_features::{labels, window, FeatureBuilder};
use serde::{Deserialize, Serialize};

/// A labeled train/test pair for one observation date.
///
/// Feature vectors carry no customer key (it is a join key, not a signal);
/// each label series matches its feature table row-for-row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainTestData {
    /// Observation date anchoring both splits.
    pub observation_end: NaiveDate,
    /// Training features (calibration ends one month before the observation
    /// date).
    pub x_train: Vec<CustomerFeatures>,
    /// Training labels.
    pub y_train: Vec<bool>,
    /// Test features (calibration ends at the observation date).
    pub x_test: Vec<CustomerFeatures>,
    /// Test labels.
    pub y_test: Vec<bool>,
}

/// Assembles labeled datasets from a transaction log.
pub struct DatasetAssembler {
    config: Config,
}

impl DatasetAssembler {
    /// Create a new dataset assembler from configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Build the train/test pair for one observation date.
    ///
    /// The TRAIN and TEST policies partition the same transaction log
    /// independently; each policy's features and labels come only from its
    /// own calibration and holdout windows.
    pub fn build(&self, transactions: &[Transaction], observation_end: NaiveDate) -> TrainTestData {
        let (x_train, y_train) =
            self.build_policy(transactions, observation_end, SplitPolicy::Train);
        let (x_test, y_test) = self.build_policy(transactions, observation_end, SplitPolicy::Test);

        TrainTestData {
            observation_end,
            x_train,
            y_train,
            x_test,
            y_test,
        }
    }

    fn build_policy(
        &self,
        transactions: &[Transaction],
        observation_end: NaiveDate,
        policy: SplitPolicy,
    ) -> (Vec<CustomerFeatures>, Vec<bool>) {
        let split = window::split(observation_end, transactions, policy);
        let builder = FeatureBuilder::new(self.config.features.clone());
        let rows = builder.build(&split.calib, split.calib_period_end);
        let label_rows = labels(&rows, &split.holdout, split.calib_period_end);

        let x = rows.into_iter().map(|row| row.features).collect();
        let y = label_rows
            .into_iter()
            .map(|label| label.purchase_next_month)
            .collect();
        (x, y)
    }
}
