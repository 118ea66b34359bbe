//! Rolling-window model training.
//!
//! Fits a fresh model per observation date against that window's training
//! data, keeping the window's dataset alongside the fitted model for
//! evaluation.

use chrono::NaiveDate;
use repurchase_core::{Config, CustomerFeatures, Error, Result, Transaction};
use tracing::info;

use crate::dataset::{DatasetAssembler, TrainTestData};

/// An opaque binary classifier.
///
/// The pipeline treats the model as a black box: anything that fits on a
/// feature/label table and predicts a boolean per feature row plugs in here.
pub trait Model {
    /// Fit the model on a training table.
    fn fit(&mut self, x: &[CustomerFeatures], y: &[bool]) -> Result<()>;

    /// Predict a label per feature row.
    fn predict(&self, x: &[CustomerFeatures]) -> Result<Vec<bool>>;
}

/// One observation window's dataset and fitted model.
pub struct WindowResult<M> {
    /// The window's labeled train/test pair.
    pub data: TrainTestData,
    /// The model fitted on this window's training data.
    pub model: M,
}

/// Fit one model per observation date.
///
/// Each window recomputes its dataset from the full transaction log from
/// scratch; no state crosses window boundaries.
pub fn train_models<M, F>(
    transactions: &[Transaction],
    observation_end_dates: &[NaiveDate],
    config: &Config,
    mut make_model: F,
) -> Result<Vec<WindowResult<M>>>
where
    M: Model,
    F: FnMut() -> M,
{
    let assembler = DatasetAssembler::new(config.clone());
    let mut results = Vec::with_capacity(observation_end_dates.len());

    for &observation_end in observation_end_dates {
        let data = assembler.build(transactions, observation_end);
        let mut model = make_model();
        model.fit(&data.x_train, &data.y_train)?;

        info!(
            %observation_end,
            train_rows = data.x_train.len(),
            test_rows = data.x_test.len(),
            "fitted window model"
        );

        results.push(WindowResult { data, model });
    }

    Ok(results)
}

/// Constant reference model predicting the majority training label.
///
/// Stands in for a real classifier in tests and as a floor to compare
/// against.
#[derive(Debug, Clone, Default)]
pub struct MajorityClass {
    predict_positive: bool,
}

impl Model for MajorityClass {
    fn fit(&mut self, _x: &[CustomerFeatures], y: &[bool]) -> Result<()> {
        if y.is_empty() {
            return Err(Error::insufficient_data(
                "cannot fit on an empty training window",
            ));
        }
        let positives = y.iter().filter(|&&label| label).count();
        self.predict_positive = positives * 2 > y.len();
        Ok(())
    }

    fn predict(&self, x: &[CustomerFeatures]) -> Result<Vec<bool>> {
        Ok(vec![self.predict_positive; x.len()])
    }
}
