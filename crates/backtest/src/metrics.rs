//! Model evaluation against true labels and the naive baseline.
//!
//! Scores each observation window's model and baseline predictions, and
//! aggregates across windows.

use chrono::NaiveDate;
use repurchase_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::naive::NaiveWindowLabels;
use crate::runner::{Model, WindowResult};

/// Evaluation metric for boolean predictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvalMetric {
    /// Fraction of predictions matching the true label.
    Accuracy,
    /// Fraction of positive predictions that are correct.
    Precision,
}

impl EvalMetric {
    /// Score predictions against true labels.
    pub fn score(self, y_true: &[bool], y_pred: &[bool]) -> Result<f64> {
        match self {
            EvalMetric::Accuracy => accuracy(y_true, y_pred),
            EvalMetric::Precision => precision(y_true, y_pred),
        }
    }
}

fn check_aligned(y_true: &[bool], y_pred: &[bool]) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(Error::contract(format!(
            "prediction length {} does not match label length {}",
            y_pred.len(),
            y_true.len()
        )));
    }
    if y_true.is_empty() {
        return Err(Error::insufficient_data("cannot score an empty label series"));
    }
    Ok(())
}

/// Fraction of predictions matching the true labels.
pub fn accuracy(y_true: &[bool], y_pred: &[bool]) -> Result<f64> {
    check_aligned(y_true, y_pred)?;
    let correct = y_true
        .iter()
        .zip(y_pred)
        .filter(|(truth, prediction)| truth == prediction)
        .count();
    Ok(correct as f64 / y_true.len() as f64)
}

/// Fraction of positive predictions that are true positives.
///
/// Zero positive predictions score 0, not NaN.
pub fn precision(y_true: &[bool], y_pred: &[bool]) -> Result<f64> {
    check_aligned(y_true, y_pred)?;
    let positive_predictions = y_pred.iter().filter(|&&prediction| prediction).count();
    if positive_predictions == 0 {
        return Ok(0.0);
    }
    let true_positives = y_true
        .iter()
        .zip(y_pred)
        .filter(|&(&truth, &prediction)| truth && prediction)
        .count();
    Ok(true_positives as f64 / positive_predictions as f64)
}

/// Model and baseline scores for one observation window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowEvaluation {
    /// Observation date anchoring the window.
    pub observation_end: NaiveDate,
    /// Model score on the training table.
    pub model_train: f64,
    /// Model score on the test table.
    pub model_test: f64,
    /// Baseline score against the training labels.
    pub naive_train: f64,
    /// Baseline score against the test labels.
    pub naive_test: f64,
    /// Count of positive model predictions on the test table.
    pub model_positive_preds: usize,
    /// Count of positive baseline predictions on the test table.
    pub naive_positive_preds: usize,
}

/// Per-window and cross-window evaluation results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Metric the scores were computed with.
    pub metric: EvalMetric,
    /// One evaluation per observation window, in date order.
    pub windows: Vec<WindowEvaluation>,
}

impl EvaluationReport {
    /// Mean model score on training tables across windows.
    pub fn mean_model_train(&self) -> f64 {
        mean(self.windows.iter().map(|w| w.model_train))
    }

    /// Mean model score on test tables across windows.
    pub fn mean_model_test(&self) -> f64 {
        mean(self.windows.iter().map(|w| w.model_test))
    }

    /// Mean baseline score against training labels across windows.
    pub fn mean_naive_train(&self) -> f64 {
        mean(self.windows.iter().map(|w| w.naive_train))
    }

    /// Mean baseline score against test labels across windows.
    pub fn mean_naive_test(&self) -> f64 {
        mean(self.windows.iter().map(|w| w.naive_test))
    }

    /// Series consumed by plotting layers.
    pub fn metric_series(&self) -> MetricSeries {
        MetricSeries {
            observation_end_dates: self.windows.iter().map(|w| w.observation_end).collect(),
            test_metrics: self.windows.iter().map(|w| w.model_test).collect(),
            naive_test_metrics: self.windows.iter().map(|w| w.naive_test).collect(),
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values {
        sum += value;
        count += 1;
    }
    if count > 0 {
        sum / count as f64
    } else {
        0.0
    }
}

/// Per-window test metric series for chart consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricSeries {
    /// Observation dates, one per window.
    pub observation_end_dates: Vec<NaiveDate>,
    /// Model test scores per window.
    pub test_metrics: Vec<f64>,
    /// Baseline test scores per window.
    pub naive_test_metrics: Vec<f64>,
}

/// Evaluate fitted window models against true labels and the naive baseline.
///
/// `results` and `naive` must cover the same observation dates in the same
/// order; anything else is a contract violation.
pub fn evaluate<M: Model>(
    results: &[WindowResult<M>],
    naive: &[NaiveWindowLabels],
    metric: EvalMetric,
) -> Result<EvaluationReport> {
    if results.len() != naive.len() {
        return Err(Error::contract(format!(
            "{} fitted windows but {} naive label windows",
            results.len(),
            naive.len()
        )));
    }

    let mut windows = Vec::with_capacity(results.len());
    for (result, naive_window) in results.iter().zip(naive) {
        let data = &result.data;
        if naive_window.observation_end != data.observation_end {
            return Err(Error::contract(format!(
                "naive labels for {} paired with window {}",
                naive_window.observation_end, data.observation_end
            )));
        }

        let y_pred_train = result.model.predict(&data.x_train)?;
        let y_pred_test = result.model.predict(&data.x_test)?;

        windows.push(WindowEvaluation {
            observation_end: data.observation_end,
            model_train: metric.score(&data.y_train, &y_pred_train)?,
            model_test: metric.score(&data.y_test, &y_pred_test)?,
            naive_train: metric.score(&data.y_train, &naive_window.y_train)?,
            naive_test: metric.score(&data.y_test, &naive_window.y_test)?,
            model_positive_preds: y_pred_test.iter().filter(|&&p| p).count(),
            naive_positive_preds: naive_window.y_test.iter().filter(|&&p| p).count(),
        });
    }

    Ok(EvaluationReport { metric, windows })
}
