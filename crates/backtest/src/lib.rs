//! Rolling-window dataset assembly and evaluation for the
//! repurchase-datasets pipeline.
//!
//! This crate provides:
//! - Train/test dataset assembly per observation date
//! - The naive mean-gap repurchase baseline
//! - Rolling-window model training behind an opaque `Model` seam
//! - Per-window and cross-window evaluation

pub mod dataset;
pub mod metrics;
pub mod naive;
pub mod runner;

pub use dataset::{DatasetAssembler, TrainTestData};
pub use metrics::{
    accuracy, evaluate, precision, EvalMetric, EvaluationReport, MetricSeries, WindowEvaluation,
};
pub use naive::{naive_labels, NaiveWindowLabels};
pub use runner::{train_models, MajorityClass, Model, WindowResult};
