//! Feature and label construction for the repurchase-datasets pipeline.
//!
//! This crate handles:
//! - Calibration/holdout window splitting at rolling monthly cutoffs
//! - Inter-purchase timing aggregates
//! - Daily-revenue monetary aggregates
//! - RFM summaries over daily purchase periods
//! - Cyclical seasonality encoding (optional)
//! - Forward-looking next-month labels

pub mod builder;
pub mod labels;
pub mod monetary;
pub mod rfm;
pub mod seasonality;
pub mod timing;
pub mod window;

pub use builder::FeatureBuilder;
pub use labels::labels;
pub use monetary::revenue_aggregates;
pub use rfm::rfm_summaries;
pub use seasonality::cyclical_last_purchase;
pub use timing::gap_aggregates;
pub use window::{split, WindowSplit};
