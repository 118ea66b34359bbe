//! Feature table assembly.
//!
//! Combines the per-customer sub-features into the final feature table.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use repurchase_core::{CustomerFeatures, CustomerId, FeatureConfig, FeatureRow, Transaction};
use tracing::debug;

use crate::monetary::revenue_aggregates;
use crate::rfm::rfm_summaries;
use crate::seasonality::cyclical_last_purchase;
use crate::timing::gap_aggregates;

/// Builds the per-customer feature table from a calibration window.
pub struct FeatureBuilder {
    config: FeatureConfig,
}

impl FeatureBuilder {
    /// Create a new feature builder from configuration.
    pub fn new(config: FeatureConfig) -> Self {
        Self { config }
    }

    /// Build the feature table for a calibration window.
    ///
    /// The base list is the unique calibration customers sorted by key. Each
    /// sub-feature is joined onto it; a row survives only if every
    /// sub-feature resolved. Timing aggregates are the one join that can
    /// miss (customers below three distinct purchase days), so they are the
    /// single filter point deciding the feature population. Missing joins
    /// drop the row; they never become zeros.
    ///
    /// Operates on the calibration window only, so holdout data cannot leak
    /// into features.
    pub fn build(&self, calib: &[Transaction], calib_period_end: NaiveDate) -> Vec<FeatureRow> {
        let timing = gap_aggregates(calib);
        let monetary = revenue_aggregates(calib);
        let rfm = rfm_summaries(calib, calib_period_end);
        let seasonality = self
            .config
            .enable_seasonality
            .then(|| cyclical_last_purchase(calib));
        let countries = first_countries(calib);

        let customers: BTreeSet<&str> = calib
            .iter()
            .map(|transaction| transaction.customer_id.as_str())
            .collect();
        let total = customers.len();

        let rows: Vec<FeatureRow> = customers
            .into_iter()
            .filter_map(|customer_id| {
                let features = CustomerFeatures {
                    timing: *timing.get(customer_id)?,
                    monetary: *monetary.get(customer_id)?,
                    rfm: *rfm.get(customer_id)?,
                    uk: *countries.get(customer_id)? == self.config.home_country,
                    seasonality: match &seasonality {
                        Some(encoded) => Some(*encoded.get(customer_id)?),
                        None => None,
                    },
                };
                Some(FeatureRow {
                    customer_id: customer_id.to_string(),
                    features,
                })
            })
            .collect();

        debug!(
            customers = total,
            kept = rows.len(),
            dropped = total - rows.len(),
            "assembled feature table"
        );

        rows
    }
}

/// First-encountered country per customer, in calibration row order.
fn first_countries(calib: &[Transaction]) -> BTreeMap<CustomerId, &str> {
    let mut countries = BTreeMap::new();
    for transaction in calib {
        countries
            .entry(transaction.customer_id.clone())
            .or_insert(transaction.country.as_str());
    }
    countries
}
