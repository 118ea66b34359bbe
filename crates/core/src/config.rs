//! Configuration structures for the repurchase-datasets pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for dataset assembly and evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Feature builder configuration.
    pub features: FeatureConfig,
    /// Naive baseline configuration.
    pub naive: NaiveBaselineConfig,
    /// Observation-date sequence configuration.
    pub windows: ObservationWindowConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            features: FeatureConfig::default(),
            naive: NaiveBaselineConfig::default(),
            windows: ObservationWindowConfig::default(),
        }
    }
}

/// Feature builder configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureConfig {
    /// Country the boolean geography flag compares against.
    pub home_country: String,
    /// Whether to emit the cyclical day-of-year feature of the last
    /// calibration purchase.
    pub enable_seasonality: bool,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            home_country: "United Kingdom".to_string(),
            enable_seasonality: false,
        }
    }
}

/// Naive "will repurchase" baseline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaiveBaselineConfig {
    /// Mean inter-purchase gap below which the baseline predicts a
    /// repurchase (average month length in days).
    pub mean_gap_threshold_days: f64,
}

impl Default for NaiveBaselineConfig {
    fn default() -> Self {
        Self {
            mean_gap_threshold_days: 30.4167,
        }
    }
}

/// Observation-date sequence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationWindowConfig {
    /// Months skipped at the start of the transaction span (insufficient
    /// purchase history).
    pub skip_leading_months: u32,
    /// Months skipped at the end of the span (no holdout available).
    pub skip_trailing_months: u32,
}

impl Default for ObservationWindowConfig {
    fn default() -> Self {
        Self {
            skip_leading_months: 2,
            skip_trailing_months: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.features.home_country, "United Kingdom");
        assert!(!config.features.enable_seasonality);
        assert!((config.naive.mean_gap_threshold_days - 30.4167).abs() < 1e-10);
        assert_eq!(config.windows.skip_leading_months, 2);
        assert_eq!(config.windows.skip_trailing_months, 1);
    }

    #[test]
    fn test_config_round_trip() {
        let mut config = Config::default();
        config.features.enable_seasonality = true;

        let json = serde_json::to_string(&config).unwrap();
        let restored: Config = serde_json::from_str(&json).unwrap();

        assert!(restored.features.enable_seasonality);
        assert_eq!(restored.features.home_country, config.features.home_country);
    }
}
