//! Core data types for the repurchase-datasets pipeline.

use chrono::{Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Opaque customer key.
pub type CustomerId = String;

/// Day counts and day-valued statistics.
pub type Days = f64;

/// Midnight timestamp of a calendar date.
///
/// Window cutoffs are dates, transaction times are timestamps; comparisons
/// anchor the cutoff at midnight of the cutoff day.
#[inline]
pub fn day_start(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Date one calendar month after `date` (clamped at short month ends).
#[inline]
pub fn add_month(date: NaiveDate) -> NaiveDate {
    date + Months::new(1)
}

/// Date one calendar month before `date` (clamped at short month ends).
#[inline]
pub fn sub_month(date: NaiveDate) -> NaiveDate {
    date - Months::new(1)
}

/// A single cleaned purchase record.
///
/// Invariants hold post-cleaning: `unit_price > 0`, `invoice_no` is a
/// numeric non-cancellation identifier, `stock_code` denotes a sellable item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Customer key.
    pub customer_id: CustomerId,
    /// Invoice identifier.
    pub invoice_no: String,
    /// Purchase timestamp (timezone-naive).
    pub invoice_date: NaiveDateTime,
    /// Item key.
    pub stock_code: String,
    /// Units purchased.
    pub quantity: i64,
    /// Price per unit.
    pub unit_price: f64,
    /// Customer country.
    pub country: String,
    /// Line revenue (`quantity * unit_price`).
    pub revenue: f64,
}

impl Transaction {
    /// Calendar day of the purchase.
    #[inline]
    pub fn invoice_day(&self) -> NaiveDate {
        self.invoice_date.date()
    }
}

/// Window-splitting policy for a given observation date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitPolicy {
    /// Calibration ends one calendar month before the observation date, so
    /// the label's target month starts exactly at the observation date.
    Train,
    /// Calibration ends at the observation date itself.
    Test,
}

impl SplitPolicy {
    /// Calibration cutoff date for `observation_end` under this policy.
    pub fn calib_period_end(self, observation_end: NaiveDate) -> NaiveDate {
        match self {
            SplitPolicy::Train => sub_month(observation_end),
            SplitPolicy::Test => observation_end,
        }
    }
}

/// Inter-purchase timing aggregates over successive-day gaps.
///
/// Gaps are whole days between consecutive distinct purchase days. The
/// standard deviation is the sample standard deviation, so at least two gaps
/// (three distinct purchase days) are required for a defined value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapAggregates {
    /// Mean gap in days.
    pub mean_days: Days,
    /// Sample standard deviation of gaps in days.
    pub stdev_days: Days,
    /// Shortest gap in days.
    pub min_days: Days,
    /// Longest gap in days.
    pub max_days: Days,
}

/// Monetary aggregates over per-calendar-day revenue sums.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenueAggregates {
    /// Mean daily revenue.
    pub mean: f64,
    /// Sample standard deviation of daily revenue.
    pub stdev: f64,
    /// Smallest daily revenue.
    pub min: f64,
    /// Largest daily revenue.
    pub max: f64,
    /// Total revenue.
    pub sum: f64,
}

/// Recency/frequency/monetary summary over daily purchase periods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RfmSummary {
    /// Repeat-purchase count: distinct purchase days minus one.
    pub frequency: f64,
    /// Days between the first and last purchase.
    pub recency: Days,
    /// Days between the first purchase and the calibration cutoff (`T`).
    pub tenure: Days,
    /// Mean revenue of repeat purchase days (0 when `frequency` is 0).
    pub monetary_value: f64,
    /// Days since the last purchase: `tenure - recency` (staleness).
    pub tenure_minus_recency: Days,
}

/// Cyclical encoding of a day-of-year position (period 365).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CyclicalDayOfYear {
    pub sin: f64,
    pub cos: f64,
}

/// Predictive features for one customer, without the customer key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerFeatures {
    /// Inter-purchase timing aggregates.
    pub timing: GapAggregates,
    /// Daily-revenue monetary aggregates.
    pub monetary: RevenueAggregates,
    /// RFM summary.
    pub rfm: RfmSummary,
    /// Whether the customer's first-seen country is the home country.
    pub uk: bool,
    /// Cyclical day-of-year of the last calibration purchase, when enabled.
    pub seasonality: Option<CyclicalDayOfYear>,
}

impl CustomerFeatures {
    /// Flatten to a numeric vector for model consumers.
    ///
    /// The boolean flag maps to 0/1; seasonality components are appended
    /// only when present.
    pub fn values(&self) -> Vec<f64> {
        let mut values = vec![
            self.timing.mean_days,
            self.timing.stdev_days,
            self.timing.min_days,
            self.timing.max_days,
            self.monetary.mean,
            self.monetary.stdev,
            self.monetary.min,
            self.monetary.max,
            self.monetary.sum,
            self.rfm.frequency,
            self.rfm.recency,
            self.rfm.tenure,
            self.rfm.monetary_value,
            self.rfm.tenure_minus_recency,
            if self.uk { 1.0 } else { 0.0 },
        ];
        if let Some(seasonality) = &self.seasonality {
            values.push(seasonality.sin);
            values.push(seasonality.cos);
        }
        values
    }
}

/// One row of the feature table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    /// Customer key (join key only, not a predictive signal).
    pub customer_id: CustomerId,
    /// Predictive features.
    pub features: CustomerFeatures,
}

/// One row of the label table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelRow {
    /// Customer key, matching a feature-table row.
    pub customer_id: CustomerId,
    /// Whether the customer's first holdout purchase fell within the month
    /// immediately following the calibration cutoff.
    pub purchase_next_month: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_arithmetic_clamps() {
        assert_eq!(add_month(date(2011, 1, 31)), date(2011, 2, 28));
        assert_eq!(sub_month(date(2011, 3, 31)), date(2011, 2, 28));
        assert_eq!(add_month(date(2011, 4, 15)), date(2011, 5, 15));
    }

    #[test]
    fn test_policy_cutoffs_differ_by_one_month() {
        let observation_end = date(2011, 6, 1);
        let train_end = SplitPolicy::Train.calib_period_end(observation_end);
        let test_end = SplitPolicy::Test.calib_period_end(observation_end);

        assert_eq!(train_end, date(2011, 5, 1));
        assert_eq!(test_end, observation_end);
        assert_eq!(train_end, sub_month(test_end));
    }

    #[test]
    fn test_day_start_is_midnight() {
        let start = day_start(date(2011, 6, 1));
        assert_eq!(start.date(), date(2011, 6, 1));
        assert_eq!(start.time(), NaiveTime::MIN);
    }

    fn make_features(seasonality: Option<CyclicalDayOfYear>) -> CustomerFeatures {
        CustomerFeatures {
            timing: GapAggregates {
                mean_days: 4.0,
                stdev_days: 0.0,
                min_days: 4.0,
                max_days: 4.0,
            },
            monetary: RevenueAggregates {
                mean: 10.0,
                stdev: 0.0,
                min: 10.0,
                max: 10.0,
                sum: 30.0,
            },
            rfm: RfmSummary {
                frequency: 2.0,
                recency: 8.0,
                tenure: 10.0,
                monetary_value: 10.0,
                tenure_minus_recency: 2.0,
            },
            uk: true,
            seasonality,
        }
    }

    #[test]
    fn test_values_without_seasonality() {
        let values = make_features(None).values();
        assert_eq!(values.len(), 15);
        assert!((values[14] - 1.0).abs() < 1e-10); // UK flag maps to 1.0
    }

    #[test]
    fn test_values_with_seasonality() {
        let values = make_features(Some(CyclicalDayOfYear { sin: 0.5, cos: -0.5 })).values();
        assert_eq!(values.len(), 17);
        assert!((values[15] - 0.5).abs() < 1e-10);
        assert!((values[16] + 0.5).abs() < 1e-10);
    }
}
