//! Derived metrics: percentages of a total and per-unit ratios.
//!
//! Every calculator tolerates a zero or negative denominator and returns 0
//! instead of failing, so a report can always be rendered.

pub mod percentage;
pub mod rounding;

pub use percentage::{
    format_percentage, percentage, ratio, shares_of_total, PLACEHOLDER_PERCENT,
};
pub use rounding::{round_to, Precision, MAX_PRECISION};

use crate::record::EntityRecord;
use serde::{Deserialize, Serialize};

/// Precision policy for one report run. All percentages in a run share one
/// precision and all ratios share another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecisionPolicy {
    #[serde(default = "default_percentage_precision")]
    pub percentage: Precision,
    #[serde(default = "default_ratio_precision")]
    pub ratio: Precision,
}

fn default_percentage_precision() -> Precision {
    Precision::ONE
}

fn default_ratio_precision() -> Precision {
    Precision::TWO
}

impl Default for PrecisionPolicy {
    fn default() -> Self {
        Self {
            percentage: default_percentage_precision(),
            ratio: default_ratio_precision(),
        }
    }
}

/// Metrics computed on demand for one record; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub percentage_of_total: f64,
    /// `raw_count / secondary_count`
    pub ratio: f64,
}

impl DerivedMetrics {
    pub fn compute(record: &EntityRecord, total_raw: u64, policy: &PrecisionPolicy) -> Self {
        Self {
            percentage_of_total: percentage(
                record.raw_count as f64,
                total_raw as f64,
                policy.percentage,
            ),
            ratio: ratio(
                record.raw_count as f64,
                record.secondary_count as f64,
                policy.ratio,
            ),
        }
    }
}

/// Sum of raw counts across a collection.
pub fn total_raw_count(records: &[EntityRecord]) -> u64 {
    saturating_sum(records.iter().map(|r| r.raw_count))
}

/// Sum of counts that stops at `u64::MAX` instead of overflowing.
pub fn saturating_sum(counts: impl IntoIterator<Item = u64>) -> u64 {
    counts.into_iter().fold(0, u64::saturating_add)
}
