//! Numeric signals a classifier can read from a record.

use crate::metrics::{ratio, DerivedMetrics, Precision, PrecisionPolicy};
use crate::record::EntityRecord;

/// A record viewed together with its derived metrics.
#[derive(Debug, Clone, Copy)]
pub struct SignalInput<'a> {
    pub record: &'a EntityRecord,
    pub metrics: DerivedMetrics,
    pub ratio_precision: Precision,
}

impl<'a> SignalInput<'a> {
    pub fn new(record: &'a EntityRecord, total_raw: u64, policy: &PrecisionPolicy) -> Self {
        Self {
            record,
            metrics: DerivedMetrics::compute(record, total_raw, policy),
            ratio_precision: policy.ratio,
        }
    }
}

/// Which number of a record drives a classification.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    RawCount,
    SecondaryCount,
    /// Percentage of the collection total.
    Share,
    /// `raw_count / secondary_count`
    Ratio,
    /// A numeric auxiliary field; absent values read as 0.
    Aux(String),
    /// A numeric auxiliary field divided by `raw_count`.
    PerRequest(String),
}

impl Signal {
    pub fn aux(name: &str) -> Self {
        Signal::Aux(name.to_string())
    }

    pub fn per_request(name: &str) -> Self {
        Signal::PerRequest(name.to_string())
    }

    pub fn value(&self, input: &SignalInput<'_>) -> f64 {
        let record = input.record;
        match self {
            Signal::RawCount => record.raw_count as f64,
            Signal::SecondaryCount => record.secondary_count as f64,
            Signal::Share => input.metrics.percentage_of_total,
            Signal::Ratio => input.metrics.ratio,
            Signal::Aux(name) => record.aux_number(name).unwrap_or(0.0),
            Signal::PerRequest(name) => ratio(
                record.aux_number(name).unwrap_or(0.0),
                record.raw_count as f64,
                input.ratio_precision,
            ),
        }
    }
}
