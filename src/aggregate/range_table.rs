//! Explicit numeric range tables, e.g. patient age groups.

use crate::classify::SignalInput;
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};

use super::BucketKey;

/// Half-open range `[min, max)`; `max = None` is unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    #[serde(default)]
    pub max: Option<f64>,
    pub label: String,
}

impl Range {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && self.max.map_or(true, |max| value < max)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeTableConfig {
    pub ranges: Vec<Range>,
    pub unmatched_label: String,
}

/// Ascending, non-overlapping ranges plus a catch-all label for values that
/// are absent or fall outside every range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RangeTableConfig", into = "RangeTableConfig")]
pub struct RangeTable {
    ranges: Vec<Range>,
    unmatched_label: String,
}

impl RangeTable {
    pub fn new(mut ranges: Vec<Range>, unmatched_label: impl Into<String>) -> Result<Self> {
        ranges.sort_by(|a, b| a.min.total_cmp(&b.min));
        for range in &ranges {
            if !range.min.is_finite() || range.max.is_some_and(|max| !max.is_finite()) {
                return Err(Error::validation(format!(
                    "range '{}' has a non-finite bound",
                    range.label
                )));
            }
            if range.max.is_some_and(|max| max <= range.min) {
                return Err(Error::validation(format!(
                    "range '{}' is empty: max must exceed min",
                    range.label
                )));
            }
        }
        for pair in ranges.windows(2) {
            let overlaps = pair[0].max.map_or(true, |max| max > pair[1].min);
            if overlaps {
                return Err(Error::validation(format!(
                    "ranges '{}' and '{}' overlap",
                    pair[0].label, pair[1].label
                )));
            }
        }
        Ok(Self {
            ranges,
            unmatched_label: unmatched_label.into(),
        })
    }

    /// Table with no ranges; every value is unmatched.
    pub fn unmatched_only(unmatched_label: impl Into<String>) -> Self {
        Self {
            ranges: Vec::new(),
            unmatched_label: unmatched_label.into(),
        }
    }

    /// Index of the containing range, or `ranges().len()` for the catch-all.
    pub fn index_of(&self, value: Option<f64>) -> usize {
        value
            .filter(|v| v.is_finite())
            .and_then(|v| self.ranges.iter().position(|r| r.contains(v)))
            .unwrap_or(self.ranges.len())
    }

    pub fn label_of(&self, value: Option<f64>) -> &str {
        self.ranges
            .get(self.index_of(value))
            .map_or(self.unmatched_label.as_str(), |r| r.label.as_str())
    }

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    pub fn unmatched_label(&self) -> &str {
        &self.unmatched_label
    }
}

impl TryFrom<RangeTableConfig> for RangeTable {
    type Error = Error;

    fn try_from(config: RangeTableConfig) -> Result<Self> {
        RangeTable::new(config.ranges, config.unmatched_label)
    }
}

impl From<RangeTable> for RangeTableConfig {
    fn from(table: RangeTable) -> Self {
        Self {
            ranges: table.ranges,
            unmatched_label: table.unmatched_label,
        }
    }
}

/// A range table reading one numeric auxiliary field.
#[derive(Debug, Clone)]
pub struct RangeKey<'t> {
    pub field: &'static str,
    pub table: &'t RangeTable,
}

impl BucketKey for RangeKey<'_> {
    fn labels(&self) -> Vec<String> {
        self.table
            .ranges
            .iter()
            .map(|r| r.label.clone())
            .chain(std::iter::once(self.table.unmatched_label.clone()))
            .collect()
    }

    fn bucket_of(&self, input: &SignalInput<'_>) -> usize {
        self.table.index_of(input.record.aux_number(self.field))
    }
}
