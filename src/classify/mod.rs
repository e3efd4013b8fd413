//! Threshold-table tier classification.
//!
//! A [`TierTable`] is an ordered list of `(threshold, label)` pairs plus a
//! default label. Classification scans from the highest threshold down and
//! returns the first label whose threshold the value meets (`>=`). Tables are
//! declarative and come from config, so each report keeps its rules as data.
//!
//! - **predicates.rs**: small boolean helpers
//! - **signal.rs**: which number of a record a classifier reads
//! - **rules.rs**: first-matching-rule-wins classification across dimensions

use serde::{Deserialize, Serialize};

pub mod predicates;
pub mod rules;
pub mod signal;

pub use rules::{Condition, Fallback, Rule, RuleSet};
pub use signal::{Signal, SignalInput};

use crate::errors::{Error, Result};
use predicates::{all_finite, is_strictly_descending, meets_threshold};

/// One `(threshold, label)` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub threshold: f64,
    pub label: String,
}

/// Serialized form of a [`TierTable`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierTableConfig {
    pub tiers: Vec<Tier>,
    pub default_label: String,
}

/// Validated threshold table, highest threshold first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TierTableConfig", into = "TierTableConfig")]
pub struct TierTable {
    tiers: Vec<Tier>,
    default_label: String,
}

impl TierTable {
    /// Build a table. Entries may come in any order; they are sorted
    /// descending. Duplicate or non-finite thresholds are rejected.
    pub fn new<S: Into<String>>(
        tiers: impl IntoIterator<Item = (f64, S)>,
        default_label: impl Into<String>,
    ) -> Result<Self> {
        let mut tiers: Vec<Tier> = tiers
            .into_iter()
            .map(|(threshold, label)| Tier {
                threshold,
                label: label.into(),
            })
            .collect();

        let thresholds: Vec<f64> = tiers.iter().map(|t| t.threshold).collect();
        if !all_finite(&thresholds) {
            return Err(Error::validation("tier thresholds must be finite numbers"));
        }
        tiers.sort_by(|a, b| b.threshold.total_cmp(&a.threshold));

        let sorted: Vec<f64> = tiers.iter().map(|t| t.threshold).collect();
        if !is_strictly_descending(&sorted) {
            return Err(Error::validation(format!(
                "duplicate tier threshold in {sorted:?}"
            )));
        }

        Ok(Self {
            tiers,
            default_label: default_label.into(),
        })
    }

    /// Table with no tiers; everything classifies as `default_label`.
    pub fn empty(default_label: impl Into<String>) -> Self {
        Self {
            tiers: Vec::new(),
            default_label: default_label.into(),
        }
    }

    /// Label of the first tier whose threshold `value` meets.
    pub fn classify(&self, value: f64) -> &str {
        self.tiers
            .iter()
            .find(|tier| meets_threshold(value, tier.threshold))
            .map_or(self.default_label.as_str(), |tier| tier.label.as_str())
    }

    /// Position of the matching tier, 0 for the highest. Values below every
    /// threshold rank `len()`.
    pub fn rank(&self, value: f64) -> usize {
        self.tiers
            .iter()
            .position(|tier| meets_threshold(value, tier.threshold))
            .unwrap_or(self.tiers.len())
    }

    /// Labels in rank order, default last.
    pub fn labels(&self) -> Vec<&str> {
        self.tiers
            .iter()
            .map(|t| t.label.as_str())
            .chain(std::iter::once(self.default_label.as_str()))
            .collect()
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn default_label(&self) -> &str {
        &self.default_label
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

impl TryFrom<TierTableConfig> for TierTable {
    type Error = Error;

    fn try_from(config: TierTableConfig) -> Result<Self> {
        TierTable::new(
            config.tiers.into_iter().map(|t| (t.threshold, t.label)),
            config.default_label,
        )
    }
}

impl From<TierTable> for TierTableConfig {
    fn from(table: TierTable) -> Self {
        Self {
            tiers: table.tiers,
            default_label: table.default_label,
        }
    }
}

/// A tier table bound to the signal it reads.
#[derive(Debug, Clone, PartialEq)]
pub struct TierClassifier {
    pub signal: Signal,
    pub table: TierTable,
}

impl TierClassifier {
    pub fn new(signal: Signal, table: TierTable) -> Self {
        Self { signal, table }
    }

    pub fn classify<'t>(&'t self, input: &SignalInput<'_>) -> &'t str {
        self.table.classify(self.signal.value(input))
    }

    pub fn rank(&self, input: &SignalInput<'_>) -> usize {
        self.table.rank(self.signal.value(input))
    }
}
