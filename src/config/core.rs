use serde::{Deserialize, Deserializer, Serialize};

use super::thresholds;
use crate::aggregate::{GroupingOptions, RangeTable};
use crate::classify::TierTable;
use crate::metrics::PrecisionPolicy;
use crate::output::OutputFormat;
use crate::record::EntityKind;

/// Root configuration structure for labstats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LabstatsConfig {
    /// Decimal places for percentages and ratios
    #[serde(default)]
    pub precision: PrecisionPolicy,

    #[serde(default)]
    pub services: ServicesConfig,

    #[serde(default)]
    pub exams: ExamsConfig,

    #[serde(default)]
    pub doctors: DoctorsConfig,

    #[serde(default)]
    pub patients: PatientsConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl LabstatsConfig {
    /// Precision for one report: its own override, else the global policy.
    pub fn precision_for(&self, kind: EntityKind) -> PrecisionPolicy {
        let override_policy = match kind {
            EntityKind::Service => self.services.precision,
            EntityKind::Exam => self.exams.precision,
            EntityKind::Doctor => self.doctors.precision,
            EntityKind::Patient => self.patients.precision,
        };
        override_policy.unwrap_or(self.precision)
    }

    /// Top-N parameters for one report.
    pub fn top_for(&self, kind: EntityKind) -> (usize, bool) {
        match kind {
            EntityKind::Service => (self.services.top_limit, self.services.pad_top),
            EntityKind::Exam => (self.exams.top_limit, self.exams.pad_top),
            EntityKind::Doctor => (self.doctors.top_limit, self.doctors.pad_top),
            EntityKind::Patient => (self.patients.top_limit, self.patients.pad_top),
        }
    }
}

/// `[services]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicesConfig {
    #[serde(default = "thresholds::demand_tiers")]
    pub demand_tiers: TierTable,

    #[serde(default = "thresholds::premium_price")]
    pub premium_price: f64,

    #[serde(default = "thresholds::top_limit", deserialize_with = "positive_limit")]
    pub top_limit: usize,

    #[serde(default = "default_true")]
    pub pad_top: bool,

    #[serde(default)]
    pub grouping: GroupingOptions,

    #[serde(default)]
    pub precision: Option<PrecisionPolicy>,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            demand_tiers: thresholds::demand_tiers(),
            premium_price: thresholds::premium_price(),
            top_limit: thresholds::top_limit(),
            pad_top: true,
            grouping: GroupingOptions::default(),
            precision: None,
        }
    }
}

/// `[exams]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamsConfig {
    #[serde(default = "thresholds::exam_frequency_tiers")]
    pub frequency_tiers: TierTable,

    #[serde(default = "thresholds::top_limit", deserialize_with = "positive_limit")]
    pub top_limit: usize,

    #[serde(default = "default_true")]
    pub pad_top: bool,

    #[serde(default)]
    pub grouping: GroupingOptions,

    #[serde(default)]
    pub precision: Option<PrecisionPolicy>,
}

impl Default for ExamsConfig {
    fn default() -> Self {
        Self {
            frequency_tiers: thresholds::exam_frequency_tiers(),
            top_limit: thresholds::top_limit(),
            pad_top: true,
            grouping: GroupingOptions::default(),
            precision: None,
        }
    }
}

/// `[doctors]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorsConfig {
    #[serde(default = "thresholds::doctor_activity_tiers")]
    pub activity_tiers: TierTable,

    /// Classified on exams per request
    #[serde(default = "thresholds::doctor_efficiency_tiers")]
    pub efficiency_tiers: TierTable,

    #[serde(default = "thresholds::top_limit", deserialize_with = "positive_limit")]
    pub top_limit: usize,

    #[serde(default)]
    pub pad_top: bool,

    #[serde(default)]
    pub grouping: GroupingOptions,

    #[serde(default)]
    pub precision: Option<PrecisionPolicy>,
}

impl Default for DoctorsConfig {
    fn default() -> Self {
        Self {
            activity_tiers: thresholds::doctor_activity_tiers(),
            efficiency_tiers: thresholds::doctor_efficiency_tiers(),
            top_limit: thresholds::top_limit(),
            pad_top: false,
            grouping: GroupingOptions::default(),
            precision: None,
        }
    }
}

/// `[patients]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientsConfig {
    #[serde(default = "thresholds::patient_frequency_tiers")]
    pub frequency_tiers: TierTable,

    #[serde(default = "thresholds::age_ranges")]
    pub age_ranges: RangeTable,

    #[serde(default = "thresholds::top_limit", deserialize_with = "positive_limit")]
    pub top_limit: usize,

    #[serde(default)]
    pub pad_top: bool,

    #[serde(default)]
    pub grouping: GroupingOptions,

    #[serde(default)]
    pub precision: Option<PrecisionPolicy>,
}

impl Default for PatientsConfig {
    fn default() -> Self {
        Self {
            frequency_tiers: thresholds::patient_frequency_tiers(),
            age_ranges: thresholds::age_ranges(),
            top_limit: thresholds::top_limit(),
            pad_top: false,
            grouping: GroupingOptions::default(),
            precision: None,
        }
    }
}

/// `[output]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub default_format: OutputFormat,
}

fn default_true() -> bool {
    true
}

/// Top-N limits must select at least one row.
fn positive_limit<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let limit = usize::deserialize(deserializer)?;
    if limit == 0 {
        return Err(serde::de::Error::custom("top_limit must be at least 1"));
    }
    Ok(limit)
}
