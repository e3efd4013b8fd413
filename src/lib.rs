//! labstats: metric normalization and tier classification for clinical
//! laboratory reports.
//!
//! Raw records (services, exams, doctors, patients) are adapted once into
//! [`EntityRecord`]s, then turned into report sections: percentages of a
//! total, per-unit ratios, threshold tiers, bucket distributions and Top-N
//! listings. Data-quality problems never fail a report; they resolve to
//! placeholders and are reported through a [`DiagnosticSink`].

// Export modules for library usage
pub mod aggregate;
pub mod classify;
pub mod cli;
pub mod commands;
pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod formatting;
pub mod io;
pub mod metrics;
pub mod observability;
pub mod output;
pub mod record;
pub mod report;
pub mod select;
pub mod testkit;

// Re-export commonly used types
pub use crate::aggregate::{group_records, Bucket, BucketKey, GroupingOptions};
pub use crate::classify::{RuleSet, Signal, TierClassifier, TierTable};
pub use crate::config::LabstatsConfig;
pub use crate::diagnostics::{DiagnosticSink, LogSink, NoopSink, RecordingSink};
pub use crate::errors::{Error, Result};
pub use crate::metrics::{percentage, ratio, round_to, Precision, PrecisionPolicy};
pub use crate::output::OutputFormat;
pub use crate::record::{Adapter, EntityKind, EntityRecord, FieldSource};
pub use crate::report::{build_report, generate_report, Report, ReportSettings, Section};
pub use crate::select::{select_top, Slot, TopN};
