// Test utility module for labstats integration tests
#![allow(dead_code)]

use labstats::config::LabstatsConfig;
use labstats::record::EntityKind;
use labstats::report::ReportSettings;
use labstats::testkit::reference_date;
use std::path::PathBuf;

/// Default settings pinned to the fixed test reference date.
pub fn default_settings(kind: EntityKind) -> ReportSettings {
    ReportSettings::from_config(LabstatsConfig::default(), kind, reference_date())
}

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

/// Render every cell of a section row as text.
pub fn row_text(row: &[labstats::report::Cell]) -> Vec<String> {
    row.iter().map(|cell| cell.render()).collect()
}
