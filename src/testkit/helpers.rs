//! Test helper functions for creating entity records.
//!
//! | Helper | Purpose |
//! |--------|---------|
//! | [`RecordBuilder`] | Build an [`EntityRecord`] fluently |
//! | [`scenario_records`] | The A/B/C demand scenario (30, 10, 0 requests) |
//! | [`reference_date`] | Fixed report date for deterministic ages |
//!
//! ```rust,ignore
//! use labstats::testkit::RecordBuilder;
//! use labstats::record::{fields, EntityKind};
//!
//! let service = RecordBuilder::new(EntityKind::Service, "Hematología")
//!     .raw(42)
//!     .secondary(30)
//!     .number(fields::PRICE, 85.0)
//!     .build();
//! ```

use crate::record::{AuxValue, EntityKind, EntityRecord};
use chrono::NaiveDate;

/// Fluent builder for [`EntityRecord`] test data.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: EntityRecord,
}

impl RecordBuilder {
    pub fn new(kind: EntityKind, identity: &str) -> Self {
        Self {
            record: EntityRecord::new(kind, identity),
        }
    }

    pub fn raw(mut self, count: u64) -> Self {
        self.record.raw_count = count;
        self
    }

    pub fn secondary(mut self, count: u64) -> Self {
        self.record.secondary_count = count;
        self
    }

    pub fn number(mut self, field: &str, value: f64) -> Self {
        self.record
            .auxiliary
            .insert(field.to_string(), AuxValue::Number(value));
        self
    }

    pub fn count(mut self, field: &str, value: u64) -> Self {
        self.record
            .auxiliary
            .insert(field.to_string(), AuxValue::Count(value));
        self
    }

    pub fn text(mut self, field: &str, value: &str) -> Self {
        self.record
            .auxiliary
            .insert(field.to_string(), AuxValue::Text(value.to_string()));
        self
    }

    pub fn flag(mut self, field: &str, value: bool) -> Self {
        self.record
            .auxiliary
            .insert(field.to_string(), AuxValue::Flag(value));
        self
    }

    /// Set a date field. Panics on an impossible date.
    pub fn date(mut self, field: &str, year: i32, month: u32, day: u32) -> Self {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .unwrap_or_else(|| panic!("invalid test date {year}-{month}-{day}"));
        self.record
            .auxiliary
            .insert(field.to_string(), AuxValue::Date(Some(date)));
        self
    }

    pub fn build(self) -> EntityRecord {
        self.record
    }
}

/// Three records with 30, 10 and 0 requests.
pub fn scenario_records(kind: EntityKind) -> Vec<EntityRecord> {
    vec![
        RecordBuilder::new(kind, "A").raw(30).build(),
        RecordBuilder::new(kind, "B").raw(10).build(),
        RecordBuilder::new(kind, "C").raw(0).build(),
    ]
}

/// Records named `prefix 1..=n` with the given raw counts.
pub fn records_with_counts(kind: EntityKind, prefix: &str, counts: &[u64]) -> Vec<EntityRecord> {
    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            RecordBuilder::new(kind, &format!("{prefix} {}", i + 1))
                .raw(count)
                .build()
        })
        .collect()
}

pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).unwrap_or_default()
}
