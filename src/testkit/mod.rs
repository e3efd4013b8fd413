//! Testing helpers shared by unit tests, integration tests and benches.
//!
//! Builders create [`crate::record::EntityRecord`]s directly, skipping the
//! JSON adapter, so classification and grouping tests stay focused on the
//! logic under test.

pub mod helpers;

pub use helpers::{records_with_counts, reference_date, scenario_records, RecordBuilder};
