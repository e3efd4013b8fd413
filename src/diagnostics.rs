//! Diagnostic hooks for data-quality events.
//!
//! The normalization core never logs directly. It calls a [`DiagnosticSink`]
//! at three extension points: a field fell back to its default, a value was
//! present but unusable, or a section had no input records. Callers choose
//! whether those events go to the log, to a test recorder, or nowhere.

use std::cell::RefCell;

/// Receiver for data-quality events. All hooks default to no-ops.
pub trait DiagnosticSink {
    /// A field was absent under every synonym and resolved to its default.
    fn on_missing_field(&self, _entity: &str, _field: &str) {}

    /// A field was present but could not be interpreted.
    fn on_malformed_value(&self, _entity: &str, _field: &str, _raw: &str) {}

    /// A report section received no records.
    fn on_empty_input(&self, _section: &str) {}
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {}

/// Sink that forwards events to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn on_missing_field(&self, entity: &str, field: &str) {
        log::debug!(
            "[{}] '{}' has no '{}' field, using default",
            crate::observability::current_phase_label(),
            entity,
            field
        );
    }

    fn on_malformed_value(&self, entity: &str, field: &str, raw: &str) {
        log::warn!(
            "[{}] '{}' has malformed '{}' value {:?}, using placeholder",
            crate::observability::current_phase_label(),
            entity,
            field,
            raw
        );
    }

    fn on_empty_input(&self, section: &str) {
        log::info!("Section '{}' has no records, emitting placeholder row", section);
    }
}

/// A recorded diagnostic event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticEvent {
    MissingField { entity: String, field: String },
    MalformedValue {
        entity: String,
        field: String,
        raw: String,
    },
    EmptyInput { section: String },
}

/// Sink that keeps every event in memory, for tests and dry runs.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: RefCell<Vec<DiagnosticEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events.borrow().clone()
    }

    pub fn malformed_count(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, DiagnosticEvent::MalformedValue { .. }))
            .count()
    }

    pub fn missing_fields_for(&self, entity: &str) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                DiagnosticEvent::MissingField { entity: e, field } if e == entity => {
                    Some(field.clone())
                }
                _ => None,
            })
            .collect()
    }
}

impl DiagnosticSink for RecordingSink {
    fn on_missing_field(&self, entity: &str, field: &str) {
        self.events.borrow_mut().push(DiagnosticEvent::MissingField {
            entity: entity.to_string(),
            field: field.to_string(),
        });
    }

    fn on_malformed_value(&self, entity: &str, field: &str, raw: &str) {
        self.events.borrow_mut().push(DiagnosticEvent::MalformedValue {
            entity: entity.to_string(),
            field: field.to_string(),
            raw: raw.to_string(),
        });
    }

    fn on_empty_input(&self, section: &str) {
        self.events.borrow_mut().push(DiagnosticEvent::EmptyInput {
            section: section.to_string(),
        });
    }
}
