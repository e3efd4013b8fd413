//! Boundary adapter from raw records to [`EntityRecord`].
//!
//! This is the only place that sniffs record shapes. Missing fields resolve
//! to their documented defaults and are reported to the diagnostic sink; a
//! structurally invalid document is the one condition that fails.

use super::accessor::{find_count, find_date, find_flag, find_number, find_text, FieldSource, Lookup};
use super::{fields, AuxKind, AuxValue, EntityKind, EntityRecord};
use crate::diagnostics::DiagnosticSink;
use crate::errors::{Error, Result};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

/// Key under which a wrapped document carries its records.
const DATA_KEY: &str = "data";

/// Validated shape of an input document.
#[derive(Debug)]
pub enum InputDocument<'a> {
    Records(&'a [Value]),
}

impl<'a> InputDocument<'a> {
    /// Accepts a bare array or an object with a `data` array.
    pub fn from_value(value: &'a Value) -> Result<Self> {
        match value {
            Value::Array(items) => Ok(Self::Records(items)),
            Value::Object(map) => match map.get(DATA_KEY) {
                Some(Value::Array(items)) => Ok(Self::Records(items)),
                Some(other) => Err(Error::invalid_input(format!(
                    "'{DATA_KEY}' must be an array of records, found {}",
                    describe(other)
                ))),
                None => Err(Error::invalid_input(format!(
                    "expected an array of records or an object with a '{DATA_KEY}' array"
                ))),
            },
            other => Err(Error::invalid_input(format!(
                "expected an array of records, found {}",
                describe(other)
            ))),
        }
    }

    pub fn records(&self) -> &'a [Value] {
        match self {
            Self::Records(items) => items,
        }
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Adapts raw records of one entity kind.
pub struct Adapter<'a> {
    kind: EntityKind,
    reference_date: NaiveDate,
    sink: &'a dyn DiagnosticSink,
}

impl<'a> Adapter<'a> {
    pub fn new(kind: EntityKind, reference_date: NaiveDate, sink: &'a dyn DiagnosticSink) -> Self {
        Self {
            kind,
            reference_date,
            sink,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Adapt every record of a JSON document.
    pub fn adapt_document(&self, document: &Value) -> Result<Vec<EntityRecord>> {
        let records = InputDocument::from_value(document)?.records();
        Ok(records
            .iter()
            .enumerate()
            .map(|(index, value)| self.adapt_value(index, value))
            .collect())
    }

    /// Adapt object-style records through their serde representation.
    pub fn adapt_all<T: Serialize>(&self, items: &[T]) -> Result<Vec<EntityRecord>> {
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let value = serde_json::to_value(item)?;
                Ok(self.adapt_value(index, &value))
            })
            .collect()
    }

    /// Adapt one array element. Elements that are not objects become
    /// all-default records and are reported as malformed.
    pub fn adapt_value(&self, index: usize, value: &Value) -> EntityRecord {
        match value {
            Value::Object(map) => self.adapt(map),
            other => {
                self.sink.on_malformed_value(
                    &format!("#{}", index + 1),
                    "record",
                    &other.to_string(),
                );
                self.adapt(&Map::new())
            }
        }
    }

    /// Adapt one mapping-style record.
    pub fn adapt<S: FieldSource + ?Sized>(&self, source: &S) -> EntityRecord {
        let spec = self.kind.spec();
        let fallback = self.kind.identity_fallback();

        let identity = match find_text(source, spec.identity) {
            Lookup::Found(name) => name,
            Lookup::Missing => {
                self.sink.on_missing_field(fallback, spec.identity[0]);
                fallback.to_string()
            }
            Lookup::Malformed(raw) => {
                self.sink.on_malformed_value(fallback, spec.identity[0], &raw);
                fallback.to_string()
            }
        };

        let mut record = EntityRecord::new(self.kind, identity);
        record.raw_count = self.count(source, &record.identity, spec.raw_count);
        record.secondary_count = self.count(source, &record.identity, spec.secondary_count);

        for field in spec.auxiliary {
            if let Some(value) = self.aux_value(source, &record.identity, field.synonyms, field.kind)
            {
                record.auxiliary.insert(field.name.to_string(), value);
            }
        }

        if self.kind == EntityKind::Patient {
            self.derive_age(&mut record);
        }
        record
    }

    fn count<S: FieldSource + ?Sized>(&self, source: &S, entity: &str, keys: &[&str]) -> u64 {
        self.resolve(entity, keys, find_count(source, keys)).unwrap_or(0)
    }

    fn resolve<T>(&self, entity: &str, keys: &[&str], lookup: Lookup<T>) -> Option<T> {
        let field = keys.first().copied().unwrap_or_default();
        match lookup {
            Lookup::Found(value) => Some(value),
            Lookup::Missing => {
                self.sink.on_missing_field(entity, field);
                None
            }
            Lookup::Malformed(raw) => {
                self.sink.on_malformed_value(entity, field, &raw);
                None
            }
        }
    }

    fn aux_value<S: FieldSource + ?Sized>(
        &self,
        source: &S,
        entity: &str,
        keys: &[&str],
        kind: AuxKind,
    ) -> Option<AuxValue> {
        match kind {
            AuxKind::Number(default) => Some(AuxValue::Number(
                self.resolve(entity, keys, find_number(source, keys))
                    .unwrap_or(default),
            )),
            AuxKind::OptionalNumber => self
                .resolve(entity, keys, non_negative(find_number(source, keys)))
                .map(AuxValue::Number),
            AuxKind::Count(default) => Some(AuxValue::Count(
                self.resolve(entity, keys, find_count(source, keys))
                    .unwrap_or(default),
            )),
            AuxKind::Text(default) => Some(AuxValue::Text(
                self.resolve(entity, keys, find_text(source, keys))
                    .unwrap_or_else(|| default.to_string()),
            )),
            AuxKind::Flag(default) => Some(AuxValue::Flag(
                self.resolve(entity, keys, find_flag(source, keys))
                    .unwrap_or(default),
            )),
            AuxKind::Date => Some(AuxValue::Date(
                self.resolve(entity, keys, find_date(source, keys)),
            )),
        }
    }

    /// Fill a missing age from the birth date at the reference date.
    fn derive_age(&self, record: &mut EntityRecord) {
        if record.aux_number(fields::AGE).is_some() {
            return;
        }
        let age = record
            .aux_date(fields::BIRTH_DATE)
            .and_then(|birth| self.reference_date.years_since(birth));
        if let Some(years) = age {
            record
                .auxiliary
                .insert(fields::AGE.to_string(), AuxValue::Number(f64::from(years)));
        }
    }
}

fn non_negative(lookup: Lookup<f64>) -> Lookup<f64> {
    match lookup {
        Lookup::Found(value) if value < 0.0 => Lookup::Malformed(value.to_string()),
        other => other,
    }
}
