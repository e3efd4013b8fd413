//! Synonym-aware field lookup over mapping-style and object-style records.
//!
//! A field is searched under an ordered list of key synonyms. The first key
//! holding a usable value wins; `null`, empty strings and values that fail to
//! convert are skipped. Lookups never fail: the caller sees
//! [`Lookup::Missing`] or [`Lookup::Malformed`] and picks a default.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Anything that can hand out JSON values by key.
pub trait FieldSource {
    fn lookup(&self, key: &str) -> Option<&Value>;
}

impl FieldSource for Map<String, Value> {
    fn lookup(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl FieldSource for Value {
    fn lookup(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }
}

impl<S: BuildHasher> FieldSource for HashMap<String, Value, S> {
    fn lookup(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl FieldSource for BTreeMap<String, Value> {
    fn lookup(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl<T: FieldSource + ?Sized> FieldSource for &T {
    fn lookup(&self, key: &str) -> Option<&Value> {
        (**self).lookup(key)
    }
}

/// Result of a synonym lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    /// No synonym held a non-empty value.
    Missing,
    /// At least one synonym held a value that did not convert; carries the
    /// first offending raw value.
    Malformed(String),
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn unwrap_or(self, default: T) -> T {
        self.found().unwrap_or(default)
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn raw_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn find_with<S, T>(source: &S, keys: &[&str], convert: impl Fn(&Value) -> Option<T>) -> Lookup<T>
where
    S: FieldSource + ?Sized,
{
    let mut malformed = None;
    for key in keys {
        let Some(value) = source.lookup(key) else {
            continue;
        };
        if is_blank(value) {
            continue;
        }
        match convert(value) {
            Some(converted) => return Lookup::Found(converted),
            None => {
                malformed.get_or_insert_with(|| raw_text(value));
            }
        }
    }
    malformed.map_or(Lookup::Missing, Lookup::Malformed)
}

pub fn find_text<S: FieldSource + ?Sized>(source: &S, keys: &[&str]) -> Lookup<String> {
    find_with(source, keys, |value| match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Non-negative integer counts. Floats truncate toward zero.
pub fn find_count<S: FieldSource + ?Sized>(source: &S, keys: &[&str]) -> Lookup<u64> {
    find_with(source, keys, |value| match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(float_to_count)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| parse_decimal(s).and_then(float_to_count))
        }
        _ => None,
    })
}

pub fn find_number<S: FieldSource + ?Sized>(source: &S, keys: &[&str]) -> Lookup<f64> {
    find_with(source, keys, |value| match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => parse_decimal(s.trim()),
        _ => None,
    })
}

pub fn find_flag<S: FieldSource + ?Sized>(source: &S, keys: &[&str]) -> Lookup<bool> {
    find_with(source, keys, |value| match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => parse_flag(s),
        _ => None,
    })
}

pub fn find_date<S: FieldSource + ?Sized>(source: &S, keys: &[&str]) -> Lookup<NaiveDate> {
    find_with(source, keys, |value| value.as_str().and_then(parse_date))
}

/// Text under the first usable synonym, or `default`.
pub fn text_or<S: FieldSource + ?Sized>(source: &S, keys: &[&str], default: &str) -> String {
    find_text(source, keys)
        .found()
        .unwrap_or_else(|| default.to_string())
}

/// Count under the first usable synonym, or `default`.
pub fn count_or<S: FieldSource + ?Sized>(source: &S, keys: &[&str], default: u64) -> u64 {
    find_count(source, keys).unwrap_or(default)
}

/// Number under the first usable synonym, or `default`.
pub fn number_or<S: FieldSource + ?Sized>(source: &S, keys: &[&str], default: f64) -> f64 {
    find_number(source, keys).unwrap_or(default)
}

fn float_to_count(value: f64) -> Option<u64> {
    (value.is_finite() && value >= 0.0).then(|| value.trunc() as u64)
}

/// Accepts `12.5` and `12,5`.
fn parse_decimal(s: &str) -> Option<f64> {
    let parsed = s
        .parse::<f64>()
        .ok()
        .or_else(|| s.replacen(',', ".", 1).parse::<f64>().ok())?;
    parsed.is_finite().then_some(parsed)
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "si" | "sí" | "yes" | "activo" | "active" => Some(true),
        "0" | "false" | "no" | "inactivo" | "inactive" => Some(false),
        _ => None,
    }
}

/// Parse the date layouts the aggregation layer emits.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .or_else(|| NaiveDate::parse_from_str(s, "%d/%m/%Y").ok())
}
