//! Entity records: one row of pre-aggregated statistics per business entity.
//!
//! Raw input arrives as heterogeneous JSON-like records. The [`adapter`]
//! resolves every field once, at the boundary, into an [`EntityRecord`] so the
//! rest of the crate works on one concrete type.

pub mod accessor;
pub mod adapter;

pub use accessor::{
    count_or, find_count, find_date, find_flag, find_number, find_text, number_or, parse_date,
    text_or, FieldSource, Lookup,
};
pub use adapter::{Adapter, InputDocument};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Placeholder for absent text values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Business entity a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Service,
    Exam,
    Doctor,
    Patient,
}

impl EntityKind {
    /// Label used when a record has no usable name.
    pub fn identity_fallback(self) -> &'static str {
        match self {
            EntityKind::Service | EntityKind::Exam => "Sin nombre",
            EntityKind::Doctor | EntityKind::Patient => NOT_AVAILABLE,
        }
    }

    pub fn spec(self) -> &'static KindSpec {
        match self {
            EntityKind::Service => &SERVICE_SPEC,
            EntityKind::Exam => &EXAM_SPEC,
            EntityKind::Doctor => &DOCTOR_SPEC,
            EntityKind::Patient => &PATIENT_SPEC,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Service => "services",
            EntityKind::Exam => "exams",
            EntityKind::Doctor => "doctors",
            EntityKind::Patient => "patients",
        };
        write!(f, "{name}")
    }
}

/// How an auxiliary field is interpreted and what it defaults to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AuxKind {
    Number(f64),
    /// Number with no default; absent values stay absent.
    OptionalNumber,
    Count(u64),
    Text(&'static str),
    Flag(bool),
    /// Absent or malformed dates resolve to `None`.
    Date,
}

/// An auxiliary field: canonical name, accepted synonyms, interpretation.
#[derive(Debug, Clone, Copy)]
pub struct AuxField {
    pub name: &'static str,
    pub synonyms: &'static [&'static str],
    pub kind: AuxKind,
}

/// Synonym table for one entity kind.
#[derive(Debug)]
pub struct KindSpec {
    pub identity: &'static [&'static str],
    pub raw_count: &'static [&'static str],
    pub secondary_count: &'static [&'static str],
    pub auxiliary: &'static [AuxField],
}

pub mod fields {
    pub const PRICE: &str = "price";
    pub const EXAM_COUNT: &str = "exam_count";
    pub const CREATED_AT: &str = "created_at";
    pub const ACTIVE: &str = "active";
    pub const CODE: &str = "code";
    pub const SERVICE: &str = "service";
    pub const SPECIALTY: &str = "specialty";
    pub const AGE: &str = "age";
    pub const GENDER: &str = "gender";
    pub const BIRTH_DATE: &str = "birth_date";
}

const PRICE_FIELD: AuxField = AuxField {
    name: fields::PRICE,
    synonyms: &["precio", "price"],
    kind: AuxKind::Number(0.0),
};
const EXAM_COUNT_FIELD: AuxField = AuxField {
    name: fields::EXAM_COUNT,
    synonyms: &["total_examenes", "examenes", "exam_count"],
    kind: AuxKind::Count(0),
};
const CREATED_AT_FIELD: AuxField = AuxField {
    name: fields::CREATED_AT,
    synonyms: &["created_at", "fecha_creacion", "fecha"],
    kind: AuxKind::Date,
};
const ACTIVE_FIELD: AuxField = AuxField {
    name: fields::ACTIVE,
    synonyms: &["activo", "active", "estado"],
    kind: AuxKind::Flag(true),
};

static SERVICE_SPEC: KindSpec = KindSpec {
    identity: &["nombre", "name", "service_name", "servicio"],
    raw_count: &["total_solicitudes", "solicitudes", "count", "total"],
    secondary_count: &["pacientes_unicos", "total_pacientes", "unique_patients"],
    auxiliary: &[PRICE_FIELD, EXAM_COUNT_FIELD, CREATED_AT_FIELD, ACTIVE_FIELD],
};

static EXAM_SPEC: KindSpec = KindSpec {
    identity: &["nombre", "name", "exam_name", "examen"],
    raw_count: &["total_solicitudes", "solicitudes", "count", "total"],
    secondary_count: &["pacientes_unicos", "total_pacientes", "unique_patients"],
    auxiliary: &[
        AuxField {
            name: fields::CODE,
            synonyms: &["codigo", "code"],
            kind: AuxKind::Text(NOT_AVAILABLE),
        },
        AuxField {
            name: fields::SERVICE,
            synonyms: &["servicio", "service_name", "service"],
            kind: AuxKind::Text(NOT_AVAILABLE),
        },
        PRICE_FIELD,
        ACTIVE_FIELD,
    ],
};

static DOCTOR_SPEC: KindSpec = KindSpec {
    identity: &["nombre_completo", "nombre", "name", "doctor_name", "medico"],
    raw_count: &["total_solicitudes", "solicitudes", "count"],
    secondary_count: &["total_pacientes", "pacientes_unicos", "unique_patients"],
    auxiliary: &[
        EXAM_COUNT_FIELD,
        AuxField {
            name: fields::SPECIALTY,
            synonyms: &["especialidad", "specialty"],
            kind: AuxKind::Text(NOT_AVAILABLE),
        },
        CREATED_AT_FIELD,
        ACTIVE_FIELD,
    ],
};

static PATIENT_SPEC: KindSpec = KindSpec {
    identity: &["nombre_completo", "nombre", "name", "paciente"],
    raw_count: &["total_solicitudes", "solicitudes", "count"],
    secondary_count: &["total_examenes", "examenes", "exam_count"],
    auxiliary: &[
        AuxField {
            name: fields::AGE,
            synonyms: &["edad", "age"],
            kind: AuxKind::OptionalNumber,
        },
        AuxField {
            name: fields::GENDER,
            synonyms: &["sexo", "genero", "gender"],
            kind: AuxKind::Text(NOT_AVAILABLE),
        },
        AuxField {
            name: fields::BIRTH_DATE,
            synonyms: &["fecha_nacimiento", "birth_date"],
            kind: AuxKind::Date,
        },
        CREATED_AT_FIELD,
    ],
};

/// Resolved value of an auxiliary field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AuxValue {
    Number(f64),
    Count(u64),
    Text(String),
    Flag(bool),
    Date(Option<NaiveDate>),
}

/// One row of pre-aggregated statistics about a service, exam, doctor or
/// patient. Read-only once adapted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityRecord {
    pub kind: EntityKind,
    pub identity: String,
    pub raw_count: u64,
    pub secondary_count: u64,
    pub auxiliary: BTreeMap<String, AuxValue>,
}

impl EntityRecord {
    pub fn new(kind: EntityKind, identity: impl Into<String>) -> Self {
        Self {
            kind,
            identity: identity.into(),
            raw_count: 0,
            secondary_count: 0,
            auxiliary: BTreeMap::new(),
        }
    }

    pub fn aux(&self, name: &str) -> Option<&AuxValue> {
        self.auxiliary.get(name)
    }

    /// Numeric view of an auxiliary field; counts are widened to `f64`.
    pub fn aux_number(&self, name: &str) -> Option<f64> {
        match self.aux(name)? {
            AuxValue::Number(n) => Some(*n),
            AuxValue::Count(c) => Some(*c as f64),
            _ => None,
        }
    }

    pub fn aux_count(&self, name: &str) -> u64 {
        match self.aux(name) {
            Some(AuxValue::Count(c)) => *c,
            Some(AuxValue::Number(n)) if n.is_finite() && *n >= 0.0 => n.trunc() as u64,
            _ => 0,
        }
    }

    pub fn aux_text(&self, name: &str) -> &str {
        match self.aux(name) {
            Some(AuxValue::Text(t)) => t,
            _ => NOT_AVAILABLE,
        }
    }

    /// Flag value; records without the flag count as set.
    pub fn aux_flag(&self, name: &str) -> bool {
        match self.aux(name) {
            Some(AuxValue::Flag(b)) => *b,
            _ => true,
        }
    }

    pub fn aux_date(&self, name: &str) -> Option<NaiveDate> {
        match self.aux(name) {
            Some(AuxValue::Date(d)) => *d,
            _ => None,
        }
    }

    /// `dd/mm/yyyy`, or `N/A` when the date is absent or was malformed.
    pub fn formatted_date(&self, name: &str) -> String {
        self.aux_date(name)
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    pub fn is_active(&self) -> bool {
        self.aux_flag(fields::ACTIVE)
    }
}
