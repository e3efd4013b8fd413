//! Report assembly.
//!
//! A report turns one collection of entity records into an ordered list of
//! sections (detail listing, Top-N, distributions, summary). Each report kind
//! lives in its own module and shares the section builders below.
//!
//! Report generation is synchronous and holds no state between calls.

pub mod doctors;
pub mod exams;
pub mod patients;
pub mod services;
pub mod summary;
pub mod table;

pub use table::{columns, Cell, Column, ColumnKind, Row, Section, NO_DATA};

use crate::aggregate::{group_records, BucketKey, GroupingOptions};
use crate::config::LabstatsConfig;
use crate::diagnostics::DiagnosticSink;
use crate::errors::Result;
use crate::metrics::{percentage, total_raw_count, PrecisionPolicy};
use crate::observability::{set_phase, set_section, ReportPhase};
use crate::record::{Adapter, EntityKind, EntityRecord};
use crate::select::{Slot, TopN};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

/// A rendered-ready report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub kind: EntityKind,
    pub title: String,
    pub generated_on: NaiveDate,
    pub sections: Vec<Section>,
}

impl Report {
    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.title == title)
    }
}

/// Everything a report run needs besides its records.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    pub config: LabstatsConfig,
    pub precision: PrecisionPolicy,
    pub top: TopN,
    /// Date used for derived ages and stamped on the report.
    pub reference_date: NaiveDate,
}

impl ReportSettings {
    /// Settings for `kind` as the config describes them.
    pub fn from_config(config: LabstatsConfig, kind: EntityKind, reference_date: NaiveDate) -> Self {
        let precision = config.precision_for(kind);
        let (limit, pad) = config.top_for(kind);
        Self {
            config,
            precision,
            top: TopN::new(limit, pad),
            reference_date,
        }
    }
}

/// Adapt a JSON document and build the report for `kind`.
///
/// Fails only when the document is not a record collection.
pub fn generate_report(
    kind: EntityKind,
    document: &Value,
    settings: &ReportSettings,
    sink: &dyn DiagnosticSink,
) -> Result<Report> {
    let records = {
        let _phase = set_phase(ReportPhase::Normalizing);
        Adapter::new(kind, settings.reference_date, sink).adapt_document(document)?
    };
    Ok(build_report(kind, &records, settings, sink))
}

/// Build the report for already adapted records.
pub fn build_report(
    kind: EntityKind,
    records: &[EntityRecord],
    settings: &ReportSettings,
    sink: &dyn DiagnosticSink,
) -> Report {
    let _phase = set_phase(ReportPhase::Classifying);
    log::debug!("Building {} report from {} records", kind, records.len());

    let (title, sections) = match kind {
        EntityKind::Service => ("Reporte de Servicios", services::sections(records, settings, sink)),
        EntityKind::Exam => ("Reporte de Exámenes", exams::sections(records, settings, sink)),
        EntityKind::Doctor => ("Reporte de Médicos", doctors::sections(records, settings, sink)),
        EntityKind::Patient => ("Reporte de Pacientes", patients::sections(records, settings, sink)),
    };

    Report {
        kind,
        title: title.to_string(),
        generated_on: settings.reference_date,
        sections,
    }
}

/// Top-N section ranked by raw count: name, count, share of total.
///
/// An empty collection yields one `Sin datos` row; padding only applies
/// when there is at least one record.
pub(crate) fn top_section(
    title: String,
    name_header: &str,
    count_header: &str,
    records: &[EntityRecord],
    settings: &ReportSettings,
    sink: &dyn DiagnosticSink,
) -> Section {
    let _section = set_section(&title);
    let mut section = Section::new(
        title,
        columns(&[
            (name_header, ColumnKind::Text),
            (count_header, ColumnKind::Integer),
            ("% del Total", ColumnKind::Percent),
        ]),
    );
    if records.is_empty() {
        return section.finish(sink);
    }

    let total = total_raw_count(records) as f64;
    let precision = settings.precision.percentage;
    for slot in settings.top.select(records, |r| r.raw_count as f64) {
        let row = match slot {
            Slot::Entry(record) => vec![
                Cell::text(&record.identity),
                Cell::Integer(record.raw_count),
                Cell::percent(percentage(record.raw_count as f64, total, precision), precision),
            ],
            Slot::Placeholder => section.placeholder_row(),
        };
        section.push(row);
    }
    section.finish(sink)
}

/// Bucket distribution section: label, entity count, share of entities,
/// summed raw count, average raw count, notable entities.
pub(crate) fn distribution_section<K: BucketKey + ?Sized>(
    title: &str,
    label_header: &str,
    records: &[EntityRecord],
    key: &K,
    grouping: &GroupingOptions,
    settings: &ReportSettings,
    sink: &dyn DiagnosticSink,
) -> Section {
    let _section = set_section(title);
    let mut section = Section::new(
        title,
        columns(&[
            (label_header, ColumnKind::Text),
            ("Cantidad", ColumnKind::Integer),
            ("% del Total", ColumnKind::Percent),
            ("Solicitudes", ColumnKind::Integer),
            ("Promedio", ColumnKind::Number),
            ("Destacados", ColumnKind::Text),
        ]),
    );

    let precision = settings.precision.percentage;
    let entities = records.len() as f64;
    for bucket in group_records(records, key, grouping, &settings.precision) {
        section.push(vec![
            Cell::text(&bucket.label),
            Cell::from(bucket.count),
            Cell::percent(percentage(bucket.count as f64, entities, precision), precision),
            Cell::Integer(bucket.total_raw_count),
            Cell::Number(bucket.average_raw_count),
            Cell::text(bucket.notable_summary()),
        ]);
    }
    section.finish(sink)
}

/// Detail listing: one row per record, in input order.
pub(crate) fn detail_section<F>(
    title: &str,
    defs: &[(&str, ColumnKind)],
    records: &[EntityRecord],
    sink: &dyn DiagnosticSink,
    row: F,
) -> Section
where
    F: Fn(&EntityRecord) -> Row,
{
    let _section = set_section(title);
    let mut section = Section::new(title, columns(defs));
    for record in records {
        section.push(row(record));
    }
    section.finish(sink)
}
