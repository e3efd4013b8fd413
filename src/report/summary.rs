//! Summary sections: one metric per row.

use super::{columns, Cell, ColumnKind, ReportSettings, Section};
use crate::diagnostics::DiagnosticSink;
use crate::metrics::{percentage, ratio, total_raw_count};
use crate::observability::set_section;
use crate::record::EntityRecord;

pub(crate) const TITLE: &str = "Resumen";

/// Accumulates `(metric, value)` rows.
pub(crate) struct SummaryBuilder<'a> {
    section: Section,
    settings: &'a ReportSettings,
}

impl<'a> SummaryBuilder<'a> {
    pub(crate) fn new(settings: &'a ReportSettings) -> Self {
        Self {
            section: Section::new(
                TITLE,
                // holds counts next to formatted percentages
                columns(&[("Métrica", ColumnKind::Text), ("Valor", ColumnKind::Text)]),
            ),
            settings,
        }
    }

    pub(crate) fn metric(mut self, label: &str, value: impl Into<Cell>) -> Self {
        self.section.push(vec![Cell::text(label), value.into()]);
        self
    }

    pub(crate) fn average(self, label: &str, numerator: f64, denominator: f64) -> Self {
        let value = ratio(numerator, denominator, self.settings.precision.ratio);
        self.metric(label, value)
    }

    pub(crate) fn share(self, label: &str, part: usize, whole: usize) -> Self {
        let precision = self.settings.precision.percentage;
        let value = percentage(part as f64, whole as f64, precision);
        self.metric(label, Cell::percent(value, precision))
    }

    pub(crate) fn finish(self, sink: &dyn DiagnosticSink) -> Section {
        self.section.finish(sink)
    }
}

/// Totals shared by every report, followed by `extra` rows.
///
/// An empty collection yields the single `Sin datos` row.
pub(crate) fn summary_section<F>(
    entity_label: &str,
    records: &[EntityRecord],
    settings: &ReportSettings,
    sink: &dyn DiagnosticSink,
    extra: F,
) -> Section
where
    F: FnOnce(SummaryBuilder<'_>) -> SummaryBuilder<'_>,
{
    let _section = set_section(TITLE);
    let builder = SummaryBuilder::new(settings);
    if records.is_empty() {
        return builder.finish(sink);
    }

    let total = total_raw_count(records);
    let with_activity = records.iter().filter(|r| r.raw_count > 0).count();
    let builder = builder
        .metric(&format!("Total de {entity_label}"), records.len())
        .metric("Total de solicitudes", total)
        .average(
            &format!("Promedio de solicitudes por {}", singular(entity_label)),
            total as f64,
            records.len() as f64,
        )
        .share(
            &format!("{} con actividad", capitalize(entity_label)),
            with_activity,
            records.len(),
        );
    extra(builder).finish(sink)
}

fn singular(plural: &str) -> &str {
    match plural {
        "servicios" => "servicio",
        "exámenes" => "examen",
        "médicos" => "médico",
        "pacientes" => "paciente",
        other => other,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
