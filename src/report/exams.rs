//! Exams report.

use super::summary::summary_section;
use super::{detail_section, distribution_section, top_section, Cell, ColumnKind, ReportSettings, Section};
use crate::classify::{Signal, SignalInput, TierClassifier};
use crate::config::ExamsConfig;
use crate::diagnostics::DiagnosticSink;
use crate::metrics::{saturating_sum, total_raw_count};
use crate::record::{fields, EntityRecord, NOT_AVAILABLE};
use std::collections::BTreeSet;

pub fn frequency_classifier(config: &ExamsConfig) -> TierClassifier {
    TierClassifier::new(Signal::RawCount, config.frequency_tiers.clone())
}

pub(crate) fn sections(
    records: &[EntityRecord],
    settings: &ReportSettings,
    sink: &dyn DiagnosticSink,
) -> Vec<Section> {
    let config = &settings.config.exams;
    let frequency = frequency_classifier(config);
    let total = total_raw_count(records);
    let policy = settings.precision;

    let detail = detail_section(
        "Detalle de Exámenes",
        &[
            ("Examen", ColumnKind::Text),
            ("Código", ColumnKind::Text),
            ("Servicio", ColumnKind::Text),
            ("Solicitudes", ColumnKind::Integer),
            ("% del Total", ColumnKind::Percent),
            ("Pacientes", ColumnKind::Integer),
            ("Frecuencia", ColumnKind::Text),
        ],
        records,
        sink,
        |record| {
            let input = SignalInput::new(record, total, &policy);
            vec![
                Cell::text(&record.identity),
                Cell::text(record.aux_text(fields::CODE)),
                Cell::text(record.aux_text(fields::SERVICE)),
                Cell::Integer(record.raw_count),
                Cell::percent(input.metrics.percentage_of_total, policy.percentage),
                Cell::Integer(record.secondary_count),
                Cell::text(frequency.classify(&input)),
            ]
        },
    );

    let top = top_section(
        format!("Top {} Exámenes", settings.top.limit),
        "Examen",
        "Solicitudes",
        records,
        settings,
        sink,
    );

    let distribution = distribution_section(
        "Distribución por Frecuencia",
        "Frecuencia",
        records,
        &frequency,
        &config.grouping,
        settings,
        sink,
    );

    let summary = summary_section("exámenes", records, settings, sink, |builder| {
        let active = records.iter().filter(|r| r.is_active()).count();
        let patients = saturating_sum(records.iter().map(|r| r.secondary_count));
        let services: BTreeSet<&str> = records
            .iter()
            .map(|r| r.aux_text(fields::SERVICE))
            .filter(|s| *s != NOT_AVAILABLE)
            .collect();
        builder
            .metric("Exámenes activos", active)
            .metric("Total de pacientes", patients)
            .metric("Servicios distintos", services.len())
            .average("Exámenes por servicio", records.len() as f64, services.len() as f64)
    });

    vec![detail, top, distribution, summary]
}
