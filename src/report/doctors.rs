//! Doctors report. Doctors carry two independent tiers: activity on the
//! request count and efficiency on exams per request.

use super::summary::summary_section;
use super::{detail_section, distribution_section, top_section, Cell, ColumnKind, ReportSettings, Section};
use crate::classify::{Signal, SignalInput, TierClassifier};
use crate::config::DoctorsConfig;
use crate::diagnostics::DiagnosticSink;
use crate::metrics::{saturating_sum, total_raw_count};
use crate::record::{fields, EntityRecord, NOT_AVAILABLE};
use std::collections::BTreeSet;

pub fn activity_classifier(config: &DoctorsConfig) -> TierClassifier {
    TierClassifier::new(Signal::RawCount, config.activity_tiers.clone())
}

pub fn efficiency_classifier(config: &DoctorsConfig) -> TierClassifier {
    TierClassifier::new(
        Signal::per_request(fields::EXAM_COUNT),
        config.efficiency_tiers.clone(),
    )
}

pub(crate) fn sections(
    records: &[EntityRecord],
    settings: &ReportSettings,
    sink: &dyn DiagnosticSink,
) -> Vec<Section> {
    let config = &settings.config.doctors;
    let activity = activity_classifier(config);
    let efficiency = efficiency_classifier(config);
    let exams_per_request = Signal::per_request(fields::EXAM_COUNT);
    let total = total_raw_count(records);
    let policy = settings.precision;

    let detail = detail_section(
        "Detalle de Médicos",
        &[
            ("Médico", ColumnKind::Text),
            ("Especialidad", ColumnKind::Text),
            ("Solicitudes", ColumnKind::Integer),
            ("% del Total", ColumnKind::Percent),
            ("Pacientes", ColumnKind::Integer),
            ("Exámenes", ColumnKind::Integer),
            ("Solicitudes por Paciente", ColumnKind::Number),
            ("Exámenes por Solicitud", ColumnKind::Number),
            ("Nivel de Actividad", ColumnKind::Text),
            ("Eficiencia", ColumnKind::Text),
        ],
        records,
        sink,
        |record| {
            let input = SignalInput::new(record, total, &policy);
            vec![
                Cell::text(&record.identity),
                Cell::text(record.aux_text(fields::SPECIALTY)),
                Cell::Integer(record.raw_count),
                Cell::percent(input.metrics.percentage_of_total, policy.percentage),
                Cell::Integer(record.secondary_count),
                Cell::Integer(record.aux_count(fields::EXAM_COUNT)),
                Cell::Number(input.metrics.ratio),
                Cell::Number(exams_per_request.value(&input)),
                Cell::text(activity.classify(&input)),
                Cell::text(efficiency.classify(&input)),
            ]
        },
    );

    let top = top_section(
        format!("Top {} Médicos", settings.top.limit),
        "Médico",
        "Solicitudes",
        records,
        settings,
        sink,
    );

    let distribution = distribution_section(
        "Distribución por Actividad",
        "Nivel de Actividad",
        records,
        &activity,
        &config.grouping,
        settings,
        sink,
    );

    let summary = summary_section("médicos", records, settings, sink, |builder| {
        let active = records.iter().filter(|r| r.is_active()).count();
        let exams = saturating_sum(records.iter().map(|r| r.aux_count(fields::EXAM_COUNT)));
        let specialties: BTreeSet<&str> = records
            .iter()
            .map(|r| r.aux_text(fields::SPECIALTY))
            .filter(|s| *s != NOT_AVAILABLE)
            .collect();
        builder
            .metric("Médicos activos", active)
            .metric("Total de exámenes", exams)
            .average("Exámenes por solicitud", exams as f64, total as f64)
            .metric("Especialidades", specialties.len())
    });

    vec![detail, top, distribution, summary]
}
