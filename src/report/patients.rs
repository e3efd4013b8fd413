//! Patients report: demographics and visit frequency.

use super::summary::summary_section;
use super::{detail_section, distribution_section, top_section, Cell, ColumnKind, ReportSettings, Section};
use crate::aggregate::{gender_key, RangeKey};
use crate::classify::{Signal, SignalInput, TierClassifier};
use crate::config::PatientsConfig;
use crate::diagnostics::DiagnosticSink;
use crate::metrics::{ratio, saturating_sum, total_raw_count};
use crate::record::{fields, EntityRecord};

pub fn frequency_classifier(config: &PatientsConfig) -> TierClassifier {
    TierClassifier::new(Signal::RawCount, config.frequency_tiers.clone())
}

fn age_of(record: &EntityRecord) -> Option<u64> {
    record
        .aux_number(fields::AGE)
        .filter(|age| age.is_finite() && *age >= 0.0)
        .map(|age| age.trunc() as u64)
}

pub(crate) fn sections(
    records: &[EntityRecord],
    settings: &ReportSettings,
    sink: &dyn DiagnosticSink,
) -> Vec<Section> {
    let config = &settings.config.patients;
    let frequency = frequency_classifier(config);
    let gender = gender_key(fields::GENDER);
    let total = total_raw_count(records);
    let policy = settings.precision;

    let detail = detail_section(
        "Detalle de Pacientes",
        &[
            ("Paciente", ColumnKind::Text),
            ("Edad", ColumnKind::Integer),
            ("Género", ColumnKind::Text),
            ("Solicitudes", ColumnKind::Integer),
            ("Exámenes", ColumnKind::Integer),
            ("Exámenes por Solicitud", ColumnKind::Number),
            ("Frecuencia", ColumnKind::Text),
            ("Fecha de Registro", ColumnKind::Text),
        ],
        records,
        sink,
        |record| {
            let input = SignalInput::new(record, total, &policy);
            vec![
                Cell::text(&record.identity),
                Cell::optional_integer(age_of(record)),
                Cell::text(gender.label_for(record.aux_text(fields::GENDER))),
                Cell::Integer(record.raw_count),
                Cell::Integer(record.secondary_count),
                Cell::Number(ratio(
                    record.secondary_count as f64,
                    record.raw_count as f64,
                    policy.ratio,
                )),
                Cell::text(frequency.classify(&input)),
                Cell::text(record.formatted_date(fields::CREATED_AT)),
            ]
        },
    );

    let ages = distribution_section(
        "Distribución por Edad",
        "Grupo de Edad",
        records,
        &RangeKey {
            field: fields::AGE,
            table: &config.age_ranges,
        },
        &config.grouping,
        settings,
        sink,
    );

    let genders = distribution_section(
        "Distribución por Género",
        "Género",
        records,
        &gender,
        &config.grouping,
        settings,
        sink,
    );

    let frequent = top_section(
        format!("Top {} Pacientes Frecuentes", settings.top.limit),
        "Paciente",
        "Solicitudes",
        records,
        settings,
        sink,
    );

    let summary = summary_section("pacientes", records, settings, sink, |builder| {
        let exams = saturating_sum(records.iter().map(|r| r.secondary_count));
        let known_ages: Vec<u64> = records.iter().filter_map(age_of).collect();
        builder
            .metric("Total de exámenes", exams)
            .average("Exámenes por paciente", exams as f64, records.len() as f64)
            .average(
                "Edad promedio",
                saturating_sum(known_ages.iter().copied()) as f64,
                known_ages.len() as f64,
            )
            .metric("Pacientes sin edad registrada", records.len() - known_ages.len())
    });

    vec![detail, ages, genders, frequent, summary]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LabstatsConfig;
    use crate::diagnostics::NoopSink;
    use crate::record::EntityKind;
    use crate::testkit::{reference_date, RecordBuilder};
    use pretty_assertions::assert_eq;

    fn settings() -> ReportSettings {
        ReportSettings::from_config(LabstatsConfig::default(), EntityKind::Patient, reference_date())
    }

    fn patient(name: &str, age: Option<f64>, gender: &str, requests: u64) -> EntityRecord {
        let mut builder = RecordBuilder::new(EntityKind::Patient, name)
            .raw(requests)
            .secondary(requests * 2)
            .text(fields::GENDER, gender);
        if let Some(age) = age {
            builder = builder.number(fields::AGE, age);
        }
        builder.build()
    }

    fn labels(section: &Section) -> Vec<(String, String)> {
        section
            .rows
            .iter()
            .map(|r| (r[0].render(), r[1].render()))
            .collect()
    }

    #[test]
    fn test_age_distribution_keeps_unknown_ages() {
        let records = vec![
            patient("Ana", Some(34.0), "F", 4),
            patient("Luis", Some(8.0), "M", 1),
            patient("Rosa", Some(41.0), "femenino", 12),
            patient("Sin edad", None, "", 2),
        ];
        let sections = sections(&records, &settings(), &NoopSink);

        assert_eq!(
            labels(&sections[1]),
            vec![
                ("Adultos (30-44)".to_string(), "2".to_string()),
                ("Niños (0-12)".to_string(), "1".to_string()),
                ("No especificado".to_string(), "1".to_string()),
            ]
        );
        assert_eq!(
            labels(&sections[2]),
            vec![
                ("Femenino".to_string(), "2".to_string()),
                ("Masculino".to_string(), "1".to_string()),
                ("No especificado".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_detail_row() {
        let records = vec![patient("Ana", Some(34.6), "F", 4)];
        let sections = sections(&records, &settings(), &NoopSink);
        assert_eq!(
            sections[0].rows[0].iter().map(Cell::render).collect::<Vec<_>>(),
            vec!["Ana", "34", "Femenino", "4", "8", "2", "Paciente Regular", "N/A"]
        );
    }

    #[test]
    fn test_frequent_patients_unpadded() {
        let records = vec![
            patient("Ana", Some(34.0), "F", 4),
            patient("Rosa", Some(41.0), "F", 12),
        ];
        let sections = sections(&records, &settings(), &NoopSink);
        let top = &sections[3];
        assert_eq!(top.rows.len(), 2);
        assert_eq!(top.rows[0][0], Cell::text("Rosa"));
    }
}
