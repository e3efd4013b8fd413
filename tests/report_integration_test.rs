//! End-to-end report generation from JSON fixtures.

mod common;

use common::{default_settings, fixture, row_text};
use labstats::diagnostics::{DiagnosticEvent, RecordingSink};
use labstats::io::read_json;
use labstats::record::EntityKind;
use labstats::report::{build_report, generate_report, Cell};
use labstats::testkit::scenario_records;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_services_fixture_detail_rows() {
    let document = read_json(&fixture("services.json")).unwrap();
    let sink = RecordingSink::new();
    let report = generate_report(
        EntityKind::Service,
        &document,
        &default_settings(EntityKind::Service),
        &sink,
    )
    .unwrap();

    let detail = report.section("Detalle de Servicios").unwrap();
    let rows: Vec<Vec<String>> = detail.rows.iter().map(|r| row_text(r)).collect();
    assert_eq!(
        rows,
        vec![
            vec!["Hematología", "48", "54.5%", "30", "1.6", "120", "45.5", "Alta Demanda", "Alta Demanda", "14/03/2022"],
            vec!["Genética Molecular", "6", "6.8%", "6", "1", "0", "320", "Baja Demanda", "Premium", "02/11/2023"],
            vec!["Toxicología", "12", "13.6%", "9", "1.33", "0", "180", "Demanda Media", "Inactivo", "N/A"],
            vec!["Microbiología", "22", "25.0%", "0", "0", "0", "0", "Demanda Media", "Demanda Media", "N/A"],
            vec!["Sin nombre", "0", "0.0%", "0", "0", "0", "0", "Sin Actividad", "Sin Actividad", "N/A"],
        ]
    );

    let malformed: Vec<(String, String)> = sink
        .events()
        .into_iter()
        .filter_map(|event| match event {
            DiagnosticEvent::MalformedValue { entity, raw, .. } => Some((entity, raw)),
            _ => None,
        })
        .collect();
    assert_eq!(malformed, vec![("Toxicología".to_string(), "31/31/2024".to_string())]);
}

#[test]
fn test_services_fixture_distribution_conserves_requests() {
    let document = read_json(&fixture("services.json")).unwrap();
    let report = generate_report(
        EntityKind::Service,
        &document,
        &default_settings(EntityKind::Service),
        &RecordingSink::new(),
    )
    .unwrap();

    let distribution = report.section("Distribución por Demanda").unwrap();
    let total: u64 = distribution
        .rows
        .iter()
        .map(|row| match row[3] {
            Cell::Integer(n) => n,
            _ => 0,
        })
        .sum();
    assert_eq!(total, 88);
    assert_eq!(row_text(&distribution.rows[0])[0], "Demanda Media");
}

#[test]
fn test_patients_fixture_demographics() {
    let document = read_json(&fixture("patients.json")).unwrap();
    let sink = RecordingSink::new();
    let report = generate_report(
        EntityKind::Patient,
        &document,
        &default_settings(EntityKind::Patient),
        &sink,
    )
    .unwrap();

    let ages = report.section("Distribución por Edad").unwrap();
    let labels: Vec<(String, String)> = ages
        .rows
        .iter()
        .map(|r| (row_text(r)[0].clone(), row_text(r)[1].clone()))
        .collect();
    assert_eq!(
        labels,
        vec![
            ("No especificado".to_string(), "2".to_string()),
            ("Niños (0-12)".to_string(), "1".to_string()),
            ("Adultos (30-44)".to_string(), "1".to_string()),
            ("Adultos mayores (60+)".to_string(), "1".to_string()),
        ]
    );

    let genders = report.section("Distribución por Género").unwrap();
    let labels: Vec<String> = genders.rows.iter().map(|r| row_text(r)[0].clone()).collect();
    assert_eq!(labels, vec!["Femenino", "No especificado", "Masculino"]);

    // the bare string element is adapted as a default record
    let detail = report.section("Detalle de Pacientes").unwrap();
    assert_eq!(detail.rows.len(), 5);
    assert_eq!(row_text(&detail.rows[1])[1], "8");
    assert_eq!(row_text(&detail.rows[4])[0], "N/A");
    assert!(sink.events().iter().any(|e| matches!(
        e,
        DiagnosticEvent::MalformedValue { entity, field, .. } if entity == "#5" && field == "record"
    )));
}

#[test]
fn test_scenario_a30_b10_c0() {
    let records = scenario_records(EntityKind::Service);
    let report = build_report(
        EntityKind::Service,
        &records,
        &default_settings(EntityKind::Service),
        &RecordingSink::new(),
    );
    let detail = report.section("Detalle de Servicios").unwrap();

    let shares: Vec<String> = detail.rows.iter().map(|r| row_text(r)[2].clone()).collect();
    assert_eq!(shares, vec!["75.0%", "25.0%", "0.0%"]);
    let tiers: Vec<String> = detail.rows.iter().map(|r| row_text(r)[7].clone()).collect();
    assert_eq!(tiers, vec!["Alta Demanda", "Demanda Media", "Sin Actividad"]);
}

#[test]
fn test_top_n_padding_contract() {
    let records = scenario_records(EntityKind::Exam);

    let padded = build_report(
        EntityKind::Exam,
        &records,
        &default_settings(EntityKind::Exam),
        &RecordingSink::new(),
    );
    let top = padded.section("Top 10 Exámenes").unwrap();
    assert_eq!(top.rows.len(), 10);
    for row in &top.rows[3..] {
        assert_eq!(row_text(row), vec!["N/A", "0", "0%"]);
    }

    let mut settings = default_settings(EntityKind::Exam);
    settings.top.pad = false;
    let unpadded = build_report(EntityKind::Exam, &records, &settings, &RecordingSink::new());
    assert_eq!(unpadded.section("Top 10 Exámenes").unwrap().rows.len(), 3);
}

#[test]
fn test_empty_collection_yields_one_placeholder_row_per_section() {
    let sink = RecordingSink::new();
    let report = generate_report(
        EntityKind::Service,
        &json!([]),
        &default_settings(EntityKind::Service),
        &sink,
    )
    .unwrap();

    for section in &report.sections {
        assert_eq!(section.rows.len(), 1, "{}", section.title);
        assert_eq!(row_text(&section.rows[0])[0], "Sin datos");
    }
    let empty_sections = sink
        .events()
        .iter()
        .filter(|e| matches!(e, DiagnosticEvent::EmptyInput { .. }))
        .count();
    assert_eq!(empty_sections, report.sections.len());
}

#[test]
fn test_null_document_fails_fast() {
    let err = generate_report(
        EntityKind::Doctor,
        &serde_json::Value::Null,
        &default_settings(EntityKind::Doctor),
        &RecordingSink::new(),
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid input: expected an array of records, found null"
    );
}
