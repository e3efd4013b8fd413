//! Services report.

use super::summary::summary_section;
use super::{detail_section, distribution_section, top_section, Cell, ColumnKind, ReportSettings, Section};
use crate::classify::{Condition, Fallback, Rule, RuleSet, Signal, SignalInput, TierClassifier};
use crate::config::ServicesConfig;
use crate::diagnostics::DiagnosticSink;
use crate::metrics::{percentage, ratio, saturating_sum, total_raw_count};
use crate::record::{fields, EntityRecord};

pub const INACTIVE: &str = "Inactivo";
pub const PREMIUM: &str = "Premium";

pub fn demand_classifier(config: &ServicesConfig) -> TierClassifier {
    TierClassifier::new(Signal::RawCount, config.demand_tiers.clone())
}

/// `Inactivo` over `Premium` over the demand tier.
pub fn status_rules(config: &ServicesConfig) -> RuleSet {
    RuleSet::new(
        vec![
            Rule::new(INACTIVE, Condition::flag_is(fields::ACTIVE, false)),
            Rule::new(
                PREMIUM,
                Condition::AtLeast(Signal::aux(fields::PRICE), config.premium_price),
            ),
        ],
        Fallback::Tiers(demand_classifier(config)),
    )
}

pub(crate) fn sections(
    records: &[EntityRecord],
    settings: &ReportSettings,
    sink: &dyn DiagnosticSink,
) -> Vec<Section> {
    let config = &settings.config.services;
    let demand = demand_classifier(config);
    let status = status_rules(config);
    let total = total_raw_count(records);
    let policy = settings.precision;

    let detail = detail_section(
        "Detalle de Servicios",
        &[
            ("Servicio", ColumnKind::Text),
            ("Solicitudes", ColumnKind::Integer),
            ("% del Total", ColumnKind::Percent),
            ("Pacientes Únicos", ColumnKind::Integer),
            ("Solicitudes por Paciente", ColumnKind::Number),
            ("Exámenes", ColumnKind::Integer),
            ("Precio", ColumnKind::Number),
            ("Nivel de Demanda", ColumnKind::Text),
            ("Estado", ColumnKind::Text),
            ("Fecha de Creación", ColumnKind::Text),
        ],
        records,
        sink,
        |record| {
            let input = SignalInput::new(record, total, &policy);
            vec![
                Cell::text(&record.identity),
                Cell::Integer(record.raw_count),
                Cell::percent(input.metrics.percentage_of_total, policy.percentage),
                Cell::Integer(record.secondary_count),
                Cell::Number(input.metrics.ratio),
                Cell::Integer(record.aux_count(fields::EXAM_COUNT)),
                Cell::Number(record.aux_number(fields::PRICE).unwrap_or(0.0)),
                Cell::text(demand.classify(&input)),
                Cell::text(status.classify(&input)),
                Cell::text(record.formatted_date(fields::CREATED_AT)),
            ]
        },
    );

    let top = top_section(
        format!("Top {} Servicios", settings.top.limit),
        "Servicio",
        "Solicitudes",
        records,
        settings,
        sink,
    );

    let distribution = distribution_section(
        "Distribución por Demanda",
        "Nivel de Demanda",
        records,
        &demand,
        &config.grouping,
        settings,
        sink,
    );

    let summary = summary_section("servicios", records, settings, sink, |builder| {
        let active = records.iter().filter(|r| r.is_active()).count();
        let patients = saturating_sum(records.iter().map(|r| r.secondary_count));
        let premium = records
            .iter()
            .filter(|r| r.aux_number(fields::PRICE).unwrap_or(0.0) >= config.premium_price)
            .count();
        builder
            .metric("Servicios activos", active)
            .metric("Total de pacientes únicos", patients)
            .average("Solicitudes por paciente", total as f64, patients as f64)
            .metric("Servicios premium", premium)
            .metric(
                "% de servicios activos",
                Cell::percent(
                    percentage(active as f64, records.len() as f64, policy.percentage),
                    policy.percentage,
                ),
            )
            .metric(
                "Precio promedio",
                ratio(
                    records
                        .iter()
                        .map(|r| r.aux_number(fields::PRICE).unwrap_or(0.0))
                        .sum(),
                    records.len() as f64,
                    policy.ratio,
                ),
            )
    });

    vec![detail, top, distribution, summary]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LabstatsConfig;
    use crate::diagnostics::NoopSink;
    use crate::metrics::PrecisionPolicy;
    use crate::record::EntityKind;
    use crate::testkit::{reference_date, scenario_records, RecordBuilder};
    use pretty_assertions::assert_eq;

    fn settings() -> ReportSettings {
        ReportSettings::from_config(LabstatsConfig::default(), EntityKind::Service, reference_date())
    }

    fn column(section: &Section, index: usize) -> Vec<String> {
        section.rows.iter().map(|r| r[index].render()).collect()
    }

    #[test]
    fn test_scenario_shares_and_tiers() {
        let records = scenario_records(EntityKind::Service);
        let sections = sections(&records, &settings(), &NoopSink);
        let detail = &sections[0];

        assert_eq!(column(detail, 2), vec!["75.0%", "25.0%", "0.0%"]);
        assert_eq!(
            column(detail, 7),
            vec!["Alta Demanda", "Demanda Media", "Sin Actividad"]
        );
    }

    #[test]
    fn test_status_priority() {
        let config = ServicesConfig::default();
        let rules = status_rules(&config);
        let policy = PrecisionPolicy::default();
        let status_of = |record: &EntityRecord| {
            rules.classify(&SignalInput::new(record, 100, &policy)).to_string()
        };

        let premium = RecordBuilder::new(EntityKind::Service, "Genética")
            .raw(2)
            .number(fields::PRICE, 320.0)
            .build();
        let inactive_premium = RecordBuilder::new(EntityKind::Service, "Toxicología")
            .raw(40)
            .number(fields::PRICE, 500.0)
            .flag(fields::ACTIVE, false)
            .build();
        let busy = RecordBuilder::new(EntityKind::Service, "Hematología")
            .raw(40)
            .number(fields::PRICE, 20.0)
            .build();

        assert_eq!(status_of(&premium), "Premium");
        assert_eq!(status_of(&inactive_premium), "Inactivo");
        assert_eq!(status_of(&busy), "Alta Demanda");
    }

    #[test]
    fn test_section_layout() {
        let records = scenario_records(EntityKind::Service);
        let sections = sections(&records, &settings(), &NoopSink);
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Detalle de Servicios",
                "Top 10 Servicios",
                "Distribución por Demanda",
                "Resumen"
            ]
        );
        assert_eq!(sections[1].rows.len(), 10);
        assert_eq!(
            column(&sections[2], 0),
            vec!["Alta Demanda", "Demanda Media", "Sin Actividad"]
        );
    }

    #[test]
    fn test_missing_created_at_renders_placeholder() {
        let records = vec![RecordBuilder::new(EntityKind::Service, "Orina").raw(3).build()];
        let sections = sections(&records, &settings(), &NoopSink);
        assert_eq!(column(&sections[0], 9), vec!["N/A"]);
    }
}
