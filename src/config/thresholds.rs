//! Default classification tables for each report.
//!
//! Every table here can be overridden from `.labstats.toml`. The defaults
//! are built from literal pairs that are known to be valid, so construction
//! cannot fail.

use crate::aggregate::{Range, RangeTable};
use crate::classify::{Tier, TierTable, TierTableConfig};

fn table(tiers: &[(f64, &str)], default_label: &str) -> TierTable {
    // Literal tables are already descending with unique thresholds.
    let config = TierTableConfig {
        tiers: tiers
            .iter()
            .map(|&(threshold, label)| Tier {
                threshold,
                label: label.to_string(),
            })
            .collect(),
        default_label: default_label.to_string(),
    };
    TierTable::try_from(config).unwrap_or_else(|_| TierTable::empty(default_label))
}

/// Service demand by request count.
pub fn demand_tiers() -> TierTable {
    table(
        &[
            (30.0, "Alta Demanda"),
            (10.0, "Demanda Media"),
            (1.0, "Baja Demanda"),
        ],
        "Sin Actividad",
    )
}

/// Services at or above this price are `Premium`.
pub fn premium_price() -> f64 {
    150.0
}

/// Exam request frequency.
pub fn exam_frequency_tiers() -> TierTable {
    table(
        &[
            (50.0, "Muy Frecuente"),
            (20.0, "Frecuente"),
            (5.0, "Ocasional"),
            (1.0, "Poco Frecuente"),
        ],
        "Sin Solicitudes",
    )
}

/// Doctor activity by request count.
pub fn doctor_activity_tiers() -> TierTable {
    table(
        &[(50.0, "Muy Activo"), (20.0, "Activo"), (1.0, "Poco Activo")],
        "Inactivo",
    )
}

/// Doctor efficiency by exams per request.
pub fn doctor_efficiency_tiers() -> TierTable {
    table(
        &[(3.0, "Alta Eficiencia"), (1.5, "Eficiencia Media")],
        "Baja Eficiencia",
    )
}

/// Patient visit frequency by request count.
pub fn patient_frequency_tiers() -> TierTable {
    table(
        &[
            (10.0, "Paciente Frecuente"),
            (3.0, "Paciente Regular"),
            (1.0, "Paciente Ocasional"),
        ],
        "Sin Solicitudes",
    )
}

/// Patient age groups in whole years.
pub fn age_ranges() -> RangeTable {
    let range = |min: f64, max: Option<f64>, label: &str| Range {
        min,
        max,
        label: label.to_string(),
    };
    let ranges = vec![
        range(0.0, Some(13.0), "Niños (0-12)"),
        range(13.0, Some(18.0), "Adolescentes (13-17)"),
        range(18.0, Some(30.0), "Jóvenes (18-29)"),
        range(30.0, Some(45.0), "Adultos (30-44)"),
        range(45.0, Some(60.0), "Adultos (45-59)"),
        range(60.0, None, "Adultos mayores (60+)"),
    ];
    RangeTable::new(ranges, "No especificado")
        .unwrap_or_else(|_| RangeTable::unmatched_only("No especificado"))
}

pub fn top_limit() -> usize {
    10
}
