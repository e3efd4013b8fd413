//! Small predicates the classifiers are composed from.

use crate::record::EntityRecord;

/// Inclusive lower bound check; NaN never meets a threshold.
pub fn meets_threshold(value: f64, threshold: f64) -> bool {
    value >= threshold
}

pub fn is_below(value: f64, threshold: f64) -> bool {
    value < threshold
}

pub fn flag_matches(record: &EntityRecord, field: &str, expected: bool) -> bool {
    record.aux_flag(field) == expected
}

/// Thresholds must be strictly descending for first-match scanning.
pub fn is_strictly_descending(thresholds: &[f64]) -> bool {
    thresholds.windows(2).all(|pair| pair[0] > pair[1])
}

pub fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{fields, AuxValue, EntityKind};

    #[test]
    fn test_meets_threshold_is_inclusive() {
        assert!(meets_threshold(30.0, 30.0));
        assert!(!meets_threshold(29.999, 30.0));
        assert!(!meets_threshold(f64::NAN, 0.0));
    }

    #[test]
    fn test_is_below() {
        assert!(is_below(9.0, 10.0));
        assert!(!is_below(10.0, 10.0));
    }

    #[test]
    fn test_flag_matches() {
        let mut record = EntityRecord::new(EntityKind::Service, "X");
        assert!(flag_matches(&record, fields::ACTIVE, true));
        record
            .auxiliary
            .insert(fields::ACTIVE.into(), AuxValue::Flag(false));
        assert!(flag_matches(&record, fields::ACTIVE, false));
    }

    #[test]
    fn test_is_strictly_descending() {
        assert!(is_strictly_descending(&[30.0, 10.0, 1.0]));
        assert!(!is_strictly_descending(&[30.0, 30.0]));
        assert!(is_strictly_descending(&[]));
    }
}
