//! Percentage and ratio calculators with division-by-zero guards.
//!
//! Percentages inside one breakdown are rounded independently and are not
//! adjusted to sum to exactly 100.

use super::rounding::{round_to, Precision};

/// Literal cell shown when a percentage has no meaningful value.
pub const PLACEHOLDER_PERCENT: &str = "0%";

/// `round(numerator / denominator * 100, precision)`, or 0 when the
/// denominator is not positive.
pub fn percentage(numerator: f64, denominator: f64, precision: Precision) -> f64 {
    if !denominator.is_finite() || denominator <= 0.0 || !numerator.is_finite() {
        return 0.0;
    }
    round_to(numerator / denominator * 100.0, precision)
}

/// `round(numerator / denominator, precision)`, or 0 when the denominator is
/// not positive. Used for "average per X" metrics.
pub fn ratio(numerator: f64, denominator: f64, precision: Precision) -> f64 {
    if !denominator.is_finite() || denominator <= 0.0 || !numerator.is_finite() {
        return 0.0;
    }
    round_to(numerator / denominator, precision)
}

/// Render an already-rounded percentage, e.g. `75.0%` at precision 1.
pub fn format_percentage(value: f64, precision: Precision) -> String {
    format!(
        "{:.*}%",
        usize::from(precision.decimals()),
        round_to(value, precision)
    )
}

/// Share of the total for each count, in input order.
pub fn shares_of_total(counts: &[u64], precision: Precision) -> Vec<f64> {
    let total = super::saturating_sum(counts.iter().copied());
    counts
        .iter()
        .map(|&c| percentage(c as f64, total as f64, precision))
        .collect()
}
