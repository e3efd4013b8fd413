//! Fixed-precision rounding shared by every derived metric.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};

/// Highest supported number of decimal places.
pub const MAX_PRECISION: u8 = 4;

/// Number of decimal places a metric is rounded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Precision(u8);

impl Precision {
    pub const ZERO: Precision = Precision(0);
    pub const ONE: Precision = Precision(1);
    pub const TWO: Precision = Precision(2);

    pub fn new(decimals: u8) -> Result<Self> {
        if decimals > MAX_PRECISION {
            return Err(Error::validation(format!(
                "precision must be between 0 and {MAX_PRECISION}, got {decimals}"
            )));
        }
        Ok(Self(decimals))
    }

    pub fn decimals(self) -> u8 {
        self.0
    }

    fn factor(self) -> f64 {
        10f64.powi(i32::from(self.0))
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u8> for Precision {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Precision> for u8 {
    fn from(value: Precision) -> Self {
        value.0
    }
}

/// Round half away from zero to `precision` decimals.
///
/// The scaled value is first snapped to nine fractional digits so that
/// products like `1.005 * 100 = 100.49999999999999` round as written.
/// Non-finite input yields 0.
pub fn round_to(value: f64, precision: Precision) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = precision.factor();
    let scaled = value * factor;
    let snapped = (scaled * 1e9).round() / 1e9;
    let rounded = snapped.round() / factor;
    // normalise -0.0
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
