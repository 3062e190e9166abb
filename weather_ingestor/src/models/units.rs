//! Unit-of-measure tokens and reading validation.
//!
//! Providers annotate each measurement with a unit code such as
//! `wmoUnit:degC`. A reading is only accepted when its unit code names the
//! unit we store for that field; anything else fails with
//! [`ProviderError::UnsupportedUnit`] instead of being silently rescaled.

use std::fmt;

use serde::Deserialize;

use crate::providers::ProviderError;

/// Units stored in the observation fact table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Degrees Celsius.
    Celsius,
    /// Kilometres per hour.
    KilometresPerHour,
    /// Percent (0-100).
    Percent,
}

impl Unit {
    /// Parse a provider unit token. Both the `wmoUnit:` and legacy `unit:`
    /// namespaces are accepted.
    pub fn parse(token: &str) -> Option<Unit> {
        let code = token
            .trim()
            .strip_prefix("wmoUnit:")
            .or_else(|| token.trim().strip_prefix("unit:"))?;
        match code {
            "degC" => Some(Unit::Celsius),
            "km_h-1" => Some(Unit::KilometresPerHour),
            "percent" => Some(Unit::Percent),
            _ => None,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Celsius => write!(f, "degC"),
            Unit::KilometresPerHour => write!(f, "km_h-1"),
            Unit::Percent => write!(f, "percent"),
        }
    }
}

/// A measured value with its unit annotation, as found in the payload.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quantity {
    /// Unit token, e.g. "wmoUnit:degC".
    pub unit_code: Option<String>,
    /// Reported value; `None` when the sensor had no reading.
    pub value: Option<f64>,
}

impl Quantity {
    /// Convenience constructor.
    pub fn new(unit_code: &str, value: Option<f64>) -> Self {
        Self {
            unit_code: Some(unit_code.to_string()),
            value,
        }
    }
}

/// Validate a (possibly absent) quantity against the unit stored for `field`.
///
/// Returns `Ok(None)` for an absent quantity or a null value, never zero.
/// Values are rounded to two decimals.
pub fn reading(
    quantity: Option<&Quantity>,
    expected: Unit,
    field: &'static str,
) -> Result<Option<f64>, ProviderError> {
    let Some(q) = quantity else {
        return Ok(None);
    };

    match q.unit_code.as_deref() {
        Some(token) => match Unit::parse(token) {
            Some(unit) if unit == expected => {}
            _ => {
                return Err(ProviderError::UnsupportedUnit {
                    field,
                    unit: token.to_string(),
                });
            }
        },
        // a bare number gives no way to tell its scale
        None if q.value.is_some() => {
            return Err(ProviderError::UnsupportedUnit {
                field,
                unit: "<missing>".to_string(),
            });
        }
        None => {}
    }

    Ok(q.value.map(round2))
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
