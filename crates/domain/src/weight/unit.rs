use serde::{Deserialize, Serialize};

use crate::error::{DomainError, Result};

/// Pounds per kilogram, scaled by 1000 so the conversion stays in integers
const LB_PER_KG_MILLI: i64 = 2205;

/// Units a scale terminal may report in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lb,
}

impl WeightUnit {
    /// Strict parse used for incoming readings
    pub fn parse(unit: &str) -> Result<Self> {
        match unit {
            "kg" => Ok(Self::Kg),
            "lb" => Ok(Self::Lb),
            other => Err(DomainError::Validation(format!(
                "unit must be 'kg' or 'lb', got '{other}'"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kg => "kg",
            Self::Lb => "lb",
        }
    }
}

impl std::fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Converts a weight to kilograms.
///
/// `lb` is converted as `floor(weight / 2.205)`; every other unit string is
/// taken to already be kilograms. Truncation is within the scale tolerance
/// (about 5 kg).
///
/// Registry weights are not bounded, so the product is taken in `i128`; the
/// quotient is smaller in magnitude than `weight` and always fits back.
pub fn normalize(unit: &str, weight: i64) -> (WeightUnit, i64) {
    if unit == WeightUnit::Lb.as_str() {
        let kg = (i128::from(weight) * 1000).div_euclid(i128::from(LB_PER_KG_MILLI));
        (WeightUnit::Kg, kg as i64)
    } else {
        (WeightUnit::Kg, weight)
    }
}
