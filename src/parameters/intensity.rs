//! Static intensity parameters.

use crate::errors::{BudgetError, BudgetResult};
use crate::timeseries::FloatValue;
use serde::{Deserialize, Serialize};

/// Parameters for the static intensity calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntensityParameters {
    /// Service life over which one year's embodied-carbon content is
    /// amortized (years).
    ///
    /// Default: 50 years
    pub service_life_years: FloatValue,
}

impl IntensityParameters {
    pub fn validate(&self) -> BudgetResult<()> {
        if !(self.service_life_years > 0.0) || !self.service_life_years.is_finite() {
            return Err(BudgetError::InvalidParameter {
                name: "service_life_years",
                reason: "must be positive and finite",
                value: self.service_life_years,
            });
        }
        Ok(())
    }
}

impl Default for IntensityParameters {
    fn default() -> Self {
        Self {
            service_life_years: 50.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        IntensityParameters::default().validate().unwrap();
    }

    #[test]
    fn test_rejects_zero_service_life() {
        let parameters = IntensityParameters {
            service_life_years: 0.0,
        };
        assert!(parameters.validate().is_err());
    }
}
