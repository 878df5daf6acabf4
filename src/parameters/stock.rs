//! Building-stock evolution parameters.

use crate::errors::{BudgetError, BudgetResult};
use crate::timeseries::FloatValue;
use serde::{Deserialize, Serialize};

/// Parameters for the year-by-year floor-area simulation.
///
/// Rates are yearly fractions applied multiplicatively to the current total
/// area. They are typically small (0–2 %). The simulator does not clamp a
/// shrinking stock: a demolition rate overwhelming construction eventually
/// produces a non-positive area, which the intensity calculation surfaces
/// as [`crate::errors::BudgetError::DegenerateArea`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StockParameters {
    /// Total net room area of the stock in the reference data year (m²).
    ///
    /// Default: the German stock relevant to the Building Energy Act (GEG):
    /// residential living area (Destatis 2024) converted to net room area
    /// via gross-floor-area factor 1.87 and construction-area deduction
    /// 0.83 (BKI 2024), plus the non-residential net room area from
    /// Hörner et al. (2024).
    pub initial_area_m2: FloatValue,

    /// Yearly new-built rate. Default: 0.009
    pub new_build_rate: FloatValue,

    /// Yearly demolition rate. Default: 0.001
    pub demolition_rate: FloatValue,

    /// Yearly renovation rate. Default: 0.01
    pub renovation_rate: FloatValue,

    /// Years elapsed between the reference data year and the horizon start.
    ///
    /// The simulator compounds construction and demolition over these years
    /// before the horizon so that the horizon-start area is consistent with
    /// the rates rather than the raw data year. Default: 4 (2021–2025).
    pub warm_up_years: u32,
}

impl StockParameters {
    pub fn validate(&self) -> BudgetResult<()> {
        if !(self.initial_area_m2 > 0.0) || !self.initial_area_m2.is_finite() {
            return Err(BudgetError::InvalidParameter {
                name: "initial_area_m2",
                reason: "must be positive and finite",
                value: self.initial_area_m2,
            });
        }
        for (name, rate) in [
            ("new_build_rate", self.new_build_rate),
            ("demolition_rate", self.demolition_rate),
            ("renovation_rate", self.renovation_rate),
        ] {
            if !(rate >= 0.0) || !rate.is_finite() {
                return Err(BudgetError::InvalidParameter {
                    name,
                    reason: "must be non-negative and finite",
                    value: rate,
                });
            }
        }
        Ok(())
    }
}

impl Default for StockParameters {
    fn default() -> Self {
        // Residential living area minus residential areas already counted in
        // non-residential buildings, converted to net room area, plus the
        // GEG-relevant non-residential net room area.
        let residential_m2 = (4_024_768_000.0 - 127_039_000.0) * 1.87 * 0.83;
        let non_residential_m2 = 3_073_000_000.0;
        Self {
            initial_area_m2: residential_m2 + non_residential_m2,
            new_build_rate: 0.009,
            demolition_rate: 0.001,
            renovation_rate: 0.01,
            warm_up_years: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        StockParameters::default().validate().unwrap();
    }

    #[test]
    fn test_default_initial_area_magnitude() {
        // German stock is on the order of 9 billion m² of net room area
        let parameters = StockParameters::default();
        assert!(parameters.initial_area_m2 > 8.0e9);
        assert!(parameters.initial_area_m2 < 1.1e10);
    }

    #[test]
    fn test_rejects_negative_rate() {
        let parameters = StockParameters {
            demolition_rate: -0.001,
            ..StockParameters::default()
        };
        assert!(parameters.validate().is_err());
    }

    #[test]
    fn test_rejects_non_positive_area() {
        let parameters = StockParameters {
            initial_area_m2: 0.0,
            ..StockParameters::default()
        };
        assert!(parameters.validate().is_err());
    }
}
