//! Static Intensity Calculator
//!
//! Spreads a category budget evenly across the horizon years and divides by
//! the per-year floor area, producing a constant-basis kg CO2e/(m²·a)
//! series, the "static budget" reference baseline.
//!
//! Operational intensities divide by the total stock area of each year;
//! embodied intensities divide by the newly-active (constructed plus
//! renovated) area and additionally by the amortization service life.
//!
//! A non-positive area in any year is a hard failure
//! ([`BudgetError::DegenerateArea`]); it indicates a physically nonsensical
//! parameter combination and is never replaced with a default value.

use crate::errors::{BudgetError, BudgetResult};
use crate::parameters::IntensityParameters;
use crate::stock::AreaSeries;
use crate::timeseries::{AnnualSeries, FloatValue, Horizon};
use serde::{Deserialize, Serialize};

/// Which per-year area a category's budget is divided by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaBasis {
    /// Total stock area (operational emissions).
    Total,
    /// Newly constructed plus renovated area (embodied emissions).
    NewlyActive,
}

impl AreaBasis {
    fn select<'a>(&self, areas: &'a AreaSeries) -> &'a AnnualSeries {
        match self {
            AreaBasis::Total => &areas.total,
            AreaBasis::NewlyActive => &areas.newly_active,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            AreaBasis::Total => "total",
            AreaBasis::NewlyActive => "newly-active",
        }
    }
}

/// A constant-basis per-area budget: one intensity per horizon year plus
/// the horizon average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticBudget {
    series: AnnualSeries,
    mean: FloatValue,
}

impl StaticBudget {
    /// Per-year intensities (kg CO2e/(m²·a)).
    pub fn series(&self) -> &AnnualSeries {
        &self.series
    }

    /// Horizon-average intensity: the canonical static-budget scalar
    /// consumed by the dynamic curve solver.
    pub fn mean(&self) -> FloatValue {
        self.mean
    }

    /// Default conservation target for the dynamic curve: the static level
    /// integrated over the horizon width.
    pub fn target_integral(&self, horizon: &Horizon) -> FloatValue {
        self.mean * horizon.span()
    }
}

/// Static intensity calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntensityCalculator {
    parameters: IntensityParameters,
}

impl IntensityCalculator {
    pub fn new() -> Self {
        Self::from_parameters(IntensityParameters::default())
    }

    pub fn from_parameters(parameters: IntensityParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &IntensityParameters {
        &self.parameters
    }

    /// Static intensity series for a category budget against a selected
    /// area basis.
    ///
    /// The per-year intensity is `budget / n_years / area[year]`, divided
    /// additionally by the service life for the newly-active basis.
    pub fn intensity(
        &self,
        category_budget_kg: FloatValue,
        areas: &AreaSeries,
        basis: AreaBasis,
    ) -> BudgetResult<StaticBudget> {
        self.parameters.validate()?;

        let series = basis.select(areas);
        let annual_budget_kg = category_budget_kg / series.len() as FloatValue;
        let amortization = match basis {
            AreaBasis::Total => 1.0,
            AreaBasis::NewlyActive => self.parameters.service_life_years,
        };

        let mut values = Vec::with_capacity(series.len());
        for (year, area) in series.iter() {
            if area <= 0.0 {
                return Err(BudgetError::DegenerateArea {
                    year,
                    basis: basis.label(),
                    area,
                });
            }
            values.push(annual_budget_kg / area / amortization);
        }

        let mean = values.iter().sum::<FloatValue>() / values.len() as FloatValue;
        Ok(StaticBudget {
            series: AnnualSeries::from_values(series.start_year(), values.into()),
            mean,
        })
    }

    /// Operational static budget: total-area basis.
    pub fn operational(
        &self,
        budget_kg: FloatValue,
        areas: &AreaSeries,
    ) -> BudgetResult<StaticBudget> {
        self.intensity(budget_kg, areas, AreaBasis::Total)
    }

    /// Embodied static budget: newly-active-area basis with service-life
    /// amortization.
    pub fn embodied(
        &self,
        budget_kg: FloatValue,
        areas: &AreaSeries,
    ) -> BudgetResult<StaticBudget> {
        self.intensity(budget_kg, areas, AreaBasis::NewlyActive)
    }
}

impl Default for IntensityCalculator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::StockParameters;
    use crate::stock::StockEvolution;

    fn horizon() -> Horizon {
        Horizon::new(2025, 2045).unwrap()
    }

    fn reference_areas() -> AreaSeries {
        StockEvolution::from_parameters(StockParameters {
            initial_area_m2: 5.0e9,
            new_build_rate: 0.009,
            demolition_rate: 0.001,
            renovation_rate: 0.01,
            warm_up_years: 4,
        })
        .simulate(&horizon())
        .unwrap()
    }

    // ===== Intensity Tests =====

    #[test]
    fn test_operational_intensity_per_year_value() {
        let calculator = IntensityCalculator::new();
        let areas = reference_areas();
        let budget_kg = 1.0e12;

        let result = calculator.operational(budget_kg, &areas).unwrap();

        for (year, intensity) in result.series().iter() {
            let area = areas.total.get(year).unwrap();
            let expected = budget_kg / 21.0 / area;
            assert!(
                ((intensity - expected) / expected).abs() < 1e-12,
                "Year {}: {} vs {}",
                year,
                intensity,
                expected
            );
        }
    }

    #[test]
    fn test_operational_intensity_decreases_with_growing_stock() {
        let calculator = IntensityCalculator::new();
        let result = calculator.operational(1.0e12, &reference_areas()).unwrap();

        let values = result.series().values();
        assert!(result.mean() > 0.0);
        for y in 1..values.len() {
            assert!(
                values[y] < values[y - 1],
                "Fixed budget over a growing stock must give a decreasing intensity"
            );
        }
    }

    #[test]
    fn test_embodied_intensity_amortized_over_service_life() {
        let calculator = IntensityCalculator::new();
        let areas = reference_areas();
        let budget_kg = 1.0e12;

        let embodied = calculator.embodied(budget_kg, &areas).unwrap();

        let first_area = areas.newly_active.get(2025).unwrap();
        let expected = budget_kg / 21.0 / first_area / 50.0;
        let first = embodied.series().get(2025).unwrap();
        assert!(
            ((first - expected) / expected).abs() < 1e-12,
            "Embodied intensity should include the 50 year service life: {} vs {}",
            first,
            expected
        );
    }

    #[test]
    fn test_mean_matches_series_average() {
        let calculator = IntensityCalculator::new();
        let result = calculator.operational(1.0e12, &reference_areas()).unwrap();
        let recomputed = result.series().mean().unwrap();
        assert!(
            ((result.mean() - recomputed) / recomputed).abs() < 1e-12,
            "Exposed mean should equal the series average"
        );
    }

    #[test]
    fn test_target_integral_uses_horizon_span() {
        let calculator = IntensityCalculator::new();
        let result = calculator.operational(1.0e12, &reference_areas()).unwrap();
        let target = result.target_integral(&horizon());
        assert!(((target - result.mean() * 20.0) / target).abs() < 1e-12);
    }

    // ===== Degenerate Area Tests =====

    #[test]
    fn test_non_positive_area_is_surfaced() {
        // Demolition rate of 1.2 drives the stock negative immediately
        let areas = StockEvolution::from_parameters(StockParameters {
            initial_area_m2: 5.0e9,
            new_build_rate: 0.0,
            demolition_rate: 1.2,
            renovation_rate: 0.0,
            warm_up_years: 0,
        })
        .simulate(&horizon())
        .unwrap();

        let calculator = IntensityCalculator::new();
        let result = calculator.operational(1.0e12, &areas);
        assert!(matches!(
            result,
            Err(BudgetError::DegenerateArea { year: 2025, .. })
        ));
    }

    #[test]
    fn test_zero_newly_active_area_is_surfaced() {
        let areas = StockEvolution::from_parameters(StockParameters {
            initial_area_m2: 5.0e9,
            new_build_rate: 0.0,
            demolition_rate: 0.0,
            renovation_rate: 0.0,
            warm_up_years: 0,
        })
        .simulate(&horizon())
        .unwrap();

        let calculator = IntensityCalculator::new();
        let result = calculator.embodied(1.0e12, &areas);
        assert!(matches!(result, Err(BudgetError::DegenerateArea { .. })));
    }

    #[test]
    fn test_invalid_service_life_fails_fast() {
        let calculator = IntensityCalculator::from_parameters(IntensityParameters {
            service_life_years: -1.0,
        });
        let result = calculator.embodied(1.0e12, &reference_areas());
        assert!(matches!(
            result,
            Err(BudgetError::InvalidParameter { .. })
        ));
    }
}
