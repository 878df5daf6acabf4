//! Scenario composition.
//!
//! A [`Scenario`] bundles one complete set of inputs (horizon, allocation
//! shares, stock rates and intensity parameters) and runs the static
//! pipeline: allocate both category budgets, simulate the stock, compute
//! both static intensity series. The immutable [`ScenarioResults`] then
//! feeds the dynamic curve solver, using the static level as the default
//! conservation target.
//!
//! Scenarios are fully independent: every run validates its own parameter
//! copies and shares no mutable state, so a caller may evaluate thousands
//! of parameter combinations concurrently and catch per-scenario failures
//! without aborting the sweep. A failed scenario returns an error and no
//! partial results.

use crate::allocator::{BudgetAllocator, EmissionCategory};
use crate::curve::{solve_dynamic_curve, BlendedTrend, DynamicBudgetCurve};
use crate::errors::BudgetResult;
use crate::intensity::{IntensityCalculator, StaticBudget};
use crate::parameters::{
    AllocationParameters, CurveConstraints, IntensityParameters, StockParameters,
};
use crate::stock::{AreaSeries, StockEvolution};
use crate::timeseries::{FloatValue, Horizon};
use serde::{Deserialize, Serialize};

/// One complete parameterization of the model.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Scenario {
    pub horizon: Horizon,
    pub allocation: AllocationParameters,
    pub stock: StockParameters,
    pub intensity: IntensityParameters,
}

impl Scenario {
    /// Run the static pipeline for this scenario.
    ///
    /// Fails fast on the first invalid parameter or degenerate area; no
    /// partial results are returned.
    pub fn run(&self) -> BudgetResult<ScenarioResults> {
        self.horizon.validate()?;
        self.allocation.validate()?;
        self.stock.validate()?;
        self.intensity.validate()?;

        let allocator = BudgetAllocator::from_parameters(self.allocation.clone());
        let operational_budget_kg = allocator.allocate(EmissionCategory::Operational)?;
        let embodied_budget_kg = allocator.allocate(EmissionCategory::Embodied)?;

        let areas = StockEvolution::from_parameters(self.stock.clone()).simulate(&self.horizon)?;

        let calculator = IntensityCalculator::from_parameters(self.intensity.clone());
        let operational = calculator.operational(operational_budget_kg, &areas)?;
        let embodied = calculator.embodied(embodied_budget_kg, &areas)?;

        Ok(ScenarioResults {
            horizon: self.horizon,
            operational_budget_kg,
            embodied_budget_kg,
            areas,
            operational,
            embodied,
        })
    }
}

/// Read-only results of one scenario's static pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResults {
    pub horizon: Horizon,
    /// Absolute operational budget (kg CO2e).
    pub operational_budget_kg: FloatValue,
    /// Absolute embodied budget (kg CO2e).
    pub embodied_budget_kg: FloatValue,
    /// Simulated per-year floor areas.
    pub areas: AreaSeries,
    /// Static operational budget (kg CO2e/(m²·a)).
    pub operational: StaticBudget,
    /// Static embodied budget (kg CO2e/(m²·a)).
    pub embodied: StaticBudget,
}

impl ScenarioResults {
    fn static_budget(&self, category: EmissionCategory) -> &StaticBudget {
        match category {
            EmissionCategory::Operational => &self.operational,
            EmissionCategory::Embodied => &self.embodied,
        }
    }

    /// Solve the dynamic curve for one category, conserving the category's
    /// static budget integral over the horizon.
    pub fn solve_dynamic(
        &self,
        category: EmissionCategory,
        trend: BlendedTrend,
        constraints: &CurveConstraints,
    ) -> BudgetResult<DynamicBudgetCurve> {
        constraints.validate()?;
        let target_integral = self.static_budget(category).target_integral(&self.horizon);
        solve_dynamic_curve(
            self.horizon,
            trend,
            constraints.end_start_ratio,
            target_integral,
        )
    }
}
