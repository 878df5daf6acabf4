//! Area Evolution Simulator
//!
//! Evolves the total floor area of a building stock year by year under
//! compounding new-construction, demolition and renovation rates.
//!
//! # What This Component Does
//!
//! 1. **Warm-up phase**: compounds construction and demolition over the
//!    years between the reference data year and the horizon start, so that
//!    the horizon-start area is consistent with the rates rather than the
//!    raw data-year value.
//! 2. **Horizon phase**: for each year, evaluates the three rates once
//!    against the *pre-update* area, updates the stock by
//!    `new_build - demolition`, and records the *post-update* total area
//!    together with the newly-active area (`new_build + renovation`).
//!
//! The ordering in the horizon phase is a deliberate modeling choice:
//! intensities are computed against the area as it stands after that year's
//! stock change, and the published calibration was tuned against exactly
//! this ordering.
//!
//! The stock is never clamped. With a demolition rate exceeding the
//! new-build rate the area shrinks and may become non-positive; detecting
//! that is the intensity calculator's job.

use crate::errors::BudgetResult;
use crate::parameters::StockParameters;
use crate::timeseries::{AnnualSeries, FloatValue, Horizon};
use log::debug;
use serde::{Deserialize, Serialize};

/// One year's stock flows, evaluated against the area before the update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StockStep {
    /// Newly constructed floor area (m²).
    pub new_build: FloatValue,
    /// Demolished floor area (m²).
    pub demolition: FloatValue,
    /// Renovated floor area (m²).
    pub renovation: FloatValue,
}

impl StockStep {
    /// Evaluate all three rates against the current area.
    fn of(area: FloatValue, parameters: &StockParameters) -> Self {
        Self {
            new_build: parameters.new_build_rate * area,
            demolition: parameters.demolition_rate * area,
            renovation: parameters.renovation_rate * area,
        }
    }

    /// Net change of the total stock. Renovation leaves the stock size
    /// unchanged.
    pub fn net_change(&self) -> FloatValue {
        self.new_build - self.demolition
    }

    /// Floor area entering as either new construction or renovation; the
    /// two are additive and counted identically for embodied emissions.
    pub fn newly_active(&self) -> FloatValue {
        self.new_build + self.renovation
    }
}

/// Per-year floor areas over one horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaSeries {
    /// Total stock area at the end of each year (m²).
    pub total: AnnualSeries,
    /// Newly constructed plus renovated area in each year (m²).
    pub newly_active: AnnualSeries,
}

/// Stock-flow area simulator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockEvolution {
    parameters: StockParameters,
}

impl StockEvolution {
    /// Create a simulator with the default German stock calibration.
    pub fn new() -> Self {
        Self::from_parameters(StockParameters::default())
    }

    pub fn from_parameters(parameters: StockParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &StockParameters {
        &self.parameters
    }

    /// Area at the horizon start, after compounding the warm-up years.
    pub fn warmed_up_area(&self) -> FloatValue {
        let mut area = self.parameters.initial_area_m2;
        for _ in 0..self.parameters.warm_up_years {
            area += StockStep::of(area, &self.parameters).net_change();
        }
        area
    }

    /// Simulate the stock over a horizon.
    ///
    /// Returns one total-area and one newly-active-area value per year.
    pub fn simulate(&self, horizon: &Horizon) -> BudgetResult<AreaSeries> {
        self.parameters.validate()?;

        let mut area = self.warmed_up_area();

        let n_years = horizon.n_years();
        let mut total = Vec::with_capacity(n_years);
        let mut newly_active = Vec::with_capacity(n_years);

        for _year in horizon.years() {
            // Rates apply to the area before this year's update and are
            // evaluated once, not re-evaluated mid-step.
            let step = StockStep::of(area, &self.parameters);
            area += step.net_change();

            total.push(area);
            newly_active.push(step.newly_active());
        }

        debug!(
            "simulated stock {}-{}: {:.3e} m^2 -> {:.3e} m^2",
            horizon.start_year(),
            horizon.end_year(),
            self.parameters.initial_area_m2,
            area
        );

        Ok(AreaSeries {
            total: AnnualSeries::for_horizon(horizon, total.into()),
            newly_active: AnnualSeries::for_horizon(horizon, newly_active.into()),
        })
    }
}

impl Default for StockEvolution {
    fn default() -> Self {
        Self::new()
    }
}
