//! Budget Allocator
//!
//! Converts a remaining global CO2 budget into an absolute national,
//! building-sector, category-specific GHG budget.
//!
//! # What This Component Does
//!
//! 1. Subtracts global emissions already incurred before the horizon start
//! 2. Widens the CO2-only budget to an all-GHG budget by dividing by the
//!    CO2 share of national GHG emissions
//! 3. Applies the national, sector and category shares multiplicatively
//! 4. Converts gigatonnes to kilograms
//!
//! The allocation is a pure function of its parameters; there are no error
//! conditions beyond the numeric domain checks in
//! [`AllocationParameters::validate`].

use crate::errors::BudgetResult;
use crate::parameters::AllocationParameters;
use crate::timeseries::FloatValue;
use serde::{Deserialize, Serialize};

/// Conversion from gigatonnes to kilograms.
const GT_TO_KG: FloatValue = 1e12;

/// Emission category within the building sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmissionCategory {
    /// Emissions from ongoing energy use of the existing stock.
    Operational,
    /// Emissions from producing and installing construction materials.
    Embodied,
}

/// Budget allocator component.
///
/// $$B_{cat} = \frac{B_{global} - B_{deducted}}{f_{CO2}}
///     \cdot s_{nat} \cdot s_{sector} \cdot s_{cat} \cdot 10^{12}$$
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetAllocator {
    parameters: AllocationParameters,
}

impl BudgetAllocator {
    /// Create an allocator with the default German calibration.
    pub fn new() -> Self {
        Self::from_parameters(AllocationParameters::default())
    }

    pub fn from_parameters(parameters: AllocationParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &AllocationParameters {
        &self.parameters
    }

    /// National all-GHG budget (Gt CO2e) after deduction and CO2→GHG
    /// conversion, before sector and category shares.
    fn national_ghg_budget_gt(&self) -> FloatValue {
        let remaining_gt =
            self.parameters.global_budget_gt - self.parameters.pre_horizon_deduction_gt;
        remaining_gt / self.parameters.co2_share_of_ghg * self.parameters.national_share
    }

    /// Absolute budget for one emission category (kg CO2e).
    pub fn allocate(&self, category: EmissionCategory) -> BudgetResult<FloatValue> {
        self.parameters.validate()?;

        let category_share = match category {
            EmissionCategory::Operational => self.parameters.operational_share(),
            EmissionCategory::Embodied => self.parameters.embodied_share,
        };

        Ok(self.national_ghg_budget_gt() * self.parameters.sector_share * category_share
            * GT_TO_KG)
    }
}

impl Default for BudgetAllocator {
    fn default() -> Self {
        Self::new()
    }
}
