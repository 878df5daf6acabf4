//! Budget allocation parameters.
//!
//! Shares that break a global CO2 budget down to a national,
//! building-sector, category-specific GHG budget.

use crate::errors::{BudgetError, BudgetResult};
use crate::timeseries::FloatValue;
use serde::{Deserialize, Serialize};

/// Parameters for the budget allocation chain.
///
/// The allocator computes
///
/// $$B_{cat} = \frac{B_{global} - B_{deducted}}{f_{CO2}}
///     \cdot s_{nat} \cdot s_{sector} \cdot s_{cat} \cdot 10^{12}$$
///
/// yielding a category budget in kg CO2e from a global budget in Gt CO2.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationParameters {
    /// Remaining global CO2 budget (Gt).
    ///
    /// Default: 550 Gt, the budget for staying below 1.7 °C with 83 %
    /// probability (see [`GlobalBudgetTable`]).
    pub global_budget_gt: FloatValue,

    /// Global emissions already incurred between the budget's reference
    /// year and the horizon start (Gt CO2).
    ///
    /// Default: 185 Gt (2020–2024).
    pub pre_horizon_deduction_gt: FloatValue,

    /// Share of CO2 on total national GHG emissions.
    ///
    /// Dividing the CO2 budget by this factor widens it to an all-GHG
    /// budget; it must lie in (0, 1].
    ///
    /// Default: 0.887 (Germany)
    pub co2_share_of_ghg: FloatValue,

    /// National share of the global budget.
    ///
    /// Default: 0.0106, the "equality" (equal-per-capita) allocation for
    /// Germany. Grandfathering or GDP-proportional principles supply a
    /// different value here.
    pub national_share: FloatValue,

    /// Share of the building sector on national emissions.
    ///
    /// Default: 0.303 (Germany)
    pub sector_share: FloatValue,

    /// Average share of embodied emissions on building-sector emissions
    /// over the horizon. The operational share is `1 - embodied_share`.
    ///
    /// Default: 0.3707 (yearly average 2025–2045)
    pub embodied_share: FloatValue,
}

impl AllocationParameters {
    /// Default parameters with the global budget looked up from a table by
    /// temperature ceiling and probability.
    pub fn with_budget_from(
        table: &GlobalBudgetTable,
        temperature_limit_c: FloatValue,
        probability: FloatValue,
    ) -> BudgetResult<Self> {
        Ok(Self {
            global_budget_gt: table.lookup(temperature_limit_c, probability)?,
            ..Self::default()
        })
    }

    /// Share of operational emissions on building-sector emissions.
    pub fn operational_share(&self) -> FloatValue {
        1.0 - self.embodied_share
    }

    /// Check all shares and factors against their domains.
    pub fn validate(&self) -> BudgetResult<()> {
        if !(self.co2_share_of_ghg > 0.0 && self.co2_share_of_ghg <= 1.0) {
            return Err(BudgetError::InvalidParameter {
                name: "co2_share_of_ghg",
                reason: "must be in (0, 1]",
                value: self.co2_share_of_ghg,
            });
        }
        if !self.global_budget_gt.is_finite() {
            return Err(BudgetError::InvalidParameter {
                name: "global_budget_gt",
                reason: "must be finite",
                value: self.global_budget_gt,
            });
        }
        if !(self.pre_horizon_deduction_gt >= 0.0) {
            return Err(BudgetError::InvalidParameter {
                name: "pre_horizon_deduction_gt",
                reason: "must be non-negative",
                value: self.pre_horizon_deduction_gt,
            });
        }
        for (name, share) in [
            ("national_share", self.national_share),
            ("sector_share", self.sector_share),
            ("embodied_share", self.embodied_share),
        ] {
            if !(0.0..=1.0).contains(&share) {
                return Err(BudgetError::InvalidParameter {
                    name,
                    reason: "must be in [0, 1]",
                    value: share,
                });
            }
        }
        Ok(())
    }
}

impl Default for AllocationParameters {
    fn default() -> Self {
        Self {
            global_budget_gt: 550.0,
            pre_horizon_deduction_gt: 185.0,
            co2_share_of_ghg: 0.887,
            national_share: 0.0106,
            sector_share: 0.303,
            embodied_share: 0.3707,
        }
    }
}

/// One row of the global-budget lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalBudgetEntry {
    /// Temperature ceiling (°C above pre-industrial).
    pub temperature_limit_c: FloatValue,
    /// Probability of staying below the ceiling.
    pub probability: FloatValue,
    /// Remaining global budget (Gt CO2, from the start of 2020).
    pub budget_gt_co2: FloatValue,
}

/// Fixed table of remaining global CO2 budgets keyed by a temperature
/// ceiling and an exceedance probability.
///
/// The default table carries the IPCC AR6 WG1 assessment (budgets from the
/// start of 2020). Pairs not present in the table are an error; values are
/// deliberately not interpolated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalBudgetTable {
    entries: Vec<GlobalBudgetEntry>,
}

impl GlobalBudgetTable {
    pub fn from_entries(entries: Vec<GlobalBudgetEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[GlobalBudgetEntry] {
        &self.entries
    }

    /// Look up the budget (Gt CO2) for a (temperature ceiling, probability)
    /// pair.
    ///
    /// Fails with [`BudgetError::InvalidParameter`] when the pair is not in
    /// the table.
    pub fn lookup(
        &self,
        temperature_limit_c: FloatValue,
        probability: FloatValue,
    ) -> BudgetResult<FloatValue> {
        self.entries
            .iter()
            .find(|entry| {
                (entry.temperature_limit_c - temperature_limit_c).abs() < 1e-9
                    && (entry.probability - probability).abs() < 1e-9
            })
            .map(|entry| entry.budget_gt_co2)
            .ok_or(BudgetError::InvalidParameter {
                name: "temperature_limit_c/probability",
                reason: "no budget tabulated for this pair",
                value: temperature_limit_c,
            })
    }
}

impl Default for GlobalBudgetTable {
    fn default() -> Self {
        // IPCC AR6 WG1 SPM Table SPM.2, remaining budgets from 2020.
        let rows = [
            (1.5, 0.50, 500.0),
            (1.5, 0.67, 400.0),
            (1.5, 0.83, 300.0),
            (1.7, 0.50, 850.0),
            (1.7, 0.67, 700.0),
            (1.7, 0.83, 550.0),
            (2.0, 0.50, 1350.0),
            (2.0, 0.67, 1150.0),
            (2.0, 0.83, 900.0),
        ];
        Self {
            entries: rows
                .iter()
                .map(
                    |&(temperature_limit_c, probability, budget_gt_co2)| GlobalBudgetEntry {
                        temperature_limit_c,
                        probability,
                        budget_gt_co2,
                    },
                )
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shares_are_valid() {
        AllocationParameters::default().validate().unwrap();
    }

    #[test]
    fn test_operational_share_complements_embodied() {
        let parameters = AllocationParameters::default();
        assert!((parameters.embodied_share + parameters.operational_share() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_share_above_one() {
        let parameters = AllocationParameters {
            sector_share: 1.2,
            ..AllocationParameters::default()
        };
        assert!(parameters.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_co2_share() {
        let parameters = AllocationParameters {
            co2_share_of_ghg: 0.0,
            ..AllocationParameters::default()
        };
        assert!(parameters.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_deduction() {
        let parameters = AllocationParameters {
            pre_horizon_deduction_gt: -1.0,
            ..AllocationParameters::default()
        };
        assert!(parameters.validate().is_err());
    }

    #[test]
    fn test_table_lookup_published_anchor() {
        let table = GlobalBudgetTable::default();
        assert_eq!(table.lookup(1.7, 0.83).unwrap(), 550.0);
        assert_eq!(table.lookup(1.5, 0.50).unwrap(), 500.0);
    }

    #[test]
    fn test_parameters_from_table_match_default_anchor() {
        let table = GlobalBudgetTable::default();
        let parameters = AllocationParameters::with_budget_from(&table, 1.7, 0.83).unwrap();
        assert_eq!(
            parameters.global_budget_gt,
            AllocationParameters::default().global_budget_gt
        );
    }

    #[test]
    fn test_table_lookup_miss_is_error() {
        let table = GlobalBudgetTable::default();
        assert!(table.lookup(1.6, 0.83).is_err());
        assert!(table.lookup(1.7, 0.90).is_err());
    }
}
