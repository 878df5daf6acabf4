//! Dynamic curve constraints.

use crate::errors::{BudgetError, BudgetResult};
use crate::timeseries::FloatValue;
use serde::{Deserialize, Serialize};

/// Constraints for the dynamic budget curve solve.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConstraints {
    /// Required ratio of the curve's end-of-horizon value to its
    /// start-of-horizon value, in (0, 1).
    ///
    /// This encodes the empirical decline of the underlying driver over
    /// the horizon (e.g. the non-renewable share of the energy mix).
    pub end_start_ratio: FloatValue,

    /// Weight of the secondary trend in the blended shape function, in
    /// [0, 1]. Zero collapses the blend to the primary trend alone.
    pub blend_weight: FloatValue,
}

impl CurveConstraints {
    /// Constraints for the German operational-emissions curve: a blend of
    /// the non-renewable heating and electricity trends with electricity
    /// weight 0.137, and the end/start ratio derived from the projected
    /// 2045/2025 mix shares.
    pub fn operational() -> Self {
        let blend_weight = 0.137;
        // Electricity mix 4.3 % / 42.2 %, heating mix 11.6 % / 71.9 %
        let end_start_ratio =
            blend_weight * (4.3 / 42.2) + (1.0 - blend_weight) * (11.6 / 71.9);
        Self {
            end_start_ratio,
            blend_weight,
        }
    }

    /// Constraints for the German embodied-emissions curve: a single trend
    /// with the ratio of projected embodied emission intensities in 2045
    /// and 2025.
    pub fn embodied() -> Self {
        Self {
            end_start_ratio: 5.9 / 47.7,
            blend_weight: 0.0,
        }
    }

    pub fn validate(&self) -> BudgetResult<()> {
        if !(self.end_start_ratio > 0.0 && self.end_start_ratio < 1.0) {
            return Err(BudgetError::InvalidParameter {
                name: "end_start_ratio",
                reason: "must be in (0, 1)",
                value: self.end_start_ratio,
            });
        }
        if !(0.0..=1.0).contains(&self.blend_weight) {
            return Err(BudgetError::InvalidParameter {
                name: "blend_weight",
                reason: "must be in [0, 1]",
                value: self.blend_weight,
            });
        }
        Ok(())
    }
}

impl Default for CurveConstraints {
    fn default() -> Self {
        Self::operational()
    }
}
