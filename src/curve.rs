//! Dynamic Curve Solver
//!
//! Produces a time-varying intensity curve `dynamic(t) = a + b·Z(t)` over
//! the horizon such that
//!
//! 1. the definite integral of the curve over the horizon equals a target
//!    constant (by default the static-budget level times the horizon
//!    width), and
//! 2. the end-of-horizon value is a prescribed fraction of the
//!    start-of-horizon value, matching the empirical decline of the
//!    underlying driver.
//!
//! `Z` is a weighted blend of one or two empirical trend functions of
//! normalized time, fitted offline and injected as [`TrendFunction`]
//! values. The two constraints reduce to a single linear equation:
//!
//! $$a (1 - r) + b (Z_1 - r Z_0) = 0$$
//! $$a (t_{max} - t_{min}) + b I_Z = I_{target}$$
//!
//! so `a` is expressed in terms of `b` from the boundary condition and `b`
//! follows from the integral condition in closed form. The solve is always
//! verified afterwards by independent quadrature of the resulting curve;
//! a failed verification (degenerate ratio, nearly constant `Z`) fails
//! with [`BudgetError::UnsolvableConstraint`] rather than returning a
//! silently wrong curve.

use crate::errors::{BudgetError, BudgetResult};
use crate::quadrature::{integrate, DEFAULT_TOLERANCE};
use crate::timeseries::{AnnualSeries, FloatValue, Horizon};
use is_close::is_close;
use log::debug;
use std::fmt;

/// Relative tolerance of the post-solve verification.
pub const VERIFICATION_REL_TOL: FloatValue = 1e-3;

/// An empirical trend evaluated at normalized time `x ∈ [0, 1]`, returning
/// a percentage share.
///
/// Trends are produced offline by curve fitting against projection data;
/// the solver only ever evaluates them, so refreshed fits can be swapped
/// in without touching the solver. Any `Fn(f64) -> f64` closure is a
/// `TrendFunction`.
pub trait TrendFunction {
    fn value(&self, x: FloatValue) -> FloatValue;
}

impl<F> TrendFunction for F
where
    F: Fn(FloatValue) -> FloatValue,
{
    fn value(&self, x: FloatValue) -> FloatValue {
        self(x)
    }
}

/// Sigmoid fit for the share of non-renewable heating in Germany,
/// 2025–2045 (BMWK long-term scenarios).
pub fn non_renewable_heating_trend() -> impl TrendFunction {
    let amplitude = 88.71710115840355;
    let steepness = -3.348762256837263;
    let midpoint = 0.4505688285851687;
    move |x: FloatValue| amplitude / (1.0 + (-steepness * (x - midpoint)).exp())
}

/// Sinusoidal fit for the share of non-renewable electricity in Germany,
/// 2025–2045 (Agora Industrie 2024 projection).
pub fn non_renewable_electricity_trend() -> impl TrendFunction {
    let amplitude = 36.10080564331148;
    let frequency = 0.3155578919710513;
    let phase = 3.058151974258264;
    let offset = 39.54060321870498;
    move |x: FloatValue| amplitude * (frequency * x + phase).sin() + offset
}

/// Cubic fit for the embodied emission intensity of German construction,
/// 2025–2045 (Agora Industrie 2024 projection).
pub fn embodied_carbon_trend() -> impl TrendFunction {
    move |x: FloatValue| {
        -85.68522642828206 * x.powi(3) + 182.2869409438485 * x.powi(2) - 138.8758533234043 * x
            + 47.363212824263705
    }
}

/// Weighted combination of one or two trend functions:
/// `Z(x) = (1 - w)·f(x) + w·g(x)`.
pub struct BlendedTrend {
    weight: FloatValue,
    primary: Box<dyn TrendFunction>,
    secondary: Option<Box<dyn TrendFunction>>,
}

impl BlendedTrend {
    /// A single trend; equivalent to a blend with weight zero.
    pub fn single(primary: impl TrendFunction + 'static) -> Self {
        Self {
            weight: 0.0,
            primary: Box::new(primary),
            secondary: None,
        }
    }

    /// Blend two trends with the given weight on the secondary trend.
    ///
    /// Weight zero reproduces the primary trend exactly.
    pub fn blended(
        weight: FloatValue,
        primary: impl TrendFunction + 'static,
        secondary: impl TrendFunction + 'static,
    ) -> BudgetResult<Self> {
        if !(0.0..=1.0).contains(&weight) {
            return Err(BudgetError::InvalidParameter {
                name: "weight",
                reason: "must be in [0, 1]",
                value: weight,
            });
        }
        Ok(Self {
            weight,
            primary: Box::new(primary),
            secondary: Some(Box::new(secondary)),
        })
    }

    /// The German operational-emissions blend: heating and electricity
    /// trends weighted by the electricity share.
    pub fn german_operational(weight: FloatValue) -> BudgetResult<Self> {
        Self::blended(
            weight,
            non_renewable_heating_trend(),
            non_renewable_electricity_trend(),
        )
    }

    /// The German embodied-emissions trend.
    pub fn german_embodied() -> Self {
        Self::single(embodied_carbon_trend())
    }

    pub fn weight(&self) -> FloatValue {
        self.weight
    }

    /// Evaluate the blend at normalized time `x`.
    pub fn value(&self, x: FloatValue) -> FloatValue {
        match &self.secondary {
            Some(secondary) => {
                (1.0 - self.weight) * self.primary.value(x) + self.weight * secondary.value(x)
            }
            None => self.primary.value(x),
        }
    }
}

impl fmt::Debug for BlendedTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlendedTrend")
            .field("weight", &self.weight)
            .field("components", &if self.secondary.is_some() { 2 } else { 1 })
            .finish()
    }
}

/// A solved dynamic budget curve `dynamic(t) = a + b·Z(t)`.
///
/// Produced by [`solve_dynamic_curve`]; the coefficients are immutable
/// once solved.
pub struct DynamicBudgetCurve {
    a: FloatValue,
    b: FloatValue,
    horizon: Horizon,
    trend: BlendedTrend,
}

impl DynamicBudgetCurve {
    /// Offset coefficient `a`.
    pub fn a(&self) -> FloatValue {
        self.a
    }

    /// Slope coefficient `b` applied to the trend.
    pub fn b(&self) -> FloatValue {
        self.b
    }

    pub fn horizon(&self) -> &Horizon {
        &self.horizon
    }

    /// Evaluate the curve at a point on the time axis (calendar years,
    /// fractional values allowed).
    pub fn value_at(&self, t: FloatValue) -> FloatValue {
        self.a + self.b * self.trend.value(self.horizon.normalise(t))
    }

    /// Dense per-year table of the curve over the horizon.
    pub fn series(&self) -> AnnualSeries {
        let values: Vec<FloatValue> = self
            .horizon
            .years()
            .map(|year| self.value_at(year as FloatValue))
            .collect();
        AnnualSeries::for_horizon(&self.horizon, values.into())
    }

    /// Recompute both constraints from the solved curve and check them
    /// against the requested values.
    fn verify(&self, end_start_ratio: FloatValue, target_integral: FloatValue) -> BudgetResult<()> {
        let t_min = self.horizon.start_year() as FloatValue;
        let t_max = self.horizon.end_year() as FloatValue;

        let start_value = self.value_at(t_min);
        let end_value = self.value_at(t_max);
        let achieved_ratio = end_value / start_value;
        if !achieved_ratio.is_finite()
            || !is_close!(achieved_ratio, end_start_ratio, rel_tol = VERIFICATION_REL_TOL)
        {
            return Err(BudgetError::UnsolvableConstraint(format!(
                "end/start ratio verification failed: required {end_start_ratio:.6}, \
                 solved curve gives {achieved_ratio:.6}"
            )));
        }

        let achieved_integral = integrate(|t| self.value_at(t), t_min, t_max, DEFAULT_TOLERANCE);
        if !is_close!(
            achieved_integral,
            target_integral,
            rel_tol = VERIFICATION_REL_TOL
        ) {
            return Err(BudgetError::UnsolvableConstraint(format!(
                "budget conservation verification failed: target integral {target_integral:.6}, \
                 solved curve integrates to {achieved_integral:.6}"
            )));
        }

        debug!(
            "verified dynamic curve: ratio {:.4} (target {:.4}), integral {:.4} (target {:.4})",
            achieved_ratio, end_start_ratio, achieved_integral, target_integral
        );
        Ok(())
    }
}

impl fmt::Debug for DynamicBudgetCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicBudgetCurve")
            .field("a", &self.a)
            .field("b", &self.b)
            .field("horizon", &self.horizon)
            .finish()
    }
}

/// Solve for the affine coefficients `(a, b)` that rescale a trend into a
/// budget-conserving, ratio-constrained dynamic curve.
///
/// # Arguments
///
/// * `horizon` - Analysis period; `Z` is evaluated on its normalized time
/// * `trend` - The (blended) shape function `Z`
/// * `end_start_ratio` - Required `dynamic(t_max) / dynamic(t_min)`, in (0, 1)
/// * `target_integral` - Required `∫ dynamic(t) dt` over the horizon
///
/// # Errors
///
/// [`BudgetError::InvalidParameter`] for a degenerate horizon or an
/// out-of-domain ratio or target;
/// [`BudgetError::UnsolvableConstraint`] when the closed-form denominator
/// is singular (nearly constant trend) or the post-solve verification
/// fails.
pub fn solve_dynamic_curve(
    horizon: Horizon,
    trend: BlendedTrend,
    end_start_ratio: FloatValue,
    target_integral: FloatValue,
) -> BudgetResult<DynamicBudgetCurve> {
    horizon.validate()?;
    if !(end_start_ratio > 0.0 && end_start_ratio < 1.0) {
        return Err(BudgetError::InvalidParameter {
            name: "end_start_ratio",
            reason: "must be in (0, 1)",
            value: end_start_ratio,
        });
    }
    if !(target_integral > 0.0) || !target_integral.is_finite() {
        return Err(BudgetError::InvalidParameter {
            name: "target_integral",
            reason: "must be positive and finite",
            value: target_integral,
        });
    }

    let z0 = trend.value(0.0);
    let z1 = trend.value(1.0);
    let i_z = integrate(
        |t| trend.value(horizon.normalise(t)),
        horizon.start_year() as FloatValue,
        horizon.end_year() as FloatValue,
        DEFAULT_TOLERANCE,
    );

    // Boundary condition: a + b*Z1 = ratio * (a + b*Z0)
    //   => a = b * [-(Z1 - ratio*Z0)] / (1 - ratio)
    let numerator = -(z1 - end_start_ratio * z0);
    let slope_term = numerator / (1.0 - end_start_ratio);

    // Integral condition: a * span + b * I_Z = I_target
    let denominator = slope_term * horizon.span() + i_z;
    let scale = i_z.abs().max(z0.abs()).max(1.0);
    if !denominator.is_finite() || denominator.abs() <= 1e-9 * scale {
        return Err(BudgetError::UnsolvableConstraint(format!(
            "singular integral condition (denominator {denominator:.3e}); \
             the trend is too close to constant for the requested ratio"
        )));
    }

    let b = target_integral / denominator;
    let a = b * slope_term;

    debug!(
        "solved dynamic curve: a = {:.6}, b = {:.6} (Z0 = {:.3}, Z1 = {:.3}, I_Z = {:.3})",
        a, b, z0, z1, i_z
    );

    let curve = DynamicBudgetCurve {
        a,
        b,
        horizon,
        trend,
    };
    curve.verify(end_start_ratio, target_integral)?;
    Ok(curve)
}
