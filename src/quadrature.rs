//! Numerical quadrature.
//!
//! Deterministic adaptive Simpson integration for definite integrals of
//! scalar functions. No randomized sampling: repeated runs with identical
//! inputs are bit-identical.

use crate::timeseries::FloatValue;

/// Default absolute tolerance, comfortably tighter than the 1e-3
/// verification tolerance of the dynamic curve solver.
pub const DEFAULT_TOLERANCE: FloatValue = 1e-9;

/// Maximum bisection depth of the adaptive refinement.
const MAX_DEPTH: u32 = 40;

/// Simpson's rule on `[a, b]` with pre-evaluated endpoint and midpoint
/// values.
fn simpson(a: FloatValue, b: FloatValue, fa: FloatValue, fm: FloatValue, fb: FloatValue) -> FloatValue {
    (b - a) / 6.0 * (fa + 4.0 * fm + fb)
}

fn adaptive<F: Fn(FloatValue) -> FloatValue>(
    f: &F,
    a: FloatValue,
    b: FloatValue,
    fa: FloatValue,
    fm: FloatValue,
    fb: FloatValue,
    whole: FloatValue,
    tolerance: FloatValue,
    depth: u32,
) -> FloatValue {
    let m = 0.5 * (a + b);
    let left_mid = 0.5 * (a + m);
    let right_mid = 0.5 * (m + b);
    let f_left_mid = f(left_mid);
    let f_right_mid = f(right_mid);

    let left = simpson(a, m, fa, f_left_mid, fm);
    let right = simpson(m, b, fm, f_right_mid, fb);
    let refined = left + right;
    let delta = refined - whole;

    // Richardson criterion: the refinement error of the composite estimate
    // is delta / 15
    if depth == 0 || delta.abs() <= 15.0 * tolerance {
        return refined + delta / 15.0;
    }

    adaptive(f, a, m, fa, f_left_mid, fm, left, 0.5 * tolerance, depth - 1)
        + adaptive(f, m, b, fm, f_right_mid, fb, right, 0.5 * tolerance, depth - 1)
}

/// Definite integral of `f` over `[lo, hi]` by adaptive Simpson quadrature
/// to an absolute tolerance.
///
/// # Panics
///
/// Panics if the bounds are not finite with `hi > lo`, or if the tolerance
/// is not positive.
///
/// # Example
/// ```
/// use building_budget::quadrature::integrate;
///
/// let integral = integrate(|x| x * x, 0.0, 3.0, 1e-10);
/// assert!((integral - 9.0).abs() < 1e-9);
/// ```
pub fn integrate<F: Fn(FloatValue) -> FloatValue>(
    f: F,
    lo: FloatValue,
    hi: FloatValue,
    tolerance: FloatValue,
) -> FloatValue {
    assert!(lo.is_finite() && hi.is_finite(), "bounds must be finite");
    assert!(hi > lo, "upper bound must exceed lower bound");
    assert!(tolerance > 0.0, "tolerance must be positive");

    let fa = f(lo);
    let fb = f(hi);
    let m = 0.5 * (lo + hi);
    let fm = f(m);
    let whole = simpson(lo, hi, fa, fm, fb);

    adaptive(&f, lo, hi, fa, fm, fb, whole, tolerance, MAX_DEPTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant() {
        let integral = integrate(|_| 2.5, 0.0, 4.0, 1e-10);
        assert!((integral - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_polynomial_is_exact() {
        // Simpson is exact for cubics even without refinement
        let integral = integrate(|x| x * x * x - 2.0 * x + 1.0, -1.0, 2.0, 1e-10);
        // antiderivative: x^4/4 - x^2 + x
        let exact = (4.0 - 4.0 + 2.0) - (0.25 - 1.0 - 1.0);
        assert!((integral - exact).abs() < 1e-9);
    }

    #[test]
    fn test_transcendental() {
        let integral = integrate(|x| x.sin(), 0.0, std::f64::consts::PI, 1e-10);
        assert!((integral - 2.0).abs() < 1e-8, "got {}", integral);
    }

    #[test]
    fn test_sigmoid_over_horizon_scale() {
        // Shape comparable to the fitted heating trend over a 20 year span
        let f = |t: f64| {
            let x = (t - 2025.0) / 20.0;
            88.7 / (1.0 + (3.35 * (x - 0.45)).exp())
        };
        let integral = integrate(f, 2025.0, 2045.0, 1e-9);
        // Bounded by the plateau value times the span
        assert!(integral > 0.0 && integral < 88.7 * 20.0);

        // Halving the interval twice and summing agrees with the whole
        let split = integrate(f, 2025.0, 2035.0, 1e-9) + integrate(f, 2035.0, 2045.0, 1e-9);
        assert!((integral - split).abs() < 1e-6, "{} vs {}", integral, split);
    }

    #[test]
    fn test_deterministic() {
        let f = |x: f64| (x * 1.3).cos() * x.exp();
        let first = integrate(f, 0.0, 2.0, 1e-10);
        let second = integrate(f, 0.0, 2.0, 1e-10);
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    #[should_panic(expected = "upper bound must exceed lower bound")]
    fn test_reversed_bounds_panic() {
        let _ = integrate(|x| x, 1.0, 0.0, 1e-10);
    }

    #[test]
    #[should_panic(expected = "tolerance must be positive")]
    fn test_non_positive_tolerance_panics() {
        let _ = integrate(|x| x, 0.0, 1.0, 0.0);
    }
}
