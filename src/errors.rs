use crate::timeseries::Year;
use thiserror::Error;

/// Error type for invalid inputs and failed solves.
///
/// All variants are deterministic, input-dependent conditions. There is no
/// transient/retryable class because the crate performs no I/O.
#[derive(Error, Debug)]
pub enum BudgetError {
    /// A share, rate, ratio or horizon bound is outside its valid domain.
    #[error("invalid parameter `{name}`: {reason} (got {value})")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
        value: f64,
    },
    /// The stock simulation produced a non-positive area for some year.
    ///
    /// This indicates a physically nonsensical parameter combination
    /// (e.g. demolition overwhelming construction) and is never replaced
    /// with a default value.
    #[error("non-positive {basis} area {area} m^2 in year {year}")]
    DegenerateArea {
        year: Year,
        basis: &'static str,
        area: f64,
    },
    /// The dynamic curve solve is singular or failed post-solve verification.
    #[error("unsolvable curve constraints: {0}")]
    UnsolvableConstraint(String),
}

/// Convenience type for `Result<T, BudgetError>`.
pub type BudgetResult<T> = Result<T, BudgetError>;
