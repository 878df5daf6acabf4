//! Annual series and analysis horizon.
//!
//! All per-year results of the crate (floor areas, static intensities,
//! dynamic intensities) are exposed as [`AnnualSeries`]: an ordered
//! year → value table over an inclusive year range, suitable for tabular
//! export or charting by a downstream reporting layer.

use crate::errors::{BudgetError, BudgetResult};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Scalar value used throughout the crate.
pub type FloatValue = f64;

/// Calendar year.
pub type Year = i32;

/// Analysis period from a start year up to and including the
/// climate-neutrality target year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Horizon {
    start_year: Year,
    end_year: Year,
}

impl Horizon {
    /// Create a horizon covering `[start_year, end_year]` inclusive.
    ///
    /// Fails with [`BudgetError::InvalidParameter`] unless
    /// `end_year > start_year`.
    pub fn new(start_year: Year, end_year: Year) -> BudgetResult<Self> {
        let horizon = Self {
            start_year,
            end_year,
        };
        horizon.validate()?;
        Ok(horizon)
    }

    /// Check the year range.
    ///
    /// A horizon restored through serde bypasses [`Horizon::new`] and can
    /// carry a degenerate range; every computation entry point re-checks.
    pub fn validate(&self) -> BudgetResult<()> {
        if self.end_year <= self.start_year {
            return Err(BudgetError::InvalidParameter {
                name: "end_year",
                reason: "must be greater than start_year",
                value: self.end_year as FloatValue,
            });
        }
        Ok(())
    }

    pub fn start_year(&self) -> Year {
        self.start_year
    }

    pub fn end_year(&self) -> Year {
        self.end_year
    }

    /// Number of years in the horizon, counting both endpoints.
    ///
    /// A 2025–2045 horizon has 21 years.
    pub fn n_years(&self) -> usize {
        (self.end_year - self.start_year + 1) as usize
    }

    /// Width of the horizon on the continuous time axis (`end - start`).
    pub fn span(&self) -> FloatValue {
        (self.end_year - self.start_year) as FloatValue
    }

    /// Iterate over every calendar year in the horizon, in order.
    pub fn years(&self) -> impl Iterator<Item = Year> {
        self.start_year..=self.end_year
    }

    /// Map a point on the time axis onto normalized time in `[0, 1]`.
    ///
    /// The start year maps to 0 and the end year to 1; values outside the
    /// horizon extrapolate linearly.
    pub fn normalise(&self, t: FloatValue) -> FloatValue {
        (t - self.start_year as FloatValue) / self.span()
    }
}

impl Default for Horizon {
    /// The published German calibration period: 2025 up to GHG neutrality
    /// in 2045.
    fn default() -> Self {
        Self {
            start_year: 2025,
            end_year: 2045,
        }
    }
}

/// An ordered year → value mapping with one entry per calendar year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualSeries {
    start_year: Year,
    values: Array1<FloatValue>,
}

impl AnnualSeries {
    /// Build a series starting at `start_year` with one value per
    /// subsequent year.
    pub fn from_values(start_year: Year, values: Array1<FloatValue>) -> Self {
        Self { start_year, values }
    }

    /// Build a series covering exactly one horizon.
    ///
    /// Panics if the number of values does not match the horizon length.
    pub fn for_horizon(horizon: &Horizon, values: Array1<FloatValue>) -> Self {
        assert_eq!(
            values.len(),
            horizon.n_years(),
            "series length must match horizon length"
        );
        Self::from_values(horizon.start_year(), values)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn start_year(&self) -> Year {
        self.start_year
    }

    /// Last year covered by the series.
    pub fn end_year(&self) -> Year {
        self.start_year + self.values.len() as Year - 1
    }

    /// Value for a calendar year, or `None` outside the covered range.
    pub fn get(&self, year: Year) -> Option<FloatValue> {
        if year < self.start_year {
            return None;
        }
        self.values.get((year - self.start_year) as usize).copied()
    }

    pub fn values(&self) -> &Array1<FloatValue> {
        &self.values
    }

    /// Arithmetic mean over all years, or `None` for an empty series.
    pub fn mean(&self) -> Option<FloatValue> {
        self.values.mean()
    }

    /// Iterate over `(year, value)` pairs in calendar order.
    pub fn iter(&self) -> impl Iterator<Item = (Year, FloatValue)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(move |(i, v)| (self.start_year + i as Year, *v))
    }
}
