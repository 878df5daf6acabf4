//! Per-floor-area GHG emission budgets for a national building stock.
//!
//! This crate estimates how much greenhouse-gas emission budget per square
//! meter of floor area is available each year between a horizon start year
//! and a climate-neutrality target year, consistent with a finite global
//! carbon budget.
//!
//! # Module Organisation
//!
//! - `allocator`: global budget → national, sector- and category-specific
//!   absolute budget
//! - `stock`: year-by-year floor-area simulation under construction,
//!   demolition and renovation rates
//! - `intensity`: constant-basis ("static") per-area budgets
//! - `curve`: the dynamic budget curve solver, shaped by empirical decline
//!   trends while conserving the static budget integral
//! - `scenario`: composition of one full parameterization into results
//!
//! # Parameters
//!
//! Each component has an associated parameters struct in the `parameters`
//! module with defaults matching the published German building-stock
//! calibration.
//!
//! # Example
//!
//! ```
//! use building_budget::curve::BlendedTrend;
//! use building_budget::parameters::CurveConstraints;
//! use building_budget::{EmissionCategory, Scenario};
//!
//! let results = Scenario::default().run()?;
//! let constraints = CurveConstraints::embodied();
//! let curve = results.solve_dynamic(
//!     EmissionCategory::Embodied,
//!     BlendedTrend::german_embodied(),
//!     &constraints,
//! )?;
//!
//! for (year, value) in curve.series().iter() {
//!     println!("{year}: {value:.2} kg CO2e/(m^2 a)");
//! }
//! # Ok::<(), building_budget::BudgetError>(())
//! ```

pub mod allocator;
pub mod curve;
pub mod intensity;
pub mod parameters;
pub mod quadrature;
pub mod scenario;
pub mod stock;
pub mod timeseries;

pub mod errors;

pub use allocator::{BudgetAllocator, EmissionCategory};
pub use errors::{BudgetError, BudgetResult};
pub use scenario::{Scenario, ScenarioResults};
pub use timeseries::{AnnualSeries, FloatValue, Horizon, Year};
