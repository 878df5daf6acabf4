//! Component parameters.
//!
//! One parameter struct per component, each with documented defaults from
//! the published German building-stock calibration and a `validate` method
//! performing the domain checks. Parameters are plain immutable
//! configuration: every calculation receives its own copy, so a sweep over
//! many parameter combinations cannot leak one scenario's configuration
//! into another.

mod allocation;
mod curve;
mod intensity;
mod stock;

pub use allocation::{AllocationParameters, GlobalBudgetEntry, GlobalBudgetTable};
pub use curve::CurveConstraints;
pub use intensity::IntensityParameters;
pub use stock::StockParameters;
