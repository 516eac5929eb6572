//! Paddy rice irrigation
//!
//! Computes, per cell and time step, the surface water volume needed to grow
//! paddy rice and returns drainage and percolation water to the upper soil
//! zone. The season schedule is derived from per-cell planting and harvest
//! days; no season state is stored between steps.
//!
//! # Example
//!
//! ```rust,ignore
//! use paddy_rice_core::{CellMask, ModelContext, ModelOptions, RiceIrrigation};
//!
//! let ctx = ModelContext::new(CellMask::all_active(100, 80), ModelOptions::rice_enabled());
//! let mut rice = RiceIrrigation::initialize(&ctx, &maps)?;
//! let summary = rice.step(&inputs, &mut upper_zone)?;
//! ```

pub mod demand;
mod engine;
mod inputs;
pub mod parameters;

pub use demand::{evaporation_demand, upper_zone_increment, CellInputs, PhaseDemand};
pub use engine::{RiceIrrigation, StepSummary};
pub use inputs::{Conversion, Evaporation, Fractions, SoilMoisture, StepInputs};
pub use parameters::{RiceParameters, RICE_MAP_NAMES};
