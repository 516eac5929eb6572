//! Paddy Rice Irrigation Core Library
//!
//! Per-cell paddy rice water demand for a distributed hydrological model.
//! For every time step and grid cell the engine works out where the cell is
//! in its rice season (soil saturation, flooding, constant-level growth,
//! dry-down, drainage), computes the surface water volume that has to be
//! abstracted, and returns drainage and percolation water to the upper soil
//! zone.
//!
//! The surrounding model owns soil moisture, evaporation, land-use fractions,
//! the calendar and water use accounting. It passes them in as borrowed
//! per-cell fields each step.

// Calendar and configuration
pub mod calendar;
pub mod config;

// Core types and grid plumbing
pub mod core_types;
pub mod error;
pub mod grid;

// Demand engine
pub mod irrigation;

// Re-export core types
pub use calendar::{wrap_day, RicePhase, Season, DAYS_PER_YEAR};
pub use config::{ModelContext, ModelOptions, RiceSchedule};
pub use core_types::{CellField, ClassFields, LandUse, Vegetation, VegetationSelector};
pub use error::{MapError, RiceError};
pub use grid::{CellMask, InMemoryMaps, MapSource};

// Re-export engine types
pub use irrigation::{
    Conversion, Evaporation, Fractions, PhaseDemand, RiceIrrigation, RiceParameters, SoilMoisture,
    StepInputs, StepSummary,
};
