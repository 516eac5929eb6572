//! Core types and utilities

pub mod field;
pub mod vegetation;

pub use field::{CellField, ClassFields};
pub use vegetation::{LandUse, Vegetation, VegetationSelector};
