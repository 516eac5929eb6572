//! Per-step views of the surrounding model's state
//!
//! All inputs are borrowed for one step. Class-indexed inputs are resolved to
//! the rice layer and length-checked before any cell is touched.

use crate::core_types::{CellField, ClassFields, VegetationSelector};
use crate::error::RiceError;

/// Soil water content of the combined top layer (1a + 1b), in mm
#[derive(Debug, Clone, Copy)]
pub struct SoilMoisture<'a> {
    /// Actual water content, per vegetation
    pub w1: &'a ClassFields,
    /// Saturated water content, per land use
    pub ws1: &'a ClassFields,
    /// Water content at field capacity, per land use
    pub wfc1: &'a ClassFields,
}

/// Evaporation terms already computed this step, in mm
#[derive(Debug, Clone, Copy)]
pub struct Evaporation<'a> {
    /// Actual soil evaporation, per vegetation
    pub es_act: &'a ClassFields,
    /// Actual transpiration, per vegetation
    pub ta: &'a ClassFields,
    /// Reference open-water evaporation
    pub ew_ref: &'a CellField,
}

/// Area fractions of each cell
#[derive(Debug, Clone, Copy)]
pub struct Fractions<'a> {
    /// Fraction under paddy rice
    pub rice: &'a CellField,
    /// Fraction under each vegetation class
    pub soil: &'a ClassFields,
}

/// Depth/volume conversion factors
#[derive(Debug, Clone, Copy)]
pub struct Conversion<'a> {
    /// mm over the cell area to m3
    pub mm_to_m3: &'a CellField,
    /// m3 to mm over the cell area
    pub m3_to_mm: &'a CellField,
    /// Time step length in days
    pub dt_day: f64,
}

/// Everything the engine reads in one step
#[derive(Debug, Clone, Copy)]
pub struct StepInputs<'a> {
    /// Current day of year per cell
    pub calendar_day: &'a CellField,
    /// Soil water state
    pub soil: SoilMoisture<'a>,
    /// Evaporation terms
    pub evaporation: Evaporation<'a>,
    /// Area fractions
    pub fractions: Fractions<'a>,
    /// Unit conversion
    pub conversion: Conversion<'a>,
}

/// Input slices resolved to the rice layers
#[derive(Debug, Clone, Copy)]
pub(crate) struct CellSlices<'a> {
    pub calendar_day: &'a [f64],
    pub w1: &'a [f64],
    pub ws1: &'a [f64],
    pub wfc1: &'a [f64],
    pub es_act: &'a [f64],
    pub ta: &'a [f64],
    pub ew_ref: &'a [f64],
    pub rice_fraction: &'a [f64],
    pub soil_fraction: &'a [f64],
    pub mm_to_m3: &'a [f64],
    pub m3_to_mm: &'a [f64],
    pub dt_day: f64,
}

impl<'a> StepInputs<'a> {
    /// Pick the rice layers and check every array covers `expected` cells
    pub(crate) fn select(
        &self,
        selector: VegetationSelector,
        expected: usize,
    ) -> Result<CellSlices<'a>, RiceError> {
        let veg = selector.vegetation_index();
        let land_use = selector.land_use_index();
        Ok(CellSlices {
            calendar_day: cells("CalendarDay", self.calendar_day, expected)?,
            w1: layer("W1", self.soil.w1, veg, expected)?,
            ws1: layer("WS1", self.soil.ws1, land_use, expected)?,
            wfc1: layer("WFC1", self.soil.wfc1, land_use, expected)?,
            es_act: layer("ESAct", self.evaporation.es_act, veg, expected)?,
            ta: layer("Ta", self.evaporation.ta, veg, expected)?,
            ew_ref: cells("EWRef", self.evaporation.ew_ref, expected)?,
            rice_fraction: cells("RiceFraction", self.fractions.rice, expected)?,
            soil_fraction: layer("SoilFraction", self.fractions.soil, veg, expected)?,
            mm_to_m3: cells("MMtoM3", self.conversion.mm_to_m3, expected)?,
            m3_to_mm: cells("M3toMM", self.conversion.m3_to_mm, expected)?,
            dt_day: self.conversion.dt_day,
        })
    }
}

fn cells<'a>(
    name: &'static str,
    field: &'a CellField,
    expected: usize,
) -> Result<&'a [f64], RiceError> {
    if field.len() != expected {
        return Err(RiceError::ShapeMismatch {
            name,
            expected,
            found: field.len(),
        });
    }
    Ok(field.as_slice())
}

fn layer<'a>(
    name: &'static str,
    fields: &'a ClassFields,
    index: usize,
    expected: usize,
) -> Result<&'a [f64], RiceError> {
    let field = fields.class(index).ok_or(RiceError::MissingClass {
        name,
        index,
        available: fields.class_count(),
    })?;
    cells(name, field, expected)
}
