//! Shared fixtures for the integration tests
#![allow(dead_code)]

use paddy_rice_core::irrigation::parameters::{
    RICE_FLOODING, RICE_HARVEST_DAY_1, RICE_HARVEST_DAY_2, RICE_PERCOLATION, RICE_PLANTING_DAY_1,
    RICE_PLANTING_DAY_2,
};
use paddy_rice_core::{
    CellField, CellMask, ClassFields, Conversion, Evaporation, Fractions, InMemoryMaps,
    ModelContext, ModelOptions, SoilMoisture, StepInputs, Vegetation,
};

pub const CLASSES: usize = 3;
pub const RICE: usize = 2;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Rice parameter maps with the same values in every cell
pub fn uniform_maps(
    len: usize,
    flooding: f64,
    percolation: f64,
    planting: f64,
    harvest: f64,
) -> InMemoryMaps {
    let mut maps = InMemoryMaps::new();
    maps.insert_uniform(RICE_FLOODING, len, flooding)
        .insert_uniform(RICE_PERCOLATION, len, percolation)
        .insert_uniform(RICE_PLANTING_DAY_1, len, planting)
        .insert_uniform(RICE_HARVEST_DAY_1, len, harvest)
        .insert_uniform(RICE_PLANTING_DAY_2, len, 0.0)
        .insert_uniform(RICE_HARVEST_DAY_2, len, 0.0);
    maps
}

/// Context for a single row of `len` active cells
pub fn context(len: usize, options: ModelOptions) -> ModelContext {
    ModelContext::new(CellMask::all_active(len, 1), options)
}

/// Per-step state of the surrounding model
///
/// Defaults: `W1` = 250, `WS1` = 300, `WFC1` = 200 mm; `ESAct` = 1, `Ta` = 2,
/// `EWRef` = 5 mm; rice and soil fraction 0.5; 1000 m3 per mm; daily steps.
#[derive(Debug, Clone)]
pub struct ModelState {
    pub calendar_day: CellField,
    pub w1: ClassFields,
    pub ws1: ClassFields,
    pub wfc1: ClassFields,
    pub es_act: ClassFields,
    pub ta: ClassFields,
    pub ew_ref: CellField,
    pub rice_fraction: CellField,
    pub soil_fraction: ClassFields,
    pub mm_to_m3: CellField,
    pub m3_to_mm: CellField,
    pub dt_day: f64,
}

impl ModelState {
    pub fn uniform(len: usize) -> Self {
        assert_eq!(Vegetation::RainfedPrescribed.index(), RICE);
        Self {
            calendar_day: CellField::with_value(len, 1.0),
            w1: ClassFields::with_value(CLASSES, len, 250.0),
            ws1: ClassFields::with_value(CLASSES, len, 300.0),
            wfc1: ClassFields::with_value(CLASSES, len, 200.0),
            es_act: ClassFields::with_value(CLASSES, len, 1.0),
            ta: ClassFields::with_value(CLASSES, len, 2.0),
            ew_ref: CellField::with_value(len, 5.0),
            rice_fraction: CellField::with_value(len, 0.5),
            soil_fraction: ClassFields::with_value(CLASSES, len, 0.5),
            mm_to_m3: CellField::with_value(len, 1000.0),
            m3_to_mm: CellField::with_value(len, 0.001),
            dt_day: 1.0,
        }
    }

    pub fn set_day(&mut self, day: f64) {
        self.calendar_day.fill(day);
    }

    pub fn inputs(&self) -> StepInputs<'_> {
        StepInputs {
            calendar_day: &self.calendar_day,
            soil: SoilMoisture {
                w1: &self.w1,
                ws1: &self.ws1,
                wfc1: &self.wfc1,
            },
            evaporation: Evaporation {
                es_act: &self.es_act,
                ta: &self.ta,
                ew_ref: &self.ew_ref,
            },
            fractions: Fractions {
                rice: &self.rice_fraction,
                soil: &self.soil_fraction,
            },
            conversion: Conversion {
                mm_to_m3: &self.mm_to_m3,
                m3_to_mm: &self.m3_to_mm,
                dt_day: self.dt_day,
            },
        }
    }
}

/// Upper-zone value of the rice layer at `cell`
pub fn rice_uz(upper_zone: &ClassFields, cell: usize) -> f64 {
    upper_zone.class(RICE).map_or(f64::NAN, |f| f.get(cell))
}
