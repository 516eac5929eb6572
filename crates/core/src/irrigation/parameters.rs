//! Per-cell paddy rice parameters loaded at setup

use crate::calendar::Season;
use crate::config::RiceSchedule;
use crate::core_types::CellField;
use crate::error::MapError;
use crate::grid::{load_checked, MapSource};
use serde::{Deserialize, Serialize};

/// Daily water layer applied while flooding (mm/day)
pub const RICE_FLOODING: &str = "RiceFlooding";
/// Daily percolation loss below flooded fields (mm/day)
pub const RICE_PERCOLATION: &str = "RicePercolation";
/// Day of year of the first planting
pub const RICE_PLANTING_DAY_1: &str = "RicePlantingDay1";
/// Day of year of the first harvest
pub const RICE_HARVEST_DAY_1: &str = "RiceHarvestDay1";
/// Day of year of the second planting
pub const RICE_PLANTING_DAY_2: &str = "RicePlantingDay2";
/// Day of year of the second harvest
pub const RICE_HARVEST_DAY_2: &str = "RiceHarvestDay2";

/// Every map loaded when rice irrigation is on, in load order
pub const RICE_MAP_NAMES: [&str; 6] = [
    RICE_FLOODING,
    RICE_PERCOLATION,
    RICE_PLANTING_DAY_1,
    RICE_HARVEST_DAY_1,
    RICE_PLANTING_DAY_2,
    RICE_HARVEST_DAY_2,
];

/// Rice parameter maps, immutable for the run
///
/// The second planting/harvest pair is carried for a second rice cycle but is
/// not used by the demand calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiceParameters {
    /// Flooding rate (mm/day)
    pub flooding_rate: CellField,
    /// Percolation rate (mm/day)
    pub percolation_rate: CellField,
    /// First planting day of year
    pub planting_day_1: CellField,
    /// First harvest day of year
    pub harvest_day_1: CellField,
    /// Second planting day of year
    pub planting_day_2: CellField,
    /// Second harvest day of year
    pub harvest_day_2: CellField,
}

impl RiceParameters {
    /// Load all six maps from `source`
    ///
    /// # Errors
    ///
    /// Propagates the first map error, including maps that do not cover
    /// exactly `cell_count` cells.
    pub fn load<S: MapSource + ?Sized>(source: &S, cell_count: usize) -> Result<Self, MapError> {
        Ok(Self {
            flooding_rate: load_checked(source, RICE_FLOODING, cell_count)?,
            percolation_rate: load_checked(source, RICE_PERCOLATION, cell_count)?,
            planting_day_1: load_checked(source, RICE_PLANTING_DAY_1, cell_count)?,
            harvest_day_1: load_checked(source, RICE_HARVEST_DAY_1, cell_count)?,
            planting_day_2: load_checked(source, RICE_PLANTING_DAY_2, cell_count)?,
            harvest_day_2: load_checked(source, RICE_HARVEST_DAY_2, cell_count)?,
        })
    }

    /// Number of cells covered
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.flooding_rate.len()
    }

    /// Season boundaries of the first rice cycle for every cell
    #[must_use]
    pub fn first_cycle_seasons(&self, schedule: &RiceSchedule) -> Vec<Season> {
        self.planting_day_1
            .as_slice()
            .iter()
            .zip(self.harvest_day_1.as_slice())
            .map(|(&planting, &harvest)| Season::new(planting, harvest, schedule))
            .collect()
    }
}
