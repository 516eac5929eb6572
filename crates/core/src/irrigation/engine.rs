//! Rice irrigation engine: setup and per-step evaluation

use super::demand::{upper_zone_increment, PhaseDemand};
use super::inputs::StepInputs;
use super::parameters::RiceParameters;
use crate::calendar::{RicePhase, Season};
use crate::config::{ModelContext, RiceSchedule};
use crate::core_types::{CellField, ClassFields, VegetationSelector};
use crate::error::RiceError;
use crate::grid::MapSource;
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Totals of one step, for the water use ledger and mass balance checks
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepSummary {
    /// Sum of surface water abstraction over all cells (m3)
    pub total_abstraction_m3: f64,
    /// Drainage and percolation deposited into the upper zone (m3)
    pub total_soil_return_m3: f64,
    /// Number of cells in each phase, indexed by [`RicePhase::index`]
    pub cells_per_phase: [usize; RicePhase::ALL.len()],
}

impl StepSummary {
    /// Number of cells in `phase`
    #[must_use]
    pub fn cells_in(&self, phase: RicePhase) -> usize {
        self.cells_per_phase[phase.index()]
    }

    /// Number of cells evaluated
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells_per_phase.iter().sum()
    }

    fn record(mut self, abstraction: f64, deposited: f64, phase: RicePhase) -> Self {
        self.total_abstraction_m3 += abstraction;
        self.total_soil_return_m3 += deposited;
        self.cells_per_phase[phase.index()] += 1;
        self
    }

    fn merge(mut self, other: Self) -> Self {
        self.total_abstraction_m3 += other.total_abstraction_m3;
        self.total_soil_return_m3 += other.total_soil_return_m3;
        for (a, b) in self.cells_per_phase.iter_mut().zip(other.cells_per_phase) {
            *a += b;
        }
        self
    }
}

/// Paddy rice irrigation demand for every cell of the grid
///
/// Holds the immutable rice parameters and the
/// `PaddyRiceWaterAbstractionFromSurfaceWaterM3` output field, which is
/// rewritten by every [`step`](Self::step).
#[derive(Debug, Clone)]
pub struct RiceIrrigation {
    schedule: RiceSchedule,
    selector: VegetationSelector,
    parameters: Option<RiceParameters>,
    seasons: Vec<Season>,
    abstraction: CellField,
}

impl RiceIrrigation {
    /// Set up the engine with the default rice schedule
    ///
    /// # Errors
    ///
    /// See [`with_schedule`](Self::with_schedule).
    pub fn initialize<S: MapSource + ?Sized>(
        ctx: &ModelContext,
        source: &S,
    ) -> Result<Self, RiceError> {
        Self::with_schedule(ctx, source, RiceSchedule::default())
    }

    /// Set up the engine
    ///
    /// With rice irrigation off nothing is loaded and the output stays zero
    /// for the whole run.
    ///
    /// # Errors
    ///
    /// - [`RiceError::WaterUseRequired`] if rice irrigation is on without
    ///   water use accounting
    /// - [`RiceError::InvalidSchedule`] for an unusable schedule
    /// - [`RiceError::Map`] for any map loading failure
    pub fn with_schedule<S: MapSource + ?Sized>(
        ctx: &ModelContext,
        source: &S,
        schedule: RiceSchedule,
    ) -> Result<Self, RiceError> {
        let abstraction = ctx.mask.in_zero();
        let selector = VegetationSelector::paddy_rice();

        if !ctx.options.rice_irrigation {
            info!("Rice irrigation disabled");
            return Ok(Self {
                schedule,
                selector,
                parameters: None,
                seasons: Vec::new(),
                abstraction,
            });
        }

        ctx.options.validate()?;
        schedule.validate()?;

        let parameters = RiceParameters::load(source, ctx.mask.active_count())?;
        let seasons = parameters.first_cycle_seasons(&schedule);

        let inverted = seasons.iter().filter(|s| s.has_inverted_window()).count();
        if inverted > 0 {
            warn!(
                "{} of {} rice cells have an empty or inverted season window; \
                 the affected phases never activate",
                inverted,
                seasons.len()
            );
        }

        info!(
            "Rice irrigation enabled: {} cells, vegetation '{}'",
            seasons.len(),
            selector.vegetation
        );

        Ok(Self {
            schedule,
            selector,
            parameters: Some(parameters),
            seasons,
            abstraction,
        })
    }

    /// Whether rice irrigation is computed
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.parameters.is_some()
    }

    /// Loaded rice parameters, `None` when disabled
    #[must_use]
    pub fn parameters(&self) -> Option<&RiceParameters> {
        self.parameters.as_ref()
    }

    /// Layer selector used for soil states
    #[must_use]
    pub fn selector(&self) -> VegetationSelector {
        self.selector
    }

    /// Schedule in use
    #[must_use]
    pub fn schedule(&self) -> &RiceSchedule {
        &self.schedule
    }

    /// `PaddyRiceWaterAbstractionFromSurfaceWaterM3` of the last step
    #[must_use]
    pub fn abstraction(&self) -> &CellField {
        &self.abstraction
    }

    /// Compute this step's demand and feed drainage and percolation to the
    /// upper zone
    ///
    /// Only the rice vegetation layer of `upper_zone` is modified, and each
    /// cell only ever increases.
    ///
    /// # Errors
    ///
    /// [`RiceError::ShapeMismatch`] or [`RiceError::MissingClass`] if an input
    /// does not cover the grid; nothing is written in that case.
    pub fn step(
        &mut self,
        inputs: &StepInputs<'_>,
        upper_zone: &mut ClassFields,
    ) -> Result<StepSummary, RiceError> {
        let Some(parameters) = self.parameters.as_ref() else {
            return Ok(StepSummary::default());
        };

        let cell_count = self.abstraction.len();
        let cells = inputs.select(self.selector, cell_count)?;

        let veg = self.selector.vegetation_index();
        let available = upper_zone.class_count();
        let uz = upper_zone.class_mut(veg).ok_or(RiceError::MissingClass {
            name: "UZ",
            index: veg,
            available,
        })?;
        if uz.len() != cell_count {
            return Err(RiceError::ShapeMismatch {
                name: "UZ",
                expected: cell_count,
                found: uz.len(),
            });
        }
        let uz = uz.as_mut_slice();

        let schedule = self.schedule;
        let seasons = &self.seasons;
        let flooding = parameters.flooding_rate.as_slice();
        let percolation = parameters.percolation_rate.as_slice();

        let summary = self
            .abstraction
            .as_mut_slice()
            .par_iter_mut()
            .zip(uz.par_iter_mut())
            .enumerate()
            .map(|(i, (out, uz_cell))| {
                let season = &seasons[i];
                let cell = cells.cell(i, flooding[i], percolation[i]);
                let demand = PhaseDemand::compute(season, &cell, &schedule);

                *out = demand.surface_abstraction();

                let soil_fraction = cells.soil_fraction[i];
                let deposited = if soil_fraction > 0.0 {
                    demand.soil_return()
                } else {
                    0.0
                };
                *uz_cell +=
                    upper_zone_increment(demand.soil_return(), cells.m3_to_mm[i], soil_fraction);

                (*out, deposited, season.phase(cell.calendar_day))
            })
            .fold(StepSummary::default, |acc, (abstraction, deposited, phase)| {
                acc.record(abstraction, deposited, phase)
            })
            .reduce(StepSummary::default, StepSummary::merge);

        debug!(
            "Rice step: {:.1} m3 abstracted, {:.1} m3 to soil, sat/flood/grow/drain {}/{}/{}/{}",
            summary.total_abstraction_m3,
            summary.total_soil_return_m3,
            summary.cells_in(RicePhase::Saturating),
            summary.cells_in(RicePhase::Flooding),
            summary.cells_in(RicePhase::Growing),
            summary.cells_in(RicePhase::Draining),
        );

        Ok(summary)
    }

    /// Phase of every cell on the given calendar days
    ///
    /// All cells are [`RicePhase::Idle`] when rice irrigation is disabled.
    ///
    /// # Errors
    ///
    /// [`RiceError::ShapeMismatch`] if `calendar_day` does not cover the grid.
    pub fn phase_map(&self, calendar_day: &CellField) -> Result<Vec<RicePhase>, RiceError> {
        let cell_count = self.abstraction.len();
        if calendar_day.len() != cell_count {
            return Err(RiceError::ShapeMismatch {
                name: "CalendarDay",
                expected: cell_count,
                found: calendar_day.len(),
            });
        }
        if !self.is_enabled() {
            return Ok(vec![RicePhase::Idle; cell_count]);
        }
        Ok(self
            .seasons
            .iter()
            .zip(calendar_day.as_slice())
            .map(|(season, &day)| season.phase(day))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelOptions;
    use crate::grid::{CellMask, InMemoryMaps};
    use crate::irrigation::parameters::RICE_MAP_NAMES;

    fn maps(len: usize) -> InMemoryMaps {
        let values = [10.0, 2.0, 100.0, 200.0, 220.0, 320.0];
        let mut maps = InMemoryMaps::new();
        for (name, value) in RICE_MAP_NAMES.into_iter().zip(values) {
            maps.insert_uniform(name, len, value);
        }
        maps
    }

    #[test]
    fn test_disabled_engine_loads_nothing() {
        let ctx = ModelContext::new(CellMask::all_active(2, 2), ModelOptions::default());
        let engine = RiceIrrigation::initialize(&ctx, &InMemoryMaps::new()).unwrap();
        assert!(!engine.is_enabled());
        assert!(engine.parameters().is_none());
        assert_eq!(engine.abstraction().len(), 4);
        assert_eq!(engine.abstraction().sum(), 0.0);
    }

    #[test]
    fn test_enabled_engine_requires_water_use() {
        let options = ModelOptions {
            rice_irrigation: true,
            water_use: false,
        };
        let ctx = ModelContext::new(CellMask::all_active(2, 1), options);
        let err = RiceIrrigation::initialize(&ctx, &maps(2)).unwrap_err();
        assert_eq!(err, RiceError::WaterUseRequired);
    }

    #[test]
    fn test_enabled_engine_loads_parameters() {
        let ctx = ModelContext::new(CellMask::all_active(3, 1), ModelOptions::rice_enabled());
        let engine = RiceIrrigation::initialize(&ctx, &maps(3)).unwrap();
        assert!(engine.is_enabled());
        assert_eq!(engine.parameters().map(RiceParameters::cell_count), Some(3));
        assert_eq!(engine.selector(), VegetationSelector::paddy_rice());
        assert_eq!(engine.abstraction().sum(), 0.0);
    }

    #[test]
    fn test_phase_map() {
        let ctx = ModelContext::new(CellMask::all_active(2, 1), ModelOptions::rice_enabled());
        let engine = RiceIrrigation::initialize(&ctx, &maps(2)).unwrap();
        let days = CellField::from_vec(vec![95.0, 195.0]);
        assert_eq!(
            engine.phase_map(&days).unwrap(),
            vec![RicePhase::Flooding, RicePhase::Draining]
        );
        assert!(engine.phase_map(&CellField::new(3)).is_err());
    }

    #[test]
    fn test_summary_merge() {
        let a = StepSummary::default().record(10.0, 1.0, RicePhase::Growing);
        let b = StepSummary::default().record(5.0, 0.0, RicePhase::Idle);
        let merged = a.merge(b);
        assert_eq!(merged.total_abstraction_m3, 15.0);
        assert_eq!(merged.total_soil_return_m3, 1.0);
        assert_eq!(merged.cells_in(RicePhase::Growing), 1);
        assert_eq!(merged.cell_count(), 2);
    }
}
