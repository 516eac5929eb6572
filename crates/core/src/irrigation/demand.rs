//! Paddy rice water demand of a single cell
//!
//! Water needed for paddy rice is split into season phases:
//! 1. soil saturation before flooding
//! 2. flooding of the field, plus open-water evaporation
//! 3. constant water level during growth: open-water evaporation and
//!    percolation losses
//! 4. dry-down: the water layer is left to evaporate
//! 5. drainage down to field capacity before harvest
//!
//! Every term is a volume per time step (m3). A term is exactly zero outside
//! its phase window.

use super::inputs::CellSlices;
use crate::calendar::Season;
use crate::config::RiceSchedule;

/// Inputs of one cell for one step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellInputs {
    /// Day of year
    pub calendar_day: f64,
    /// Flooding rate (mm/day)
    pub flooding_rate: f64,
    /// Percolation rate (mm/day)
    pub percolation_rate: f64,
    /// Actual water content of the top layer (mm)
    pub w1: f64,
    /// Saturated water content of the top layer (mm)
    pub ws1: f64,
    /// Field-capacity water content of the top layer (mm)
    pub wfc1: f64,
    /// Actual soil evaporation (mm)
    pub es_act: f64,
    /// Actual transpiration (mm)
    pub ta: f64,
    /// Reference open-water evaporation (mm)
    pub ew_ref: f64,
    /// Fraction of the cell under rice
    pub rice_fraction: f64,
    /// mm to m3 over the cell area
    pub mm_to_m3: f64,
    /// Time step length (days)
    pub dt_day: f64,
}

impl CellSlices<'_> {
    /// Gather the inputs of `cell`
    #[inline]
    pub(crate) fn cell(
        &self,
        cell: usize,
        flooding_rate: f64,
        percolation_rate: f64,
    ) -> CellInputs {
        CellInputs {
            calendar_day: self.calendar_day[cell],
            flooding_rate,
            percolation_rate,
            w1: self.w1[cell],
            ws1: self.ws1[cell],
            wfc1: self.wfc1[cell],
            es_act: self.es_act[cell],
            ta: self.ta[cell],
            ew_ref: self.ew_ref[cell],
            rice_fraction: self.rice_fraction[cell],
            mm_to_m3: self.mm_to_m3[cell],
            dt_day: self.dt_day,
        }
    }
}

/// Volumes of each phase term for one cell and step (m3)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhaseDemand {
    /// Soil saturation
    pub saturation: f64,
    /// Flooding, including open-water evaporation
    pub flooding: f64,
    /// Open-water evaporation during growth
    pub evaporation: f64,
    /// Percolation during growth
    pub percolation: f64,
    /// Drainage before harvest
    pub drainage: f64,
}

impl PhaseDemand {
    /// Evaluate all phase terms for `cell` on its calendar day
    #[must_use]
    pub fn compute(season: &Season, cell: &CellInputs, schedule: &RiceSchedule) -> Self {
        let day = cell.calendar_day;
        let area = cell.rice_fraction * cell.mm_to_m3;

        let saturation_demand = (cell.ws1 - cell.w1) * area * cell.dt_day;
        let evaporation = evaporation_demand(cell.ew_ref, cell.es_act, cell.ta, area);
        let flooding_demand = cell.flooding_rate * area * cell.dt_day;
        let percolation_demand = cell.percolation_rate * area * cell.dt_day;
        let drainage_demand = (cell.ws1 - cell.wfc1) * area * cell.dt_day;

        let growing = season.is_growing(day);
        Self {
            saturation: select(
                season.is_saturating(day),
                schedule.daily_share * saturation_demand,
            ),
            flooding: select(season.is_flooding(day), flooding_demand + evaporation),
            evaporation: select(growing, evaporation),
            percolation: select(growing, percolation_demand),
            drainage: select(
                season.is_draining(day),
                schedule.daily_share * drainage_demand,
            ),
        }
    }

    /// Volume abstracted from surface water
    ///
    /// Drainage returns water to the soil and is not part of the demand.
    #[must_use]
    pub fn surface_abstraction(&self) -> f64 {
        self.saturation + self.flooding + self.evaporation + self.percolation
    }

    /// Volume passed on to the upper soil zone
    #[must_use]
    pub fn soil_return(&self) -> f64 {
        self.drainage + self.percolation
    }
}

/// Open-water evaporation not yet covered by soil evaporation and transpiration
///
/// `area` is rice fraction times mm-to-m3; the residual is floored at zero.
#[inline]
#[must_use]
pub fn evaporation_demand(ew_ref: f64, es_act: f64, ta: f64, area: f64) -> f64 {
    (ew_ref - (es_act + ta)).max(0.0) * area
}

/// Depth added to upper-zone storage for a returned volume
///
/// The volume is spread over the vegetation's share of the cell. Cells with no
/// share receive nothing.
#[inline]
#[must_use]
pub fn upper_zone_increment(volume_m3: f64, m3_to_mm: f64, soil_fraction: f64) -> f64 {
    if soil_fraction > 0.0 {
        volume_m3 * m3_to_mm / soil_fraction
    } else {
        0.0
    }
}

#[inline]
fn select(active: bool, value: f64) -> f64 {
    if active {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn season() -> Season {
        Season::new(100.0, 200.0, &RiceSchedule::default())
    }

    fn cell(day: f64) -> CellInputs {
        CellInputs {
            calendar_day: day,
            flooding_rate: 10.0,
            percolation_rate: 2.0,
            w1: 250.0,
            ws1: 300.0,
            wfc1: 200.0,
            es_act: 1.0,
            ta: 2.0,
            ew_ref: 5.0,
            rice_fraction: 0.5,
            mm_to_m3: 1000.0,
            dt_day: 1.0,
        }
    }

    #[test]
    fn test_saturation_phase() {
        let d = PhaseDemand::compute(&season(), &cell(85.0), &RiceSchedule::default());
        assert_relative_eq!(d.saturation, 2500.0);
        assert_eq!(d.flooding, 0.0);
        assert_eq!(d.evaporation, 0.0);
        assert_eq!(d.percolation, 0.0);
        assert_eq!(d.drainage, 0.0);
        assert_relative_eq!(d.surface_abstraction(), 2500.0);
    }

    #[test]
    fn test_flooding_phase_includes_evaporation() {
        let d = PhaseDemand::compute(&season(), &cell(95.0), &RiceSchedule::default());
        // 10 mm * 0.5 * 1000 + (5 - 3) * 0.5 * 1000
        assert_relative_eq!(d.flooding, 6000.0);
        assert_eq!(d.saturation, 0.0);
        assert_relative_eq!(d.surface_abstraction(), 6000.0);
        assert_eq!(d.soil_return(), 0.0);
    }

    #[test]
    fn test_growth_phase() {
        let d = PhaseDemand::compute(&season(), &cell(150.0), &RiceSchedule::default());
        assert_relative_eq!(d.evaporation, 1000.0);
        assert_relative_eq!(d.percolation, 1000.0);
        assert_relative_eq!(d.surface_abstraction(), 2000.0);
        assert_relative_eq!(d.soil_return(), 1000.0);
    }

    #[test]
    fn test_dry_down_has_no_demand() {
        let d = PhaseDemand::compute(&season(), &cell(185.0), &RiceSchedule::default());
        assert_eq!(d, PhaseDemand::default());
    }

    #[test]
    fn test_drainage_goes_to_soil_only() {
        let d = PhaseDemand::compute(&season(), &cell(195.0), &RiceSchedule::default());
        // 0.1 * (300 - 200) * 0.5 * 1000
        assert_relative_eq!(d.drainage, 5000.0);
        assert_eq!(d.surface_abstraction(), 0.0);
        assert_relative_eq!(d.soil_return(), 5000.0);
    }

    #[test]
    fn test_evaporation_residual_floored() {
        assert_eq!(evaporation_demand(2.0, 1.5, 1.5, 500.0), 0.0);
        assert_relative_eq!(evaporation_demand(4.0, 1.5, 1.5, 500.0), 500.0);
    }

    #[test]
    fn test_evaporation_not_scaled_by_step_length() {
        let mut c = cell(150.0);
        c.dt_day = 0.5;
        let d = PhaseDemand::compute(&season(), &c, &RiceSchedule::default());
        assert_relative_eq!(d.evaporation, 1000.0);
        assert_relative_eq!(d.percolation, 500.0);
    }

    #[test]
    fn test_upper_zone_increment_guards_zero_fraction() {
        assert_eq!(upper_zone_increment(1000.0, 0.001, 0.0), 0.0);
        assert_relative_eq!(upper_zone_increment(1000.0, 0.001, 0.5), 2.0);
    }
}
