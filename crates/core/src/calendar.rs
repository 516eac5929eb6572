//! Day-of-year arithmetic for the paddy rice season
//!
//! Days are day-of-year values on a 365-day calendar (no leap years). Season
//! markers are derived from planting and harvest days by subtracting lead
//! times and wrapping negative results into the previous year.
//!
//! Windows are half-open (`start <= day < end`) and are evaluated as-is: a
//! window whose start falls after its end once wrapped (e.g. planting on day
//! 5, or harvest numerically before planting) never matches any day.

use crate::config::RiceSchedule;
use serde::{Deserialize, Serialize};

/// Length of the model year in days
pub const DAYS_PER_YEAR: f64 = 365.0;

/// `day - offset`, shifted by one year when negative
///
/// `wrap_day(offset, offset)` is 0, not 365.
#[inline]
#[must_use]
pub fn wrap_day(day: f64, offset: f64) -> f64 {
    let shifted = day - offset;
    if shifted < 0.0 {
        DAYS_PER_YEAR + shifted
    } else {
        shifted
    }
}

/// Half-open membership test `start <= day < end`
#[inline]
#[must_use]
pub fn in_window(day: f64, start: f64, end: f64) -> bool {
    day >= start && day < end
}

/// Position of a cell within its rice season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RicePhase {
    /// Outside the season
    Idle,
    /// Soil saturation before flooding
    Saturating,
    /// Flooding of the field before planting
    Flooding,
    /// Constant water level during growth
    Growing,
    /// Water level left to fall before drainage
    DryDown,
    /// Drainage to field capacity before harvest
    Draining,
}

impl RicePhase {
    /// All phases in season order
    pub const ALL: [RicePhase; 6] = [
        RicePhase::Idle,
        RicePhase::Saturating,
        RicePhase::Flooding,
        RicePhase::Growing,
        RicePhase::DryDown,
        RicePhase::Draining,
    ];

    /// Stable index (position in [`ALL`](Self::ALL))
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Idle => 0,
            Self::Saturating => 1,
            Self::Flooding => 2,
            Self::Growing => 3,
            Self::DryDown => 4,
            Self::Draining => 5,
        }
    }
}

/// Planting/harvest days of one cell with derived phase boundaries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Season {
    /// Planting day
    pub planting: f64,
    /// Harvest day
    pub harvest: f64,
    /// Start of soil saturation
    pub saturation_start: f64,
    /// Start of flooding
    pub flooding_start: f64,
    /// End of constant-level growth
    pub dry_down_start: f64,
    /// Start of drainage
    pub drainage_start: f64,
}

impl Season {
    /// Derive phase boundaries from planting and harvest day
    #[must_use]
    pub fn new(planting: f64, harvest: f64, schedule: &RiceSchedule) -> Self {
        Self {
            planting,
            harvest,
            saturation_start: wrap_day(planting, schedule.saturation_lead_days),
            flooding_start: wrap_day(planting, schedule.flooding_lead_days),
            dry_down_start: wrap_day(harvest, schedule.dry_down_lead_days),
            drainage_start: wrap_day(harvest, schedule.drainage_lead_days),
        }
    }

    /// Soil saturation window `[saturation_start, flooding_start)`
    #[inline]
    #[must_use]
    pub fn is_saturating(&self, day: f64) -> bool {
        in_window(day, self.saturation_start, self.flooding_start)
    }

    /// Flooding window `[flooding_start, planting)`
    #[inline]
    #[must_use]
    pub fn is_flooding(&self, day: f64) -> bool {
        in_window(day, self.flooding_start, self.planting)
    }

    /// Growth window `[planting, dry_down_start)`
    #[inline]
    #[must_use]
    pub fn is_growing(&self, day: f64) -> bool {
        in_window(day, self.planting, self.dry_down_start)
    }

    /// Dry-down window `[dry_down_start, drainage_start)`
    #[inline]
    #[must_use]
    pub fn is_drying(&self, day: f64) -> bool {
        in_window(day, self.dry_down_start, self.drainage_start)
    }

    /// Drainage window `[drainage_start, harvest)`
    #[inline]
    #[must_use]
    pub fn is_draining(&self, day: f64) -> bool {
        in_window(day, self.drainage_start, self.harvest)
    }

    /// Phase on `day`
    ///
    /// Windows only overlap for badly wrapped seasons; the later phase wins.
    #[must_use]
    pub fn phase(&self, day: f64) -> RicePhase {
        if self.is_draining(day) {
            RicePhase::Draining
        } else if self.is_growing(day) {
            RicePhase::Growing
        } else if self.is_flooding(day) {
            RicePhase::Flooding
        } else if self.is_saturating(day) {
            RicePhase::Saturating
        } else if self.is_drying(day) {
            RicePhase::DryDown
        } else {
            RicePhase::Idle
        }
    }

    /// Whether any phase window is empty or starts after it ends once wrapped
    ///
    /// Such a window never matches, so that phase is skipped for the cell.
    /// A season shorter than the dry-down lead time has an empty growth window.
    #[must_use]
    pub fn has_inverted_window(&self) -> bool {
        self.saturation_start >= self.flooding_start
            || self.flooding_start >= self.planting
            || self.planting >= self.dry_down_start
            || self.dry_down_start >= self.drainage_start
            || self.drainage_start >= self.harvest
    }
}
