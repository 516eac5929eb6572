//! Model options and rice season schedule
//!
//! [`ModelContext`] is built once by the host and passed to setup; there is no
//! process-wide settings or mask state.

use crate::calendar::DAYS_PER_YEAR;
use crate::error::RiceError;
use crate::grid::CellMask;
use serde::{Deserialize, Serialize};

/// Settings-file options read by this module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelOptions {
    /// `riceIrrigation`: compute paddy rice demand
    pub rice_irrigation: bool,
    /// `wateruse`: water use accounting, required by rice irrigation
    #[serde(rename = "wateruse")]
    pub water_use: bool,
}

impl ModelOptions {
    /// Options with rice irrigation and water use both switched on
    #[must_use]
    pub const fn rice_enabled() -> Self {
        Self {
            rice_irrigation: true,
            water_use: true,
        }
    }

    /// Check option coupling
    ///
    /// # Errors
    ///
    /// Returns [`RiceError::WaterUseRequired`] if rice irrigation is on while
    /// water use is off.
    pub fn validate(&self) -> Result<(), RiceError> {
        if self.rice_irrigation && !self.water_use {
            return Err(RiceError::WaterUseRequired);
        }
        Ok(())
    }
}

/// Lead times of the paddy rice season phases
///
/// Saturation runs from `saturation_lead_days` to `flooding_lead_days` before
/// planting, flooding from there to planting. Constant-level growth runs from
/// planting to `dry_down_lead_days` before harvest; drainage runs the last
/// `drainage_lead_days` before harvest. Saturation and drainage volumes are
/// spread over their windows with `daily_share` per day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiceSchedule {
    /// Days before planting when soil saturation starts
    pub saturation_lead_days: f64,
    /// Days before planting when flooding starts
    pub flooding_lead_days: f64,
    /// Days before harvest when the water level is no longer maintained
    pub dry_down_lead_days: f64,
    /// Days before harvest when drainage starts
    pub drainage_lead_days: f64,
    /// Share of the saturation/drainage volume applied per day
    pub daily_share: f64,
}

impl Default for RiceSchedule {
    fn default() -> Self {
        Self {
            saturation_lead_days: 20.0,
            flooding_lead_days: 10.0,
            dry_down_lead_days: 20.0,
            drainage_lead_days: 10.0,
            daily_share: 0.1,
        }
    }
}

impl RiceSchedule {
    /// Reject schedules whose windows cannot be ordered within a year
    ///
    /// # Errors
    ///
    /// Returns [`RiceError::InvalidSchedule`] describing the first problem.
    pub fn validate(&self) -> Result<(), RiceError> {
        let leads = [
            ("saturation_lead_days", self.saturation_lead_days),
            ("flooding_lead_days", self.flooding_lead_days),
            ("dry_down_lead_days", self.dry_down_lead_days),
            ("drainage_lead_days", self.drainage_lead_days),
        ];
        for (name, days) in leads {
            if !days.is_finite() || !(0.0..DAYS_PER_YEAR).contains(&days) {
                return Err(RiceError::InvalidSchedule(format!(
                    "{name} must be in [0, {DAYS_PER_YEAR}), got {days}"
                )));
            }
        }
        if self.flooding_lead_days >= self.saturation_lead_days {
            return Err(RiceError::InvalidSchedule(format!(
                "flooding lead ({}) must be shorter than saturation lead ({})",
                self.flooding_lead_days, self.saturation_lead_days
            )));
        }
        if self.drainage_lead_days >= self.dry_down_lead_days {
            return Err(RiceError::InvalidSchedule(format!(
                "drainage lead ({}) must be shorter than dry-down lead ({})",
                self.drainage_lead_days, self.dry_down_lead_days
            )));
        }
        if self.daily_share.is_nan() || self.daily_share <= 0.0 || self.daily_share > 1.0 {
            return Err(RiceError::InvalidSchedule(format!(
                "daily_share must be in (0, 1], got {}",
                self.daily_share
            )));
        }
        Ok(())
    }
}

/// Grid mask and options shared by setup and stepping
#[derive(Debug, Clone, PartialEq)]
pub struct ModelContext {
    /// Active-cell mask
    pub mask: CellMask,
    /// Settings options
    pub options: ModelOptions,
}

impl ModelContext {
    /// Bundle a mask with options
    #[must_use]
    pub fn new(mask: CellMask, options: ModelOptions) -> Self {
        Self { mask, options }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_are_off() {
        let opts = ModelOptions::default();
        assert!(!opts.rice_irrigation);
        assert!(!opts.water_use);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_rice_without_water_use_rejected() {
        let opts = ModelOptions {
            rice_irrigation: true,
            water_use: false,
        };
        assert_eq!(opts.validate(), Err(RiceError::WaterUseRequired));
        assert!(ModelOptions::rice_enabled().validate().is_ok());

        // Water use alone is fine
        let opts = ModelOptions {
            rice_irrigation: false,
            water_use: true,
        };
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_default_schedule_is_valid() {
        let schedule = RiceSchedule::default();
        assert!(schedule.validate().is_ok());
        assert_eq!(schedule.saturation_lead_days, 20.0);
        assert_eq!(schedule.drainage_lead_days, 10.0);
        assert_eq!(schedule.daily_share, 0.1);
    }

    #[test]
    fn test_schedule_rejects_unordered_leads() {
        let flipped = RiceSchedule {
            flooding_lead_days: 25.0,
            ..RiceSchedule::default()
        };
        assert!(matches!(
            flipped.validate(),
            Err(RiceError::InvalidSchedule(_))
        ));

        let year_long = RiceSchedule {
            dry_down_lead_days: 365.0,
            ..RiceSchedule::default()
        };
        assert!(year_long.validate().is_err());

        let no_share = RiceSchedule {
            daily_share: 0.0,
            ..RiceSchedule::default()
        };
        assert!(no_share.validate().is_err());
    }
}
