//! Error types for rice irrigation setup and stepping
//!
//! Setup errors are fatal configuration problems and are never retried. Map
//! errors come from the map-loading collaborator and are passed through
//! unchanged.

use thiserror::Error;

/// Failures reported by a [`MapSource`](crate::grid::MapSource)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MapError {
    /// The requested map is not known to the source
    #[error("Map '{0}' not found")]
    NotFound(String),

    /// The map does not cover the active cells of the model mask
    #[error("Map '{name}' has {found} cells, expected {expected}")]
    ShapeMismatch {
        /// Map name as requested by the engine
        name: String,
        /// Number of active cells in the mask
        expected: usize,
        /// Number of cells delivered by the source
        found: usize,
    },
}

/// Errors raised by the rice irrigation engine
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RiceError {
    /// Rice irrigation was requested without water use accounting
    #[error(
        "riceIrrigation option is ON but wateruse option is OFF: \
         rice irrigation abstractions must be booked in the water use module"
    )]
    WaterUseRequired,

    /// Schedule lead days or daily share are unusable
    #[error("Invalid rice schedule: {0}")]
    InvalidSchedule(String),

    /// Parameter map could not be loaded
    #[error(transparent)]
    Map(#[from] MapError),

    /// A per-cell array does not match the number of active cells
    #[error("Input '{name}' has {found} cells, expected {expected}")]
    ShapeMismatch {
        /// Name of the offending input
        name: &'static str,
        /// Expected cell count
        expected: usize,
        /// Actual cell count
        found: usize,
    },

    /// A class-indexed input has no layer for the selected class
    #[error("Input '{name}' has {available} classes, class index {index} requested")]
    MissingClass {
        /// Name of the offending input
        name: &'static str,
        /// Requested vegetation or land-use index
        index: usize,
        /// Number of class layers present
        available: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_water_use_message_names_both_flags() {
        let msg = RiceError::WaterUseRequired.to_string();
        assert!(msg.contains("riceIrrigation"));
        assert!(msg.contains("wateruse"));
    }

    #[test]
    fn test_map_error_passes_through() {
        let err: RiceError = MapError::NotFound("RiceFlooding".to_string()).into();
        assert_eq!(err.to_string(), "Map 'RiceFlooding' not found");
    }
}
