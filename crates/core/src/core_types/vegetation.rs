//! Land-use and vegetation classes
//!
//! Soil-state layers are indexed either by vegetation class (water content,
//! evaporation, soil fraction, upper-zone storage) or by the land use the
//! vegetation belongs to (saturated and field-capacity water content).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Land-use class owning soil hydraulic properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LandUse {
    /// Forested area
    Forest,
    /// Irrigated agriculture
    Irrigated,
    /// All remaining vegetated area, including paddy rice
    Other,
}

impl LandUse {
    /// All land-use classes in layer order
    pub const ALL: [LandUse; 3] = [LandUse::Forest, LandUse::Irrigated, LandUse::Other];

    /// Layer index of this land use
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Forest => 0,
            Self::Irrigated => 1,
            Self::Other => 2,
        }
    }

    /// Settings label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Forest => "Forest",
            Self::Irrigated => "Irrigated",
            Self::Other => "Other",
        }
    }
}

/// Vegetation class used to index per-vegetation soil states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vegetation {
    /// Forest vegetation
    Forest,
    /// Irrigated crops with prescribed parameters
    IrrigatedPrescribed,
    /// Rainfed crops with prescribed parameters (hosts paddy rice)
    RainfedPrescribed,
}

impl Vegetation {
    /// All vegetation classes in layer order
    pub const ALL: [Vegetation; 3] = [
        Vegetation::Forest,
        Vegetation::IrrigatedPrescribed,
        Vegetation::RainfedPrescribed,
    ];

    /// Layer index of this vegetation class
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Forest => 0,
            Self::IrrigatedPrescribed => 1,
            Self::RainfedPrescribed => 2,
        }
    }

    /// Settings label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Forest => "Forest",
            Self::IrrigatedPrescribed => "Irrigated_prescribed",
            Self::RainfedPrescribed => "Rainfed_prescribed",
        }
    }

    /// Land use the vegetation belongs to
    #[must_use]
    pub const fn land_use(self) -> LandUse {
        match self {
            Self::Forest => LandUse::Forest,
            Self::IrrigatedPrescribed => LandUse::Irrigated,
            Self::RainfedPrescribed => LandUse::Other,
        }
    }

    /// Parse a settings label (case-insensitive)
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for Vegetation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Resolved layer indices for one vegetation class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VegetationSelector {
    /// Vegetation class
    pub vegetation: Vegetation,
    /// Land use of that vegetation
    pub land_use: LandUse,
}

impl VegetationSelector {
    /// Resolve the layer indices for `vegetation`
    #[must_use]
    pub const fn resolve(vegetation: Vegetation) -> Self {
        Self {
            vegetation,
            land_use: vegetation.land_use(),
        }
    }

    /// Selector for paddy rice, which is simulated on rainfed prescribed land
    #[must_use]
    pub const fn paddy_rice() -> Self {
        Self::resolve(Vegetation::RainfedPrescribed)
    }

    /// Index into vegetation-indexed layers
    #[must_use]
    pub const fn vegetation_index(&self) -> usize {
        self.vegetation.index()
    }

    /// Index into land-use-indexed layers
    #[must_use]
    pub const fn land_use_index(&self) -> usize {
        self.land_use.index()
    }
}
