//! Unit systems recognized by the catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of unit systems a named unit can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    /// International System of Units
    Si,
    /// Metric units accepted for use with SI (litre, hour, degree Celsius)
    Metric,
    /// British imperial units
    Imperial,
    /// United States customary units
    UsCustomary,
    /// Centimetre-gram-second system
    Cgs,
    /// Natural and atomic units
    Natural,
    /// Anything else (currency, information, ratios)
    Other,
}

impl UnitSystem {
    pub const ALL: [UnitSystem; 7] = [
        UnitSystem::Si,
        UnitSystem::Metric,
        UnitSystem::Imperial,
        UnitSystem::UsCustomary,
        UnitSystem::Cgs,
        UnitSystem::Natural,
        UnitSystem::Other,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            UnitSystem::Si => "SI",
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
            UnitSystem::UsCustomary => "US customary",
            UnitSystem::Cgs => "CGS",
            UnitSystem::Natural => "natural",
            UnitSystem::Other => "other",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
