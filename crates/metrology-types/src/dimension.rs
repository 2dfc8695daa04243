//! Elementary dimension tags
//!
//! The closed set of elementary dimensions every unit decomposes into. The
//! seven SI base dimensions are joined by four logical extensions (angle,
//! currency, information, ratio) which are tracked for type safety but are
//! not physical dimensions for homogeneity purposes.
//!
//! Declaration order is the canonical total order used when a dimensional
//! formula is sorted and rendered.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One elementary dimension.
///
/// `Ord` follows declaration order: Length < Mass < Time < ... < Ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionTag {
    /// Length (L) - base unit: metre (m)
    Length,
    /// Mass (M) - base unit: kilogram (kg)
    Mass,
    /// Time (T) - base unit: second (s)
    Time,
    /// Electric current (I) - base unit: ampere (A)
    Current,
    /// Thermodynamic temperature (Θ) - base unit: kelvin (K)
    Temperature,
    /// Amount of substance (N) - base unit: mole (mol)
    Amount,
    /// Luminous intensity (J) - base unit: candela (cd)
    LuminousIntensity,
    /// Plane angle - radian (rad), dimensionless in SI
    Angle,
    /// Money
    Currency,
    /// Information - bit
    Information,
    /// Pure ratio (percent, parts per million, ...)
    Ratio,
}

impl DimensionTag {
    /// Every tag in canonical order.
    pub const ALL: [DimensionTag; 11] = [
        DimensionTag::Length,
        DimensionTag::Mass,
        DimensionTag::Time,
        DimensionTag::Current,
        DimensionTag::Temperature,
        DimensionTag::Amount,
        DimensionTag::LuminousIntensity,
        DimensionTag::Angle,
        DimensionTag::Currency,
        DimensionTag::Information,
        DimensionTag::Ratio,
    ];

    /// Whether this tag takes part in homogeneity checks.
    ///
    /// Angle, currency, information and ratio are excluded.
    pub const fn is_physical(self) -> bool {
        !matches!(
            self,
            DimensionTag::Angle
                | DimensionTag::Currency
                | DimensionTag::Information
                | DimensionTag::Ratio
        )
    }

    /// Symbol of the coherent base unit for this dimension.
    pub const fn base_symbol(self) -> &'static str {
        match self {
            DimensionTag::Length => "m",
            DimensionTag::Mass => "kg",
            DimensionTag::Time => "s",
            DimensionTag::Current => "A",
            DimensionTag::Temperature => "K",
            DimensionTag::Amount => "mol",
            DimensionTag::LuminousIntensity => "cd",
            DimensionTag::Angle => "rad",
            DimensionTag::Currency => "¤",
            DimensionTag::Information => "bit",
            DimensionTag::Ratio => "ratio",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            DimensionTag::Length => "length",
            DimensionTag::Mass => "mass",
            DimensionTag::Time => "time",
            DimensionTag::Current => "current",
            DimensionTag::Temperature => "temperature",
            DimensionTag::Amount => "amount",
            DimensionTag::LuminousIntensity => "luminous intensity",
            DimensionTag::Angle => "angle",
            DimensionTag::Currency => "currency",
            DimensionTag::Information => "information",
            DimensionTag::Ratio => "ratio",
        }
    }
}

impl fmt::Display for DimensionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
