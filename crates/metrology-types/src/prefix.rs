//! Decimal SI prefixes
//!
//! Every prefix is a power of ten. [`Prefix::Si`] is the neutral prefix
//! (multiplier 1) carried by unprefixed units.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A decimal scale multiplier applied to a named unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Prefix {
    Yocto,
    Zepto,
    Atto,
    Femto,
    Pico,
    Nano,
    Micro,
    Milli,
    Centi,
    Deci,
    /// Neutral prefix, multiplier 1.
    #[default]
    Si,
    Deca,
    Hecto,
    Kilo,
    Mega,
    Giga,
    Tera,
    Peta,
    Exa,
    Zetta,
    Yotta,
}

/// `(prefix, symbol, power of ten)`, ordered by scale.
const PREFIX_TABLE: &[(Prefix, &str, i32)] = &[
    (Prefix::Yotta, "Y", 24),
    (Prefix::Zetta, "Z", 21),
    (Prefix::Exa, "E", 18),
    (Prefix::Peta, "P", 15),
    (Prefix::Tera, "T", 12),
    (Prefix::Giga, "G", 9),
    (Prefix::Mega, "M", 6),
    (Prefix::Kilo, "k", 3),
    (Prefix::Hecto, "h", 2),
    (Prefix::Deca, "da", 1),
    (Prefix::Si, "", 0),
    (Prefix::Deci, "d", -1),
    (Prefix::Centi, "c", -2),
    (Prefix::Milli, "m", -3),
    (Prefix::Micro, "μ", -6),
    (Prefix::Nano, "n", -9),
    (Prefix::Pico, "p", -12),
    (Prefix::Femto, "f", -15),
    (Prefix::Atto, "a", -18),
    (Prefix::Zepto, "z", -21),
    (Prefix::Yocto, "y", -24),
];

impl Prefix {
    /// All prefixes, ordered from largest to smallest scale.
    pub fn all() -> impl Iterator<Item = Prefix> {
        PREFIX_TABLE.iter().map(|&(prefix, _, _)| prefix)
    }

    fn entry(self) -> (&'static str, i32) {
        PREFIX_TABLE
            .iter()
            .find(|(p, _, _)| *p == self)
            .map(|&(_, symbol, exp)| (symbol, exp))
            .unwrap_or(("", 0))
    }

    /// Decimal exponent of the multiplier (`Kilo` → 3).
    pub fn power_of_ten(self) -> i32 {
        self.entry().1
    }

    /// Multiplier value; strictly positive for every prefix.
    ///
    /// ```rust
    /// use metrology_types::Prefix;
    ///
    /// assert_eq!(Prefix::Kilo.multiplier(), 1000.0);
    /// assert_eq!(Prefix::Si.multiplier(), 1.0);
    /// assert!(Prefix::Yocto.multiplier() > 0.0);
    /// ```
    pub fn multiplier(self) -> f64 {
        10.0_f64.powi(self.power_of_ten())
    }

    /// Prefix symbol; empty for the neutral prefix.
    pub fn symbol(self) -> &'static str {
        self.entry().0
    }

    pub fn is_neutral(self) -> bool {
        self == Prefix::Si
    }

    /// Parse a prefix symbol. ASCII `u` is accepted as a fallback for `μ`.
    pub fn from_symbol(symbol: &str) -> Option<Prefix> {
        if symbol == "u" {
            return Some(Prefix::Micro);
        }
        PREFIX_TABLE
            .iter()
            .find(|(_, s, _)| !s.is_empty() && *s == symbol)
            .map(|&(prefix, _, _)| prefix)
    }

    /// Split a leading prefix off `symbol`.
    ///
    /// Two-character prefixes are tried first (`da` before `d`), and the
    /// remainder must be non-empty.
    ///
    /// ```rust
    /// use metrology_types::Prefix;
    ///
    /// assert_eq!(Prefix::split("km"), Some((Prefix::Kilo, "m")));
    /// assert_eq!(Prefix::split("dam"), Some((Prefix::Deca, "m")));
    /// assert_eq!(Prefix::split("μs"), Some((Prefix::Micro, "s")));
    /// assert_eq!(Prefix::split("k"), None);
    /// ```
    pub fn split(symbol: &str) -> Option<(Prefix, &str)> {
        let candidates = PREFIX_TABLE
            .iter()
            .filter(|(_, s, _)| s.chars().count() == 2)
            .chain(PREFIX_TABLE.iter().filter(|(_, s, _)| s.chars().count() == 1));

        for &(prefix, s, _) in candidates {
            if let Some(rest) = symbol.strip_prefix(s).filter(|rest| !rest.is_empty()) {
                return Some((prefix, rest));
            }
        }

        symbol
            .strip_prefix('u')
            .filter(|rest| !rest.is_empty())
            .map(|rest| (Prefix::Micro, rest))
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
