//! Unit catalog seam and the in-memory standard catalog.
//!
//! The engine only ever asks a catalog two questions: which units have a
//! given dimensional formula, and which unit is the coherent SI unit for a
//! dimension tag. Both are pure lookups from the engine's point of view.
//!
//! # Symbol Resolution
//!
//! [`StandardCatalog::lookup_symbol`] resolves a symbol in two steps:
//!
//! 1. Exact match first (handles reserved symbols: m, mol, Pa, cd, etc.)
//! 2. If that fails and the symbol is not reserved, split off an SI prefix
//!    and match the remainder against an unprefixed catalog unit
//!
//! ```rust
//! use metrology::catalog::StandardCatalog;
//! use metrology_types::Prefix;
//!
//! let catalog = StandardCatalog::new();
//! let km = catalog.lookup_symbol("km").unwrap();
//! assert_eq!(km.factors()[0].prefix(), Prefix::Kilo);
//!
//! let mol = catalog.lookup_symbol("mol").unwrap();
//! assert_eq!(mol.factors()[0].prefix(), Prefix::Si);
//! ```

use indexmap::IndexMap;
use metrology_types::{DimensionTag, Prefix, Rational, UnitSystem};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::error::{Error, Result};
use crate::formula::DimensionalFormula;
use crate::unit::{CompositeUnit, ElementaryTerm, NamedUnitFactor, UnitKind};

/// Catalog lookups consumed by the engine.
pub trait UnitCatalog {
    /// Units whose dimensional formula equals `formula`, in catalog order.
    fn units_with_formula(&self, formula: &DimensionalFormula) -> Vec<CompositeUnit>;

    /// Coherent SI unit for `tag`, if the catalog has one.
    fn si_unit_for(&self, tag: DimensionTag) -> Option<CompositeUnit>;
}

/// Which catalog units formula queries return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFilter {
    /// A unit is listed only if every factor belongs to one of these systems.
    pub systems: Vec<UnitSystem>,
    /// List units with a non-neutral prefix (km, kPa).
    pub include_prefixed: bool,
}

impl CatalogFilter {
    /// Filter restricted to `systems`.
    pub fn systems(systems: impl IntoIterator<Item = UnitSystem>) -> Self {
        Self {
            systems: systems.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_prefixed(mut self, include_prefixed: bool) -> Self {
        self.include_prefixed = include_prefixed;
        self
    }

    pub fn allows(&self, unit: &CompositeUnit) -> bool {
        unit.factors().iter().all(|factor| {
            self.systems.contains(&factor.system())
                && (self.include_prefixed || factor.prefix().is_neutral())
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.systems.is_empty() {
            return Err(Error::InvalidConfig(
                "catalog.systems must name at least one unit system".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CatalogFilter {
    fn default() -> Self {
        Self {
            systems: UnitSystem::ALL.to_vec(),
            include_prefixed: true,
        }
    }
}

/// Symbols that must NOT be decomposed with prefix parsing.
///
/// These are checked before attempting prefix decomposition to avoid
/// ambiguity (e.g., 'm' = metre, not milli-something).
const RESERVED_SYMBOLS: &[&str] = &[
    "m", "kg", "s", "K", "A", "mol", "cd", "rad", "N", "J", "W", "Pa", "Hz", "C", "V", "min",
    "h", "day", "g", "ft", "mi", "in", "lb", "bit", "B", "ratio",
];

/// In-memory catalog indexed by dimensional formula.
///
/// Units are kept in registration order, so formula queries return them in
/// the order they were inserted.
#[derive(Debug, Clone, Default)]
pub struct StandardCatalog {
    filter: CatalogFilter,
    by_formula: IndexMap<DimensionalFormula, Vec<CompositeUnit>>,
    by_symbol: IndexMap<String, CompositeUnit>,
    si_units: IndexMap<DimensionTag, CompositeUnit>,
}

impl StandardCatalog {
    /// Catalog pre-populated with the standard units and the default filter.
    pub fn new() -> Self {
        let mut catalog = Self::empty();
        for tag in DimensionTag::ALL {
            catalog.register_si(tag, base_unit(tag));
        }
        for unit in standard_units() {
            if let Err(err) = catalog.insert(unit) {
                warn!(%err, "skipping standard catalog entry");
            }
        }
        catalog
    }

    /// Catalog with no units.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: CatalogFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn filter(&self) -> &CatalogFilter {
        &self.filter
    }

    /// Add a unit, indexed by its formula and its display symbol.
    pub fn insert(&mut self, unit: CompositeUnit) -> Result<&mut Self> {
        let formula = DimensionalFormula::of(&unit)?;
        self.by_symbol.insert(unit.to_string(), unit.clone());
        self.by_formula.entry(formula).or_default().push(unit);
        Ok(self)
    }

    /// Register the coherent SI unit for `tag` and list it as a catalog unit.
    pub fn register_si(&mut self, tag: DimensionTag, unit: CompositeUnit) -> &mut Self {
        if let Err(err) = self.insert(unit.clone()) {
            warn!(%err, %tag, "SI unit not indexed by formula");
        }
        self.si_units.insert(tag, unit);
        self
    }

    /// Number of registered units.
    pub fn len(&self) -> usize {
        self.by_formula.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_formula.is_empty()
    }

    /// Every registered unit in registration order, unfiltered.
    pub fn units(&self) -> impl Iterator<Item = &CompositeUnit> {
        self.by_formula.values().flatten()
    }

    /// Resolve a unit symbol, with SI prefix support.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownSymbol`] when neither an exact nor a prefixed match exists.
    pub fn lookup_symbol(&self, symbol: &str) -> Result<CompositeUnit> {
        if let Some(unit) = self.by_symbol.get(symbol) {
            return Ok(unit.clone());
        }

        if !RESERVED_SYMBOLS.contains(&symbol) {
            if let Some((prefix, rest)) = Prefix::split(symbol) {
                if let Some(base) = self.by_symbol.get(rest) {
                    if let [factor] = base.factors() {
                        if factor.prefix().is_neutral() && factor.exponent() == Rational::ONE {
                            let prefixed = factor.clone().with_prefix(prefix);
                            return Ok(CompositeUnit::single(prefixed).with_kind(base.kind().clone()));
                        }
                    }
                }
            }
        }

        Err(Error::UnknownSymbol(symbol.to_string()))
    }
}

impl UnitCatalog for StandardCatalog {
    fn units_with_formula(&self, formula: &DimensionalFormula) -> Vec<CompositeUnit> {
        let units: Vec<CompositeUnit> = self
            .by_formula
            .get(formula)
            .into_iter()
            .flatten()
            .filter(|unit| self.filter.allows(unit))
            .cloned()
            .collect();
        trace!(formula = %formula, matches = units.len(), "catalog formula lookup");
        units
    }

    fn si_unit_for(&self, tag: DimensionTag) -> Option<CompositeUnit> {
        self.si_units.get(&tag).cloned()
    }
}

fn named(
    symbol: &str,
    name: &str,
    kind: &str,
    terms: &[(DimensionTag, i64)],
) -> NamedUnitFactor {
    NamedUnitFactor::new(
        symbol,
        name,
        UnitKind::quantity(kind),
        terms
            .iter()
            .map(|&(tag, exponent)| ElementaryTerm::new(tag, Rational::integer(exponent)))
            .collect(),
    )
}

/// Coherent SI unit for one dimension tag.
fn base_unit(tag: DimensionTag) -> CompositeUnit {
    let name = match tag {
        DimensionTag::Length => "metre",
        DimensionTag::Mass => "kilogram",
        DimensionTag::Time => "second",
        DimensionTag::Current => "ampere",
        DimensionTag::Temperature => "kelvin",
        DimensionTag::Amount => "mole",
        DimensionTag::LuminousIntensity => "candela",
        DimensionTag::Angle => "radian",
        DimensionTag::Currency => "currency unit",
        DimensionTag::Information => "bit",
        DimensionTag::Ratio => "ratio",
    };
    CompositeUnit::single(named(tag.base_symbol(), name, tag.name(), &[(tag, 1)]))
}

/// Everything in the standard catalog besides the SI base units.
fn standard_units() -> Vec<CompositeUnit> {
    use DimensionTag::*;

    let degree_scale = Rational::new(10_909_893_763, 625_090_867_556);

    let factors = vec![
        // SI derived
        named("N", "newton", "force", &[(Mass, 1), (Length, 1), (Time, -2)]),
        named("J", "joule", "energy", &[(Mass, 1), (Length, 2), (Time, -2)]),
        named("W", "watt", "power", &[(Mass, 1), (Length, 2), (Time, -3)]),
        named("Pa", "pascal", "pressure", &[(Mass, 1), (Length, -1), (Time, -2)]),
        named("Hz", "hertz", "frequency", &[(Time, -1)]),
        named("C", "coulomb", "charge", &[(Current, 1), (Time, 1)]),
        named("V", "volt", "voltage", &[(Mass, 1), (Length, 2), (Time, -3), (Current, -1)]),
        // Prefixed SI
        named("m", "kilometre", "length", &[(Length, 1)]).with_prefix(Prefix::Kilo),
        named("m", "centimetre", "length", &[(Length, 1)]).with_prefix(Prefix::Centi),
        named("m", "millimetre", "length", &[(Length, 1)]).with_prefix(Prefix::Milli),
        named("s", "millisecond", "time", &[(Time, 1)]).with_prefix(Prefix::Milli),
        named("J", "kilojoule", "energy", &[(Mass, 1), (Length, 2), (Time, -2)])
            .with_prefix(Prefix::Kilo),
        named("W", "kilowatt", "power", &[(Mass, 1), (Length, 2), (Time, -3)])
            .with_prefix(Prefix::Kilo),
        named("Pa", "kilopascal", "pressure", &[(Mass, 1), (Length, -1), (Time, -2)])
            .with_prefix(Prefix::Kilo),
        // Accepted metric
        named("g", "gram", "mass", &[(Mass, 1)])
            .with_system(UnitSystem::Metric)
            .with_scale(Rational::new(1, 1000)),
        named("L", "litre", "volume", &[(Length, 3)])
            .with_system(UnitSystem::Metric)
            .with_scale(Rational::new(1, 1000)),
        named("min", "minute", "time", &[(Time, 1)])
            .with_system(UnitSystem::Metric)
            .with_scale(Rational::integer(60)),
        named("h", "hour", "time", &[(Time, 1)])
            .with_system(UnitSystem::Metric)
            .with_scale(Rational::integer(3_600)),
        named("day", "day", "time", &[(Time, 1)])
            .with_system(UnitSystem::Metric)
            .with_scale(Rational::integer(86_400)),
        named("°C", "degree Celsius", "temperature", &[(Temperature, 1)])
            .with_system(UnitSystem::Metric)
            .with_offset(273.15),
        // Imperial and US customary
        named("in", "inch", "length", &[(Length, 1)])
            .with_system(UnitSystem::Imperial)
            .with_scale(Rational::new(127, 5_000)),
        named("ft", "foot", "length", &[(Length, 1)])
            .with_system(UnitSystem::Imperial)
            .with_scale(Rational::new(381, 1_250)),
        named("mi", "mile", "length", &[(Length, 1)])
            .with_system(UnitSystem::Imperial)
            .with_scale(Rational::new(201_168, 125)),
        named("lb", "pound", "mass", &[(Mass, 1)])
            .with_system(UnitSystem::Imperial)
            .with_scale(Rational::new(45_359_237, 100_000_000)),
        named("°F", "degree Fahrenheit", "temperature", &[(Temperature, 1)])
            .with_system(UnitSystem::UsCustomary)
            .with_scale(Rational::new(5, 9))
            .with_offset(459.67 * 5.0 / 9.0),
        // Non-physical
        named("°", "degree", "angle", &[(Angle, 1)])
            .with_system(UnitSystem::Other)
            .with_scale(degree_scale),
        named("B", "byte", "information", &[(Information, 1)])
            .with_system(UnitSystem::Other)
            .with_scale(Rational::integer(8)),
        named("%", "percent", "ratio", &[(Ratio, 1)])
            .with_system(UnitSystem::Other)
            .with_scale(Rational::new(1, 100)),
    ];

    factors.into_iter().map(CompositeUnit::single).collect()
}
