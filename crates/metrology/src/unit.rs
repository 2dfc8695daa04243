//! Unit data model
//!
//! Units are built from three layers:
//!
//! - [`ElementaryTerm`] - one [`DimensionTag`] raised to a rational exponent
//! - [`NamedUnitFactor`] - a concrete named unit (metre, kelvin, foot) with its
//!   affine relationship to SI and its own elementary decomposition
//! - [`CompositeUnit`] - a product of named factors, each at its own exponent
//!
//! Expressions over composite units are written with [`UnitExponentTerm`]
//! and [`EquationExpression`], which borrow the units they reference.
//!
//! # Affine Relationship
//!
//! One unit of a factor, taken at exponent 1, corresponds to
//! `prefix · (scale · x + offset)` SI base units:
//!
//! | Unit | Prefix | Scale | Offset |
//! |------|--------|-------|--------|
//! | metre (m) | 1 | 1 | 0 |
//! | kilometre (km) | 1000 | 1 | 0 |
//! | foot (ft) | 1 | 381/1250 | 0 |
//! | degree Celsius (°C) | 1 | 1 | 273.15 |
//!
//! # Ownership
//!
//! Catalog units are immutable templates. Every algebra operation clones the
//! factors it needs into a freshly built [`CompositeUnit`]; no operation takes
//! `&mut` to a template.

use metrology_types::superscript::format_symbol_exponent;
use metrology_types::{DimensionTag, Prefix, Rational, UnitSystem};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

/// One elementary dimension raised to a rational exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementaryTerm {
    pub tag: DimensionTag,
    /// Any rational, including zero and negative values.
    pub exponent: Rational,
}

impl ElementaryTerm {
    pub const fn new(tag: DimensionTag, exponent: Rational) -> Self {
        Self { tag, exponent }
    }

    /// `tag` at exponent 1.
    pub const fn base(tag: DimensionTag) -> Self {
        Self::new(tag, Rational::ONE)
    }

    /// Raise this term to `exponent` (exponents multiply).
    pub fn pow(&self, exponent: Rational) -> Result<ElementaryTerm> {
        Ok(Self::new(self.tag, self.exponent.checked_mul(exponent)?))
    }
}

/// Unit kind tag carried by composite units and their factors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    /// A catalog quantity kind ("length", "force", "temperature").
    Quantity(String),
    /// Produced by unit algebra.
    Derived,
    /// Synthesized for an expression with no catalog match.
    Unresolved,
}

impl UnitKind {
    pub fn quantity(name: impl Into<String>) -> Self {
        Self::Quantity(name.into())
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, UnitKind::Unresolved)
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitKind::Quantity(name) => f.write_str(name),
            UnitKind::Derived => f.write_str("derived"),
            UnitKind::Unresolved => f.write_str("unresolved"),
        }
    }
}

/// One concrete named unit usable as a factor of a [`CompositeUnit`].
///
/// The elementary-term list is the ground truth for the factor's dimensional
/// contribution. `scale`, `offset` and `prefix` describe one unit of this
/// factor at exponent 1; `exponent` says how the factor participates in its
/// composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedUnitFactor {
    symbol: String,
    name: String,
    kind: UnitKind,
    system: UnitSystem,
    is_si: bool,
    scale: Rational,
    offset: f64,
    prefix: Prefix,
    exponent: Rational,
    terms: Vec<ElementaryTerm>,
}

impl NamedUnitFactor {
    /// Create an unprefixed SI factor at exponent 1 with unit scale and no offset.
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        kind: UnitKind,
        terms: Vec<ElementaryTerm>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            kind,
            system: UnitSystem::Si,
            is_si: true,
            scale: Rational::ONE,
            offset: 0.0,
            prefix: Prefix::Si,
            exponent: Rational::ONE,
            terms,
        }
    }

    /// Assign a unit system; SI membership follows the system.
    pub fn with_system(mut self, system: UnitSystem) -> Self {
        self.system = system;
        self.is_si = system == UnitSystem::Si;
        self
    }

    pub fn with_scale(mut self, scale: Rational) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn with_exponent(mut self, exponent: Rational) -> Self {
        self.exponent = exponent;
        self
    }

    /// Unprefixed symbol ("m" for kilometre).
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Symbol including the prefix ("km").
    pub fn prefixed_symbol(&self) -> String {
        format!("{}{}", self.prefix.symbol(), self.symbol)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &UnitKind {
        &self.kind
    }

    pub fn system(&self) -> UnitSystem {
        self.system
    }

    pub fn is_si(&self) -> bool {
        self.is_si
    }

    pub fn scale(&self) -> Rational {
        self.scale
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn prefix(&self) -> Prefix {
        self.prefix
    }

    pub fn exponent(&self) -> Rational {
        self.exponent
    }

    pub fn terms(&self) -> &[ElementaryTerm] {
        &self.terms
    }

    /// `prefix · scale`: SI base units per unit of this factor, ignoring offset.
    pub fn conversion_factor(&self) -> f64 {
        self.prefix.multiplier() * self.scale.to_f64()
    }

    /// SI membership with a neutral prefix.
    pub fn is_pure_si(&self) -> bool {
        self.is_si && self.prefix.is_neutral()
    }

    /// Grouping key used when merging factors during simplification.
    pub(crate) fn group_key(&self) -> (&UnitKind, UnitSystem, &str, Prefix) {
        (&self.kind, self.system, &self.symbol, self.prefix)
    }
}

impl fmt::Display for NamedUnitFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_symbol_exponent(
            &self.prefixed_symbol(),
            self.exponent,
        ))
    }
}

/// A product of named unit factors, each carried with its own exponent.
///
/// Factors are not deduplicated until [`crate::algebra::simplify`] merges
/// those sharing a kind, system and symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeUnit {
    kind: UnitKind,
    factors: Vec<NamedUnitFactor>,
}

impl CompositeUnit {
    pub fn new(kind: UnitKind, factors: Vec<NamedUnitFactor>) -> Self {
        Self { kind, factors }
    }

    /// A composite holding one factor, tagged with the factor's kind.
    pub fn single(factor: NamedUnitFactor) -> Self {
        Self {
            kind: factor.kind.clone(),
            factors: vec![factor],
        }
    }

    /// Derived composite with no factors (the multiplicative identity).
    pub fn dimensionless() -> Self {
        Self::new(UnitKind::Derived, Vec::new())
    }

    pub fn kind(&self) -> &UnitKind {
        &self.kind
    }

    pub fn with_kind(mut self, kind: UnitKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn factors(&self) -> &[NamedUnitFactor] {
        &self.factors
    }

    pub fn into_factors(self) -> Vec<NamedUnitFactor> {
        self.factors
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// True when every factor is SI with a neutral prefix.
    pub fn is_pure_si(&self) -> bool {
        self.factors.iter().all(NamedUnitFactor::is_pure_si)
    }

    /// Term for this unit at `exponent`, for building expressions.
    pub fn pow_term(&self, exponent: Rational) -> UnitExponentTerm<'_> {
        UnitExponentTerm::new(self, exponent)
    }

    /// Term for this unit at exponent 1.
    pub fn term(&self) -> UnitExponentTerm<'_> {
        UnitExponentTerm::new(self, Rational::ONE)
    }
}

impl fmt::Display for CompositeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.factors.is_empty() {
            return f.write_str("1");
        }
        let parts: Vec<String> = self.factors.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join("·"))
    }
}

/// A composite unit participating in an expression at some exponent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitExponentTerm<'a> {
    pub unit: &'a CompositeUnit,
    pub exponent: Rational,
}

impl<'a> UnitExponentTerm<'a> {
    pub fn new(unit: &'a CompositeUnit, exponent: Rational) -> Self {
        Self { unit, exponent }
    }
}

/// Ordered product of unit-exponent terms. Empty is the multiplicative identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EquationExpression<'a> {
    terms: Vec<UnitExponentTerm<'a>>,
}

impl<'a> EquationExpression<'a> {
    pub fn new(terms: Vec<UnitExponentTerm<'a>>) -> Self {
        Self { terms }
    }

    pub fn push(&mut self, unit: &'a CompositeUnit, exponent: Rational) {
        self.terms.push(UnitExponentTerm::new(unit, exponent));
    }

    /// Builder form of [`EquationExpression::push`].
    pub fn with(mut self, unit: &'a CompositeUnit, exponent: Rational) -> Self {
        self.push(unit, exponent);
        self
    }

    pub fn terms(&self) -> &[UnitExponentTerm<'a>] {
        &self.terms
    }

    pub fn iter(&self) -> impl Iterator<Item = &UnitExponentTerm<'a>> {
        self.terms.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }
}

impl<'a> FromIterator<UnitExponentTerm<'a>> for EquationExpression<'a> {
    fn from_iter<I: IntoIterator<Item = UnitExponentTerm<'a>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for EquationExpression<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return f.write_str("1");
        }
        let parts: Vec<String> = self
            .terms
            .iter()
            .map(|term| {
                if term.exponent.is_zero() {
                    "1".to_string()
                } else if term.exponent == Rational::ONE {
                    term.unit.to_string()
                } else {
                    format!("({}){}", term.unit, format_symbol_exponent("", term.exponent))
                }
            })
            .collect();
        f.write_str(&parts.join("·"))
    }
}
