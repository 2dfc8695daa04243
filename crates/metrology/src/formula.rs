//! Dimensional-formula engine
//!
//! Any unit shape expands recursively into [`ElementaryTerm`]s via the
//! [`Dimensioned`] trait. Exponents multiply down the tree:
//!
//! - a factor at exponent `e` turns each of its own terms `d` into `d·e`
//! - an expression term at exponent `t` wrapping that factor yields `d·e·t`
//!
//! Grouping the terms by tag and summing exactly gives the canonical
//! [`DimensionalFormula`]; tags whose sum is exactly zero are dropped.
//!
//! # Rendering
//!
//! ```rust
//! # use metrology::formula::DimensionalFormula;
//! # use metrology::unit::ElementaryTerm;
//! # use metrology_types::{DimensionTag, Rational};
//! let acceleration = DimensionalFormula::from_terms([
//!     ElementaryTerm::new(DimensionTag::Length, Rational::ONE),
//!     ElementaryTerm::new(DimensionTag::Time, Rational::integer(-2)),
//! ])
//! .unwrap();
//! assert_eq!(acceleration.render(), "m/s²");
//!
//! let jerk_inverse = DimensionalFormula::from_terms([
//!     ElementaryTerm::new(DimensionTag::Time, Rational::integer(-3)),
//! ])
//! .unwrap();
//! assert_eq!(jerk_inverse.render(), "1/s³");
//! ```

use std::collections::BTreeMap;
use std::fmt;

use metrology_types::superscript::superscript_magnitude;
use metrology_types::{DimensionTag, Rational};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::unit::{
    CompositeUnit, ElementaryTerm, EquationExpression, NamedUnitFactor, UnitExponentTerm,
};

/// Anything that expands to elementary dimension terms.
pub trait Dimensioned {
    /// Append the expansion of `self`, every exponent multiplied by `scale`.
    fn expand_into(&self, scale: Rational, out: &mut Vec<ElementaryTerm>) -> Result<()>;

    /// Full elementary expansion at exponent 1.
    fn elementary_terms(&self) -> Result<Vec<ElementaryTerm>> {
        let mut out = Vec::new();
        self.expand_into(Rational::ONE, &mut out)?;
        Ok(out)
    }

    /// Canonical dimensional formula of `self`.
    fn dimensional_formula(&self) -> Result<DimensionalFormula> {
        DimensionalFormula::from_terms(self.elementary_terms()?)
    }
}

impl<T: Dimensioned + ?Sized> Dimensioned for &T {
    fn expand_into(&self, scale: Rational, out: &mut Vec<ElementaryTerm>) -> Result<()> {
        (**self).expand_into(scale, out)
    }
}

impl Dimensioned for ElementaryTerm {
    fn expand_into(&self, scale: Rational, out: &mut Vec<ElementaryTerm>) -> Result<()> {
        out.push(self.pow(scale)?);
        Ok(())
    }
}

impl Dimensioned for NamedUnitFactor {
    fn expand_into(&self, scale: Rational, out: &mut Vec<ElementaryTerm>) -> Result<()> {
        let scale = self.exponent().checked_mul(scale)?;
        for term in self.terms() {
            term.expand_into(scale, out)?;
        }
        Ok(())
    }
}

impl Dimensioned for CompositeUnit {
    fn expand_into(&self, scale: Rational, out: &mut Vec<ElementaryTerm>) -> Result<()> {
        for factor in self.factors() {
            factor.expand_into(scale, out)?;
        }
        Ok(())
    }
}

impl Dimensioned for UnitExponentTerm<'_> {
    fn expand_into(&self, scale: Rational, out: &mut Vec<ElementaryTerm>) -> Result<()> {
        self.unit.expand_into(self.exponent.checked_mul(scale)?, out)
    }
}

impl Dimensioned for EquationExpression<'_> {
    fn expand_into(&self, scale: Rational, out: &mut Vec<ElementaryTerm>) -> Result<()> {
        for term in self.iter() {
            term.expand_into(scale, out)?;
        }
        Ok(())
    }
}

impl Dimensioned for DimensionalFormula {
    fn expand_into(&self, scale: Rational, out: &mut Vec<ElementaryTerm>) -> Result<()> {
        for (&tag, &exponent) in &self.0 {
            ElementaryTerm::new(tag, exponent).expand_into(scale, out)?;
        }
        Ok(())
    }
}

/// Canonical mapping from dimension tag to nonzero rational exponent.
///
/// Two formulas are equal iff they hold the same tags with the same
/// exponents. The map is keyed in tag order, so equality and hashing do not
/// depend on how the input was ordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DimensionalFormula(BTreeMap<DimensionTag, Rational>);

impl DimensionalFormula {
    /// The dimensionless formula (no entries).
    pub fn dimensionless() -> Self {
        Self::default()
    }

    /// Group `terms` by tag, summing exponents exactly and dropping zeros.
    pub fn from_terms(terms: impl IntoIterator<Item = ElementaryTerm>) -> Result<Self> {
        let mut map: BTreeMap<DimensionTag, Rational> = BTreeMap::new();
        for term in terms {
            let entry = map.entry(term.tag).or_insert(Rational::ZERO);
            *entry = entry.checked_add(term.exponent)?;
        }
        map.retain(|_, exponent| !exponent.is_zero());
        Ok(Self(map))
    }

    /// Formula of a single input.
    pub fn of<T: Dimensioned + ?Sized>(input: &T) -> Result<Self> {
        input.dimensional_formula()
    }

    /// Formula of the product of several inputs.
    pub fn of_all(inputs: &[&dyn Dimensioned]) -> Result<Self> {
        let mut terms = Vec::new();
        for input in inputs {
            input.expand_into(Rational::ONE, &mut terms)?;
        }
        Self::from_terms(terms)
    }

    /// Exponent of `tag`, zero when absent.
    pub fn get(&self, tag: DimensionTag) -> Rational {
        self.0.get(&tag).copied().unwrap_or(Rational::ZERO)
    }

    pub fn contains(&self, tag: DimensionTag) -> bool {
        self.0.contains_key(&tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DimensionTag, Rational)> + '_ {
        self.0.iter().map(|(&tag, &exponent)| (tag, exponent))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_dimensionless(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy without the non-physical tags (angle, currency, information, ratio).
    pub fn physical(&self) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(tag, _)| tag.is_physical())
                .map(|(&tag, &exponent)| (tag, exponent))
                .collect(),
        )
    }

    /// Product of two formulas.
    pub fn multiply(&self, other: &DimensionalFormula) -> Result<Self> {
        Self::from_terms(
            self.iter()
                .chain(other.iter())
                .map(|(tag, exponent)| ElementaryTerm::new(tag, exponent)),
        )
    }

    /// Entries in rendering order: positive exponents by ascending tag,
    /// then negative exponents by ascending tag.
    pub fn ordered(&self) -> Vec<(DimensionTag, Rational)> {
        let (mut ordered, negative): (Vec<_>, Vec<_>) =
            self.iter().partition(|(_, exponent)| exponent.is_positive());
        ordered.extend(negative);
        ordered
    }

    /// Render with each tag's coherent base symbol.
    pub fn render(&self) -> String {
        self.render_with(|tag| tag.base_symbol())
    }

    /// Render with caller-supplied symbols.
    ///
    /// Positive tokens are joined with `·`. Every negative token is prefixed
    /// with `/`, except that a formula whose first token is negative starts
    /// with `1/`. Superscripts show the exponent magnitude; exponent 1 is bare.
    /// The dimensionless formula renders as `1`.
    pub fn render_with<F, S>(&self, symbol: F) -> String
    where
        F: Fn(DimensionTag) -> S,
        S: AsRef<str>,
    {
        let mut out = String::new();
        for (index, (tag, exponent)) in self.ordered().into_iter().enumerate() {
            if exponent.is_negative() {
                out.push_str(if index == 0 { "1/" } else { "/" });
            } else if index > 0 {
                out.push('·');
            }
            out.push_str(symbol(tag).as_ref());
            out.push_str(&superscript_magnitude(exponent));
        }

        if out.is_empty() {
            out.push('1');
        }
        out
    }
}

impl fmt::Display for DimensionalFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
