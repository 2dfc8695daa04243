//! Unit algebra over composite units.
//!
//! Every operation reads its inputs by reference and returns a freshly built
//! [`CompositeUnit`] that owns clones of the factors it needs. Catalog units
//! are never modified.

use std::collections::HashMap;

use metrology_types::Rational;
use tracing::debug;

use crate::catalog::UnitCatalog;
use crate::config::DEFAULT_ZERO_TOLERANCE;
use crate::error::{Error, Result};
use crate::unit::{CompositeUnit, NamedUnitFactor, UnitExponentTerm, UnitKind};

/// Multiply `base` by each term.
///
/// The result owns clones of `base`'s factors at their existing exponents,
/// followed by clones of each term's factors with exponents multiplied by
/// the term exponent, then simplified.
///
/// # Errors
///
/// [`Error::InvalidArgument`] when `terms` is empty, [`Error::Exponent`] when an
/// exponent product is not representable.
pub fn multiply(base: &CompositeUnit, terms: &[UnitExponentTerm<'_>]) -> Result<CompositeUnit> {
    if terms.is_empty() {
        return Err(Error::invalid_argument("multiply requires at least one term"));
    }

    let mut factors: Vec<NamedUnitFactor> = base.factors().to_vec();
    for term in terms {
        for factor in term.unit.factors() {
            let exponent = factor.exponent().checked_mul(term.exponent)?;
            factors.push(factor.clone().with_exponent(exponent));
        }
    }

    let result = simplify(&CompositeUnit::new(UnitKind::Derived, factors))?;
    debug!(base = %base, terms = terms.len(), result = %result, "multiply");
    Ok(result)
}

/// `numerator / denominator`, with the numerator counted once.
pub fn divide(numerator: &CompositeUnit, denominator: &CompositeUnit) -> Result<CompositeUnit> {
    multiply(numerator, &[denominator.pow_term(Rational::MINUS_ONE)])
}

/// Raise every factor of `unit` to `exponent`, then simplify.
pub fn pow(unit: &CompositeUnit, exponent: Rational) -> Result<CompositeUnit> {
    let factors = unit
        .factors()
        .iter()
        .map(|factor| {
            let scaled = factor.exponent().checked_mul(exponent)?;
            Ok(factor.clone().with_exponent(scaled))
        })
        .collect::<Result<Vec<_>>>()?;

    let result = simplify(&CompositeUnit::new(UnitKind::Derived, factors))?;
    debug!(unit = %unit, exponent = %exponent, result = %result, "pow");
    Ok(result)
}

/// [`simplify_with`] at [`DEFAULT_ZERO_TOLERANCE`].
pub fn simplify(unit: &CompositeUnit) -> Result<CompositeUnit> {
    simplify_with(unit, DEFAULT_ZERO_TOLERANCE)
}

/// Merge factors sharing kind, system, symbol and prefix.
///
/// Exponents within a group are summed. A group whose sum is within
/// `tolerance` of zero is dropped; every other group emits one factor cloned
/// from its first member with the summed exponent. Surviving groups keep the
/// position of their first member.
pub fn simplify_with(unit: &CompositeUnit, tolerance: f64) -> Result<CompositeUnit> {
    let mut groups: Vec<(&NamedUnitFactor, Rational)> = Vec::new();
    let mut index: HashMap<_, usize> = HashMap::new();

    for factor in unit.factors() {
        let key = factor.group_key();
        match index.get(&key).copied() {
            Some(slot) => {
                let sum = &mut groups[slot].1;
                *sum = sum.checked_add(factor.exponent())?;
            }
            None => {
                index.insert(key, groups.len());
                groups.push((factor, factor.exponent()));
            }
        }
    }

    let factors = groups
        .into_iter()
        .filter(|(_, sum)| sum.to_f64().abs() > tolerance)
        .map(|(first, sum)| first.clone().with_exponent(sum))
        .collect();
    Ok(CompositeUnit::new(unit.kind().clone(), factors))
}

/// Deep copy of the kind tag and all owned factors.
pub fn clone_unit(unit: &CompositeUnit) -> CompositeUnit {
    unit.clone()
}

/// Coherent SI equivalent of `unit`.
///
/// A unit that is already pure SI is returned unchanged. Otherwise each
/// elementary term of each factor is replaced by the catalog's SI unit for
/// its tag, raised to `term exponent × factor exponent`, and the result is
/// simplified. Kind is preserved.
///
/// # Errors
///
/// [`Error::MissingSiUnit`] when the catalog has no SI unit for a tag.
pub fn si_unit(unit: &CompositeUnit, catalog: &dyn UnitCatalog) -> Result<CompositeUnit> {
    if unit.is_pure_si() {
        return Ok(unit.clone());
    }

    let mut factors = Vec::new();
    for factor in unit.factors() {
        for term in factor.terms() {
            let si = catalog
                .si_unit_for(term.tag)
                .ok_or(Error::MissingSiUnit(term.tag))?;
            let exponent = term.exponent.checked_mul(factor.exponent())?;
            for si_factor in si.factors() {
                let scaled = si_factor.exponent().checked_mul(exponent)?;
                factors.push(si_factor.clone().with_exponent(scaled));
            }
        }
    }

    let result = simplify(&CompositeUnit::new(unit.kind().clone(), factors))?;
    debug!(unit = %unit, si = %result, "SI projection");
    Ok(result)
}
