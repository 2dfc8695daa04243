//! Dimensional homogeneity checks.
//!
//! Inputs are compared on their physical dimensions only. Angle, currency,
//! information and ratio tags are removed before comparison, so `rad/s` and
//! `1/s` are homogeneous.

use tracing::trace;

use crate::error::Result;
use crate::formula::{DimensionalFormula, Dimensioned};

/// Canonical formula of `input` with non-physical tags removed.
pub fn physical_formula(input: &dyn Dimensioned) -> Result<DimensionalFormula> {
    Ok(input.dimensional_formula()?.physical())
}

/// True when every input has the same physical formula as the first.
///
/// Fewer than two inputs are vacuously homogeneous.
pub fn verify_homogeneity(inputs: &[&dyn Dimensioned]) -> Result<bool> {
    let Some((first, rest)) = inputs.split_first() else {
        return Ok(true);
    };
    if rest.is_empty() {
        return Ok(true);
    }

    let reference = physical_formula(*first)?;
    for (position, input) in rest.iter().enumerate() {
        let formula = physical_formula(*input)?;
        if formula != reference {
            trace!(
                reference = %reference,
                mismatch = %formula,
                position = position + 1,
                "inputs are not homogeneous"
            );
            return Ok(false);
        }
    }
    Ok(true)
}
