//! Convenience re-exports

pub use metrology_types::prelude::*;

pub use crate::algebra::{divide, multiply, pow, si_unit, simplify};
pub use crate::catalog::{CatalogFilter, StandardCatalog, UnitCatalog};
pub use crate::config::{ConversionConfig, EngineConfig, ResolutionConfig};
pub use crate::conversion::{CompositionRule, Conversion, ConversionFn, convert, convert_all};
pub use crate::error::Error;
pub use crate::formula::{DimensionalFormula, Dimensioned};
pub use crate::homogeneity::verify_homogeneity;
pub use crate::resolution::{Suggestion, UnitResolver};
pub use crate::scoring::{NeutralScorer, RelevanceScorer, SimplicityScorer};
pub use crate::unit::{
    CompositeUnit, ElementaryTerm, EquationExpression, NamedUnitFactor, UnitExponentTerm,
    UnitKind,
};
