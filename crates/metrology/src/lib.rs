// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Dimensional analysis engine
//!
//! Given composite units (products of named unit factors raised to rational
//! exponents), this crate:
//!
//! - computes canonical dimensional formulas and renders them (`m/s²`)
//! - synthesizes to-SI, from-SI and unit-to-unit conversion functions
//!   and applies them to single values or whole sequences
//! - performs unit algebra (multiply, divide, power, simplify, SI projection)
//! - checks dimensional homogeneity across expressions
//! - resolves expressions to ranked catalog units behind pluggable catalog
//!   and scoring seams
//!
//! Everything is pure and synchronous. Configuration is an explicit
//! [`EngineConfig`] value; there is no process-wide state.
//!
//! ```rust
//! use metrology::prelude::*;
//!
//! let catalog = StandardCatalog::new();
//! let n = catalog.lookup_symbol("N").unwrap();
//! let m = catalog.lookup_symbol("m").unwrap();
//!
//! let resolver = UnitResolver::new(&catalog, &NeutralScorer);
//! let best = resolver.multiply(&n, &m).unwrap();
//! assert_eq!(best[0].unit.to_string(), "J");
//! assert_eq!(DimensionalFormula::of(&best[0].unit).unwrap().render(), "m²·kg/s²");
//! ```

pub mod algebra;
pub mod bulk;
pub mod catalog;
pub mod config;
pub mod conversion;
pub mod error;
pub mod formula;
pub mod homogeneity;
pub mod prelude;
pub mod resolution;
pub mod scoring;
pub mod unit;

pub use catalog::{CatalogFilter, StandardCatalog, UnitCatalog};
pub use config::{ConversionConfig, EngineConfig, ResolutionConfig};
pub use conversion::{CompositionRule, Conversion, ConversionFn};
pub use error::{Error, Result};
pub use formula::{DimensionalFormula, Dimensioned};
pub use homogeneity::verify_homogeneity;
pub use resolution::{Suggestion, UnitResolver};
pub use scoring::{NeutralScorer, RelevanceScorer, SimplicityScorer};
pub use unit::{
    CompositeUnit, ElementaryTerm, EquationExpression, NamedUnitFactor, UnitExponentTerm,
    UnitKind,
};
