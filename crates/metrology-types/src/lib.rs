// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Pure type definitions for dimensional analysis
//!
//! This crate defines the leaf vocabulary shared by the `metrology` engine
//! and any external unit catalog:
//!
//! - [`Rational`] - exact exponent and scale arithmetic
//! - [`DimensionTag`] - the closed, totally ordered set of elementary dimensions
//! - [`Prefix`] - decimal SI prefixes
//! - [`UnitSystem`] - the enumerated unit systems
//! - [`superscript`] - Unicode superscript encoding of exponents
//!
//! # Design Principles
//!
//! - **No logic beyond arithmetic**: formula expansion, conversion and unit
//!   algebra live in `metrology`.
//! - **No silent truncation**: a value that does not fit a [`Rational`] is a
//!   [`RationalError`], never a clamped result.

pub mod dimension;
pub mod prefix;
pub mod prelude;
pub mod rational;
pub mod superscript;
pub mod system;

pub use dimension::DimensionTag;
pub use prefix::Prefix;
pub use rational::{Rational, RationalError};
pub use system::UnitSystem;
