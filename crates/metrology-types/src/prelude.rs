//! Convenience re-exports
//!
//! ```rust
//! use metrology_types::prelude::*;
//!
//! let exponent = Rational::new(-1, 2);
//! assert_eq!(format_symbol_exponent(DimensionTag::Time.base_symbol(), exponent), "s⁻¹ᐟ²");
//! ```

pub use crate::dimension::DimensionTag;
pub use crate::prefix::Prefix;
pub use crate::rational::{Rational, RationalError};
pub use crate::superscript::{format_symbol_exponent, superscript, superscript_magnitude};
pub use crate::system::UnitSystem;
