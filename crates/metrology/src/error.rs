//! Engine errors.
//!
//! Only validation failures are errors. Numeric anomalies produced while
//! converting values (NaN, infinity) are ordinary `f64` results and an
//! unmatched dimensional formula falls back to a synthetic unit, so neither
//! appears here.
//!
//! # Error Categories
//!
//! - **Argument errors**: [`Error::InvalidArgument`], [`Error::Exponent`]
//! - **Catalog errors**: [`Error::MissingSiUnit`], [`Error::UnknownSymbol`]
//! - **Configuration errors**: [`Error::InvalidConfig`], [`Error::ConfigParse`]

use metrology_types::{DimensionTag, RationalError};
use thiserror::Error;

/// Engine result type alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// An algebra entry point was called without the input it requires,
    /// such as a multiply with zero terms.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Exponent arithmetic left the representable rational range.
    #[error("unrepresentable exponent: {0}")]
    Exponent(#[from] RationalError),

    /// SI projection needed a coherent SI unit the catalog does not provide.
    #[error("catalog has no SI unit for dimension {0}")]
    MissingSiUnit(DimensionTag),

    /// A unit symbol could not be resolved against the catalog.
    #[error("unknown unit symbol: {0}")]
    UnknownSymbol(String),

    /// Configuration validation failure.
    #[error("invalid engine config: {0}")]
    InvalidConfig(String),

    /// Configuration document could not be parsed.
    #[error("failed to parse engine config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl Error {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
