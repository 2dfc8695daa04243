//! Engine configuration.
//!
//! Configuration is an explicit value handed to the components that need it.
//! Nothing in the engine reads process-wide settings, so two callers with
//! different catalog filters or tolerances never interfere.
//!
//! Every section deserializes with defaults for missing fields:
//!
//! ```rust
//! use metrology::config::EngineConfig;
//! use metrology::conversion::CompositionRule;
//!
//! let config = EngineConfig::from_json_str(
//!     r#"{ "conversion": { "rule": "proportional" }, "resolution": { "max_suggestions": 3 } }"#,
//! )
//! .unwrap();
//! assert_eq!(config.conversion.rule, CompositionRule::Proportional);
//! assert_eq!(config.resolution.max_suggestions, Some(3));
//! ```

use serde::{Deserialize, Serialize};

use crate::bulk::ChunkConfig;
use crate::catalog::CatalogFilter;
use crate::conversion::CompositionRule;
use crate::error::{Error, Result};

/// Magnitude below which a real-valued exponent counts as zero.
pub const DEFAULT_ZERO_TOLERANCE: f64 = 1e-10;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Tolerance used by simplification when dropping merged factors.
    pub zero_tolerance: f64,
    pub conversion: ConversionConfig,
    pub resolution: ResolutionConfig,
    pub catalog: CatalogFilter,
}

impl EngineConfig {
    /// Parse a JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        validate_tolerance("zero_tolerance", self.zero_tolerance)?;
        self.conversion.validate()?;
        self.resolution.validate()?;
        self.catalog.validate()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            zero_tolerance: DEFAULT_ZERO_TOLERANCE,
            conversion: ConversionConfig::default(),
            resolution: ResolutionConfig::default(),
            catalog: CatalogFilter::default(),
        }
    }
}

/// Settings for conversion synthesis and bulk application.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// How per-factor transforms combine.
    pub rule: CompositionRule,
    /// Factor exponents within this distance of zero contribute a constant 1.
    pub zero_tolerance: f64,
    /// Bulk conversions of at most this many values run serially.
    pub serial_threshold: usize,
    pub chunk: ChunkConfig,
}

impl ConversionConfig {
    pub fn validate(&self) -> Result<()> {
        validate_tolerance("conversion.zero_tolerance", self.zero_tolerance)?;
        self.chunk.validate()
    }
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            rule: CompositionRule::default(),
            zero_tolerance: DEFAULT_ZERO_TOLERANCE,
            serial_threshold: 1024,
            chunk: ChunkConfig::default(),
        }
    }
}

/// Settings for unit resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionConfig {
    /// Keep at most this many ranked suggestions; `None` keeps all.
    pub max_suggestions: Option<usize>,
}

impl ResolutionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_suggestions == Some(0) {
            return Err(Error::InvalidConfig(
                "resolution.max_suggestions must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn validate_tolerance(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidConfig(format!(
            "{name} must be a finite non-negative number (got {value})"
        )));
    }
    Ok(())
}
