//! Integration test harness for the metrology engine.
//!
//! This crate provides utilities for end-to-end testing of the full
//! pipeline: Lookup → Algebra → Formula → Resolve → Convert → Verify.

use std::cell::RefCell;

use metrology::catalog::StandardCatalog;
use metrology::config::EngineConfig;
use metrology::conversion::Conversion;
use metrology::resolution::{Suggestion, UnitResolver};
use metrology::scoring::RelevanceScorer;
use metrology::unit::{CompositeUnit, EquationExpression};

/// Test harness bundling a catalog, a scorer and an engine configuration.
pub struct TestHarness {
    catalog: StandardCatalog,
    scorer: PreferenceScorer,
    config: EngineConfig,
}

impl TestHarness {
    /// Harness over the standard catalog with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Harness with an explicit configuration; the catalog filter comes from it.
    pub fn with_config(config: EngineConfig) -> Self {
        let catalog = StandardCatalog::new().with_filter(config.catalog.clone());
        Self {
            catalog,
            scorer: PreferenceScorer::default(),
            config,
        }
    }

    /// Harness configured from a JSON document.
    ///
    /// # Panics
    ///
    /// Panics if the document does not parse or validate.
    pub fn from_json(json: &str) -> Self {
        match EngineConfig::from_json_str(json) {
            Ok(config) => Self::with_config(config),
            Err(err) => panic!("config rejected: {err}"),
        }
    }

    /// Prefer these symbols, highest first, when ranking.
    pub fn prefer(mut self, symbols: &[&str]) -> Self {
        self.scorer = PreferenceScorer::new(symbols);
        self
    }

    pub fn catalog(&self) -> &StandardCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn scorer(&self) -> &PreferenceScorer {
        &self.scorer
    }

    /// Resolve a unit symbol.
    ///
    /// # Panics
    ///
    /// Panics if the symbol is unknown.
    pub fn unit(&self, symbol: &str) -> CompositeUnit {
        match self.catalog.lookup_symbol(symbol) {
            Ok(unit) => unit,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn resolver(&self) -> UnitResolver<'_> {
        UnitResolver::new(&self.catalog, &self.scorer).with_config(self.config.resolution)
    }

    /// Ranked suggestions for `expression`.
    ///
    /// # Panics
    ///
    /// Panics if resolution fails.
    pub fn resolve(&self, expression: &EquationExpression<'_>) -> Vec<Suggestion> {
        match self.resolver().resolve(expression) {
            Ok(suggestions) => suggestions,
            Err(err) => panic!("resolution failed: {err}"),
        }
    }

    /// Symbols of the ranked suggestions for `expression`.
    pub fn resolve_symbols(&self, expression: &EquationExpression<'_>) -> Vec<String> {
        self.resolve(expression)
            .iter()
            .map(|s| s.unit.to_string())
            .collect()
    }

    /// Unit-to-unit conversion under the harness configuration.
    pub fn conversion(&self, from: &str, to: &str) -> Conversion {
        Conversion::between(&self.unit(from), &self.unit(to), &self.config.conversion)
    }

    pub fn to_si(&self, symbol: &str) -> Conversion {
        Conversion::to_si(&self.unit(symbol), &self.config.conversion)
    }

    pub fn from_si(&self, symbol: &str) -> Conversion {
        Conversion::from_si(&self.unit(symbol), &self.config.conversion)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Scores candidates by position in a preference list and records every call.
///
/// Unlisted candidates score zero, so they keep catalog order behind the
/// listed ones.
#[derive(Debug, Default)]
pub struct PreferenceScorer {
    preferred: Vec<String>,
    calls: RefCell<Vec<String>>,
}

impl PreferenceScorer {
    pub fn new(preferred: &[&str]) -> Self {
        Self {
            preferred: preferred.iter().map(|s| s.to_string()).collect(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Candidates scored so far, in call order.
    pub fn scored(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl RelevanceScorer for PreferenceScorer {
    fn score(&self, candidate: &CompositeUnit, _expression: &EquationExpression<'_>) -> f64 {
        let symbol = candidate.to_string();
        let rank = self
            .preferred
            .iter()
            .position(|p| *p == symbol)
            .map_or(0.0, |i| (self.preferred.len() - i) as f64);
        self.calls.borrow_mut().push(symbol);
        rank
    }

    fn explain(&self, candidate: &CompositeUnit, expression: &EquationExpression<'_>) -> String {
        format!("{candidate} for {expression}")
    }
}

/// Assert `actual` is within a relative tolerance of `expected`.
///
/// # Panics
///
/// Panics when the values differ by more than `1e-9` relative (or absolute near zero).
pub fn assert_close(actual: f64, expected: f64) {
    let tolerance = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}
