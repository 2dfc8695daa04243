//! Unit resolution.
//!
//! [`UnitResolver`] turns an equation expression into ranked unit
//! suggestions:
//!
//! 1. Compute the expression's dimensional formula
//! 2. Ask the catalog for every unit with that formula
//! 3. Score each candidate and sort by descending score (ties keep catalog order)
//!
//! When the catalog has nothing for the formula, the result is a single
//! synthetic suggestion built by multiplying the expression's raw terms and
//! tagged [`UnitKind::Unresolved`]. An unmatched formula is never an error.

use metrology_types::Rational;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::algebra;
use crate::catalog::UnitCatalog;
use crate::config::ResolutionConfig;
use crate::error::{Error, Result};
use crate::formula::DimensionalFormula;
use crate::scoring::RelevanceScorer;
use crate::unit::{CompositeUnit, EquationExpression, UnitKind};

/// One ranked candidate unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub unit: CompositeUnit,
    pub score: f64,
    pub explanation: String,
}

impl Suggestion {
    /// Whether this is the synthetic fallback for an unmatched formula.
    pub fn is_unresolved(&self) -> bool {
        self.unit.kind().is_unresolved()
    }
}

/// Resolves expressions against a catalog, ranking with a scorer.
#[derive(Clone, Copy)]
pub struct UnitResolver<'a> {
    catalog: &'a dyn UnitCatalog,
    scorer: &'a dyn RelevanceScorer,
    config: ResolutionConfig,
}

impl<'a> UnitResolver<'a> {
    pub fn new(catalog: &'a dyn UnitCatalog, scorer: &'a dyn RelevanceScorer) -> Self {
        Self {
            catalog,
            scorer,
            config: ResolutionConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ResolutionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ResolutionConfig {
        &self.config
    }

    /// Ranked suggestions for `expression`; never empty.
    #[instrument(skip_all, name = "resolve", fields(terms = expression.len()))]
    pub fn resolve(&self, expression: &EquationExpression<'_>) -> Result<Vec<Suggestion>> {
        let formula = DimensionalFormula::of(expression)?;
        let candidates = self.catalog.units_with_formula(&formula);
        debug!(formula = %formula, candidates = candidates.len(), "catalog candidates");

        if candidates.is_empty() {
            return Ok(vec![self.unresolved(expression, &formula)?]);
        }

        let mut suggestions: Vec<Suggestion> = candidates
            .into_iter()
            .map(|unit| {
                let score = self.scorer.score(&unit, expression);
                let explanation = self.scorer.explain(&unit, expression);
                Suggestion {
                    unit,
                    score,
                    explanation,
                }
            })
            .collect();

        // Stable: equal scores keep catalog order. NaN ranks last.
        suggestions.sort_by(|a, b| rank_key(b.score).total_cmp(&rank_key(a.score)));
        if let Some(limit) = self.config.max_suggestions {
            suggestions.truncate(limit);
        }
        Ok(suggestions)
    }

    /// Highest-ranked suggestion for `expression`.
    pub fn resolve_best(&self, expression: &EquationExpression<'_>) -> Result<Suggestion> {
        self.resolve(expression)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::invalid_argument("resolution produced no suggestions"))
    }

    /// Suggestions for `lhs · rhs`.
    pub fn multiply(&self, lhs: &CompositeUnit, rhs: &CompositeUnit) -> Result<Vec<Suggestion>> {
        self.resolve(&EquationExpression::new(vec![lhs.term(), rhs.term()]))
    }

    /// Suggestions for `numerator / denominator`.
    pub fn divide(
        &self,
        numerator: &CompositeUnit,
        denominator: &CompositeUnit,
    ) -> Result<Vec<Suggestion>> {
        self.resolve(&EquationExpression::new(vec![
            numerator.term(),
            denominator.pow_term(Rational::MINUS_ONE),
        ]))
    }

    /// Suggestions for `unit ^ exponent`.
    pub fn power(&self, unit: &CompositeUnit, exponent: Rational) -> Result<Vec<Suggestion>> {
        self.resolve(&EquationExpression::new(vec![unit.pow_term(exponent)]))
    }

    fn unresolved(
        &self,
        expression: &EquationExpression<'_>,
        formula: &DimensionalFormula,
    ) -> Result<Suggestion> {
        let product = if expression.is_empty() {
            CompositeUnit::dimensionless()
        } else {
            algebra::multiply(&CompositeUnit::dimensionless(), expression.terms())?
        };
        let unit = product.with_kind(UnitKind::Unresolved);

        debug!(formula = %formula, unit = %unit, "no catalog match, synthesized unit");
        Ok(Suggestion {
            unit,
            score: 0.0,
            explanation: format!("no catalog unit has dimensions {formula}"),
        })
    }
}

fn rank_key(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else {
        score
    }
}
