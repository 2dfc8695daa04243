//! Relevance scoring seam.
//!
//! The resolver ranks catalog candidates by whatever score a
//! [`RelevanceScorer`] assigns. Scoring policy is not part of the engine.

use crate::unit::{CompositeUnit, EquationExpression};

/// Ranks and explains candidate units for an expression.
pub trait RelevanceScorer {
    /// Higher scores rank first.
    fn score(&self, candidate: &CompositeUnit, expression: &EquationExpression<'_>) -> f64;

    /// Human-readable reason for the score.
    fn explain(&self, candidate: &CompositeUnit, expression: &EquationExpression<'_>) -> String;
}

/// Scores every candidate equally, leaving catalog order intact.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralScorer;

impl RelevanceScorer for NeutralScorer {
    fn score(&self, _candidate: &CompositeUnit, _expression: &EquationExpression<'_>) -> f64 {
        0.0
    }

    fn explain(&self, _candidate: &CompositeUnit, _expression: &EquationExpression<'_>) -> String {
        String::new()
    }
}

/// Prefers units with fewer factors whose factors are pure SI.
///
/// Each candidate starts at `1 / (1 + factor count)`, plus `1` when all
/// factors are pure SI.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimplicityScorer;

impl RelevanceScorer for SimplicityScorer {
    fn score(&self, candidate: &CompositeUnit, _expression: &EquationExpression<'_>) -> f64 {
        let compactness = 1.0 / (1.0 + candidate.factors().len() as f64);
        let coherent = if candidate.is_pure_si() { 1.0 } else { 0.0 };
        compactness + coherent
    }

    fn explain(&self, candidate: &CompositeUnit, expression: &EquationExpression<'_>) -> String {
        let coherence = if candidate.is_pure_si() {
            "coherent SI"
        } else {
            "non-coherent"
        };
        format!(
            "{candidate} ({}, {coherence}) matches {expression}",
            candidate.kind()
        )
    }
}
