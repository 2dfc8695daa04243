//! End-to-end tests for unit resolution and ranking.

use metrology::formula::DimensionalFormula;
use metrology::unit::{EquationExpression, UnitKind};
use metrology_tests::TestHarness;
use metrology_types::Rational;

#[test]
fn test_scores_rank_descending() {
    let harness = TestHarness::new().prefer(&["mm", "km"]);
    let ft = harness.unit("ft");
    let expr = EquationExpression::default().with(&ft, Rational::ONE);

    let symbols = harness.resolve_symbols(&expr);
    assert_eq!(symbols, vec!["mm", "km", "m", "cm", "in", "ft", "mi"]);
}

#[test]
fn test_every_candidate_is_scored_and_explained() {
    let harness = TestHarness::new();
    let n = harness.unit("N");
    let m = harness.unit("m");
    let expr = EquationExpression::default()
        .with(&n, Rational::ONE)
        .with(&m, Rational::ONE);

    let suggestions = harness.resolve(&expr);
    assert_eq!(harness.scorer().scored(), vec!["J", "kJ"]);
    assert_eq!(suggestions[0].explanation, "J for N·m");
}

#[test]
fn test_unmatched_expression_yields_one_synthetic_unit() {
    let harness = TestHarness::new();
    let mi = harness.unit("mi");
    let h = harness.unit("h");
    let expr = EquationExpression::default()
        .with(&mi, Rational::ONE)
        .with(&h, Rational::integer(-2));

    let suggestions = harness.resolve(&expr);
    assert_eq!(suggestions.len(), 1);

    let synthetic = &suggestions[0].unit;
    assert_eq!(synthetic.kind(), &UnitKind::Unresolved);
    assert_eq!(synthetic.to_string(), "mi·h⁻²");
    assert_eq!(
        DimensionalFormula::of(synthetic).unwrap(),
        DimensionalFormula::of(&expr).unwrap()
    );
    // The scorer is not consulted for the fallback.
    assert!(harness.scorer().scored().is_empty());
}

#[test]
fn test_catalog_filter_from_config() {
    let harness = TestHarness::from_json(
        r#"{ "catalog": { "systems": ["si", "metric"], "include_prefixed": false } }"#,
    );
    let s = harness.unit("s");
    let expr = EquationExpression::default().with(&s, Rational::ONE);
    assert_eq!(harness.resolve_symbols(&expr), vec!["s", "min", "h", "day"]);
}

#[test]
fn test_filtered_out_formula_falls_back() {
    let harness = TestHarness::from_json(r#"{ "catalog": { "systems": ["imperial"] } }"#);
    let n = harness.unit("N");
    let expr = EquationExpression::default().with(&n, Rational::ONE);

    let suggestions = harness.resolve(&expr);
    assert_eq!(suggestions.len(), 1);
    assert!(suggestions[0].is_unresolved());
}

#[test]
fn test_max_suggestions_from_config() {
    let config = serde_json::json!({ "resolution": { "max_suggestions": 2 } });
    let harness = TestHarness::from_json(&config.to_string()).prefer(&["mi"]);
    let m = harness.unit("m");
    let expr = EquationExpression::default().with(&m, Rational::ONE);
    assert_eq!(harness.resolve_symbols(&expr), vec!["mi", "m"]);
}

#[test]
fn test_convenience_entry_points() {
    let harness = TestHarness::new();
    let resolver = harness.resolver();
    let j = harness.unit("J");
    let s = harness.unit("s");
    let m = harness.unit("m");

    let power = resolver.divide(&j, &s).unwrap();
    assert_eq!(power[0].unit.to_string(), "W");

    let area = resolver.power(&m, Rational::integer(2)).unwrap();
    assert_eq!(area.len(), 1);
    assert!(area[0].is_unresolved());
    assert_eq!(area[0].unit.to_string(), "m²");

    let volume = resolver.power(&m, Rational::integer(3)).unwrap();
    assert_eq!(volume[0].unit.to_string(), "L");

    let best = resolver
        .resolve_best(&EquationExpression::default().with(&j, Rational::ONE).with(&s, Rational::MINUS_ONE))
        .unwrap();
    assert_eq!(best.unit.to_string(), "W");
}
