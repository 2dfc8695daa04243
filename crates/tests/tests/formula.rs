//! End-to-end tests for dimensional formulas and their rendering.

use metrology::algebra::{divide, multiply, pow};
use metrology::formula::DimensionalFormula;
use metrology::unit::EquationExpression;
use metrology_tests::TestHarness;
use metrology_types::{DimensionTag, Rational};

#[test]
fn test_acceleration_renders_with_slash_and_superscript() {
    let harness = TestHarness::new();
    let m = harness.unit("m");
    let s = harness.unit("s");
    let accel = multiply(&m, &[s.pow_term(Rational::integer(-2))]).unwrap();

    let formula = DimensionalFormula::of(&accel).unwrap();
    assert_eq!(formula.get(DimensionTag::Length), Rational::ONE);
    assert_eq!(formula.get(DimensionTag::Time), Rational::integer(-2));
    assert_eq!(formula.render(), "m/s²");
}

#[test]
fn test_negative_only_formula_leads_with_one() {
    let harness = TestHarness::new();
    let s = harness.unit("s");
    let expr = EquationExpression::default().with(&s, Rational::integer(-3));
    assert_eq!(DimensionalFormula::of(&expr).unwrap().render(), "1/s³");
}

#[test]
fn test_derived_units_expand_to_base_dimensions() {
    let harness = TestHarness::new();
    let cases = [
        ("N", "m·kg/s²"),
        ("J", "m²·kg/s²"),
        ("W", "m²·kg/s³"),
        ("Pa", "kg/m/s²"),
        ("Hz", "1/s"),
        ("V", "m²·kg/s³/A"),
        ("L", "m³"),
        ("°", "rad"),
    ];
    for (symbol, expected) in cases {
        let unit = harness.unit(symbol);
        assert_eq!(
            DimensionalFormula::of(&unit).unwrap().render(),
            expected,
            "{symbol}"
        );
    }
}

#[test]
fn test_formula_is_independent_of_factor_order() {
    let harness = TestHarness::new();
    let n = harness.unit("N");
    let h = harness.unit("h");
    let ab = multiply(&n, &[h.term()]).unwrap();
    let ba = multiply(&h, &[n.term()]).unwrap();
    assert_ne!(ab.to_string(), ba.to_string());
    assert_eq!(
        DimensionalFormula::of(&ab).unwrap(),
        DimensionalFormula::of(&ba).unwrap()
    );
    assert_eq!(
        DimensionalFormula::of_all(&[&n, &h]).unwrap(),
        DimensionalFormula::of_all(&[&h, &n]).unwrap()
    );
}

#[test]
fn test_fractional_power_renders_fraction_superscript() {
    let harness = TestHarness::new();
    let m = harness.unit("m");
    let s = harness.unit("s");
    let root = pow(&divide(&m, &s).unwrap(), Rational::new(1, 2)).unwrap();
    assert_eq!(root.to_string(), "m¹ᐟ²·s⁻¹ᐟ²");
    assert_eq!(DimensionalFormula::of(&root).unwrap().render(), "m¹ᐟ²/s¹ᐟ²");
}

#[test]
fn test_cancelled_expression_is_dimensionless() {
    let harness = TestHarness::new();
    let ft = harness.unit("ft");
    let m = harness.unit("m");
    let expr = EquationExpression::default()
        .with(&ft, Rational::ONE)
        .with(&m, Rational::MINUS_ONE);
    let formula = DimensionalFormula::of(&expr).unwrap();
    assert!(formula.is_dimensionless());
    assert_eq!(formula.render(), "1");
}
