//! End-to-end tests for unit algebra and homogeneity.

use metrology::algebra::{clone_unit, divide, multiply, pow, si_unit, simplify};
use metrology::error::Error;
use metrology::formula::DimensionalFormula;
use metrology::homogeneity::verify_homogeneity;
use metrology::unit::{CompositeUnit, EquationExpression, UnitKind};
use metrology_tests::TestHarness;
use metrology_types::Rational;

#[test]
fn test_simplify_removes_cancelled_factor() {
    let harness = TestHarness::new();
    let ft = harness.unit("ft").factors()[0].clone();
    let s = harness.unit("s").factors()[0].clone();
    let unit = CompositeUnit::new(
        UnitKind::Derived,
        vec![ft.clone(), s, ft.with_exponent(Rational::MINUS_ONE)],
    );

    let simplified = simplify(&unit).unwrap();
    assert_eq!(simplified.to_string(), "s");
    // The input is untouched.
    assert_eq!(unit.factors().len(), 3);
}

#[test]
fn test_multiply_empty_terms_is_invalid_argument() {
    let harness = TestHarness::new();
    let err = multiply(&harness.unit("m"), &[]).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)), "{err}");
}

#[test]
fn test_divide_and_pow_compose() {
    let harness = TestHarness::new();
    let km = harness.unit("km");
    let h = harness.unit("h");
    let speed = divide(&km, &h).unwrap();
    assert_eq!(speed.to_string(), "km·h⁻¹");

    let squared = pow(&speed, Rational::integer(2)).unwrap();
    assert_eq!(squared.to_string(), "km²·h⁻²");

    let back = divide(&squared, &speed).unwrap();
    assert_eq!(back.to_string(), "km·h⁻¹");
}

#[test]
fn test_pow_leaves_catalog_unit_intact() {
    let harness = TestHarness::new();
    let n = harness.unit("N");
    let cubed = pow(&n, Rational::integer(3)).unwrap();
    assert_eq!(cubed.factors()[0].exponent(), Rational::integer(3));
    assert_eq!(harness.unit("N"), n);
    assert_eq!(n.factors()[0].exponent(), Rational::ONE);
}

#[test]
fn test_si_projection_keeps_dimensions() {
    let harness = TestHarness::new();
    for symbol in ["km", "mi", "°F", "kPa", "L", "lb", "%"] {
        let unit = harness.unit(symbol);
        let si = si_unit(&unit, harness.catalog()).unwrap();
        assert!(si.is_pure_si(), "{symbol} -> {si}");
        assert_eq!(
            DimensionalFormula::of(&si).unwrap(),
            DimensionalFormula::of(&unit).unwrap(),
            "{symbol}"
        );
    }

    let pa = si_unit(&harness.unit("kPa"), harness.catalog()).unwrap();
    assert_eq!(pa.to_string(), "kg·m⁻¹·s⁻²");
    let litre = si_unit(&harness.unit("L"), harness.catalog()).unwrap();
    assert_eq!(litre.to_string(), "m³");
}

#[test]
fn test_si_projection_of_si_unit_is_identity() {
    let harness = TestHarness::new();
    let n = harness.unit("N");
    assert_eq!(si_unit(&n, harness.catalog()).unwrap(), n);
}

#[test]
fn test_homogeneity_vacuous_and_self() {
    let harness = TestHarness::new();
    assert!(verify_homogeneity(&[]).unwrap());

    let j = harness.unit("J");
    assert!(verify_homogeneity(&[&j]).unwrap());
    let copy = clone_unit(&j);
    assert!(verify_homogeneity(&[&j, &copy]).unwrap());
}

#[test]
fn test_homogeneity_length_vs_mass() {
    let harness = TestHarness::new();
    let ft = harness.unit("ft");
    let lb = harness.unit("lb");
    assert!(!verify_homogeneity(&[&ft, &lb]).unwrap());
}

#[test]
fn test_homogeneity_of_equation_sides() {
    let harness = TestHarness::new();
    let n = harness.unit("N");
    let m = harness.unit("m");
    let j = harness.unit("J");
    let kwh = multiply(&harness.unit("kW"), &[harness.unit("h").term()]).unwrap();

    // N·m and kW·h are both energies; so is J.
    let work = EquationExpression::default()
        .with(&n, Rational::ONE)
        .with(&m, Rational::ONE);
    assert!(verify_homogeneity(&[&j, &work, &kwh]).unwrap());

    // Angles are not physical dimensions: rad/s against Hz.
    let rad = harness.unit("rad");
    let s = harness.unit("s");
    let angular = EquationExpression::default()
        .with(&rad, Rational::ONE)
        .with(&s, Rational::MINUS_ONE);
    let hz = harness.unit("Hz");
    assert!(verify_homogeneity(&[&hz, &angular]).unwrap());

    // Power is not energy.
    let w = harness.unit("W");
    assert!(!verify_homogeneity(&[&j, &work, &w]).unwrap());
}
