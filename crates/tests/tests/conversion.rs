//! End-to-end tests for conversion synthesis and bulk application.

use metrology::algebra::pow;
use metrology::bulk::ChunkConfig;
use metrology::config::{ConversionConfig, EngineConfig};
use metrology::conversion::{CompositionRule, Conversion};
use metrology::unit::CompositeUnit;
use metrology_tests::{TestHarness, assert_close};
use metrology_types::Rational;

fn proportional() -> TestHarness {
    TestHarness::from_json(r#"{ "conversion": { "rule": "proportional" } }"#)
}

/// Every factor raised to the zero power contributes nothing.
#[test]
fn test_zero_exponent_unit_converts_to_one() {
    let harness = TestHarness::new();
    let config = ConversionConfig::default();
    for symbol in ["km", "°C", "N", "lb"] {
        let unit = harness.unit(symbol);
        let factors = unit
            .factors()
            .iter()
            .map(|f| f.clone().with_exponent(Rational::ZERO))
            .collect();
        let zeroed = CompositeUnit::new(unit.kind().clone(), factors);

        let to = Conversion::to_si(&zeroed, &config);
        let from = Conversion::from_si(&zeroed, &config);
        for x in [-7.5, 0.0, 3.0, 1e9] {
            assert_eq!(to.apply(x), 1.0, "{symbol}");
            assert_eq!(from.apply(x), 1.0, "{symbol}");
        }
    }
}

#[test]
fn test_round_trip_positive_exponent() {
    for harness in [TestHarness::new(), proportional()] {
        for symbol in ["km", "ft", "mi", "lb", "h", "kPa"] {
            let to = harness.to_si(symbol);
            let from = harness.from_si(symbol);
            for x in [0.25, 1.0, 42.0, -1500.0] {
                assert_close(from.apply(to.apply(x)), x);
            }
        }
    }
}

#[test]
fn test_round_trip_negative_exponent() {
    let harness = proportional();
    let config = harness.config().conversion;
    for symbol in ["ms", "h", "ft"] {
        let inverse = pow(&harness.unit(symbol), Rational::MINUS_ONE).unwrap();
        let to = Conversion::to_si(&inverse, &config);
        let from = Conversion::from_si(&inverse, &config);
        for x in [0.5, 2.0, 360.0] {
            assert_close(from.apply(to.apply(x)), x);
        }
    }

    // Under the literal rule the inverse law holds when p·f = 1.
    let literal = TestHarness::new();
    let per_second = pow(&literal.unit("s"), Rational::MINUS_ONE).unwrap();
    let config = literal.config().conversion;
    let to = Conversion::to_si(&per_second, &config);
    let from = Conversion::from_si(&per_second, &config);
    for x in [0.5, 2.0, 360.0] {
        assert_close(from.apply(to.apply(x)), x);
    }
}

#[test]
fn test_round_trip_fractional_exponent() {
    let harness = proportional();
    let config = harness.config().conversion;
    for exponent in [Rational::new(1, 2), Rational::new(-3, 2), Rational::new(2, 3)] {
        let unit = pow(&harness.unit("km"), exponent).unwrap();
        let to = Conversion::to_si(&unit, &config);
        let from = Conversion::from_si(&unit, &config);
        for x in [0.5, 9.0, 1234.0] {
            assert_close(from.apply(to.apply(x)), x);
        }
    }
}

#[test]
fn test_temperature_scales() {
    let harness = proportional();
    assert_close(harness.to_si("°C").apply(0.0), 273.15);
    assert_close(harness.from_si("°F").apply(273.15), 32.0);
    assert_close(harness.conversion("°C", "°F").apply(37.0), 98.6);
    assert_close(harness.conversion("°F", "°C").apply(212.0), 100.0);

    // The literal rule agrees for single affine factors into and out of SI.
    let literal = TestHarness::new();
    assert_close(literal.to_si("°C").apply(-273.15), 0.0);
    assert_close(literal.from_si("°C").apply(300.0), 300.0 - 273.15);
}

#[test]
fn test_proportional_unit_to_unit() {
    let harness = proportional();
    assert_close(harness.conversion("mi", "km").apply(1.0), 1.609_344);
    assert_close(harness.conversion("ft", "in").apply(3.0), 36.0);
    assert_close(harness.conversion("day", "min").apply(1.0), 1_440.0);
    assert_close(harness.conversion("kW", "W").apply(2.5), 2_500.0);
    assert_close(harness.conversion("°", "rad").apply(180.0), std::f64::consts::PI);
    assert_close(harness.conversion("B", "bit").apply(4.0), 32.0);
}

/// Cross-unit conversion multiplies two evaluations of the same input.
#[test]
fn test_literal_unit_to_unit_is_same_input_product() {
    let harness = TestHarness::new();
    assert_eq!(
        harness.config().conversion.rule,
        CompositionRule::SameInputProduct
    );
    // T_ft(x) · F_in(x) = 0.3048·x · x / 0.0254
    let x = 3.0;
    assert_close(
        harness.conversion("ft", "in").apply(x),
        0.3048 * x * (x / 0.0254),
    );
}

#[test]
fn test_bulk_matches_scalar_and_preserves_order() {
    let harness = TestHarness::from_json(
        r#"{ "conversion": { "rule": "proportional", "serial_threshold": 8, "chunk": { "chunk_size": 300 } } }"#,
    );
    let conversion = harness.conversion("°F", "°C");
    let input: Vec<f64> = (0..20_000).map(|i| i as f64 * 0.5 - 500.0).collect();
    let output = conversion.apply_all(&input);

    assert_eq!(output.len(), input.len());
    for (&x, &y) in input.iter().zip(&output) {
        assert_eq!(y, conversion.apply(x));
    }
}

#[test]
fn test_bulk_invalid_elements_do_not_abort() {
    let harness = TestHarness::with_config(EngineConfig {
        conversion: ConversionConfig {
            serial_threshold: 0,
            ..ConversionConfig::default()
        },
        ..EngineConfig::default()
    });
    let root = pow(&harness.unit("m"), Rational::new(1, 2)).unwrap();
    let to = Conversion::to_si(&root, &harness.config().conversion);

    let output = to.apply_all(&[4.0, -1.0, f64::NAN, 9.0]);
    assert_eq!(output.len(), 4);
    assert_close(output[0], 2.0);
    assert!(output[1].is_nan());
    assert!(output[2].is_nan());
    assert_close(output[3], 3.0);
}

#[test]
fn test_bulk_with_inverted_chunk_bounds() {
    let harness = TestHarness::with_config(EngineConfig {
        conversion: ConversionConfig {
            serial_threshold: 0,
            chunk: ChunkConfig {
                chunk_size: 0,
                min_chunk: 512,
                max_chunk: 128,
            },
            ..ConversionConfig::default()
        },
        ..EngineConfig::default()
    });
    let km = harness.unit("km");
    let to = Conversion::to_si(&km, &harness.config().conversion);
    let output = to.apply_all(&[1.0, 2.0]);
    assert_close(output[0], 1_000.0);
    assert_close(output[1], 2_000.0);
}

#[test]
fn test_conversion_fn_is_shared_across_threads() {
    let harness = proportional();
    let f = harness.conversion("mi", "m").into_fn();
    let results: Vec<f64> = std::thread::scope(|scope| {
        let handles: Vec<_> = (1..=4)
            .map(|i| {
                let f = &f;
                scope.spawn(move || f(i as f64))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for (i, y) in results.into_iter().enumerate() {
        assert_close(y, (i + 1) as f64 * 1_609.344);
    }
}
