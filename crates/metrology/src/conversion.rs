//! Conversion-function synthesis
//!
//! For one named factor with prefix multiplier `p`, scale `f`, offset `b`
//! and exponent `n`, the to-SI transform `T` and from-SI transform `F` are:
//!
//! | Condition | T(x) | F(x) |
//! |-----------|------|------|
//! | `n = 0` (within tolerance) | `1` | `1` |
//! | `b = 0` | `(p·f·x)^n` | `(x / (p·f))^n` |
//! | `b ≠ 0`, `n > 0` | `(p·(f·x + b))^n` | `((x^(1/n) − b) / (p·f))^n` |
//! | `b ≠ 0`, `n < 0` | `(p·f·x)^n` | `(x / (p·f))^n` |
//!
//! # Composition Rules
//!
//! [`CompositionRule::SameInputProduct`] (the default) combines transforms
//! literally: a composite's transform is the product of every factor's
//! transform evaluated at the same raw input, and a unit-to-unit conversion
//! is `T_from(x) · F_to(x)`. For composites with more than one non-zero
//! factor, or for any unit-to-unit pair, this is not a change of units:
//! `m/s` maps every non-zero `x` to `1`, and km → m maps `x` to `1000·x²`.
//!
//! [`CompositionRule::Proportional`] derives one linear map instead. The
//! scale is `Π (p·f)^n` over all factors; an offset `p·b` is applied only
//! when the unit has exactly one non-zero factor at exponent exactly 1
//! (absolute temperatures). Unit-to-unit conversion is `F_to(T_from(x))`.
//!
//! # Concurrency
//!
//! A [`Conversion`] closes only over numbers extracted at synthesis time. It
//! is `Send + Sync`, cheap to clone, and safe to call from any thread.
//! Numeric domain problems (negative base with a fractional power, division
//! by a zero scale) come out as NaN or infinity, never as errors.

use std::fmt;
use std::sync::Arc;

use metrology_types::Rational;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::bulk::parallel_chunked_map;
use crate::config::ConversionConfig;
use crate::unit::{CompositeUnit, NamedUnitFactor};

/// Shareable scalar conversion function.
pub type ConversionFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// How per-factor transforms are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositionRule {
    /// Multiply independent evaluations at the same raw input.
    #[default]
    SameInputProduct,
    /// One proportional scale (plus offset for a lone affine factor).
    Proportional,
}

/// Numeric parameters of one factor, extracted once at synthesis time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorTransform {
    prefix: f64,
    scale: f64,
    offset: f64,
    exponent: Rational,
    is_zero: bool,
}

impl FactorTransform {
    pub fn from_factor(factor: &NamedUnitFactor, zero_tolerance: f64) -> Self {
        let exponent = factor.exponent();
        Self {
            prefix: factor.prefix().multiplier(),
            scale: factor.scale().to_f64(),
            offset: factor.offset(),
            exponent,
            is_zero: exponent.to_f64().abs() <= zero_tolerance,
        }
    }

    /// Whether the factor contributes nothing.
    pub fn is_zero(&self) -> bool {
        self.is_zero
    }

    fn uses_offset(&self) -> bool {
        self.offset != 0.0 && self.exponent.is_positive()
    }

    /// `T(x)` from the table above.
    pub fn to_si(&self, x: f64) -> f64 {
        if self.is_zero {
            return 1.0;
        }
        if self.uses_offset() {
            pow(self.prefix * (self.scale * x + self.offset), self.exponent)
        } else {
            pow(self.prefix * self.scale * x, self.exponent)
        }
    }

    /// `F(x)` from the table above.
    pub fn from_si(&self, x: f64) -> f64 {
        if self.is_zero {
            return 1.0;
        }
        let factor = self.prefix * self.scale;
        if self.uses_offset() {
            let root = x.powf(1.0 / self.exponent.to_f64());
            pow((root - self.offset) / factor, self.exponent)
        } else {
            pow(x / factor, self.exponent)
        }
    }

    /// `(p·f)^n`, the proportional contribution of this factor.
    pub fn proportional_scale(&self) -> f64 {
        if self.is_zero {
            return 1.0;
        }
        pow(self.prefix * self.scale, self.exponent)
    }
}

/// Raise to a rational power, exactly for small integer exponents.
fn pow(base: f64, exponent: Rational) -> f64 {
    if exponent.is_integer() {
        if let Ok(n) = i32::try_from(exponent.num()) {
            return base.powi(n);
        }
    }
    base.powf(exponent.to_f64())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    ToSi,
    FromSi,
}

#[derive(Debug, Clone, PartialEq)]
enum Kernel {
    /// Literal product of per-factor transforms at the same input.
    Product {
        transforms: Vec<FactorTransform>,
        direction: Direction,
    },
    /// `scale · x + offset`
    Linear { scale: f64, offset: f64 },
    /// Literal product of two independent evaluations at the same input.
    Pair(Box<Kernel>, Box<Kernel>),
}

impl Kernel {
    fn eval(&self, x: f64) -> f64 {
        match self {
            Kernel::Product {
                transforms,
                direction,
            } => transforms
                .iter()
                .map(|t| match direction {
                    Direction::ToSi => t.to_si(x),
                    Direction::FromSi => t.from_si(x),
                })
                .product(),
            Kernel::Linear { scale, offset } => scale * x + offset,
            Kernel::Pair(first, second) => first.eval(x) * second.eval(x),
        }
    }
}

/// A synthesized, immutable scalar conversion.
#[derive(Clone)]
pub struct Conversion {
    kernel: Arc<Kernel>,
    config: ConversionConfig,
}

impl Conversion {
    fn from_kernel(kernel: Kernel, config: &ConversionConfig) -> Self {
        Self {
            kernel: Arc::new(kernel),
            config: *config,
        }
    }

    /// Conversion from raw values in `unit` to SI base values.
    pub fn to_si(unit: &CompositeUnit, config: &ConversionConfig) -> Self {
        let kernel = match config.rule {
            CompositionRule::SameInputProduct => Kernel::Product {
                transforms: transforms(unit, config),
                direction: Direction::ToSi,
            },
            CompositionRule::Proportional => {
                let (scale, offset) = linear_to_si(unit, config);
                Kernel::Linear { scale, offset }
            }
        };
        trace!(unit = %unit, rule = ?config.rule, "to-SI conversion synthesized");
        Self::from_kernel(kernel, config)
    }

    /// Conversion from SI base values to raw values in `unit`.
    pub fn from_si(unit: &CompositeUnit, config: &ConversionConfig) -> Self {
        let kernel = match config.rule {
            CompositionRule::SameInputProduct => Kernel::Product {
                transforms: transforms(unit, config),
                direction: Direction::FromSi,
            },
            CompositionRule::Proportional => {
                let (scale, offset) = linear_to_si(unit, config);
                Kernel::Linear {
                    scale: 1.0 / scale,
                    offset: -offset / scale,
                }
            }
        };
        trace!(unit = %unit, rule = ?config.rule, "from-SI conversion synthesized");
        Self::from_kernel(kernel, config)
    }

    /// Conversion from raw values in `from` to raw values in `to`.
    pub fn between(from: &CompositeUnit, to: &CompositeUnit, config: &ConversionConfig) -> Self {
        let kernel = match config.rule {
            CompositionRule::SameInputProduct => {
                let source = Self::to_si(from, config);
                let target = Self::from_si(to, config);
                Kernel::Pair(
                    Box::new((*source.kernel).clone()),
                    Box::new((*target.kernel).clone()),
                )
            }
            CompositionRule::Proportional => {
                let (a1, b1) = linear_to_si(from, config);
                let (a2, b2) = linear_to_si(to, config);
                // from_si(to) ∘ to_si(from) = ((a1·x + b1) - b2) / a2
                Kernel::Linear {
                    scale: a1 / a2,
                    offset: (b1 - b2) / a2,
                }
            }
        };
        trace!(from = %from, to = %to, rule = ?config.rule, "unit conversion synthesized");
        Self::from_kernel(kernel, config)
    }

    pub fn rule(&self) -> CompositionRule {
        self.config.rule
    }

    /// Convert one value.
    pub fn apply(&self, x: f64) -> f64 {
        self.kernel.eval(x)
    }

    /// Convert every value; output has the same length and order.
    ///
    /// Inputs larger than the configured serial threshold are converted in
    /// parallel chunks. An invalid element yields NaN in its slot and does
    /// not affect the others.
    pub fn apply_all(&self, values: &[f64]) -> Vec<f64> {
        let kernel = &*self.kernel;
        parallel_chunked_map(
            values,
            |&x| kernel.eval(x),
            self.config.chunk,
            self.config.serial_threshold,
        )
    }

    /// Shareable closure form.
    pub fn into_fn(self) -> ConversionFn {
        Arc::new(move |x| self.apply(x))
    }
}

impl fmt::Debug for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conversion")
            .field("rule", &self.config.rule)
            .field("kernel", &self.kernel)
            .finish()
    }
}

fn transforms(unit: &CompositeUnit, config: &ConversionConfig) -> Vec<FactorTransform> {
    unit.factors()
        .iter()
        .map(|factor| FactorTransform::from_factor(factor, config.zero_tolerance))
        .collect()
}

/// `(scale, offset)` of the proportional to-SI map `x ↦ scale·x + offset`.
fn linear_to_si(unit: &CompositeUnit, config: &ConversionConfig) -> (f64, f64) {
    let transforms = transforms(unit, config);
    let scale = transforms.iter().map(FactorTransform::proportional_scale).product();

    let mut active = transforms.iter().filter(|t| !t.is_zero());
    let offset = match (active.next(), active.next()) {
        (Some(only), None) if only.exponent == Rational::ONE => only.prefix * only.offset,
        _ => 0.0,
    };
    (scale, offset)
}

/// Convert one value from `from` to `to`.
pub fn convert(value: f64, from: &CompositeUnit, to: &CompositeUnit, config: &ConversionConfig) -> f64 {
    Conversion::between(from, to, config).apply(value)
}

/// Convert a sequence of values from `from` to `to`.
pub fn convert_all(
    values: &[f64],
    from: &CompositeUnit,
    to: &CompositeUnit,
    config: &ConversionConfig,
) -> Vec<f64> {
    Conversion::between(from, to, config).apply_all(values)
}
