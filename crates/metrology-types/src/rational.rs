//! Exact rationals for dimension exponents and unit scales
//!
//! Exponents such as `m¹ᐟ²` and scales such as the foot's `381/1250 m` are
//! held as normalized `num/denom` pairs (lowest terms, positive
//! denominator, zero as `0/1`), so summing the exponents of `m¹ᐟ²·m¹ᐟ²`
//! gives exactly `1`.
//!
//! Out-of-range results are never clamped or truncated: every checked
//! operation returns a [`RationalError`] instead, and the `std::ops`
//! implementations panic on overflow the way integer arithmetic does.
//!
//! ```rust
//! use metrology_types::rational::Rational;
//!
//! let root = Rational::new(1, 2);
//! assert_eq!(root.checked_add(root).unwrap(), Rational::ONE);
//!
//! let foot = Rational::new(762, 2500);
//! assert_eq!((foot.num(), foot.denom()), (381, 1250));
//! assert_eq!(foot.to_string(), "381/1250");
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use thiserror::Error;

/// Largest denominator produced when approximating a float.
const MAX_APPROX_DENOM: i128 = 1_000_000;

/// Relative tolerance for accepting a continued-fraction convergent.
const APPROX_EPSILON: f64 = 1e-12;

/// Errors raised when a value cannot be held as a [`Rational`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RationalError {
    /// A zero denominator was supplied.
    #[error("denominator must be non-zero")]
    ZeroDenominator,
    /// The normalized value does not fit the `i64 / u64` representation.
    #[error("rational {num}/{denom} is outside the representable range")]
    Overflow {
        /// Numerator before normalization.
        num: i128,
        /// Denominator before normalization.
        denom: i128,
    },
    /// NaN or infinity.
    #[error("cannot represent non-finite value {0} as a rational")]
    NotFinite(f64),
    /// A finite float whose magnitude cannot be approximated in range.
    #[error("{0} has no rational approximation within range")]
    Unrepresentable(f64),
}

/// A rational number represented as `numerator / denominator`.
///
/// # Invariants
///
/// - `denom > 0` (sign is carried by the numerator)
/// - `gcd(num.abs(), denom) == 1`
/// - zero is always `0/1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RationalRepr", into = "RationalRepr")]
pub struct Rational {
    num: i64,
    denom: u64,
}

/// Wire form used by serde; validated back into a normalized [`Rational`].
#[derive(Serialize, Deserialize)]
struct RationalRepr {
    num: i64,
    denom: u64,
}

impl Rational {
    /// Zero (0/1).
    pub const ZERO: Self = Rational { num: 0, denom: 1 };

    /// One (1/1).
    pub const ONE: Self = Rational { num: 1, denom: 1 };

    /// Minus one (-1/1).
    pub const MINUS_ONE: Self = Rational { num: -1, denom: 1 };

    /// Create a new rational number, normalized to lowest terms.
    ///
    /// # Panics
    ///
    /// Debug builds panic if `denom == 0`. Use [`Rational::try_new`] for
    /// untrusted input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use metrology_types::rational::Rational;
    ///
    /// let half = Rational::new(1, 2);
    /// assert_eq!(half.num(), 1);
    /// assert_eq!(half.denom(), 2);
    ///
    /// let neg_half = Rational::new(-2, 4);
    /// assert_eq!(neg_half.num(), -1);
    /// assert_eq!(neg_half.denom(), 2);
    /// ```
    pub fn new(num: i64, denom: u64) -> Self {
        debug_assert!(denom > 0, "Denominator must be positive (got 0)");

        if num == 0 {
            return Self::ZERO;
        }

        let g = gcd(num.unsigned_abs(), denom);
        Rational {
            // i128 keeps i64::MIN / 2^63 in range
            num: (num as i128 / g as i128) as i64,
            denom: denom / g,
        }
    }

    /// Checked constructor accepting a signed denominator of any magnitude.
    ///
    /// The pair is normalized first, so `try_new(2^70, 2^70)` is `ONE`; only
    /// values whose lowest-terms form does not fit are rejected.
    ///
    /// ```rust
    /// use metrology_types::rational::{Rational, RationalError};
    ///
    /// assert_eq!(Rational::try_new(3, -6), Ok(Rational::new(-1, 2)));
    /// assert_eq!(Rational::try_new(1, 0), Err(RationalError::ZeroDenominator));
    /// assert!(Rational::try_new(i128::from(i64::MAX) * 4, 1).is_err());
    /// ```
    pub fn try_new(num: i128, denom: i128) -> Result<Self, RationalError> {
        if denom == 0 {
            return Err(RationalError::ZeroDenominator);
        }
        if num == 0 {
            return Ok(Self::ZERO);
        }

        let overflow = RationalError::Overflow { num, denom };
        let negative = (num < 0) != (denom < 0);
        let g = gcd_wide(num.unsigned_abs(), denom.unsigned_abs());
        let n = num.unsigned_abs() / g;
        let d = denom.unsigned_abs() / g;

        let denom = u64::try_from(d).map_err(|_| overflow)?;
        let n = i128::try_from(n).map_err(|_| overflow)?;
        let num = i64::try_from(if negative { -n } else { n }).map_err(|_| overflow)?;

        Ok(Rational { num, denom })
    }

    /// Create an integer rational (n/1).
    ///
    /// ```rust
    /// use metrology_types::rational::Rational;
    ///
    /// let three = Rational::integer(3);
    /// assert_eq!(three.num(), 3);
    /// assert_eq!(three.denom(), 1);
    /// ```
    pub const fn integer(n: i64) -> Self {
        Rational { num: n, denom: 1 }
    }

    /// Numerator (carries the sign).
    pub const fn num(self) -> i64 {
        self.num
    }

    /// Denominator (always positive).
    pub const fn denom(self) -> u64 {
        self.denom
    }

    /// True if the value is zero.
    pub const fn is_zero(self) -> bool {
        self.num == 0
    }

    /// True if the denominator is one.
    pub const fn is_integer(self) -> bool {
        self.denom == 1
    }

    /// True if the value is strictly greater than zero.
    pub const fn is_positive(self) -> bool {
        self.num > 0
    }

    /// True if the value is strictly less than zero.
    pub const fn is_negative(self) -> bool {
        self.num < 0
    }

    /// `-1`, `0` or `1`.
    pub const fn signum(self) -> i64 {
        self.num.signum()
    }

    /// Convert to f64 (lossy).
    ///
    /// ```rust
    /// use metrology_types::rational::Rational;
    ///
    /// assert_eq!(Rational::new(1, 2).to_f64(), 0.5);
    /// assert!((Rational::new(1, 3).to_f64() - 0.33333333).abs() < 1e-7);
    /// ```
    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.denom as f64
    }

    fn wide(self) -> (i128, i128) {
        (self.num as i128, self.denom as i128)
    }

    /// `a/b + c/d = (a*d + c*b) / (b*d)`.
    pub fn checked_add(self, other: Rational) -> Result<Rational, RationalError> {
        let (a, b) = self.wide();
        let (c, d) = other.wide();
        let overflow = RationalError::Overflow { num: a, denom: b };

        let num = a
            .checked_mul(d)
            .zip(c.checked_mul(b))
            .and_then(|(ad, cb)| ad.checked_add(cb))
            .ok_or(overflow)?;
        let denom = b.checked_mul(d).ok_or(overflow)?;
        Rational::try_new(num, denom)
    }

    /// `a/b - c/d`.
    pub fn checked_sub(self, other: Rational) -> Result<Rational, RationalError> {
        self.checked_add(other.checked_neg()?)
    }

    /// `(a/b) * (c/d) = (a*c) / (b*d)`.
    pub fn checked_mul(self, other: Rational) -> Result<Rational, RationalError> {
        let (a, b) = self.wide();
        let (c, d) = other.wide();
        let overflow = RationalError::Overflow { num: a, denom: b };

        let num = a.checked_mul(c).ok_or(overflow)?;
        let denom = b.checked_mul(d).ok_or(overflow)?;
        Rational::try_new(num, denom)
    }

    /// `(a/b) / (c/d) = (a*d) / (b*c)`.
    pub fn checked_div(self, other: Rational) -> Result<Rational, RationalError> {
        if other.is_zero() {
            return Err(RationalError::ZeroDenominator);
        }
        self.checked_mul(other.recip()?)
    }

    /// `-(a/b)`; fails only for a numerator of `i64::MIN`.
    pub fn checked_neg(self) -> Result<Rational, RationalError> {
        match self.num.checked_neg() {
            Some(num) => Ok(Rational {
                num,
                denom: self.denom,
            }),
            None => Err(RationalError::Overflow {
                num: self.num as i128,
                denom: self.denom as i128,
            }),
        }
    }

    /// Multiplicative inverse.
    pub fn recip(self) -> Result<Rational, RationalError> {
        Rational::try_new(self.denom as i128, self.num as i128)
    }
}

/// Compute greatest common divisor using the Euclidean algorithm.
///
/// ```rust
/// use metrology_types::rational::gcd;
///
/// assert_eq!(gcd(2_500, 762), 2);
/// assert_eq!(gcd(0, 9), 9);
/// ```
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let temp = b;
        b = a % b;
        a = temp;
    }
    a
}

fn gcd_wide(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let temp = b;
        b = a % b;
        a = temp;
    }
    a
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Rational::integer(n)
    }
}

impl From<i32> for Rational {
    fn from(n: i32) -> Self {
        Rational::integer(n as i64)
    }
}

impl TryFrom<RationalRepr> for Rational {
    type Error = RationalError;

    fn try_from(repr: RationalRepr) -> Result<Self, Self::Error> {
        Rational::try_new(repr.num as i128, repr.denom as i128)
    }
}

impl From<Rational> for RationalRepr {
    fn from(r: Rational) -> Self {
        RationalRepr {
            num: r.num,
            denom: r.denom,
        }
    }
}

impl TryFrom<f64> for Rational {
    type Error = RationalError;

    /// Approximate a float by continued fractions.
    ///
    /// Integers convert exactly. Other values become the first convergent
    /// within a relative error of `1e-12`, with denominators bounded by one
    /// million. Values with no such convergent fail, so small non-zero
    /// magnitudes never collapse to zero.
    ///
    /// ```rust
    /// use metrology_types::rational::Rational;
    ///
    /// assert_eq!(Rational::try_from(0.5), Ok(Rational::new(1, 2)));
    /// assert_eq!(Rational::try_from(-1.5), Ok(Rational::new(-3, 2)));
    /// assert!(Rational::try_from(f64::NAN).is_err());
    /// assert!(Rational::try_from(1e30).is_err());
    /// assert!(Rational::try_from(1e-7).is_err());
    /// ```
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(RationalError::NotFinite(value));
        }
        if value.abs() >= i64::MAX as f64 {
            return Err(RationalError::Unrepresentable(value));
        }
        if value.fract() == 0.0 {
            return Ok(Rational::integer(value as i64));
        }

        // Convergents h/k, seeded with h(-2)=0, h(-1)=1, k(-2)=1, k(-1)=0.
        let (mut h0, mut h1) = (0_i128, 1_i128);
        let (mut k0, mut k1) = (1_i128, 0_i128);
        let mut x = value;
        let tolerance = APPROX_EPSILON * value.abs();

        loop {
            let a = x.floor();
            let ai = a as i128;
            let h2 = ai * h1 + h0;
            let k2 = ai * k1 + k0;
            if k2 > MAX_APPROX_DENOM {
                break;
            }
            h0 = h1;
            h1 = h2;
            k0 = k1;
            k1 = k2;

            let frac = x - a;
            if frac.abs() < APPROX_EPSILON || (h1 as f64 / k1 as f64 - value).abs() <= tolerance {
                break;
            }
            x = 1.0 / frac;
        }

        if h1 == 0 || k1 == 0 || (h1 as f64 / k1 as f64 - value).abs() > tolerance {
            return Err(RationalError::Unrepresentable(value));
        }
        Rational::try_new(h1, k1).map_err(|_| RationalError::Unrepresentable(value))
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = self.wide();
        let (c, d) = other.wide();
        (a * d).cmp(&(c * b))
    }
}

// === Arithmetic Operations ===
//
// The operator forms panic on overflow; engine code uses the checked forms.

impl Add for Rational {
    type Output = Rational;

    /// # Panics
    ///
    /// Panics if the sum is not representable.
    fn add(self, other: Rational) -> Rational {
        self.checked_add(other)
            .unwrap_or_else(|err| panic!("rational addition overflowed: {err}"))
    }
}

impl Sub for Rational {
    type Output = Rational;

    /// # Panics
    ///
    /// Panics if the difference is not representable.
    fn sub(self, other: Rational) -> Rational {
        self.checked_sub(other)
            .unwrap_or_else(|err| panic!("rational subtraction overflowed: {err}"))
    }
}

impl Mul for Rational {
    type Output = Rational;

    /// # Panics
    ///
    /// Panics if the product is not representable.
    fn mul(self, other: Rational) -> Rational {
        self.checked_mul(other)
            .unwrap_or_else(|err| panic!("rational multiplication overflowed: {err}"))
    }
}

impl Div for Rational {
    type Output = Rational;

    /// # Panics
    ///
    /// Panics on division by zero or overflow.
    fn div(self, other: Rational) -> Rational {
        self.checked_div(other)
            .unwrap_or_else(|err| panic!("rational division failed: {err}"))
    }
}

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        self.checked_neg()
            .unwrap_or_else(|err| panic!("rational negation overflowed: {err}"))
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.denom)
        }
    }
}
