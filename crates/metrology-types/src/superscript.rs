//! Unicode superscript encoding of exponents.
//!
//! | Exponent | Rendering |
//! |----------|-----------|
//! | `1` | empty |
//! | `0` | `⁰` |
//! | `2` | `²` |
//! | `-3` | `⁻³` |
//! | `1/2` | `¹ᐟ²` |
//! | `-3/2` | `⁻³ᐟ²` |

use crate::rational::Rational;

/// Superscript minus sign.
pub const SUPERSCRIPT_MINUS: char = '⁻';

/// Superscript fraction separator.
pub const SUPERSCRIPT_SLASH: char = 'ᐟ';

const SUPERSCRIPT_DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

/// Map one ASCII character to its superscript glyph.
///
/// Digits, `-` and `/` are mapped; anything else is returned unchanged.
pub fn superscript_char(c: char) -> char {
    match c {
        '0'..='9' => SUPERSCRIPT_DIGITS[(c as u8 - b'0') as usize],
        '-' => SUPERSCRIPT_MINUS,
        '/' => SUPERSCRIPT_SLASH,
        other => other,
    }
}

/// Encode every digit, minus sign and slash of `text` as superscript.
///
/// ```rust
/// use metrology_types::superscript::superscript_text;
///
/// assert_eq!(superscript_text("-12/5"), "⁻¹²ᐟ⁵");
/// ```
pub fn superscript_text(text: &str) -> String {
    text.chars().map(superscript_char).collect()
}

fn encode(negative: bool, num: u64, denom: u64) -> String {
    if !negative && num == 1 && denom == 1 {
        return String::new();
    }

    let mut out = String::new();
    if negative {
        out.push(SUPERSCRIPT_MINUS);
    }
    out.push_str(&superscript_text(&num.to_string()));
    if denom != 1 {
        out.push(SUPERSCRIPT_SLASH);
        out.push_str(&superscript_text(&denom.to_string()));
    }
    out
}

/// Superscript form of a signed exponent.
///
/// ```rust
/// use metrology_types::Rational;
/// use metrology_types::superscript::superscript;
///
/// assert_eq!(superscript(Rational::ONE), "");
/// assert_eq!(superscript(Rational::ZERO), "⁰");
/// assert_eq!(superscript(Rational::integer(-2)), "⁻²");
/// assert_eq!(superscript(Rational::new(-1, 2)), "⁻¹ᐟ²");
/// ```
pub fn superscript(exponent: Rational) -> String {
    encode(
        exponent.is_negative(),
        exponent.num().unsigned_abs(),
        exponent.denom(),
    )
}

/// Superscript of the exponent's magnitude; the sign is dropped.
///
/// Used by formula rendering, where negative exponents are placed after `/`.
pub fn superscript_magnitude(exponent: Rational) -> String {
    encode(false, exponent.num().unsigned_abs(), exponent.denom())
}

/// Render `symbol` raised to `exponent`.
///
/// Exponent `0` yields `"1"` whatever the symbol, exponent `1` yields the bare
/// symbol, anything else appends the signed superscript.
///
/// ```rust
/// use metrology_types::Rational;
/// use metrology_types::superscript::format_symbol_exponent;
///
/// assert_eq!(format_symbol_exponent("m", Rational::ZERO), "1");
/// assert_eq!(format_symbol_exponent("m", Rational::ONE), "m");
/// assert_eq!(format_symbol_exponent("s", Rational::integer(-1)), "s⁻¹");
/// ```
pub fn format_symbol_exponent(symbol: &str, exponent: Rational) -> String {
    if exponent.is_zero() {
        return "1".to_string();
    }
    format!("{}{}", symbol, superscript(exponent))
}
