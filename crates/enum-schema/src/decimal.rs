//! Exact decimal form of JSON number literals.
//!
//! The workspace builds `serde_json` with `arbitrary_precision`, so a parsed
//! number keeps the text it was written with. A [`Decimal`] holds that text
//! together with its normalized sign, significant digits and power of ten.
//! Two decimals are equal when those three parts are, so `1e400`, `1E+400`
//! and `10e399` are one value while `0.1` and `0.10000000000000000001` are
//! not.
//!
//! Exponents saturate at the `i64` bounds.

use serde_json::Number;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The text is not a JSON number literal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid JSON number literal: {0:?}")]
pub struct ParseDecimalError(String);

/// A JSON number literal compared by exact decimal value.
#[derive(Debug, Clone)]
pub struct Decimal {
    literal: String,
    negative: bool,
    /// No leading or trailing zeros; empty for zero.
    digits: String,
    exponent: i64,
}

impl Decimal {
    /// The shortest decimal that reads back as `f`, which is the text
    /// `serde_json` writes for it. `None` for NaN and the infinities.
    pub fn from_f64(f: f64) -> Option<Self> {
        Number::from_f64(f)?.to_string().parse().ok()
    }

    fn from_integer(value: i128) -> Self {
        let literal = value.to_string();
        let digits = value.unsigned_abs().to_string();
        Self::normalized(literal, value < 0, &digits, 0)
    }

    fn normalized(literal: String, negative: bool, coefficient: &str, exponent: i64) -> Self {
        let significant = coefficient.trim_start_matches('0');
        let digits = significant.trim_end_matches('0');
        if digits.is_empty() {
            return Self {
                literal,
                negative: false,
                digits: String::new(),
                exponent: 0,
            };
        }
        let trailing = (significant.len() - digits.len()) as i64;
        Self {
            literal,
            negative,
            digits: digits.to_owned(),
            exponent: exponent.saturating_add(trailing),
        }
    }

    /// The literal as written.
    pub fn as_str(&self) -> &str {
        &self.literal
    }

    /// `true` when the value has no fractional part.
    pub fn is_integral(&self) -> bool {
        self.digits.is_empty() || self.exponent >= 0
    }

    /// The literal as a `serde_json` number.
    pub fn to_json(&self) -> Option<Number> {
        self.literal.parse().ok()
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self::from_integer(i128::from(value))
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Self::from_integer(i128::from(value))
    }
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

fn parse_exponent(text: &str) -> Option<i64> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    if !is_digits(digits) {
        return None;
    }
    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    /// Parse `-?int(.frac)?([eE][+-]?digits)?` with no leading zeros on `int`.
    fn from_str(literal: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseDecimalError(literal.to_owned());

        let (negative, unsigned) = match literal.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, literal),
        };
        let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
            Some(at) => (
                &unsigned[..at],
                parse_exponent(&unsigned[at + 1..]).ok_or_else(invalid)?,
            ),
            None => (unsigned, 0),
        };
        let (int, frac) = match mantissa.split_once('.') {
            Some((int, frac)) if is_digits(frac) => (int, frac),
            Some(_) => return Err(invalid()),
            None => (mantissa, ""),
        };
        if !is_digits(int) || (int.len() > 1 && int.starts_with('0')) {
            return Err(invalid());
        }

        let coefficient = format!("{int}{frac}");
        let exponent = exponent.saturating_sub(frac.len() as i64);
        Ok(Self::normalized(
            literal.to_owned(),
            negative,
            &coefficient,
            exponent,
        ))
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.negative == other.negative
            && self.exponent == other.exponent
            && self.digits == other.digits
    }
}

impl Eq for Decimal {}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

