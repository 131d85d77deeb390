//! Numeric values of the canonical model.
//!
//! JSON has a single number type, but a JSON document model stores numbers in
//! whichever machine representation fits. [`CanonicalNumber`] keeps negative
//! integers as `i64`, non-negative integers as `u64`, and decimals that read
//! back from `f64` unchanged as `f64`. Every other literal (integers past
//! `u64::MAX`, decimals with more digits than `f64` holds, magnitudes past
//! `f64::MAX`) keeps its text as a [`Decimal`]. Equality is by mathematical
//! value across all four, so `4`, `4u64`, `4.0` and `4e0` are equal.
//!
//! A float stands for the shortest decimal that reads back as it, which is
//! the text `serde_json` writes for it. Integer/float comparisons never round
//! the integer through `f64`: `9007199254740993` (2^53 + 1) is *not* equal to
//! `9007199254740992.0`, and `9223372036854775808` (2^63) is not equal to
//! `2^63 as f64`, whose shortest decimal is `9.223372036854776e18`.

use crate::decimal::Decimal;
use serde::{Serialize, Serializer};
use serde_json::Number;
use std::borrow::Cow;
use std::fmt;

/// 2^53. Every float at or below this magnitude is either an exact integer or
/// has no integer as its shortest decimal.
const SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A JSON number in its storage representation.
///
/// Floats are finite: the canonicalizer maps NaN and the infinities to `null`
/// before a `CanonicalNumber` is ever built, the same way
/// `serde_json::Value::from(f64)` does.
#[derive(Debug, Clone)]
pub enum CanonicalNumber {
    Int(i64),
    UInt(u64),
    Float(f64),
    /// A literal that no machine type above holds exactly.
    Decimal(Decimal),
}

impl CanonicalNumber {
    /// Convert a `serde_json` number, choosing the narrowest exact
    /// representation for its literal.
    ///
    /// Returns `None` only when the number's text is not a JSON number
    /// literal, which `serde_json` never produces.
    pub fn from_json(n: &Number) -> Option<Self> {
        if let Some(i) = n.as_i64() {
            return Some(Self::Int(i));
        }
        if let Some(u) = n.as_u64() {
            return Some(Self::UInt(u));
        }
        let literal: Decimal = n.as_str().parse().ok()?;
        if let Some(f) = n.as_f64() {
            if Decimal::from_f64(f).is_some_and(|shortest| shortest == literal) {
                return Some(Self::Float(f));
            }
        }
        Some(Self::Decimal(literal))
    }

    /// Wrap a float, rejecting NaN and the infinities.
    pub fn from_f64(f: f64) -> Option<Self> {
        f.is_finite().then_some(Self::Float(f))
    }

    /// `true` when the value has no fractional part.
    pub fn is_integral(&self) -> bool {
        match self {
            Self::Int(_) | Self::UInt(_) => true,
            Self::Float(f) => f.fract() == 0.0,
            Self::Decimal(d) => d.is_integral(),
        }
    }

    /// Convert back into a `serde_json` number.
    pub fn to_json(&self) -> Option<Number> {
        match self {
            Self::Int(i) => Some(Number::from(*i)),
            Self::UInt(u) => Some(Number::from(*u)),
            Self::Float(f) => Number::from_f64(*f),
            Self::Decimal(d) => d.to_json(),
        }
    }

    fn to_decimal(&self) -> Option<Cow<'_, Decimal>> {
        match self {
            Self::Int(i) => Some(Cow::Owned(Decimal::from(*i))),
            Self::UInt(u) => Some(Cow::Owned(Decimal::from(*u))),
            Self::Float(f) => Decimal::from_f64(*f).map(Cow::Owned),
            Self::Decimal(d) => Some(Cow::Borrowed(d)),
        }
    }
}

fn float_eq_int(f: f64, i: i128) -> bool {
    f.fract() == 0.0 && f as i128 == i
}

impl PartialEq for CanonicalNumber {
    fn eq(&self, other: &Self) -> bool {
        use CanonicalNumber::*;
        match (self, other) {
            (Int(a), Int(b)) => a == b,
            (UInt(a), UInt(b)) => a == b,
            (Int(a), UInt(b)) | (UInt(b), Int(a)) => i128::from(*a) == i128::from(*b),
            // -0.0 == 0.0 holds under IEEE comparison, which is what we want.
            (Float(a), Float(b)) => a == b,
            (Float(f), Int(i)) | (Int(i), Float(f)) if f.abs() <= SAFE_INTEGER => {
                float_eq_int(*f, i128::from(*i))
            }
            (Float(f), UInt(u)) | (UInt(u), Float(f)) if f.abs() <= SAFE_INTEGER => {
                float_eq_int(*f, i128::from(*u))
            }
            _ => match (self.to_decimal(), other.to_decimal()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

// Floats are finite by construction, so equality is reflexive.
impl Eq for CanonicalNumber {}

impl fmt::Display for CanonicalNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_json() {
            Some(n) => write!(f, "{}", n),
            None => f.write_str("null"),
        }
    }
}

impl Serialize for CanonicalNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::UInt(u) => serializer.serialize_u64(*u),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::Decimal(d) => match d.to_json() {
                Some(n) => n.serialize(serializer),
                None => serializer.serialize_unit(),
            },
        }
    }
}
