//! Canonicalizer: converts JSON document values into [`CanonicalValue`].
//!
//! `serde_json::Value` is mutable and its object type keeps insertion order
//! (the workspace enables `preserve_order`), so two logically identical
//! objects can iterate differently. The canonical form fixes that: objects
//! become a `BTreeMap` keyed by string, arrays become a `Vec`, and scalars
//! keep their value. Conversion is eager and recursive; the whole subtree is
//! converted up front.
//!
//! A `serde_json::Value` is a tree, so cyclic input cannot be expressed and
//! canonicalization always terminates.
//!
//! # Example
//! ```
//! use enum_schema::canonicalize;
//! use serde_json::json;
//!
//! let a = canonicalize(json!({"a": 1, "b": [true, null]}));
//! let b = canonicalize(json!({"b": [true, null], "a": 1.0}));
//! assert_eq!(a, b);
//! ```

use crate::number::CanonicalNumber;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Immutable, comparison-stable form of a JSON value.
///
/// `PartialEq` is deep equality (see [`crate::compare::deep_equals`]):
/// sequences are order-sensitive, mappings are key-order-insensitive, and
/// numbers compare by mathematical value across representations.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CanonicalValue {
    Null,
    Bool(bool),
    Number(CanonicalNumber),
    String(String),
    Sequence(Vec<CanonicalValue>),
    /// Keys are unique; iteration is in sorted key order.
    Mapping(BTreeMap<String, CanonicalValue>),
}

/// The six JSON value types, named as in JSON Schema `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    /// Kind of a document value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl CanonicalValue {
    pub fn json_kind(&self) -> JsonKind {
        match self {
            Self::Null => JsonKind::Null,
            Self::Bool(_) => JsonKind::Boolean,
            Self::Number(_) => JsonKind::Number,
            Self::String(_) => JsonKind::String,
            Self::Sequence(_) => JsonKind::Array,
            Self::Mapping(_) => JsonKind::Object,
        }
    }

    /// JSON type name of this value, as used in JSON Schema `type`.
    pub fn kind(&self) -> &'static str {
        self.json_kind().name()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&CanonicalNumber> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[CanonicalValue]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&BTreeMap<String, CanonicalValue>> {
        match self {
            Self::Mapping(entries) => Some(entries),
            _ => None,
        }
    }
}

/// Anything the canonicalizer accepts.
///
/// Implemented for JSON document values (owned and borrowed), for canonical
/// values themselves (passed through unchanged), and for the scalar host
/// types a schema author is likely to write inline.
pub trait IntoCanonical {
    fn into_canonical(self) -> CanonicalValue;
}

/// Canonicalize a value.
///
/// Arrays map to [`CanonicalValue::Sequence`] preserving order, objects map
/// to [`CanonicalValue::Mapping`], and numbers keep their storage
/// representation. Non-finite floats become `Null`.
pub fn canonicalize<V: IntoCanonical>(value: V) -> CanonicalValue {
    value.into_canonical()
}

fn canonical_number(n: &serde_json::Number) -> CanonicalValue {
    CanonicalNumber::from_json(n).map_or(CanonicalValue::Null, CanonicalValue::Number)
}

impl IntoCanonical for Value {
    fn into_canonical(self) -> CanonicalValue {
        match self {
            Value::Null => CanonicalValue::Null,
            Value::Bool(b) => CanonicalValue::Bool(b),
            Value::Number(n) => canonical_number(&n),
            Value::String(s) => CanonicalValue::String(s),
            Value::Array(items) => {
                CanonicalValue::Sequence(items.into_iter().map(Value::into_canonical).collect())
            }
            Value::Object(map) => CanonicalValue::Mapping(
                map.into_iter()
                    .map(|(key, value)| (key, value.into_canonical()))
                    .collect(),
            ),
        }
    }
}

impl IntoCanonical for &Value {
    fn into_canonical(self) -> CanonicalValue {
        match self {
            Value::Null => CanonicalValue::Null,
            Value::Bool(b) => CanonicalValue::Bool(*b),
            Value::Number(n) => canonical_number(n),
            Value::String(s) => CanonicalValue::String(s.clone()),
            Value::Array(items) => {
                CanonicalValue::Sequence(items.iter().map(IntoCanonical::into_canonical).collect())
            }
            Value::Object(map) => CanonicalValue::Mapping(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.into_canonical()))
                    .collect(),
            ),
        }
    }
}

impl IntoCanonical for CanonicalValue {
    fn into_canonical(self) -> CanonicalValue {
        self
    }
}

impl IntoCanonical for &CanonicalValue {
    fn into_canonical(self) -> CanonicalValue {
        self.clone()
    }
}

impl IntoCanonical for () {
    fn into_canonical(self) -> CanonicalValue {
        CanonicalValue::Null
    }
}

impl IntoCanonical for bool {
    fn into_canonical(self) -> CanonicalValue {
        CanonicalValue::Bool(self)
    }
}

impl IntoCanonical for i32 {
    fn into_canonical(self) -> CanonicalValue {
        CanonicalValue::Number(CanonicalNumber::Int(i64::from(self)))
    }
}

impl IntoCanonical for i64 {
    fn into_canonical(self) -> CanonicalValue {
        CanonicalValue::Number(CanonicalNumber::Int(self))
    }
}

impl IntoCanonical for u32 {
    fn into_canonical(self) -> CanonicalValue {
        CanonicalValue::Number(CanonicalNumber::UInt(u64::from(self)))
    }
}

impl IntoCanonical for u64 {
    fn into_canonical(self) -> CanonicalValue {
        CanonicalValue::Number(CanonicalNumber::UInt(self))
    }
}

impl IntoCanonical for f64 {
    fn into_canonical(self) -> CanonicalValue {
        CanonicalNumber::from_f64(self).map_or(CanonicalValue::Null, CanonicalValue::Number)
    }
}

impl IntoCanonical for &str {
    fn into_canonical(self) -> CanonicalValue {
        CanonicalValue::String(self.to_owned())
    }
}

impl IntoCanonical for String {
    fn into_canonical(self) -> CanonicalValue {
        CanonicalValue::String(self)
    }
}

impl<T: IntoCanonical> IntoCanonical for Vec<T> {
    fn into_canonical(self) -> CanonicalValue {
        CanonicalValue::Sequence(self.into_iter().map(IntoCanonical::into_canonical).collect())
    }
}

impl From<&CanonicalValue> for Value {
    /// Mapping keys come out in sorted order.
    fn from(value: &CanonicalValue) -> Self {
        match value {
            CanonicalValue::Null => Value::Null,
            CanonicalValue::Bool(b) => Value::Bool(*b),
            CanonicalValue::Number(n) => n.to_json().map_or(Value::Null, Value::Number),
            CanonicalValue::String(s) => Value::String(s.clone()),
            CanonicalValue::Sequence(items) => Value::Array(items.iter().map(Value::from).collect()),
            CanonicalValue::Mapping(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), Value::from(value)))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }
}

impl From<CanonicalValue> for Value {
    fn from(value: CanonicalValue) -> Self {
        Value::from(&value)
    }
}

impl fmt::Display for CanonicalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::from(self))
    }
}
