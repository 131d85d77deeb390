//! Deep structural equality over [`CanonicalValue`]s.
//!
//! Rules:
//!
//! - `null` equals `null`; booleans and strings compare by value
//! - numbers compare by mathematical value across `i64`/`u64`/`f64` storage
//!   (see [`crate::number`])
//! - sequences are equal when they have the same length and are pairwise
//!   equal by position
//! - mappings are equal when they have the same key set and equal values per
//!   key; key order never matters
//! - values of different kinds are never equal (`"1"` is not `1`)
//!
//! The relation is reflexive, symmetric and transitive for every canonical
//! value, which is what lets [`CanonicalValue`] implement `Eq`.

use crate::canonical::CanonicalValue;

/// Compare two canonical values structurally.
///
/// # Examples
///
/// ```
/// use enum_schema::{canonicalize, deep_equals};
/// use serde_json::json;
///
/// assert!(deep_equals(&canonicalize(json!(4)), &canonicalize(json!(4.0))));
/// assert!(!deep_equals(&canonicalize(json!([1, 2])), &canonicalize(json!([2, 1]))));
/// assert!(!deep_equals(&canonicalize(json!("1")), &canonicalize(json!(1))));
/// ```
pub fn deep_equals(a: &CanonicalValue, b: &CanonicalValue) -> bool {
    use CanonicalValue::*;
    match (a, b) {
        (Null, Null) => true,
        (Bool(x), Bool(y)) => x == y,
        (Number(x), Number(y)) => x == y,
        (String(x), String(y)) => x == y,
        (Sequence(xs), Sequence(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| deep_equals(x, y))
        }
        // BTreeMap iterates in key order, so equal key sets line up pairwise.
        (Mapping(xs), Mapping(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .zip(ys)
                    .all(|((kx, vx), (ky, vy))| kx == ky && deep_equals(vx, vy))
        }
        (Null | Bool(_) | Number(_) | String(_) | Sequence(_) | Mapping(_), _) => false,
    }
}

impl PartialEq for CanonicalValue {
    fn eq(&self, other: &Self) -> bool {
        deep_equals(self, other)
    }
}

impl Eq for CanonicalValue {}
