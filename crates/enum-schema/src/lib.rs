//! # enum-schema
//!
//! Pure-Rust implementation of the JSON Schema **`enum`** constraint.
//!
//! A subject is valid when it is structurally equal to one of a fixed set of
//! permitted JSON values. Equality is deep: arrays compare element by element
//! in order, objects compare by key set regardless of key order, and numbers
//! compare by mathematical value (`4` equals `4.0`).
//!
//! ## Quick start
//!
//! ```rust
//! use enum_schema::EnumSchema;
//! use serde_json::json;
//!
//! let colors = EnumSchema::new([json!("red"), json!("green"), json!("blue")]);
//! assert!(colors.validate(&json!("green")).is_ok());
//!
//! let err = colors.validate(&json!("yellow")).unwrap_err();
//! assert_eq!(err.keyword(), "enum");
//! assert_eq!(err.message(), "yellow is not a valid enum value");
//! ```
//!
//! ## Modules
//!
//! - [`canonical`] — `serde_json::Value` → immutable [`CanonicalValue`]
//! - [`compare`] — structural equality over canonical values
//! - [`number`] — exact numeric equality across `i64`/`u64`/`f64` and decimals
//! - [`decimal`] — number literals that no machine type holds exactly
//! - [`schema`] — the [`EnumSchema`] constraint, its builder and loader
//! - [`error`] — validation and schema-loading errors

pub mod canonical;
pub mod compare;
pub mod decimal;
pub mod error;
pub mod number;
pub mod schema;

pub use canonical::{canonicalize, CanonicalValue, IntoCanonical, JsonKind};
pub use compare::deep_equals;
pub use decimal::{Decimal, ParseDecimalError};
pub use error::{SchemaError, ValidationError, ValidationErrorKind};
pub use number::CanonicalNumber;
pub use schema::{EnumSchema, EnumSchemaBuilder};
