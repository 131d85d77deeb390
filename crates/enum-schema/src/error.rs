//! Error types for enum validation and schema loading.

use serde_json::Value;
use thiserror::Error;

/// Classification of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// The subject is deep-equal to none of the permitted values.
    EnumMismatch,
}

impl ValidationErrorKind {
    /// The JSON Schema keyword that produced the failure.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::EnumMismatch => "enum",
        }
    }
}

/// A subject rejected by a constraint.
///
/// Carries the raw subject as it was passed in (before canonicalization),
/// the keyword that rejected it, and the location context: `pointer` is the
/// JSON Pointer fragment of the rejected instance (`#` at the document root)
/// and `schema_location` is whatever the schema was built with.
///
/// Displays as `"<pointer>: <message>"`.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{pointer}: {message}")]
pub struct ValidationError {
    kind: ValidationErrorKind,
    subject: Value,
    message: String,
    pointer: String,
    schema_location: Option<String>,
}

impl ValidationError {
    pub(crate) fn enum_mismatch(
        subject: &Value,
        pointer: &str,
        schema_location: Option<&str>,
    ) -> Self {
        Self {
            kind: ValidationErrorKind::EnumMismatch,
            message: format!("{} is not a valid enum value", render_subject(subject)),
            subject: subject.clone(),
            pointer: pointer.to_owned(),
            schema_location: schema_location.map(str::to_owned),
        }
    }

    pub fn kind(&self) -> ValidationErrorKind {
        self.kind
    }

    /// Always `"enum"` for failures produced by this crate.
    pub fn keyword(&self) -> &'static str {
        self.kind.keyword()
    }

    /// The rejected subject, exactly as supplied.
    pub fn subject(&self) -> &Value {
        &self.subject
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn pointer(&self) -> &str {
        &self.pointer
    }

    pub fn schema_location(&self) -> Option<&str> {
        self.schema_location.as_deref()
    }
}

/// Strings render bare, everything else as compact JSON.
fn render_subject(subject: &Value) -> String {
    match subject {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Errors raised while loading an enum schema from its JSON definition.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema text was not valid JSON.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The schema object has no `enum` keyword.
    #[error("schema has no \"enum\" keyword")]
    MissingEnum,

    /// The `enum` keyword holds something other than an array.
    #[error("\"enum\" must be an array, found {found}")]
    EnumNotArray { found: &'static str },

    /// The schema document itself is not a JSON object.
    #[error("schema must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}

/// Convenience alias used throughout enum-schema.
pub type Result<T> = std::result::Result<T, SchemaError>;
