//! The `enum` constraint.
//!
//! An [`EnumSchema`] owns a deduplicated, immutable list of permitted
//! [`CanonicalValue`]s. Validation canonicalizes the subject and accepts it
//! when any permitted value is deep-equal to it. The list is never mutated
//! after construction, so one schema can be shared across threads and
//! validated against concurrently without locking.
//!
//! Schemas are built directly ([`EnumSchema::new`]), through a builder
//! ([`EnumSchema::builder`]), or loaded from a schema document
//! ([`EnumSchema::from_json`], `str::parse`, or `serde::Deserialize`).
//! [`EnumSchema::to_json`] re-emits the `{"type": "enum", "enum": [...]}`
//! descriptor.

use crate::canonical::{canonicalize, CanonicalValue, IntoCanonical, JsonKind};
use crate::compare::deep_equals;
use crate::error::{Result, SchemaError, ValidationError};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::{self, Deserialize, Deserializer};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::str::FromStr;

/// JSON Pointer fragment of the document root.
pub const ROOT_POINTER: &str = "#";

/// Everything except what a URI fragment may hold unescaped: unreserved
/// characters, sub-delimiters, `:`, `@`, `/` and `?`.
const FRAGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    .remove(b':')
    .remove(b'@')
    .remove(b'/')
    .remove(b'?');

/// URI fragment form of a JSON Pointer, suitable for
/// [`EnumSchema::validate_at`].
///
/// ```
/// use enum_schema::schema::pointer_fragment;
///
/// assert_eq!(pointer_fragment("/palette/1"), "#/palette/1");
/// assert_eq!(pointer_fragment("/dark shade"), "#/dark%20shade");
/// ```
pub fn pointer_fragment(pointer: &str) -> String {
    format!("{}{}", ROOT_POINTER, utf8_percent_encode(pointer, FRAGMENT))
}

/// A JSON Schema `enum` constraint.
#[derive(Debug, Clone)]
pub struct EnumSchema {
    possible_values: Vec<CanonicalValue>,
    title: Option<String>,
    description: Option<String>,
    id: Option<String>,
    schema_location: Option<String>,
}

/// Builder for [`EnumSchema`].
///
/// Candidates are canonicalized as they are added and deduplicated in
/// [`build`](EnumSchemaBuilder::build).
#[derive(Debug, Clone, Default)]
pub struct EnumSchemaBuilder {
    candidates: Vec<CanonicalValue>,
    title: Option<String>,
    description: Option<String>,
    id: Option<String>,
    schema_location: Option<String>,
}

impl EnumSchemaBuilder {
    /// Add one permitted value.
    pub fn possible_value(mut self, value: impl IntoCanonical) -> Self {
        self.candidates.push(canonicalize(value));
        self
    }

    /// Replace the permitted values with `values`.
    pub fn possible_values<I>(mut self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoCanonical,
    {
        self.candidates = values.into_iter().map(canonicalize).collect();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Location of this schema inside its schema document, copied into every
    /// [`ValidationError`] the schema produces.
    pub fn schema_location(mut self, location: impl Into<String>) -> Self {
        self.schema_location = Some(location.into());
        self
    }

    pub fn build(self) -> EnumSchema {
        let candidate_count = self.candidates.len();
        let possible_values = dedup(self.candidates);
        tracing::debug!(
            candidates = candidate_count,
            distinct = possible_values.len(),
            schema_location = self.schema_location.as_deref(),
            "built enum schema"
        );
        EnumSchema {
            possible_values,
            title: self.title,
            description: self.description,
            id: self.id,
            schema_location: self.schema_location,
        }
    }
}

/// Keep the first of every group of deep-equal values, in input order.
fn dedup(candidates: Vec<CanonicalValue>) -> Vec<CanonicalValue> {
    let mut distinct: Vec<CanonicalValue> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !distinct.iter().any(|kept| deep_equals(kept, &candidate)) {
            distinct.push(candidate);
        }
    }
    distinct
}

impl EnumSchema {
    /// Build a schema permitting exactly `values`.
    ///
    /// # Examples
    ///
    /// ```
    /// use enum_schema::EnumSchema;
    /// use serde_json::json;
    ///
    /// let schema = EnumSchema::new([json!(1), json!(1), json!(1.0)]);
    /// assert_eq!(schema.len(), 1);
    /// ```
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoCanonical,
    {
        Self::builder().possible_values(values).build()
    }

    pub fn builder() -> EnumSchemaBuilder {
        EnumSchemaBuilder::default()
    }

    /// The distinct permitted values, in first-occurrence order.
    pub fn possible_values(&self) -> &[CanonicalValue] {
        &self.possible_values
    }

    pub fn len(&self) -> usize {
        self.possible_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.possible_values.is_empty()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn schema_location(&self) -> Option<&str> {
        self.schema_location.as_deref()
    }

    /// `true` when `subject` is deep-equal to a permitted value.
    pub fn contains(&self, subject: impl IntoCanonical) -> bool {
        let subject = canonicalize(subject);
        self.possible_values
            .iter()
            .any(|permitted| deep_equals(permitted, &subject))
    }

    /// Validate `subject` as the document root.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] of kind
    /// [`EnumMismatch`](crate::ValidationErrorKind::EnumMismatch) when the
    /// subject matches no permitted value.
    pub fn validate(&self, subject: &Value) -> std::result::Result<(), ValidationError> {
        self.validate_at(subject, ROOT_POINTER)
    }

    /// Validate `subject` located at `pointer` in the instance document.
    ///
    /// The pointer is not interpreted; it is copied into the error so the
    /// caller can report where the failure happened.
    pub fn validate_at(
        &self,
        subject: &Value,
        pointer: &str,
    ) -> std::result::Result<(), ValidationError> {
        if self.contains(subject) {
            return Ok(());
        }
        tracing::trace!(
            pointer,
            subject = %subject,
            permitted = self.possible_values.len(),
            "enum mismatch"
        );
        Err(ValidationError::enum_mismatch(
            subject,
            pointer,
            self.schema_location.as_deref(),
        ))
    }

    /// Load a schema from its JSON definition.
    ///
    /// Reads the `enum` array plus the optional `$id`, `title` and
    /// `description` string properties. Other keywords are ignored.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::NotAnObject`] if `schema` is not an object
    /// - [`SchemaError::MissingEnum`] if there is no `enum` keyword
    /// - [`SchemaError::EnumNotArray`] if `enum` is not an array
    pub fn from_json(schema: &Value) -> Result<Self> {
        let object = schema.as_object().ok_or(SchemaError::NotAnObject {
            found: JsonKind::of(schema).name(),
        })?;
        let values = match object.get("enum") {
            Some(Value::Array(values)) => values,
            Some(other) => {
                return Err(SchemaError::EnumNotArray {
                    found: JsonKind::of(other).name(),
                })
            }
            None => return Err(SchemaError::MissingEnum),
        };

        let mut builder = Self::builder().possible_values(values);
        if let Some(id) = string_property(object, "$id") {
            builder = builder.id(id);
        }
        if let Some(title) = string_property(object, "title") {
            builder = builder.title(title);
        }
        if let Some(description) = string_property(object, "description") {
            builder = builder.description(description);
        }
        Ok(builder.build())
    }

    /// Describe the schema as JSON: `{"type": "enum", "enum": [...]}`, plus
    /// `$id`, `title` and `description` when set.
    ///
    /// # Examples
    ///
    /// ```
    /// use enum_schema::EnumSchema;
    /// use serde_json::json;
    ///
    /// let schema = EnumSchema::new([json!("a"), json!(2)]);
    /// assert_eq!(schema.to_json(), json!({"type": "enum", "enum": ["a", 2]}));
    /// ```
    pub fn to_json(&self) -> Value {
        let mut out = Map::new();
        if let Some(id) = &self.id {
            out.insert("$id".to_owned(), Value::String(id.clone()));
        }
        if let Some(title) = &self.title {
            out.insert("title".to_owned(), Value::String(title.clone()));
        }
        if let Some(description) = &self.description {
            out.insert("description".to_owned(), Value::String(description.clone()));
        }
        out.insert("type".to_owned(), Value::String("enum".to_owned()));
        out.insert(
            "enum".to_owned(),
            Value::Array(self.possible_values.iter().map(Value::from).collect()),
        );
        Value::Object(out)
    }
}

fn string_property<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object.get(key).and_then(Value::as_str)
}

/// Same base properties and the same permitted values, in any order.
impl PartialEq for EnumSchema {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
            && self.description == other.description
            && self.id == other.id
            && self.schema_location == other.schema_location
            && self.possible_values.len() == other.possible_values.len()
            && self
                .possible_values
                .iter()
                .all(|value| other.contains(value))
    }
}

impl Eq for EnumSchema {}

impl FromStr for EnumSchema {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self> {
        let schema: Value = serde_json::from_str(s)?;
        Self::from_json(&schema)
    }
}

impl Serialize for EnumSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EnumSchema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let schema = Value::deserialize(deserializer)?;
        Self::from_json(&schema).map_err(de::Error::custom)
    }
}
