//! WASM bindings for enum-schema.
//!
//! Exposes `validate`, `validationError` and `describe` as `#[wasm_bindgen]`
//! functions callable from JavaScript/TypeScript. All arguments are JSON
//! text; malformed input throws a JS error, while a subject outside the
//! permitted set is a normal `false` result.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p enum-schema-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/enum_schema_wasm.wasm
//! ```
//!
//! The `*_json` functions hold the logic and are plain Rust so they can be
//! tested without a JS host.

use enum_schema::EnumSchema;
use serde_json::Value;
use wasm_bindgen::prelude::*;

fn parse_schema(schema_json: &str) -> Result<EnumSchema, String> {
    schema_json.parse::<EnumSchema>().map_err(|e| e.to_string())
}

fn parse_subject(subject_json: &str) -> Result<Value, String> {
    serde_json::from_str(subject_json).map_err(|e| format!("subject: {}", e))
}

/// `Ok(None)` when the subject is permitted, `Ok(Some(message))` with the
/// display form of the validation error otherwise.
pub fn validation_error_json(
    schema_json: &str,
    subject_json: &str,
) -> Result<Option<String>, String> {
    let schema = parse_schema(schema_json)?;
    let subject = parse_subject(subject_json)?;
    Ok(schema.validate(&subject).err().map(|e| e.to_string()))
}

/// The schema's `{"type": "enum", "enum": [...]}` descriptor as compact JSON.
pub fn describe_json(schema_json: &str) -> Result<String, String> {
    let schema = parse_schema(schema_json)?;
    serde_json::to_string(&schema).map_err(|e| e.to_string())
}

/// Return `true` if the subject (JSON text) is one of the schema's permitted
/// values.
///
/// Throws a JS error if either argument is not valid JSON or the schema has
/// no `enum` array.
#[wasm_bindgen]
pub fn validate(schema_json: &str, subject_json: &str) -> std::result::Result<bool, JsValue> {
    validation_error_json(schema_json, subject_json)
        .map(|failure| failure.is_none())
        .map_err(|e| JsValue::from_str(&e))
}

/// Return the failure message (`"#: <subject> is not a valid enum value"`)
/// or `undefined` when the subject is permitted.
#[wasm_bindgen(js_name = validationError)]
pub fn validation_error(
    schema_json: &str,
    subject_json: &str,
) -> std::result::Result<Option<String>, JsValue> {
    validation_error_json(schema_json, subject_json).map_err(|e| JsValue::from_str(&e))
}

/// Return the deduplicated enum descriptor as JSON text.
#[wasm_bindgen]
pub fn describe(schema_json: &str) -> std::result::Result<String, JsValue> {
    describe_json(schema_json).map_err(|e| JsValue::from_str(&e))
}
