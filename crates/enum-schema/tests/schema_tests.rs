//! Tests for the `enum` constraint: construction and deduplication,
//! membership validation, failure reporting, loading, and serialization.

use enum_schema::schema::pointer_fragment;
use enum_schema::{EnumSchema, SchemaError, ValidationErrorKind};
use serde_json::{json, Value};
use std::sync::Arc;

fn colors() -> EnumSchema {
    EnumSchema::new([json!("red"), json!("green"), json!("blue")])
}

// ============================================================================
// 1. Construction and deduplication
// ============================================================================

#[test]
fn equal_candidates_collapse_to_one_entry() {
    let schema = EnumSchema::new([json!(1), json!(1), json!(1.0)]);
    assert_eq!(schema.len(), 1);
}

#[test]
fn structurally_equal_objects_collapse() {
    let schema = EnumSchema::new([json!({"a": 1, "b": [2]}), json!({"b": [2.0], "a": 1})]);
    assert_eq!(schema.len(), 1);
}

#[test]
fn distinct_candidates_are_all_kept_in_first_occurrence_order() {
    let schema = EnumSchema::new([json!("x"), json!(1), json!("x"), json!([1]), json!(1.0)]);
    let kept: Vec<Value> = schema.possible_values().iter().map(Value::from).collect();
    assert_eq!(kept, vec![json!("x"), json!(1), json!([1])]);
}

#[test]
fn host_scalars_can_be_used_as_candidates() {
    let schema = EnumSchema::new(["small", "medium", "large"]);
    assert_eq!(schema.len(), 3);
    assert!(schema.validate(&json!("medium")).is_ok());
}

#[test]
fn builder_accumulates_single_values() {
    let schema = EnumSchema::builder()
        .possible_value(1i64)
        .possible_value("x")
        .possible_value(json!([true, null]))
        .possible_value(1.0)
        .build();
    assert_eq!(schema.len(), 3);
}

#[test]
fn builder_possible_values_replaces_earlier_candidates() {
    let schema = EnumSchema::builder()
        .possible_value("dropped")
        .possible_values([json!("a"), json!("b")])
        .build();
    assert_eq!(schema.len(), 2);
    assert!(!schema.contains("dropped"));
}

#[test]
fn empty_schema_rejects_everything() {
    let schema = EnumSchema::new(Vec::<Value>::new());
    assert!(schema.is_empty());
    assert!(schema.validate(&json!(null)).is_err());
}

// ============================================================================
// 2. Validation
// ============================================================================

#[test]
fn mixed_candidates_accept_matching_subjects() {
    let schema = EnumSchema::new([json!(1), json!("x"), json!([true, null])]);
    assert!(schema.validate(&json!(1)).is_ok());
    assert!(schema.validate(&json!(1.0)).is_ok());
    assert!(schema.validate(&json!("x")).is_ok());
    assert!(schema.validate(&json!([true, null])).is_ok());
}

#[test]
fn mixed_candidates_reject_near_misses() {
    let schema = EnumSchema::new([json!(1), json!("x"), json!([true, null])]);
    assert!(schema.validate(&json!("1")).is_err());
    assert!(schema.validate(&json!([null, true])).is_err());
    assert!(schema.validate(&json!([true])).is_err());
}

#[test]
fn subject_outside_set_fails_with_enum_mismatch() {
    let schema = EnumSchema::new([json!(1), json!(2)]);
    let err = schema.validate(&json!(3)).unwrap_err();
    assert_eq!(err.kind(), ValidationErrorKind::EnumMismatch);
    assert_eq!(err.keyword(), "enum");
    assert_eq!(err.subject(), &json!(3));
}

#[test]
fn color_scenario() {
    let schema = colors();
    assert!(schema.validate(&json!("green")).is_ok());

    let err = schema.validate(&json!("yellow")).unwrap_err();
    assert_eq!(err.message(), "yellow is not a valid enum value");
    assert_eq!(err.pointer(), "#");
    assert_eq!(err.to_string(), "#: yellow is not a valid enum value");
}

#[test]
fn object_subjects_are_matched_regardless_of_key_order() {
    let schema = EnumSchema::new([json!({"unit": "ms", "value": 10})]);
    assert!(schema.validate(&json!({"value": 10.0, "unit": "ms"})).is_ok());
    assert!(schema.validate(&json!({"value": 10, "unit": "s"})).is_err());
}

#[test]
fn contains_accepts_host_values() {
    let schema = EnumSchema::new([json!(4), json!("four")]);
    assert!(schema.contains(4.0));
    assert!(schema.contains("four"));
    assert!(!schema.contains(5i64));
}

// ============================================================================
// 3. Failure details
// ============================================================================

#[test]
fn failure_message_renders_non_strings_as_json() {
    let schema = colors();
    let err = schema.validate(&json!({"color": "red"})).unwrap_err();
    assert_eq!(err.message(), r#"{"color":"red"} is not a valid enum value"#);

    let err = schema.validate(&json!(null)).unwrap_err();
    assert_eq!(err.message(), "null is not a valid enum value");
}

#[test]
fn failure_keeps_the_raw_subject() {
    let schema = EnumSchema::new([json!(1)]);
    let subject = json!({"b": 2.50, "a": [3]});
    let err = schema.validate(&subject).unwrap_err();
    assert_eq!(err.subject(), &subject);
}

#[test]
fn validate_at_reports_the_supplied_pointer() {
    let schema = colors();
    let err = schema.validate_at(&json!("teal"), "#/palette/2").unwrap_err();
    assert_eq!(err.pointer(), "#/palette/2");
    assert_eq!(err.to_string(), "#/palette/2: teal is not a valid enum value");
}

#[test]
fn pointer_fragments_escape_characters_outside_uri_fragments() {
    assert_eq!(pointer_fragment(""), "#");
    assert_eq!(pointer_fragment("/palette/2"), "#/palette/2");
    assert_eq!(pointer_fragment("/a b"), "#/a%20b");
    assert_eq!(pointer_fragment("/50%"), "#/50%25");
    assert_eq!(pointer_fragment("/caf\u{e9}"), "#/caf%C3%A9");
    assert_eq!(pointer_fragment("/{x}|\"y\""), "#/%7Bx%7D%7C%22y%22");
    // `~0` and `~1` escapes and sub-delimiters pass through.
    assert_eq!(pointer_fragment("/m~0n/a~1b/k=v;w"), "#/m~0n/a~1b/k=v;w");
}

#[test]
fn failure_carries_schema_location() {
    let schema = EnumSchema::builder()
        .possible_values([json!("on"), json!("off")])
        .schema_location("#/properties/state")
        .build();
    let err = schema.validate(&json!("dimmed")).unwrap_err();
    assert_eq!(err.schema_location(), Some("#/properties/state"));

    let err = colors().validate(&json!("dimmed")).unwrap_err();
    assert_eq!(err.schema_location(), None);
}

// ============================================================================
// 4. Loading from schema JSON
// ============================================================================

#[test]
fn from_json_reads_enum_and_base_properties() {
    let schema = EnumSchema::from_json(&json!({
        "$id": "https://example.com/color.json",
        "title": "Color",
        "description": "Primary colors",
        "enum": ["red", "green", "blue", "red"],
        "default": "red"
    }))
    .unwrap();
    assert_eq!(schema.len(), 3);
    assert_eq!(schema.id(), Some("https://example.com/color.json"));
    assert_eq!(schema.title(), Some("Color"));
    assert_eq!(schema.description(), Some("Primary colors"));
}

#[test]
fn from_json_requires_enum_keyword() {
    let err = EnumSchema::from_json(&json!({"type": "string"})).unwrap_err();
    assert!(matches!(err, SchemaError::MissingEnum));
}

#[test]
fn from_json_requires_enum_array() {
    let err = EnumSchema::from_json(&json!({"enum": "red"})).unwrap_err();
    assert!(matches!(err, SchemaError::EnumNotArray { found: "string" }));
    assert_eq!(err.to_string(), "\"enum\" must be an array, found string");
}

#[test]
fn from_json_requires_object() {
    let err = EnumSchema::from_json(&json!(["red"])).unwrap_err();
    assert!(matches!(err, SchemaError::NotAnObject { found: "array" }));
}

#[test]
fn parse_from_schema_text() {
    let schema: EnumSchema = r#"{"enum": [1, "x", [true, null]]}"#.parse().unwrap();
    assert!(schema.validate(&json!([true, null])).is_ok());
}

#[test]
fn parse_rejects_malformed_text() {
    let err = "{\"enum\": [1,".parse::<EnumSchema>().unwrap_err();
    assert!(matches!(err, SchemaError::JsonParse(_)));
}

#[test]
fn deserialize_via_serde() {
    let schema: EnumSchema = serde_json::from_value(json!({"enum": [1, 2]})).unwrap();
    assert_eq!(schema.len(), 2);

    let err = serde_json::from_value::<EnumSchema>(json!({"enum": {}})).unwrap_err();
    assert!(err.to_string().contains("\"enum\" must be an array"));
}

// ============================================================================
// 5. Serialization and equality
// ============================================================================

#[test]
fn to_json_emits_enum_descriptor() {
    let schema = EnumSchema::new([json!("a"), json!({"z": 1, "y": 2}), json!(3)]);
    assert_eq!(
        schema.to_json(),
        json!({"type": "enum", "enum": ["a", {"y": 2, "z": 1}, 3]})
    );
}

#[test]
fn to_json_includes_base_properties_when_set() {
    let schema = EnumSchema::builder()
        .possible_value("a")
        .title("Letters")
        .id("urn:letters")
        .build();
    assert_eq!(
        schema.to_json(),
        json!({"$id": "urn:letters", "title": "Letters", "type": "enum", "enum": ["a"]})
    );
}

#[test]
fn descriptor_loads_back_into_an_equal_schema() {
    let original = EnumSchema::builder()
        .possible_values([json!(1), json!([1, 2]), json!({"k": null})])
        .description("mixed")
        .build();
    let text = serde_json::to_string(&original).unwrap();
    let reloaded: EnumSchema = text.parse().unwrap();
    assert_eq!(reloaded, original);
}

#[test]
fn schemas_with_same_values_in_any_order_are_equal() {
    let a = EnumSchema::new([json!(1), json!("x")]);
    let b = EnumSchema::new([json!("x"), json!(1.0)]);
    assert_eq!(a, b);
    assert_ne!(a, EnumSchema::new([json!(1)]));
    assert_ne!(a, EnumSchema::builder().possible_values([json!(1), json!("x")]).title("t").build());
}

// ============================================================================
// 6. Sharing across threads
// ============================================================================

#[test]
fn schema_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EnumSchema>();
}

#[test]
fn concurrent_validation_gives_consistent_results() {
    let schema = Arc::new(EnumSchema::new((0..100i64).map(|n| json!(n * 2))));
    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let schema = Arc::clone(&schema);
            std::thread::spawn(move || {
                (0..200i64)
                    .filter(|n| (n + worker) % 4 == 0)
                    .map(|n| (n, schema.validate(&json!(n)).is_ok()))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for (n, accepted) in handle.join().unwrap() {
            assert_eq!(accepted, n % 2 == 0, "subject {n}");
        }
    }
}
