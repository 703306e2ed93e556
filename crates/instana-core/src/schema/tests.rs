// crates/instana-core/src/schema/tests.rs
// ============================================================================
// Module: Schema Tests
// Description: Unit tests for schema validation, defaults, and completion.
// Purpose: Validate generic attribute checks shared by every resource.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Exercises required attributes, type checks, validators, unknown handling,
//! and the shaping helpers used before and after mapping.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Test-only assertions use unwrap/expect for clarity."
)]

use serde_json::json;

use super::Attribute;
use super::AttributeType;
use super::Schema;
use super::Validator;
use crate::value::StateValue;

fn schema() -> Schema {
    Schema::new(
        "test resource",
        vec![
            Attribute::string("id").computed(),
            Attribute::string("name").required().validate(Validator::LengthBetween(1, 8)),
            Attribute::int("granularity")
                .default_value(600_000_i64)
                .validate(Validator::IntOneOf(&[60_000, 600_000])),
            Attribute::new("tags", AttributeType::string_set()),
            Attribute::block(
                "threshold",
                vec![
                    Attribute::float("value").required().validate(Validator::FloatGreaterThan(0.0)),
                ],
            ),
        ],
    )
}

#[test]
fn valid_object_has_no_diagnostics() {
    let value = StateValue::object().with("name", "ok").with("granularity", 60_000_i64);
    assert!(schema().validate(&value).is_empty());
}

#[test]
fn missing_required_attribute_is_reported_at_path() {
    let diagnostics = schema().validate(&StateValue::object());
    assert_eq!(diagnostics.len(), 1);
    let diagnostic = diagnostics.iter().next().unwrap();
    assert_eq!(diagnostic.path.as_ref().map(ToString::to_string).as_deref(), Some("name"));
}

#[test]
fn unknown_values_pass_validation() {
    let value = StateValue::object().with("name", StateValue::Unknown);
    assert!(schema().validate(&value).is_empty());
}

#[test]
fn validators_and_types_are_checked() {
    let value = StateValue::object()
        .with("name", "far too long")
        .with("granularity", 5_i64)
        .with("tags", "not-a-set")
        .with("threshold", StateValue::object().with("value", 0.0));
    let diagnostics = schema().validate(&value);
    let paths: Vec<String> = diagnostics
        .iter()
        .filter_map(|diagnostic| diagnostic.path.as_ref().map(ToString::to_string))
        .collect();
    assert_eq!(paths, vec!["name", "granularity", "tags", "threshold.value"]);
}

#[test]
fn unsupported_arguments_are_rejected() {
    let value = StateValue::object().with("name", "ok").with("bogus", true);
    let diagnostics = schema().validate(&value);
    assert!(diagnostics.to_string().contains("\"bogus\" is not expected here"));
}

#[test]
fn defaults_fill_null_attributes_only() {
    let filled = schema().apply_defaults(StateValue::object().with("name", "ok"));
    assert_eq!(filled.get("granularity"), &StateValue::Int(600_000));
    let kept = schema().apply_defaults(StateValue::object().with("granularity", 60_000_i64));
    assert_eq!(kept.get("granularity"), &StateValue::Int(60_000));
}

#[test]
fn complete_adds_explicit_nulls() {
    let completed = schema().complete(StateValue::object().with("name", "ok"));
    let fields = completed.as_fields().unwrap();
    assert_eq!(fields.len(), 5);
    assert!(fields.get("threshold").unwrap().is_null());
}

#[test]
fn decode_json_follows_declared_types() {
    let raw = json!({
        "id": "abc",
        "name": "ok",
        "granularity": 600000,
        "tags": ["b", "a"],
        "threshold": [{"value": 2}],
        "removed": true
    });
    let decoded = schema().decode_json(raw.as_object().unwrap());
    assert_eq!(decoded.get("tags"), &StateValue::string_set(["a", "b"]));
    assert_eq!(decoded.get("threshold").get("value"), &StateValue::Float(2.0));
    assert!(decoded.get("removed").is_null());
    assert_eq!(decoded.as_fields().unwrap().len(), 5);
}
