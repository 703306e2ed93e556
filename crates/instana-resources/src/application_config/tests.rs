// crates/instana-resources/src/application_config/tests.rs
// ============================================================================
// Module: Application Config Handle Tests
// Description: Defaults, filter mapping, and legacy state upgrades.
// Purpose: Keep perspectives stable across schema versions.
// Dependencies: instana-core, instana-restapi, serde_json
// ============================================================================

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Test-only assertions use unwrap/expect for clarity."
)]

use instana_core::upgrade::upgrade_state;
use serde_json::json;

use super::*;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

fn plan() -> StateValue {
    StateValue::object()
        .with(FIELD_ID, "app-1")
        .with(FIELD_LABEL, "checkout")
        .with(TAG_FILTER_FIELD, "call.type@dest EQUALS 'HTTP'")
        .with(
            FIELD_ACCESS_RULE,
            StateValue::List(vec![
                StateValue::object()
                    .with("access_type", "READ_WRITE")
                    .with("relation_type", "GLOBAL"),
            ]),
        )
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn scopes_default_when_unset() {
    let schema = ApplicationConfigHandle::new().metadata().schema.clone();
    let planned = schema.apply_defaults(plan());
    let config = config_from_state(&ObjectReader::root(&planned)).unwrap();
    assert_eq!(config.scope, "INCLUDE_NO_DOWNSTREAM");
    assert_eq!(config.boundary_scope, "DEFAULT");
    assert!(config.tag_filter_expression.is_some());
}

#[test]
fn invalid_tag_filter_is_reported_at_tag_filter() {
    let state = plan().with(TAG_FILTER_FIELD, "call.type@dest EQUALS");
    let err = config_from_state(&ObjectReader::root(&state)).unwrap_err();
    assert_eq!(err.iter().next().unwrap().path, Some(AttributePath::attribute(TAG_FILTER_FIELD)));
}

#[test]
fn legacy_state_is_upgraded_to_current_shape() {
    let handle = ApplicationConfigHandle::new();
    let raw = json!({
        "id": "app-1",
        "full_label": "checkout",
        "match_specification": "legacy",
        "tag_filter": "call.type@dest EQUALS 'HTTP'"
    });
    let serde_json::Value::Object(raw) = raw else { panic!("object expected") };
    let upgraders = &handle.metadata().state_upgraders;
    let upgraded = upgrade_state(upgraders, 0, SCHEMA_VERSION, raw).unwrap();
    assert_eq!(upgraded.get(FIELD_LABEL), Some(&json!("checkout")));
    assert!(!upgraded.contains_key(FIELD_FULL_LABEL));
    assert!(!upgraded.contains_key(FIELD_MATCH_SPECIFICATION));
}

#[test]
fn payload_round_trips_to_equal_state() {
    let handle = ApplicationConfigHandle::new();
    let schema = &handle.metadata().schema;
    let planned = schema.complete(schema.apply_defaults(plan()));
    let payload = handle.state_to_payload(&planned).unwrap();
    let state = schema.complete(handle.payload_to_state(&payload, &planned).unwrap());
    assert_eq!(state, planned);
}
