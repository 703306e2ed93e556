// crates/instana-resources/src/api_token/tests.rs
// ============================================================================
// Module: API Token Handle Tests
// Description: Permission table and computed secret checks.
// Purpose: Pin flag defaults and internal id routing.
// Dependencies: instana-core, instana-restapi
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

use super::*;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn every_permission_defaults_to_false() {
    let handle = ApiTokenHandle::new();
    let planned =
        handle.metadata().schema.apply_defaults(StateValue::object().with(FIELD_NAME, "ci"));
    for (field, _) in API_TOKEN_PERMISSIONS {
        assert_eq!(planned.get(field).as_bool(), Some(false), "{field}");
    }
}

#[test]
fn permissions_travel_under_wire_names() {
    let state = StateValue::object()
        .with(FIELD_NAME, "ci")
        .with(FIELD_INTERNAL_ID, "internal-1")
        .with("can_configure_api_tokens", true)
        .with("limited_logs_scope", true);
    let token = token_from_state(&ObjectReader::root(&state)).unwrap();
    assert!(token.permission("canConfigureApiTokens"));
    assert!(token.permission("limitedLogsScope"));
    assert!(!token.permission("canViewLogs"));
    assert_eq!(token.internal_id, "internal-1");
}

#[test]
fn prefill_generates_secret_and_keeps_internal_id() {
    let handle = ApiTokenHandle::new();
    let mut plan = StateValue::object()
        .with(FIELD_NAME, "ci")
        .with(FIELD_INTERNAL_ID, "internal-1")
        .with(FIELD_ACCESS_GRANTING_TOKEN, StateValue::Unknown);
    handle.prefill_computed(&mut plan).unwrap();
    assert_eq!(plan.get(FIELD_INTERNAL_ID).as_str(), Some("internal-1"));
    assert_eq!(plan.get(FIELD_ACCESS_GRANTING_TOKEN).as_str().map(str::len), Some(20));
    assert_eq!(handle.metadata().resource_id_field, FIELD_INTERNAL_ID);
}

#[test]
fn payload_round_trips_to_equal_state() {
    let handle = ApiTokenHandle::new();
    let schema = &handle.metadata().schema;
    let planned = schema.complete(
        schema.apply_defaults(
            StateValue::object()
                .with(FIELD_ID, "token-1")
                .with(FIELD_NAME, "ci")
                .with(FIELD_INTERNAL_ID, "internal-1")
                .with(FIELD_ACCESS_GRANTING_TOKEN, "secret")
                .with("can_view_logs", true),
        ),
    );
    let payload = handle.state_to_payload(&planned).unwrap();
    let state = schema.complete(handle.payload_to_state(&payload, &planned).unwrap());
    assert_eq!(state, planned);
}

#[test]
fn full_name_is_renamed_on_upgrade() {
    let handle = ApiTokenHandle::new();
    let mut raw = serde_json::Map::new();
    raw.insert("full_name".to_string(), serde_json::Value::from("legacy"));
    let upgraders = &handle.metadata().state_upgraders;
    let upgraded = instana_core::upgrade::upgrade_state(upgraders, 0, 2, raw).unwrap();
    assert_eq!(upgraded.get("name").and_then(serde_json::Value::as_str), Some("legacy"));
}
