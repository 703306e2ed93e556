// crates/instana-resources/src/automation_action/tests.rs
// ============================================================================
// Module: Automation Action Handle Tests
// Description: Field flattening and timeout placement checks.
// Purpose: Pin how action blocks become named wire fields.
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
// SECTION: Fixtures
// ============================================================================

fn http_plan() -> StateValue {
    let headers = BTreeMap::from([("Accept".to_string(), "application/json".to_string())]);
    StateValue::object()
        .with(FIELD_ID, "action-1")
        .with(FIELD_NAME, "restart")
        .with(FIELD_TAGS, StateValue::string_list(["ops"]))
        .with(
            "http",
            StateValue::object()
                .with(FIELD_HOST, "https://hooks.example.com/restart")
                .with(FIELD_METHOD, "POST")
                .with(FIELD_HEADERS, StateValue::string_map_or_null(&headers))
                .with(FIELD_IGNORE_CERTIFICATE_ERRORS, true)
                .with(FIELD_TIMEOUT, "30"),
        )
        .with(
            FIELD_INPUT_PARAMETER,
            StateValue::List(vec![
                StateValue::object()
                    .with(FIELD_NAME, "host")
                    .with(FIELD_TYPE, "static")
                    .with(FIELD_REQUIRED, true),
            ]),
        )
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn http_block_flattens_to_fields() {
    let action = action_from_state(&ObjectReader::root(&http_plan())).unwrap();
    assert_eq!(action.kind, "HTTP");
    assert_eq!(action.field_value("host"), Some("https://hooks.example.com/restart"));
    assert_eq!(action.field_value("method"), Some("POST"));
    assert_eq!(action.field_value("headers"), Some(r#"{"Accept":"application/json"}"#));
    assert_eq!(action.field_value("ignoreCertErrors"), Some("true"));
    assert_eq!(action.field_value("timeout"), Some("30"));
    assert_eq!(action.input_parameters[0].kind, "static");
}

#[test]
fn script_content_is_marked_base64() {
    let state = StateValue::object()
        .with(FIELD_NAME, "cleanup")
        .with(
            "script",
            StateValue::object()
                .with(FIELD_CONTENT, "ZWNobyBoaQ==")
                .with(FIELD_INTERPRETER, "bash"),
        );
    let action = action_from_state(&ObjectReader::root(&state)).unwrap();
    assert_eq!(action.kind, "SCRIPT");
    let script = action.fields.iter().find(|field| field.name == "script_ssh").unwrap();
    assert_eq!(script.encoding, "base64");
    assert_eq!(action.field_value("subtype"), Some("bash"));
}

#[test]
fn top_level_timeout_is_kept_at_top_level() {
    let state = StateValue::object()
        .with(FIELD_NAME, "cleanup")
        .with(FIELD_TIMEOUT, "60")
        .with("script", StateValue::object().with(FIELD_CONTENT, "ZWNobyBoaQ=="));
    let action = action_from_state(&ObjectReader::root(&state)).unwrap();
    assert_eq!(action.field_value("timeout"), Some("60"));
    let back = action_to_state(&action, &state).unwrap();
    assert_eq!(back.get(FIELD_TIMEOUT).as_str(), Some("60"));
    assert!(back.get("script").get(FIELD_TIMEOUT).is_null());
}

#[test]
fn payload_round_trips_to_equal_state() {
    let handle = AutomationActionHandle::new();
    let schema = &handle.metadata().schema;
    let planned = schema.complete(schema.apply_defaults(http_plan()));
    let payload = handle.state_to_payload(&planned).unwrap();
    let state = schema.complete(handle.payload_to_state(&payload, &planned).unwrap());
    assert_eq!(state, planned);
}

#[test]
fn unknown_action_type_is_unsupported() {
    let mut action = action_from_state(&ObjectReader::root(&http_plan())).unwrap();
    action.kind = "JIRA".to_string();
    assert_eq!(
        action_to_state(&action, &StateValue::Null).unwrap_err(),
        MappingError::UnsupportedEntityType {
            kind: "JIRA".to_string(),
        }
    );
}

#[test]
fn non_string_header_values_are_rendered_as_text() {
    let headers = headers_to_state(r#"{"X-Retries":3}"#).unwrap();
    assert_eq!(headers.get("X-Retries").as_str(), Some("3"));
}
