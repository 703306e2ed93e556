// crates/instana-resources/src/synthetic_test/tests.rs
// ============================================================================
// Module: Synthetic Test Handle Tests
// Description: Test type selection and defaults.
// Purpose: Pin how the top-level slots map to `syntheticType`.
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

fn plan() -> StateValue {
    StateValue::object()
        .with(FIELD_ID, "test-1")
        .with(FIELD_LABEL, "homepage")
        .with(FIELD_LOCATIONS, StateValue::string_set(["loc-1", "loc-2"]))
        .with(
            "http_action",
            StateValue::object()
                .with(FIELD_URL, "https://example.com")
                .with(FIELD_OPERATION, "GET")
                .with(FIELD_EXPECT_STATUS, 200_i64),
        )
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn http_action_slot_selects_synthetic_type() {
    let handle = SyntheticTestHandle::new();
    let planned = handle.metadata().schema.apply_defaults(plan());
    let test = test_from_state(&ObjectReader::root(&planned)).unwrap();
    assert_eq!(test.configuration.synthetic_type, "HTTPAction");
    assert_eq!(test.configuration.url.as_deref(), Some("https://example.com"));
    assert_eq!(test.configuration.retry_interval, 1);
    assert_eq!(test.playback_mode, "Simultaneous");
    assert_eq!(test.test_frequency, Some(15));
    assert!(test.active);
    assert!(test.configuration.headers.is_none());
}

#[test]
fn both_slots_set_is_rejected() {
    let state =
        plan().with("http_script", StateValue::object().with(FIELD_SCRIPT, "console.log(1)"));
    let err = test_from_state(&ObjectReader::root(&state)).unwrap_err();
    assert!(err.to_string().contains("exactly one"), "{err}");
}

#[test]
fn unknown_synthetic_type_is_unsupported() {
    let mut test = test_from_state(&ObjectReader::root(&plan())).unwrap();
    test.configuration.synthetic_type = "BrowserScript".to_string();
    assert_eq!(
        test_to_state(&test).unwrap_err(),
        MappingError::UnsupportedEntityType {
            kind: "BrowserScript".to_string(),
        }
    );
}

#[test]
fn script_payload_nulls_action_slot() {
    let state = plan()
        .with("http_action", StateValue::Null)
        .with("http_script", StateValue::object().with(FIELD_SCRIPT, "console.log(1)"));
    let test = test_from_state(&ObjectReader::root(&state)).unwrap();
    let back = test_to_state(&test).unwrap();
    assert!(back.get("http_action").is_null());
    assert_eq!(back.get("http_script").get(FIELD_SCRIPT).as_str(), Some("console.log(1)"));
}

#[test]
fn payload_round_trips_to_equal_state() {
    let handle = SyntheticTestHandle::new();
    let schema = &handle.metadata().schema;
    let planned = schema.complete(schema.apply_defaults(plan()));
    let payload = handle.state_to_payload(&planned).unwrap();
    let state = schema.complete(handle.payload_to_state(&payload, &planned).unwrap());
    assert_eq!(state, planned);
}

#[test]
fn frequency_above_two_hours_is_rejected() {
    let schema = SyntheticTestHandle::new().metadata().schema.clone();
    let diagnostics = schema.validate(&schema.complete(plan().with(FIELD_TEST_FREQUENCY, 121_i64)));
    assert!(!diagnostics.is_empty());
}
