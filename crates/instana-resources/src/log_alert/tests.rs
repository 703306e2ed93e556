// crates/instana-resources/src/log_alert/tests.rs
// ============================================================================
// Module: Log Alert Config Handle Tests
// Description: Required tag filter, grouping, and rule defaults.
// Purpose: Pin how log alerts reach the global alert endpoint.
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
        .with(FIELD_ID, "log-1")
        .with(FIELD_NAME, "error burst")
        .with(TAG_FILTER_FIELD, "log.level@na EQUALS 'ERROR'")
        .with(
            FIELD_GROUP_BY,
            StateValue::List(vec![
                StateValue::object().with(FIELD_TAG_NAME, "host.name"),
                StateValue::object().with(FIELD_TAG_NAME, "k8s.label").with(FIELD_KEY, "app"),
            ]),
        )
        .with(FIELD_GRACE_PERIOD, 300_000_i64)
        .with(
            FIELD_RULES,
            StateValue::object()
                .with(FIELD_METRIC_NAME, "log.count")
                .with(FIELD_THRESHOLD_OPERATOR, ">")
                .with(
                    FIELD_THRESHOLD,
                    StateValue::object().with(
                        "warning",
                        StateValue::object()
                            .with("static", StateValue::object().with("value", 100.0)),
                    ),
                ),
        )
        .with(
            TIME_THRESHOLD_FIELD,
            StateValue::object().with(
                "violations_in_sequence",
                StateValue::object().with("time_window", 600_000_i64),
            ),
        )
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn group_by_keys_are_optional() {
    let config = config_from_state(&ObjectReader::root(&plan())).unwrap();
    assert_eq!(config.group_by.len(), 2);
    assert_eq!(config.group_by[0].key, None);
    assert_eq!(config.group_by[1].key.as_deref(), Some("app"));
    assert_eq!(config.rules[0].rule.alert_type, LOG_ALERT_TYPE_COUNT);
    assert_eq!(config.grace_period, Some(300_000));
}

#[test]
fn missing_tag_filter_is_reported_at_its_path() {
    let state = plan().with(TAG_FILTER_FIELD, StateValue::Null);
    let err = config_from_state(&ObjectReader::root(&state)).unwrap_err();
    assert_eq!(err.iter().next().unwrap().path, Some(AttributePath::attribute(TAG_FILTER_FIELD)));
    assert!(err.to_string().contains("is required"));
}

#[test]
fn payload_round_trips_to_equal_state() {
    let handle = LogAlertConfigHandle::new();
    let schema = &handle.metadata().schema;
    let planned = schema.complete(schema.apply_defaults(plan()));
    let payload = handle.state_to_payload(&planned).unwrap();
    let state = schema.complete(handle.payload_to_state(&payload, &planned).unwrap());
    assert_eq!(state, planned);
}
