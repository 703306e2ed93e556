// crates/instana-resources/src/website_alert/tests.rs
// ============================================================================
// Module: Website Alert Config Handle Tests
// Description: Severity codec, rule union, and time threshold checks.
// Purpose: Pin the state and wire shapes of website alert configs.
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

use instana_restapi::models::time_threshold::TimeThreshold;

use super::*;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

fn js_error_rule() -> StateValue {
    StateValue::object()
        .with(
            FIELD_RULE,
            StateValue::object().with(
                "specific_js_error",
                StateValue::object()
                    .with(FIELD_METRIC_NAME, "onLoadTime")
                    .with(FIELD_OPERATOR, "CONTAINS")
                    .with(FIELD_VALUE, "TypeError"),
            ),
        )
        .with(FIELD_THRESHOLD_OPERATOR, ">")
        .with(
            FIELD_THRESHOLD,
            StateValue::object().with(
                "warning",
                StateValue::object().with("static", StateValue::object().with("value", 2.0)),
            ),
        )
}

fn plan() -> StateValue {
    StateValue::object()
        .with(FIELD_NAME, "storefront errors")
        .with(FIELD_SEVERITY, "critical")
        .with(FIELD_WEBSITE_ID, "site-1")
        .with(FIELD_ALERT_CHANNEL_IDS, StateValue::string_set(["ch-1"]))
        .with(FIELD_RULES, StateValue::List(vec![js_error_rule()]))
        .with(
            TIME_THRESHOLD_FIELD,
            StateValue::object().with(
                "user_impact_of_violations_in_sequence",
                StateValue::object()
                    .with("time_window", 300_000_i64)
                    .with("impact_measurement_method", "AGGREGATED")
                    .with("user_percentage", 0.25),
            ),
        )
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn severity_is_sent_as_code() {
    let config = config_from_state(&ObjectReader::root(&plan())).unwrap();
    assert_eq!(config.severity, Some(10));
    assert_eq!(config.enabled, Some(true));
    assert_eq!(config.rules[0].rule.alert_type, "specificJsError");
    assert_eq!(config.rules[0].rule.value.as_deref(), Some("TypeError"));
    assert_eq!(
        config.time_threshold,
        Some(TimeThreshold::UserImpactOfViolationsInSequence {
            time_window: 300_000,
            impact_measurement_method: "AGGREGATED".to_string(),
            user_percentage: Some(0.25),
            users: None,
        })
    );
}

#[test]
fn unknown_severity_term_is_rejected() {
    let state = plan().with(FIELD_SEVERITY, "fatal");
    let err = config_from_state(&ObjectReader::root(&state)).unwrap_err();
    assert_eq!(
        err,
        Diagnostics::from(MappingError::UnknownSeverity {
            input: "fatal".to_string(),
        })
    );
}

#[test]
fn unknown_severity_code_is_rejected_on_read() {
    let mut config = config_from_state(&ObjectReader::root(&plan())).unwrap();
    config.severity = Some(7);
    assert!(matches!(config_to_state(&config), Err(MappingError::UnknownSeverity { .. })));
}

#[test]
fn payload_round_trips_to_equal_state() {
    let handle = WebsiteAlertConfigHandle::new();
    let schema = &handle.metadata().schema;
    let planned = schema.complete(schema.apply_defaults(plan().with(FIELD_ID, "site-alert")));
    let payload = handle.state_to_payload(&planned).unwrap();
    let state = schema.complete(handle.payload_to_state(&payload, &planned).unwrap());
    assert_eq!(state, planned);
}

#[test]
fn request_impact_is_not_a_website_threshold() {
    let mut config = config_from_state(&ObjectReader::root(&plan())).unwrap();
    config.time_threshold = Some(TimeThreshold::RequestImpact {
        time_window: 60_000,
        requests: 10,
    });
    assert!(matches!(config_to_state(&config), Err(MappingError::UnsupportedEntityType { .. })));
}
