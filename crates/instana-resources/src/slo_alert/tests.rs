// crates/instana-resources/src/slo_alert/tests.rs
// ============================================================================
// Module: SLO Alert Config Handle Tests
// Description: Alert type pairs and burn rate handling.
// Purpose: Pin the alert type to wire rule mapping.
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

fn plan(alert_type: &str) -> StateValue {
    StateValue::object()
        .with(FIELD_ID, "slo-alert-1")
        .with(FIELD_NAME, "checkout budget")
        .with(FIELD_SEVERITY, 10_i64)
        .with(FIELD_ALERT_TYPE, alert_type)
        .with(FIELD_SLO_IDS, StateValue::string_set(["SLOTFabc"]))
        .with(
            FIELD_TIME_THRESHOLD,
            StateValue::object().with(FIELD_WARM_UP, 60_000_i64).with(FIELD_COOL_DOWN, 300_000_i64),
        )
}

fn static_threshold() -> StateValue {
    StateValue::object().with(FIELD_OPERATOR, ">=").with(FIELD_VALUE, 0.5)
}

fn burn_rate() -> StateValue {
    StateValue::List(vec![
        StateValue::object()
            .with(FIELD_ALERT_WINDOW_TYPE, "SINGLE")
            .with(FIELD_DURATION, 1_i64)
            .with(FIELD_DURATION_UNIT_TYPE, "hour")
            .with(FIELD_THRESHOLD_OPERATOR, ">")
            .with(FIELD_THRESHOLD_VALUE, 14.4),
    ])
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn alert_types_map_to_rule_pairs() {
    let state = plan("error_budget").with(FIELD_THRESHOLD, static_threshold());
    let config = config_from_state(&ObjectReader::root(&state)).unwrap();
    assert_eq!(config.rule.alert_type, "ERROR_BUDGET");
    assert_eq!(config.rule.metric, "BURNED_PERCENTAGE");
    let threshold = config.threshold.unwrap();
    assert_eq!(threshold.kind, "staticThreshold");
    assert_eq!(threshold.operator, ">=");
    assert!(config.burn_rate_config.is_none());
    assert_eq!(config.time_threshold.time_window, 60_000);
    assert_eq!(config.time_threshold.expiry, 300_000);
}

#[test]
fn burn_rate_alert_drops_static_threshold() {
    let state = plan("burn_rate_v2")
        .with(FIELD_THRESHOLD, static_threshold())
        .with(FIELD_BURN_RATE_CONFIG, burn_rate());
    let config = config_from_state(&ObjectReader::root(&state)).unwrap();
    assert_eq!(config.rule.metric, "BURN_RATE_V2");
    assert!(config.threshold.is_none());
    let windows = config.burn_rate_config.unwrap();
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].threshold.operator, ">");
    assert!((windows[0].threshold.value - 14.4).abs() < f64::EPSILON);
}

#[test]
fn burn_rate_alert_requires_a_window() {
    let err = config_from_state(&ObjectReader::root(&plan("burn_rate_v2"))).unwrap_err();
    assert!(err.to_string().contains("at least one entry"), "{err}");
}

#[test]
fn unknown_rule_pair_is_unsupported() {
    let mut config = config_from_state(&ObjectReader::root(&plan("status"))).unwrap();
    config.rule.metric = "LATENCY".to_string();
    assert_eq!(
        config_to_state(&config).unwrap_err(),
        MappingError::UnsupportedEntityType {
            kind: "SERVICE_LEVELS_OBJECTIVE/LATENCY".to_string(),
        }
    );
}

#[test]
fn payload_round_trips_to_equal_state() {
    let handle = SloAlertConfigHandle::new();
    let schema = &handle.metadata().schema;
    let planned = schema.complete(
        schema.apply_defaults(plan("burn_rate_v2").with(FIELD_BURN_RATE_CONFIG, burn_rate())),
    );
    let payload = handle.state_to_payload(&planned).unwrap();
    let state = schema.complete(handle.payload_to_state(&payload, &planned).unwrap());
    assert_eq!(state, planned);
}

#[test]
fn severity_must_be_warning_or_critical_code() {
    let schema = SloAlertConfigHandle::new().metadata().schema.clone();
    let diagnostics = schema.validate(&schema.complete(plan("status").with(FIELD_SEVERITY, 7_i64)));
    assert!(!diagnostics.is_empty());
}
