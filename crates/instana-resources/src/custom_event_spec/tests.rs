// crates/instana-resources/src/custom_event_spec/tests.rs
// ============================================================================
// Module: Custom Event Specification Handle Tests
// Description: Rule grouping, severity codec, and metric pattern checks.
// Purpose: Pin how typed rule lists flatten onto the wire.
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

fn system_rule() -> StateValue {
    StateValue::object()
        .with(FIELD_SEVERITY, "critical")
        .with(FIELD_SYSTEM_RULE_ID, "system-rule-1")
}

fn threshold_rule() -> StateValue {
    StateValue::object()
        .with(FIELD_SEVERITY, "warning")
        .with(FIELD_METRIC_NAME, "cpu.used")
        .with(FIELD_ROLLUP, 1_000_i64)
        .with(FIELD_WINDOW, 60_000_i64)
        .with(FIELD_AGGREGATION, "avg")
        .with(FIELD_CONDITION_OPERATOR, ">")
        .with(FIELD_CONDITION_VALUE, 0.9)
        .with(FIELD_METRIC_PATTERN, StateValue::object().with(FIELD_PREFIX, "disk."))
}

fn plan(rules: StateValue) -> StateValue {
    StateValue::object()
        .with(FIELD_ID, "spec-1")
        .with(FIELD_NAME, "high cpu")
        .with(FIELD_ENTITY_TYPE, "host")
        .with(FIELD_RULES, rules)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn rules_flatten_in_kind_order_with_severity_codes() {
    let rules = StateValue::object()
        .with("threshold", StateValue::List(vec![threshold_rule()]))
        .with("system", StateValue::List(vec![system_rule()]));
    let schema = CustomEventSpecificationHandle::new().metadata().schema.clone();
    let planned = schema.apply_defaults(plan(rules));
    let specification = specification_from_state(&ObjectReader::root(&planned)).unwrap();
    let kinds: Vec<&str> = specification.rules.iter().map(|rule| rule.rule_type.as_str()).collect();
    assert_eq!(kinds, vec!["system", "threshold"]);
    assert_eq!(specification.rules[0].severity, 10);
    assert_eq!(specification.rules[1].severity, 5);
    assert_eq!(specification.rule_logical_operator, "AND");
    let pattern = specification.rules[1].metric_pattern.as_ref().unwrap();
    assert_eq!(pattern.operator, "is");
    assert_eq!(pattern.postfix, None);
}

#[test]
fn empty_rules_block_is_rejected() {
    let state = plan(StateValue::object());
    let err = specification_from_state(&ObjectReader::root(&state)).unwrap_err();
    assert!(err.to_string().contains("at least one rule"));
}

#[test]
fn unknown_severity_term_is_rejected() {
    let rules = StateValue::object()
        .with("system", StateValue::List(vec![system_rule().with(FIELD_SEVERITY, "fatal")]));
    let err = specification_from_state(&ObjectReader::root(&plan(rules))).unwrap_err();
    assert_eq!(err.iter().next().unwrap().summary, "Unknown severity");
}

#[test]
fn every_invalid_rule_and_field_is_reported() {
    let rules = StateValue::object()
        .with("system", StateValue::List(vec![system_rule().with(FIELD_SEVERITY, "fatal")]))
        .with("threshold", StateValue::List(vec![threshold_rule().with(FIELD_SEVERITY, "minor")]));
    let mut state = plan(rules);
    state.insert(FIELD_NAME, StateValue::Null);
    let err = specification_from_state(&ObjectReader::root(&state)).unwrap_err();
    let summaries: Vec<&str> = err.iter().map(|diagnostic| diagnostic.summary.as_str()).collect();
    assert_eq!(summaries, vec!["Invalid configuration", "Unknown severity", "Unknown severity"]);
}

#[test]
fn unknown_rule_type_is_unsupported() {
    let specification = CustomEventSpecification {
        rules: vec![RuleSpecification {
            rule_type: "anomaly".to_string(),
            severity: 5,
            ..RuleSpecification::default()
        }],
        ..CustomEventSpecification::default()
    };
    let err = specification_to_state(&specification).unwrap_err();
    assert_eq!(err, MappingError::UnsupportedEntityType { kind: "anomaly".to_string() });
}

#[test]
fn payload_round_trips_to_equal_state() {
    let handle = CustomEventSpecificationHandle::new();
    let schema = &handle.metadata().schema;
    let host = StateValue::object()
        .with(FIELD_SEVERITY, "warning")
        .with(FIELD_OFFLINE_DURATION, 60_000_i64)
        .with(TAG_FILTER_FIELD, "host.name@na EQUALS 'db-1'");
    let rules = StateValue::object()
        .with("host_availability", StateValue::List(vec![host]))
        .with(
            "system",
            StateValue::List(vec![system_rule(), system_rule().with(FIELD_SEVERITY, "warning")]),
        )
        .with("threshold", StateValue::List(vec![threshold_rule()]));
    let planned =
        schema.complete(schema.apply_defaults(plan(rules).with(FIELD_QUERY, "entity.zone:eu")));
    let payload = handle.state_to_payload(&planned).unwrap();
    let state = schema.complete(handle.payload_to_state(&payload, &planned).unwrap());
    assert_eq!(state, planned);
}
