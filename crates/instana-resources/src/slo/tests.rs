// crates/instana-resources/src/slo/tests.rs
// ============================================================================
// Module: SLO Config Handle Tests
// Description: Union discriminators and id prefill checks.
// Purpose: Pin the wire discriminators of entity, indicator, and time window.
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

fn plan(indicator: StateValue) -> StateValue {
    StateValue::object()
        .with(FIELD_ID, "SLOTFabc")
        .with(FIELD_NAME, "checkout")
        .with(FIELD_TARGET, 0.99)
        .with(FIELD_TAGS, StateValue::string_set(["team-a"]))
        .with(
            FIELD_ENTITY,
            StateValue::object().with(
                "application",
                StateValue::object()
                    .with(FIELD_APPLICATION_ID, "app-1")
                    .with(FIELD_BOUNDARY_SCOPE, "ALL"),
            ),
        )
        .with(FIELD_INDICATOR, indicator)
        .with(
            FIELD_TIME_WINDOW,
            StateValue::object().with(
                "fixed",
                StateValue::object()
                    .with(FIELD_DURATION, 1_i64)
                    .with(FIELD_DURATION_UNIT, "week")
                    .with(FIELD_START_TIMESTAMP, 1_700_000_000_000.0),
            ),
        )
}

fn latency() -> StateValue {
    StateValue::object().with(
        "time_based_latency",
        StateValue::object().with(FIELD_THRESHOLD, 300.0).with(FIELD_AGGREGATION, "P90"),
    )
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn indicator_slot_sets_measurement_and_blueprint() {
    let config = config_from_state(&ObjectReader::root(&plan(latency()))).unwrap();
    assert_eq!(config.indicator.kind, "timeBased");
    assert_eq!(config.indicator.blueprint, "latency");
    assert_eq!(config.indicator.threshold, Some(300.0));
    assert_eq!(config.entity.kind, "application");
    assert_eq!(config.entity.include_internal, Some(false));
    assert_eq!(config.time_window.kind, "fixed");
    assert_eq!(config.time_window.start_timestamp, Some(1_700_000_000_000.0));
}

#[test]
fn empty_event_based_availability_is_selected() {
    let indicator = StateValue::object().with("event_based_availability", StateValue::object());
    let config = config_from_state(&ObjectReader::root(&plan(indicator))).unwrap();
    assert_eq!(config.indicator.kind, "eventBased");
    assert_eq!(config.indicator.blueprint, "availability");
}

#[test]
fn traffic_indicator_resolves_by_blueprint() {
    assert_eq!(IndicatorKind::from_wire("eventBased", "traffic"), Some(IndicatorKind::Traffic));
    assert_eq!(
        IndicatorKind::from_wire("timeBased", "availability"),
        Some(IndicatorKind::TimeBasedAvailability)
    );
    assert_eq!(IndicatorKind::from_wire("timeBased", "custom"), None);
}

#[test]
fn payload_round_trips_to_equal_state() {
    let handle = SloConfigHandle::new();
    let schema = &handle.metadata().schema;
    let planned = schema.complete(schema.apply_defaults(plan(latency())));
    let payload = handle.state_to_payload(&planned).unwrap();
    let state = schema.complete(handle.payload_to_state(&payload, &planned).unwrap());
    assert_eq!(state, planned);
}

#[test]
fn unknown_entity_type_is_unsupported() {
    let mut config = config_from_state(&ObjectReader::root(&plan(latency()))).unwrap();
    config.entity.kind = "infrastructure".to_string();
    assert_eq!(
        config_to_state(&config).unwrap_err(),
        MappingError::UnsupportedEntityType {
            kind: "infrastructure".to_string(),
        }
    );
}

#[test]
fn prefill_assigns_prefixed_id() {
    let handle = SloConfigHandle::new();
    let mut plan = plan(latency()).with(FIELD_ID, StateValue::Unknown);
    handle.prefill_computed(&mut plan).unwrap();
    let id = plan.get(FIELD_ID).as_str().unwrap();
    assert!(id.starts_with(ID_PREFIX));
    assert_eq!(id.len(), ID_PREFIX.len() + 20);
    assert!(handle.metadata().skip_id_generation);
}
