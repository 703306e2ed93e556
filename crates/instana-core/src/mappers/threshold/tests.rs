// crates/instana-core/src/mappers/threshold/tests.rs
// ============================================================================
// Module: Threshold Mapper Tests
// Description: Unit tests for severity-keyed threshold mapping.
// Purpose: Validate kind selection, null severities, and baseline precision.
// Dependencies: instana-restapi
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

use std::collections::BTreeMap;

use instana_restapi::models::threshold::ThresholdRule;

use super::ALL_THRESHOLDS;
use super::STATIC_AND_ADAPTIVE;
use super::STATIC_ONLY;
use super::ThresholdVariant;
use super::baseline_to_state;
use super::thresholds_from_state;
use super::thresholds_to_state;
use crate::error::MappingError;
use crate::reader::ObjectReader;
use crate::value::StateValue;

fn static_block(value: f64) -> StateValue {
    StateValue::object().with("static", StateValue::object().with("value", value))
}

#[test]
fn static_warning_maps_to_wire_key() {
    let state = StateValue::object()
        .with("threshold", StateValue::object().with("warning", static_block(5.0)));
    let reader = ObjectReader::root(&state);
    let thresholds = thresholds_from_state(&reader, "threshold", STATIC_ONLY).unwrap();
    assert_eq!(thresholds.len(), 1);
    let warning = thresholds.get("WARNING").unwrap();
    assert_eq!(warning.kind, "staticThreshold");
    assert_eq!(warning.value, Some(5.0));
}

#[test]
fn empty_threshold_block_is_rejected() {
    let state = StateValue::object().with("threshold", StateValue::object());
    let reader = ObjectReader::root(&state);
    let err = thresholds_from_state(&reader, "threshold", STATIC_ONLY).unwrap_err();
    assert_eq!(err.to_string(), "threshold must define at least one of warning or critical");
}

#[test]
fn severity_with_two_kinds_is_rejected() {
    let critical = static_block(1.0).with(
        "adaptive_baseline",
        StateValue::object().with("deviation_factor", 2.0),
    );
    let state = StateValue::object()
        .with("threshold", StateValue::object().with("critical", critical));
    let reader = ObjectReader::root(&state);
    let err = thresholds_from_state(&reader, "threshold", STATIC_AND_ADAPTIVE).unwrap_err();
    assert_eq!(err.to_string(), "threshold.critical must select exactly one variant");
}

#[test]
fn missing_severity_becomes_explicit_null() {
    let mut thresholds = BTreeMap::new();
    thresholds.insert(
        "CRITICAL".to_string(),
        ThresholdRule {
            kind: "adaptiveBaseline".to_string(),
            deviation_factor: Some(2.5),
            adaptability: Some(0.5),
            seasonality: Some("DAILY".to_string()),
            ..ThresholdRule::default()
        },
    );
    let state = thresholds_to_state(&thresholds, STATIC_AND_ADAPTIVE).unwrap();
    assert!(state.get("warning").is_null());
    let critical = state.get("critical");
    assert!(critical.get("static").is_null());
    assert_eq!(critical.get("adaptive_baseline").get("seasonality").as_str(), Some("DAILY"));
}

#[test]
fn undeclared_kind_on_read_is_unsupported() {
    let mut thresholds = BTreeMap::new();
    thresholds.insert(
        "WARNING".to_string(),
        ThresholdRule {
            kind: "historicBaseline".to_string(),
            ..ThresholdRule::default()
        },
    );
    let err = thresholds_to_state(&thresholds, STATIC_ONLY).unwrap_err();
    assert!(matches!(err, MappingError::UnsupportedEntityType { .. }));
    assert!(thresholds_to_state(&thresholds, ALL_THRESHOLDS).is_ok());
}

#[test]
fn baseline_samples_keep_full_precision() {
    let rows = vec![vec![1_700_000_000_000.0, 0.123_456_789, 2.000_04]];
    let state = baseline_to_state(Some(rows.as_slice()));
    let row = state.as_items().unwrap()[0].as_items().unwrap().to_vec();
    assert_eq!(
        row,
        vec![
            StateValue::Float(1_700_000_000_000.0),
            StateValue::Float(0.123_456_789),
            StateValue::Float(2.000_04),
        ]
    );
}

#[test]
fn unknown_wire_kind_is_unsupported() {
    assert_eq!(ThresholdVariant::from_wire("staticThreshold"), Some(ThresholdVariant::Static));
    assert_eq!(ThresholdVariant::from_wire("seasonalThreshold"), None);
    let mut thresholds = BTreeMap::new();
    thresholds.insert(
        "CRITICAL".to_string(),
        ThresholdRule {
            kind: "seasonalThreshold".to_string(),
            value: Some(3.0),
            ..ThresholdRule::default()
        },
    );
    assert_eq!(
        thresholds_to_state(&thresholds, ALL_THRESHOLDS).unwrap_err(),
        MappingError::UnsupportedEntityType {
            kind: "seasonalThreshold".to_string(),
        }
    );
}
