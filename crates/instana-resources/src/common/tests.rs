// crates/instana-resources/src/common/tests.rs
// ============================================================================
// Module: Shared Resource Vocabulary Tests
// Description: Checks for the shared attribute builders.
// Purpose: Pin defaults and validators reused by every handle.
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

use instana_core::ObjectReader;
use instana_core::Schema;
use instana_core::StateValue;

use super::*;

fn schema() -> Schema {
    Schema::new("shared", vec![id_attribute(), name_attribute(8), granularity_attribute()])
}

#[test]
fn granularity_defaults_to_ten_minutes() {
    let state = schema().apply_defaults(StateValue::object().with(FIELD_NAME, "a"));
    assert_eq!(state.get(FIELD_GRANULARITY), &StateValue::Int(DEFAULT_GRANULARITY));
}

#[test]
fn granularity_outside_the_list_is_rejected() {
    let plan = StateValue::object().with(FIELD_NAME, "a").with(FIELD_GRANULARITY, 42_i64);
    let diagnostics = schema().validate(&plan);
    assert!(diagnostics.has_error());
    assert!(diagnostics.to_string().contains("42"));
}

#[test]
fn name_length_is_bounded() {
    let plan = StateValue::object().with(FIELD_NAME, "way too long");
    assert!(schema().validate(&plan).has_error());
    let plan = StateValue::object().with(FIELD_NAME, "");
    assert!(schema().validate(&plan).has_error());
}

#[test]
fn unset_id_reads_as_empty() {
    let state = StateValue::object().with(FIELD_ID, StateValue::Unknown);
    assert_eq!(id_from_state(&ObjectReader::root(&state)).unwrap(), "");
}

#[test]
fn empty_strings_map_to_null() {
    assert!(non_empty("").is_null());
    assert_eq!(non_empty("x"), StateValue::from("x"));
    let state = StateValue::object().with("query", "");
    assert_eq!(optional_non_empty(&ObjectReader::root(&state), "query").unwrap(), None);
}

#[test]
fn global_access_rule_has_no_related_id() {
    let state = StateValue::object().with(
        FIELD_ACCESS_RULE,
        StateValue::List(vec![
            StateValue::object()
                .with("access_type", "READ_WRITE")
                .with("related_id", "user-1")
                .with("relation_type", "USER"),
            StateValue::object()
                .with("access_type", "READ")
                .with("related_id", "")
                .with("relation_type", "GLOBAL"),
        ]),
    );
    let rules = access_rules_from_state(&ObjectReader::root(&state)).unwrap();
    assert_eq!(rules[0].related_id.as_deref(), Some("user-1"));
    assert_eq!(rules[1].related_id, None);
    let written = access_rules_to_state(&rules);
    assert!(written.as_items().unwrap()[1].get("related_id").is_null());
    assert!(access_rules_to_state(&[]).is_null());
}
