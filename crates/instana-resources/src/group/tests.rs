// crates/instana-resources/src/group/tests.rs
// ============================================================================
// Module: RBAC Group Handle Tests
// Description: Scope binding and member mapping checks.
// Purpose: Pin the shape of groups on the wire and in state.
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
        .with(FIELD_ID, "group-1")
        .with(FIELD_NAME, "operators")
        .with(
            FIELD_MEMBER,
            StateValue::set_of(vec![
                StateValue::object()
                    .with(FIELD_USER_ID, "user-1")
                    .with(FIELD_EMAIL, "ops@example.com"),
                StateValue::object()
                    .with(FIELD_USER_ID, "user-2")
                    .with(FIELD_EMAIL, StateValue::Null),
            ]),
        )
        .with(
            FIELD_PERMISSION_SET,
            StateValue::object()
                .with(FIELD_APPLICATION_IDS, StateValue::string_set(["app-1", "app-2"]))
                .with(FIELD_INFRA_DFQ_FILTER, "entity.zone:eu")
                .with(
                    FIELD_PERMISSIONS,
                    StateValue::string_set(["CAN_VIEW_LOGS", "CAN_CONFIGURE_API_TOKENS"]),
                ),
        )
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn scope_ids_become_bindings() {
    let group = group_from_state(&ObjectReader::root(&plan())).unwrap();
    assert_eq!(
        group.permission_set.application_ids,
        vec![ScopeBinding::new("app-1".to_string()), ScopeBinding::new("app-2".to_string())]
    );
    assert_eq!(
        group.permission_set.infra_dfq_filter,
        Some(ScopeBinding::new("entity.zone:eu".to_string()))
    );
    assert!(group.permission_set.website_ids.is_empty());
    assert_eq!(group.members.len(), 2);
}

#[test]
fn empty_permission_set_reads_as_null() {
    let group = Group {
        id: "group-1".to_string(),
        name: "operators".to_string(),
        members: Vec::new(),
        permission_set: PermissionSet {
            infra_dfq_filter: Some(ScopeBinding::new(String::new())),
            ..PermissionSet::default()
        },
    };
    let state = group_to_state(&group);
    assert!(state.get(FIELD_PERMISSION_SET).is_null());
    assert!(state.get(FIELD_MEMBER).is_null());
}

#[test]
fn unknown_permission_fails_validation() {
    let schema = GroupHandle::new().metadata().schema.clone();
    let state = plan().with(
        FIELD_PERMISSION_SET,
        StateValue::object().with(FIELD_PERMISSIONS, StateValue::string_set(["CAN_DO_ANYTHING"])),
    );
    assert!(schema.validate(&schema.complete(state)).has_error());
}

#[test]
fn payload_round_trips_to_equal_state() {
    let handle = GroupHandle::new();
    let schema = &handle.metadata().schema;
    let planned = schema.complete(schema.apply_defaults(plan()));
    let payload = handle.state_to_payload(&planned).unwrap();
    let state = schema.complete(handle.payload_to_state(&payload, &planned).unwrap());
    assert_eq!(state, planned);
}
