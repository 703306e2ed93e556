// crates/instana-restapi/tests/rest_resource.rs
// ============================================================================
// Module: REST Resource Tests
// Description: Verb selection and payload decoding of typed resources.
// Purpose: Validate every REST mode and id routing.
// Dependencies: instana-restapi, serde_json
// ============================================================================

//! ## Overview
//! Drives `RestResource` through `InstanaApi` over a recording client.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use std::collections::BTreeMap;

use instana_restapi::ApiError;
use instana_restapi::InstanaApi;
use instana_restapi::RestMode;
use instana_restapi::models::api_token::ApiToken;
use instana_restapi::models::group::Group;
use instana_restapi::models::sli::SliConfig;
use serde_json::json;

use crate::common::RecordingClient;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn group(id: &str) -> Group {
    Group {
        id: id.to_string(),
        name: "ops".to_string(),
        ..Group::default()
    }
}

fn call(verb: &str, path: &str, id: Option<&str>) -> (String, String, Option<String>) {
    (verb.to_string(), path.to_string(), id.map(str::to_string))
}

// ============================================================================
// SECTION: Modes
// ============================================================================

#[test]
fn put_put_mode_creates_with_put() {
    let client = RecordingClient::answering("");
    let api = InstanaApi::new(client.clone());
    let resource = api.alerting_configurations();
    assert_eq!(resource.mode(), RestMode::CreatePutUpdatePut);

    let config = instana_restapi::models::alerting_config::AlertingConfiguration {
        id: "cfg".to_string(),
        alert_name: "name".to_string(),
        ..Default::default()
    };
    resource.create(&config).unwrap();
    resource.update(&config).unwrap();

    assert_eq!(
        client.calls(),
        vec![
            call("PUT", "/api/events/settings/alerts", Some("cfg")),
            call("PUT", "/api/events/settings/alerts", Some("cfg")),
        ]
    );
}

#[test]
fn post_put_mode_creates_with_post_and_updates_with_put() {
    let client = RecordingClient::answering("");
    let resource = InstanaApi::new(client.clone()).groups();

    resource.create(&group("g1")).unwrap();
    resource.update(&group("g1")).unwrap();

    assert_eq!(
        client.calls(),
        vec![
            call("POST", "/api/settings/rbac/groups", None),
            call("PUT", "/api/settings/rbac/groups", Some("g1"))
        ]
    );
}

#[test]
fn post_post_mode_updates_with_post_by_id() {
    let client = RecordingClient::answering("");
    let resource = InstanaApi::new(client.clone()).infra_alert_configs();
    let config = instana_restapi::models::infra_alert::InfraAlertConfig {
        id: "i1".to_string(),
        name: "infra".to_string(),
        ..Default::default()
    };

    resource.update(&config).unwrap();

    let expected = call("POST", "/api/events/settings/infra-alert-configs", Some("i1"));
    assert_eq!(client.calls(), vec![expected]);
}

#[test]
fn update_not_supported_mode_rejects_without_calling() {
    let client = RecordingClient::answering("");
    let resource = InstanaApi::new(client.clone()).sli_configs();
    let sli: SliConfig = serde_json::from_value(json!({
        "id": "s1",
        "sliName": "sli",
        "sliEntity": {"sliType": "application", "applicationId": "app", "boundaryScope": "ALL"}
    }))
    .unwrap();

    let err = resource.update(&sli).unwrap_err();

    assert!(matches!(err, ApiError::UpdateNotSupported { .. }));
    assert!(client.calls().is_empty());
}

// ============================================================================
// SECTION: Decoding
// ============================================================================

#[test]
fn create_decodes_response_body() {
    let client = RecordingClient::answering(r#"{"id":"server-id","name":"ops","members":[]}"#);
    let created = InstanaApi::new(client).groups().create(&group("")).unwrap();

    assert_eq!(created.id, "server-id");
}

#[test]
fn get_all_decodes_lists() {
    let client = RecordingClient::answering(r#"[{"id":"a","name":"x"},{"id":"b","name":"y"}]"#);
    let groups = InstanaApi::new(client).groups().get_all().unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[1].id, "b");
}

#[test]
fn malformed_body_is_decode_error() {
    let client = RecordingClient::answering("{not json");
    let err = InstanaApi::new(client).groups().get_one("a").unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

// ============================================================================
// SECTION: Routing
// ============================================================================

#[test]
fn api_tokens_route_by_internal_id() {
    let client = RecordingClient::answering("");
    let token = ApiToken {
        id: "public-id".to_string(),
        access_granting_token: "grant".to_string(),
        internal_id: "internal-id".to_string(),
        name: "token".to_string(),
        permissions: BTreeMap::new(),
    };
    let resource = InstanaApi::new(client.clone()).api_tokens();

    resource.update(&token).unwrap();
    resource.delete(&token).unwrap();

    assert_eq!(
        client.calls(),
        vec![
            call("PUT", "/api/settings/api-tokens", Some("internal-id")),
            call("DELETE", "/api/settings/api-tokens", Some("internal-id")),
        ]
    );
}
