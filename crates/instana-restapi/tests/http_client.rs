// crates/instana-restapi/tests/http_client.rs
// ============================================================================
// Module: HTTP Client Tests
// Description: Behavior of the reqwest-backed REST client.
// Purpose: Validate auth headers, URL construction, and status mapping.
// Dependencies: instana-restapi, tiny_http, url
// ============================================================================

//! ## Overview
//! Runs `HttpRestClient` against local `tiny_http` servers.

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

use instana_restapi::ApiError;
use instana_restapi::HttpRestClient;
use instana_restapi::RestClient;
use instana_restapi::RestClientConfig;
use url::Url;

use crate::common::serve;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn client_for(base: &str) -> HttpRestClient {
    let mut config = RestClientConfig::with_base_url(Url::parse(base).unwrap(), "secret-token");
    config.timeout_ms = 5_000;
    HttpRestClient::new(config).unwrap()
}

// ============================================================================
// SECTION: Requests
// ============================================================================

#[test]
fn get_one_sends_api_token_header() {
    let (base, handle) = serve(vec![(200, r#"{"id":"abc"}"#)]);
    let body = client_for(&base).get_one("/api/settings/slo", "abc").unwrap();
    let seen = handle.join().unwrap();

    assert_eq!(body, br#"{"id":"abc"}"#);
    assert_eq!(seen[0].method, "GET");
    assert_eq!(seen[0].url, "/api/settings/slo/abc");
    assert_eq!(seen[0].authorization.as_deref(), Some("apiToken secret-token"));
}

#[test]
fn ids_are_percent_encoded_as_one_segment() {
    let (base, handle) = serve(vec![(200, "{}")]);
    client_for(&base).get_one("/api/custom-dashboard", "a/b c").unwrap();
    let seen = handle.join().unwrap();

    assert_eq!(seen[0].url, "/api/custom-dashboard/a%2Fb%20c");
}

#[test]
fn put_and_post_send_body() {
    let (base, handle) = serve(vec![(200, ""), (200, "")]);
    let client = client_for(&base);
    client.put("/api/events/settings/alerts", "x1", br#"{"id":"x1"}"#).unwrap();
    client.post_with_id("/api/events/settings/infra-alert-configs", "x2", b"{}").unwrap();
    let seen = handle.join().unwrap();

    assert_eq!(seen[0].method, "PUT");
    assert_eq!(seen[0].url, "/api/events/settings/alerts/x1");
    assert_eq!(seen[0].body, r#"{"id":"x1"}"#);
    assert_eq!(seen[1].method, "POST");
    assert_eq!(seen[1].url, "/api/events/settings/infra-alert-configs/x2");
}

// ============================================================================
// SECTION: Status Mapping
// ============================================================================

#[test]
fn not_found_maps_to_not_found() {
    let (base, handle) = serve(vec![(404, "missing")]);
    let err = client_for(&base).get_one("/api/settings/slo", "gone").unwrap_err();
    handle.join().unwrap();

    assert!(err.is_not_found());
}

#[test]
fn server_error_carries_status_and_body() {
    let (base, handle) = serve(vec![(500, "boom")]);
    let err = client_for(&base).delete("/api/settings/slo", "x").unwrap_err();
    handle.join().unwrap();

    match err {
        ApiError::Status {
            status,
            body,
        } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn oversized_response_is_rejected() {
    let (base, handle) = serve(vec![(200, "0123456789")]);
    let mut config = RestClientConfig::with_base_url(Url::parse(&base).unwrap(), "t");
    config.max_response_bytes = 4;
    let err = HttpRestClient::new(config).unwrap().get("/api/settings/slo").unwrap_err();
    handle.join().unwrap();

    assert!(matches!(err, ApiError::Transport(_)));
}

#[test]
fn config_debug_redacts_token() {
    let config = RestClientConfig::for_endpoint("tenant.instana.io", "super-secret").unwrap();
    let rendered = format!("{config:?}");

    assert!(!rendered.contains("super-secret"));
    assert_eq!(config.base_url.as_str(), "https://tenant.instana.io/");
}
