// crates/instana-provider/tests/provider.rs
// ============================================================================
// Module: Provider Tests
// Description: Provider configuration and resource routing end to end.
// Purpose: Check that a configured provider reaches the backend with the
//          resolved credentials and exposes every resource kind.
// Dependencies: instana-provider, instana-restapi, serde_json, tempfile,
//               tiny_http, url
// ============================================================================

//! Provider configuration and resource routing end to end.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use std::fs;
use std::sync::Arc;

use instana_core::StateValue;
use instana_provider::ConfigError;
use instana_provider::Environment;
use instana_provider::InstanaProvider;
use instana_provider::ProviderConfig;
use instana_provider::ProviderError;
use instana_provider::ResourceRegistry;
use instana_resources::resource_operations;
use instana_restapi::HttpRestClient;
use instana_restapi::RestClientConfig;
use instana_restapi::api::GROUP_PATH;
use serde_json::Value;
use url::Url;

use crate::common::serve;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn local_provider(base: &str) -> InstanaProvider {
    let mut config = RestClientConfig::with_base_url(Url::parse(base).unwrap(), "local-token");
    config.timeout_ms = 5_000;
    InstanaProvider::with_client(Arc::new(HttpRestClient::new(config).unwrap())).unwrap()
}

fn no_env() -> Environment {
    Environment::from_map(Vec::<(String, String)>::new())
}

// ============================================================================
// SECTION: Configuration
// ============================================================================

#[test]
fn file_configuration_uses_environment_for_missing_token() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("instana.toml");
    let contents = "[provider]\nendpoint = \"tenant-unit.instana.io\"\ntimeout_ms = 10000\n";
    fs::write(&path, contents).unwrap();
    let env = Environment::from_map([("INSTANA_API_TOKEN", "env-token")]);
    let resolved = ProviderConfig::load(&path).unwrap().resolve(&env).unwrap();
    assert_eq!(resolved.api_token, "env-token");
    assert_eq!(resolved.timeout_ms, 10_000);
    let client_config = resolved.rest_client_config().unwrap();
    assert_eq!(client_config.base_url.as_str(), "https://tenant-unit.instana.io/");
    assert!(InstanaProvider::configure_from_file(&path, &env).is_ok());
}

#[test]
fn unknown_file_keys_are_parse_errors() {
    let err = ProviderConfig::from_toml_str("[provider]\nendpont = \"x\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let err = InstanaProvider::configure_from_file(&path, &no_env()).err().unwrap();
    assert!(matches!(err, ProviderError::Config(ConfigError::Io(_))));
}

#[test]
fn unknown_host_attributes_stop_configuration() {
    let state = StateValue::object()
        .with("api_token", "token")
        .with("endpoint", StateValue::Unknown);
    let err = InstanaProvider::configure_from_state(&state, &no_env()).err().unwrap();
    let ProviderError::Attributes(diagnostics) = err else {
        panic!("expected attribute diagnostics");
    };
    assert!(diagnostics.to_string().contains("endpoint"));
}

// ============================================================================
// SECTION: Registry
// ============================================================================

#[test]
fn every_resource_kind_is_registered() {
    let provider = local_provider("http://127.0.0.1:9");
    assert_eq!(provider.registry().len(), 19);
    assert!(provider.resource("instana_slo_config").is_ok());
    let names: Vec<&str> = provider.registry().names().collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
}

#[test]
fn unregistered_names_are_reported() {
    let provider = local_provider("http://127.0.0.1:9");
    let err = provider.resource("instana_unknown").err().unwrap();
    assert_eq!(err.to_string(), "resource not registered: instana_unknown");
}

#[test]
fn duplicate_registration_is_rejected() {
    let provider = local_provider("http://127.0.0.1:9");
    let mut registry = ResourceRegistry::new();
    let mut first = resource_operations(provider.api());
    let mut second = resource_operations(provider.api());
    registry.register(first.remove(0)).unwrap();
    let err = registry.register(second.remove(0)).unwrap_err();
    assert!(matches!(err, ProviderError::DuplicateResource(_)));
}

// ============================================================================
// SECTION: End To End
// ============================================================================

#[test]
fn group_create_reaches_backend_with_token() {
    init_tracing();
    let (base, handle) = serve(vec![(200, "")]);
    let provider = local_provider(&base);
    let plan = StateValue::object().with("id", StateValue::Unknown).with("name", "operators");
    let state = provider.resource("instana_group").unwrap().create(&plan).unwrap();
    let seen = handle.join().unwrap();

    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, "POST");
    assert_eq!(seen[0].url, GROUP_PATH);
    assert_eq!(seen[0].authorization.as_deref(), Some("apiToken local-token"));
    let body: Value = serde_json::from_str(&seen[0].body).unwrap();
    assert_eq!(body["name"], "operators");
    assert_eq!(body["id"].as_str(), state.get("id").as_str());
}

#[test]
fn backend_404_on_read_removes_the_record() {
    let (base, handle) = serve(vec![(404, "")]);
    let provider = local_provider(&base);
    let state = StateValue::object().with("id", "gone").with("name", "operators");
    assert_eq!(provider.resource("instana_group").unwrap().read(&state).unwrap(), None);
    handle.join().unwrap();
}
