// crates/instana-provider/src/config/tests.rs
// ============================================================================
// Module: Provider Configuration Tests
// Description: Resolution order, endpoint rules, and plan-time unknowns.
// Purpose: Pin the fail-closed behavior of provider configuration.
// Dependencies: instana-core
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

fn explicit() -> ProviderConfig {
    ProviderConfig {
        api_token: Some("token".to_string()),
        endpoint: Some("tenant-unit.instana.io".to_string()),
        ..ProviderConfig::default()
    }
}

fn empty_env() -> Environment {
    Environment::from_map(Vec::<(String, String)>::new())
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

#[test]
fn explicit_values_win_over_environment() {
    let env =
        Environment::from_map([(ENV_API_TOKEN, "env-token"), (ENV_ENDPOINT, "env.instana.io")]);
    let resolved = explicit().resolve(&env).unwrap();
    assert_eq!(resolved.api_token, "token");
    assert_eq!(resolved.endpoint, "tenant-unit.instana.io");
}

#[test]
fn empty_explicit_values_fall_back_to_environment() {
    let config = ProviderConfig {
        api_token: Some(String::new()),
        ..ProviderConfig::default()
    };
    let env = Environment::from_map([
        (ENV_API_TOKEN, "env-token"),
        (ENV_ENDPOINT, "env.instana.io"),
        (ENV_TLS_SKIP_VERIFY, "TRUE"),
    ]);
    let resolved = config.resolve(&env).unwrap();
    assert_eq!(resolved.api_token, "env-token");
    assert_eq!(resolved.endpoint, "env.instana.io");
    assert!(resolved.tls_skip_verify);
}

#[test]
fn defaults_apply_when_nothing_is_set() {
    let resolved = explicit().resolve(&empty_env()).unwrap();
    assert!(!resolved.tls_skip_verify);
    assert_eq!(resolved.timeout_ms, DEFAULT_TIMEOUT_MS);
    assert_eq!(resolved.user_agent, DEFAULT_USER_AGENT);
}

#[test]
fn missing_token_names_its_environment_variable() {
    let config = ProviderConfig {
        api_token: None,
        ..explicit()
    };
    let err = config.resolve(&empty_env()).unwrap_err();
    assert!(err.to_string().contains(ENV_API_TOKEN));
}

#[test]
fn malformed_tls_flag_is_rejected() {
    let env = Environment::from_map([(ENV_TLS_SKIP_VERIFY, "maybe")]);
    assert!(matches!(explicit().resolve(&env), Err(ConfigError::Invalid(_))));
}

#[test]
fn timeout_outside_range_is_rejected() {
    for timeout_ms in [999, 300_001] {
        let config = ProviderConfig {
            timeout_ms: Some(timeout_ms),
            ..explicit()
        };
        assert!(config.resolve(&empty_env()).is_err(), "{timeout_ms}");
    }
}

#[test]
fn debug_output_redacts_the_token() {
    let rendered = format!("{:?} {:?}", explicit(), explicit().resolve(&empty_env()).unwrap());
    assert!(!rendered.contains("\"token\""));
    assert!(rendered.contains("<redacted>"));
}

// ============================================================================
// SECTION: Endpoint
// ============================================================================

#[test]
fn dns_names_with_optional_port_are_accepted() {
    for endpoint in ["tenant-unit.instana.io", "localhost", "backend.internal:8443"] {
        assert!(validate_endpoint(endpoint).is_ok(), "{endpoint}");
    }
}

#[test]
fn urls_and_malformed_hosts_are_rejected() {
    let rejected = [
        "https://tenant.instana.io",
        "tenant.instana.io/api",
        "bad host",
        "-edge.io",
        "a..b",
        "host:0",
    ];
    for endpoint in rejected {
        assert!(validate_endpoint(endpoint).is_err(), "{endpoint}");
    }
}

// ============================================================================
// SECTION: Host Attributes
// ============================================================================

#[test]
fn unknown_values_are_reported_per_attribute() {
    let state = StateValue::object()
        .with(ATTR_API_TOKEN, StateValue::Unknown)
        .with(ATTR_ENDPOINT, "tenant-unit.instana.io");
    let diagnostics = ProviderConfig::from_state(&state).unwrap_err();
    assert_eq!(diagnostics.len(), 1);
    let diagnostic = diagnostics.iter().next().unwrap();
    assert_eq!(diagnostic.path.as_ref().map(ToString::to_string).as_deref(), Some(ATTR_API_TOKEN));
}

#[test]
fn host_attributes_map_to_config() {
    let state = StateValue::object()
        .with(ATTR_API_TOKEN, "token")
        .with(ATTR_ENDPOINT, "tenant-unit.instana.io")
        .with(ATTR_TLS_SKIP_VERIFY, true)
        .with(ATTR_TIMEOUT_MS, 5_000_i64);
    let config = ProviderConfig::from_state(&state).unwrap();
    assert_eq!(config.tls_skip_verify, Some(true));
    assert_eq!(config.timeout_ms, Some(5_000));
    assert_eq!(config.user_agent, None);
}

#[test]
fn out_of_range_timeout_attribute_fails_validation() {
    let state = StateValue::object().with(ATTR_TIMEOUT_MS, 10_i64);
    assert!(ProviderConfig::from_state(&state).unwrap_err().has_error());
}
