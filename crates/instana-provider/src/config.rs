// crates/instana-provider/src/config.rs
// ============================================================================
// Module: Provider Configuration
// Description: Provider block parsing, environment fallback, and validation.
// Purpose: Resolve the settings needed to build the Instana API client.
// Dependencies: instana-core, instana-restapi, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! The provider block carries three host-facing keys (`api_token`, `endpoint`,
//! `tls_skip_verify`) plus client tuning (`timeout_ms`, `user_agent`). Values
//! come from a TOML `[provider]` table or from the host attribute map and are
//! resolved per key: explicit value, then environment variable, then default.
//!
//! Resolution fails closed: a missing token or endpoint, a malformed endpoint,
//! or an out-of-range timeout is rejected before any client is built. The API
//! token never appears in `Debug` output.

use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::Path;

use instana_core::Attribute;
use instana_core::AttributePath;
use instana_core::Diagnostic;
use instana_core::Diagnostics;
use instana_core::MappingError;
use instana_core::ObjectReader;
use instana_core::Schema;
use instana_core::StateValue;
use instana_core::Validator;
use instana_restapi::RestClientConfig;
use instana_restapi::client::DEFAULT_TIMEOUT_MS;
use instana_restapi::client::DEFAULT_USER_AGENT;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Provider attribute holding the API token.
pub const ATTR_API_TOKEN: &str = "api_token";
/// Provider attribute holding the backend DNS name.
pub const ATTR_ENDPOINT: &str = "endpoint";
/// Provider attribute disabling certificate validation.
pub const ATTR_TLS_SKIP_VERIFY: &str = "tls_skip_verify";
/// Provider attribute holding the request timeout.
pub const ATTR_TIMEOUT_MS: &str = "timeout_ms";
/// Provider attribute overriding the user agent.
pub const ATTR_USER_AGENT: &str = "user_agent";

/// Environment fallback for [`ATTR_API_TOKEN`].
pub const ENV_API_TOKEN: &str = "INSTANA_API_TOKEN";
/// Environment fallback for [`ATTR_ENDPOINT`].
pub const ENV_ENDPOINT: &str = "INSTANA_ENDPOINT";
/// Environment fallback for [`ATTR_TLS_SKIP_VERIFY`].
pub const ENV_TLS_SKIP_VERIFY: &str = "INSTANA_TLS_SKIP_VERIFY";

/// Smallest accepted request timeout.
pub const MIN_TIMEOUT_MS: u64 = 1_000;
/// Largest accepted request timeout.
pub const MAX_TIMEOUT_MS: u64 = 300_000;

/// Maximum configuration file size in bytes.
const MAX_CONFIG_FILE_SIZE: usize = 64 * 1024;
/// Maximum length of a DNS name.
const MAX_ENDPOINT_LENGTH: usize = 253;
/// Maximum length of one DNS label.
const MAX_LABEL_LENGTH: usize = 63;

// ============================================================================
// SECTION: Environment
// ============================================================================

/// Source of environment fallbacks.
///
/// # Invariants
/// - When `overrides` is set, the process environment is never read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    /// Optional override map used for deterministic lookups.
    overrides: Option<BTreeMap<String, String>>,
}

impl Environment {
    /// Reads the process environment.
    #[must_use]
    pub const fn process() -> Self {
        Self {
            overrides: None,
        }
    }

    /// Reads only from `values`.
    #[must_use]
    pub fn from_map<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            overrides: Some(
                values.into_iter().map(|(key, value)| (key.into(), value.into())).collect(),
            ),
        }
    }

    /// Returns a non-empty value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match &self.overrides {
            Some(overrides) => overrides.get(key).cloned(),
            None => env::var(key).ok(),
        };
        value.filter(|value| !value.trim().is_empty())
    }
}

// ============================================================================
// SECTION: Provider Block
// ============================================================================

/// Provider block as written by the operator; every key is optional here.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// API token; falls back to [`ENV_API_TOKEN`].
    #[serde(default)]
    pub api_token: Option<String>,
    /// Backend DNS name; falls back to [`ENV_ENDPOINT`].
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Disables TLS certificate validation; falls back to [`ENV_TLS_SKIP_VERIFY`].
    #[serde(default)]
    pub tls_skip_verify: Option<bool>,
    /// Request timeout in milliseconds.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    /// User agent override.
    #[serde(default)]
    pub user_agent: Option<String>,
}

/// TOML document wrapping the provider table.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigDocument {
    /// `[provider]` table.
    provider: ProviderConfig,
}

impl ProviderConfig {
    /// Loads the `[provider]` table from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let bytes = fs::read(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses the `[provider]` table from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML or unknown keys.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let document: ConfigDocument =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        Ok(document.provider)
    }

    /// Reads the provider block from the host attribute map.
    ///
    /// Values still unknown at plan time are reported against their attribute
    /// instead of being resolved from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`Diagnostics`] for type errors, range violations, and unknown
    /// values.
    pub fn from_state(state: &StateValue) -> Result<Self, Diagnostics> {
        let mut diagnostics = provider_schema().validate(state);
        let names =
            [ATTR_API_TOKEN, ATTR_ENDPOINT, ATTR_TLS_SKIP_VERIFY, ATTR_TIMEOUT_MS, ATTR_USER_AGENT];
        for name in names {
            if state.get(name).is_unknown() {
                diagnostics.push(
                    Diagnostic::error(
                        "Unknown provider value",
                        format!("{name} must be known before the provider is configured"),
                    )
                    .at(AttributePath::attribute(name)),
                );
            }
        }
        if diagnostics.has_error() {
            return Err(diagnostics);
        }
        let reader = ObjectReader::root(state);
        let config = Self {
            api_token: diagnostics.collect(reader.optional_string(ATTR_API_TOKEN)).flatten(),
            endpoint: diagnostics.collect(reader.optional_string(ATTR_ENDPOINT)).flatten(),
            tls_skip_verify: diagnostics
                .collect(reader.optional_bool(ATTR_TLS_SKIP_VERIFY))
                .flatten(),
            timeout_ms: diagnostics.collect(timeout_from_state(&reader)).flatten(),
            user_agent: diagnostics.collect(reader.optional_string(ATTR_USER_AGENT)).flatten(),
        };
        diagnostics.into_result()?;
        Ok(config)
    }

    /// Applies environment fallbacks and defaults, then validates.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a required value is missing or a
    /// value is out of range.
    pub fn resolve(&self, environment: &Environment) -> Result<ResolvedConfig, ConfigError> {
        let api_token = explicit_or_env(self.api_token.as_deref(), environment, ENV_API_TOKEN)
            .ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "{ATTR_API_TOKEN} must be set or provided through {ENV_API_TOKEN}"
                ))
            })?;
        let endpoint = explicit_or_env(self.endpoint.as_deref(), environment, ENV_ENDPOINT)
            .ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "{ATTR_ENDPOINT} must be set or provided through {ENV_ENDPOINT}"
                ))
            })?;
        validate_endpoint(&endpoint)?;
        let tls_skip_verify = match self.tls_skip_verify {
            Some(value) => value,
            None => environment
                .get(ENV_TLS_SKIP_VERIFY)
                .map(|raw| parse_flag(&raw))
                .transpose()?
                .unwrap_or(false),
        };
        let timeout_ms = self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS);
        if !(MIN_TIMEOUT_MS ..= MAX_TIMEOUT_MS).contains(&timeout_ms) {
            return Err(ConfigError::Invalid(format!(
                "{ATTR_TIMEOUT_MS} must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS}"
            )));
        }
        let user_agent = match self.user_agent.as_deref().map(str::trim) {
            Some("") => {
                return Err(ConfigError::Invalid(format!("{ATTR_USER_AGENT} must not be empty")));
            }
            Some(user_agent) => user_agent.to_string(),
            None => DEFAULT_USER_AGENT.to_string(),
        };
        Ok(ResolvedConfig {
            api_token,
            endpoint,
            tls_skip_verify,
            timeout_ms,
            user_agent,
        })
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("tls_skip_verify", &self.tls_skip_verify)
            .field("timeout_ms", &self.timeout_ms)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Host schema of the provider block.
///
/// Token and endpoint are optional in the schema because the environment may
/// supply them; [`ProviderConfig::resolve`] enforces their presence.
#[must_use]
pub fn provider_schema() -> Schema {
    Schema::new(
        "Instana provider",
        vec![
            Attribute::string(ATTR_API_TOKEN)
                .sensitive()
                .describe("API token used to authenticate requests"),
            Attribute::string(ATTR_ENDPOINT).describe("DNS name of the Instana backend"),
            Attribute::bool(ATTR_TLS_SKIP_VERIFY).describe("Disables TLS certificate validation"),
            Attribute::int(ATTR_TIMEOUT_MS).validate(Validator::IntBetween(1_000, 300_000)),
            Attribute::string(ATTR_USER_AGENT),
        ],
    )
}

// ============================================================================
// SECTION: Resolved Configuration
// ============================================================================

/// Fully resolved provider settings.
///
/// # Invariants
/// - `api_token` and `endpoint` are non-empty.
/// - `endpoint` is a bare DNS name with an optional port.
/// - `timeout_ms` lies within [`MIN_TIMEOUT_MS`] and [`MAX_TIMEOUT_MS`].
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// API token.
    pub api_token: String,
    /// Backend DNS name.
    pub endpoint: String,
    /// Disables TLS certificate validation.
    pub tls_skip_verify: bool,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// User agent for outbound requests.
    pub user_agent: String,
}

impl ResolvedConfig {
    /// Builds the REST client configuration for `https://{endpoint}`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the endpoint does not form a URL.
    pub fn rest_client_config(&self) -> Result<RestClientConfig, ConfigError> {
        let mut config = RestClientConfig::for_endpoint(&self.endpoint, &self.api_token)
            .map_err(|err| ConfigError::Invalid(err.to_string()))?;
        config.tls_skip_verify = self.tls_skip_verify;
        config.timeout_ms = self.timeout_ms;
        config.user_agent.clone_from(&self.user_agent);
        Ok(config)
    }
}

impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("api_token", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("tls_skip_verify", &self.tls_skip_verify)
            .field("timeout_ms", &self.timeout_ms)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the explicit value unless empty, else the environment value.
fn explicit_or_env(explicit: Option<&str>, environment: &Environment, key: &str) -> Option<String> {
    explicit
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .or_else(|| environment.get(key).map(|value| value.trim().to_string()))
}

/// Parses a boolean environment flag.
fn parse_flag(raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConfigError::Invalid(format!(
            "{ENV_TLS_SKIP_VERIFY} must be true or false, got \"{raw}\""
        ))),
    }
}

/// Reads the timeout as an unsigned value.
fn timeout_from_state(reader: &ObjectReader<'_>) -> Result<Option<u64>, MappingError> {
    reader
        .optional_i64(ATTR_TIMEOUT_MS)?
        .map(|value| {
            u64::try_from(value).map_err(|_| {
                let path = reader.field_path(ATTR_TIMEOUT_MS);
                MappingError::invalid(&path, "timeout_ms must be positive")
            })
        })
        .transpose()
}

/// Checks that `endpoint` is a DNS name with an optional port.
fn validate_endpoint(endpoint: &str) -> Result<(), ConfigError> {
    if endpoint.contains("://") {
        return Err(ConfigError::Invalid(format!(
            "{ATTR_ENDPOINT} must be a host name without a scheme"
        )));
    }
    let (host, port) = match endpoint.rsplit_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (endpoint, None),
    };
    if let Some(port) = port
        && port.parse::<u16>().map_or(true, |port| port == 0)
    {
        return Err(ConfigError::Invalid(format!("{ATTR_ENDPOINT} has an invalid port \"{port}\"")));
    }
    if host.is_empty() || host.len() > MAX_ENDPOINT_LENGTH {
        return Err(ConfigError::Invalid(format!(
            "{ATTR_ENDPOINT} must be between 1 and {MAX_ENDPOINT_LENGTH} characters"
        )));
    }
    let valid_labels = host.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LENGTH
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    if !valid_labels {
        return Err(ConfigError::Invalid(format!(
            "{ATTR_ENDPOINT} \"{endpoint}\" is not a valid DNS name"
        )));
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
