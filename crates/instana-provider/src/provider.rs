// crates/instana-provider/src/provider.rs
// ============================================================================
// Module: Instana Provider
// Description: Configured provider with its API client and resource registry.
// Purpose: Turn a provider block into ready-to-use resource drivers.
// Dependencies: instana-core, instana-restapi, tracing
// ============================================================================

//! ## Overview
//! Configuration happens once: the provider block is resolved, one HTTP
//! client is built, and every resource driver is bound to it. The client is
//! shared read-only afterwards, so drivers may run concurrently.

use std::path::Path;
use std::sync::Arc;

use instana_core::ResourceOperations;
use instana_core::Schema;
use instana_core::StateValue;
use instana_restapi::HttpRestClient;
use instana_restapi::InstanaApi;
use instana_restapi::RestClient;
use tracing::info;

use crate::config::Environment;
use crate::config::ProviderConfig;
use crate::config::ResolvedConfig;
use crate::config::provider_schema;
use crate::error::ProviderError;
use crate::registry::ResourceRegistry;

// ============================================================================
// SECTION: Provider
// ============================================================================

/// Configured Instana provider.
///
/// # Invariants
/// - The API client is built once and never mutated.
/// - Every managed resource kind is registered exactly once.
pub struct InstanaProvider {
    /// Shared API accessor.
    api: InstanaApi,
    /// Resource drivers bound to `api`.
    registry: ResourceRegistry,
}

impl InstanaProvider {
    /// Returns the host schema of the provider block.
    #[must_use]
    pub fn schema() -> Schema {
        provider_schema()
    }

    /// Configures the provider from a provider block and environment fallbacks.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when resolution fails or the client cannot be
    /// built.
    pub fn configure(
        config: &ProviderConfig,
        environment: &Environment,
    ) -> Result<Self, ProviderError> {
        let resolved = config.resolve(environment)?;
        Self::from_resolved(&resolved)
    }

    /// Configures the provider from host attributes.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Attributes`] for invalid or unknown attributes
    /// and [`ProviderError`] for resolution or client failures.
    pub fn configure_from_state(
        state: &StateValue,
        environment: &Environment,
    ) -> Result<Self, ProviderError> {
        let config = ProviderConfig::from_state(state)?;
        Self::configure(&config, environment)
    }

    /// Configures the provider from the `[provider]` table of a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when loading, resolution, or client setup fails.
    pub fn configure_from_file(
        path: &Path,
        environment: &Environment,
    ) -> Result<Self, ProviderError> {
        let config = ProviderConfig::load(path)?;
        Self::configure(&config, environment)
    }

    /// Builds the HTTP client for resolved settings and registers resources.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the client cannot be built.
    pub fn from_resolved(resolved: &ResolvedConfig) -> Result<Self, ProviderError> {
        let client = HttpRestClient::new(resolved.rest_client_config()?)?;
        info!(
            endpoint = resolved.endpoint.as_str(),
            tls_skip_verify = resolved.tls_skip_verify,
            timeout_ms = resolved.timeout_ms,
            "instana provider configured"
        );
        Self::with_client(Arc::new(client))
    }

    /// Registers resources over an existing REST client.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::DuplicateResource`] when registration collides.
    pub fn with_client(client: Arc<dyn RestClient>) -> Result<Self, ProviderError> {
        let api = InstanaApi::new(client);
        let registry = ResourceRegistry::with_managed_resources(&api)?;
        Ok(Self {
            api,
            registry,
        })
    }

    /// Returns the shared API accessor.
    #[must_use]
    pub const fn api(&self) -> &InstanaApi {
        &self.api
    }

    /// Returns the resource registry.
    #[must_use]
    pub const fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    /// Returns the driver for a host resource name.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::UnknownResource`] for unregistered names.
    pub fn resource(&self, name: &str) -> Result<&dyn ResourceOperations, ProviderError> {
        self.registry.resource(name)
    }
}
