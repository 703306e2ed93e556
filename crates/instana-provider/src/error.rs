// crates/instana-provider/src/error.rs
// ============================================================================
// Module: Provider Errors
// Description: Failures while configuring the provider or routing operations.
// Purpose: Keep configuration, transport, and registry failures distinct.
// Dependencies: instana-core, instana-restapi, thiserror
// ============================================================================

use instana_core::Diagnostics;
use instana_restapi::ApiError;
use thiserror::Error;

use crate::config::ConfigError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Provider-level errors.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Provider block could not be read from host attributes.
    #[error("{0}")]
    Attributes(Diagnostics),
    /// Provider block failed to load or resolve.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// API client could not be built.
    #[error("api client setup failed: {0}")]
    Client(#[from] ApiError),
    /// Two drivers share a resource name.
    #[error("resource already registered: {0}")]
    DuplicateResource(String),
    /// No driver is registered under the requested name.
    #[error("resource not registered: {0}")]
    UnknownResource(String),
}

impl From<Diagnostics> for ProviderError {
    fn from(diagnostics: Diagnostics) -> Self {
        Self::Attributes(diagnostics)
    }
}
