// crates/instana-provider/src/lib.rs
// ============================================================================
// Module: Instana Provider
// Description: Provider configuration and resource registration.
// Purpose: Entry point the host engine uses to configure the provider and
//          obtain resource drivers.
// Dependencies: instana-core, instana-resources, instana-restapi, serde,
//               thiserror, toml, tracing
// ============================================================================

//! ## Overview
//! [`InstanaProvider`] resolves the provider block ([`ProviderConfig`]),
//! builds the shared API client, and registers every resource kind in a
//! [`ResourceRegistry`]. The host looks drivers up by resource name.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
/// Failures while configuring the provider or routing operations.
pub mod error;
pub mod provider;
pub mod registry;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ConfigError;
pub use config::Environment;
pub use config::ProviderConfig;
pub use config::ResolvedConfig;
pub use error::ProviderError;
pub use provider::InstanaProvider;
pub use registry::ResourceRegistry;
