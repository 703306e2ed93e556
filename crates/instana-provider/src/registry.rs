// crates/instana-provider/src/registry.rs
// ============================================================================
// Module: Resource Registry
// Description: Lifecycle drivers keyed by host resource name.
// Purpose: Route host operations to the driver of one resource kind.
// Dependencies: instana-core, instana-resources, instana-restapi
// ============================================================================

//! ## Overview
//! The registry owns one object-safe driver per resource kind. Names are
//! unique; registering a second driver under an existing name fails instead
//! of replacing the first.

use std::collections::BTreeMap;

use instana_core::ResourceOperations;
use instana_resources::resource_operations;
use instana_restapi::InstanaApi;

use crate::error::ProviderError;

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Resource drivers keyed by host resource name.
///
/// # Invariants
/// - Resource names are unique within the registry.
/// - Registered drivers are `Send + Sync` and stored behind trait objects.
#[derive(Default)]
pub struct ResourceRegistry {
    /// Drivers keyed by resource name.
    resources: BTreeMap<&'static str, Box<dyn ResourceOperations>>,
}

impl ResourceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every managed resource kind bound to `api`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::DuplicateResource`] when two kinds share a name.
    pub fn with_managed_resources(api: &InstanaApi) -> Result<Self, ProviderError> {
        let mut registry = Self::new();
        for resource in resource_operations(api) {
            registry.register(resource)?;
        }
        Ok(registry)
    }

    /// Registers a driver under its metadata name.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::DuplicateResource`] when the name is taken.
    pub fn register(&mut self, resource: Box<dyn ResourceOperations>) -> Result<(), ProviderError> {
        let name = resource.metadata().name;
        if self.resources.contains_key(name) {
            return Err(ProviderError::DuplicateResource(name.to_string()));
        }
        self.resources.insert(name, resource);
        Ok(())
    }

    /// Returns the driver for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::UnknownResource`] when nothing is registered.
    pub fn resource(&self, name: &str) -> Result<&dyn ResourceOperations, ProviderError> {
        self.resources
            .get(name)
            .map(Box::as_ref)
            .ok_or_else(|| ProviderError::UnknownResource(name.to_string()))
    }

    /// Returns registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.resources.keys().copied()
    }

    /// Returns the number of registered drivers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns true when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
