// crates/instana-core/src/managed.rs
// ============================================================================
// Module: Managed Resource Driver
// Description: Create/read/update/delete sequencing over a resource handle.
// Purpose: Run every resource kind through the same lifecycle and logging.
// Dependencies: instana-restapi, tracing, crate::handle
// ============================================================================

//! ## Overview
//! [`ManagedResource`] binds a [`ResourceHandle`] to an [`InstanaApi`] and
//! exposes the object-safe [`ResourceOperations`] facade the provider
//! registers. Each operation runs strictly in sequence:
//! state to payload, one REST call, payload to state.
//!
//! Returned states are complete: every schema attribute is present, with
//! explicit nulls where the backend omitted a value.

use instana_restapi::InstanaApi;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::diagnostics::Diagnostic;
use crate::diagnostics::Diagnostics;
use crate::error::MappingError;
use crate::error::ResourceError;
use crate::handle::RawState;
use crate::handle::ResourceHandle;
use crate::handle::ResourceMetadata;
use crate::id::random_id;
use crate::path::AttributePath;
use crate::upgrade::upgrade_state;
use crate::value::StateValue;

// ============================================================================
// SECTION: Operations
// ============================================================================

/// Host-facing lifecycle of one resource kind.
pub trait ResourceOperations: Send + Sync {
    /// Returns the static description.
    fn metadata(&self) -> &ResourceMetadata;

    /// Validates a plan against the schema.
    fn validate(&self, plan: &StateValue) -> Diagnostics;

    /// Creates the record and returns the resulting state.
    ///
    /// # Errors
    /// Returns [`ResourceError`] on validation, mapping, or API failures.
    fn create(&self, plan: &StateValue) -> Result<StateValue, ResourceError>;

    /// Refreshes stored state; `None` means the record is gone.
    ///
    /// # Errors
    /// Returns [`ResourceError`] on mapping or API failures.
    fn read(&self, state: &StateValue) -> Result<Option<StateValue>, ResourceError>;

    /// Applies a plan to an existing record.
    ///
    /// # Errors
    /// Returns [`ResourceError`] for create-only kinds and on validation,
    /// mapping, or API failures.
    fn update(&self, plan: &StateValue, state: &StateValue) -> Result<StateValue, ResourceError>;

    /// Deletes the record described by stored state.
    ///
    /// # Errors
    /// Returns [`ResourceError`] on mapping or API failures.
    fn delete(&self, state: &StateValue) -> Result<(), ResourceError>;

    /// Reads an existing record by id for adoption into state.
    ///
    /// # Errors
    /// Returns [`ResourceError`] on mapping or API failures.
    fn import(&self, id: &str) -> Result<Option<StateValue>, ResourceError>;

    /// Upgrades raw state written by `version` and shapes it by the schema.
    ///
    /// # Errors
    /// Returns [`ResourceError`] when an upgrader fails.
    fn upgrade_state(&self, version: i64, raw: RawState) -> Result<StateValue, ResourceError>;
}

// ============================================================================
// SECTION: Driver
// ============================================================================

/// Lifecycle driver over a resource handle.
#[derive(Debug)]
pub struct ManagedResource<H> {
    /// Mapping contract.
    handle: H,
    /// Shared API accessor.
    api: InstanaApi,
}

impl<H: ResourceHandle> ManagedResource<H> {
    /// Binds a handle to an API accessor.
    #[must_use]
    pub const fn new(handle: H, api: InstanaApi) -> Self {
        Self {
            handle,
            api,
        }
    }

    /// Returns the handle.
    #[must_use]
    pub const fn handle(&self) -> &H {
        &self.handle
    }

    /// Validates and applies schema defaults.
    fn prepare(&self, plan: &StateValue) -> Result<StateValue, ResourceError> {
        let schema = &self.handle.metadata().schema;
        let diagnostics = schema.validate(plan);
        if diagnostics.has_error() {
            return Err(diagnostics.into());
        }
        Ok(schema.apply_defaults(plan.clone()))
    }

    /// Maps a payload back to complete state.
    fn finish(
        &self,
        payload: &H::Payload,
        prior: &StateValue,
    ) -> Result<StateValue, ResourceError> {
        let state = self.handle.payload_to_state(payload, prior)?;
        Ok(self.handle.metadata().schema.complete(state))
    }

    /// Returns the id recorded in `state`.
    fn recorded_id<'a>(&self, state: &'a StateValue) -> Result<&'a str, ResourceError> {
        let field = self.handle.metadata().resource_id_field;
        match state.get(field).as_str() {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(Diagnostic::error(
                "Missing resource id",
                format!("{field} is not set in state"),
            )
            .at(AttributePath::attribute(field))
            .into()),
        }
    }

    /// Copies computed attributes the plan leaves unknown from stored state.
    fn carry_computed(&self, mut plan: StateValue, state: &StateValue) -> StateValue {
        let metadata = self.handle.metadata();
        for attribute in metadata.schema.attributes.iter().filter(|attribute| attribute.computed) {
            let planned = plan.get(attribute.name);
            if planned.is_unknown() || (planned.is_null() && attribute.default.is_none()) {
                let stored = state.get(attribute.name).clone();
                plan.insert(attribute.name, stored);
            }
        }
        let id_field = metadata.resource_id_field;
        if plan.get(id_field).is_absent() {
            plan.insert(id_field, state.get(id_field).clone());
        }
        plan
    }
}

impl<H> ResourceOperations for ManagedResource<H>
where
    H: ResourceHandle,
{
    fn metadata(&self) -> &ResourceMetadata {
        self.handle.metadata()
    }

    fn validate(&self, plan: &StateValue) -> Diagnostics {
        self.handle.metadata().schema.validate(plan)
    }

    fn create(&self, plan: &StateValue) -> Result<StateValue, ResourceError> {
        let metadata = self.handle.metadata();
        let mut plan = self.prepare(plan)?;
        if !metadata.skip_id_generation {
            plan.insert(metadata.resource_id_field, random_id());
        }
        self.handle.prefill_computed(&mut plan)?;
        let payload = self.handle.state_to_payload(&plan)?;
        debug!(resource = metadata.name, operation = "create", "mapped plan to payload");
        let created = self.handle.rest_resource(&self.api).create(&payload)?;
        let state = self.finish(&created, &plan)?;
        info!(
            resource = metadata.name,
            id = state.get(metadata.resource_id_field).as_str().unwrap_or_default(),
            operation = "create",
            "resource created"
        );
        Ok(state)
    }

    fn read(&self, state: &StateValue) -> Result<Option<StateValue>, ResourceError> {
        let metadata = self.handle.metadata();
        let id = self.recorded_id(state)?;
        match self.handle.rest_resource(&self.api).get_one(id) {
            Ok(payload) => {
                debug!(resource = metadata.name, id, operation = "read", "resource refreshed");
                self.finish(&payload, state).map(Some)
            }
            Err(err) if err.is_not_found() => {
                warn!(
                    resource = metadata.name,
                    id,
                    operation = "read",
                    "resource no longer exists"
                );
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn update(&self, plan: &StateValue, state: &StateValue) -> Result<StateValue, ResourceError> {
        let metadata = self.handle.metadata();
        if metadata.create_only {
            return Err(MappingError::invalid(
                &AttributePath::root(),
                format!("{} does not support updates; changes require replacement", metadata.name),
            )
            .into());
        }
        let plan = self.carry_computed(self.prepare(plan)?, state);
        let payload = self.handle.state_to_payload(&plan)?;
        let updated = self.handle.rest_resource(&self.api).update(&payload)?;
        let state = self.finish(&updated, &plan)?;
        info!(
            resource = metadata.name,
            id = state.get(metadata.resource_id_field).as_str().unwrap_or_default(),
            operation = "update",
            "resource updated"
        );
        Ok(state)
    }

    fn delete(&self, state: &StateValue) -> Result<(), ResourceError> {
        let metadata = self.handle.metadata();
        let payload = self.handle.state_to_payload(state)?;
        self.handle.rest_resource(&self.api).delete(&payload)?;
        info!(
            resource = metadata.name,
            id = state.get(metadata.resource_id_field).as_str().unwrap_or_default(),
            operation = "delete",
            "resource deleted"
        );
        Ok(())
    }

    fn import(&self, id: &str) -> Result<Option<StateValue>, ResourceError> {
        let metadata = self.handle.metadata();
        let seed = StateValue::object().with(metadata.resource_id_field, id);
        let seed = metadata.schema.complete(seed);
        debug!(resource = metadata.name, id, operation = "import", "importing resource");
        self.read(&seed)
    }

    fn upgrade_state(&self, version: i64, raw: RawState) -> Result<StateValue, ResourceError> {
        let metadata = self.handle.metadata();
        let upgraded =
            upgrade_state(&metadata.state_upgraders, version, metadata.schema_version, raw)?;
        if version < metadata.schema_version {
            info!(
                resource = metadata.name,
                from = version,
                to = metadata.schema_version,
                operation = "upgrade_state",
                "state upgraded"
            );
        }
        Ok(metadata.schema.decode_json(&upgraded))
    }
}
