// crates/instana-core/src/handle.rs
// ============================================================================
// Module: Resource Handle Contract
// Description: Uniform contract implemented by every managed resource kind.
// Purpose: Standardize metadata, REST selection, and state/payload mapping.
// Dependencies: instana-restapi, serde_json
// ============================================================================

//! ## Overview
//! A [`ResourceHandle`] describes one resource kind: its [`ResourceMetadata`]
//! (name, schema, version, upgraders, lifecycle flags), which REST resource
//! serves it, and the two mapping directions. The CRUD sequence itself lives
//! in [`crate::managed::ManagedResource`] so handles stay pure.
//!
//! Mapping directions:
//! - state to payload fails with diagnostics when unions or required
//!   sub-structures are violated;
//! - payload to state receives the prior state so attributes the backend
//!   does not echo (sensitive values, write-only fields) can be carried over.

use instana_restapi::InstanaApi;
use instana_restapi::InstanaDataObject;
use instana_restapi::RestResource;
use serde_json::Map;
use serde_json::Value;

use crate::diagnostics::Diagnostics;
use crate::error::MappingError;
use crate::schema::Schema;
use crate::value::StateValue;

// ============================================================================
// SECTION: Raw State
// ============================================================================

/// Stored state as decoded JSON, before it is shaped by a schema.
pub type RawState = Map<String, Value>;

/// Migrates raw state written by one schema version to the next.
///
/// # Invariants
/// - `upgrade` is idempotent on state already in the next version's shape.
#[derive(Debug, Clone, Copy)]
pub struct StateUpgrader {
    /// Version the upgrader accepts.
    pub from_version: i64,
    /// Transformation to version `from_version + 1`.
    pub upgrade: fn(RawState) -> Result<RawState, MappingError>,
}

impl StateUpgrader {
    /// Builds an upgrader.
    #[must_use]
    pub const fn new(
        from_version: i64,
        upgrade: fn(RawState) -> Result<RawState, MappingError>,
    ) -> Self {
        Self {
            from_version,
            upgrade,
        }
    }
}

// ============================================================================
// SECTION: Metadata
// ============================================================================

/// Static description of a resource kind.
///
/// # Invariants
/// - `state_upgraders` are ordered by `from_version` and end below
///   `schema_version`.
#[derive(Debug, Clone)]
pub struct ResourceMetadata {
    /// Host resource name, e.g. `instana_api_token`.
    pub name: &'static str,
    /// Declared schema.
    pub schema: Schema,
    /// Current schema version.
    pub schema_version: i64,
    /// Ordered upgraders from older versions.
    pub state_upgraders: Vec<StateUpgrader>,
    /// Updates require destroy and recreate.
    pub create_only: bool,
    /// The backend assigns the id; no random id is generated before create.
    pub skip_id_generation: bool,
    /// Attribute holding the id used for reads and imports.
    pub resource_id_field: &'static str,
}

impl ResourceMetadata {
    /// Metadata with no upgraders, updatable, ids generated locally.
    #[must_use]
    pub const fn new(name: &'static str, schema: Schema, schema_version: i64) -> Self {
        Self {
            name,
            schema,
            schema_version,
            state_upgraders: Vec::new(),
            create_only: false,
            skip_id_generation: false,
            resource_id_field: "id",
        }
    }

    /// Sets the upgraders.
    #[must_use]
    pub fn with_upgraders(mut self, upgraders: Vec<StateUpgrader>) -> Self {
        self.state_upgraders = upgraders;
        self
    }

    /// Marks the resource create-only.
    #[must_use]
    pub const fn create_only(mut self) -> Self {
        self.create_only = true;
        self
    }

    /// Leaves id assignment to the backend.
    #[must_use]
    pub const fn skip_id_generation(mut self) -> Self {
        self.skip_id_generation = true;
        self
    }

    /// Reads and imports by `field` instead of `id`.
    #[must_use]
    pub const fn resource_id_field(mut self, field: &'static str) -> Self {
        self.resource_id_field = field;
        self
    }
}

// ============================================================================
// SECTION: Handle
// ============================================================================

/// Mapping contract of one resource kind.
pub trait ResourceHandle: Send + Sync {
    /// Backend payload type.
    type Payload: InstanaDataObject;

    /// Returns the static description.
    fn metadata(&self) -> &ResourceMetadata;

    /// Selects the REST resource serving this kind.
    fn rest_resource(&self, api: &InstanaApi) -> RestResource<Self::Payload>;

    /// Projects a planned or stored state onto a payload.
    ///
    /// # Errors
    /// Returns [`Diagnostics`] bound to the offending attributes.
    fn state_to_payload(&self, state: &StateValue) -> Result<Self::Payload, Diagnostics>;

    /// Builds state from a fetched payload.
    ///
    /// `prior` is the state before the call (plan on create, stored state on
    /// read); attributes the backend never returns are copied from it.
    ///
    /// # Errors
    /// Returns [`Diagnostics`] when the payload cannot be represented.
    fn payload_to_state(
        &self,
        payload: &Self::Payload,
        prior: &StateValue,
    ) -> Result<StateValue, Diagnostics>;

    /// Fills computed attributes that must exist before create.
    ///
    /// # Errors
    /// Returns [`Diagnostics`] when a value cannot be derived.
    fn prefill_computed(&self, plan: &mut StateValue) -> Result<(), Diagnostics> {
        let _ = plan;
        Ok(())
    }
}
