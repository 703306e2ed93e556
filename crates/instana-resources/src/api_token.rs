// crates/instana-resources/src/api_token.rs
// ============================================================================
// Module: API Token Handle
// Description: API tokens with table-driven permission flags.
// Purpose: Route tokens by internal id and generate their secrets locally.
// Dependencies: instana-core, instana-restapi, tracing
// ============================================================================

//! ## Overview
//! Every flag in [`API_TOKEN_PERMISSIONS`] becomes a boolean attribute that
//! defaults to false. The backend addresses tokens by `internal_id`, which is
//! generated together with the access granting token before create.

use instana_core::Attribute;
use instana_core::Diagnostics;
use instana_core::ObjectReader;
use instana_core::ResourceHandle;
use instana_core::ResourceMetadata;
use instana_core::Schema;
use instana_core::StateUpgrader;
use instana_core::StateValue;
use instana_core::id::random_id;
use instana_core::upgrade::identity;
use instana_core::upgrade::rename_full_name;
use instana_restapi::InstanaApi;
use instana_restapi::RestResource;
use instana_restapi::models::api_token::API_TOKEN_PERMISSIONS;
use instana_restapi::models::api_token::ApiToken;
use tracing::debug;

use crate::common::FIELD_ID;
use crate::common::FIELD_NAME;
use crate::common::MAX_NAME_LENGTH;
use crate::common::flag;
use crate::common::id_attribute;
use crate::common::id_from_state;
use crate::common::name_attribute;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Host resource name.
pub const RESOURCE_NAME: &str = "instana_api_token";
/// Current schema version.
const SCHEMA_VERSION: i64 = 2;

/// Secret token value.
pub const FIELD_ACCESS_GRANTING_TOKEN: &str = "access_granting_token";
/// Routing id.
pub const FIELD_INTERNAL_ID: &str = "internal_id";

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Resource schema.
fn schema() -> Schema {
    let mut attributes = vec![
        id_attribute(),
        Attribute::string(FIELD_ACCESS_GRANTING_TOKEN)
            .computed()
            .sensitive()
            .describe("The token used to authenticate API calls"),
        Attribute::string(FIELD_INTERNAL_ID)
            .computed()
            .describe("The id used to address the token"),
        name_attribute(MAX_NAME_LENGTH),
    ];
    attributes.extend(API_TOKEN_PERMISSIONS.iter().map(|&(field, _)| flag(field, false)));
    Schema::new("API token", attributes)
}

// ============================================================================
// SECTION: Handle
// ============================================================================

/// Handle for API tokens.
#[derive(Debug)]
pub struct ApiTokenHandle {
    /// Static description.
    metadata: ResourceMetadata,
}

impl ApiTokenHandle {
    /// Builds the handle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: ResourceMetadata::new(RESOURCE_NAME, schema(), SCHEMA_VERSION)
                .with_upgraders(vec![
                    StateUpgrader::new(0, rename_full_name),
                    StateUpgrader::new(1, identity),
                ])
                .resource_id_field(FIELD_INTERNAL_ID),
        }
    }
}

impl Default for ApiTokenHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceHandle for ApiTokenHandle {
    type Payload = ApiToken;

    fn metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }

    fn rest_resource(&self, api: &InstanaApi) -> RestResource<ApiToken> {
        api.api_tokens()
    }

    fn state_to_payload(&self, state: &StateValue) -> Result<ApiToken, Diagnostics> {
        token_from_state(&ObjectReader::root(state))
    }

    fn payload_to_state(
        &self,
        payload: &ApiToken,
        _prior: &StateValue,
    ) -> Result<StateValue, Diagnostics> {
        Ok(token_to_state(payload))
    }

    fn prefill_computed(&self, plan: &mut StateValue) -> Result<(), Diagnostics> {
        if plan.get(FIELD_INTERNAL_ID).is_absent() {
            plan.insert(FIELD_INTERNAL_ID, random_id());
        }
        plan.insert(FIELD_ACCESS_GRANTING_TOKEN, random_id());
        debug!(resource = RESOURCE_NAME, "generated access granting token");
        Ok(())
    }
}

// ============================================================================
// SECTION: Mapping
// ============================================================================

/// Maps a resource object to the payload.
fn token_from_state(reader: &ObjectReader<'_>) -> Result<ApiToken, Diagnostics> {
    let mut diagnostics = Diagnostics::new();
    let mut token = ApiToken {
        id: diagnostics.take(id_from_state(reader)),
        access_granting_token: diagnostics.take(reader.string_or(FIELD_ACCESS_GRANTING_TOKEN, "")),
        internal_id: diagnostics.take(reader.string_or(FIELD_INTERNAL_ID, "")),
        name: diagnostics.take(reader.required_string(FIELD_NAME)),
        ..ApiToken::default()
    };
    for (field, wire) in API_TOKEN_PERMISSIONS {
        token.set_permission(wire, diagnostics.take(reader.bool_or(field, false)));
    }
    diagnostics.finish(token)
}

/// Maps the payload to a resource object.
fn token_to_state(token: &ApiToken) -> StateValue {
    API_TOKEN_PERMISSIONS.iter().fold(
        StateValue::object()
            .with(FIELD_ID, &token.id)
            .with(FIELD_ACCESS_GRANTING_TOKEN, &token.access_granting_token)
            .with(FIELD_INTERNAL_ID, &token.internal_id)
            .with(FIELD_NAME, &token.name),
        |state, (field, wire)| state.with(field, token.permission(wire)),
    )
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
