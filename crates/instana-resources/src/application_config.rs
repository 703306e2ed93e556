// crates/instana-resources/src/application_config.rs
// ============================================================================
// Module: Application Config Handle
// Description: Application perspectives defined by a tag filter.
// Purpose: Map scope, boundary, filter, and access rules of perspectives.
// Dependencies: instana-core, instana-restapi
// ============================================================================

//! ## Overview
//! Version 0 state carried `full_label` and a structured
//! `match_specification`. The label is renamed on upgrade; the match
//! specification is dropped and the stored `tag_filter` takes its place.

use instana_core::Attribute;
use instana_core::AttributePath;
use instana_core::Diagnostics;
use instana_core::MappingError;
use instana_core::ObjectReader;
use instana_core::RawState;
use instana_core::ResourceHandle;
use instana_core::ResourceMetadata;
use instana_core::Schema;
use instana_core::StateUpgrader;
use instana_core::StateValue;
use instana_core::Validator;
use instana_core::mappers::TAG_FILTER_FIELD;
use instana_core::mappers::tag_filter_from_state;
use instana_core::mappers::tag_filter_to_state;
use instana_core::upgrade::drop_attributes;
use instana_core::upgrade::identity;
use instana_core::upgrade::rename_attribute;
use instana_restapi::InstanaApi;
use instana_restapi::RestResource;
use instana_restapi::models::application_config::APPLICATION_CONFIG_SCOPES;
use instana_restapi::models::application_config::ApplicationConfig;
use instana_restapi::models::application_config::BOUNDARY_SCOPES;

use crate::common::FIELD_ACCESS_RULE;
use crate::common::FIELD_ID;
use crate::common::access_rule_attribute;
use crate::common::access_rules_from_state;
use crate::common::access_rules_to_state;
use crate::common::id_attribute;
use crate::common::id_from_state;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Host resource name.
pub const RESOURCE_NAME: &str = "instana_application_config";
/// Current schema version.
const SCHEMA_VERSION: i64 = 4;

/// Display label.
pub const FIELD_LABEL: &str = "label";
/// Downstream inclusion.
pub const FIELD_SCOPE: &str = "scope";
/// Call boundary.
pub const FIELD_BOUNDARY_SCOPE: &str = "boundary_scope";
/// Label attribute of version 0.
const FIELD_FULL_LABEL: &str = "full_label";
/// Structured filter of version 1.
const FIELD_MATCH_SPECIFICATION: &str = "match_specification";

/// Scope used when none is configured.
const DEFAULT_SCOPE: &str = "INCLUDE_NO_DOWNSTREAM";
/// Boundary scope used when none is configured.
const DEFAULT_BOUNDARY_SCOPE: &str = "DEFAULT";

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Resource schema.
fn schema() -> Schema {
    Schema::new(
        "Application configuration",
        vec![
            id_attribute(),
            Attribute::string(FIELD_LABEL)
                .required()
                .describe("The label of the application config"),
            Attribute::string(FIELD_SCOPE)
                .default_value(DEFAULT_SCOPE)
                .validate(Validator::OneOf(&APPLICATION_CONFIG_SCOPES)),
            Attribute::string(FIELD_BOUNDARY_SCOPE)
                .default_value(DEFAULT_BOUNDARY_SCOPE)
                .validate(Validator::OneOf(&BOUNDARY_SCOPES)),
            Attribute::string(TAG_FILTER_FIELD).required().describe("The tag filter expression"),
            access_rule_attribute().required(),
        ],
    )
}

/// Renames `full_label` from version 0.
fn rename_full_label(raw: RawState) -> Result<RawState, MappingError> {
    Ok(rename_attribute(raw, FIELD_FULL_LABEL, FIELD_LABEL))
}

/// Drops `match_specification` from version 1.
fn drop_match_specification(raw: RawState) -> Result<RawState, MappingError> {
    Ok(drop_attributes(raw, &[FIELD_MATCH_SPECIFICATION]))
}

// ============================================================================
// SECTION: Handle
// ============================================================================

/// Handle for application perspectives.
#[derive(Debug)]
pub struct ApplicationConfigHandle {
    /// Static description.
    metadata: ResourceMetadata,
}

impl ApplicationConfigHandle {
    /// Builds the handle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: ResourceMetadata::new(RESOURCE_NAME, schema(), SCHEMA_VERSION)
                .with_upgraders(vec![
                    StateUpgrader::new(0, rename_full_label),
                    StateUpgrader::new(1, drop_match_specification),
                    StateUpgrader::new(2, identity),
                    StateUpgrader::new(3, identity),
                ]),
        }
    }
}

impl Default for ApplicationConfigHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceHandle for ApplicationConfigHandle {
    type Payload = ApplicationConfig;

    fn metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }

    fn rest_resource(&self, api: &InstanaApi) -> RestResource<ApplicationConfig> {
        api.application_configs()
    }

    fn state_to_payload(&self, state: &StateValue) -> Result<ApplicationConfig, Diagnostics> {
        config_from_state(&ObjectReader::root(state))
    }

    fn payload_to_state(
        &self,
        payload: &ApplicationConfig,
        _prior: &StateValue,
    ) -> Result<StateValue, Diagnostics> {
        config_to_state(payload).map_err(Diagnostics::from)
    }
}

// ============================================================================
// SECTION: Mapping
// ============================================================================

/// Maps a resource object to the payload.
fn config_from_state(reader: &ObjectReader<'_>) -> Result<ApplicationConfig, Diagnostics> {
    let mut diagnostics = Diagnostics::new();
    let config = ApplicationConfig {
        id: diagnostics.take(id_from_state(reader)),
        label: diagnostics.take(reader.required_string(FIELD_LABEL)),
        scope: diagnostics.take(reader.string_or(FIELD_SCOPE, DEFAULT_SCOPE)),
        boundary_scope: diagnostics
            .take(reader.string_or(FIELD_BOUNDARY_SCOPE, DEFAULT_BOUNDARY_SCOPE)),
        tag_filter_expression: diagnostics.take(tag_filter_from_state(reader, TAG_FILTER_FIELD)),
        access_rules: diagnostics.take(access_rules_from_state(reader)),
    };
    diagnostics.finish(config)
}

/// Maps the payload to a resource object.
fn config_to_state(config: &ApplicationConfig) -> Result<StateValue, MappingError> {
    let tag_filter = tag_filter_to_state(
        config.tag_filter_expression.as_ref(),
        &AttributePath::attribute(TAG_FILTER_FIELD),
    )?;
    Ok(StateValue::object()
        .with(FIELD_ID, &config.id)
        .with(FIELD_LABEL, &config.label)
        .with(FIELD_SCOPE, &config.scope)
        .with(FIELD_BOUNDARY_SCOPE, &config.boundary_scope)
        .with(TAG_FILTER_FIELD, tag_filter)
        .with(FIELD_ACCESS_RULE, access_rules_to_state(&config.access_rules)))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
