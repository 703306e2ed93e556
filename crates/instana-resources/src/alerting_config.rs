// crates/instana-resources/src/alerting_config.rs
// ============================================================================
// Module: Alerting Config Handle
// Description: Classic alert configurations routing events to channels.
// Purpose: Map the flattened event filter attributes to the nested payload.
// Dependencies: instana-core, instana-restapi
// ============================================================================

//! ## Overview
//! State flattens the event filter into three top-level attributes. Event
//! types are lowercase in state and uppercase on the wire.

use instana_core::Attribute;
use instana_core::AttributeType;
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
use instana_core::mappers::CUSTOM_PAYLOAD_FIELD;
use instana_core::mappers::custom_payload_attribute;
use instana_core::mappers::custom_payload_from_state;
use instana_core::mappers::custom_payload_to_state;
use instana_core::upgrade::identity;
use instana_core::upgrade::rename_attribute;
use instana_restapi::InstanaApi;
use instana_restapi::RestResource;
use instana_restapi::models::alerting_config::AlertingConfiguration;
use instana_restapi::models::alerting_config::EventFilteringConfiguration;

use crate::common::FIELD_ID;
use crate::common::MAX_NAME_LENGTH;
use crate::common::id_attribute;
use crate::common::id_from_state;
use crate::common::optional_non_empty;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Host resource name.
pub const RESOURCE_NAME: &str = "instana_alerting_config";
/// Current schema version.
const SCHEMA_VERSION: i64 = 2;

/// Display name.
pub const FIELD_ALERT_NAME: &str = "alert_name";
/// Alert name attribute before version 1.
const FIELD_FULL_ALERT_NAME: &str = "full_alert_name";
/// Alerting channel ids.
pub const FIELD_INTEGRATION_IDS: &str = "integration_ids";
/// Dynamic focus query.
pub const FIELD_EVENT_FILTER_QUERY: &str = "event_filter_query";
/// Event types in lowercase.
pub const FIELD_EVENT_FILTER_EVENT_TYPES: &str = "event_filter_event_types";
/// Event specification ids.
pub const FIELD_EVENT_FILTER_RULE_IDS: &str = "event_filter_rule_ids";

/// Event types accepted in state.
pub const EVENT_TYPES: [&str; 8] = [
    "incident",
    "critical",
    "warning",
    "change",
    "online",
    "offline",
    "agent_monitoring_issue",
    "none",
];

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Resource schema.
fn schema() -> Schema {
    Schema::new(
        "Alerting configuration routing events to alerting channels",
        vec![
            id_attribute(),
            Attribute::string(FIELD_ALERT_NAME)
                .required()
                .validate(Validator::LengthBetween(1, MAX_NAME_LENGTH))
                .describe("Configuration name"),
            Attribute::new(FIELD_INTEGRATION_IDS, AttributeType::string_set())
                .required()
                .validate(Validator::SizeBetween(0, 1024))
                .describe("Alerting channel ids"),
            Attribute::string(FIELD_EVENT_FILTER_QUERY)
                .validate(Validator::LengthBetween(0, 2048))
                .describe("Dynamic focus query for the event filter"),
            Attribute::new(FIELD_EVENT_FILTER_EVENT_TYPES, AttributeType::string_set())
                .validate(Validator::EachOneOf(&EVENT_TYPES))
                .describe("Event types for the event filter"),
            Attribute::new(FIELD_EVENT_FILTER_RULE_IDS, AttributeType::string_set())
                .validate(Validator::SizeBetween(0, 1024))
                .describe("Event specification ids for the event filter"),
            custom_payload_attribute(),
        ],
    )
}

/// Renames `full_alert_name` from version 0.
fn rename_full_alert_name(raw: RawState) -> Result<RawState, MappingError> {
    Ok(rename_attribute(raw, FIELD_FULL_ALERT_NAME, FIELD_ALERT_NAME))
}

// ============================================================================
// SECTION: Handle
// ============================================================================

/// Handle for alerting configurations.
#[derive(Debug)]
pub struct AlertingConfigHandle {
    /// Static description.
    metadata: ResourceMetadata,
}

impl AlertingConfigHandle {
    /// Builds the handle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: ResourceMetadata::new(RESOURCE_NAME, schema(), SCHEMA_VERSION)
                .with_upgraders(vec![
                    StateUpgrader::new(0, rename_full_alert_name),
                    StateUpgrader::new(1, identity),
                ]),
        }
    }
}

impl Default for AlertingConfigHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceHandle for AlertingConfigHandle {
    type Payload = AlertingConfiguration;

    fn metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }

    fn rest_resource(&self, api: &InstanaApi) -> RestResource<AlertingConfiguration> {
        api.alerting_configurations()
    }

    fn state_to_payload(&self, state: &StateValue) -> Result<AlertingConfiguration, Diagnostics> {
        config_from_state(&ObjectReader::root(state))
    }

    fn payload_to_state(
        &self,
        payload: &AlertingConfiguration,
        _prior: &StateValue,
    ) -> Result<StateValue, Diagnostics> {
        let filter = &payload.event_filtering_configuration;
        let event_types: Vec<String> =
            filter.event_types.iter().map(|event_type| event_type.to_lowercase()).collect();
        Ok(StateValue::object()
            .with(FIELD_ID, &payload.id)
            .with(FIELD_ALERT_NAME, &payload.alert_name)
            .with(
                FIELD_INTEGRATION_IDS,
                StateValue::string_set(payload.integration_ids.iter().cloned()),
            )
            .with(FIELD_EVENT_FILTER_QUERY, filter.query.clone().filter(|query| !query.is_empty()))
            .with(FIELD_EVENT_FILTER_EVENT_TYPES, StateValue::string_set_or_null(&event_types))
            .with(FIELD_EVENT_FILTER_RULE_IDS, StateValue::string_set_or_null(&filter.rule_ids))
            .with(CUSTOM_PAYLOAD_FIELD, custom_payload_to_state(&payload.custom_payload_fields)))
    }
}

/// Maps a resource object to the payload.
fn config_from_state(reader: &ObjectReader<'_>) -> Result<AlertingConfiguration, Diagnostics> {
    let mut diagnostics = Diagnostics::new();
    let event_types = diagnostics.take(reader.string_list(FIELD_EVENT_FILTER_EVENT_TYPES));
    let config = AlertingConfiguration {
        id: diagnostics.take(id_from_state(reader)),
        alert_name: diagnostics.take(reader.required_string(FIELD_ALERT_NAME)),
        integration_ids: diagnostics.take(reader.string_list(FIELD_INTEGRATION_IDS)),
        event_filtering_configuration: EventFilteringConfiguration {
            query: diagnostics.take(optional_non_empty(reader, FIELD_EVENT_FILTER_QUERY)),
            rule_ids: diagnostics.take(reader.string_list(FIELD_EVENT_FILTER_RULE_IDS)),
            event_types: event_types.iter().map(|event_type| event_type.to_uppercase()).collect(),
        },
        custom_payload_fields: diagnostics
            .take(custom_payload_from_state(reader, CUSTOM_PAYLOAD_FIELD)),
    };
    diagnostics.finish(config)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
