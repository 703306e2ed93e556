// crates/instana-restapi/src/models/alerting_config.rs
// ============================================================================
// Module: Alerting Config Payloads
// Description: Classic alert configurations routing events to channels.
// Purpose: Model alerting configs and their event filter.
// Dependencies: serde
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::models::custom_payload::CustomPayloadField;
use crate::resource::InstanaDataObject;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Event types accepted by the event filter, in wire form.
pub const ALERT_EVENT_TYPES: [&str; 8] = [
    "INCIDENT",
    "CRITICAL",
    "WARNING",
    "CHANGE",
    "ONLINE",
    "OFFLINE",
    "AGENT_MONITORING_ISSUE",
    "NONE",
];

// ============================================================================
// SECTION: Types
// ============================================================================

/// Selects which events trigger the alert.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFilteringConfiguration {
    /// Dynamic focus query limiting the entities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Event specification ids.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rule_ids: Vec<String>,
    /// Event types in wire form.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub event_types: Vec<String>,
}

/// Alerting configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertingConfiguration {
    /// Backend id.
    #[serde(default)]
    pub id: String,
    /// Display name.
    pub alert_name: String,
    /// Alerting channel ids.
    #[serde(default)]
    pub integration_ids: Vec<String>,
    /// Event filter.
    #[serde(default)]
    pub event_filtering_configuration: EventFilteringConfiguration,
    /// Custom notification payload.
    #[serde(default)]
    pub custom_payload_fields: Vec<CustomPayloadField>,
}

impl InstanaDataObject for AlertingConfiguration {
    fn id(&self) -> &str {
        &self.id
    }
}
