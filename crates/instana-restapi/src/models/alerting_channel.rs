// crates/instana-restapi/src/models/alerting_channel.rs
// ============================================================================
// Module: Alerting Channel Payloads
// Description: Notification destinations such as email, Slack, or webhooks.
// Purpose: Model the flat channel object discriminated by `kind`.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The backend models every channel kind with one flat object; only the
//! fields relevant to `kind` are populated. Unset fields are sent as `null`
//! because the backend treats absent and null alike.

use serde::Deserialize;
use serde::Serialize;

use crate::resource::InstanaDataObject;

// ============================================================================
// SECTION: Kinds
// ============================================================================

/// Channel kind discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertingChannelKind {
    /// Email recipients.
    Email,
    /// Google Chat webhook.
    GoogleChat,
    /// Microsoft 365 webhook.
    #[serde(rename = "OFFICE_365")]
    Office365,
    /// OpsGenie integration.
    OpsGenie,
    /// PagerDuty integration.
    PagerDuty,
    /// Slack webhook.
    Slack,
    /// Splunk endpoint.
    Splunk,
    /// VictorOps integration.
    VictorOps,
    /// Generic webhooks.
    WebHook,
    /// ServiceNow incident webhook.
    ServiceNowWebhook,
    /// ServiceNow ITSM application.
    ServiceNowApplication,
    /// Prometheus alertmanager webhook.
    PrometheusWebhook,
    /// Webex Teams webhook.
    WebexTeamsWebhook,
    /// Watson AIOps webhook.
    WatsonAiopsWebhook,
}

impl AlertingChannelKind {
    /// All supported kinds.
    pub const ALL: [Self; 14] = [
        Self::Email,
        Self::GoogleChat,
        Self::Office365,
        Self::OpsGenie,
        Self::PagerDuty,
        Self::Slack,
        Self::Splunk,
        Self::VictorOps,
        Self::WebHook,
        Self::ServiceNowWebhook,
        Self::ServiceNowApplication,
        Self::PrometheusWebhook,
        Self::WebexTeamsWebhook,
        Self::WatsonAiopsWebhook,
    ];
}

// ============================================================================
// SECTION: Channel
// ============================================================================

/// Alerting channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertingChannel {
    /// Backend id.
    #[serde(default)]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Channel kind.
    pub kind: AlertingChannelKind,
    /// Email recipients.
    #[serde(default)]
    pub emails: Vec<String>,
    /// Single webhook URL.
    #[serde(default)]
    pub webhook_url: Option<String>,
    /// Integration API key.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Comma separated OpsGenie tags.
    #[serde(default)]
    pub tags: Option<String>,
    /// OpsGenie region.
    #[serde(default)]
    pub region: Option<String>,
    /// VictorOps routing key.
    #[serde(default)]
    pub routing_key: Option<String>,
    /// PagerDuty service integration key.
    #[serde(default)]
    pub service_integration_key: Option<String>,
    /// Slack icon URL.
    #[serde(default)]
    pub icon_url: Option<String>,
    /// Slack channel.
    #[serde(default)]
    pub channel: Option<String>,
    /// Splunk URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Splunk token.
    #[serde(default)]
    pub token: Option<String>,
    /// Generic webhook URLs.
    #[serde(default)]
    pub webhook_urls: Vec<String>,
    /// Webhook headers as `Name: value` lines.
    #[serde(default)]
    pub headers: Vec<String>,
    /// ServiceNow instance URL.
    #[serde(default)]
    pub service_now_url: Option<String>,
    /// ServiceNow user.
    #[serde(default)]
    pub username: Option<String>,
    /// ServiceNow password.
    #[serde(default)]
    pub password: Option<String>,
    /// Whether ServiceNow incidents are closed automatically.
    #[serde(default)]
    pub auto_close_incidents: Option<bool>,
    /// ServiceNow tenant.
    #[serde(default)]
    pub tenant: Option<String>,
    /// ServiceNow unit.
    #[serde(default)]
    pub unit: Option<String>,
    /// Instana URL linked from ServiceNow.
    #[serde(default)]
    pub instana_url: Option<String>,
    /// Whether Instana notes are sent.
    #[serde(default)]
    pub enable_send_instana_notes: Option<bool>,
    /// Whether ServiceNow activities are sent.
    #[serde(default)]
    pub enable_send_service_now_activities: Option<bool>,
    /// Whether ServiceNow work notes are sent.
    #[serde(default)]
    pub enable_send_service_now_work_notes: Option<bool>,
    /// Whether manually closed incidents are kept closed.
    #[serde(default)]
    pub manually_closed_incidents: Option<bool>,
    /// Whether incidents are resolved on close.
    #[serde(default)]
    pub resolution_of_incident: Option<bool>,
    /// ServiceNow state applied on close.
    #[serde(default)]
    pub snow_status_on_close_event: Option<i64>,
    /// Prometheus receiver.
    #[serde(default)]
    pub receiver: Option<String>,
}

impl AlertingChannel {
    /// Builds an empty channel of the given kind.
    #[must_use]
    pub const fn new(id: String, name: String, kind: AlertingChannelKind) -> Self {
        Self {
            id,
            name,
            kind,
            emails: Vec::new(),
            webhook_url: None,
            api_key: None,
            tags: None,
            region: None,
            routing_key: None,
            service_integration_key: None,
            icon_url: None,
            channel: None,
            url: None,
            token: None,
            webhook_urls: Vec::new(),
            headers: Vec::new(),
            service_now_url: None,
            username: None,
            password: None,
            auto_close_incidents: None,
            tenant: None,
            unit: None,
            instana_url: None,
            enable_send_instana_notes: None,
            enable_send_service_now_activities: None,
            enable_send_service_now_work_notes: None,
            manually_closed_incidents: None,
            resolution_of_incident: None,
            snow_status_on_close_event: None,
            receiver: None,
        }
    }
}

impl InstanaDataObject for AlertingChannel {
    fn id(&self) -> &str {
        &self.id
    }
}
