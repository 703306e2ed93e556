// crates/instana-restapi/src/models/website_alert.rs
// ============================================================================
// Module: Website Alert Config Payloads
// Description: Smart alert configurations for end-user monitored websites.
// Purpose: Model website alert configs and their rules.
// Dependencies: instana-tagfilter, serde
// ============================================================================

use instana_tagfilter::TagFilter;
use serde::Deserialize;
use serde::Serialize;

use crate::models::custom_payload::CustomPayloadField;
use crate::models::threshold::RuleWithThreshold;
use crate::models::time_threshold::TimeThreshold;
use crate::resource::InstanaDataObject;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Website alert rule. `alert_type` selects the variant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteAlertRule {
    /// `specificJsError`, `slowness`, `statusCode`, or `throughput`.
    pub alert_type: String,
    /// Beacon metric evaluated by the rule.
    pub metric_name: String,
    /// Metric aggregation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<String>,
    /// Comparison operator for the matched value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    /// Matched value (error message or status code).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Website alert configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteAlertConfig {
    /// Backend id.
    #[serde(default)]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Severity code (5 warning, 10 critical).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<i64>,
    /// Whether an incident is triggered.
    #[serde(default)]
    pub triggering: bool,
    /// Whether the alert is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Monitored website id.
    pub website_id: String,
    /// Beacon filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_filter_expression: Option<TagFilter>,
    /// Alert channel ids.
    #[serde(default)]
    pub alert_channel_ids: Vec<String>,
    /// Evaluation window in milliseconds.
    pub granularity: i64,
    /// Custom notification payload.
    #[serde(default)]
    pub custom_payload_fields: Vec<CustomPayloadField>,
    /// Rules with thresholds.
    #[serde(default)]
    pub rules: Vec<RuleWithThreshold<WebsiteAlertRule>>,
    /// Time threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_threshold: Option<TimeThreshold>,
}

impl InstanaDataObject for WebsiteAlertConfig {
    fn id(&self) -> &str {
        &self.id
    }
}
