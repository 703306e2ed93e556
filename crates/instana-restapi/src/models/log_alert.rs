// crates/instana-restapi/src/models/log_alert.rs
// ============================================================================
// Module: Log Alert Config Payloads
// Description: Smart alert configurations over log volume.
// Purpose: Model log alert configs with group-by tags.
// Dependencies: instana-tagfilter, serde
// ============================================================================

use std::collections::BTreeMap;

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

/// `alertType` of log count rules.
pub const LOG_ALERT_TYPE_COUNT: &str = "log.count";

/// Log alert rule.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogAlertRule {
    /// Always `log.count`.
    pub alert_type: String,
    /// Metric evaluated by the rule.
    pub metric_name: String,
    /// Metric aggregation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<String>,
}

/// Tag used to group log alert evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupByTag {
    /// Tag name.
    pub tag_name: String,
    /// Key of a key/value tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Log alert configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogAlertConfig {
    /// Backend id.
    #[serde(default)]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Log filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_filter_expression: Option<TagFilter>,
    /// Alert channel ids keyed by severity.
    #[serde(default)]
    pub alert_channels: BTreeMap<String, Vec<String>>,
    /// Evaluation window in milliseconds.
    pub granularity: i64,
    /// Time threshold (violations in sequence only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_threshold: Option<TimeThreshold>,
    /// Time after which an open event is closed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grace_period: Option<i64>,
    /// Custom notification payload.
    #[serde(default)]
    pub custom_payload_fields: Vec<CustomPayloadField>,
    /// Rules with thresholds.
    #[serde(default)]
    pub rules: Vec<RuleWithThreshold<LogAlertRule>>,
    /// Tags used to group evaluation.
    #[serde(default)]
    pub group_by: Vec<GroupByTag>,
}

impl InstanaDataObject for LogAlertConfig {
    fn id(&self) -> &str {
        &self.id
    }
}
