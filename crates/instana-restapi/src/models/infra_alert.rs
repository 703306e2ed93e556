// crates/instana-restapi/src/models/infra_alert.rs
// ============================================================================
// Module: Infrastructure Alert Config Payloads
// Description: Smart alert configurations over infrastructure metrics.
// Purpose: Model infra alert configs with generic metric rules.
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

/// `alertType` of generic infrastructure rules.
pub const INFRA_ALERT_TYPE_GENERIC_RULE: &str = "genericRule";

/// Generic infrastructure metric rule.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfraAlertRule {
    /// Always `genericRule`.
    pub alert_type: String,
    /// Metric evaluated by the rule.
    pub metric_name: String,
    /// Entity type the metric belongs to.
    pub entity_type: String,
    /// Per-entity aggregation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<String>,
    /// Aggregation across time series.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_series_aggregation: Option<String>,
    /// Whether `metric_name` is a regular expression.
    #[serde(default)]
    pub regex: bool,
}

/// Infrastructure alert configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfraAlertConfig {
    /// Backend id.
    #[serde(default)]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Entity filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_filter_expression: Option<TagFilter>,
    /// Tags used to group evaluation.
    #[serde(default)]
    pub group_by: Vec<String>,
    /// Evaluation window in milliseconds.
    pub granularity: i64,
    /// Time threshold (violations in sequence only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_threshold: Option<TimeThreshold>,
    /// Custom notification payload.
    #[serde(default)]
    pub custom_payload_fields: Vec<CustomPayloadField>,
    /// Rules with thresholds.
    #[serde(default)]
    pub rules: Vec<RuleWithThreshold<InfraAlertRule>>,
    /// Alert channel ids keyed by severity.
    #[serde(default)]
    pub alert_channels: BTreeMap<String, Vec<String>>,
    /// `PER_ENTITY` or `CUSTOM`.
    pub evaluation_type: String,
}

impl InstanaDataObject for InfraAlertConfig {
    fn id(&self) -> &str {
        &self.id
    }
}
