// crates/instana-restapi/src/models/application_alert.rs
// ============================================================================
// Module: Application Alert Config Payloads
// Description: Smart alert configurations scoped to applications.
// Purpose: Model application and global application alert configs.
// Dependencies: instana-tagfilter, serde
// ============================================================================

//! ## Overview
//! Application alert configs select a scope tree (application, service,
//! endpoint) keyed by id, a list of rules with thresholds, and a time
//! threshold. The same payload is served by the per-application and the
//! global endpoints.

use std::collections::BTreeMap;

use instana_tagfilter::TagFilter;
use serde::Deserialize;
use serde::Serialize;

use crate::models::custom_payload::CustomPayloadField;
use crate::models::threshold::RuleWithThreshold;
use crate::models::time_threshold::TimeThreshold;
use crate::resource::InstanaDataObject;

// ============================================================================
// SECTION: Scope Tree
// ============================================================================

/// Endpoint selected within a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncludedEndpoint {
    /// Endpoint id.
    pub endpoint_id: String,
    /// Whether the endpoint is included or excluded.
    pub inclusive: bool,
}

/// Service selected within an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncludedService {
    /// Service id.
    pub service_id: String,
    /// Whether the service subtree is included or excluded.
    pub inclusive: bool,
    /// Endpoints keyed by id.
    #[serde(default)]
    pub endpoints: BTreeMap<String, IncludedEndpoint>,
}

/// Application selected by an alert config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncludedApplication {
    /// Application id.
    pub application_id: String,
    /// Whether the application subtree is included or excluded.
    pub inclusive: bool,
    /// Services keyed by id.
    #[serde(default)]
    pub services: BTreeMap<String, IncludedService>,
}

// ============================================================================
// SECTION: Rules
// ============================================================================

/// Application alert rule. `alert_type` selects the variant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationAlertRule {
    /// `errorRate`, `errors`, `logs`, `slowness`, `statusCode`, or `throughput`.
    pub alert_type: String,
    /// Metric evaluated by the rule.
    pub metric_name: String,
    /// Metric aggregation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<String>,
    /// Log level for `logs` rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Log message for `logs` rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Message operator for `logs` rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    /// Lower status code bound for `statusCode` rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code_start: Option<i64>,
    /// Upper status code bound for `statusCode` rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code_end: Option<i64>,
}

// ============================================================================
// SECTION: Config
// ============================================================================

/// Application alert configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationAlertConfig {
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
    /// Scope tree keyed by application id.
    #[serde(default)]
    pub applications: BTreeMap<String, IncludedApplication>,
    /// `ALL`, `INBOUND`, or `DEFAULT`.
    pub boundary_scope: String,
    /// Additional tag filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_filter_expression: Option<TagFilter>,
    /// Whether internal calls are included.
    #[serde(default)]
    pub include_internal: bool,
    /// Whether synthetic calls are included.
    #[serde(default)]
    pub include_synthetic: bool,
    /// `PER_AP`, `PER_AP_SERVICE`, or `PER_AP_ENDPOINT`.
    pub evaluation_type: String,
    /// Alert channel ids keyed by severity.
    #[serde(default)]
    pub alert_channels: BTreeMap<String, Vec<String>>,
    /// Evaluation window in milliseconds.
    pub granularity: i64,
    /// Time after which an open event is closed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grace_period: Option<i64>,
    /// Custom notification payload.
    #[serde(default)]
    pub custom_payload_fields: Vec<CustomPayloadField>,
    /// Rules with thresholds.
    #[serde(default)]
    pub rules: Vec<RuleWithThreshold<ApplicationAlertRule>>,
    /// Time threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_threshold: Option<TimeThreshold>,
}

impl InstanaDataObject for ApplicationAlertConfig {
    fn id(&self) -> &str {
        &self.id
    }
}
