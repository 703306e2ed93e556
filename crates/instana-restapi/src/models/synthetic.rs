// crates/instana-restapi/src/models/synthetic.rs
// ============================================================================
// Module: Synthetic Monitoring Payloads
// Description: Synthetic tests and synthetic smart alerts.
// Purpose: Model HTTP action / HTTP script tests and their alert configs.
// Dependencies: instana-tagfilter, serde
// ============================================================================

use std::collections::BTreeMap;

use instana_tagfilter::TagFilter;
use serde::Deserialize;
use serde::Serialize;

use crate::models::custom_payload::CustomPayloadField;
use crate::resource::InstanaDataObject;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// `syntheticType` of HTTP action tests.
pub const SYNTHETIC_TYPE_HTTP_ACTION: &str = "HTTPAction";
/// `syntheticType` of HTTP script tests.
pub const SYNTHETIC_TYPE_HTTP_SCRIPT: &str = "HTTPScript";

// ============================================================================
// SECTION: Synthetic Tests
// ============================================================================

/// Test configuration. `synthetic_type` selects which fields apply.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntheticTestConfig {
    /// Whether calls are marked as synthetic.
    #[serde(default)]
    pub mark_synthetic_call: bool,
    /// Retries on failure.
    #[serde(default)]
    pub retries: i64,
    /// Seconds between retries.
    #[serde(default)]
    pub retry_interval: i64,
    /// `HTTPAction` or `HTTPScript`.
    pub synthetic_type: String,
    /// Timeout such as `3m`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
    /// Target URL of HTTP actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// HTTP method of HTTP actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    /// Request headers of HTTP actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    /// Request body of HTTP actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Text the response must contain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_string: Option<String>,
    /// Whether redirects are followed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_redirect: Option<bool>,
    /// Whether invalid certificates are accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_insecure: Option<bool>,
    /// Expected status code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect_status: Option<i64>,
    /// Regular expression the body must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect_match: Option<String>,
    /// Script of HTTP scripts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
}

/// Synthetic test.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntheticTest {
    /// Backend id.
    #[serde(default)]
    pub id: String,
    /// Display label.
    pub label: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the test runs.
    #[serde(default)]
    pub active: bool,
    /// Associated application id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    /// Test configuration.
    pub configuration: SyntheticTestConfig,
    /// Free-form properties.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_properties: BTreeMap<String, String>,
    /// Location ids the test runs from.
    #[serde(default)]
    pub locations: Vec<String>,
    /// `Simultaneous` or `Staggered`.
    pub playback_mode: String,
    /// Minutes between runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_frequency: Option<i64>,
}

impl InstanaDataObject for SyntheticTest {
    fn id(&self) -> &str {
        &self.id
    }
}

// ============================================================================
// SECTION: Alerts
// ============================================================================

/// Synthetic alert rule.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntheticAlertRule {
    /// Alert type, e.g. `failure`.
    pub alert_type: String,
    /// Metric evaluated by the rule.
    pub metric_name: String,
    /// Metric aggregation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<String>,
}

/// Synthetic alert time threshold.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntheticAlertTimeThreshold {
    /// Threshold kind, e.g. `violationsInSequence`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Failing runs required, 1 to 12.
    pub violations_count: i64,
}

/// Synthetic alert configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntheticAlertConfig {
    /// Backend id.
    #[serde(default)]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Monitored synthetic test ids.
    #[serde(default)]
    pub synthetic_test_ids: Vec<String>,
    /// Severity code (5 warning, 10 critical).
    pub severity: i64,
    /// Test filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_filter_expression: Option<TagFilter>,
    /// Alert rule.
    pub rule: SyntheticAlertRule,
    /// Alert channel ids.
    #[serde(default)]
    pub alert_channel_ids: Vec<String>,
    /// Time threshold.
    pub time_threshold: SyntheticAlertTimeThreshold,
    /// Custom notification payload.
    #[serde(default)]
    pub custom_payload_fields: Vec<CustomPayloadField>,
    /// Time after which an open event is closed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grace_period: Option<i64>,
}

impl InstanaDataObject for SyntheticAlertConfig {
    fn id(&self) -> &str {
        &self.id
    }
}
