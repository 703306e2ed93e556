// crates/instana-restapi/src/models/slo_alert.rs
// ============================================================================
// Module: SLO Alert Config Payloads
// Description: Smart alerts over service level objectives.
// Purpose: Model status, error budget, and burn rate alerts.
// Dependencies: serde
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::models::custom_payload::CustomPayloadField;
use crate::resource::InstanaDataObject;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Alert kind as an `(alertType, metric)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SloAlertRule {
    /// `SERVICE_LEVELS_OBJECTIVE` or `ERROR_BUDGET`.
    pub alert_type: String,
    /// `STATUS`, `BURNED_PERCENTAGE`, or `BURN_RATE_V2`.
    pub metric: String,
}

/// Static threshold of status and error budget alerts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SloAlertThreshold {
    /// Threshold kind, normally `staticThreshold`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Comparison operator.
    pub operator: String,
    /// Threshold value.
    pub value: f64,
}

/// Warm-up and cool-down periods.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SloAlertTimeThreshold {
    /// Warm-up in milliseconds.
    pub time_window: i64,
    /// Cool-down in milliseconds.
    pub expiry: i64,
}

/// Threshold of a burn rate window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticThresholdConfig {
    /// Comparison operator.
    pub operator: String,
    /// Threshold value.
    pub value: f64,
}

/// Burn rate window of a `BURN_RATE_V2` alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnRateConfig {
    /// `SHORT` or `LONG`.
    pub alert_window_type: String,
    /// Window length in `duration_unit_type`s.
    pub duration: i64,
    /// Unit of `duration`.
    pub duration_unit_type: String,
    /// Window threshold.
    pub threshold: StaticThresholdConfig,
}

/// SLO alert configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SloAlertConfig {
    /// Backend id.
    #[serde(default)]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Severity code (5 warning, 10 critical).
    pub severity: i64,
    /// Whether an incident is triggered.
    #[serde(default)]
    pub triggering: bool,
    /// Whether the alert is enabled.
    #[serde(default)]
    pub enabled: bool,
    /// Alert kind.
    pub rule: SloAlertRule,
    /// Threshold for status and error budget alerts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<SloAlertThreshold>,
    /// Warm-up and cool-down.
    #[serde(default)]
    pub time_threshold: SloAlertTimeThreshold,
    /// Monitored SLO ids.
    #[serde(default)]
    pub slo_ids: Vec<String>,
    /// Alert channel ids.
    #[serde(default)]
    pub alert_channel_ids: Vec<String>,
    /// Custom notification payload.
    #[serde(default)]
    pub custom_payload_fields: Vec<CustomPayloadField>,
    /// Burn rate windows for `BURN_RATE_V2` alerts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub burn_rate_config: Option<Vec<BurnRateConfig>>,
}

impl InstanaDataObject for SloAlertConfig {
    fn id(&self) -> &str {
        &self.id
    }
}
