// crates/instana-restapi/src/models/threshold.rs
// ============================================================================
// Module: Threshold Payloads
// Description: Severity-keyed threshold rules shared by smart alert configs.
// Purpose: Model `thresholds` maps and rule/threshold pairs on the wire.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Smart alert configs carry a list of rules, each paired with a threshold
//! operator and a map from severity (`WARNING`, `CRITICAL`) to a
//! [`ThresholdRule`]. The rule kind is carried in the `type` field.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Wire key of the warning severity in threshold and channel maps.
pub const SEVERITY_WARNING: &str = "WARNING";
/// Wire key of the critical severity in threshold and channel maps.
pub const SEVERITY_CRITICAL: &str = "CRITICAL";

/// `type` of a static threshold.
pub const THRESHOLD_TYPE_STATIC: &str = "staticThreshold";
/// `type` of an adaptive baseline threshold.
pub const THRESHOLD_TYPE_ADAPTIVE_BASELINE: &str = "adaptiveBaseline";
/// `type` of a historic baseline threshold.
pub const THRESHOLD_TYPE_HISTORIC_BASELINE: &str = "historicBaseline";

/// Threshold operators accepted by smart alert rules.
pub const THRESHOLD_OPERATORS: [&str; 5] = [">", ">=", "<", "<=", "="];
/// Threshold operators accepted by service level alerts.
pub const SERVICE_LEVEL_THRESHOLD_OPERATORS: [&str; 5] = [">", ">=", "=", "<=", "<"];

// ============================================================================
// SECTION: Types
// ============================================================================

/// Threshold for one severity.
///
/// # Invariants
/// - `value` is set for static thresholds.
/// - `deviation_factor` and `seasonality` are set for baseline thresholds.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdRule {
    /// Threshold kind (`staticThreshold`, `adaptiveBaseline`, `historicBaseline`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Comparison operator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    /// Static threshold value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Last modification timestamp maintained by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<i64>,
    /// Historic baseline samples.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<Vec<Vec<f64>>>,
    /// Allowed deviation from the baseline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deviation_factor: Option<f64>,
    /// Adaptability of an adaptive baseline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adaptability: Option<f64>,
    /// Baseline seasonality (`DAILY`, `WEEKLY`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasonality: Option<String>,
}

/// Alert rule paired with its per-severity thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleWithThreshold<R> {
    /// Operator used against every threshold of the rule.
    pub threshold_operator: String,
    /// The alert rule.
    pub rule: R,
    /// Thresholds keyed by `WARNING` / `CRITICAL`.
    #[serde(default)]
    pub thresholds: BTreeMap<String, ThresholdRule>,
}
