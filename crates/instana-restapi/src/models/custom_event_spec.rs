// crates/instana-restapi/src/models/custom_event_spec.rs
// ============================================================================
// Module: Custom Event Specification Payloads
// Description: User-defined event specifications and their rules.
// Purpose: Model the flat rule specification discriminated by `ruleType`.
// Dependencies: instana-tagfilter, serde
// ============================================================================

use instana_tagfilter::TagFilter;
use serde::Deserialize;
use serde::Serialize;

use crate::resource::InstanaDataObject;

// ============================================================================
// SECTION: Rule Types
// ============================================================================

/// `ruleType` of entity count rules.
pub const RULE_TYPE_ENTITY_COUNT: &str = "entity_count";
/// `ruleType` of entity count verification rules.
pub const RULE_TYPE_ENTITY_COUNT_VERIFICATION: &str = "entity_count_verification";
/// `ruleType` of entity verification rules.
pub const RULE_TYPE_ENTITY_VERIFICATION: &str = "entity_verification";
/// `ruleType` of host availability rules.
pub const RULE_TYPE_HOST_AVAILABILITY: &str = "host_availability";
/// `ruleType` of system rules.
pub const RULE_TYPE_SYSTEM: &str = "system";
/// `ruleType` of threshold rules.
pub const RULE_TYPE_THRESHOLD: &str = "threshold";

// ============================================================================
// SECTION: Rules
// ============================================================================

/// Dynamic metric selector of threshold rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricPattern {
    /// Metric name prefix.
    pub prefix: String,
    /// Metric name postfix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postfix: Option<String>,
    /// Placeholder between prefix and postfix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Placeholder match operator.
    pub operator: String,
}

/// Rule of a custom event specification.
///
/// # Invariants
/// - Only the fields relevant to `rule_type` are populated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSpecification {
    /// Rule discriminator.
    pub rule_type: String,
    /// Severity code (5 warning, 10 critical).
    pub severity: i64,
    /// Metric of threshold rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_name: Option<String>,
    /// Metric rollup of threshold rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rollup: Option<i64>,
    /// Evaluation window of threshold rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<i64>,
    /// Metric aggregation of threshold rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<String>,
    /// Comparison operator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_operator: Option<String>,
    /// Comparison value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_value: Option<f64>,
    /// Metric pattern of threshold rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_pattern: Option<MetricPattern>,
    /// Entity type that must be present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching_entity_type: Option<String>,
    /// Label match operator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching_operator: Option<String>,
    /// Entity label matched against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching_entity_label: Option<String>,
    /// Offline duration in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offline_duration: Option<i64>,
    /// Close delay of host availability rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_after: Option<i64>,
    /// Host filter of host availability rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_filter: Option<TagFilter>,
    /// Built-in rule id of system rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_rule_id: Option<String>,
}

// ============================================================================
// SECTION: Specification
// ============================================================================

/// Custom event specification.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomEventSpecification {
    /// Backend id.
    #[serde(default)]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Entity type the rules apply to.
    pub entity_type: String,
    /// Dynamic focus query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Whether an incident is triggered.
    #[serde(default)]
    pub triggering: bool,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Milliseconds after which events expire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<i64>,
    /// Whether the specification is active.
    #[serde(default)]
    pub enabled: bool,
    /// `AND` or `OR`.
    #[serde(default)]
    pub rule_logical_operator: String,
    /// Rules.
    #[serde(default)]
    pub rules: Vec<RuleSpecification>,
}

impl InstanaDataObject for CustomEventSpecification {
    fn id(&self) -> &str {
        &self.id
    }
}
