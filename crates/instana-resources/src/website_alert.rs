// crates/instana-resources/src/website_alert.rs
// ============================================================================
// Module: Website Alert Config Handle
// Description: Smart alerts on website monitoring beacons.
// Purpose: Map the website rule union, severity, and thresholds.
// Dependencies: instana-core, instana-restapi
// ============================================================================

//! ## Overview
//! Website alerts follow the application alert layout with a smaller rule
//! union. Every rule slot carries the same fields; the slot alone selects the
//! wire `alertType`. Severity is stored as a term and sent as a code.

use instana_core::Attribute;
use instana_core::AttributePath;
use instana_core::Diagnostics;
use instana_core::MappingError;
use instana_core::ObjectReader;
use instana_core::ResourceHandle;
use instana_core::ResourceMetadata;
use instana_core::Schema;
use instana_core::StateUpgrader;
use instana_core::StateValue;
use instana_core::Validator;
use instana_core::mappers::CUSTOM_PAYLOAD_FIELD;
use instana_core::mappers::STATIC_AND_ADAPTIVE;
use instana_core::mappers::TAG_FILTER_FIELD;
use instana_core::mappers::TIME_THRESHOLD_FIELD;
use instana_core::mappers::TimeThresholdVariant;
use instana_core::mappers::custom_payload_attribute;
use instana_core::mappers::custom_payload_from_state;
use instana_core::mappers::custom_payload_to_state;
use instana_core::mappers::select_variant;
use instana_core::mappers::tag_filter_from_state;
use instana_core::mappers::tag_filter_to_state;
use instana_core::mappers::threshold_attribute;
use instana_core::mappers::thresholds_from_state;
use instana_core::mappers::thresholds_to_state;
use instana_core::mappers::time_threshold_attribute;
use instana_core::mappers::time_threshold_from_state;
use instana_core::mappers::time_threshold_to_state;
use instana_core::mappers::variant_state;
use instana_core::severity::SUPPORTED_SEVERITIES;
use instana_core::severity::severity_from_code;
use instana_core::severity::severity_to_code;
use instana_core::upgrade::rename_full_name;
use instana_restapi::InstanaApi;
use instana_restapi::RestResource;
use instana_restapi::models::threshold::RuleWithThreshold;
use instana_restapi::models::threshold::THRESHOLD_OPERATORS;
use instana_restapi::models::website_alert::WebsiteAlertConfig;
use instana_restapi::models::website_alert::WebsiteAlertRule;

use crate::common::DEFAULT_GRANULARITY;
use crate::common::EXPRESSION_OPERATORS;
use crate::common::FIELD_AGGREGATION;
use crate::common::FIELD_ALERT_CHANNEL_IDS;
use crate::common::FIELD_DESCRIPTION;
use crate::common::FIELD_ENABLED;
use crate::common::FIELD_GRANULARITY;
use crate::common::FIELD_ID;
use crate::common::FIELD_METRIC_NAME;
use crate::common::FIELD_NAME;
use crate::common::FIELD_RULES;
use crate::common::FIELD_SEVERITY;
use crate::common::FIELD_THRESHOLD;
use crate::common::FIELD_THRESHOLD_OPERATOR;
use crate::common::FIELD_TRIGGERING;
use crate::common::MAX_NAME_LENGTH;
use crate::common::aggregation_attribute;
use crate::common::alert_channel_ids_attribute;
use crate::common::description_attribute;
use crate::common::flag;
use crate::common::granularity_attribute;
use crate::common::id_attribute;
use crate::common::id_from_state;
use crate::common::name_attribute;
use crate::common::non_empty;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Host resource name.
pub const RESOURCE_NAME: &str = "instana_website_alert_config";
/// Current schema version.
const SCHEMA_VERSION: i64 = 1;

/// Monitored website.
pub const FIELD_WEBSITE_ID: &str = "website_id";
/// Rule union inside a rule entry.
pub const FIELD_RULE: &str = "rule";
/// Comparison operator of a rule slot.
const FIELD_OPERATOR: &str = "operator";
/// Compared value of a rule slot.
const FIELD_VALUE: &str = "value";

/// Rule slots in declaration order.
pub const RULE_FIELDS: [&str; 4] = ["specific_js_error", "slowness", "status_code", "throughput"];

/// Wire `alertType` per rule slot, aligned with [`RULE_FIELDS`].
const RULE_ALERT_TYPES: [&str; 4] = ["specificJsError", "slowness", "statusCode", "throughput"];

/// Time threshold variants website alerts accept.
pub const TIME_THRESHOLDS: [TimeThresholdVariant; 3] = [
    TimeThresholdVariant::UserImpactOfViolationsInSequence,
    TimeThresholdVariant::ViolationsInPeriod,
    TimeThresholdVariant::ViolationsInSequence,
];

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Attributes shared by every rule slot.
fn rule_slot_attributes() -> Vec<Attribute> {
    vec![
        Attribute::string(FIELD_METRIC_NAME).required(),
        aggregation_attribute(),
        Attribute::string(FIELD_OPERATOR).validate(Validator::OneOf(&EXPRESSION_OPERATORS)),
        Attribute::string(FIELD_VALUE),
    ]
}

/// Resource schema.
fn schema() -> Schema {
    let rule = Attribute::block(
        FIELD_RULE,
        RULE_FIELDS
            .into_iter()
            .map(|field| Attribute::block(field, rule_slot_attributes()))
            .collect(),
    )
    .required();
    Schema::new(
        "Website smart alert configuration",
        vec![
            id_attribute(),
            name_attribute(MAX_NAME_LENGTH),
            description_attribute(),
            Attribute::string(FIELD_SEVERITY).validate(Validator::OneOf(&SUPPORTED_SEVERITIES)),
            flag(FIELD_TRIGGERING, false),
            flag(FIELD_ENABLED, true),
            Attribute::string(FIELD_WEBSITE_ID)
                .required()
                .validate(Validator::LengthBetween(0, 64)),
            Attribute::string(TAG_FILTER_FIELD),
            alert_channel_ids_attribute(),
            granularity_attribute(),
            Attribute::block_list(
                FIELD_RULES,
                vec![
                    rule,
                    Attribute::string(FIELD_THRESHOLD_OPERATOR)
                        .required()
                        .validate(Validator::OneOf(&THRESHOLD_OPERATORS)),
                    threshold_attribute(FIELD_THRESHOLD, STATIC_AND_ADAPTIVE).required(),
                ],
            )
            .required()
            .validate(Validator::SizeBetween(1, usize::MAX)),
            time_threshold_attribute(&TIME_THRESHOLDS),
            custom_payload_attribute(),
        ],
    )
}

// ============================================================================
// SECTION: Handle
// ============================================================================

/// Handle for website alert configs.
#[derive(Debug)]
pub struct WebsiteAlertConfigHandle {
    /// Static description.
    metadata: ResourceMetadata,
}

impl WebsiteAlertConfigHandle {
    /// Builds the handle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: ResourceMetadata::new(RESOURCE_NAME, schema(), SCHEMA_VERSION)
                .with_upgraders(vec![StateUpgrader::new(0, rename_full_name)]),
        }
    }
}

impl Default for WebsiteAlertConfigHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceHandle for WebsiteAlertConfigHandle {
    type Payload = WebsiteAlertConfig;

    fn metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }

    fn rest_resource(&self, api: &InstanaApi) -> RestResource<WebsiteAlertConfig> {
        api.website_alert_configs()
    }

    fn state_to_payload(&self, state: &StateValue) -> Result<WebsiteAlertConfig, Diagnostics> {
        config_from_state(&ObjectReader::root(state))
    }

    fn payload_to_state(
        &self,
        payload: &WebsiteAlertConfig,
        _prior: &StateValue,
    ) -> Result<StateValue, Diagnostics> {
        config_to_state(payload).map_err(Diagnostics::from)
    }
}

// ============================================================================
// SECTION: Mapping
// ============================================================================

/// Maps a resource object to the payload.
fn config_from_state(reader: &ObjectReader<'_>) -> Result<WebsiteAlertConfig, Diagnostics> {
    let mut diagnostics = Diagnostics::new();
    let config = WebsiteAlertConfig {
        id: diagnostics.take(id_from_state(reader)),
        name: diagnostics.take(reader.required_string(FIELD_NAME)),
        description: diagnostics.take(reader.string_or(FIELD_DESCRIPTION, "")),
        severity: diagnostics.take(severity_from_state(reader)),
        triggering: diagnostics.take(reader.bool_or(FIELD_TRIGGERING, false)),
        enabled: diagnostics.collect(reader.bool_or(FIELD_ENABLED, true)),
        website_id: diagnostics.take(reader.required_string(FIELD_WEBSITE_ID)),
        tag_filter_expression: diagnostics.take(tag_filter_from_state(reader, TAG_FILTER_FIELD)),
        alert_channel_ids: diagnostics.take(reader.string_list(FIELD_ALERT_CHANNEL_IDS)),
        granularity: diagnostics.take(reader.i64_or(FIELD_GRANULARITY, DEFAULT_GRANULARITY)),
        custom_payload_fields: diagnostics
            .take(custom_payload_from_state(reader, CUSTOM_PAYLOAD_FIELD)),
        rules: diagnostics.take(rules_from_state(reader)),
        time_threshold: diagnostics
            .collect(time_threshold_from_state(reader, TIME_THRESHOLD_FIELD, &TIME_THRESHOLDS)),
    };
    diagnostics.finish(config)
}

/// Maps the optional severity term to its wire code.
fn severity_from_state(reader: &ObjectReader<'_>) -> Result<Option<i64>, MappingError> {
    reader.optional_string(FIELD_SEVERITY)?.map(|term| severity_to_code(&term)).transpose()
}

/// Maps the rule list, reporting every invalid entry.
fn rules_from_state(
    reader: &ObjectReader<'_>,
) -> Result<Vec<RuleWithThreshold<WebsiteAlertRule>>, Diagnostics> {
    let entries = reader.objects(FIELD_RULES)?;
    if entries.is_empty() {
        let path = reader.field_path(FIELD_RULES);
        let message = format!("{path} must contain at least one rule");
        return Err(MappingError::invalid(&path, message).into());
    }
    let mut diagnostics = Diagnostics::new();
    let rules = entries
        .into_iter()
        .filter_map(|(path, value)| {
            diagnostics.collect(rule_entry_from_state(&ObjectReader::new(value, &path)))
        })
        .collect();
    diagnostics.finish(rules)
}

/// Maps one rule entry with its selected slot.
fn rule_entry_from_state(
    entry: &ObjectReader<'_>,
) -> Result<RuleWithThreshold<WebsiteAlertRule>, MappingError> {
    let union = entry.required_object(FIELD_RULE)?;
    let union_path = entry.field_path(FIELD_RULE);
    let union_reader = ObjectReader::new(&union, &union_path);
    let selected = select_variant(&union_reader, &RULE_FIELDS, &union_path.to_string())?;
    let alert_type = RULE_FIELDS
        .into_iter()
        .zip(RULE_ALERT_TYPES)
        .find_map(|(field, alert_type)| (field == selected.name).then_some(alert_type))
        .ok_or_else(|| {
            MappingError::invalid(&selected.path, format!("unsupported rule {}", selected.name))
        })?;
    let slot = selected.reader();
    Ok(RuleWithThreshold {
        threshold_operator: entry.required_string(FIELD_THRESHOLD_OPERATOR)?,
        rule: WebsiteAlertRule {
            alert_type: alert_type.to_string(),
            metric_name: slot.required_string(FIELD_METRIC_NAME)?,
            aggregation: slot.optional_string(FIELD_AGGREGATION)?,
            operator: slot.optional_string(FIELD_OPERATOR)?,
            value: slot.optional_string(FIELD_VALUE)?,
        },
        thresholds: thresholds_from_state(entry, FIELD_THRESHOLD, STATIC_AND_ADAPTIVE)?,
    })
}

/// Maps the payload to a resource object.
fn config_to_state(config: &WebsiteAlertConfig) -> Result<StateValue, MappingError> {
    let severity = config.severity.map(severity_from_code).transpose()?;
    let rules = config.rules.iter().map(rule_entry_to_state).collect::<Result<Vec<_>, _>>()?;
    let time_threshold = config
        .time_threshold
        .as_ref()
        .map(|threshold| time_threshold_to_state(threshold, &TIME_THRESHOLDS))
        .transpose()?;
    Ok(StateValue::object()
        .with(FIELD_ID, &config.id)
        .with(FIELD_NAME, &config.name)
        .with(FIELD_DESCRIPTION, non_empty(&config.description))
        .with(FIELD_SEVERITY, severity)
        .with(FIELD_TRIGGERING, config.triggering)
        .with(FIELD_ENABLED, config.enabled.unwrap_or(true))
        .with(FIELD_WEBSITE_ID, &config.website_id)
        .with(
            TAG_FILTER_FIELD,
            tag_filter_to_state(
                config.tag_filter_expression.as_ref(),
                &AttributePath::attribute(TAG_FILTER_FIELD),
            )?,
        )
        .with(FIELD_ALERT_CHANNEL_IDS, StateValue::string_set_or_null(&config.alert_channel_ids))
        .with(FIELD_GRANULARITY, config.granularity)
        .with(FIELD_RULES, StateValue::list_or_null(rules))
        .with(TIME_THRESHOLD_FIELD, time_threshold)
        .with(CUSTOM_PAYLOAD_FIELD, custom_payload_to_state(&config.custom_payload_fields)))
}

/// Maps one rule entry.
fn rule_entry_to_state(
    entry: &RuleWithThreshold<WebsiteAlertRule>,
) -> Result<StateValue, MappingError> {
    let rule = &entry.rule;
    let field = RULE_FIELDS
        .into_iter()
        .zip(RULE_ALERT_TYPES)
        .find_map(|(field, alert_type)| (alert_type == rule.alert_type).then_some(field))
        .ok_or_else(|| MappingError::UnsupportedEntityType {
            kind: rule.alert_type.clone(),
        })?;
    let slot = StateValue::object()
        .with(FIELD_METRIC_NAME, &rule.metric_name)
        .with(FIELD_AGGREGATION, rule.aggregation.clone())
        .with(FIELD_OPERATOR, rule.operator.clone())
        .with(FIELD_VALUE, rule.value.clone());
    Ok(StateValue::object()
        .with(FIELD_RULE, variant_state(&RULE_FIELDS, field, slot))
        .with(FIELD_THRESHOLD_OPERATOR, &entry.threshold_operator)
        .with(FIELD_THRESHOLD, thresholds_to_state(&entry.thresholds, STATIC_AND_ADAPTIVE)?))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
