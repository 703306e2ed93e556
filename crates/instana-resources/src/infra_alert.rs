// crates/instana-resources/src/infra_alert.rs
// ============================================================================
// Module: Infrastructure Alert Config Handle
// Description: Smart alerts on infrastructure metrics.
// Purpose: Map the generic rule block and its thresholds to the backend.
// Dependencies: instana-core, instana-restapi
// ============================================================================

//! ## Overview
//! Infrastructure alerts carry a single generic rule. State nests it as
//! `rules.generic_rule`; the wire keeps the usual rule list with one entry.

use instana_core::Attribute;
use instana_core::AttributePath;
use instana_core::AttributeType;
use instana_core::Diagnostics;
use instana_core::MappingError;
use instana_core::ObjectReader;
use instana_core::ResourceHandle;
use instana_core::ResourceMetadata;
use instana_core::Schema;
use instana_core::StateValue;
use instana_core::Validator;
use instana_core::mappers::ALERT_CHANNELS_FIELD;
use instana_core::mappers::CUSTOM_PAYLOAD_FIELD;
use instana_core::mappers::STATIC_ONLY;
use instana_core::mappers::TAG_FILTER_FIELD;
use instana_core::mappers::TIME_THRESHOLD_FIELD;
use instana_core::mappers::TimeThresholdVariant;
use instana_core::mappers::alert_channels_attribute;
use instana_core::mappers::alert_channels_from_state;
use instana_core::mappers::alert_channels_to_state;
use instana_core::mappers::custom_payload_attribute;
use instana_core::mappers::custom_payload_from_state;
use instana_core::mappers::custom_payload_to_state;
use instana_core::mappers::tag_filter_from_state;
use instana_core::mappers::tag_filter_to_state;
use instana_core::mappers::threshold_attribute;
use instana_core::mappers::thresholds_from_state;
use instana_core::mappers::thresholds_to_state;
use instana_core::mappers::time_threshold_attribute;
use instana_core::mappers::time_threshold_from_state;
use instana_core::mappers::time_threshold_to_state;
use instana_restapi::InstanaApi;
use instana_restapi::RestResource;
use instana_restapi::models::infra_alert::INFRA_ALERT_TYPE_GENERIC_RULE;
use instana_restapi::models::infra_alert::InfraAlertConfig;
use instana_restapi::models::infra_alert::InfraAlertRule;
use instana_restapi::models::threshold::RuleWithThreshold;
use instana_restapi::models::threshold::THRESHOLD_OPERATORS;

use crate::common::AGGREGATIONS;
use crate::common::DEFAULT_GRANULARITY;
use crate::common::FIELD_AGGREGATION;
use crate::common::FIELD_DESCRIPTION;
use crate::common::FIELD_GRANULARITY;
use crate::common::FIELD_ID;
use crate::common::FIELD_METRIC_NAME;
use crate::common::FIELD_NAME;
use crate::common::FIELD_RULES;
use crate::common::FIELD_THRESHOLD;
use crate::common::FIELD_THRESHOLD_OPERATOR;
use crate::common::MAX_NAME_LENGTH;
use crate::common::description_attribute;
use crate::common::granularity_attribute;
use crate::common::id_attribute;
use crate::common::id_from_state;
use crate::common::name_attribute;
use crate::common::non_empty;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Host resource name.
pub const RESOURCE_NAME: &str = "instana_infra_alert_config";
/// Current schema version.
const SCHEMA_VERSION: i64 = 0;

/// Grouping tags.
pub const FIELD_GROUP_BY: &str = "group_by";
/// Evaluation type.
pub const FIELD_EVALUATION_TYPE: &str = "evaluation_type";
/// Generic rule block inside `rules`.
pub const FIELD_GENERIC_RULE: &str = "generic_rule";
/// Entity type of the metric.
const FIELD_ENTITY_TYPE: &str = "entity_type";
/// Aggregation across series.
const FIELD_CROSS_SERIES_AGGREGATION: &str = "cross_series_aggregation";
/// Whether the metric name is a regular expression.
const FIELD_REGEX: &str = "regex";

/// Accepted evaluation types.
pub const EVALUATION_TYPES: [&str; 2] = ["PER_ENTITY", "CUSTOM"];

/// Time threshold variants infrastructure alerts accept.
const TIME_THRESHOLDS: [TimeThresholdVariant; 1] = [TimeThresholdVariant::ViolationsInSequence];

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Resource schema.
fn schema() -> Schema {
    let generic_rule = Attribute::block(
        FIELD_GENERIC_RULE,
        vec![
            Attribute::string(FIELD_METRIC_NAME).required(),
            Attribute::string(FIELD_ENTITY_TYPE).required(),
            Attribute::string(FIELD_AGGREGATION)
                .required()
                .validate(Validator::OneOf(&AGGREGATIONS)),
            Attribute::string(FIELD_CROSS_SERIES_AGGREGATION)
                .required()
                .validate(Validator::OneOf(&AGGREGATIONS)),
            Attribute::bool(FIELD_REGEX).default_value(false),
            Attribute::string(FIELD_THRESHOLD_OPERATOR)
                .required()
                .validate(Validator::OneOf(&THRESHOLD_OPERATORS)),
            threshold_attribute(FIELD_THRESHOLD, STATIC_ONLY).required(),
        ],
    )
    .required();
    Schema::new(
        "Infrastructure smart alert configuration",
        vec![
            id_attribute(),
            name_attribute(MAX_NAME_LENGTH),
            description_attribute(),
            Attribute::string(TAG_FILTER_FIELD),
            Attribute::new(FIELD_GROUP_BY, AttributeType::string_list()),
            alert_channels_attribute(),
            granularity_attribute(),
            time_threshold_attribute(&TIME_THRESHOLDS),
            custom_payload_attribute(),
            Attribute::block(FIELD_RULES, vec![generic_rule]).required(),
            Attribute::string(FIELD_EVALUATION_TYPE)
                .required()
                .validate(Validator::OneOf(&EVALUATION_TYPES)),
        ],
    )
}

// ============================================================================
// SECTION: Handle
// ============================================================================

/// Handle for infrastructure alert configs.
#[derive(Debug)]
pub struct InfraAlertConfigHandle {
    /// Static description.
    metadata: ResourceMetadata,
}

impl InfraAlertConfigHandle {
    /// Builds the handle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: ResourceMetadata::new(RESOURCE_NAME, schema(), SCHEMA_VERSION),
        }
    }
}

impl Default for InfraAlertConfigHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceHandle for InfraAlertConfigHandle {
    type Payload = InfraAlertConfig;

    fn metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }

    fn rest_resource(&self, api: &InstanaApi) -> RestResource<InfraAlertConfig> {
        api.infra_alert_configs()
    }

    fn state_to_payload(&self, state: &StateValue) -> Result<InfraAlertConfig, Diagnostics> {
        config_from_state(&ObjectReader::root(state))
    }

    fn payload_to_state(
        &self,
        payload: &InfraAlertConfig,
        _prior: &StateValue,
    ) -> Result<StateValue, Diagnostics> {
        config_to_state(payload).map_err(Diagnostics::from)
    }
}

// ============================================================================
// SECTION: Mapping
// ============================================================================

/// Maps a resource object to the payload.
fn config_from_state(reader: &ObjectReader<'_>) -> Result<InfraAlertConfig, Diagnostics> {
    let mut diagnostics = Diagnostics::new();
    let config = InfraAlertConfig {
        id: diagnostics.take(id_from_state(reader)),
        name: diagnostics.take(reader.required_string(FIELD_NAME)),
        description: diagnostics.take(reader.string_or(FIELD_DESCRIPTION, "")),
        tag_filter_expression: diagnostics.take(tag_filter_from_state(reader, TAG_FILTER_FIELD)),
        group_by: diagnostics.take(reader.string_list(FIELD_GROUP_BY)),
        granularity: diagnostics.take(reader.i64_or(FIELD_GRANULARITY, DEFAULT_GRANULARITY)),
        time_threshold: diagnostics
            .collect(time_threshold_from_state(reader, TIME_THRESHOLD_FIELD, &TIME_THRESHOLDS)),
        custom_payload_fields: diagnostics
            .take(custom_payload_from_state(reader, CUSTOM_PAYLOAD_FIELD)),
        rules: diagnostics.collect(generic_rule_from_state(reader)).into_iter().collect(),
        alert_channels: diagnostics.take(alert_channels_from_state(reader, ALERT_CHANNELS_FIELD)),
        evaluation_type: diagnostics.take(reader.required_string(FIELD_EVALUATION_TYPE)),
    };
    diagnostics.finish(config)
}

/// Maps `rules.generic_rule`.
fn generic_rule_from_state(
    reader: &ObjectReader<'_>,
) -> Result<RuleWithThreshold<InfraAlertRule>, MappingError> {
    let rules = reader.required_object(FIELD_RULES)?;
    let rules_path = reader.field_path(FIELD_RULES);
    let rules_reader = ObjectReader::new(&rules, &rules_path);
    let generic = rules_reader.required_object(FIELD_GENERIC_RULE)?;
    let generic_path = rules_reader.field_path(FIELD_GENERIC_RULE);
    let generic_reader = ObjectReader::new(&generic, &generic_path);
    Ok(RuleWithThreshold {
        threshold_operator: generic_reader.required_string(FIELD_THRESHOLD_OPERATOR)?,
        rule: InfraAlertRule {
            alert_type: INFRA_ALERT_TYPE_GENERIC_RULE.to_string(),
            metric_name: generic_reader.required_string(FIELD_METRIC_NAME)?,
            entity_type: generic_reader.required_string(FIELD_ENTITY_TYPE)?,
            aggregation: generic_reader.optional_string(FIELD_AGGREGATION)?,
            cross_series_aggregation: generic_reader
                .optional_string(FIELD_CROSS_SERIES_AGGREGATION)?,
            regex: generic_reader.bool_or(FIELD_REGEX, false)?,
        },
        thresholds: thresholds_from_state(&generic_reader, FIELD_THRESHOLD, STATIC_ONLY)?,
    })
}

/// Maps the payload to a resource object.
fn config_to_state(config: &InfraAlertConfig) -> Result<StateValue, MappingError> {
    let rules = match config.rules.as_slice() {
        [] => StateValue::Null,
        [entry] => {
            let rule = &entry.rule;
            if rule.alert_type != INFRA_ALERT_TYPE_GENERIC_RULE {
                return Err(MappingError::UnsupportedEntityType {
                    kind: rule.alert_type.clone(),
                });
            }
            let generic = StateValue::object()
                .with(FIELD_METRIC_NAME, &rule.metric_name)
                .with(FIELD_ENTITY_TYPE, &rule.entity_type)
                .with(FIELD_AGGREGATION, rule.aggregation.clone())
                .with(FIELD_CROSS_SERIES_AGGREGATION, rule.cross_series_aggregation.clone())
                .with(FIELD_REGEX, rule.regex)
                .with(FIELD_THRESHOLD_OPERATOR, &entry.threshold_operator)
                .with(FIELD_THRESHOLD, thresholds_to_state(&entry.thresholds, STATIC_ONLY)?);
            StateValue::object().with(FIELD_GENERIC_RULE, generic)
        }
        _ => {
            let path = AttributePath::attribute(FIELD_RULES);
            return Err(MappingError::invalid(
                &path,
                format!("expected a single rule, got {}", config.rules.len()),
            ));
        }
    };
    let time_threshold = config
        .time_threshold
        .as_ref()
        .map(|threshold| time_threshold_to_state(threshold, &TIME_THRESHOLDS))
        .transpose()?;
    Ok(StateValue::object()
        .with(FIELD_ID, &config.id)
        .with(FIELD_NAME, &config.name)
        .with(FIELD_DESCRIPTION, non_empty(&config.description))
        .with(
            TAG_FILTER_FIELD,
            tag_filter_to_state(
                config.tag_filter_expression.as_ref(),
                &AttributePath::attribute(TAG_FILTER_FIELD),
            )?,
        )
        .with(FIELD_GROUP_BY, StateValue::string_list_or_null(&config.group_by))
        .with(ALERT_CHANNELS_FIELD, alert_channels_to_state(&config.alert_channels))
        .with(FIELD_GRANULARITY, config.granularity)
        .with(TIME_THRESHOLD_FIELD, time_threshold)
        .with(CUSTOM_PAYLOAD_FIELD, custom_payload_to_state(&config.custom_payload_fields))
        .with(FIELD_RULES, rules)
        .with(FIELD_EVALUATION_TYPE, &config.evaluation_type))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
