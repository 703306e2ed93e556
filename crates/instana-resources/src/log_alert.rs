// crates/instana-resources/src/log_alert.rs
// ============================================================================
// Module: Log Alert Config Handle
// Description: Smart alerts on log volume.
// Purpose: Map the log count rule, grouping tags, and thresholds.
// Dependencies: instana-core, instana-restapi
// ============================================================================

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
use instana_core::upgrade::identity;
use instana_restapi::InstanaApi;
use instana_restapi::RestResource;
use instana_restapi::models::log_alert::GroupByTag;
use instana_restapi::models::log_alert::LOG_ALERT_TYPE_COUNT;
use instana_restapi::models::log_alert::LogAlertConfig;
use instana_restapi::models::log_alert::LogAlertRule;
use instana_restapi::models::threshold::RuleWithThreshold;
use instana_restapi::models::threshold::THRESHOLD_OPERATORS;
use instana_tagfilter::TagFilter;

use crate::common::DEFAULT_GRANULARITY;
use crate::common::FIELD_AGGREGATION;
use crate::common::FIELD_DESCRIPTION;
use crate::common::FIELD_GRACE_PERIOD;
use crate::common::FIELD_GRANULARITY;
use crate::common::FIELD_ID;
use crate::common::FIELD_METRIC_NAME;
use crate::common::FIELD_NAME;
use crate::common::FIELD_RULES;
use crate::common::FIELD_THRESHOLD;
use crate::common::FIELD_THRESHOLD_OPERATOR;
use crate::common::MAX_NAME_LENGTH;
use crate::common::aggregation_attribute;
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
pub const RESOURCE_NAME: &str = "instana_log_alert_config";
/// Current schema version.
const SCHEMA_VERSION: i64 = 1;

/// Grouping tags.
pub const FIELD_GROUP_BY: &str = "group_by";
/// Tag name of a grouping entry.
const FIELD_TAG_NAME: &str = "tag_name";
/// Key of a key/value grouping tag.
const FIELD_KEY: &str = "key";
/// Rule alert type.
const FIELD_ALERT_TYPE: &str = "alert_type";

/// Alert types log rules accept.
const ALERT_TYPES: [&str; 1] = [LOG_ALERT_TYPE_COUNT];

/// Time threshold variants log alerts accept.
const TIME_THRESHOLDS: [TimeThresholdVariant; 1] = [TimeThresholdVariant::ViolationsInSequence];

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Resource schema.
fn schema() -> Schema {
    Schema::new(
        "Log smart alert configuration",
        vec![
            id_attribute(),
            name_attribute(MAX_NAME_LENGTH),
            description_attribute(),
            Attribute::string(TAG_FILTER_FIELD).required(),
            Attribute::block_list(
                FIELD_GROUP_BY,
                vec![Attribute::string(FIELD_TAG_NAME).required(), Attribute::string(FIELD_KEY)],
            ),
            alert_channels_attribute(),
            granularity_attribute(),
            Attribute::int(FIELD_GRACE_PERIOD),
            Attribute::block(
                FIELD_RULES,
                vec![
                    Attribute::string(FIELD_METRIC_NAME).required(),
                    Attribute::string(FIELD_ALERT_TYPE)
                        .default_value(LOG_ALERT_TYPE_COUNT)
                        .validate(Validator::OneOf(&ALERT_TYPES)),
                    aggregation_attribute(),
                    Attribute::string(FIELD_THRESHOLD_OPERATOR)
                        .required()
                        .validate(Validator::OneOf(&THRESHOLD_OPERATORS)),
                    threshold_attribute(FIELD_THRESHOLD, STATIC_ONLY).required(),
                ],
            )
            .required(),
            time_threshold_attribute(&TIME_THRESHOLDS),
            custom_payload_attribute(),
        ],
    )
}

// ============================================================================
// SECTION: Handle
// ============================================================================

/// Handle for log alert configs.
#[derive(Debug)]
pub struct LogAlertConfigHandle {
    /// Static description.
    metadata: ResourceMetadata,
}

impl LogAlertConfigHandle {
    /// Builds the handle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: ResourceMetadata::new(RESOURCE_NAME, schema(), SCHEMA_VERSION)
                .with_upgraders(vec![StateUpgrader::new(0, identity)]),
        }
    }
}

impl Default for LogAlertConfigHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceHandle for LogAlertConfigHandle {
    type Payload = LogAlertConfig;

    fn metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }

    fn rest_resource(&self, api: &InstanaApi) -> RestResource<LogAlertConfig> {
        api.log_alert_configs()
    }

    fn state_to_payload(&self, state: &StateValue) -> Result<LogAlertConfig, Diagnostics> {
        config_from_state(&ObjectReader::root(state))
    }

    fn payload_to_state(
        &self,
        payload: &LogAlertConfig,
        _prior: &StateValue,
    ) -> Result<StateValue, Diagnostics> {
        config_to_state(payload).map_err(Diagnostics::from)
    }
}

// ============================================================================
// SECTION: Mapping
// ============================================================================

/// Maps a resource object to the payload.
fn config_from_state(reader: &ObjectReader<'_>) -> Result<LogAlertConfig, Diagnostics> {
    let mut diagnostics = Diagnostics::new();
    let config = LogAlertConfig {
        id: diagnostics.take(id_from_state(reader)),
        name: diagnostics.take(reader.required_string(FIELD_NAME)),
        description: diagnostics.take(reader.string_or(FIELD_DESCRIPTION, "")),
        tag_filter_expression: diagnostics.collect(required_tag_filter(reader)),
        alert_channels: diagnostics.take(alert_channels_from_state(reader, ALERT_CHANNELS_FIELD)),
        granularity: diagnostics.take(reader.i64_or(FIELD_GRANULARITY, DEFAULT_GRANULARITY)),
        time_threshold: diagnostics
            .collect(time_threshold_from_state(reader, TIME_THRESHOLD_FIELD, &TIME_THRESHOLDS)),
        grace_period: diagnostics.take(reader.optional_i64(FIELD_GRACE_PERIOD)),
        custom_payload_fields: diagnostics
            .take(custom_payload_from_state(reader, CUSTOM_PAYLOAD_FIELD)),
        rules: diagnostics.collect(rule_from_state(reader)).into_iter().collect(),
        group_by: diagnostics.take(group_by_from_state(reader)),
    };
    diagnostics.finish(config)
}

/// Reads the mandatory log tag filter.
fn required_tag_filter(reader: &ObjectReader<'_>) -> Result<TagFilter, MappingError> {
    tag_filter_from_state(reader, TAG_FILTER_FIELD)?.ok_or_else(|| {
        let path = reader.field_path(TAG_FILTER_FIELD);
        MappingError::invalid(&path, format!("{path} is required"))
    })
}

/// Maps the single rule block.
fn rule_from_state(
    reader: &ObjectReader<'_>,
) -> Result<RuleWithThreshold<LogAlertRule>, MappingError> {
    let rules = reader.required_object(FIELD_RULES)?;
    let rules_path = reader.field_path(FIELD_RULES);
    let rule = ObjectReader::new(&rules, &rules_path);
    Ok(RuleWithThreshold {
        threshold_operator: rule.required_string(FIELD_THRESHOLD_OPERATOR)?,
        rule: LogAlertRule {
            alert_type: rule.string_or(FIELD_ALERT_TYPE, LOG_ALERT_TYPE_COUNT)?,
            metric_name: rule.required_string(FIELD_METRIC_NAME)?,
            aggregation: rule.optional_string(FIELD_AGGREGATION)?,
        },
        thresholds: thresholds_from_state(&rule, FIELD_THRESHOLD, STATIC_ONLY)?,
    })
}

/// Maps the group-by tags.
fn group_by_from_state(reader: &ObjectReader<'_>) -> Result<Vec<GroupByTag>, MappingError> {
    reader
        .objects(FIELD_GROUP_BY)?
        .into_iter()
        .map(|(path, value)| {
            let entry = ObjectReader::new(value, &path);
            Ok(GroupByTag {
                tag_name: entry.required_string(FIELD_TAG_NAME)?,
                key: entry.optional_string(FIELD_KEY)?,
            })
        })
        .collect()
}

/// Maps the payload to a resource object.
fn config_to_state(config: &LogAlertConfig) -> Result<StateValue, MappingError> {
    let rules = match config.rules.first() {
        Some(entry) => StateValue::object()
            .with(FIELD_METRIC_NAME, &entry.rule.metric_name)
            .with(FIELD_ALERT_TYPE, &entry.rule.alert_type)
            .with(FIELD_AGGREGATION, entry.rule.aggregation.clone())
            .with(FIELD_THRESHOLD_OPERATOR, &entry.threshold_operator)
            .with(FIELD_THRESHOLD, thresholds_to_state(&entry.thresholds, STATIC_ONLY)?),
        None => StateValue::Null,
    };
    let group_by = config
        .group_by
        .iter()
        .map(|tag| {
            StateValue::object()
                .with(FIELD_TAG_NAME, &tag.tag_name)
                .with(FIELD_KEY, tag.key.clone())
        })
        .collect();
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
        .with(FIELD_GROUP_BY, StateValue::list_or_null(group_by))
        .with(ALERT_CHANNELS_FIELD, alert_channels_to_state(&config.alert_channels))
        .with(FIELD_GRANULARITY, config.granularity)
        .with(FIELD_GRACE_PERIOD, config.grace_period)
        .with(FIELD_RULES, rules)
        .with(TIME_THRESHOLD_FIELD, time_threshold)
        .with(CUSTOM_PAYLOAD_FIELD, custom_payload_to_state(&config.custom_payload_fields)))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
