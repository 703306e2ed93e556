// crates/instana-resources/src/synthetic_alert.rs
// ============================================================================
// Module: Synthetic Alert Config Handle
// Description: Smart alerts on failing synthetic test runs.
// Purpose: Map the synthetic alert rule, filter, and violation count.
// Dependencies: instana-core, instana-restapi
// ============================================================================

use instana_core::Attribute;
use instana_core::AttributePath;
use instana_core::AttributeType;
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
use instana_core::mappers::TAG_FILTER_FIELD;
use instana_core::mappers::custom_payload_attribute;
use instana_core::mappers::custom_payload_from_state;
use instana_core::mappers::custom_payload_to_state;
use instana_core::mappers::tag_filter_from_state;
use instana_core::mappers::tag_filter_to_state;
use instana_core::upgrade::identity;
use instana_restapi::InstanaApi;
use instana_restapi::RestResource;
use instana_restapi::models::synthetic::SyntheticAlertConfig;
use instana_restapi::models::synthetic::SyntheticAlertRule;
use instana_restapi::models::synthetic::SyntheticAlertTimeThreshold;

use crate::common::FIELD_AGGREGATION;
use crate::common::FIELD_ALERT_CHANNEL_IDS;
use crate::common::FIELD_DESCRIPTION;
use crate::common::FIELD_GRACE_PERIOD;
use crate::common::FIELD_ID;
use crate::common::FIELD_METRIC_NAME;
use crate::common::FIELD_NAME;
use crate::common::FIELD_SEVERITY;
use crate::common::MAX_NAME_LENGTH;
use crate::common::aggregation_attribute;
use crate::common::alert_channel_ids_attribute;
use crate::common::description_attribute;
use crate::common::id_attribute;
use crate::common::id_from_state;
use crate::common::name_attribute;
use crate::common::non_empty;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Host resource name.
pub const RESOURCE_NAME: &str = "instana_synthetic_alert_config";
/// Current schema version.
const SCHEMA_VERSION: i64 = 1;

/// Monitored synthetic tests.
pub const FIELD_SYNTHETIC_TEST_IDS: &str = "synthetic_test_ids";
/// Alert rule block.
pub const FIELD_RULE: &str = "rule";
/// Violation count block.
pub const FIELD_TIME_THRESHOLD: &str = "time_threshold";
/// Rule alert type.
const FIELD_ALERT_TYPE: &str = "alert_type";
/// Time threshold kind.
const FIELD_TYPE: &str = "type";
/// Failing runs before the alert opens.
const FIELD_VIOLATIONS_COUNT: &str = "violations_count";

/// Severity codes.
const SEVERITY_CODES: [i64; 2] = [5, 10];
/// Rule alert types.
const ALERT_TYPES: [&str; 1] = ["failure"];
/// Time threshold kinds.
const TIME_THRESHOLD_TYPES: [&str; 1] = ["violationsInSequence"];

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Resource schema.
fn schema() -> Schema {
    Schema::new(
        "Synthetic alert configuration",
        vec![
            id_attribute(),
            name_attribute(MAX_NAME_LENGTH),
            description_attribute(),
            Attribute::new(FIELD_SYNTHETIC_TEST_IDS, AttributeType::string_set()).required(),
            Attribute::int(FIELD_SEVERITY)
                .required()
                .validate(Validator::IntOneOf(&SEVERITY_CODES)),
            Attribute::string(TAG_FILTER_FIELD).describe("Tag filter expression"),
            Attribute::block(
                FIELD_RULE,
                vec![
                    Attribute::string(FIELD_ALERT_TYPE)
                        .required()
                        .validate(Validator::OneOf(&ALERT_TYPES)),
                    Attribute::string(FIELD_METRIC_NAME)
                        .required()
                        .validate(Validator::LengthBetween(1, 256)),
                    aggregation_attribute(),
                ],
            )
            .required(),
            alert_channel_ids_attribute(),
            Attribute::block(
                FIELD_TIME_THRESHOLD,
                vec![
                    Attribute::string(FIELD_TYPE)
                        .required()
                        .validate(Validator::OneOf(&TIME_THRESHOLD_TYPES)),
                    Attribute::int(FIELD_VIOLATIONS_COUNT)
                        .required()
                        .validate(Validator::IntBetween(1, 12)),
                ],
            )
            .required(),
            Attribute::int(FIELD_GRACE_PERIOD),
            custom_payload_attribute(),
        ],
    )
}

// ============================================================================
// SECTION: Handle
// ============================================================================

/// Handle for synthetic alert configs.
#[derive(Debug)]
pub struct SyntheticAlertConfigHandle {
    /// Static description.
    metadata: ResourceMetadata,
}

impl SyntheticAlertConfigHandle {
    /// Builds the handle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: ResourceMetadata::new(RESOURCE_NAME, schema(), SCHEMA_VERSION)
                .with_upgraders(vec![StateUpgrader::new(0, identity)]),
        }
    }
}

impl Default for SyntheticAlertConfigHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceHandle for SyntheticAlertConfigHandle {
    type Payload = SyntheticAlertConfig;

    fn metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }

    fn rest_resource(&self, api: &InstanaApi) -> RestResource<SyntheticAlertConfig> {
        api.synthetic_alert_configs()
    }

    fn state_to_payload(&self, state: &StateValue) -> Result<SyntheticAlertConfig, Diagnostics> {
        config_from_state(&ObjectReader::root(state))
    }

    fn payload_to_state(
        &self,
        payload: &SyntheticAlertConfig,
        _prior: &StateValue,
    ) -> Result<StateValue, Diagnostics> {
        config_to_state(payload).map_err(Diagnostics::from)
    }
}

// ============================================================================
// SECTION: Mapping
// ============================================================================

/// Maps a resource object to the payload.
fn config_from_state(reader: &ObjectReader<'_>) -> Result<SyntheticAlertConfig, Diagnostics> {
    let mut diagnostics = Diagnostics::new();
    let config = SyntheticAlertConfig {
        id: diagnostics.take(id_from_state(reader)),
        name: diagnostics.take(reader.required_string(FIELD_NAME)),
        description: diagnostics.take(reader.string_or(FIELD_DESCRIPTION, "")),
        synthetic_test_ids: diagnostics.take(reader.string_list(FIELD_SYNTHETIC_TEST_IDS)),
        severity: diagnostics.take(reader.required_i64(FIELD_SEVERITY)),
        tag_filter_expression: diagnostics.take(tag_filter_from_state(reader, TAG_FILTER_FIELD)),
        rule: diagnostics.take(rule_from_state(reader)),
        alert_channel_ids: diagnostics.take(reader.string_list(FIELD_ALERT_CHANNEL_IDS)),
        time_threshold: diagnostics.take(time_threshold_from_state(reader)),
        custom_payload_fields: diagnostics
            .take(custom_payload_from_state(reader, CUSTOM_PAYLOAD_FIELD)),
        grace_period: diagnostics.take(reader.optional_i64(FIELD_GRACE_PERIOD)),
    };
    diagnostics.finish(config)
}

/// Maps the rule block.
fn rule_from_state(reader: &ObjectReader<'_>) -> Result<SyntheticAlertRule, MappingError> {
    let rule_path = reader.field_path(FIELD_RULE);
    let rule = reader.required_object(FIELD_RULE)?;
    let rule = ObjectReader::new(&rule, &rule_path);
    Ok(SyntheticAlertRule {
        alert_type: rule.required_string(FIELD_ALERT_TYPE)?,
        metric_name: rule.required_string(FIELD_METRIC_NAME)?,
        aggregation: rule.optional_string(FIELD_AGGREGATION)?,
    })
}

/// Maps the violation-count time threshold.
fn time_threshold_from_state(
    reader: &ObjectReader<'_>,
) -> Result<SyntheticAlertTimeThreshold, MappingError> {
    let threshold_path = reader.field_path(FIELD_TIME_THRESHOLD);
    let threshold = reader.required_object(FIELD_TIME_THRESHOLD)?;
    let threshold = ObjectReader::new(&threshold, &threshold_path);
    Ok(SyntheticAlertTimeThreshold {
        kind: threshold.required_string(FIELD_TYPE)?,
        violations_count: threshold.required_i64(FIELD_VIOLATIONS_COUNT)?,
    })
}

/// Maps the payload to a resource object.
fn config_to_state(config: &SyntheticAlertConfig) -> Result<StateValue, MappingError> {
    let tag_filter = tag_filter_to_state(
        config.tag_filter_expression.as_ref(),
        &AttributePath::attribute(TAG_FILTER_FIELD),
    )?;
    Ok(StateValue::object()
        .with(FIELD_ID, &config.id)
        .with(FIELD_NAME, &config.name)
        .with(FIELD_DESCRIPTION, non_empty(&config.description))
        .with(
            FIELD_SYNTHETIC_TEST_IDS,
            StateValue::string_set(config.synthetic_test_ids.iter().cloned()),
        )
        .with(FIELD_SEVERITY, config.severity)
        .with(TAG_FILTER_FIELD, tag_filter)
        .with(
            FIELD_RULE,
            StateValue::object()
                .with(FIELD_ALERT_TYPE, &config.rule.alert_type)
                .with(FIELD_METRIC_NAME, &config.rule.metric_name)
                .with(FIELD_AGGREGATION, config.rule.aggregation.clone()),
        )
        .with(FIELD_ALERT_CHANNEL_IDS, StateValue::string_set_or_null(&config.alert_channel_ids))
        .with(
            FIELD_TIME_THRESHOLD,
            StateValue::object()
                .with(FIELD_TYPE, &config.time_threshold.kind)
                .with(FIELD_VIOLATIONS_COUNT, config.time_threshold.violations_count),
        )
        .with(FIELD_GRACE_PERIOD, config.grace_period)
        .with(CUSTOM_PAYLOAD_FIELD, custom_payload_to_state(&config.custom_payload_fields)))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
