// crates/instana-resources/src/application_alert.rs
// ============================================================================
// Module: Application Alert Config Handle
// Description: Application and global application smart alert configs.
// Purpose: Map the scope tree, rule union, and thresholds to the backend.
// Dependencies: instana-core, instana-restapi
// ============================================================================

//! ## Overview
//! Both resources share one schema and one payload; only the REST path and
//! the host name differ. A config selects applications (optionally narrowed
//! to services and endpoints), one or more rules with per-severity
//! thresholds, and a time threshold.
//!
//! The scope tree is a nested set of blocks in state and a nested map keyed
//! by id on the wire. Rules are a tagged union: exactly one of the rule slots
//! must be populated and the slot selects the wire `alertType`.

use std::collections::BTreeMap;

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
use instana_core::mappers::ALL_THRESHOLDS;
use instana_core::mappers::CUSTOM_PAYLOAD_FIELD;
use instana_core::mappers::TAG_FILTER_FIELD;
use instana_core::mappers::TIME_THRESHOLD_FIELD;
use instana_core::mappers::TimeThresholdVariant;
use instana_core::mappers::alert_channels_attribute;
use instana_core::mappers::alert_channels_from_state;
use instana_core::mappers::alert_channels_to_state;
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
use instana_core::upgrade::rename_full_name;
use instana_restapi::InstanaApi;
use instana_restapi::RestResource;
use instana_restapi::models::application_alert::ApplicationAlertConfig;
use instana_restapi::models::application_alert::ApplicationAlertRule;
use instana_restapi::models::application_alert::IncludedApplication;
use instana_restapi::models::application_alert::IncludedEndpoint;
use instana_restapi::models::application_alert::IncludedService;
use instana_restapi::models::application_config::BOUNDARY_SCOPES;
use instana_restapi::models::threshold::RuleWithThreshold;
use instana_restapi::models::threshold::THRESHOLD_OPERATORS;

use crate::common::DEFAULT_GRANULARITY;
use crate::common::EXPRESSION_OPERATORS;
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
use crate::common::FIELD_TRIGGERING;
use crate::common::LOG_LEVELS;
use crate::common::MAX_NAME_LENGTH;
use crate::common::aggregation_attribute;
use crate::common::description_attribute;
use crate::common::flag;
use crate::common::granularity_attribute;
use crate::common::id_attribute;
use crate::common::id_from_state;
use crate::common::name_attribute;
use crate::common::non_empty;
use crate::common::set_or_null;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Host name of the per-application resource.
pub const RESOURCE_NAME: &str = "instana_application_alert_config";
/// Host name of the global resource.
pub const GLOBAL_RESOURCE_NAME: &str = "instana_global_application_alert_config";
/// Current schema version.
const SCHEMA_VERSION: i64 = 1;

/// Scope tree root.
pub const FIELD_APPLICATION: &str = "application";
/// Application id inside the scope tree.
pub const FIELD_APPLICATION_ID: &str = "application_id";
/// Services of an application.
pub const FIELD_SERVICE: &str = "service";
/// Service id inside the scope tree.
pub const FIELD_SERVICE_ID: &str = "service_id";
/// Endpoints of a service.
pub const FIELD_ENDPOINT: &str = "endpoint";
/// Endpoint id inside the scope tree.
pub const FIELD_ENDPOINT_ID: &str = "endpoint_id";
/// Whether the scope node is included or only traversed.
pub const FIELD_INCLUSIVE: &str = "inclusive";
/// Boundary scope.
pub const FIELD_BOUNDARY_SCOPE: &str = "boundary_scope";
/// Evaluation type.
pub const FIELD_EVALUATION_TYPE: &str = "evaluation_type";
/// Includes internal calls.
pub const FIELD_INCLUDE_INTERNAL: &str = "include_internal";
/// Includes synthetic calls.
pub const FIELD_INCLUDE_SYNTHETIC: &str = "include_synthetic";
/// Rule union inside a rule entry.
pub const FIELD_RULE: &str = "rule";
/// Log level of a logs rule.
const FIELD_LEVEL: &str = "level";
/// Log message of a logs rule.
const FIELD_MESSAGE: &str = "message";
/// Message operator of a logs rule.
const FIELD_OPERATOR: &str = "operator";
/// First status code of a status code rule.
const FIELD_STATUS_CODE_START: &str = "status_code_start";
/// Last status code of a status code rule.
const FIELD_STATUS_CODE_END: &str = "status_code_end";

/// Accepted evaluation types.
pub const EVALUATION_TYPES: [&str; 3] = ["PER_AP", "PER_AP_SERVICE", "PER_AP_ENDPOINT"];

/// Time threshold variants application alerts accept.
pub const TIME_THRESHOLDS: [TimeThresholdVariant; 3] = [
    TimeThresholdVariant::RequestImpact,
    TimeThresholdVariant::ViolationsInPeriod,
    TimeThresholdVariant::ViolationsInSequence,
];

// ============================================================================
// SECTION: Rule Kinds
// ============================================================================

/// Rule union slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Share of erroneous calls.
    ErrorRate,
    /// Number of erroneous calls.
    Errors,
    /// Log messages emitted by calls.
    Logs,
    /// Call latency.
    Slowness,
    /// HTTP status codes in a range.
    StatusCode,
    /// Call volume.
    Throughput,
}

impl RuleKind {
    /// All slots in declaration order.
    pub const ALL: [Self; 6] = [
        Self::ErrorRate,
        Self::Errors,
        Self::Logs,
        Self::Slowness,
        Self::StatusCode,
        Self::Throughput,
    ];

    /// Slot names in declaration order.
    pub const FIELDS: [&'static str; 6] =
        ["error_rate", "errors", "logs", "slowness", "status_code", "throughput"];

    /// State slot name.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::ErrorRate => "error_rate",
            Self::Errors => "errors",
            Self::Logs => "logs",
            Self::Slowness => "slowness",
            Self::StatusCode => "status_code",
            Self::Throughput => "throughput",
        }
    }

    /// Wire `alertType`.
    #[must_use]
    pub const fn alert_type(self) -> &'static str {
        match self {
            Self::ErrorRate => "errorRate",
            Self::Errors => "errors",
            Self::Logs => "logs",
            Self::Slowness => "slowness",
            Self::StatusCode => "statusCode",
            Self::Throughput => "throughput",
        }
    }

    /// Resolves a slot name.
    #[must_use]
    pub fn from_field(field: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.field() == field)
    }

    /// Resolves a wire `alertType`.
    #[must_use]
    pub fn from_alert_type(alert_type: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.alert_type() == alert_type)
    }

    /// Attributes of the slot block.
    fn attributes(self) -> Vec<Attribute> {
        let mut attributes = vec![
            Attribute::string(FIELD_METRIC_NAME).required().describe("The metric name of the rule"),
            aggregation_attribute(),
        ];
        match self {
            Self::Logs => {
                attributes.push(
                    Attribute::string(FIELD_LEVEL)
                        .required()
                        .validate(Validator::OneOf(&LOG_LEVELS)),
                );
                attributes.push(Attribute::string(FIELD_MESSAGE));
                attributes.push(
                    Attribute::string(FIELD_OPERATOR)
                        .required()
                        .validate(Validator::OneOf(&EXPRESSION_OPERATORS)),
                );
            }
            Self::StatusCode => {
                attributes.push(Attribute::int(FIELD_STATUS_CODE_START));
                attributes.push(Attribute::int(FIELD_STATUS_CODE_END));
            }
            Self::ErrorRate | Self::Errors | Self::Slowness | Self::Throughput => {}
        }
        attributes
    }
}

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Scope tree attribute.
fn application_attribute() -> Attribute {
    let endpoint = Attribute::block_set(
        FIELD_ENDPOINT,
        vec![
            Attribute::string(FIELD_ENDPOINT_ID).required(),
            Attribute::bool(FIELD_INCLUSIVE).required(),
        ],
    )
    .default_value(StateValue::Set(Vec::new()));
    let service = Attribute::block_set(
        FIELD_SERVICE,
        vec![
            Attribute::string(FIELD_SERVICE_ID).required(),
            Attribute::bool(FIELD_INCLUSIVE).required(),
            endpoint,
        ],
    )
    .default_value(StateValue::Set(Vec::new()));
    Attribute::block_set(
        FIELD_APPLICATION,
        vec![
            Attribute::string(FIELD_APPLICATION_ID).required(),
            Attribute::bool(FIELD_INCLUSIVE).required(),
            service,
        ],
    )
    .required()
    .validate(Validator::SizeBetween(1, usize::MAX))
    .describe("Selection of applications, services, and endpoints in scope")
}

/// Rule list attribute.
fn rules_attribute() -> Attribute {
    let rule = Attribute::block(
        FIELD_RULE,
        RuleKind::ALL
            .into_iter()
            .map(|kind| Attribute::block(kind.field(), kind.attributes()))
            .collect(),
    )
    .required();
    Attribute::block_list(
        FIELD_RULES,
        vec![
            rule,
            Attribute::string(FIELD_THRESHOLD_OPERATOR)
                .required()
                .validate(Validator::OneOf(&THRESHOLD_OPERATORS)),
            threshold_attribute(FIELD_THRESHOLD, ALL_THRESHOLDS).required(),
        ],
    )
    .required()
    .validate(Validator::SizeBetween(1, usize::MAX))
    .describe("Rules with their thresholds")
}

/// Shared schema of both resources.
fn schema() -> Schema {
    Schema::new(
        "Application smart alert configuration",
        vec![
            id_attribute(),
            name_attribute(MAX_NAME_LENGTH),
            description_attribute(),
            Attribute::string(FIELD_BOUNDARY_SCOPE)
                .required()
                .validate(Validator::OneOf(&BOUNDARY_SCOPES)),
            Attribute::string(FIELD_EVALUATION_TYPE)
                .required()
                .validate(Validator::OneOf(&EVALUATION_TYPES)),
            granularity_attribute(),
            Attribute::int(FIELD_GRACE_PERIOD),
            flag(FIELD_INCLUDE_INTERNAL, false),
            flag(FIELD_INCLUDE_SYNTHETIC, false),
            flag(FIELD_TRIGGERING, false),
            Attribute::string(TAG_FILTER_FIELD).describe("Tag filter expression"),
            alert_channels_attribute(),
            application_attribute(),
            rules_attribute(),
            time_threshold_attribute(&TIME_THRESHOLDS),
            custom_payload_attribute(),
        ],
    )
}

// ============================================================================
// SECTION: Handle
// ============================================================================

/// Handle for application alert configs, per application or global.
#[derive(Debug)]
pub struct ApplicationAlertConfigHandle {
    /// Static description.
    metadata: ResourceMetadata,
    /// Serves the global endpoint.
    global: bool,
}

impl ApplicationAlertConfigHandle {
    /// Per-application handle.
    #[must_use]
    pub fn new() -> Self {
        Self::scoped(RESOURCE_NAME, false)
    }

    /// Global handle.
    #[must_use]
    pub fn global() -> Self {
        Self::scoped(GLOBAL_RESOURCE_NAME, true)
    }

    fn scoped(name: &'static str, global: bool) -> Self {
        Self {
            metadata: ResourceMetadata::new(name, schema(), SCHEMA_VERSION)
                .with_upgraders(vec![StateUpgrader::new(0, rename_full_name)]),
            global,
        }
    }
}

impl Default for ApplicationAlertConfigHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceHandle for ApplicationAlertConfigHandle {
    type Payload = ApplicationAlertConfig;

    fn metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }

    fn rest_resource(&self, api: &InstanaApi) -> RestResource<ApplicationAlertConfig> {
        if self.global {
            api.global_application_alert_configs()
        } else {
            api.application_alert_configs()
        }
    }

    fn state_to_payload(&self, state: &StateValue) -> Result<ApplicationAlertConfig, Diagnostics> {
        config_from_state(&ObjectReader::root(state))
    }

    fn payload_to_state(
        &self,
        payload: &ApplicationAlertConfig,
        _prior: &StateValue,
    ) -> Result<StateValue, Diagnostics> {
        config_to_state(payload).map_err(Diagnostics::from)
    }
}

// ============================================================================
// SECTION: State To Payload
// ============================================================================

/// Maps a resource object to the payload, reporting every invalid field.
fn config_from_state(reader: &ObjectReader<'_>) -> Result<ApplicationAlertConfig, Diagnostics> {
    let mut diagnostics = Diagnostics::new();
    let config = ApplicationAlertConfig {
        id: diagnostics.take(id_from_state(reader)),
        name: diagnostics.take(reader.required_string(FIELD_NAME)),
        description: diagnostics.take(reader.string_or(FIELD_DESCRIPTION, "")),
        severity: None,
        triggering: diagnostics.take(reader.bool_or(FIELD_TRIGGERING, false)),
        applications: diagnostics.take(applications_from_state(reader)),
        boundary_scope: diagnostics.take(reader.required_string(FIELD_BOUNDARY_SCOPE)),
        tag_filter_expression: diagnostics.take(tag_filter_from_state(reader, TAG_FILTER_FIELD)),
        include_internal: diagnostics.take(reader.bool_or(FIELD_INCLUDE_INTERNAL, false)),
        include_synthetic: diagnostics.take(reader.bool_or(FIELD_INCLUDE_SYNTHETIC, false)),
        evaluation_type: diagnostics.take(reader.required_string(FIELD_EVALUATION_TYPE)),
        alert_channels: diagnostics.take(alert_channels_from_state(reader, ALERT_CHANNELS_FIELD)),
        granularity: diagnostics.take(reader.i64_or(FIELD_GRANULARITY, DEFAULT_GRANULARITY)),
        grace_period: diagnostics.take(reader.optional_i64(FIELD_GRACE_PERIOD)),
        custom_payload_fields: diagnostics
            .take(custom_payload_from_state(reader, CUSTOM_PAYLOAD_FIELD)),
        rules: diagnostics.take(rules_from_state(reader)),
        time_threshold: diagnostics
            .collect(time_threshold_from_state(reader, TIME_THRESHOLD_FIELD, &TIME_THRESHOLDS)),
    };
    diagnostics.finish(config)
}

/// Maps the scope tree to the id-keyed wire map.
fn applications_from_state(
    reader: &ObjectReader<'_>,
) -> Result<BTreeMap<String, IncludedApplication>, MappingError> {
    reader
        .objects(FIELD_APPLICATION)?
        .into_iter()
        .map(|(path, value)| {
            let application = ObjectReader::new(value, &path);
            let application_id = application.required_string(FIELD_APPLICATION_ID)?;
            let services = application
                .objects(FIELD_SERVICE)?
                .into_iter()
                .map(|(path, value)| service_from_state(&ObjectReader::new(value, &path)))
                .collect::<Result<BTreeMap<_, _>, _>>()?;
            Ok((
                application_id.clone(),
                IncludedApplication {
                    application_id,
                    inclusive: application.required_bool(FIELD_INCLUSIVE)?,
                    services,
                },
            ))
        })
        .collect()
}

/// Maps one service node with its endpoints.
fn service_from_state(
    service: &ObjectReader<'_>,
) -> Result<(String, IncludedService), MappingError> {
    let service_id = service.required_string(FIELD_SERVICE_ID)?;
    let endpoints = service
        .objects(FIELD_ENDPOINT)?
        .into_iter()
        .map(|(path, value)| {
            let endpoint = ObjectReader::new(value, &path);
            let endpoint_id = endpoint.required_string(FIELD_ENDPOINT_ID)?;
            Ok((
                endpoint_id.clone(),
                IncludedEndpoint {
                    endpoint_id,
                    inclusive: endpoint.required_bool(FIELD_INCLUSIVE)?,
                },
            ))
        })
        .collect::<Result<BTreeMap<_, _>, MappingError>>()?;
    Ok((
        service_id.clone(),
        IncludedService {
            service_id,
            inclusive: service.required_bool(FIELD_INCLUSIVE)?,
            endpoints,
        },
    ))
}

/// Maps the rule list, reporting every invalid entry.
fn rules_from_state(
    reader: &ObjectReader<'_>,
) -> Result<Vec<RuleWithThreshold<ApplicationAlertRule>>, Diagnostics> {
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

/// Maps one rule entry with its thresholds.
fn rule_entry_from_state(
    entry: &ObjectReader<'_>,
) -> Result<RuleWithThreshold<ApplicationAlertRule>, MappingError> {
    let union = entry.required_object(FIELD_RULE)?;
    let union_path = entry.field_path(FIELD_RULE);
    let union_reader = ObjectReader::new(&union, &union_path);
    let selected = select_variant(&union_reader, &RuleKind::FIELDS, &union_path.to_string())?;
    let kind = RuleKind::from_field(selected.name).ok_or_else(|| {
        MappingError::invalid(&selected.path, format!("unsupported rule {}", selected.name))
    })?;
    Ok(RuleWithThreshold {
        threshold_operator: entry.required_string(FIELD_THRESHOLD_OPERATOR)?,
        rule: rule_from_state(kind, &selected.reader())?,
        thresholds: thresholds_from_state(entry, FIELD_THRESHOLD, ALL_THRESHOLDS)?,
    })
}

/// Maps one selected rule slot.
fn rule_from_state(
    kind: RuleKind,
    slot: &ObjectReader<'_>,
) -> Result<ApplicationAlertRule, MappingError> {
    let mut rule = ApplicationAlertRule {
        alert_type: kind.alert_type().to_string(),
        metric_name: slot.required_string(FIELD_METRIC_NAME)?,
        aggregation: slot.optional_string(FIELD_AGGREGATION)?,
        ..ApplicationAlertRule::default()
    };
    match kind {
        RuleKind::Logs => {
            rule.level = slot.optional_string(FIELD_LEVEL)?;
            rule.message = slot.optional_string(FIELD_MESSAGE)?;
            rule.operator = slot.optional_string(FIELD_OPERATOR)?;
        }
        RuleKind::StatusCode => {
            rule.status_code_start = slot.optional_i64(FIELD_STATUS_CODE_START)?;
            rule.status_code_end = slot.optional_i64(FIELD_STATUS_CODE_END)?;
        }
        RuleKind::ErrorRate | RuleKind::Errors | RuleKind::Slowness | RuleKind::Throughput => {}
    }
    Ok(rule)
}

// ============================================================================
// SECTION: Payload To State
// ============================================================================

/// Maps the payload to a resource object.
fn config_to_state(config: &ApplicationAlertConfig) -> Result<StateValue, MappingError> {
    let rules = config.rules.iter().map(rule_entry_to_state).collect::<Result<Vec<_>, _>>()?;
    let time_threshold = config
        .time_threshold
        .as_ref()
        .map(|threshold| time_threshold_to_state(threshold, &TIME_THRESHOLDS))
        .transpose()?;
    let tag_filter = tag_filter_to_state(
        config.tag_filter_expression.as_ref(),
        &AttributePath::attribute(TAG_FILTER_FIELD),
    )?;
    Ok(StateValue::object()
        .with(FIELD_ID, &config.id)
        .with(FIELD_NAME, &config.name)
        .with(FIELD_DESCRIPTION, non_empty(&config.description))
        .with(FIELD_BOUNDARY_SCOPE, &config.boundary_scope)
        .with(FIELD_EVALUATION_TYPE, &config.evaluation_type)
        .with(FIELD_GRANULARITY, config.granularity)
        .with(FIELD_GRACE_PERIOD, config.grace_period)
        .with(FIELD_INCLUDE_INTERNAL, config.include_internal)
        .with(FIELD_INCLUDE_SYNTHETIC, config.include_synthetic)
        .with(FIELD_TRIGGERING, config.triggering)
        .with(TAG_FILTER_FIELD, tag_filter)
        .with(ALERT_CHANNELS_FIELD, alert_channels_to_state(&config.alert_channels))
        .with(FIELD_APPLICATION, applications_to_state(&config.applications))
        .with(FIELD_RULES, StateValue::list_or_null(rules))
        .with(TIME_THRESHOLD_FIELD, time_threshold)
        .with(CUSTOM_PAYLOAD_FIELD, custom_payload_to_state(&config.custom_payload_fields)))
}

/// Maps the id-keyed wire map to the scope tree; nodes without children
/// carry an empty set.
fn applications_to_state(applications: &BTreeMap<String, IncludedApplication>) -> StateValue {
    set_or_null(
        applications
            .values()
            .map(|application| {
                let services = application
                    .services
                    .values()
                    .map(|service| {
                        let endpoints = service
                            .endpoints
                            .values()
                            .map(|endpoint| {
                                StateValue::object()
                                    .with(FIELD_ENDPOINT_ID, &endpoint.endpoint_id)
                                    .with(FIELD_INCLUSIVE, endpoint.inclusive)
                            })
                            .collect();
                        StateValue::object()
                            .with(FIELD_SERVICE_ID, &service.service_id)
                            .with(FIELD_INCLUSIVE, service.inclusive)
                            .with(FIELD_ENDPOINT, StateValue::set_of(endpoints))
                    })
                    .collect();
                StateValue::object()
                    .with(FIELD_APPLICATION_ID, &application.application_id)
                    .with(FIELD_INCLUSIVE, application.inclusive)
                    .with(FIELD_SERVICE, StateValue::set_of(services))
            })
            .collect(),
    )
}

/// Maps one rule entry.
fn rule_entry_to_state(
    entry: &RuleWithThreshold<ApplicationAlertRule>,
) -> Result<StateValue, MappingError> {
    let rule = &entry.rule;
    let kind = RuleKind::from_alert_type(&rule.alert_type).ok_or_else(|| {
        MappingError::UnsupportedEntityType {
            kind: rule.alert_type.clone(),
        }
    })?;
    let mut slot = StateValue::object()
        .with(FIELD_METRIC_NAME, &rule.metric_name)
        .with(FIELD_AGGREGATION, rule.aggregation.clone());
    match kind {
        RuleKind::Logs => {
            slot.insert(FIELD_LEVEL, rule.level.clone());
            slot.insert(FIELD_MESSAGE, rule.message.clone());
            slot.insert(FIELD_OPERATOR, rule.operator.clone());
        }
        RuleKind::StatusCode => {
            slot.insert(FIELD_STATUS_CODE_START, rule.status_code_start);
            slot.insert(FIELD_STATUS_CODE_END, rule.status_code_end);
        }
        RuleKind::ErrorRate | RuleKind::Errors | RuleKind::Slowness | RuleKind::Throughput => {}
    }
    Ok(StateValue::object()
        .with(FIELD_RULE, variant_state(&RuleKind::FIELDS, kind.field(), slot))
        .with(FIELD_THRESHOLD_OPERATOR, &entry.threshold_operator)
        .with(FIELD_THRESHOLD, thresholds_to_state(&entry.thresholds, ALL_THRESHOLDS)?))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
