// crates/instana-resources/src/custom_event_spec.rs
// ============================================================================
// Module: Custom Event Specification Handle
// Description: Custom events built from typed rule lists.
// Purpose: Map per-type rule lists to the flat rule list of the backend.
// Dependencies: instana-core, instana-restapi
// ============================================================================

//! ## Overview
//! The `rules` block holds one list per rule type. On the wire every rule is
//! a flat [`RuleSpecification`] discriminated by `ruleType`; rules are sent
//! grouped by type in [`RuleKind::ALL`] order and regrouped on read. Rule
//! severities use the warning/critical codec.

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
use instana_core::mappers::TAG_FILTER_FIELD;
use instana_core::mappers::tag_filter_from_state;
use instana_core::mappers::tag_filter_to_state;
use instana_core::severity::severity_from_code;
use instana_core::severity::severity_to_code;
use instana_core::upgrade::identity;
use instana_restapi::InstanaApi;
use instana_restapi::RestResource;
use instana_restapi::models::custom_event_spec::CustomEventSpecification;
use instana_restapi::models::custom_event_spec::MetricPattern;
use instana_restapi::models::custom_event_spec::RULE_TYPE_ENTITY_COUNT;
use instana_restapi::models::custom_event_spec::RULE_TYPE_ENTITY_COUNT_VERIFICATION;
use instana_restapi::models::custom_event_spec::RULE_TYPE_ENTITY_VERIFICATION;
use instana_restapi::models::custom_event_spec::RULE_TYPE_HOST_AVAILABILITY;
use instana_restapi::models::custom_event_spec::RULE_TYPE_SYSTEM;
use instana_restapi::models::custom_event_spec::RULE_TYPE_THRESHOLD;
use instana_restapi::models::custom_event_spec::RuleSpecification;

use crate::common::FIELD_AGGREGATION;
use crate::common::FIELD_DESCRIPTION;
use crate::common::FIELD_ENABLED;
use crate::common::FIELD_ID;
use crate::common::FIELD_METRIC_NAME;
use crate::common::FIELD_NAME;
use crate::common::FIELD_RULES;
use crate::common::FIELD_SEVERITY;
use crate::common::FIELD_TRIGGERING;
use crate::common::flag;
use crate::common::id_attribute;
use crate::common::id_from_state;
use crate::common::non_empty;
use crate::common::optional_non_empty;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Host resource name.
pub const RESOURCE_NAME: &str = "instana_custom_event_specification";
/// Current schema version.
const SCHEMA_VERSION: i64 = 1;

/// Entity type the rules apply to.
pub const FIELD_ENTITY_TYPE: &str = "entity_type";
/// Dynamic focus query.
pub const FIELD_QUERY: &str = "query";
/// Event expiry in milliseconds.
pub const FIELD_EXPIRATION_TIME: &str = "expiration_time";
/// Combines rules with `AND` or `OR`.
pub const FIELD_RULE_LOGICAL_OPERATOR: &str = "rule_logical_operator";
/// Comparison operator.
const FIELD_CONDITION_OPERATOR: &str = "condition_operator";
/// Comparison value.
const FIELD_CONDITION_VALUE: &str = "condition_value";
/// Entity type that must be present.
const FIELD_MATCHING_ENTITY_TYPE: &str = "matching_entity_type";
/// Label match operator.
const FIELD_MATCHING_OPERATOR: &str = "matching_operator";
/// Entity label matched against.
const FIELD_MATCHING_ENTITY_LABEL: &str = "matching_entity_label";
/// Offline duration in milliseconds.
const FIELD_OFFLINE_DURATION: &str = "offline_duration";
/// Close delay in milliseconds.
const FIELD_CLOSE_AFTER: &str = "close_after";
/// Built-in rule id.
const FIELD_SYSTEM_RULE_ID: &str = "system_rule_id";
/// Metric rollup.
const FIELD_ROLLUP: &str = "rollup";
/// Evaluation window.
const FIELD_WINDOW: &str = "window";
/// Dynamic metric selector block.
const FIELD_METRIC_PATTERN: &str = "metric_pattern";
/// Metric pattern prefix.
const FIELD_PREFIX: &str = "prefix";
/// Metric pattern postfix.
const FIELD_POSTFIX: &str = "postfix";
/// Metric pattern placeholder.
const FIELD_PLACEHOLDER: &str = "placeholder";
/// Metric pattern operator.
const FIELD_OPERATOR: &str = "operator";

/// Rule combinators.
const LOGICAL_OPERATORS: [&str; 2] = ["AND", "OR"];
/// Combinator used when none is configured.
const DEFAULT_LOGICAL_OPERATOR: &str = "AND";
/// Severity terms.
const SEVERITIES: [&str; 2] = ["warning", "critical"];
/// Threshold rule aggregations.
const THRESHOLD_AGGREGATIONS: [&str; 6] = ["sum", "avg", "min", "max", "abs_diff", "rel_diff"];
/// Metric pattern operators.
const METRIC_PATTERN_OPERATORS: [&str; 5] = ["is", "contains", "any", "startsWith", "endsWith"];
/// Metric pattern operator used when none is configured.
const DEFAULT_METRIC_PATTERN_OPERATOR: &str = "is";

// ============================================================================
// SECTION: Rule Kinds
// ============================================================================

/// Rule type selected by the list a rule is declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Number of matching entities.
    EntityCount,
    /// Number of entities with a given label.
    EntityCountVerification,
    /// Presence of a labelled entity.
    EntityVerification,
    /// Host offline detection.
    HostAvailability,
    /// Built-in system rule.
    System,
    /// Metric threshold.
    Threshold,
}

impl RuleKind {
    /// Every kind in wire order.
    pub const ALL: [Self; 6] = [
        Self::EntityCount,
        Self::EntityCountVerification,
        Self::EntityVerification,
        Self::HostAvailability,
        Self::System,
        Self::Threshold,
    ];

    /// List attribute inside `rules`.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::EntityCount => "entity_count",
            Self::EntityCountVerification => "entity_count_verification",
            Self::EntityVerification => "entity_verification",
            Self::HostAvailability => "host_availability",
            Self::System => "system",
            Self::Threshold => "threshold",
        }
    }

    /// `ruleType` on the wire.
    #[must_use]
    pub const fn rule_type(self) -> &'static str {
        match self {
            Self::EntityCount => RULE_TYPE_ENTITY_COUNT,
            Self::EntityCountVerification => RULE_TYPE_ENTITY_COUNT_VERIFICATION,
            Self::EntityVerification => RULE_TYPE_ENTITY_VERIFICATION,
            Self::HostAvailability => RULE_TYPE_HOST_AVAILABILITY,
            Self::System => RULE_TYPE_SYSTEM,
            Self::Threshold => RULE_TYPE_THRESHOLD,
        }
    }

    /// Resolves a wire `ruleType`.
    #[must_use]
    pub fn from_rule_type(rule_type: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.rule_type() == rule_type)
    }

    /// Attributes of one rule of this kind.
    fn attributes(self) -> Vec<Attribute> {
        let mut attributes = vec![
            Attribute::string(FIELD_SEVERITY).required().validate(Validator::OneOf(&SEVERITIES)),
        ];
        let condition = || {
            vec![
                Attribute::string(FIELD_CONDITION_OPERATOR).required(),
                Attribute::float(FIELD_CONDITION_VALUE).required(),
            ]
        };
        let matching = || {
            vec![
                Attribute::string(FIELD_MATCHING_ENTITY_TYPE).required(),
                Attribute::string(FIELD_MATCHING_OPERATOR).required(),
                Attribute::string(FIELD_MATCHING_ENTITY_LABEL).required(),
            ]
        };
        match self {
            Self::EntityCount => attributes.extend(condition()),
            Self::EntityCountVerification => {
                attributes.extend(condition());
                attributes.extend(matching());
            }
            Self::EntityVerification => {
                attributes.extend(matching());
                attributes.push(Attribute::int(FIELD_OFFLINE_DURATION).required());
            }
            Self::HostAvailability => attributes.extend([
                Attribute::int(FIELD_OFFLINE_DURATION).required(),
                Attribute::int(FIELD_CLOSE_AFTER),
                Attribute::string(TAG_FILTER_FIELD).required(),
            ]),
            Self::System => attributes.push(Attribute::string(FIELD_SYSTEM_RULE_ID).required()),
            Self::Threshold => attributes.extend([
                Attribute::string(FIELD_METRIC_NAME).required(),
                Attribute::int(FIELD_ROLLUP).required(),
                Attribute::int(FIELD_WINDOW).required(),
                Attribute::string(FIELD_AGGREGATION)
                    .required()
                    .validate(Validator::OneOf(&THRESHOLD_AGGREGATIONS)),
                Attribute::string(FIELD_CONDITION_OPERATOR).required(),
                Attribute::float(FIELD_CONDITION_VALUE),
                Attribute::block(
                    FIELD_METRIC_PATTERN,
                    vec![
                        Attribute::string(FIELD_PREFIX).required(),
                        Attribute::string(FIELD_POSTFIX).default_value(""),
                        Attribute::string(FIELD_PLACEHOLDER).default_value(""),
                        Attribute::string(FIELD_OPERATOR)
                            .default_value(DEFAULT_METRIC_PATTERN_OPERATOR)
                            .validate(Validator::OneOf(&METRIC_PATTERN_OPERATORS)),
                    ],
                ),
            ]),
        }
        attributes
    }
}

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Resource schema.
fn schema() -> Schema {
    Schema::new(
        "Custom event specification",
        vec![
            id_attribute(),
            Attribute::string(FIELD_NAME).required(),
            Attribute::string(FIELD_ENTITY_TYPE).required(),
            Attribute::string(FIELD_QUERY),
            flag(FIELD_TRIGGERING, false),
            Attribute::string(FIELD_DESCRIPTION),
            Attribute::int(FIELD_EXPIRATION_TIME),
            flag(FIELD_ENABLED, true),
            Attribute::string(FIELD_RULE_LOGICAL_OPERATOR)
                .default_value(DEFAULT_LOGICAL_OPERATOR)
                .validate(Validator::OneOf(&LOGICAL_OPERATORS)),
            Attribute::block(
                FIELD_RULES,
                RuleKind::ALL
                    .into_iter()
                    .map(|kind| Attribute::block_list(kind.field(), kind.attributes()))
                    .collect(),
            )
            .required(),
        ],
    )
}

// ============================================================================
// SECTION: Handle
// ============================================================================

/// Handle for custom event specifications.
#[derive(Debug)]
pub struct CustomEventSpecificationHandle {
    /// Static description.
    metadata: ResourceMetadata,
}

impl CustomEventSpecificationHandle {
    /// Builds the handle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: ResourceMetadata::new(RESOURCE_NAME, schema(), SCHEMA_VERSION)
                .with_upgraders(vec![StateUpgrader::new(0, identity)]),
        }
    }
}

impl Default for CustomEventSpecificationHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceHandle for CustomEventSpecificationHandle {
    type Payload = CustomEventSpecification;

    fn metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }

    fn rest_resource(&self, api: &InstanaApi) -> RestResource<CustomEventSpecification> {
        api.custom_event_specifications()
    }

    fn state_to_payload(
        &self,
        state: &StateValue,
    ) -> Result<CustomEventSpecification, Diagnostics> {
        specification_from_state(&ObjectReader::root(state))
    }

    fn payload_to_state(
        &self,
        payload: &CustomEventSpecification,
        _prior: &StateValue,
    ) -> Result<StateValue, Diagnostics> {
        specification_to_state(payload).map_err(Diagnostics::from)
    }
}

// ============================================================================
// SECTION: State To Payload
// ============================================================================

/// Maps a resource object to the payload.
fn specification_from_state(
    reader: &ObjectReader<'_>,
) -> Result<CustomEventSpecification, Diagnostics> {
    let mut diagnostics = Diagnostics::new();
    let specification = CustomEventSpecification {
        id: diagnostics.take(id_from_state(reader)),
        name: diagnostics.take(reader.required_string(FIELD_NAME)),
        entity_type: diagnostics.take(reader.required_string(FIELD_ENTITY_TYPE)),
        query: diagnostics.take(optional_non_empty(reader, FIELD_QUERY)),
        triggering: diagnostics.take(reader.bool_or(FIELD_TRIGGERING, false)),
        description: diagnostics.take(optional_non_empty(reader, FIELD_DESCRIPTION)),
        expiration_time: diagnostics.take(reader.optional_i64(FIELD_EXPIRATION_TIME)),
        enabled: diagnostics.take(reader.bool_or(FIELD_ENABLED, true)),
        rule_logical_operator: diagnostics
            .take(reader.string_or(FIELD_RULE_LOGICAL_OPERATOR, DEFAULT_LOGICAL_OPERATOR)),
        rules: diagnostics.take(rules_from_state(reader)),
    };
    diagnostics.finish(specification)
}

/// Maps every rule group in declaration order, reporting every invalid rule.
fn rules_from_state(reader: &ObjectReader<'_>) -> Result<Vec<RuleSpecification>, Diagnostics> {
    let rules_path = reader.field_path(FIELD_RULES);
    let block = reader.required_object(FIELD_RULES)?;
    let block = ObjectReader::new(&block, &rules_path);
    let mut diagnostics = Diagnostics::new();
    let mut rules = Vec::new();
    let mut declared = 0;
    for kind in RuleKind::ALL {
        for (path, value) in diagnostics.take(block.objects(kind.field())) {
            declared += 1;
            let rule = ObjectReader::new(value, &path);
            rules.extend(diagnostics.collect(rule_from_state(kind, &rule)));
        }
    }
    if declared == 0 && !diagnostics.has_error() {
        let message = format!("{rules_path} must contain at least one rule");
        return Err(MappingError::invalid(&rules_path, message).into());
    }
    diagnostics.finish(rules)
}

/// Maps one rule of `kind`.
fn rule_from_state(
    kind: RuleKind,
    rule: &ObjectReader<'_>,
) -> Result<RuleSpecification, MappingError> {
    let mut specification = RuleSpecification {
        rule_type: kind.rule_type().to_string(),
        severity: severity_to_code(&rule.required_string(FIELD_SEVERITY)?)?,
        ..RuleSpecification::default()
    };
    match kind {
        RuleKind::EntityCount => {
            specification.condition_operator =
                Some(rule.required_string(FIELD_CONDITION_OPERATOR)?);
            specification.condition_value = Some(rule.required_f64(FIELD_CONDITION_VALUE)?);
        }
        RuleKind::EntityCountVerification => {
            specification.condition_operator =
                Some(rule.required_string(FIELD_CONDITION_OPERATOR)?);
            specification.condition_value = Some(rule.required_f64(FIELD_CONDITION_VALUE)?);
            read_matching(rule, &mut specification)?;
        }
        RuleKind::EntityVerification => {
            read_matching(rule, &mut specification)?;
            specification.offline_duration = Some(rule.required_i64(FIELD_OFFLINE_DURATION)?);
        }
        RuleKind::HostAvailability => {
            specification.offline_duration = Some(rule.required_i64(FIELD_OFFLINE_DURATION)?);
            specification.close_after = rule.optional_i64(FIELD_CLOSE_AFTER)?;
            specification.tag_filter = tag_filter_from_state(rule, TAG_FILTER_FIELD)?;
        }
        RuleKind::System => {
            specification.system_rule_id = Some(rule.required_string(FIELD_SYSTEM_RULE_ID)?);
        }
        RuleKind::Threshold => {
            specification.metric_name = Some(rule.required_string(FIELD_METRIC_NAME)?);
            specification.rollup = Some(rule.required_i64(FIELD_ROLLUP)?);
            specification.window = Some(rule.required_i64(FIELD_WINDOW)?);
            specification.aggregation = Some(rule.required_string(FIELD_AGGREGATION)?);
            specification.condition_operator =
                Some(rule.required_string(FIELD_CONDITION_OPERATOR)?);
            specification.condition_value = rule.optional_f64(FIELD_CONDITION_VALUE)?;
            specification.metric_pattern = match rule.object(FIELD_METRIC_PATTERN)? {
                Some(pattern) => {
                    let path = rule.field_path(FIELD_METRIC_PATTERN);
                    Some(metric_pattern_from_state(&ObjectReader::new(&pattern, &path))?)
                }
                None => None,
            };
        }
    }
    Ok(specification)
}

/// Copies the entity matching fields.
fn read_matching(
    rule: &ObjectReader<'_>,
    specification: &mut RuleSpecification,
) -> Result<(), MappingError> {
    specification.matching_entity_type = Some(rule.required_string(FIELD_MATCHING_ENTITY_TYPE)?);
    specification.matching_operator = Some(rule.required_string(FIELD_MATCHING_OPERATOR)?);
    specification.matching_entity_label = Some(rule.required_string(FIELD_MATCHING_ENTITY_LABEL)?);
    Ok(())
}

/// Maps the metric pattern block; empty postfix and placeholder are omitted.
fn metric_pattern_from_state(pattern: &ObjectReader<'_>) -> Result<MetricPattern, MappingError> {
    Ok(MetricPattern {
        prefix: pattern.required_string(FIELD_PREFIX)?,
        postfix: optional_non_empty(pattern, FIELD_POSTFIX)?,
        placeholder: optional_non_empty(pattern, FIELD_PLACEHOLDER)?,
        operator: pattern.string_or(FIELD_OPERATOR, DEFAULT_METRIC_PATTERN_OPERATOR)?,
    })
}

// ============================================================================
// SECTION: Payload To State
// ============================================================================

/// Maps the payload to a resource object.
fn specification_to_state(
    specification: &CustomEventSpecification,
) -> Result<StateValue, MappingError> {
    let mut grouped: Vec<Vec<StateValue>> = RuleKind::ALL.iter().map(|_| Vec::new()).collect();
    for rule in &specification.rules {
        let kind = RuleKind::from_rule_type(&rule.rule_type).ok_or_else(|| {
            MappingError::UnsupportedEntityType {
                kind: rule.rule_type.clone(),
            }
        })?;
        let items = &mut grouped[kind as usize];
        let path = AttributePath::attribute(FIELD_RULES).child(kind.field()).index(items.len());
        items.push(rule_to_state(kind, rule, &path)?);
    }
    let rules = RuleKind::ALL
        .into_iter()
        .zip(grouped)
        .fold(StateValue::object(), |block, (kind, items)| {
            block.with(kind.field(), StateValue::list_or_null(items))
        });
    Ok(StateValue::object()
        .with(FIELD_ID, &specification.id)
        .with(FIELD_NAME, &specification.name)
        .with(FIELD_ENTITY_TYPE, &specification.entity_type)
        .with(FIELD_QUERY, specification.query.as_deref().map(non_empty))
        .with(FIELD_TRIGGERING, specification.triggering)
        .with(FIELD_DESCRIPTION, specification.description.as_deref().map(non_empty))
        .with(FIELD_EXPIRATION_TIME, specification.expiration_time)
        .with(FIELD_ENABLED, specification.enabled)
        .with(FIELD_RULE_LOGICAL_OPERATOR, &specification.rule_logical_operator)
        .with(FIELD_RULES, rules))
}

/// Maps one rule of `kind`.
fn rule_to_state(
    kind: RuleKind,
    rule: &RuleSpecification,
    path: &AttributePath,
) -> Result<StateValue, MappingError> {
    let state = StateValue::object().with(FIELD_SEVERITY, severity_from_code(rule.severity)?);
    let with_condition = |state: StateValue| {
        state
            .with(FIELD_CONDITION_OPERATOR, rule.condition_operator.clone())
            .with(FIELD_CONDITION_VALUE, rule.condition_value)
    };
    let with_matching = |state: StateValue| {
        state
            .with(FIELD_MATCHING_ENTITY_TYPE, rule.matching_entity_type.clone())
            .with(FIELD_MATCHING_OPERATOR, rule.matching_operator.clone())
            .with(FIELD_MATCHING_ENTITY_LABEL, rule.matching_entity_label.clone())
    };
    Ok(match kind {
        RuleKind::EntityCount => with_condition(state),
        RuleKind::EntityCountVerification => with_matching(with_condition(state)),
        RuleKind::EntityVerification => {
            with_matching(state).with(FIELD_OFFLINE_DURATION, rule.offline_duration)
        }
        RuleKind::HostAvailability => state
            .with(FIELD_OFFLINE_DURATION, rule.offline_duration)
            .with(FIELD_CLOSE_AFTER, rule.close_after)
            .with(
                TAG_FILTER_FIELD,
                tag_filter_to_state(rule.tag_filter.as_ref(), &path.child(TAG_FILTER_FIELD))?,
            ),
        RuleKind::System => state.with(FIELD_SYSTEM_RULE_ID, rule.system_rule_id.clone()),
        RuleKind::Threshold => with_condition(state)
            .with(FIELD_METRIC_NAME, rule.metric_name.clone())
            .with(FIELD_ROLLUP, rule.rollup)
            .with(FIELD_WINDOW, rule.window)
            .with(FIELD_AGGREGATION, rule.aggregation.clone())
            .with(
                FIELD_METRIC_PATTERN,
                rule.metric_pattern.as_ref().map(|pattern| {
                    StateValue::object()
                        .with(FIELD_PREFIX, &pattern.prefix)
                        .with(FIELD_POSTFIX, pattern.postfix.clone().unwrap_or_default())
                        .with(FIELD_PLACEHOLDER, pattern.placeholder.clone().unwrap_or_default())
                        .with(FIELD_OPERATOR, &pattern.operator)
                }),
            ),
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
