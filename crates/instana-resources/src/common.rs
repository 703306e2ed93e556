// crates/instana-resources/src/common.rs
// ============================================================================
// Module: Shared Resource Vocabulary
// Description: Attribute builders and value lists reused across handles.
// Purpose: Keep common field names and enumerations in one place.
// Dependencies: instana-core, instana-restapi
// ============================================================================

use instana_core::Attribute;
use instana_core::AttributeType;
use instana_core::MappingError;
use instana_core::ObjectReader;
use instana_core::StateValue;
use instana_core::Validator;
use instana_restapi::models::access_rule::ACCESS_TYPES;
use instana_restapi::models::access_rule::AccessRule;
use instana_restapi::models::access_rule::RELATION_TYPES;

// ============================================================================
// SECTION: Field Names
// ============================================================================

/// Computed backend id.
pub const FIELD_ID: &str = "id";
/// Display name.
pub const FIELD_NAME: &str = "name";
/// Free text description.
pub const FIELD_DESCRIPTION: &str = "description";
/// Evaluation granularity in milliseconds.
pub const FIELD_GRANULARITY: &str = "granularity";
/// Grace period in milliseconds.
pub const FIELD_GRACE_PERIOD: &str = "grace_period";
/// Triggers an incident in addition to the alert.
pub const FIELD_TRIGGERING: &str = "triggering";
/// Enabled flag.
pub const FIELD_ENABLED: &str = "enabled";
/// Metric name inside rule blocks.
pub const FIELD_METRIC_NAME: &str = "metric_name";
/// Aggregation inside rule blocks.
pub const FIELD_AGGREGATION: &str = "aggregation";
/// Operator applied to thresholds.
pub const FIELD_THRESHOLD_OPERATOR: &str = "threshold_operator";
/// Threshold block inside rules.
pub const FIELD_THRESHOLD: &str = "threshold";
/// Rule list or block.
pub const FIELD_RULES: &str = "rules";
/// Alert channel id set.
pub const FIELD_ALERT_CHANNEL_IDS: &str = "alert_channel_ids";
/// Severity term or code.
pub const FIELD_SEVERITY: &str = "severity";
/// Access rule list.
pub const FIELD_ACCESS_RULE: &str = "access_rule";
/// Access level of an access rule.
const FIELD_ACCESS_TYPE: &str = "access_type";
/// Related object of an access rule.
const FIELD_RELATED_ID: &str = "related_id";
/// Related object kind of an access rule.
const FIELD_RELATION_TYPE: &str = "relation_type";

// ============================================================================
// SECTION: Value Lists
// ============================================================================

/// Metric aggregations accepted by smart alert rules.
pub const AGGREGATIONS: [&str; 17] = [
    "SUM",
    "MEAN",
    "MAX",
    "MIN",
    "P25",
    "P50",
    "P75",
    "P90",
    "P95",
    "P98",
    "P99",
    "P99_9",
    "P99_99",
    "DISTRIBUTION",
    "DISTINCT_COUNT",
    "SUM_POSITIVE",
    "PER_SECOND",
];

/// Log levels accepted by log rules.
pub const LOG_LEVELS: [&str; 3] = ["WARN", "ERROR", "ANY"];

/// Comparison operators for log messages and website rule values.
pub const EXPRESSION_OPERATORS: [&str; 16] = [
    "EQUALS",
    "NOT_EQUAL",
    "CONTAINS",
    "NOT_CONTAIN",
    "STARTS_WITH",
    "ENDS_WITH",
    "NOT_STARTS_WITH",
    "NOT_ENDS_WITH",
    "GREATER_OR_EQUAL_THAN",
    "LESS_OR_EQUAL_THAN",
    "LESS_THAN",
    "GREATER_THAN",
    "IS_EMPTY",
    "NOT_EMPTY",
    "IS_BLANK",
    "NOT_BLANK",
];

/// Evaluation granularities in milliseconds.
pub const GRANULARITIES: [i64; 6] = [60_000, 300_000, 600_000, 900_000, 1_200_000, 1_800_000];

/// Granularity used when none is configured.
pub const DEFAULT_GRANULARITY: i64 = 600_000;

/// Upper bound of names on smart alert configs.
pub const MAX_NAME_LENGTH: usize = 256;

/// Upper bound of descriptions on smart alert configs.
pub const MAX_DESCRIPTION_LENGTH: usize = 65_536;

// ============================================================================
// SECTION: Attributes
// ============================================================================

/// Computed `id` attribute.
#[must_use]
pub const fn id_attribute() -> Attribute {
    Attribute::string(FIELD_ID).computed().describe("The ID of the resource")
}

/// Required `name` attribute of at most `max` characters.
#[must_use]
pub fn name_attribute(max: usize) -> Attribute {
    Attribute::string(FIELD_NAME)
        .required()
        .validate(Validator::LengthBetween(1, max))
        .describe("Name of the resource")
}

/// Optional `description` attribute.
#[must_use]
pub fn description_attribute() -> Attribute {
    Attribute::string(FIELD_DESCRIPTION)
        .validate(Validator::LengthBetween(0, MAX_DESCRIPTION_LENGTH))
        .describe("Description of the resource")
}

/// `granularity` attribute with the shared default.
#[must_use]
pub fn granularity_attribute() -> Attribute {
    Attribute::int(FIELD_GRANULARITY)
        .default_value(DEFAULT_GRANULARITY)
        .validate(Validator::IntOneOf(&GRANULARITIES))
        .describe("Evaluation granularity in milliseconds")
}

/// Optional `aggregation` attribute.
#[must_use]
pub fn aggregation_attribute() -> Attribute {
    Attribute::string(FIELD_AGGREGATION).validate(Validator::OneOf(&AGGREGATIONS))
}

/// Set of alert channel ids.
#[must_use]
pub fn alert_channel_ids_attribute() -> Attribute {
    Attribute::new(FIELD_ALERT_CHANNEL_IDS, AttributeType::string_set())
        .describe("IDs of the alert channels notified by this config")
}

/// Boolean attribute defaulting to `default`.
#[must_use]
pub fn flag(name: &'static str, default: bool) -> Attribute {
    Attribute::bool(name).default_value(default)
}

/// List of access rules.
#[must_use]
pub fn access_rule_attribute() -> Attribute {
    Attribute::block_list(
        FIELD_ACCESS_RULE,
        vec![
            Attribute::string(FIELD_ACCESS_TYPE)
                .required()
                .validate(Validator::OneOf(&ACCESS_TYPES)),
            Attribute::string(FIELD_RELATED_ID).validate(Validator::LengthBetween(0, 64)),
            Attribute::string(FIELD_RELATION_TYPE)
                .required()
                .validate(Validator::OneOf(&RELATION_TYPES)),
        ],
    )
    .describe("Who may view or edit the resource")
}

// ============================================================================
// SECTION: Reading
// ============================================================================

/// Reads the id; an unset id maps to the empty string the backend expects on
/// create.
///
/// # Errors
/// Returns [`MappingError::InvalidConfig`] when the id is not a string.
pub fn id_from_state(reader: &ObjectReader<'_>) -> Result<String, MappingError> {
    Ok(reader.optional_string(FIELD_ID)?.unwrap_or_default())
}

/// Converts an empty string to null.
#[must_use]
pub fn non_empty(value: &str) -> StateValue {
    if value.is_empty() { StateValue::Null } else { StateValue::from(value) }
}

/// Builds a set, or null when empty.
#[must_use]
pub fn set_or_null(items: Vec<StateValue>) -> StateValue {
    if items.is_empty() { StateValue::Null } else { StateValue::set_of(items) }
}

/// Reads a string, treating the empty string as absent.
///
/// # Errors
/// Returns [`MappingError::InvalidConfig`] on a type mismatch.
pub fn optional_non_empty(
    reader: &ObjectReader<'_>,
    name: &str,
) -> Result<Option<String>, MappingError> {
    Ok(reader.optional_string(name)?.filter(|value| !value.is_empty()))
}

// ============================================================================
// SECTION: Access Rules
// ============================================================================

/// Reads the access rule list.
///
/// # Errors
/// Returns [`MappingError::InvalidConfig`] when a rule misses a required field.
pub fn access_rules_from_state(reader: &ObjectReader<'_>) -> Result<Vec<AccessRule>, MappingError> {
    reader
        .objects(FIELD_ACCESS_RULE)?
        .into_iter()
        .map(|(path, value)| {
            let rule = ObjectReader::new(value, &path);
            Ok(AccessRule {
                access_type: rule.required_string(FIELD_ACCESS_TYPE)?,
                related_id: optional_non_empty(&rule, FIELD_RELATED_ID)?,
                relation_type: rule.required_string(FIELD_RELATION_TYPE)?,
            })
        })
        .collect()
}

/// Writes the access rule list, or null when there are none.
#[must_use]
pub fn access_rules_to_state(rules: &[AccessRule]) -> StateValue {
    StateValue::list_or_null(
        rules
            .iter()
            .map(|rule| {
                StateValue::object()
                    .with(FIELD_ACCESS_TYPE, &rule.access_type)
                    .with(FIELD_RELATED_ID, rule.related_id.clone().filter(|id| !id.is_empty()))
                    .with(FIELD_RELATION_TYPE, &rule.relation_type)
            })
            .collect(),
    )
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
