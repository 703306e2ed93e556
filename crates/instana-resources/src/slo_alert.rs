// crates/instana-resources/src/slo_alert.rs
// ============================================================================
// Module: SLO Alert Config Handle
// Description: Alerts on SLO status, error budget, and burn rate.
// Purpose: Map the state alert type onto the wire alert type and metric pair.
// Dependencies: instana-core, instana-restapi
// ============================================================================

//! ## Overview
//! State exposes one `alert_type` term; the backend expects a rule with an
//! `alertType` and `metric`. Burn rate alerts carry burn rate windows instead
//! of a static threshold.

use instana_core::Attribute;
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
use instana_core::mappers::custom_payload_attribute;
use instana_core::mappers::custom_payload_from_state;
use instana_core::mappers::custom_payload_to_state;
use instana_core::upgrade::identity;
use instana_restapi::InstanaApi;
use instana_restapi::RestResource;
use instana_restapi::models::slo_alert::BurnRateConfig;
use instana_restapi::models::slo_alert::SloAlertConfig;
use instana_restapi::models::slo_alert::SloAlertRule;
use instana_restapi::models::slo_alert::SloAlertThreshold;
use instana_restapi::models::slo_alert::SloAlertTimeThreshold;
use instana_restapi::models::slo_alert::StaticThresholdConfig;
use instana_restapi::models::threshold::SERVICE_LEVEL_THRESHOLD_OPERATORS;
use instana_restapi::models::threshold::THRESHOLD_TYPE_STATIC;

use crate::common::FIELD_ALERT_CHANNEL_IDS;
use crate::common::FIELD_DESCRIPTION;
use crate::common::FIELD_ENABLED;
use crate::common::FIELD_ID;
use crate::common::FIELD_NAME;
use crate::common::FIELD_SEVERITY;
use crate::common::FIELD_THRESHOLD;
use crate::common::FIELD_TRIGGERING;
use crate::common::MAX_NAME_LENGTH;
use crate::common::alert_channel_ids_attribute;
use crate::common::description_attribute;
use crate::common::flag;
use crate::common::id_attribute;
use crate::common::id_from_state;
use crate::common::name_attribute;
use crate::common::non_empty;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Host resource name.
pub const RESOURCE_NAME: &str = "instana_slo_alert_config";
/// Current schema version.
const SCHEMA_VERSION: i64 = 1;

/// Alert type term.
pub const FIELD_ALERT_TYPE: &str = "alert_type";
/// Monitored SLO ids.
pub const FIELD_SLO_IDS: &str = "slo_ids";
/// Warm-up and cool-down block.
pub const FIELD_TIME_THRESHOLD: &str = "time_threshold";
/// Burn rate windows.
pub const FIELD_BURN_RATE_CONFIG: &str = "burn_rate_config";
/// Threshold kind.
const FIELD_TYPE: &str = "type";
/// Threshold operator.
const FIELD_OPERATOR: &str = "operator";
/// Threshold value.
const FIELD_VALUE: &str = "value";
/// Warm-up period.
const FIELD_WARM_UP: &str = "warm_up";
/// Cool-down period.
const FIELD_COOL_DOWN: &str = "cool_down";
/// Burn rate window type.
const FIELD_ALERT_WINDOW_TYPE: &str = "alert_window_type";
/// Burn rate window length.
const FIELD_DURATION: &str = "duration";
/// Burn rate window length unit.
const FIELD_DURATION_UNIT_TYPE: &str = "duration_unit_type";
/// Burn rate threshold operator.
const FIELD_THRESHOLD_OPERATOR: &str = "threshold_operator";
/// Burn rate threshold value.
const FIELD_THRESHOLD_VALUE: &str = "threshold_value";

/// Severity codes.
const SEVERITY_CODES: [i64; 2] = [5, 10];
/// Threshold kinds SLO alerts accept.
const THRESHOLD_TYPES: [&str; 1] = [THRESHOLD_TYPE_STATIC];

// ============================================================================
// SECTION: Alert Types
// ============================================================================

/// SLO alert kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SloAlertType {
    /// SLO status below target.
    Status,
    /// Share of the error budget consumed.
    ErrorBudget,
    /// Burn rate over configured windows.
    BurnRateV2,
}

impl SloAlertType {
    /// All kinds.
    pub const ALL: [Self; 3] = [Self::Status, Self::ErrorBudget, Self::BurnRateV2];

    /// State terms.
    pub const TERMS: [&'static str; 3] = ["status", "error_budget", "burn_rate_v2"];

    /// State term.
    #[must_use]
    pub const fn term(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::ErrorBudget => "error_budget",
            Self::BurnRateV2 => "burn_rate_v2",
        }
    }

    /// Wire `alertType` and `metric`.
    #[must_use]
    pub const fn wire(self) -> (&'static str, &'static str) {
        match self {
            Self::Status => ("SERVICE_LEVELS_OBJECTIVE", "STATUS"),
            Self::ErrorBudget => ("ERROR_BUDGET", "BURNED_PERCENTAGE"),
            Self::BurnRateV2 => ("ERROR_BUDGET", "BURN_RATE_V2"),
        }
    }

    /// Resolves a state term.
    #[must_use]
    pub fn from_term(term: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.term() == term)
    }

    /// Resolves a wire rule.
    #[must_use]
    pub fn from_rule(rule: &SloAlertRule) -> Option<Self> {
        let wire = (rule.alert_type.as_str(), rule.metric.as_str());
        Self::ALL.into_iter().find(|kind| kind.wire() == wire)
    }
}

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Resource schema.
fn schema() -> Schema {
    Schema::new(
        "SLO alert configuration",
        vec![
            id_attribute(),
            name_attribute(MAX_NAME_LENGTH),
            description_attribute(),
            Attribute::int(FIELD_SEVERITY)
                .required()
                .validate(Validator::IntOneOf(&SEVERITY_CODES)),
            flag(FIELD_TRIGGERING, false),
            flag(FIELD_ENABLED, true),
            Attribute::string(FIELD_ALERT_TYPE)
                .required()
                .validate(Validator::OneOf(&SloAlertType::TERMS)),
            Attribute::block(
                FIELD_THRESHOLD,
                vec![
                    Attribute::string(FIELD_TYPE)
                        .default_value(THRESHOLD_TYPE_STATIC)
                        .validate(Validator::OneOf(&THRESHOLD_TYPES)),
                    Attribute::string(FIELD_OPERATOR)
                        .required()
                        .validate(Validator::OneOf(&SERVICE_LEVEL_THRESHOLD_OPERATORS)),
                    Attribute::float(FIELD_VALUE)
                        .required()
                        .validate(Validator::FloatGreaterThan(0.0)),
                ],
            ),
            Attribute::new(FIELD_SLO_IDS, AttributeType::string_set()).required(),
            alert_channel_ids_attribute(),
            Attribute::block(
                FIELD_TIME_THRESHOLD,
                vec![
                    Attribute::int(FIELD_WARM_UP)
                        .required()
                        .validate(Validator::IntBetween(1, i64::MAX)),
                    Attribute::int(FIELD_COOL_DOWN)
                        .required()
                        .validate(Validator::IntBetween(1, i64::MAX)),
                ],
            )
            .required(),
            Attribute::block_list(
                FIELD_BURN_RATE_CONFIG,
                vec![
                    Attribute::string(FIELD_ALERT_WINDOW_TYPE).required(),
                    Attribute::int(FIELD_DURATION).required(),
                    Attribute::string(FIELD_DURATION_UNIT_TYPE).required(),
                    Attribute::string(FIELD_THRESHOLD_OPERATOR)
                        .required()
                        .validate(Validator::OneOf(&SERVICE_LEVEL_THRESHOLD_OPERATORS)),
                    Attribute::float(FIELD_THRESHOLD_VALUE).required(),
                ],
            ),
            custom_payload_attribute(),
        ],
    )
}

// ============================================================================
// SECTION: Handle
// ============================================================================

/// Handle for SLO alert configs.
#[derive(Debug)]
pub struct SloAlertConfigHandle {
    /// Static description.
    metadata: ResourceMetadata,
}

impl SloAlertConfigHandle {
    /// Builds the handle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: ResourceMetadata::new(RESOURCE_NAME, schema(), SCHEMA_VERSION)
                .with_upgraders(vec![StateUpgrader::new(0, identity)]),
        }
    }
}

impl Default for SloAlertConfigHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceHandle for SloAlertConfigHandle {
    type Payload = SloAlertConfig;

    fn metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }

    fn rest_resource(&self, api: &InstanaApi) -> RestResource<SloAlertConfig> {
        api.slo_alert_configs()
    }

    fn state_to_payload(&self, state: &StateValue) -> Result<SloAlertConfig, Diagnostics> {
        config_from_state(&ObjectReader::root(state))
    }

    fn payload_to_state(
        &self,
        payload: &SloAlertConfig,
        _prior: &StateValue,
    ) -> Result<StateValue, Diagnostics> {
        config_to_state(payload).map_err(Diagnostics::from)
    }
}

// ============================================================================
// SECTION: State To Payload
// ============================================================================

/// Maps a resource object to the payload.
fn config_from_state(reader: &ObjectReader<'_>) -> Result<SloAlertConfig, Diagnostics> {
    let mut diagnostics = Diagnostics::new();
    let alert_type = diagnostics.collect(alert_type_from_state(reader));
    let (wire_type, metric) = alert_type.map_or(("", ""), SloAlertType::wire);
    let (threshold, burn_rate_config) = match alert_type {
        Some(SloAlertType::BurnRateV2) => {
            (None, diagnostics.collect(burn_rates_from_state(reader)))
        }
        Some(_) => (diagnostics.take(threshold_from_state(reader)), None),
        None => (None, None),
    };
    let config = SloAlertConfig {
        id: diagnostics.take(id_from_state(reader)),
        name: diagnostics.take(reader.required_string(FIELD_NAME)),
        description: diagnostics.take(reader.string_or(FIELD_DESCRIPTION, "")),
        severity: diagnostics.take(reader.required_i64(FIELD_SEVERITY)),
        triggering: diagnostics.take(reader.bool_or(FIELD_TRIGGERING, false)),
        enabled: diagnostics.take(reader.bool_or(FIELD_ENABLED, true)),
        rule: SloAlertRule {
            alert_type: wire_type.to_string(),
            metric: metric.to_string(),
        },
        threshold,
        time_threshold: diagnostics.take(time_threshold_from_state(reader)),
        slo_ids: diagnostics.take(reader.string_list(FIELD_SLO_IDS)),
        alert_channel_ids: diagnostics.take(reader.string_list(FIELD_ALERT_CHANNEL_IDS)),
        custom_payload_fields: diagnostics
            .take(custom_payload_from_state(reader, CUSTOM_PAYLOAD_FIELD)),
        burn_rate_config,
    };
    diagnostics.finish(config)
}

/// Resolves the alert type term.
fn alert_type_from_state(reader: &ObjectReader<'_>) -> Result<SloAlertType, MappingError> {
    let term = reader.required_string(FIELD_ALERT_TYPE)?;
    SloAlertType::from_term(&term).ok_or_else(|| {
        let path = reader.field_path(FIELD_ALERT_TYPE);
        MappingError::invalid(&path, format!("unsupported alert type {term}"))
    })
}

/// Maps the warm-up and cool-down window.
fn time_threshold_from_state(
    reader: &ObjectReader<'_>,
) -> Result<SloAlertTimeThreshold, MappingError> {
    let time_threshold = reader.required_object(FIELD_TIME_THRESHOLD)?;
    let time_threshold_path = reader.field_path(FIELD_TIME_THRESHOLD);
    let time_threshold = ObjectReader::new(&time_threshold, &time_threshold_path);
    Ok(SloAlertTimeThreshold {
        time_window: time_threshold.required_i64(FIELD_WARM_UP)?,
        expiry: time_threshold.required_i64(FIELD_COOL_DOWN)?,
    })
}

/// Maps the static threshold block; absent reads as `None`.
fn threshold_from_state(
    reader: &ObjectReader<'_>,
) -> Result<Option<SloAlertThreshold>, MappingError> {
    let Some(block) = reader.object(FIELD_THRESHOLD)? else {
        return Ok(None);
    };
    let path = reader.field_path(FIELD_THRESHOLD);
    let threshold = ObjectReader::new(&block, &path);
    Ok(Some(SloAlertThreshold {
        kind: threshold.string_or(FIELD_TYPE, THRESHOLD_TYPE_STATIC)?,
        operator: threshold.required_string(FIELD_OPERATOR)?,
        value: threshold.required_f64(FIELD_VALUE)?,
    }))
}

/// Maps the burn rate windows; at least one is required.
fn burn_rates_from_state(reader: &ObjectReader<'_>) -> Result<Vec<BurnRateConfig>, MappingError> {
    let entries = reader.objects(FIELD_BURN_RATE_CONFIG)?;
    if entries.is_empty() {
        let path = reader.field_path(FIELD_BURN_RATE_CONFIG);
        return Err(MappingError::invalid(
            &path,
            format!("{path} must contain at least one entry for burn_rate_v2 alerts"),
        ));
    }
    entries
        .into_iter()
        .map(|(path, value)| {
            let entry = ObjectReader::new(value, &path);
            Ok(BurnRateConfig {
                alert_window_type: entry.required_string(FIELD_ALERT_WINDOW_TYPE)?,
                duration: entry.required_i64(FIELD_DURATION)?,
                duration_unit_type: entry.required_string(FIELD_DURATION_UNIT_TYPE)?,
                threshold: StaticThresholdConfig {
                    operator: entry.required_string(FIELD_THRESHOLD_OPERATOR)?,
                    value: entry.required_f64(FIELD_THRESHOLD_VALUE)?,
                },
            })
        })
        .collect()
}

// ============================================================================
// SECTION: Payload To State
// ============================================================================

/// Maps the payload to a resource object.
fn config_to_state(config: &SloAlertConfig) -> Result<StateValue, MappingError> {
    let alert_type = SloAlertType::from_rule(&config.rule).ok_or_else(|| {
        MappingError::UnsupportedEntityType {
            kind: format!("{}/{}", config.rule.alert_type, config.rule.metric),
        }
    })?;
    let threshold = config
        .threshold
        .as_ref()
        .filter(|_| alert_type != SloAlertType::BurnRateV2)
        .map(|threshold| {
            StateValue::object()
                .with(FIELD_TYPE, &threshold.kind)
                .with(FIELD_OPERATOR, &threshold.operator)
                .with(FIELD_VALUE, threshold.value)
        });
    let burn_rates = config
        .burn_rate_config
        .iter()
        .flatten()
        .map(|burn_rate| {
            StateValue::object()
                .with(FIELD_ALERT_WINDOW_TYPE, &burn_rate.alert_window_type)
                .with(FIELD_DURATION, burn_rate.duration)
                .with(FIELD_DURATION_UNIT_TYPE, &burn_rate.duration_unit_type)
                .with(FIELD_THRESHOLD_OPERATOR, &burn_rate.threshold.operator)
                .with(FIELD_THRESHOLD_VALUE, burn_rate.threshold.value)
        })
        .collect();
    Ok(StateValue::object()
        .with(FIELD_ID, &config.id)
        .with(FIELD_NAME, &config.name)
        .with(FIELD_DESCRIPTION, non_empty(&config.description))
        .with(FIELD_SEVERITY, config.severity)
        .with(FIELD_TRIGGERING, config.triggering)
        .with(FIELD_ENABLED, config.enabled)
        .with(FIELD_ALERT_TYPE, alert_type.term())
        .with(FIELD_THRESHOLD, threshold)
        .with(FIELD_SLO_IDS, StateValue::string_set(config.slo_ids.iter().cloned()))
        .with(FIELD_ALERT_CHANNEL_IDS, StateValue::string_set_or_null(&config.alert_channel_ids))
        .with(
            FIELD_TIME_THRESHOLD,
            StateValue::object()
                .with(FIELD_WARM_UP, config.time_threshold.time_window)
                .with(FIELD_COOL_DOWN, config.time_threshold.expiry),
        )
        .with(FIELD_BURN_RATE_CONFIG, StateValue::list_or_null(burn_rates))
        .with(CUSTOM_PAYLOAD_FIELD, custom_payload_to_state(&config.custom_payload_fields)))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
