// crates/instana-resources/src/slo.rs
// ============================================================================
// Module: SLO Config Handle
// Description: Service level objectives over applications, websites, and tests.
// Purpose: Map the entity, indicator, and time window unions.
// Dependencies: instana-core, instana-restapi, tracing
// ============================================================================

//! ## Overview
//! An SLO combines three unions. The entity and time window are discriminated
//! by a wire `type`; the indicator by the pair of `type` (measurement) and
//! `blueprint`, except traffic indicators which only carry a blueprint.
//!
//! Identifiers are chosen locally with an `SLOTF` prefix before create.

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
use instana_core::id::random_id;
use instana_core::mappers::select_variant;
use instana_core::mappers::tag_filter_from_state;
use instana_core::mappers::tag_filter_to_state;
use instana_core::mappers::variant_state;
use instana_restapi::InstanaApi;
use instana_restapi::RestResource;
use instana_restapi::models::slo::SloConfig;
use instana_restapi::models::slo::SloEntity;
use instana_restapi::models::slo::SloIndicator;
use instana_restapi::models::slo::SloTimeWindow;
use tracing::debug;

use crate::common::AGGREGATIONS;
use crate::common::FIELD_AGGREGATION;
use crate::common::FIELD_ID;
use crate::common::FIELD_NAME;
use crate::common::FIELD_THRESHOLD;
use crate::common::MAX_NAME_LENGTH;
use crate::common::flag;
use crate::common::id_attribute;
use crate::common::id_from_state;
use crate::common::name_attribute;
use crate::sli::BEACON_TYPES;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Host resource name.
pub const RESOURCE_NAME: &str = "instana_slo_config";
/// Current schema version.
const SCHEMA_VERSION: i64 = 1;
/// Prefix of locally assigned identifiers.
pub const ID_PREFIX: &str = "SLOTF";

/// Objective target ratio.
pub const FIELD_TARGET: &str = "target";
/// Free-form tags.
pub const FIELD_TAGS: &str = "tags";
/// Entity union.
pub const FIELD_ENTITY: &str = "entity";
/// Indicator union.
pub const FIELD_INDICATOR: &str = "indicator";
/// Time window union.
pub const FIELD_TIME_WINDOW: &str = "time_window";
/// Application id of application entities.
const FIELD_APPLICATION_ID: &str = "application_id";
/// Service id of application entities.
const FIELD_SERVICE_ID: &str = "service_id";
/// Endpoint id of application entities.
const FIELD_ENDPOINT_ID: &str = "endpoint_id";
/// Boundary scope of application entities.
const FIELD_BOUNDARY_SCOPE: &str = "boundary_scope";
/// Includes internal calls.
const FIELD_INCLUDE_INTERNAL: &str = "include_internal";
/// Includes synthetic calls.
const FIELD_INCLUDE_SYNTHETIC: &str = "include_synthetic";
/// Website id of website entities.
const FIELD_WEBSITE_ID: &str = "website_id";
/// Beacon type of website entities.
const FIELD_BEACON_TYPE: &str = "beacon_type";
/// Synthetic test ids of synthetic entities.
const FIELD_SYNTHETIC_TEST_IDS: &str = "synthetic_test_ids";
/// Entity filter expression.
const FIELD_FILTER_EXPRESSION: &str = "filter_expression";
/// Traffic type of traffic indicators.
const FIELD_TRAFFIC_TYPE: &str = "traffic_type";
/// Filter selecting good events.
const FIELD_GOOD_EVENT_FILTER: &str = "good_event_filter_expression";
/// Filter selecting bad events.
const FIELD_BAD_EVENT_FILTER: &str = "bad_event_filter_expression";
/// Window length.
const FIELD_DURATION: &str = "duration";
/// Window length unit.
const FIELD_DURATION_UNIT: &str = "duration_unit";
/// Window timezone.
const FIELD_TIMEZONE: &str = "timezone";
/// Start of a fixed window.
const FIELD_START_TIMESTAMP: &str = "start_timestamp";

/// Entity slots; each equals its wire `type`.
pub const ENTITY_FIELDS: [&str; 3] = ["application", "website", "synthetic"];
/// Time window slots; each equals its wire `type`.
pub const TIME_WINDOW_FIELDS: [&str; 2] = ["rolling", "fixed"];

/// Boundary scopes SLO entities accept.
const SLO_BOUNDARY_SCOPES: [&str; 2] = ["ALL", "INBOUND"];
/// Traffic types.
const TRAFFIC_TYPES: [&str; 2] = ["all", "erroneous"];
/// Window length units.
const DURATION_UNITS: [&str; 2] = ["day", "week"];

/// Time based measurement.
const MEASUREMENT_TIME_BASED: &str = "timeBased";
/// Event based measurement.
const MEASUREMENT_EVENT_BASED: &str = "eventBased";

// ============================================================================
// SECTION: Indicator Kinds
// ============================================================================

/// Indicator union slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorKind {
    /// Latency aggregated over time.
    TimeBasedLatency,
    /// Latency from individual events.
    EventBasedLatency,
    /// Availability aggregated over time.
    TimeBasedAvailability,
    /// Availability from individual events.
    EventBasedAvailability,
    /// Call volume.
    Traffic,
    /// Good and bad events selected by filters.
    Custom,
}

impl IndicatorKind {
    /// All slots in declaration order.
    pub const ALL: [Self; 6] = [
        Self::TimeBasedLatency,
        Self::EventBasedLatency,
        Self::TimeBasedAvailability,
        Self::EventBasedAvailability,
        Self::Traffic,
        Self::Custom,
    ];

    /// Slot names in declaration order.
    pub const FIELDS: [&'static str; 6] = [
        "time_based_latency",
        "event_based_latency",
        "time_based_availability",
        "event_based_availability",
        "traffic",
        "custom",
    ];

    /// State slot name.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::TimeBasedLatency => "time_based_latency",
            Self::EventBasedLatency => "event_based_latency",
            Self::TimeBasedAvailability => "time_based_availability",
            Self::EventBasedAvailability => "event_based_availability",
            Self::Traffic => "traffic",
            Self::Custom => "custom",
        }
    }

    /// Wire measurement `type`.
    #[must_use]
    pub const fn measurement(self) -> &'static str {
        match self {
            Self::TimeBasedLatency | Self::TimeBasedAvailability | Self::Traffic => {
                MEASUREMENT_TIME_BASED
            }
            Self::EventBasedLatency | Self::EventBasedAvailability | Self::Custom => {
                MEASUREMENT_EVENT_BASED
            }
        }
    }

    /// Wire `blueprint`.
    #[must_use]
    pub const fn blueprint(self) -> &'static str {
        match self {
            Self::TimeBasedLatency | Self::EventBasedLatency => "latency",
            Self::TimeBasedAvailability | Self::EventBasedAvailability => "availability",
            Self::Traffic => "traffic",
            Self::Custom => "custom",
        }
    }

    /// Resolves a slot name.
    #[must_use]
    pub fn from_field(field: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.field() == field)
    }

    /// Resolves the wire discriminators; traffic matches on blueprint alone.
    #[must_use]
    pub fn from_wire(measurement: &str, blueprint: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| {
            kind.blueprint() == blueprint
                && (*kind == Self::Traffic || kind.measurement() == measurement)
        })
    }

    /// Attributes of the slot block.
    fn attributes(self) -> Vec<Attribute> {
        let threshold = || {
            Attribute::float(FIELD_THRESHOLD).required().validate(Validator::FloatGreaterThan(0.0))
        };
        let aggregation = || {
            Attribute::string(FIELD_AGGREGATION)
                .required()
                .validate(Validator::OneOf(&AGGREGATIONS))
        };
        match self {
            Self::TimeBasedLatency | Self::TimeBasedAvailability => {
                vec![threshold(), aggregation()]
            }
            Self::EventBasedLatency => vec![threshold()],
            Self::EventBasedAvailability => Vec::new(),
            Self::Traffic => vec![
                Attribute::string(FIELD_TRAFFIC_TYPE)
                    .required()
                    .validate(Validator::OneOf(&TRAFFIC_TYPES)),
                threshold(),
                aggregation(),
            ],
            Self::Custom => vec![
                Attribute::string(FIELD_GOOD_EVENT_FILTER).required(),
                Attribute::string(FIELD_BAD_EVENT_FILTER),
            ],
        }
    }
}

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Entity union attribute.
fn entity_attribute() -> Attribute {
    let filter = || Attribute::string(FIELD_FILTER_EXPRESSION);
    Attribute::block(
        FIELD_ENTITY,
        vec![
            Attribute::block(
                "application",
                vec![
                    Attribute::string(FIELD_APPLICATION_ID).required(),
                    Attribute::string(FIELD_BOUNDARY_SCOPE)
                        .required()
                        .validate(Validator::OneOf(&SLO_BOUNDARY_SCOPES)),
                    filter(),
                    flag(FIELD_INCLUDE_INTERNAL, false),
                    flag(FIELD_INCLUDE_SYNTHETIC, false),
                    Attribute::string(FIELD_SERVICE_ID),
                    Attribute::string(FIELD_ENDPOINT_ID),
                ],
            ),
            Attribute::block(
                "website",
                vec![
                    Attribute::string(FIELD_WEBSITE_ID).required(),
                    filter(),
                    Attribute::string(FIELD_BEACON_TYPE)
                        .required()
                        .validate(Validator::OneOf(&BEACON_TYPES)),
                ],
            ),
            Attribute::block(
                "synthetic",
                vec![
                    Attribute::new(FIELD_SYNTHETIC_TEST_IDS, AttributeType::string_list())
                        .required()
                        .validate(Validator::SizeBetween(1, usize::MAX)),
                    filter(),
                ],
            ),
        ],
    )
    .required()
}

/// Time window union attribute.
fn time_window_attribute() -> Attribute {
    let common = || {
        vec![
            Attribute::int(FIELD_DURATION).required(),
            Attribute::string(FIELD_DURATION_UNIT)
                .required()
                .validate(Validator::OneOf(&DURATION_UNITS)),
            Attribute::string(FIELD_TIMEZONE),
        ]
    };
    let mut fixed = common();
    fixed.push(Attribute::float(FIELD_START_TIMESTAMP).required());
    Attribute::block(
        FIELD_TIME_WINDOW,
        vec![Attribute::block("rolling", common()), Attribute::block("fixed", fixed)],
    )
    .required()
}

/// Resource schema.
fn schema() -> Schema {
    Schema::new(
        "Service level objective configuration",
        vec![
            id_attribute(),
            name_attribute(MAX_NAME_LENGTH),
            Attribute::float(FIELD_TARGET)
                .required()
                .validate(Validator::FloatBetweenExclusive(0.0, 1.0)),
            Attribute::new(FIELD_TAGS, AttributeType::string_set()),
            entity_attribute(),
            Attribute::block(
                FIELD_INDICATOR,
                IndicatorKind::ALL
                    .into_iter()
                    .map(|kind| Attribute::block(kind.field(), kind.attributes()))
                    .collect(),
            )
            .required(),
            time_window_attribute(),
        ],
    )
}

// ============================================================================
// SECTION: Handle
// ============================================================================

/// Handle for SLO configs.
#[derive(Debug)]
pub struct SloConfigHandle {
    /// Static description.
    metadata: ResourceMetadata,
}

impl SloConfigHandle {
    /// Builds the handle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: ResourceMetadata::new(RESOURCE_NAME, schema(), SCHEMA_VERSION)
                .skip_id_generation(),
        }
    }
}

impl Default for SloConfigHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceHandle for SloConfigHandle {
    type Payload = SloConfig;

    fn metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }

    fn rest_resource(&self, api: &InstanaApi) -> RestResource<SloConfig> {
        api.slo_configs()
    }

    fn state_to_payload(&self, state: &StateValue) -> Result<SloConfig, Diagnostics> {
        config_from_state(&ObjectReader::root(state))
    }

    fn payload_to_state(
        &self,
        payload: &SloConfig,
        _prior: &StateValue,
    ) -> Result<StateValue, Diagnostics> {
        config_to_state(payload).map_err(Diagnostics::from)
    }

    fn prefill_computed(&self, plan: &mut StateValue) -> Result<(), Diagnostics> {
        let id = format!("{ID_PREFIX}{}", random_id());
        debug!(resource = RESOURCE_NAME, id = %id, "assigned slo id");
        plan.insert(FIELD_ID, id);
        Ok(())
    }
}

// ============================================================================
// SECTION: State To Payload
// ============================================================================

/// Maps a resource object to the payload.
fn config_from_state(reader: &ObjectReader<'_>) -> Result<SloConfig, Diagnostics> {
    let mut diagnostics = Diagnostics::new();
    let config = SloConfig {
        id: diagnostics.take(id_from_state(reader)),
        name: diagnostics.take(reader.required_string(FIELD_NAME)),
        target: diagnostics.take(reader.required_f64(FIELD_TARGET)),
        tags: diagnostics.take(reader.string_list(FIELD_TAGS)),
        entity: diagnostics.take(entity_from_state(reader)),
        indicator: diagnostics.take(indicator_from_state(reader)),
        time_window: diagnostics.take(time_window_from_state(reader)),
    };
    diagnostics.finish(config)
}

/// Maps the entity union.
fn entity_from_state(reader: &ObjectReader<'_>) -> Result<SloEntity, MappingError> {
    let block = reader.required_object(FIELD_ENTITY)?;
    let path = reader.field_path(FIELD_ENTITY);
    let selected = select_variant(&ObjectReader::new(&block, &path), &ENTITY_FIELDS, FIELD_ENTITY)?;
    let slot = selected.reader();
    let mut entity = SloEntity {
        kind: selected.name.to_string(),
        tag_filter_expression: tag_filter_from_state(&slot, FIELD_FILTER_EXPRESSION)?,
        ..SloEntity::default()
    };
    match selected.name {
        "application" => {
            entity.application_id = Some(slot.required_string(FIELD_APPLICATION_ID)?);
            entity.service_id = slot.optional_string(FIELD_SERVICE_ID)?;
            entity.endpoint_id = slot.optional_string(FIELD_ENDPOINT_ID)?;
            entity.boundary_scope = Some(slot.required_string(FIELD_BOUNDARY_SCOPE)?);
            entity.include_internal = Some(slot.bool_or(FIELD_INCLUDE_INTERNAL, false)?);
            entity.include_synthetic = Some(slot.bool_or(FIELD_INCLUDE_SYNTHETIC, false)?);
        }
        "website" => {
            entity.website_id = Some(slot.required_string(FIELD_WEBSITE_ID)?);
            entity.beacon_type = Some(slot.required_string(FIELD_BEACON_TYPE)?);
        }
        _ => {
            entity.synthetic_test_ids = slot.string_list(FIELD_SYNTHETIC_TEST_IDS)?;
            if entity.synthetic_test_ids.is_empty() {
                let path = slot.field_path(FIELD_SYNTHETIC_TEST_IDS);
                let message = format!("{path} must contain at least one test id");
                return Err(MappingError::invalid(&path, message));
            }
        }
    }
    Ok(entity)
}

/// Maps the indicator union.
fn indicator_from_state(reader: &ObjectReader<'_>) -> Result<SloIndicator, MappingError> {
    let block = reader.required_object(FIELD_INDICATOR)?;
    let path = reader.field_path(FIELD_INDICATOR);
    let selected =
        select_variant(&ObjectReader::new(&block, &path), &IndicatorKind::FIELDS, FIELD_INDICATOR)?;
    let kind = IndicatorKind::from_field(selected.name).ok_or_else(|| {
        MappingError::invalid(&selected.path, format!("unsupported indicator {}", selected.name))
    })?;
    let slot = selected.reader();
    let mut indicator = SloIndicator {
        kind: kind.measurement().to_string(),
        blueprint: kind.blueprint().to_string(),
        ..SloIndicator::default()
    };
    match kind {
        IndicatorKind::TimeBasedLatency | IndicatorKind::TimeBasedAvailability => {
            indicator.threshold = Some(slot.required_f64(FIELD_THRESHOLD)?);
            indicator.aggregation = Some(slot.required_string(FIELD_AGGREGATION)?);
        }
        IndicatorKind::EventBasedLatency => {
            indicator.threshold = Some(slot.required_f64(FIELD_THRESHOLD)?);
        }
        IndicatorKind::EventBasedAvailability => {}
        IndicatorKind::Traffic => {
            indicator.traffic_type = Some(slot.required_string(FIELD_TRAFFIC_TYPE)?);
            indicator.threshold = Some(slot.required_f64(FIELD_THRESHOLD)?);
            indicator.aggregation = Some(slot.required_string(FIELD_AGGREGATION)?);
        }
        IndicatorKind::Custom => {
            indicator.good_events_filter = tag_filter_from_state(&slot, FIELD_GOOD_EVENT_FILTER)?;
            indicator.bad_events_filter = tag_filter_from_state(&slot, FIELD_BAD_EVENT_FILTER)?;
        }
    }
    Ok(indicator)
}

/// Maps the time window union.
fn time_window_from_state(reader: &ObjectReader<'_>) -> Result<SloTimeWindow, MappingError> {
    let block = reader.required_object(FIELD_TIME_WINDOW)?;
    let path = reader.field_path(FIELD_TIME_WINDOW);
    let selected =
        select_variant(&ObjectReader::new(&block, &path), &TIME_WINDOW_FIELDS, FIELD_TIME_WINDOW)?;
    let slot = selected.reader();
    let start_timestamp = match selected.name {
        "fixed" => Some(slot.required_f64(FIELD_START_TIMESTAMP)?),
        _ => None,
    };
    Ok(SloTimeWindow {
        kind: selected.name.to_string(),
        duration: slot.required_i64(FIELD_DURATION)?,
        duration_unit: slot.required_string(FIELD_DURATION_UNIT)?,
        timezone: slot.optional_string(FIELD_TIMEZONE)?,
        start_timestamp,
    })
}

// ============================================================================
// SECTION: Payload To State
// ============================================================================

/// Maps the payload to a resource object.
fn config_to_state(config: &SloConfig) -> Result<StateValue, MappingError> {
    Ok(StateValue::object()
        .with(FIELD_ID, &config.id)
        .with(FIELD_NAME, &config.name)
        .with(FIELD_TARGET, config.target)
        .with(FIELD_TAGS, StateValue::string_set_or_null(&config.tags))
        .with(FIELD_ENTITY, entity_to_state(&config.entity)?)
        .with(FIELD_INDICATOR, indicator_to_state(&config.indicator)?)
        .with(FIELD_TIME_WINDOW, time_window_to_state(&config.time_window)?))
}

/// Maps the wire entity to its union slot.
fn entity_to_state(entity: &SloEntity) -> Result<StateValue, MappingError> {
    let field = ENTITY_FIELDS.into_iter().find(|field| *field == entity.kind).ok_or_else(|| {
        MappingError::UnsupportedEntityType {
            kind: entity.kind.clone(),
        }
    })?;
    let filter_path =
        AttributePath::attribute(FIELD_ENTITY).child(field).child(FIELD_FILTER_EXPRESSION);
    let filter = tag_filter_to_state(entity.tag_filter_expression.as_ref(), &filter_path)?;
    let slot = match field {
        "application" => StateValue::object()
            .with(FIELD_APPLICATION_ID, entity.application_id.clone())
            .with(FIELD_BOUNDARY_SCOPE, entity.boundary_scope.clone())
            .with(FIELD_FILTER_EXPRESSION, filter)
            .with(FIELD_INCLUDE_INTERNAL, entity.include_internal.unwrap_or(false))
            .with(FIELD_INCLUDE_SYNTHETIC, entity.include_synthetic.unwrap_or(false))
            .with(FIELD_SERVICE_ID, entity.service_id.clone())
            .with(FIELD_ENDPOINT_ID, entity.endpoint_id.clone()),
        "website" => StateValue::object()
            .with(FIELD_WEBSITE_ID, entity.website_id.clone())
            .with(FIELD_FILTER_EXPRESSION, filter)
            .with(FIELD_BEACON_TYPE, entity.beacon_type.clone()),
        _ => StateValue::object()
            .with(
                FIELD_SYNTHETIC_TEST_IDS,
                StateValue::string_list(entity.synthetic_test_ids.iter()),
            )
            .with(FIELD_FILTER_EXPRESSION, filter),
    };
    Ok(variant_state(&ENTITY_FIELDS, field, slot))
}

/// Maps the wire indicator to its union slot.
fn indicator_to_state(indicator: &SloIndicator) -> Result<StateValue, MappingError> {
    let kind = IndicatorKind::from_wire(&indicator.kind, &indicator.blueprint).ok_or_else(|| {
        MappingError::UnsupportedEntityType {
            kind: format!("{}/{}", indicator.kind, indicator.blueprint),
        }
    })?;
    let slot_path = AttributePath::attribute(FIELD_INDICATOR).child(kind.field());
    let slot = match kind {
        IndicatorKind::TimeBasedLatency | IndicatorKind::TimeBasedAvailability => {
            StateValue::object()
                .with(FIELD_THRESHOLD, indicator.threshold)
                .with(FIELD_AGGREGATION, indicator.aggregation.clone())
        }
        IndicatorKind::EventBasedLatency => {
            StateValue::object().with(FIELD_THRESHOLD, indicator.threshold)
        }
        IndicatorKind::EventBasedAvailability => StateValue::object(),
        IndicatorKind::Traffic => StateValue::object()
            .with(FIELD_TRAFFIC_TYPE, indicator.traffic_type.clone())
            .with(FIELD_THRESHOLD, indicator.threshold)
            .with(FIELD_AGGREGATION, indicator.aggregation.clone()),
        IndicatorKind::Custom => {
            let good_path = slot_path.child(FIELD_GOOD_EVENT_FILTER);
            let bad_path = slot_path.child(FIELD_BAD_EVENT_FILTER);
            StateValue::object()
                .with(
                    FIELD_GOOD_EVENT_FILTER,
                    tag_filter_to_state(indicator.good_events_filter.as_ref(), &good_path)?,
                )
                .with(
                    FIELD_BAD_EVENT_FILTER,
                    tag_filter_to_state(indicator.bad_events_filter.as_ref(), &bad_path)?,
                )
        }
    };
    Ok(variant_state(&IndicatorKind::FIELDS, kind.field(), slot))
}

/// Maps the wire time window to its union slot.
fn time_window_to_state(window: &SloTimeWindow) -> Result<StateValue, MappingError> {
    let field = TIME_WINDOW_FIELDS.into_iter().find(|field| *field == window.kind).ok_or_else(|| {
        MappingError::UnsupportedEntityType {
            kind: window.kind.clone(),
        }
    })?;
    let mut slot = StateValue::object()
        .with(FIELD_DURATION, window.duration)
        .with(FIELD_DURATION_UNIT, &window.duration_unit)
        .with(FIELD_TIMEZONE, window.timezone.clone());
    if field == "fixed" {
        slot.insert(FIELD_START_TIMESTAMP, window.start_timestamp);
    }
    Ok(variant_state(&TIME_WINDOW_FIELDS, field, slot))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
