// crates/instana-resources/src/sli.rs
// ============================================================================
// Module: SLI Config Handle
// Description: Service level indicator definitions.
// Purpose: Map the entity union onto the flat `sliEntity` wire object.
// Dependencies: instana-core, instana-restapi
// ============================================================================

//! ## Overview
//! SLI configs cannot be updated in place; the handle is create-only so any
//! change recreates the record. The entity is a union in state and a flat
//! object discriminated by `sliType` on the wire.

use instana_core::Attribute;
use instana_core::AttributePath;
use instana_core::Diagnostics;
use instana_core::MappingError;
use instana_core::ObjectReader;
use instana_core::ResourceHandle;
use instana_core::ResourceMetadata;
use instana_core::Schema;
use instana_core::StateValue;
use instana_core::Validator;
use instana_core::mappers::select_variant;
use instana_core::mappers::tag_filter_from_state;
use instana_core::mappers::tag_filter_to_state;
use instana_core::mappers::variant_state;
use instana_restapi::InstanaApi;
use instana_restapi::RestResource;
use instana_restapi::models::sli::MetricConfiguration;
use instana_restapi::models::sli::SLI_TYPE_APPLICATION;
use instana_restapi::models::sli::SLI_TYPE_AVAILABILITY;
use instana_restapi::models::sli::SLI_TYPE_WEBSITE_EVENT_BASED;
use instana_restapi::models::sli::SLI_TYPE_WEBSITE_TIME_BASED;
use instana_restapi::models::sli::SliConfig;
use instana_restapi::models::sli::SliEntity;
use instana_tagfilter::TagFilter;

use crate::common::AGGREGATIONS;
use crate::common::FIELD_AGGREGATION;
use crate::common::FIELD_ID;
use crate::common::FIELD_METRIC_NAME;
use crate::common::FIELD_NAME;
use crate::common::FIELD_THRESHOLD;
use crate::common::MAX_NAME_LENGTH;
use crate::common::flag;
use crate::common::id_attribute;
use crate::common::id_from_state;
use crate::common::name_attribute;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Host resource name.
pub const RESOURCE_NAME: &str = "instana_sli_config";
/// Current schema version.
const SCHEMA_VERSION: i64 = 1;

/// First evaluation timestamp.
pub const FIELD_INITIAL_EVALUATION_TIMESTAMP: &str = "initial_evaluation_timestamp";
/// Metric configuration block.
pub const FIELD_METRIC_CONFIGURATION: &str = "metric_configuration";
/// Entity union.
pub const FIELD_SLI_ENTITY: &str = "sli_entity";
/// Application id of application entities.
const FIELD_APPLICATION_ID: &str = "application_id";
/// Service id of application entities.
const FIELD_SERVICE_ID: &str = "service_id";
/// Endpoint id of application entities.
const FIELD_ENDPOINT_ID: &str = "endpoint_id";
/// Boundary scope of application entities.
const FIELD_BOUNDARY_SCOPE: &str = "boundary_scope";
/// Website id of website entities.
const FIELD_WEBSITE_ID: &str = "website_id";
/// Beacon type of website entities.
const FIELD_BEACON_TYPE: &str = "beacon_type";
/// Filter selecting good events.
const FIELD_GOOD_EVENT_FILTER: &str = "good_event_filter_expression";
/// Filter selecting bad events.
const FIELD_BAD_EVENT_FILTER: &str = "bad_event_filter_expression";
/// Filter of time based website entities.
const FIELD_FILTER_EXPRESSION: &str = "filter_expression";
/// Includes internal calls.
const FIELD_INCLUDE_INTERNAL: &str = "include_internal";
/// Includes synthetic calls.
const FIELD_INCLUDE_SYNTHETIC: &str = "include_synthetic";

/// Boundary scopes SLI entities accept.
const SLI_BOUNDARY_SCOPES: [&str; 2] = ["ALL", "INBOUND"];

/// Website beacon types.
pub const BEACON_TYPES: [&str; 6] =
    ["pageLoad", "resourceLoad", "httpRequest", "error", "custom", "pageChange"];

// ============================================================================
// SECTION: Entity Kinds
// ============================================================================

/// Entity union slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliEntityKind {
    /// Application latency measured over time.
    ApplicationTimeBased,
    /// Application availability from good and bad calls.
    ApplicationEventBased,
    /// Website beacons counted as good or bad.
    WebsiteEventBased,
    /// Website beacons measured over time.
    WebsiteTimeBased,
}

impl SliEntityKind {
    /// All slots in declaration order.
    pub const ALL: [Self; 4] = [
        Self::ApplicationTimeBased,
        Self::ApplicationEventBased,
        Self::WebsiteEventBased,
        Self::WebsiteTimeBased,
    ];

    /// Slot names in declaration order.
    pub const FIELDS: [&'static str; 4] = [
        "application_time_based",
        "application_event_based",
        "website_event_based",
        "website_time_based",
    ];

    /// State slot name.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::ApplicationTimeBased => "application_time_based",
            Self::ApplicationEventBased => "application_event_based",
            Self::WebsiteEventBased => "website_event_based",
            Self::WebsiteTimeBased => "website_time_based",
        }
    }

    /// Wire `sliType`.
    #[must_use]
    pub const fn sli_type(self) -> &'static str {
        match self {
            Self::ApplicationTimeBased => SLI_TYPE_APPLICATION,
            Self::ApplicationEventBased => SLI_TYPE_AVAILABILITY,
            Self::WebsiteEventBased => SLI_TYPE_WEBSITE_EVENT_BASED,
            Self::WebsiteTimeBased => SLI_TYPE_WEBSITE_TIME_BASED,
        }
    }

    /// Resolves a slot name.
    #[must_use]
    pub fn from_field(field: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.field() == field)
    }

    /// Resolves a wire `sliType`.
    #[must_use]
    pub fn from_sli_type(sli_type: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.sli_type() == sli_type)
    }

    /// Attributes of the slot block.
    fn attributes(self) -> Vec<Attribute> {
        let boundary_scope = || {
            Attribute::string(FIELD_BOUNDARY_SCOPE)
                .required()
                .validate(Validator::OneOf(&SLI_BOUNDARY_SCOPES))
        };
        let beacon_type = || {
            Attribute::string(FIELD_BEACON_TYPE)
                .required()
                .validate(Validator::OneOf(&BEACON_TYPES))
        };
        match self {
            Self::ApplicationTimeBased => vec![
                Attribute::string(FIELD_APPLICATION_ID).required(),
                Attribute::string(FIELD_SERVICE_ID),
                Attribute::string(FIELD_ENDPOINT_ID),
                boundary_scope(),
            ],
            Self::ApplicationEventBased => vec![
                Attribute::string(FIELD_APPLICATION_ID).required(),
                boundary_scope(),
                Attribute::string(FIELD_BAD_EVENT_FILTER).required(),
                Attribute::string(FIELD_GOOD_EVENT_FILTER).required(),
                flag(FIELD_INCLUDE_INTERNAL, false),
                flag(FIELD_INCLUDE_SYNTHETIC, false),
            ],
            Self::WebsiteEventBased => vec![
                Attribute::string(FIELD_WEBSITE_ID).required(),
                Attribute::string(FIELD_BAD_EVENT_FILTER).required(),
                Attribute::string(FIELD_GOOD_EVENT_FILTER).required(),
                beacon_type(),
            ],
            Self::WebsiteTimeBased => vec![
                Attribute::string(FIELD_WEBSITE_ID).required(),
                Attribute::string(FIELD_FILTER_EXPRESSION),
                beacon_type(),
            ],
        }
    }
}

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Resource schema.
fn schema() -> Schema {
    Schema::new(
        "Service level indicator configuration",
        vec![
            id_attribute(),
            name_attribute(MAX_NAME_LENGTH),
            Attribute::int(FIELD_INITIAL_EVALUATION_TIMESTAMP).default_value(0_i64),
            Attribute::block(
                FIELD_METRIC_CONFIGURATION,
                vec![
                    Attribute::string(FIELD_METRIC_NAME).required(),
                    Attribute::string(FIELD_AGGREGATION)
                        .required()
                        .validate(Validator::OneOf(&AGGREGATIONS)),
                    Attribute::float(FIELD_THRESHOLD)
                        .required()
                        .validate(Validator::FloatGreaterThan(0.0)),
                ],
            ),
            Attribute::block(
                FIELD_SLI_ENTITY,
                SliEntityKind::ALL
                    .into_iter()
                    .map(|kind| Attribute::block(kind.field(), kind.attributes()))
                    .collect(),
            )
            .required()
            .describe("The entity the indicator measures"),
        ],
    )
}

// ============================================================================
// SECTION: Handle
// ============================================================================

/// Handle for SLI configs.
#[derive(Debug)]
pub struct SliConfigHandle {
    /// Static description.
    metadata: ResourceMetadata,
}

impl SliConfigHandle {
    /// Builds the handle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: ResourceMetadata::new(RESOURCE_NAME, schema(), SCHEMA_VERSION).create_only(),
        }
    }
}

impl Default for SliConfigHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceHandle for SliConfigHandle {
    type Payload = SliConfig;

    fn metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }

    fn rest_resource(&self, api: &InstanaApi) -> RestResource<SliConfig> {
        api.sli_configs()
    }

    fn state_to_payload(&self, state: &StateValue) -> Result<SliConfig, Diagnostics> {
        config_from_state(&ObjectReader::root(state))
    }

    fn payload_to_state(
        &self,
        payload: &SliConfig,
        _prior: &StateValue,
    ) -> Result<StateValue, Diagnostics> {
        config_to_state(payload).map_err(Diagnostics::from)
    }
}

// ============================================================================
// SECTION: State To Payload
// ============================================================================

/// Maps a resource object to the payload.
fn config_from_state(reader: &ObjectReader<'_>) -> Result<SliConfig, Diagnostics> {
    let mut diagnostics = Diagnostics::new();
    let config = SliConfig {
        id: diagnostics.take(id_from_state(reader)),
        sli_name: diagnostics.take(reader.required_string(FIELD_NAME)),
        initial_evaluation_timestamp: diagnostics
            .collect(reader.i64_or(FIELD_INITIAL_EVALUATION_TIMESTAMP, 0)),
        metric_configuration: diagnostics.take(metric_configuration_from_state(reader)),
        sli_entity: diagnostics.take(selected_entity_from_state(reader)),
    };
    diagnostics.finish(config)
}

/// Maps the optional metric block.
fn metric_configuration_from_state(
    reader: &ObjectReader<'_>,
) -> Result<Option<MetricConfiguration>, MappingError> {
    let Some(block) = reader.object(FIELD_METRIC_CONFIGURATION)? else {
        return Ok(None);
    };
    let path = reader.field_path(FIELD_METRIC_CONFIGURATION);
    let metric = ObjectReader::new(&block, &path);
    Ok(Some(MetricConfiguration {
        metric_name: metric.required_string(FIELD_METRIC_NAME)?,
        metric_aggregation: metric.required_string(FIELD_AGGREGATION)?,
        threshold: metric.required_f64(FIELD_THRESHOLD)?,
    }))
}

/// Maps the single populated entity slot.
fn selected_entity_from_state(reader: &ObjectReader<'_>) -> Result<SliEntity, MappingError> {
    let entity = reader.required_object(FIELD_SLI_ENTITY)?;
    let entity_path = reader.field_path(FIELD_SLI_ENTITY);
    let entity = ObjectReader::new(&entity, &entity_path);
    let selected = select_variant(&entity, &SliEntityKind::FIELDS, FIELD_SLI_ENTITY)?;
    let kind = SliEntityKind::from_field(selected.name).ok_or_else(|| {
        MappingError::invalid(&selected.path, format!("unsupported entity {}", selected.name))
    })?;
    entity_from_state(kind, &selected.reader())
}

/// Maps the selected entity slot to the flat wire entity.
fn entity_from_state(
    kind: SliEntityKind,
    slot: &ObjectReader<'_>,
) -> Result<SliEntity, MappingError> {
    let mut entity = SliEntity {
        sli_type: kind.sli_type().to_string(),
        ..SliEntity::default()
    };
    match kind {
        SliEntityKind::ApplicationTimeBased => {
            entity.application_id = Some(slot.required_string(FIELD_APPLICATION_ID)?);
            entity.service_id = slot.optional_string(FIELD_SERVICE_ID)?;
            entity.endpoint_id = slot.optional_string(FIELD_ENDPOINT_ID)?;
            entity.boundary_scope = Some(slot.required_string(FIELD_BOUNDARY_SCOPE)?);
        }
        SliEntityKind::ApplicationEventBased => {
            entity.application_id = Some(slot.required_string(FIELD_APPLICATION_ID)?);
            entity.boundary_scope = Some(slot.required_string(FIELD_BOUNDARY_SCOPE)?);
            entity.bad_event_filter_expression =
                tag_filter_from_state(slot, FIELD_BAD_EVENT_FILTER)?;
            entity.good_event_filter_expression =
                tag_filter_from_state(slot, FIELD_GOOD_EVENT_FILTER)?;
            entity.include_internal = Some(slot.bool_or(FIELD_INCLUDE_INTERNAL, false)?);
            entity.include_synthetic = Some(slot.bool_or(FIELD_INCLUDE_SYNTHETIC, false)?);
        }
        SliEntityKind::WebsiteEventBased => {
            entity.website_id = Some(slot.required_string(FIELD_WEBSITE_ID)?);
            entity.bad_event_filter_expression =
                tag_filter_from_state(slot, FIELD_BAD_EVENT_FILTER)?;
            entity.good_event_filter_expression =
                tag_filter_from_state(slot, FIELD_GOOD_EVENT_FILTER)?;
            entity.beacon_type = Some(slot.required_string(FIELD_BEACON_TYPE)?);
        }
        SliEntityKind::WebsiteTimeBased => {
            entity.website_id = Some(slot.required_string(FIELD_WEBSITE_ID)?);
            entity.filter_expression = tag_filter_from_state(slot, FIELD_FILTER_EXPRESSION)?;
            entity.beacon_type = Some(slot.required_string(FIELD_BEACON_TYPE)?);
        }
    }
    Ok(entity)
}

// ============================================================================
// SECTION: Payload To State
// ============================================================================

/// Maps the payload to a resource object.
fn config_to_state(config: &SliConfig) -> Result<StateValue, MappingError> {
    let entity = &config.sli_entity;
    let kind = SliEntityKind::from_sli_type(&entity.sli_type).ok_or_else(|| {
        MappingError::UnsupportedEntityType {
            kind: entity.sli_type.clone(),
        }
    })?;
    let slot_path = AttributePath::attribute(FIELD_SLI_ENTITY).child(kind.field());
    let filter = |value: Option<&TagFilter>, name: &str| {
        tag_filter_to_state(value, &slot_path.child(name))
    };
    let slot = match kind {
        SliEntityKind::ApplicationTimeBased => StateValue::object()
            .with(FIELD_APPLICATION_ID, entity.application_id.clone())
            .with(FIELD_SERVICE_ID, entity.service_id.clone())
            .with(FIELD_ENDPOINT_ID, entity.endpoint_id.clone())
            .with(FIELD_BOUNDARY_SCOPE, entity.boundary_scope.clone()),
        SliEntityKind::ApplicationEventBased => StateValue::object()
            .with(FIELD_APPLICATION_ID, entity.application_id.clone())
            .with(FIELD_BOUNDARY_SCOPE, entity.boundary_scope.clone())
            .with(
                FIELD_BAD_EVENT_FILTER,
                filter(entity.bad_event_filter_expression.as_ref(), FIELD_BAD_EVENT_FILTER)?,
            )
            .with(
                FIELD_GOOD_EVENT_FILTER,
                filter(entity.good_event_filter_expression.as_ref(), FIELD_GOOD_EVENT_FILTER)?,
            )
            .with(FIELD_INCLUDE_INTERNAL, entity.include_internal.unwrap_or(false))
            .with(FIELD_INCLUDE_SYNTHETIC, entity.include_synthetic.unwrap_or(false)),
        SliEntityKind::WebsiteEventBased => StateValue::object()
            .with(FIELD_WEBSITE_ID, entity.website_id.clone())
            .with(
                FIELD_BAD_EVENT_FILTER,
                filter(entity.bad_event_filter_expression.as_ref(), FIELD_BAD_EVENT_FILTER)?,
            )
            .with(
                FIELD_GOOD_EVENT_FILTER,
                filter(entity.good_event_filter_expression.as_ref(), FIELD_GOOD_EVENT_FILTER)?,
            )
            .with(FIELD_BEACON_TYPE, entity.beacon_type.clone()),
        SliEntityKind::WebsiteTimeBased => StateValue::object()
            .with(FIELD_WEBSITE_ID, entity.website_id.clone())
            .with(
                FIELD_FILTER_EXPRESSION,
                filter(entity.filter_expression.as_ref(), FIELD_FILTER_EXPRESSION)?,
            )
            .with(FIELD_BEACON_TYPE, entity.beacon_type.clone()),
    };
    let metric_configuration = config.metric_configuration.as_ref().map(|metric| {
        StateValue::object()
            .with(FIELD_METRIC_NAME, &metric.metric_name)
            .with(FIELD_AGGREGATION, &metric.metric_aggregation)
            .with(FIELD_THRESHOLD, metric.threshold)
    });
    Ok(StateValue::object()
        .with(FIELD_ID, &config.id)
        .with(FIELD_NAME, &config.sli_name)
        .with(FIELD_INITIAL_EVALUATION_TIMESTAMP, config.initial_evaluation_timestamp.unwrap_or(0))
        .with(FIELD_METRIC_CONFIGURATION, metric_configuration)
        .with(FIELD_SLI_ENTITY, variant_state(&SliEntityKind::FIELDS, kind.field(), slot)))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
