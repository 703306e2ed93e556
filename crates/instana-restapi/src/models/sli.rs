// crates/instana-restapi/src/models/sli.rs
// ============================================================================
// Module: SLI Config Payloads
// Description: Service level indicator definitions.
// Purpose: Model SLI configs and their `sliType`-discriminated entity.
// Dependencies: instana-tagfilter, serde
// ============================================================================

//! ## Overview
//! The SLI entity is a flat object whose populated fields depend on
//! `sliType`. SLI configs cannot be updated; changes recreate the record.

use instana_tagfilter::TagFilter;
use serde::Deserialize;
use serde::Serialize;

use crate::resource::InstanaDataObject;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// `sliType` of application time based indicators.
pub const SLI_TYPE_APPLICATION: &str = "application";
/// `sliType` of application event based indicators.
pub const SLI_TYPE_AVAILABILITY: &str = "availability";
/// `sliType` of website event based indicators.
pub const SLI_TYPE_WEBSITE_EVENT_BASED: &str = "websiteEventBased";
/// `sliType` of website time based indicators.
pub const SLI_TYPE_WEBSITE_TIME_BASED: &str = "websiteTimeBased";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Metric evaluated by a time based indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricConfiguration {
    /// Metric name.
    pub metric_name: String,
    /// Metric aggregation.
    pub metric_aggregation: String,
    /// Threshold, strictly positive.
    pub threshold: f64,
}

/// Entity an indicator is computed for.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliEntity {
    /// Entity discriminator.
    pub sli_type: String,
    /// Application id for application entities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    /// Service id for application entities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    /// Endpoint id for application entities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_id: Option<String>,
    /// Boundary scope for application entities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary_scope: Option<String>,
    /// Website id for website entities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_id: Option<String>,
    /// Beacon type for website entities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beacon_type: Option<String>,
    /// Filter selecting good events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub good_event_filter_expression: Option<TagFilter>,
    /// Filter selecting bad events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bad_event_filter_expression: Option<TagFilter>,
    /// Filter for website time based entities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_expression: Option<TagFilter>,
    /// Whether internal calls are included.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_internal: Option<bool>,
    /// Whether synthetic calls are included.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_synthetic: Option<bool>,
}

/// SLI configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliConfig {
    /// Backend id.
    #[serde(default)]
    pub id: String,
    /// Display name.
    pub sli_name: String,
    /// First evaluation timestamp in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_evaluation_timestamp: Option<i64>,
    /// Metric for time based indicators.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_configuration: Option<MetricConfiguration>,
    /// Entity definition.
    pub sli_entity: SliEntity,
}

impl InstanaDataObject for SliConfig {
    fn id(&self) -> &str {
        &self.id
    }
}
