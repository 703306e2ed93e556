// crates/instana-restapi/src/models/slo.rs
// ============================================================================
// Module: SLO Config Payloads
// Description: Service level objective definitions.
// Purpose: Model SLO entity, indicator, and time window objects.
// Dependencies: instana-tagfilter, serde
// ============================================================================

//! ## Overview
//! Entity, indicator and time window are flat objects discriminated by their
//! `type` field (and `blueprint` for indicators). Fields that do not apply to
//! the selected kind stay absent.

use instana_tagfilter::TagFilter;
use serde::Deserialize;
use serde::Serialize;

use crate::resource::InstanaDataObject;

// ============================================================================
// SECTION: Entity
// ============================================================================

/// Entity an objective is computed for.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SloEntity {
    /// `application`, `website`, or `synthetic`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Application id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    /// Service id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    /// Endpoint id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_id: Option<String>,
    /// Boundary scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary_scope: Option<String>,
    /// Whether synthetic calls are included.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_synthetic: Option<bool>,
    /// Whether internal calls are included.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_internal: Option<bool>,
    /// Entity filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_filter_expression: Option<TagFilter>,
    /// Website id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_id: Option<String>,
    /// Beacon type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beacon_type: Option<String>,
    /// Synthetic test ids.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synthetic_test_ids: Vec<String>,
}

// ============================================================================
// SECTION: Indicator
// ============================================================================

/// Indicator measured against the objective.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SloIndicator {
    /// `timeBased` or `eventBased`.
    #[serde(rename = "type")]
    pub kind: String,
    /// `latency`, `availability`, `traffic`, or `custom`.
    pub blueprint: String,
    /// Indicator threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    /// Metric aggregation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<String>,
    /// Threshold operator for traffic indicators.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    /// Traffic type for traffic indicators.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traffic_type: Option<String>,
    /// Filter selecting good events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub good_events_filter: Option<TagFilter>,
    /// Filter selecting bad events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bad_events_filter: Option<TagFilter>,
}

// ============================================================================
// SECTION: Time Window
// ============================================================================

/// Window the objective is evaluated over.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SloTimeWindow {
    /// `rolling` or `fixed`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Window length in `duration_unit`s.
    pub duration: i64,
    /// Unit of `duration`.
    pub duration_unit: String,
    /// Timezone of the window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Start of a fixed window in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_timestamp: Option<f64>,
}

// ============================================================================
// SECTION: Config
// ============================================================================

/// SLO configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SloConfig {
    /// Backend id.
    #[serde(default)]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Objective target in (0, 1).
    pub target: f64,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Measured entity.
    pub entity: SloEntity,
    /// Indicator.
    pub indicator: SloIndicator,
    /// Evaluation window.
    pub time_window: SloTimeWindow,
}

impl InstanaDataObject for SloConfig {
    fn id(&self) -> &str {
        &self.id
    }
}
