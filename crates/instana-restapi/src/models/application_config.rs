// crates/instana-restapi/src/models/application_config.rs
// ============================================================================
// Module: Application Perspective Payloads
// Description: Application perspectives defined by a tag filter.
// Purpose: Model application configs with scope and access rules.
// Dependencies: instana-tagfilter, serde
// ============================================================================

use instana_tagfilter::TagFilter;
use serde::Deserialize;
use serde::Serialize;

use crate::models::access_rule::AccessRule;
use crate::resource::InstanaDataObject;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Accepted `scope` values.
pub const APPLICATION_CONFIG_SCOPES: [&str; 3] = [
    "INCLUDE_NO_DOWNSTREAM",
    "INCLUDE_IMMEDIATE_DOWNSTREAM_DATABASE_AND_MESSAGING",
    "INCLUDE_ALL_DOWNSTREAM",
];

/// Accepted `boundaryScope` values.
pub const BOUNDARY_SCOPES: [&str; 3] = ["ALL", "INBOUND", "DEFAULT"];

// ============================================================================
// SECTION: Types
// ============================================================================

/// Application perspective.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationConfig {
    /// Backend id.
    #[serde(default)]
    pub id: String,
    /// Display label.
    pub label: String,
    /// Downstream inclusion.
    pub scope: String,
    /// Call boundary.
    pub boundary_scope: String,
    /// Membership filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_filter_expression: Option<TagFilter>,
    /// Access rules.
    #[serde(default)]
    pub access_rules: Vec<AccessRule>,
}

impl InstanaDataObject for ApplicationConfig {
    fn id(&self) -> &str {
        &self.id
    }
}
