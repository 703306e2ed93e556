// crates/instana-restapi/src/models/custom_dashboard.rs
// ============================================================================
// Module: Custom Dashboard Payloads
// Description: Shared dashboards with free-form widget definitions.
// Purpose: Carry widgets as raw JSON so they round-trip untouched.
// Dependencies: serde, serde_json
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::models::access_rule::AccessRule;
use crate::resource::InstanaDataObject;

/// Custom dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomDashboard {
    /// Backend id.
    #[serde(default)]
    pub id: String,
    /// Display title.
    pub title: String,
    /// Access rules.
    #[serde(default)]
    pub access_rules: Vec<AccessRule>,
    /// Widget definitions, passed through verbatim.
    #[serde(default)]
    pub widgets: Value,
}

impl InstanaDataObject for CustomDashboard {
    fn id(&self) -> &str {
        &self.id
    }
}
