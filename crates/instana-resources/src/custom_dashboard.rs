// crates/instana-resources/src/custom_dashboard.rs
// ============================================================================
// Module: Custom Dashboard Handle
// Description: Shared dashboards with JSON widget definitions.
// Purpose: Map access rules and keep widget JSON stable across reads.
// Dependencies: instana-core, instana-restapi, serde_json
// ============================================================================

//! ## Overview
//! Widgets are configured as a JSON document. The backend reorders keys and
//! whitespace, so a read keeps the prior text whenever it decodes to the same
//! document and otherwise stores the compact form.

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
use instana_core::upgrade::identity;
use instana_restapi::InstanaApi;
use instana_restapi::RestResource;
use instana_restapi::models::custom_dashboard::CustomDashboard;
use serde_json::Value;

use crate::common::FIELD_ACCESS_RULE;
use crate::common::FIELD_ID;
use crate::common::access_rule_attribute;
use crate::common::access_rules_from_state;
use crate::common::access_rules_to_state;
use crate::common::id_attribute;
use crate::common::id_from_state;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Host resource name.
pub const RESOURCE_NAME: &str = "instana_custom_dashboard";
/// Current schema version.
const SCHEMA_VERSION: i64 = 1;

/// Dashboard title.
pub const FIELD_TITLE: &str = "title";
/// Widget JSON document.
pub const FIELD_WIDGETS: &str = "widgets";

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Resource schema.
fn schema() -> Schema {
    Schema::new(
        "Custom dashboard",
        vec![
            id_attribute(),
            Attribute::string(FIELD_TITLE).required().validate(Validator::LengthBetween(1, 256)),
            access_rule_attribute(),
            Attribute::string(FIELD_WIDGETS)
                .required()
                .validate(Validator::Json)
                .describe(
                    "The json array containing the widgets configured for the custom dashboard",
                ),
        ],
    )
}

// ============================================================================
// SECTION: Handle
// ============================================================================

/// Handle for custom dashboards.
#[derive(Debug)]
pub struct CustomDashboardHandle {
    /// Static description.
    metadata: ResourceMetadata,
}

impl CustomDashboardHandle {
    /// Builds the handle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: ResourceMetadata::new(RESOURCE_NAME, schema(), SCHEMA_VERSION)
                .with_upgraders(vec![StateUpgrader::new(0, identity)]),
        }
    }
}

impl Default for CustomDashboardHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceHandle for CustomDashboardHandle {
    type Payload = CustomDashboard;

    fn metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }

    fn rest_resource(&self, api: &InstanaApi) -> RestResource<CustomDashboard> {
        api.custom_dashboards()
    }

    fn state_to_payload(&self, state: &StateValue) -> Result<CustomDashboard, Diagnostics> {
        dashboard_from_state(&ObjectReader::root(state))
    }

    fn payload_to_state(
        &self,
        payload: &CustomDashboard,
        prior: &StateValue,
    ) -> Result<StateValue, Diagnostics> {
        dashboard_to_state(payload, prior).map_err(Diagnostics::from)
    }
}

// ============================================================================
// SECTION: Mapping
// ============================================================================

/// Maps a resource object to the payload.
fn dashboard_from_state(reader: &ObjectReader<'_>) -> Result<CustomDashboard, Diagnostics> {
    let mut diagnostics = Diagnostics::new();
    let dashboard = CustomDashboard {
        id: diagnostics.take(id_from_state(reader)),
        title: diagnostics.take(reader.required_string(FIELD_TITLE)),
        access_rules: diagnostics.take(access_rules_from_state(reader)),
        widgets: diagnostics.take(widgets_from_state(reader)),
    };
    diagnostics.finish(dashboard)
}

/// Parses the widget JSON document.
fn widgets_from_state(reader: &ObjectReader<'_>) -> Result<Value, MappingError> {
    let widgets = reader.required_string(FIELD_WIDGETS)?;
    serde_json::from_str(&widgets).map_err(|err| {
        let path = reader.field_path(FIELD_WIDGETS);
        MappingError::invalid(&path, format!("widgets must be valid JSON: {err}"))
    })
}

/// Maps the payload to a resource object.
fn dashboard_to_state(
    dashboard: &CustomDashboard,
    prior: &StateValue,
) -> Result<StateValue, MappingError> {
    Ok(StateValue::object()
        .with(FIELD_ID, &dashboard.id)
        .with(FIELD_TITLE, &dashboard.title)
        .with(FIELD_ACCESS_RULE, access_rules_to_state(&dashboard.access_rules))
        .with(FIELD_WIDGETS, widgets_to_state(&dashboard.widgets, prior.get(FIELD_WIDGETS))?))
}

/// Keeps the prior widget text when it encodes the same document.
fn widgets_to_state(widgets: &Value, prior: &StateValue) -> Result<String, MappingError> {
    if let Some(text) = prior.as_str()
        && serde_json::from_str::<Value>(text).is_ok_and(|decoded| &decoded == widgets)
    {
        return Ok(text.to_string());
    }
    serde_json::to_string(widgets).map_err(|err| {
        let path = AttributePath::attribute(FIELD_WIDGETS);
        MappingError::invalid(&path, format!("failed to encode widgets: {err}"))
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================
