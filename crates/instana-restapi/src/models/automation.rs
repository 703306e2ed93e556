// crates/instana-restapi/src/models/automation.rs
// ============================================================================
// Module: Automation Payloads
// Description: Automation actions and the policies that run them.
// Purpose: Model actions as typed name/value field lists and policies as
//          trigger plus run configuration.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Actions do not use dedicated attributes for their configuration; each
//! setting is a [`Field`] identified by name (`script_ssh`, `host`, ...).

use serde::Deserialize;
use serde::Serialize;

use crate::resource::InstanaDataObject;

// ============================================================================
// SECTION: Field Names
// ============================================================================

/// Action `type` of script actions.
pub const ACTION_TYPE_SCRIPT: &str = "SCRIPT";
/// Action `type` of HTTP actions.
pub const ACTION_TYPE_HTTP: &str = "HTTP";

/// Field holding the script content (base64 encoded).
pub const FIELD_SCRIPT: &str = "script_ssh";
/// Field holding the script interpreter.
pub const FIELD_SUBTYPE: &str = "subtype";
/// Field holding the action timeout.
pub const FIELD_TIMEOUT: &str = "timeout";
/// Field holding the HTTP target.
pub const FIELD_HTTP_HOST: &str = "host";
/// Field holding the HTTP method.
pub const FIELD_HTTP_METHOD: &str = "method";
/// Field holding the HTTP body.
pub const FIELD_HTTP_BODY: &str = "body";
/// Field holding the HTTP headers as a JSON object.
pub const FIELD_HTTP_HEADERS: &str = "headers";
/// Field holding the certificate check toggle.
pub const FIELD_HTTP_IGNORE_CERT_ERRORS: &str = "ignoreCertErrors";

/// Encoding marker for plain fields.
pub const ENCODING_ASCII: &str = "ascii";
/// Encoding marker for base64 fields.
pub const ENCODING_BASE64: &str = "base64";

// ============================================================================
// SECTION: Actions
// ============================================================================

/// Named configuration value of an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Field name.
    pub name: String,
    /// Field description.
    #[serde(default)]
    pub description: String,
    /// Field value.
    #[serde(default)]
    pub value: String,
    /// `ascii` or `base64`.
    #[serde(default)]
    pub encoding: String,
    /// Whether the value is secret.
    #[serde(default)]
    pub secured: bool,
}

/// Parameter supplied when an action runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// `static`, `dynamic`, or `vault`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Default value.
    #[serde(default)]
    pub value: String,
    /// Whether a value is required.
    #[serde(default)]
    pub required: bool,
    /// Whether the parameter is hidden.
    #[serde(default)]
    pub hidden: bool,
    /// Whether the value is secret.
    #[serde(default)]
    pub secured: bool,
}

/// Automation action.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationAction {
    /// Backend id.
    #[serde(default)]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// `SCRIPT` or `HTTP`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Configuration fields.
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Input parameters.
    #[serde(default)]
    pub input_parameters: Vec<Parameter>,
}

impl AutomationAction {
    /// Returns the value of a named field, if present.
    #[must_use]
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields.iter().find(|field| field.name == name).map(|field| field.value.as_str())
    }
}

impl InstanaDataObject for AutomationAction {
    fn id(&self) -> &str {
        &self.id
    }
}

// ============================================================================
// SECTION: Policies
// ============================================================================

/// Event that starts a policy.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
    /// Event or event specification id.
    pub id: String,
    /// `customEvent`, `builtinEvent`, ...
    #[serde(rename = "type")]
    pub kind: String,
}

/// Restricts where a type configuration applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Dynamic focus query.
    pub query: String,
}

/// Reference to an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionReference {
    /// Action id.
    pub id: String,
}

/// Value bound to an action input parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputParameterValue {
    /// Parameter name.
    pub name: String,
    /// Parameter value.
    pub value: String,
}

/// Action run by a policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionConfiguration {
    /// Referenced action.
    pub action: ActionReference,
    /// Agent that runs the action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    /// Parameter bindings.
    #[serde(default)]
    pub input_parameter_values: Vec<InputParameterValue>,
}

/// Actions of a runnable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfiguration {
    /// Actions in order.
    #[serde(default)]
    pub actions: Vec<ActionConfiguration>,
}

/// What a type configuration runs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Runnable {
    /// Runnable id.
    #[serde(default)]
    pub id: String,
    /// Always `action`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Actions to run.
    #[serde(default)]
    pub run_configuration: RunConfiguration,
}

/// Policy branch for one entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeConfiguration {
    /// Entity type name.
    pub name: String,
    /// Optional scope restriction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    /// Actions to run.
    pub runnable: Runnable,
}

/// Automation policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationPolicy {
    /// Backend id.
    #[serde(default)]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Starting event.
    pub trigger: Trigger,
    /// Entity type branches.
    #[serde(default)]
    pub type_configurations: Vec<TypeConfiguration>,
}

impl InstanaDataObject for AutomationPolicy {
    fn id(&self) -> &str {
        &self.id
    }
}
