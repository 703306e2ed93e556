// crates/instana-resources/src/automation_action.rs
// ============================================================================
// Module: Automation Action Handle
// Description: Script and HTTP automation actions.
// Purpose: Flatten typed action blocks into named wire fields and back.
// Dependencies: instana-core, instana-restapi, serde_json
// ============================================================================

//! ## Overview
//! The backend stores action settings as a list of named fields. State keeps
//! one block per action type instead; the populated block selects the wire
//! `type` and the fields it emits. HTTP headers travel as a JSON object
//! inside a single field.

use std::collections::BTreeMap;

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
use instana_core::mappers::select_variant;
use instana_restapi::InstanaApi;
use instana_restapi::RestResource;
use instana_restapi::models::automation;
use instana_restapi::models::automation::ACTION_TYPE_HTTP;
use instana_restapi::models::automation::ACTION_TYPE_SCRIPT;
use instana_restapi::models::automation::AutomationAction;
use instana_restapi::models::automation::ENCODING_ASCII;
use instana_restapi::models::automation::ENCODING_BASE64;
use instana_restapi::models::automation::Field;
use instana_restapi::models::automation::Parameter;
use serde_json::Value;

use crate::common::FIELD_DESCRIPTION;
use crate::common::FIELD_ID;
use crate::common::FIELD_NAME;
use crate::common::MAX_NAME_LENGTH;
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
pub const RESOURCE_NAME: &str = "instana_automation_action";
/// Current schema version.
const SCHEMA_VERSION: i64 = 0;

/// Free-form tags.
pub const FIELD_TAGS: &str = "tags";
/// Action timeout when the type block leaves it unset.
pub const FIELD_TIMEOUT: &str = "timeout";
/// Input parameter list.
pub const FIELD_INPUT_PARAMETER: &str = "input_parameter";
/// Script content.
const FIELD_CONTENT: &str = "content";
/// Script interpreter.
const FIELD_INTERPRETER: &str = "interpreter";
/// HTTP target.
const FIELD_HOST: &str = "host";
/// HTTP method.
const FIELD_METHOD: &str = "method";
/// HTTP body.
const FIELD_BODY: &str = "body";
/// HTTP headers.
const FIELD_HEADERS: &str = "headers";
/// Skips certificate validation.
const FIELD_IGNORE_CERTIFICATE_ERRORS: &str = "ignore_certificate_errors";
/// Parameter label.
const FIELD_LABEL: &str = "label";
/// Parameter kind.
const FIELD_TYPE: &str = "type";
/// Parameter default value.
const FIELD_VALUE: &str = "value";
/// Parameter must be supplied.
const FIELD_REQUIRED: &str = "required";
/// Parameter hidden from the UI.
const FIELD_HIDDEN: &str = "hidden";

/// HTTP methods.
const HTTP_METHODS: [&str; 4] = ["GET", "POST", "PUT", "DELETE"];
/// Parameter kinds.
const PARAMETER_TYPES: [&str; 3] = ["static", "dynamic", "vault"];

// ============================================================================
// SECTION: Action Types
// ============================================================================

/// Action type block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Script run by an agent.
    Script,
    /// HTTP request.
    Http,
}

impl ActionKind {
    /// All blocks.
    pub const ALL: [Self; 2] = [Self::Script, Self::Http];

    /// Block names.
    pub const FIELDS: [&'static str; 2] = ["script", "http"];

    /// State block name.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::Script => "script",
            Self::Http => "http",
        }
    }

    /// Wire `type`.
    #[must_use]
    pub const fn wire_type(self) -> &'static str {
        match self {
            Self::Script => ACTION_TYPE_SCRIPT,
            Self::Http => ACTION_TYPE_HTTP,
        }
    }

    /// Resolves a block name.
    #[must_use]
    pub fn from_field(field: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.field() == field)
    }

    /// Resolves a wire `type`.
    #[must_use]
    pub fn from_wire(kind: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|candidate| candidate.wire_type() == kind)
    }

    /// Attributes of the block.
    fn attributes(self) -> Vec<Attribute> {
        match self {
            Self::Script => vec![
                Attribute::string(FIELD_CONTENT)
                    .required()
                    .describe("Base64 encoded script content"),
                Attribute::string(FIELD_INTERPRETER),
                Attribute::string(FIELD_TIMEOUT),
            ],
            Self::Http => vec![
                Attribute::string(FIELD_HOST).required(),
                Attribute::string(FIELD_METHOD)
                    .required()
                    .validate(Validator::OneOf(&HTTP_METHODS)),
                Attribute::string(FIELD_BODY),
                Attribute::new(FIELD_HEADERS, AttributeType::string_map()),
                Attribute::bool(FIELD_IGNORE_CERTIFICATE_ERRORS),
                Attribute::string(FIELD_TIMEOUT),
            ],
        }
    }
}

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Resource schema.
fn schema() -> Schema {
    let mut attributes = vec![
        id_attribute(),
        name_attribute(MAX_NAME_LENGTH),
        description_attribute(),
        Attribute::new(FIELD_TAGS, AttributeType::string_list()),
        Attribute::string(FIELD_TIMEOUT),
        Attribute::block_list(
            FIELD_INPUT_PARAMETER,
            vec![
                Attribute::string(FIELD_NAME).required(),
                Attribute::string(FIELD_LABEL),
                Attribute::string(FIELD_DESCRIPTION),
                Attribute::string(FIELD_TYPE)
                    .required()
                    .validate(Validator::OneOf(&PARAMETER_TYPES)),
                Attribute::string(FIELD_VALUE),
                flag(FIELD_REQUIRED, false),
                flag(FIELD_HIDDEN, false),
            ],
        ),
    ];
    attributes.extend(
        ActionKind::ALL.into_iter().map(|kind| Attribute::block(kind.field(), kind.attributes())),
    );
    Schema::new("Automation action", attributes)
}

// ============================================================================
// SECTION: Handle
// ============================================================================

/// Handle for automation actions.
#[derive(Debug)]
pub struct AutomationActionHandle {
    /// Static description.
    metadata: ResourceMetadata,
}

impl AutomationActionHandle {
    /// Builds the handle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: ResourceMetadata::new(RESOURCE_NAME, schema(), SCHEMA_VERSION),
        }
    }
}

impl Default for AutomationActionHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceHandle for AutomationActionHandle {
    type Payload = AutomationAction;

    fn metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }

    fn rest_resource(&self, api: &InstanaApi) -> RestResource<AutomationAction> {
        api.automation_actions()
    }

    fn state_to_payload(&self, state: &StateValue) -> Result<AutomationAction, Diagnostics> {
        action_from_state(&ObjectReader::root(state))
    }

    fn payload_to_state(
        &self,
        payload: &AutomationAction,
        prior: &StateValue,
    ) -> Result<StateValue, Diagnostics> {
        action_to_state(payload, prior).map_err(Diagnostics::from)
    }
}

// ============================================================================
// SECTION: State To Payload
// ============================================================================

/// Builds a wire field.
fn field(name: &str, value: impl Into<String>, encoding: &str) -> Field {
    Field {
        name: name.to_string(),
        description: String::new(),
        value: value.into(),
        encoding: encoding.to_string(),
        secured: false,
    }
}

/// Maps a resource object to the payload.
fn action_from_state(reader: &ObjectReader<'_>) -> Result<AutomationAction, Diagnostics> {
    let mut diagnostics = Diagnostics::new();
    let (kind, fields) = diagnostics.take(fields_from_state(reader));
    let action = AutomationAction {
        id: diagnostics.take(id_from_state(reader)),
        name: diagnostics.take(reader.required_string(FIELD_NAME)),
        description: diagnostics.take(reader.string_or(FIELD_DESCRIPTION, "")),
        kind,
        tags: diagnostics.take(reader.string_list(FIELD_TAGS)),
        fields,
        input_parameters: diagnostics.take(parameters_from_state(reader)),
    };
    diagnostics.finish(action)
}

/// Maps the selected action type to its wire type and encoded fields.
fn fields_from_state(reader: &ObjectReader<'_>) -> Result<(String, Vec<Field>), MappingError> {
    let selected = select_variant(reader, &ActionKind::FIELDS, "automation action type")?;
    let kind = ActionKind::from_field(selected.name).ok_or_else(|| {
        MappingError::invalid(&selected.path, format!("unsupported action type {}", selected.name))
    })?;
    let slot = selected.reader();
    let mut fields = match kind {
        ActionKind::Script => {
            let content = slot.required_string(FIELD_CONTENT)?;
            let mut fields = vec![field(automation::FIELD_SCRIPT, content, ENCODING_BASE64)];
            if let Some(interpreter) = slot.optional_string(FIELD_INTERPRETER)? {
                fields.push(field(automation::FIELD_SUBTYPE, interpreter, ENCODING_ASCII));
            }
            fields
        }
        ActionKind::Http => http_fields(&slot)?,
    };
    let timeout = match slot.optional_string(FIELD_TIMEOUT)? {
        Some(timeout) => Some(timeout),
        None => reader.optional_string(FIELD_TIMEOUT)?,
    };
    if let Some(timeout) = timeout {
        fields.push(field(automation::FIELD_TIMEOUT, timeout, ENCODING_ASCII));
    }
    Ok((kind.wire_type().to_string(), fields))
}

/// Maps the HTTP block to wire fields.
fn http_fields(slot: &ObjectReader<'_>) -> Result<Vec<Field>, MappingError> {
    let mut fields = vec![
        field(automation::FIELD_HTTP_HOST, slot.required_string(FIELD_HOST)?, ENCODING_ASCII),
        field(automation::FIELD_HTTP_METHOD, slot.required_string(FIELD_METHOD)?, ENCODING_ASCII),
    ];
    if let Some(body) = slot.optional_string(FIELD_BODY)? {
        fields.push(field(automation::FIELD_HTTP_BODY, body, ENCODING_ASCII));
    }
    let headers = slot.string_map(FIELD_HEADERS)?;
    if !headers.is_empty() {
        let encoded = serde_json::to_string(&headers).map_err(|err| {
            let path = slot.field_path(FIELD_HEADERS);
            MappingError::invalid(&path, format!("failed to encode headers: {err}"))
        })?;
        fields.push(field(automation::FIELD_HTTP_HEADERS, encoded, ENCODING_ASCII));
    }
    if let Some(ignore) = slot.optional_bool(FIELD_IGNORE_CERTIFICATE_ERRORS)? {
        let ignore = ignore.to_string();
        fields.push(field(automation::FIELD_HTTP_IGNORE_CERT_ERRORS, ignore, ENCODING_ASCII));
    }
    Ok(fields)
}

/// Maps the input parameter list.
fn parameters_from_state(reader: &ObjectReader<'_>) -> Result<Vec<Parameter>, MappingError> {
    reader
        .objects(FIELD_INPUT_PARAMETER)?
        .into_iter()
        .map(|(path, value)| {
            let parameter = ObjectReader::new(value, &path);
            Ok(Parameter {
                name: parameter.required_string(FIELD_NAME)?,
                label: parameter.string_or(FIELD_LABEL, "")?,
                description: parameter.string_or(FIELD_DESCRIPTION, "")?,
                kind: parameter.required_string(FIELD_TYPE)?,
                value: parameter.string_or(FIELD_VALUE, "")?,
                required: parameter.bool_or(FIELD_REQUIRED, false)?,
                hidden: parameter.bool_or(FIELD_HIDDEN, false)?,
                secured: false,
            })
        })
        .collect()
}

// ============================================================================
// SECTION: Payload To State
// ============================================================================

/// Maps the payload to a resource object.
///
/// The timeout lands where the prior state declared it: at the top level
/// when only the top-level attribute was set, otherwise in the type block.
fn action_to_state(
    action: &AutomationAction,
    prior: &StateValue,
) -> Result<StateValue, MappingError> {
    let kind = ActionKind::from_wire(&action.kind).ok_or_else(|| {
        MappingError::UnsupportedEntityType {
            kind: action.kind.clone(),
        }
    })?;
    let timeout = action.field_value(automation::FIELD_TIMEOUT).map(ToString::to_string);
    let top_level_timeout = !prior.get(FIELD_TIMEOUT).is_absent()
        && prior.get(kind.field()).get(FIELD_TIMEOUT).is_absent();
    let (slot_timeout, root_timeout) =
        if top_level_timeout { (None, timeout) } else { (timeout, None) };
    let slot = match kind {
        ActionKind::Script => StateValue::object()
            .with(FIELD_CONTENT, action.field_value(automation::FIELD_SCRIPT))
            .with(FIELD_INTERPRETER, action.field_value(automation::FIELD_SUBTYPE)),
        ActionKind::Http => http_to_state(action)?,
    }
    .with(FIELD_TIMEOUT, slot_timeout);
    let parameters = action
        .input_parameters
        .iter()
        .map(|parameter| {
            StateValue::object()
                .with(FIELD_NAME, &parameter.name)
                .with(FIELD_LABEL, non_empty(&parameter.label))
                .with(FIELD_DESCRIPTION, non_empty(&parameter.description))
                .with(FIELD_TYPE, &parameter.kind)
                .with(FIELD_VALUE, non_empty(&parameter.value))
                .with(FIELD_REQUIRED, parameter.required)
                .with(FIELD_HIDDEN, parameter.hidden)
        })
        .collect();
    let mut state = StateValue::object()
        .with(FIELD_ID, &action.id)
        .with(FIELD_NAME, &action.name)
        .with(FIELD_DESCRIPTION, non_empty(&action.description))
        .with(FIELD_TAGS, StateValue::string_list_or_null(&action.tags))
        .with(FIELD_TIMEOUT, root_timeout)
        .with(FIELD_INPUT_PARAMETER, StateValue::list_or_null(parameters));
    for other in ActionKind::ALL {
        let value = if other == kind { slot.clone() } else { StateValue::Null };
        state.insert(other.field(), value);
    }
    Ok(state)
}

/// Maps the HTTP wire fields to the block.
fn http_to_state(action: &AutomationAction) -> Result<StateValue, MappingError> {
    let headers = action
        .field_value(automation::FIELD_HTTP_HEADERS)
        .filter(|raw| !raw.is_empty());
    let headers = match headers {
        Some(raw) => headers_to_state(raw)?,
        None => StateValue::Null,
    };
    let ignore = action
        .field_value(automation::FIELD_HTTP_IGNORE_CERT_ERRORS)
        .map(|raw| raw.eq_ignore_ascii_case("true"));
    Ok(StateValue::object()
        .with(FIELD_HOST, action.field_value(automation::FIELD_HTTP_HOST))
        .with(FIELD_METHOD, action.field_value(automation::FIELD_HTTP_METHOD))
        .with(FIELD_BODY, action.field_value(automation::FIELD_HTTP_BODY))
        .with(FIELD_HEADERS, headers)
        .with(FIELD_IGNORE_CERTIFICATE_ERRORS, ignore))
}

/// Decodes the headers field; non-string values are rendered as JSON text.
fn headers_to_state(raw: &str) -> Result<StateValue, MappingError> {
    let decoded: BTreeMap<String, Value> = serde_json::from_str(raw).map_err(|err| {
        let path = AttributePath::attribute(ActionKind::Http.field()).child(FIELD_HEADERS);
        MappingError::invalid(&path, format!("headers field is not a JSON object: {err}"))
    })?;
    let headers: BTreeMap<String, String> = decoded
        .into_iter()
        .map(|(name, value)| match value {
            Value::String(text) => (name, text),
            other => (name, other.to_string()),
        })
        .collect();
    Ok(StateValue::string_map_or_null(&headers))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
