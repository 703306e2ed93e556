// crates/instana-resources/src/automation_policy.rs
// ============================================================================
// Module: Automation Policy Handle
// Description: Policies binding triggers to automation actions.
// Purpose: Map type configurations and their action runnables.
// Dependencies: instana-core, instana-restapi
// ============================================================================

use instana_core::Attribute;
use instana_core::AttributeType;
use instana_core::Diagnostics;
use instana_core::MappingError;
use instana_core::ObjectReader;
use instana_core::ResourceHandle;
use instana_core::ResourceMetadata;
use instana_core::Schema;
use instana_core::StateValue;
use instana_core::Validator;
use instana_restapi::InstanaApi;
use instana_restapi::RestResource;
use instana_restapi::models::automation::ActionConfiguration;
use instana_restapi::models::automation::ActionReference;
use instana_restapi::models::automation::AutomationPolicy;
use instana_restapi::models::automation::Condition;
use instana_restapi::models::automation::InputParameterValue;
use instana_restapi::models::automation::RunConfiguration;
use instana_restapi::models::automation::Runnable;
use instana_restapi::models::automation::Trigger;
use instana_restapi::models::automation::TypeConfiguration;

use crate::common::FIELD_DESCRIPTION;
use crate::common::FIELD_ID;
use crate::common::FIELD_NAME;
use crate::common::MAX_NAME_LENGTH;
use crate::common::id_attribute;
use crate::common::id_from_state;
use crate::common::name_attribute;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Host resource name.
pub const RESOURCE_NAME: &str = "instana_automation_policy";
/// Current schema version.
const SCHEMA_VERSION: i64 = 0;

/// Free-form tags.
pub const FIELD_TAGS: &str = "tags";
/// Starting event block.
pub const FIELD_TRIGGER: &str = "trigger";
/// Type configuration list.
pub const FIELD_TYPE_CONFIGURATION: &str = "type_configuration";
/// Trigger kind.
const FIELD_TYPE: &str = "type";
/// Scope restriction block.
const FIELD_CONDITION: &str = "condition";
/// Dynamic focus query.
const FIELD_QUERY: &str = "query";
/// Action list.
const FIELD_ACTION: &str = "action";
/// Referenced action.
const FIELD_ACTION_ID: &str = "action_id";
/// Agent running the action.
const FIELD_AGENT_ID: &str = "agent_id";
/// Parameter bindings.
const FIELD_INPUT_PARAMETERS: &str = "input_parameters";

/// Runnable kind of action runnables.
const RUNNABLE_TYPE_ACTION: &str = "action";

/// Trigger kinds.
const TRIGGER_TYPES: [&str; 10] = [
    "customEvent",
    "builtinEvent",
    "applicationSmartAlert",
    "globalApplicationSmartAlert",
    "websiteSmartAlert",
    "infraSmartAlert",
    "mobileAppSmartAlert",
    "syntheticsSmartAlert",
    "logSmartAlert",
    "sloSmartAlert",
];

/// Policy kinds.
const POLICY_TYPES: [&str; 2] = ["manual", "automatic"];

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Resource schema.
fn schema() -> Schema {
    Schema::new(
        "Automation policy",
        vec![
            id_attribute(),
            name_attribute(MAX_NAME_LENGTH),
            Attribute::string(FIELD_DESCRIPTION).required(),
            Attribute::new(FIELD_TAGS, AttributeType::string_list()),
            Attribute::block(
                FIELD_TRIGGER,
                vec![
                    Attribute::string(FIELD_ID).required().describe("Event or smart alert id"),
                    Attribute::string(FIELD_TYPE)
                        .required()
                        .validate(Validator::OneOf(&TRIGGER_TYPES)),
                ],
            )
            .required(),
            Attribute::block_list(
                FIELD_TYPE_CONFIGURATION,
                vec![
                    Attribute::string(FIELD_NAME)
                        .required()
                        .validate(Validator::OneOf(&POLICY_TYPES)),
                    Attribute::block(
                        FIELD_CONDITION,
                        vec![Attribute::string(FIELD_QUERY).required()],
                    ),
                    Attribute::block_list(
                        FIELD_ACTION,
                        vec![
                            Attribute::string(FIELD_ACTION_ID).required(),
                            Attribute::string(FIELD_AGENT_ID),
                            Attribute::new(FIELD_INPUT_PARAMETERS, AttributeType::string_map()),
                        ],
                    )
                    .validate(Validator::SizeBetween(1, usize::MAX)),
                ],
            )
            .required()
            .validate(Validator::SizeBetween(1, usize::MAX)),
        ],
    )
}

// ============================================================================
// SECTION: Handle
// ============================================================================

/// Handle for automation policies.
#[derive(Debug)]
pub struct AutomationPolicyHandle {
    /// Static description.
    metadata: ResourceMetadata,
}

impl AutomationPolicyHandle {
    /// Builds the handle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: ResourceMetadata::new(RESOURCE_NAME, schema(), SCHEMA_VERSION),
        }
    }
}

impl Default for AutomationPolicyHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceHandle for AutomationPolicyHandle {
    type Payload = AutomationPolicy;

    fn metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }

    fn rest_resource(&self, api: &InstanaApi) -> RestResource<AutomationPolicy> {
        api.automation_policies()
    }

    fn state_to_payload(&self, state: &StateValue) -> Result<AutomationPolicy, Diagnostics> {
        policy_from_state(&ObjectReader::root(state))
    }

    fn payload_to_state(
        &self,
        payload: &AutomationPolicy,
        _prior: &StateValue,
    ) -> Result<StateValue, Diagnostics> {
        Ok(policy_to_state(payload))
    }
}

// ============================================================================
// SECTION: State To Payload
// ============================================================================

/// Maps a resource object to the payload.
fn policy_from_state(reader: &ObjectReader<'_>) -> Result<AutomationPolicy, Diagnostics> {
    let mut diagnostics = Diagnostics::new();
    let entries = diagnostics.take(reader.objects(FIELD_TYPE_CONFIGURATION));
    let type_configurations = entries
        .into_iter()
        .filter_map(|(path, value)| {
            diagnostics.collect(type_configuration_from_state(&ObjectReader::new(value, &path)))
        })
        .collect();
    let policy = AutomationPolicy {
        id: diagnostics.take(id_from_state(reader)),
        name: diagnostics.take(reader.required_string(FIELD_NAME)),
        description: diagnostics.take(reader.string_or(FIELD_DESCRIPTION, "")),
        tags: diagnostics.take(reader.string_list(FIELD_TAGS)),
        trigger: diagnostics.take(trigger_from_state(reader)),
        type_configurations,
    };
    diagnostics.finish(policy)
}

/// Maps the trigger block.
fn trigger_from_state(reader: &ObjectReader<'_>) -> Result<Trigger, MappingError> {
    let trigger_path = reader.field_path(FIELD_TRIGGER);
    let trigger = reader.required_object(FIELD_TRIGGER)?;
    let trigger = ObjectReader::new(&trigger, &trigger_path);
    Ok(Trigger {
        id: trigger.required_string(FIELD_ID)?,
        kind: trigger.required_string(FIELD_TYPE)?,
    })
}

/// Maps one type configuration; the first action names the runnable.
fn type_configuration_from_state(
    entry: &ObjectReader<'_>,
) -> Result<TypeConfiguration, MappingError> {
    let condition = match entry.object(FIELD_CONDITION)? {
        Some(block) => {
            let path = entry.field_path(FIELD_CONDITION);
            Some(Condition {
                query: ObjectReader::new(&block, &path).required_string(FIELD_QUERY)?,
            })
        }
        None => None,
    };
    let actions = entry
        .objects(FIELD_ACTION)?
        .into_iter()
        .map(|(path, value)| {
            let action = ObjectReader::new(value, &path);
            Ok(ActionConfiguration {
                action: ActionReference {
                    id: action.required_string(FIELD_ACTION_ID)?,
                },
                agent_id: action.optional_string(FIELD_AGENT_ID)?,
                input_parameter_values: action
                    .string_map(FIELD_INPUT_PARAMETERS)?
                    .into_iter()
                    .map(|(name, value)| InputParameterValue {
                        name,
                        value,
                    })
                    .collect(),
            })
        })
        .collect::<Result<Vec<_>, MappingError>>()?;
    Ok(TypeConfiguration {
        name: entry.required_string(FIELD_NAME)?,
        condition,
        runnable: Runnable {
            id: actions.first().map(|action| action.action.id.clone()).unwrap_or_default(),
            kind: RUNNABLE_TYPE_ACTION.to_string(),
            run_configuration: RunConfiguration {
                actions,
            },
        },
    })
}

// ============================================================================
// SECTION: Payload To State
// ============================================================================

/// Maps the payload to a resource object.
fn policy_to_state(policy: &AutomationPolicy) -> StateValue {
    let type_configurations =
        policy.type_configurations.iter().map(type_configuration_to_state).collect();
    StateValue::object()
        .with(FIELD_ID, &policy.id)
        .with(FIELD_NAME, &policy.name)
        .with(FIELD_DESCRIPTION, &policy.description)
        .with(FIELD_TAGS, StateValue::string_list_or_null(&policy.tags))
        .with(
            FIELD_TRIGGER,
            StateValue::object()
                .with(FIELD_ID, &policy.trigger.id)
                .with(FIELD_TYPE, &policy.trigger.kind),
        )
        .with(FIELD_TYPE_CONFIGURATION, StateValue::list_or_null(type_configurations))
}

/// Maps one type configuration.
fn type_configuration_to_state(configuration: &TypeConfiguration) -> StateValue {
    let actions = configuration
        .runnable
        .run_configuration
        .actions
        .iter()
        .map(|action| {
            let parameters = action
                .input_parameter_values
                .iter()
                .map(|parameter| (parameter.name.clone(), parameter.value.clone()))
                .collect();
            StateValue::object()
                .with(FIELD_ACTION_ID, &action.action.id)
                .with(FIELD_AGENT_ID, action.agent_id.clone().filter(|agent| !agent.is_empty()))
                .with(FIELD_INPUT_PARAMETERS, StateValue::string_map_or_null(&parameters))
        })
        .collect();
    StateValue::object()
        .with(FIELD_NAME, &configuration.name)
        .with(
            FIELD_CONDITION,
            configuration
                .condition
                .as_ref()
                .map(|condition| StateValue::object().with(FIELD_QUERY, &condition.query)),
        )
        .with(FIELD_ACTION, StateValue::list_or_null(actions))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
