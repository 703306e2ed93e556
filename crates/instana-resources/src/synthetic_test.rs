// crates/instana-resources/src/synthetic_test.rs
// ============================================================================
// Module: Synthetic Test Handle
// Description: HTTP action and HTTP script synthetic tests.
// Purpose: Map the top-level test type slots onto `configuration.syntheticType`.
// Dependencies: instana-core, instana-restapi
// ============================================================================

//! ## Overview
//! A synthetic test sets exactly one of the `http_action` and `http_script`
//! blocks at the top level. The block selects the wire `syntheticType`; both
//! share the retry and timeout settings.

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
use instana_core::mappers::select_variant;
use instana_restapi::InstanaApi;
use instana_restapi::RestResource;
use instana_restapi::models::synthetic::SYNTHETIC_TYPE_HTTP_ACTION;
use instana_restapi::models::synthetic::SYNTHETIC_TYPE_HTTP_SCRIPT;
use instana_restapi::models::synthetic::SyntheticTest;
use instana_restapi::models::synthetic::SyntheticTestConfig;

use crate::common::FIELD_DESCRIPTION;
use crate::common::FIELD_ID;
use crate::common::flag;
use crate::common::id_attribute;
use crate::common::id_from_state;
use crate::common::optional_non_empty;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Host resource name.
pub const RESOURCE_NAME: &str = "instana_synthetic_test";
/// Current schema version.
const SCHEMA_VERSION: i64 = 0;

/// Display label.
pub const FIELD_LABEL: &str = "label";
/// Whether the test runs.
pub const FIELD_ACTIVE: &str = "active";
/// Associated application.
pub const FIELD_APPLICATION_ID: &str = "application_id";
/// Free-form properties.
pub const FIELD_CUSTOM_PROPERTIES: &str = "custom_properties";
/// Point of presence ids.
pub const FIELD_LOCATIONS: &str = "locations";
/// Playback across locations.
pub const FIELD_PLAYBACK_MODE: &str = "playback_mode";
/// Minutes between runs.
pub const FIELD_TEST_FREQUENCY: &str = "test_frequency";

/// Marks calls as synthetic.
const FIELD_MARK_SYNTHETIC_CALL: &str = "mark_synthetic_call";
/// Retries on failure.
const FIELD_RETRIES: &str = "retries";
/// Seconds between retries.
const FIELD_RETRY_INTERVAL: &str = "retry_interval";
/// Run timeout such as `3m`.
const FIELD_TIMEOUT: &str = "timeout";
/// Target URL.
const FIELD_URL: &str = "url";
/// HTTP method.
const FIELD_OPERATION: &str = "operation";
/// Request headers.
const FIELD_HEADERS: &str = "headers";
/// Request body.
const FIELD_BODY: &str = "body";
/// Text the response must contain.
const FIELD_VALIDATION_STRING: &str = "validation_string";
/// Follows redirects.
const FIELD_FOLLOW_REDIRECT: &str = "follow_redirect";
/// Accepts invalid certificates.
const FIELD_ALLOW_INSECURE: &str = "allow_insecure";
/// Expected status code.
const FIELD_EXPECT_STATUS: &str = "expect_status";
/// Regular expression the body must match.
const FIELD_EXPECT_MATCH: &str = "expect_match";
/// Script source.
const FIELD_SCRIPT: &str = "script";

/// Playback modes.
const PLAYBACK_MODES: [&str; 2] = ["Simultaneous", "Staggered"];
/// Default playback mode.
const DEFAULT_PLAYBACK_MODE: &str = "Simultaneous";
/// Default minutes between runs.
const DEFAULT_TEST_FREQUENCY: i64 = 15;
/// Longest accepted run interval in minutes.
const MAX_TEST_FREQUENCY: i64 = 120;
/// Default seconds between retries.
const DEFAULT_RETRY_INTERVAL: i64 = 1;
/// HTTP methods of HTTP actions.
const OPERATIONS: [&str; 7] = ["GET", "HEAD", "OPTIONS", "PATCH", "POST", "PUT", "DELETE"];

// ============================================================================
// SECTION: Test Types
// ============================================================================

/// Test type slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntheticTestKind {
    /// Single HTTP request.
    HttpAction,
    /// Scripted HTTP requests.
    HttpScript,
}

impl SyntheticTestKind {
    /// All slots.
    pub const ALL: [Self; 2] = [Self::HttpAction, Self::HttpScript];

    /// Slot names.
    pub const FIELDS: [&'static str; 2] = ["http_action", "http_script"];

    /// State slot name.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::HttpAction => "http_action",
            Self::HttpScript => "http_script",
        }
    }

    /// Wire `syntheticType`.
    #[must_use]
    pub const fn synthetic_type(self) -> &'static str {
        match self {
            Self::HttpAction => SYNTHETIC_TYPE_HTTP_ACTION,
            Self::HttpScript => SYNTHETIC_TYPE_HTTP_SCRIPT,
        }
    }

    /// Resolves a slot name.
    #[must_use]
    pub fn from_field(field: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.field() == field)
    }

    /// Resolves a wire `syntheticType`.
    #[must_use]
    pub fn from_synthetic_type(synthetic_type: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.synthetic_type() == synthetic_type)
    }

    /// Attributes of the slot block.
    fn attributes(self) -> Vec<Attribute> {
        let mut attributes = vec![
            flag(FIELD_MARK_SYNTHETIC_CALL, false),
            Attribute::int(FIELD_RETRIES)
                .default_value(0_i64)
                .validate(Validator::IntBetween(0, 2)),
            Attribute::int(FIELD_RETRY_INTERVAL)
                .default_value(DEFAULT_RETRY_INTERVAL)
                .validate(Validator::IntBetween(1, 10)),
            Attribute::string(FIELD_TIMEOUT),
        ];
        match self {
            Self::HttpAction => attributes.extend([
                Attribute::string(FIELD_URL).required(),
                Attribute::string(FIELD_OPERATION).validate(Validator::OneOf(&OPERATIONS)),
                Attribute::new(FIELD_HEADERS, AttributeType::string_map()),
                Attribute::string(FIELD_BODY),
                Attribute::string(FIELD_VALIDATION_STRING),
                Attribute::bool(FIELD_FOLLOW_REDIRECT),
                Attribute::bool(FIELD_ALLOW_INSECURE),
                Attribute::int(FIELD_EXPECT_STATUS),
                Attribute::string(FIELD_EXPECT_MATCH),
            ]),
            Self::HttpScript => attributes.push(Attribute::string(FIELD_SCRIPT).required()),
        }
        attributes
    }
}

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Resource schema.
fn schema() -> Schema {
    let mut attributes = vec![
        id_attribute(),
        Attribute::string(FIELD_LABEL).required().validate(Validator::LengthBetween(0, 128)),
        Attribute::string(FIELD_DESCRIPTION).validate(Validator::LengthBetween(0, 512)),
        flag(FIELD_ACTIVE, true),
        Attribute::string(FIELD_APPLICATION_ID),
        Attribute::new(FIELD_CUSTOM_PROPERTIES, AttributeType::string_map()),
        Attribute::new(FIELD_LOCATIONS, AttributeType::string_set()).required(),
        Attribute::string(FIELD_PLAYBACK_MODE)
            .default_value(DEFAULT_PLAYBACK_MODE)
            .validate(Validator::OneOf(&PLAYBACK_MODES)),
        Attribute::int(FIELD_TEST_FREQUENCY)
            .default_value(DEFAULT_TEST_FREQUENCY)
            .validate(Validator::IntBetween(1, MAX_TEST_FREQUENCY)),
    ];
    attributes.extend(
        SyntheticTestKind::ALL
            .into_iter()
            .map(|kind| Attribute::block(kind.field(), kind.attributes())),
    );
    Schema::new("Synthetic test", attributes)
}

// ============================================================================
// SECTION: Handle
// ============================================================================

/// Handle for synthetic tests.
#[derive(Debug)]
pub struct SyntheticTestHandle {
    /// Static description.
    metadata: ResourceMetadata,
}

impl SyntheticTestHandle {
    /// Builds the handle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: ResourceMetadata::new(RESOURCE_NAME, schema(), SCHEMA_VERSION),
        }
    }
}

impl Default for SyntheticTestHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceHandle for SyntheticTestHandle {
    type Payload = SyntheticTest;

    fn metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }

    fn rest_resource(&self, api: &InstanaApi) -> RestResource<SyntheticTest> {
        api.synthetic_tests()
    }

    fn state_to_payload(&self, state: &StateValue) -> Result<SyntheticTest, Diagnostics> {
        test_from_state(&ObjectReader::root(state))
    }

    fn payload_to_state(
        &self,
        payload: &SyntheticTest,
        _prior: &StateValue,
    ) -> Result<StateValue, Diagnostics> {
        test_to_state(payload).map_err(Diagnostics::from)
    }
}

// ============================================================================
// SECTION: State To Payload
// ============================================================================

/// Maps a resource object to the payload.
fn test_from_state(reader: &ObjectReader<'_>) -> Result<SyntheticTest, Diagnostics> {
    let mut diagnostics = Diagnostics::new();
    let test = SyntheticTest {
        id: diagnostics.take(id_from_state(reader)),
        label: diagnostics.take(reader.required_string(FIELD_LABEL)),
        description: diagnostics.take(optional_non_empty(reader, FIELD_DESCRIPTION)),
        active: diagnostics.take(reader.bool_or(FIELD_ACTIVE, true)),
        application_id: diagnostics.take(optional_non_empty(reader, FIELD_APPLICATION_ID)),
        configuration: diagnostics.take(selected_configuration_from_state(reader)),
        custom_properties: diagnostics.take(reader.string_map(FIELD_CUSTOM_PROPERTIES)),
        locations: diagnostics.take(reader.string_list(FIELD_LOCATIONS)),
        playback_mode: diagnostics
            .take(reader.string_or(FIELD_PLAYBACK_MODE, DEFAULT_PLAYBACK_MODE)),
        test_frequency: diagnostics
            .collect(reader.i64_or(FIELD_TEST_FREQUENCY, DEFAULT_TEST_FREQUENCY)),
    };
    diagnostics.finish(test)
}

/// Maps the single populated test type slot.
fn selected_configuration_from_state(
    reader: &ObjectReader<'_>,
) -> Result<SyntheticTestConfig, MappingError> {
    let selected =
        select_variant(reader, &SyntheticTestKind::FIELDS, "synthetic test configuration")?;
    let kind = SyntheticTestKind::from_field(selected.name).ok_or_else(|| {
        MappingError::invalid(&selected.path, format!("unsupported test type {}", selected.name))
    })?;
    configuration_from_state(kind, &selected.reader())
}

/// Maps the selected slot to the wire configuration.
fn configuration_from_state(
    kind: SyntheticTestKind,
    slot: &ObjectReader<'_>,
) -> Result<SyntheticTestConfig, MappingError> {
    let mut configuration = SyntheticTestConfig {
        mark_synthetic_call: slot.bool_or(FIELD_MARK_SYNTHETIC_CALL, false)?,
        retries: slot.i64_or(FIELD_RETRIES, 0)?,
        retry_interval: slot.i64_or(FIELD_RETRY_INTERVAL, DEFAULT_RETRY_INTERVAL)?,
        synthetic_type: kind.synthetic_type().to_string(),
        timeout: slot.optional_string(FIELD_TIMEOUT)?,
        ..SyntheticTestConfig::default()
    };
    match kind {
        SyntheticTestKind::HttpAction => {
            let headers = slot.string_map(FIELD_HEADERS)?;
            configuration.url = Some(slot.required_string(FIELD_URL)?);
            configuration.operation = slot.optional_string(FIELD_OPERATION)?;
            configuration.headers = (!headers.is_empty()).then_some(headers);
            configuration.body = slot.optional_string(FIELD_BODY)?;
            configuration.validation_string = slot.optional_string(FIELD_VALIDATION_STRING)?;
            configuration.follow_redirect = slot.optional_bool(FIELD_FOLLOW_REDIRECT)?;
            configuration.allow_insecure = slot.optional_bool(FIELD_ALLOW_INSECURE)?;
            configuration.expect_status = slot.optional_i64(FIELD_EXPECT_STATUS)?;
            configuration.expect_match = slot.optional_string(FIELD_EXPECT_MATCH)?;
        }
        SyntheticTestKind::HttpScript => {
            configuration.script = Some(slot.required_string(FIELD_SCRIPT)?);
        }
    }
    Ok(configuration)
}

// ============================================================================
// SECTION: Payload To State
// ============================================================================

/// Maps the payload to a resource object.
fn test_to_state(test: &SyntheticTest) -> Result<StateValue, MappingError> {
    let configuration = &test.configuration;
    let kind = SyntheticTestKind::from_synthetic_type(&configuration.synthetic_type).ok_or_else(|| {
        MappingError::UnsupportedEntityType {
            kind: configuration.synthetic_type.clone(),
        }
    })?;
    let common = StateValue::object()
        .with(FIELD_MARK_SYNTHETIC_CALL, configuration.mark_synthetic_call)
        .with(FIELD_RETRIES, configuration.retries)
        .with(FIELD_RETRY_INTERVAL, configuration.retry_interval)
        .with(FIELD_TIMEOUT, configuration.timeout.clone());
    let slot = match kind {
        SyntheticTestKind::HttpAction => common
            .with(FIELD_URL, configuration.url.clone())
            .with(FIELD_OPERATION, configuration.operation.clone())
            .with(FIELD_HEADERS, configuration.headers.as_ref().map(StateValue::string_map_or_null))
            .with(FIELD_BODY, configuration.body.clone())
            .with(FIELD_VALIDATION_STRING, configuration.validation_string.clone())
            .with(FIELD_FOLLOW_REDIRECT, configuration.follow_redirect)
            .with(FIELD_ALLOW_INSECURE, configuration.allow_insecure)
            .with(FIELD_EXPECT_STATUS, configuration.expect_status)
            .with(FIELD_EXPECT_MATCH, configuration.expect_match.clone()),
        SyntheticTestKind::HttpScript => common.with(FIELD_SCRIPT, configuration.script.clone()),
    };
    let mut state = StateValue::object()
        .with(FIELD_ID, &test.id)
        .with(FIELD_LABEL, &test.label)
        .with(FIELD_DESCRIPTION, test.description.clone().filter(|text| !text.is_empty()))
        .with(FIELD_ACTIVE, test.active)
        .with(FIELD_APPLICATION_ID, test.application_id.clone())
        .with(FIELD_CUSTOM_PROPERTIES, StateValue::string_map_or_null(&test.custom_properties))
        .with(FIELD_LOCATIONS, StateValue::string_set(test.locations.iter().cloned()))
        .with(FIELD_PLAYBACK_MODE, &test.playback_mode)
        .with(FIELD_TEST_FREQUENCY, test.test_frequency.unwrap_or(DEFAULT_TEST_FREQUENCY));
    for other in SyntheticTestKind::ALL {
        let value = if other == kind { slot.clone() } else { StateValue::Null };
        state.insert(other.field(), value);
    }
    Ok(state)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
