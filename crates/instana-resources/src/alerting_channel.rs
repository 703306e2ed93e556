// crates/instana-resources/src/alerting_channel.rs
// ============================================================================
// Module: Alerting Channel Handle
// Description: Notification destinations such as email, Slack, or webhooks.
// Purpose: Map one channel block per kind onto the flat backend object.
// Dependencies: instana-core, instana-restapi
// ============================================================================

//! ## Overview
//! Each channel kind is its own block in state and exactly one block must be
//! set; the block selects the wire `kind`. Secrets the backend never echoes
//! (ServiceNow passwords) are carried over from prior state.

use std::collections::BTreeMap;

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
use instana_core::mappers::variant_state;
use instana_restapi::InstanaApi;
use instana_restapi::RestResource;
use instana_restapi::models::alerting_channel::AlertingChannel;
use instana_restapi::models::alerting_channel::AlertingChannelKind;

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
pub const RESOURCE_NAME: &str = "instana_alerting_channel";
/// Current schema version.
const SCHEMA_VERSION: i64 = 1;

/// Email recipients.
const FIELD_EMAILS: &str = "emails";
/// Integration API key.
const FIELD_API_KEY: &str = "api_key";
/// OpsGenie tags.
const FIELD_TAGS: &str = "tags";
/// OpsGenie region.
const FIELD_REGION: &str = "region";
/// PagerDuty integration key.
const FIELD_SERVICE_INTEGRATION_KEY: &str = "service_integration_key";
/// Single webhook URL.
const FIELD_WEBHOOK_URL: &str = "webhook_url";
/// Generic webhook URLs.
const FIELD_WEBHOOK_URLS: &str = "webhook_urls";
/// Slack icon.
const FIELD_ICON_URL: &str = "icon_url";
/// Slack channel.
const FIELD_CHANNEL: &str = "channel";
/// Splunk URL.
const FIELD_URL: &str = "url";
/// Splunk token.
const FIELD_TOKEN: &str = "token";
/// VictorOps routing key.
const FIELD_ROUTING_KEY: &str = "routing_key";
/// Extra request headers.
const FIELD_HTTP_HEADERS: &str = "http_headers";
/// ServiceNow instance.
const FIELD_SERVICE_NOW_URL: &str = "service_now_url";
/// ServiceNow user.
const FIELD_USERNAME: &str = "username";
/// ServiceNow password.
const FIELD_PASSWORD: &str = "password";
/// Closes incidents automatically.
const FIELD_AUTO_CLOSE_INCIDENTS: &str = "auto_close_incidents";
/// ServiceNow tenant.
const FIELD_TENANT: &str = "tenant";
/// ServiceNow unit.
const FIELD_UNIT: &str = "unit";
/// Instana URL linked from incidents.
const FIELD_INSTANA_URL: &str = "instana_url";
/// Sends Instana notes.
const FIELD_SEND_INSTANA_NOTES: &str = "enable_send_instana_notes";
/// Sends ServiceNow activities.
const FIELD_SEND_ACTIVITIES: &str = "enable_send_service_now_activities";
/// Sends ServiceNow work notes.
const FIELD_SEND_WORK_NOTES: &str = "enable_send_service_now_work_notes";
/// Keeps manually closed incidents closed.
const FIELD_MANUALLY_CLOSED: &str = "manually_closed_incidents";
/// Resolves incidents on close.
const FIELD_RESOLUTION: &str = "resolution_of_incident";
/// ServiceNow state applied on close.
const FIELD_STATUS_ON_CLOSE: &str = "snow_status_on_close_event";
/// Prometheus receiver.
const FIELD_RECEIVER: &str = "receiver";

/// OpsGenie regions.
pub const OPS_GENIE_REGIONS: [&str; 2] = ["EU", "US"];

/// Channel block names in declaration order.
pub const CHANNEL_FIELDS: [&str; 14] = [
    "email",
    "google_chat",
    "office_365",
    "ops_genie",
    "pager_duty",
    "slack",
    "splunk",
    "victor_ops",
    "webhook",
    "service_now",
    "service_now_application",
    "prometheus_webhook",
    "webex_teams_webhook",
    "watson_aiops_webhook",
];

// ============================================================================
// SECTION: Blocks
// ============================================================================

/// State block name of a channel kind.
#[must_use]
pub const fn block_name(kind: AlertingChannelKind) -> &'static str {
    match kind {
        AlertingChannelKind::Email => "email",
        AlertingChannelKind::GoogleChat => "google_chat",
        AlertingChannelKind::Office365 => "office_365",
        AlertingChannelKind::OpsGenie => "ops_genie",
        AlertingChannelKind::PagerDuty => "pager_duty",
        AlertingChannelKind::Slack => "slack",
        AlertingChannelKind::Splunk => "splunk",
        AlertingChannelKind::VictorOps => "victor_ops",
        AlertingChannelKind::WebHook => "webhook",
        AlertingChannelKind::ServiceNowWebhook => "service_now",
        AlertingChannelKind::ServiceNowApplication => "service_now_application",
        AlertingChannelKind::PrometheusWebhook => "prometheus_webhook",
        AlertingChannelKind::WebexTeamsWebhook => "webex_teams_webhook",
        AlertingChannelKind::WatsonAiopsWebhook => "watson_aiops_webhook",
    }
}

/// Channel kind of a state block name.
fn kind_of_block(name: &str) -> Option<AlertingChannelKind> {
    AlertingChannelKind::ALL.into_iter().find(|kind| block_name(*kind) == name)
}

/// Attributes of a channel block.
fn block_attributes(kind: AlertingChannelKind) -> Vec<Attribute> {
    let webhook_url = || Attribute::string(FIELD_WEBHOOK_URL).required();
    let headers = || Attribute::new(FIELD_HTTP_HEADERS, AttributeType::string_map());
    let service_now_base = || {
        vec![
            Attribute::string(FIELD_SERVICE_NOW_URL).required(),
            Attribute::string(FIELD_USERNAME).required(),
            Attribute::string(FIELD_PASSWORD).sensitive(),
        ]
    };
    match kind {
        AlertingChannelKind::Email => vec![
            Attribute::new(FIELD_EMAILS, AttributeType::string_set())
                .required()
                .validate(Validator::SizeBetween(1, usize::MAX)),
        ],
        AlertingChannelKind::OpsGenie => vec![
            Attribute::string(FIELD_API_KEY).required().sensitive(),
            Attribute::new(FIELD_TAGS, AttributeType::string_list()).required(),
            Attribute::string(FIELD_REGION)
                .required()
                .validate(Validator::OneOf(&OPS_GENIE_REGIONS)),
        ],
        AlertingChannelKind::PagerDuty => {
            vec![Attribute::string(FIELD_SERVICE_INTEGRATION_KEY).required().sensitive()]
        }
        AlertingChannelKind::Slack => vec![
            webhook_url(),
            Attribute::string(FIELD_ICON_URL),
            Attribute::string(FIELD_CHANNEL),
        ],
        AlertingChannelKind::Splunk => vec![
            Attribute::string(FIELD_URL).required(),
            Attribute::string(FIELD_TOKEN).required().sensitive(),
        ],
        AlertingChannelKind::VictorOps => vec![
            Attribute::string(FIELD_API_KEY).required().sensitive(),
            Attribute::string(FIELD_ROUTING_KEY).required(),
        ],
        AlertingChannelKind::WebHook => vec![
            Attribute::new(FIELD_WEBHOOK_URLS, AttributeType::string_set())
                .required()
                .validate(Validator::SizeBetween(1, usize::MAX)),
            headers(),
        ],
        AlertingChannelKind::Office365
        | AlertingChannelKind::GoogleChat
        | AlertingChannelKind::WebexTeamsWebhook => vec![webhook_url()],
        AlertingChannelKind::ServiceNowWebhook => {
            let mut attributes = service_now_base();
            attributes.push(Attribute::bool(FIELD_AUTO_CLOSE_INCIDENTS));
            attributes
        }
        AlertingChannelKind::ServiceNowApplication => {
            let mut attributes = service_now_base();
            attributes.extend([
                Attribute::string(FIELD_TENANT).required(),
                Attribute::string(FIELD_UNIT).required(),
                Attribute::string(FIELD_INSTANA_URL),
                Attribute::bool(FIELD_SEND_INSTANA_NOTES),
                Attribute::bool(FIELD_SEND_ACTIVITIES),
                Attribute::bool(FIELD_SEND_WORK_NOTES),
                Attribute::bool(FIELD_MANUALLY_CLOSED),
                Attribute::bool(FIELD_RESOLUTION),
                Attribute::int(FIELD_STATUS_ON_CLOSE),
            ]);
            attributes
        }
        AlertingChannelKind::PrometheusWebhook => {
            vec![Attribute::string(FIELD_RECEIVER).required(), Attribute::string(FIELD_WEBHOOK_URL)]
        }
        AlertingChannelKind::WatsonAiopsWebhook => vec![webhook_url(), headers()],
    }
}

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Resource schema.
fn schema() -> Schema {
    let mut attributes = vec![id_attribute(), name_attribute(MAX_NAME_LENGTH)];
    attributes.extend(
        AlertingChannelKind::ALL
            .into_iter()
            .map(|kind| Attribute::block(block_name(kind), block_attributes(kind))),
    );
    Schema::new("Alerting channel; exactly one channel block must be set", attributes)
}

// ============================================================================
// SECTION: Handle
// ============================================================================

/// Handle for alerting channels.
#[derive(Debug)]
pub struct AlertingChannelHandle {
    /// Static description.
    metadata: ResourceMetadata,
}

impl AlertingChannelHandle {
    /// Builds the handle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: ResourceMetadata::new(RESOURCE_NAME, schema(), SCHEMA_VERSION),
        }
    }
}

impl Default for AlertingChannelHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceHandle for AlertingChannelHandle {
    type Payload = AlertingChannel;

    fn metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }

    fn rest_resource(&self, api: &InstanaApi) -> RestResource<AlertingChannel> {
        api.alerting_channels()
    }

    fn state_to_payload(&self, state: &StateValue) -> Result<AlertingChannel, Diagnostics> {
        channel_from_state(&ObjectReader::root(state))
    }

    fn payload_to_state(
        &self,
        payload: &AlertingChannel,
        prior: &StateValue,
    ) -> Result<StateValue, Diagnostics> {
        let block = block_name(payload.kind);
        let prior_password = prior.get(block).get(FIELD_PASSWORD).clone();
        let slot = channel_to_state(payload, prior_password);
        let mut state = variant_state(&CHANNEL_FIELDS, block, slot);
        state.insert(FIELD_ID, &payload.id);
        state.insert(FIELD_NAME, &payload.name);
        Ok(state)
    }
}

// ============================================================================
// SECTION: State To Payload
// ============================================================================

/// Maps a resource object to the payload.
fn channel_from_state(reader: &ObjectReader<'_>) -> Result<AlertingChannel, Diagnostics> {
    let mut diagnostics = Diagnostics::new();
    let id = diagnostics.take(id_from_state(reader));
    let name = diagnostics.take(reader.required_string(FIELD_NAME));
    let Some(channel) = diagnostics.collect(settings_from_state(reader, id, name)) else {
        return Err(diagnostics);
    };
    diagnostics.finish(channel)
}

/// Maps the selected channel block onto a channel named `name`.
fn settings_from_state(
    reader: &ObjectReader<'_>,
    id: String,
    name: String,
) -> Result<AlertingChannel, MappingError> {
    let selected = select_variant(reader, &CHANNEL_FIELDS, "alerting channel")?;
    let kind = kind_of_block(selected.name).ok_or_else(|| MappingError::UnsupportedEntityType {
        kind: selected.name.to_string(),
    })?;
    let slot = selected.reader();
    let mut channel = AlertingChannel::new(id, name, kind);
    match kind {
        AlertingChannelKind::Email => {
            channel.emails = slot.string_list(FIELD_EMAILS)?;
        }
        AlertingChannelKind::OpsGenie => {
            channel.api_key = Some(slot.required_string(FIELD_API_KEY)?);
            channel.tags = Some(slot.string_list(FIELD_TAGS)?.join(","));
            channel.region = Some(slot.required_string(FIELD_REGION)?);
        }
        AlertingChannelKind::PagerDuty => {
            channel.service_integration_key =
                Some(slot.required_string(FIELD_SERVICE_INTEGRATION_KEY)?);
        }
        AlertingChannelKind::Slack => {
            channel.webhook_url = Some(slot.required_string(FIELD_WEBHOOK_URL)?);
            channel.icon_url = slot.optional_string(FIELD_ICON_URL)?;
            channel.channel = slot.optional_string(FIELD_CHANNEL)?;
        }
        AlertingChannelKind::Splunk => {
            channel.url = Some(slot.required_string(FIELD_URL)?);
            channel.token = Some(slot.required_string(FIELD_TOKEN)?);
        }
        AlertingChannelKind::VictorOps => {
            channel.api_key = Some(slot.required_string(FIELD_API_KEY)?);
            channel.routing_key = Some(slot.required_string(FIELD_ROUTING_KEY)?);
        }
        AlertingChannelKind::WebHook => {
            channel.webhook_urls = slot.string_list(FIELD_WEBHOOK_URLS)?;
            channel.headers = headers_from_state(&slot)?;
        }
        AlertingChannelKind::Office365
        | AlertingChannelKind::GoogleChat
        | AlertingChannelKind::WebexTeamsWebhook => {
            channel.webhook_url = Some(slot.required_string(FIELD_WEBHOOK_URL)?);
        }
        AlertingChannelKind::ServiceNowWebhook => {
            channel.service_now_url = Some(slot.required_string(FIELD_SERVICE_NOW_URL)?);
            channel.username = Some(slot.required_string(FIELD_USERNAME)?);
            channel.password = slot.optional_string(FIELD_PASSWORD)?;
            channel.auto_close_incidents = slot.optional_bool(FIELD_AUTO_CLOSE_INCIDENTS)?;
        }
        AlertingChannelKind::ServiceNowApplication => {
            channel.service_now_url = Some(slot.required_string(FIELD_SERVICE_NOW_URL)?);
            channel.username = Some(slot.required_string(FIELD_USERNAME)?);
            channel.password = slot.optional_string(FIELD_PASSWORD)?;
            channel.tenant = Some(slot.required_string(FIELD_TENANT)?);
            channel.unit = Some(slot.required_string(FIELD_UNIT)?);
            channel.instana_url = slot.optional_string(FIELD_INSTANA_URL)?;
            channel.enable_send_instana_notes = slot.optional_bool(FIELD_SEND_INSTANA_NOTES)?;
            channel.enable_send_service_now_activities = slot.optional_bool(FIELD_SEND_ACTIVITIES)?;
            channel.enable_send_service_now_work_notes = slot.optional_bool(FIELD_SEND_WORK_NOTES)?;
            channel.manually_closed_incidents = slot.optional_bool(FIELD_MANUALLY_CLOSED)?;
            channel.resolution_of_incident = slot.optional_bool(FIELD_RESOLUTION)?;
            channel.snow_status_on_close_event = slot.optional_i64(FIELD_STATUS_ON_CLOSE)?;
        }
        AlertingChannelKind::PrometheusWebhook => {
            channel.receiver = Some(slot.required_string(FIELD_RECEIVER)?);
            channel.webhook_url = slot.optional_string(FIELD_WEBHOOK_URL)?;
        }
        AlertingChannelKind::WatsonAiopsWebhook => {
            channel.webhook_url = Some(slot.required_string(FIELD_WEBHOOK_URL)?);
            channel.headers = headers_from_state(&slot)?;
        }
    }
    Ok(channel)
}

/// Renders the header map as `Name: value` lines.
fn headers_from_state(slot: &ObjectReader<'_>) -> Result<Vec<String>, MappingError> {
    Ok(slot
        .string_map(FIELD_HTTP_HEADERS)?
        .into_iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect())
}

// ============================================================================
// SECTION: Payload To State
// ============================================================================

/// Parses `Name: value` lines; lines without a colon map to an empty value.
fn headers_to_state(headers: &[String]) -> StateValue {
    if headers.is_empty() {
        return StateValue::Null;
    }
    let entries: BTreeMap<String, StateValue> = headers
        .iter()
        .map(|line| match line.split_once(':') {
            Some((name, value)) => (name.trim().to_string(), StateValue::from(value.trim())),
            None => (line.trim().to_string(), StateValue::from("")),
        })
        .collect();
    StateValue::Map(entries)
}

/// Maps the populated fields of the channel kind.
fn channel_to_state(channel: &AlertingChannel, prior_password: StateValue) -> StateValue {
    let slot = StateValue::object();
    match channel.kind {
        AlertingChannelKind::Email => {
            slot.with(FIELD_EMAILS, StateValue::string_set(channel.emails.iter().cloned()))
        }
        AlertingChannelKind::OpsGenie => {
            let tags: Vec<&str> = channel
                .tags
                .as_deref()
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .collect();
            slot.with(FIELD_API_KEY, channel.api_key.clone())
                .with(FIELD_TAGS, StateValue::string_list(tags))
                .with(FIELD_REGION, channel.region.clone())
        }
        AlertingChannelKind::PagerDuty => {
            slot.with(FIELD_SERVICE_INTEGRATION_KEY, channel.service_integration_key.clone())
        }
        AlertingChannelKind::Slack => slot
            .with(FIELD_WEBHOOK_URL, channel.webhook_url.clone())
            .with(FIELD_ICON_URL, channel.icon_url.clone())
            .with(FIELD_CHANNEL, channel.channel.clone()),
        AlertingChannelKind::Splunk => {
            slot.with(FIELD_URL, channel.url.clone()).with(FIELD_TOKEN, channel.token.clone())
        }
        AlertingChannelKind::VictorOps => slot
            .with(FIELD_API_KEY, channel.api_key.clone())
            .with(FIELD_ROUTING_KEY, channel.routing_key.clone()),
        AlertingChannelKind::WebHook => slot
            .with(FIELD_WEBHOOK_URLS, StateValue::string_set(channel.webhook_urls.iter().cloned()))
            .with(FIELD_HTTP_HEADERS, headers_to_state(&channel.headers)),
        AlertingChannelKind::Office365
        | AlertingChannelKind::GoogleChat
        | AlertingChannelKind::WebexTeamsWebhook => {
            slot.with(FIELD_WEBHOOK_URL, channel.webhook_url.clone())
        }
        AlertingChannelKind::ServiceNowWebhook => slot
            .with(FIELD_SERVICE_NOW_URL, channel.service_now_url.clone())
            .with(FIELD_USERNAME, channel.username.clone())
            .with(FIELD_PASSWORD, password_or_prior(channel, prior_password))
            .with(FIELD_AUTO_CLOSE_INCIDENTS, channel.auto_close_incidents),
        AlertingChannelKind::ServiceNowApplication => slot
            .with(FIELD_SERVICE_NOW_URL, channel.service_now_url.clone())
            .with(FIELD_USERNAME, channel.username.clone())
            .with(FIELD_PASSWORD, password_or_prior(channel, prior_password))
            .with(FIELD_TENANT, channel.tenant.clone())
            .with(FIELD_UNIT, channel.unit.clone())
            .with(FIELD_INSTANA_URL, channel.instana_url.clone())
            .with(FIELD_SEND_INSTANA_NOTES, channel.enable_send_instana_notes)
            .with(FIELD_SEND_ACTIVITIES, channel.enable_send_service_now_activities)
            .with(FIELD_SEND_WORK_NOTES, channel.enable_send_service_now_work_notes)
            .with(FIELD_MANUALLY_CLOSED, channel.manually_closed_incidents)
            .with(FIELD_RESOLUTION, channel.resolution_of_incident)
            .with(FIELD_STATUS_ON_CLOSE, channel.snow_status_on_close_event),
        AlertingChannelKind::PrometheusWebhook => slot
            .with(FIELD_RECEIVER, channel.receiver.clone())
            .with(FIELD_WEBHOOK_URL, channel.webhook_url.clone()),
        AlertingChannelKind::WatsonAiopsWebhook => slot
            .with(FIELD_WEBHOOK_URL, channel.webhook_url.clone())
            .with(FIELD_HTTP_HEADERS, headers_to_state(&channel.headers)),
    }
}

/// Uses the returned password, or the prior one when the backend masks it.
fn password_or_prior(channel: &AlertingChannel, prior: StateValue) -> StateValue {
    match channel.password.as_deref() {
        Some(password) if !password.is_empty() => StateValue::from(password),
        _ => prior,
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
