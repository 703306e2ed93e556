// crates/instana-restapi/src/api.rs
// ============================================================================
// Module: Instana API Accessor
// Description: One typed REST resource per managed resource kind.
// Purpose: Keep resource paths and verb modes in a single table.
// Dependencies: crate::client, crate::models, crate::resource
// ============================================================================

//! ## Overview
//! [`InstanaApi`] owns the shared [`RestClient`] and builds a
//! [`RestResource`] on demand. Building a resource view is cheap: it clones
//! the client `Arc` and copies the path.

use std::fmt;
use std::sync::Arc;

use crate::client::RestClient;
use crate::models::alerting_channel::AlertingChannel;
use crate::models::alerting_config::AlertingConfiguration;
use crate::models::api_token::ApiToken;
use crate::models::application_alert::ApplicationAlertConfig;
use crate::models::application_config::ApplicationConfig;
use crate::models::automation::AutomationAction;
use crate::models::automation::AutomationPolicy;
use crate::models::custom_dashboard::CustomDashboard;
use crate::models::custom_event_spec::CustomEventSpecification;
use crate::models::group::Group;
use crate::models::infra_alert::InfraAlertConfig;
use crate::models::log_alert::LogAlertConfig;
use crate::models::sli::SliConfig;
use crate::models::slo::SloConfig;
use crate::models::slo_alert::SloAlertConfig;
use crate::models::synthetic::SyntheticAlertConfig;
use crate::models::synthetic::SyntheticTest;
use crate::models::website_alert::WebsiteAlertConfig;
use crate::resource::InstanaDataObject;
use crate::resource::RestMode;
use crate::resource::RestResource;

// ============================================================================
// SECTION: Paths
// ============================================================================

/// Alerting configurations.
pub const ALERTING_CONFIG_PATH: &str = "/api/events/settings/alerts";
/// Alerting channels.
pub const ALERTING_CHANNEL_PATH: &str = "/api/events/settings/alertingChannels";
/// Custom event specifications.
pub const CUSTOM_EVENT_SPECIFICATION_PATH: &str =
    "/api/events/settings/event-specifications/custom";
/// Application smart alerts.
pub const APPLICATION_ALERT_CONFIG_PATH: &str = "/api/events/settings/application-alert-configs";
/// Global application smart alerts.
pub const GLOBAL_APPLICATION_ALERT_CONFIG_PATH: &str =
    "/api/events/settings/global-alert-configs/applications";
/// Infrastructure smart alerts.
pub const INFRA_ALERT_CONFIG_PATH: &str = "/api/events/settings/infra-alert-configs";
/// Log smart alerts.
pub const LOG_ALERT_CONFIG_PATH: &str = "/api/events/settings/global-alert-configs/logs";
/// Website smart alerts.
pub const WEBSITE_ALERT_CONFIG_PATH: &str = "/api/events/settings/website-alert-configs";
/// Synthetic smart alerts.
pub const SYNTHETIC_ALERT_CONFIG_PATH: &str =
    "/api/events/settings/global-alert-configs/synthetics";
/// SLO smart alerts.
pub const SLO_ALERT_CONFIG_PATH: &str = "/api/events/settings/global-alert-configs/service-levels";
/// Service level indicators.
pub const SLI_CONFIG_PATH: &str = "/api/settings/v2/sli";
/// Service level objectives.
pub const SLO_CONFIG_PATH: &str = "/api/settings/slo";
/// API tokens.
pub const API_TOKEN_PATH: &str = "/api/settings/api-tokens";
/// RBAC groups.
pub const GROUP_PATH: &str = "/api/settings/rbac/groups";
/// Custom dashboards.
pub const CUSTOM_DASHBOARD_PATH: &str = "/api/custom-dashboard";
/// Synthetic tests.
pub const SYNTHETIC_TEST_PATH: &str = "/api/synthetics/settings/tests";
/// Automation actions.
pub const AUTOMATION_ACTION_PATH: &str = "/api/automation/actions";
/// Automation policies.
pub const AUTOMATION_POLICY_PATH: &str = "/api/automation/policies";
/// Application perspectives.
pub const APPLICATION_CONFIG_PATH: &str = "/api/application-monitoring/settings/application";

// ============================================================================
// SECTION: Accessor
// ============================================================================

/// Hands out typed resource views over a shared client.
#[derive(Clone)]
pub struct InstanaApi {
    /// Shared transport.
    client: Arc<dyn RestClient>,
}

impl fmt::Debug for InstanaApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanaApi").finish_non_exhaustive()
    }
}

impl InstanaApi {
    /// Wraps a transport.
    #[must_use]
    pub fn new(client: Arc<dyn RestClient>) -> Self {
        Self {
            client,
        }
    }

    /// Returns the shared transport.
    #[must_use]
    pub fn client(&self) -> Arc<dyn RestClient> {
        Arc::clone(&self.client)
    }

    /// Builds a resource view for `path`.
    fn resource<T: InstanaDataObject>(
        &self,
        path: &'static str,
        mode: RestMode,
    ) -> RestResource<T> {
        RestResource::new(Arc::clone(&self.client), path, mode)
    }

    /// Alerting configurations.
    #[must_use]
    pub fn alerting_configurations(&self) -> RestResource<AlertingConfiguration> {
        self.resource(ALERTING_CONFIG_PATH, RestMode::CreatePutUpdatePut)
    }

    /// Alerting channels.
    #[must_use]
    pub fn alerting_channels(&self) -> RestResource<AlertingChannel> {
        self.resource(ALERTING_CHANNEL_PATH, RestMode::CreatePutUpdatePut)
    }

    /// Custom event specifications.
    #[must_use]
    pub fn custom_event_specifications(&self) -> RestResource<CustomEventSpecification> {
        self.resource(CUSTOM_EVENT_SPECIFICATION_PATH, RestMode::CreatePutUpdatePut)
    }

    /// Application smart alerts.
    #[must_use]
    pub fn application_alert_configs(&self) -> RestResource<ApplicationAlertConfig> {
        self.resource(APPLICATION_ALERT_CONFIG_PATH, RestMode::CreatePostUpdatePost)
    }

    /// Global application smart alerts.
    #[must_use]
    pub fn global_application_alert_configs(&self) -> RestResource<ApplicationAlertConfig> {
        self.resource(GLOBAL_APPLICATION_ALERT_CONFIG_PATH, RestMode::CreatePostUpdatePost)
    }

    /// Infrastructure smart alerts.
    #[must_use]
    pub fn infra_alert_configs(&self) -> RestResource<InfraAlertConfig> {
        self.resource(INFRA_ALERT_CONFIG_PATH, RestMode::CreatePostUpdatePost)
    }

    /// Log smart alerts.
    #[must_use]
    pub fn log_alert_configs(&self) -> RestResource<LogAlertConfig> {
        self.resource(LOG_ALERT_CONFIG_PATH, RestMode::CreatePostUpdatePost)
    }

    /// Website smart alerts.
    #[must_use]
    pub fn website_alert_configs(&self) -> RestResource<WebsiteAlertConfig> {
        self.resource(WEBSITE_ALERT_CONFIG_PATH, RestMode::CreatePostUpdatePost)
    }

    /// Synthetic smart alerts.
    #[must_use]
    pub fn synthetic_alert_configs(&self) -> RestResource<SyntheticAlertConfig> {
        self.resource(SYNTHETIC_ALERT_CONFIG_PATH, RestMode::CreatePostUpdatePost)
    }

    /// SLO smart alerts.
    #[must_use]
    pub fn slo_alert_configs(&self) -> RestResource<SloAlertConfig> {
        self.resource(SLO_ALERT_CONFIG_PATH, RestMode::CreatePostUpdatePost)
    }

    /// Service level indicators. Updates are rejected.
    #[must_use]
    pub fn sli_configs(&self) -> RestResource<SliConfig> {
        self.resource(SLI_CONFIG_PATH, RestMode::CreatePostUpdateNotSupported)
    }

    /// Service level objectives.
    #[must_use]
    pub fn slo_configs(&self) -> RestResource<SloConfig> {
        self.resource(SLO_CONFIG_PATH, RestMode::CreatePostUpdatePut)
    }

    /// API tokens, routed by internal id.
    #[must_use]
    pub fn api_tokens(&self) -> RestResource<ApiToken> {
        self.resource(API_TOKEN_PATH, RestMode::CreatePostUpdatePut)
    }

    /// RBAC groups.
    #[must_use]
    pub fn groups(&self) -> RestResource<Group> {
        self.resource(GROUP_PATH, RestMode::CreatePostUpdatePut)
    }

    /// Custom dashboards.
    #[must_use]
    pub fn custom_dashboards(&self) -> RestResource<CustomDashboard> {
        self.resource(CUSTOM_DASHBOARD_PATH, RestMode::CreatePostUpdatePut)
    }

    /// Synthetic tests.
    #[must_use]
    pub fn synthetic_tests(&self) -> RestResource<SyntheticTest> {
        self.resource(SYNTHETIC_TEST_PATH, RestMode::CreatePostUpdatePut)
    }

    /// Automation actions.
    #[must_use]
    pub fn automation_actions(&self) -> RestResource<AutomationAction> {
        self.resource(AUTOMATION_ACTION_PATH, RestMode::CreatePostUpdatePut)
    }

    /// Automation policies.
    #[must_use]
    pub fn automation_policies(&self) -> RestResource<AutomationPolicy> {
        self.resource(AUTOMATION_POLICY_PATH, RestMode::CreatePostUpdatePut)
    }

    /// Application perspectives.
    #[must_use]
    pub fn application_configs(&self) -> RestResource<ApplicationConfig> {
        self.resource(APPLICATION_CONFIG_PATH, RestMode::CreatePostUpdatePut)
    }
}
