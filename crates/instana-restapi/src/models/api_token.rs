// crates/instana-restapi/src/models/api_token.rs
// ============================================================================
// Module: API Token Payloads
// Description: API tokens and their permission flags.
// Purpose: Model tokens with a table-driven permission set.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! API tokens carry a long, growing list of boolean permission flags. They
//! are kept in a flattened map so unknown flags returned by newer backends
//! survive a read/write cycle; [`API_TOKEN_PERMISSIONS`] lists the flags
//! exposed as state attributes. Tokens are routed by `internalId`.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::resource::InstanaDataObject;

// ============================================================================
// SECTION: Permissions
// ============================================================================

/// Permission flags as `(state attribute, wire field)` pairs.
pub const API_TOKEN_PERMISSIONS: &[(&str, &str)] = &[
    ("can_configure_service_mapping", "canConfigureServiceMapping"),
    ("can_configure_eum_applications", "canConfigureEumApplications"),
    ("can_configure_mobile_app_monitoring", "canConfigureMobileAppMonitoring"),
    ("can_configure_users", "canConfigureUsers"),
    ("can_install_new_agents", "canInstallNewAgents"),
    ("can_configure_integrations", "canConfigureIntegrations"),
    ("can_configure_events_and_alerts", "canConfigureEventsAndAlerts"),
    ("can_configure_maintenance_windows", "canConfigureMaintenanceWindows"),
    ("can_configure_application_smart_alerts", "canConfigureApplicationSmartAlerts"),
    ("can_configure_website_smart_alerts", "canConfigureWebsiteSmartAlerts"),
    ("can_configure_mobile_app_smart_alerts", "canConfigureMobileAppSmartAlerts"),
    ("can_configure_api_tokens", "canConfigureApiTokens"),
    ("can_configure_agent_run_mode", "canConfigureAgentRunMode"),
    ("can_view_audit_log", "canViewAuditLog"),
    ("can_configure_agents", "canConfigureAgents"),
    ("can_configure_authentication_methods", "canConfigureAuthenticationMethods"),
    ("can_configure_applications", "canConfigureApplications"),
    ("can_configure_teams", "canConfigureTeams"),
    ("can_configure_releases", "canConfigureReleases"),
    ("can_configure_log_management", "canConfigureLogManagement"),
    ("can_create_public_custom_dashboards", "canCreatePublicCustomDashboards"),
    ("can_view_logs", "canViewLogs"),
    ("can_view_trace_details", "canViewTraceDetails"),
    ("can_configure_session_settings", "canConfigureSessionSettings"),
    ("can_configure_global_alert_payload", "canConfigureGlobalAlertPayload"),
    ("can_configure_global_application_smart_alerts", "canConfigureGlobalApplicationSmartAlerts"),
    ("can_configure_global_synthetic_smart_alerts", "canConfigureGlobalSyntheticSmartAlerts"),
    ("can_configure_global_infra_smart_alerts", "canConfigureGlobalInfraSmartAlerts"),
    ("can_configure_global_log_smart_alerts", "canConfigureGlobalLogSmartAlerts"),
    ("can_view_account_and_billing_information", "canViewAccountAndBillingInformation"),
    ("can_edit_all_accessible_custom_dashboards", "canEditAllAccessibleCustomDashboards"),
    ("limited_applications_scope", "limitedApplicationsScope"),
    ("limited_biz_ops_scope", "limitedBizOpsScope"),
    ("limited_websites_scope", "limitedWebsitesScope"),
    ("limited_kubernetes_scope", "limitedKubernetesScope"),
    ("limited_mobile_apps_scope", "limitedMobileAppsScope"),
    ("limited_infrastructure_scope", "limitedInfrastructureScope"),
    ("limited_synthetics_scope", "limitedSyntheticsScope"),
    ("limited_vsphere_scope", "limitedVsphereScope"),
    ("limited_phmc_scope", "limitedPhmcScope"),
    ("limited_pvc_scope", "limitedPvcScope"),
    ("limited_zhmc_scope", "limitedZhmcScope"),
    ("limited_pcf_scope", "limitedPcfScope"),
    ("limited_openstack_scope", "limitedOpenstackScope"),
    ("limited_automation_scope", "limitedAutomationScope"),
    ("limited_logs_scope", "limitedLogsScope"),
    ("limited_nutanix_scope", "limitedNutanixScope"),
    ("limited_xen_server_scope", "limitedXenServerScope"),
    ("limited_windows_hypervisor_scope", "limitedWindowsHypervisorScope"),
    ("limited_alert_channels_scope", "limitedAlertChannelsScope"),
    ("limited_linux_kvm_hypervisor_scope", "limitedLinuxKvmHypervisorScope"),
    ("limited_service_level_scope", "limitedServiceLevelScope"),
    ("limited_ai_gateway_scope", "limitedAiGatewayScope"),
    ("can_configure_personal_api_tokens", "canConfigurePersonalApiTokens"),
    ("can_configure_database_management", "canConfigureDatabaseManagement"),
    ("can_configure_automation_actions", "canConfigureAutomationActions"),
    ("can_configure_automation_policies", "canConfigureAutomationPolicies"),
    ("can_run_automation_actions", "canRunAutomationActions"),
    ("can_delete_automation_action_history", "canDeleteAutomationActionHistory"),
    ("can_configure_synthetic_tests", "canConfigureSyntheticTests"),
    ("can_configure_synthetic_locations", "canConfigureSyntheticLocations"),
    ("can_configure_synthetic_credentials", "canConfigureSyntheticCredentials"),
    ("can_view_synthetic_tests", "canViewSyntheticTests"),
    ("can_view_synthetic_locations", "canViewSyntheticLocations"),
    ("can_view_synthetic_test_results", "canViewSyntheticTestResults"),
    ("can_use_synthetic_credentials", "canUseSyntheticCredentials"),
    ("can_configure_bizops", "canConfigureBizops"),
    ("can_view_business_processes", "canViewBusinessProcesses"),
    ("can_view_business_process_details", "canViewBusinessProcessDetails"),
    ("can_view_business_activities", "canViewBusinessActivities"),
    ("can_view_biz_alerts", "canViewBizAlerts"),
    ("can_delete_logs", "canDeleteLogs"),
    ("can_create_heap_dump", "canCreateHeapDump"),
    ("can_create_thread_dump", "canCreateThreadDump"),
    ("can_manually_close_issue", "canManuallyCloseIssue"),
    ("can_view_log_volume", "canViewLogVolume"),
    ("can_configure_log_retention_period", "canConfigureLogRetentionPeriod"),
    ("can_configure_subtraces", "canConfigureSubtraces"),
    ("can_invoke_alert_channel", "canInvokeAlertChannel"),
    ("can_configure_llm", "canConfigureLLM"),
    ("can_configure_ai_agents", "canConfigureAiAgents"),
    ("can_configure_apdex", "canConfigureApdex"),
    ("can_configure_service_level_correction_windows", "canConfigureServiceLevelCorrectionWindows"),
    ("can_configure_service_level_smart_alerts", "canConfigureServiceLevelSmartAlerts"),
    ("can_configure_service_levels", "canConfigureServiceLevels"),
];

// ============================================================================
// SECTION: Types
// ============================================================================

/// API token.
///
/// # Invariants
/// - `internal_id` is the routing id for every call after creation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiToken {
    /// Backend id.
    #[serde(default)]
    pub id: String,
    /// Secret token value.
    #[serde(default)]
    pub access_granting_token: String,
    /// Routing id.
    #[serde(default)]
    pub internal_id: String,
    /// Display name.
    pub name: String,
    /// Permission flags and any other fields returned by the backend.
    #[serde(flatten)]
    pub permissions: BTreeMap<String, Value>,
}

impl ApiToken {
    /// Returns a permission flag; absent or non-boolean values read as false.
    #[must_use]
    pub fn permission(&self, wire_name: &str) -> bool {
        self.permissions.get(wire_name).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Sets a permission flag.
    pub fn set_permission(&mut self, wire_name: &str, granted: bool) {
        self.permissions.insert(wire_name.to_string(), Value::Bool(granted));
    }
}

impl InstanaDataObject for ApiToken {
    fn id(&self) -> &str {
        &self.id
    }

    fn id_for_resource_path(&self) -> &str {
        &self.internal_id
    }
}
