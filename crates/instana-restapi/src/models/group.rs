// crates/instana-restapi/src/models/group.rs
// ============================================================================
// Module: RBAC Group Payloads
// Description: Groups with members and a scoped permission set.
// Purpose: Model role-based access control groups.
// Dependencies: serde
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::resource::InstanaDataObject;

// ============================================================================
// SECTION: Permissions
// ============================================================================

/// Permissions a group may grant, in wire form.
pub const SUPPORTED_PERMISSIONS: [&str; 58] = [
    "CAN_CONFIGURE_APPLICATIONS",
    "CAN_CONFIGURE_EUM_APPLICATIONS",
    "CAN_CONFIGURE_AGENTS",
    "CAN_VIEW_TRACE_DETAILS",
    "CAN_VIEW_LOGS",
    "CAN_CONFIGURE_SESSION_SETTINGS",
    "CAN_CONFIGURE_INTEGRATIONS",
    "CAN_CONFIGURE_GLOBAL_APPLICATION_SMART_ALERTS",
    "CAN_CONFIGURE_GLOBAL_SYNTHETIC_SMART_ALERTS",
    "CAN_CONFIGURE_GLOBAL_INFRA_SMART_ALERTS",
    "CAN_CONFIGURE_GLOBAL_LOG_SMART_ALERTS",
    "CAN_CONFIGURE_GLOBAL_ALERT_PAYLOAD",
    "CAN_CONFIGURE_MOBILE_APP_MONITORING",
    "CAN_CONFIGURE_API_TOKENS",
    "CAN_CONFIGURE_SERVICE_LEVEL_INDICATORS",
    "CAN_CONFIGURE_AUTHENTICATION_METHODS",
    "CAN_CONFIGURE_RELEASES",
    "CAN_VIEW_AUDIT_LOG",
    "CAN_CONFIGURE_EVENTS_AND_ALERTS",
    "CAN_CONFIGURE_MAINTENANCE_WINDOWS",
    "CAN_CONFIGURE_APPLICATION_SMART_ALERTS",
    "CAN_CONFIGURE_WEBSITE_SMART_ALERTS",
    "CAN_CONFIGURE_MOBILE_APP_SMART_ALERTS",
    "CAN_CONFIGURE_AGENT_RUN_MODE",
    "CAN_CONFIGURE_SERVICE_MAPPING",
    "CAN_EDIT_ALL_ACCESSIBLE_CUSTOM_DASHBOARDS",
    "CAN_CONFIGURE_USERS",
    "CAN_INSTALL_NEW_AGENTS",
    "CAN_CONFIGURE_TEAMS",
    "CAN_CREATE_PUBLIC_CUSTOM_DASHBOARDS",
    "CAN_CONFIGURE_LOG_MANAGEMENT",
    "CAN_VIEW_ACCOUNT_AND_BILLING_INFORMATION",
    "CAN_VIEW_SYNTHETIC_TESTS",
    "CAN_VIEW_SYNTHETIC_LOCATIONS",
    "CAN_CREATE_THREAD_DUMP",
    "CAN_CREATE_HEAP_DUMP",
    "CAN_CONFIGURE_DATABASE_MANAGEMENT",
    "CAN_CONFIGURE_LOG_RETENTION_PERIOD",
    "CAN_CONFIGURE_PERSONAL_API_TOKENS",
    "ACCESS_INFRASTRUCTURE_ANALYZE",
    "CAN_VIEW_LOG_VOLUME",
    "CAN_RUN_AUTOMATION_ACTIONS",
    "CAN_VIEW_SYNTHETIC_TEST_RESULTS",
    "CAN_INVOKE_ALERT_CHANNEL",
    "CAN_MANUALLY_CLOSE_ISSUE",
    "CAN_DELETE_LOGS",
    "CAN_CONFIGURE_SYNTHETIC_TESTS",
    "CAN_VIEW_BUSINESS_PROCESS_DETAILS",
    "CAN_VIEW_BIZOPS_ALERTS",
    "CAN_USE_SYNTHETIC_CREDENTIALS",
    "CAN_DELETE_AUTOMATION_ACTION_HISTORY",
    "CAN_CONFIGURE_SYNTHETIC_LOCATIONS",
    "CAN_CONFIGURE_SYNTHETIC_CREDENTIALS",
    "CAN_CONFIGURE_SUBTRACES",
    "CAN_CONFIGURE_LLM",
    "CAN_CONFIGURE_BIZOPS",
    "CAN_CONFIGURE_AUTOMATION_POLICIES",
    "CAN_CONFIGURE_AUTOMATION_ACTIONS",
];

// ============================================================================
// SECTION: Types
// ============================================================================

/// Binds a scope (application, website, ...) to the group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeBinding {
    /// Scoped object id.
    pub scope_id: String,
    /// Role within the scope.
    #[serde(default)]
    pub scope_role_id: Option<String>,
}

impl ScopeBinding {
    /// Binds a scope without a role.
    #[must_use]
    pub const fn new(scope_id: String) -> Self {
        Self {
            scope_id,
            scope_role_id: None,
        }
    }
}

/// Scopes and permissions granted to the group.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSet {
    /// Application scopes.
    #[serde(default)]
    pub application_ids: Vec<ScopeBinding>,
    /// Infrastructure dynamic focus query.
    #[serde(default)]
    pub infra_dfq_filter: Option<ScopeBinding>,
    /// Kubernetes cluster scopes.
    #[serde(default, rename = "kubernetesClusterUUIDs")]
    pub kubernetes_cluster_uuids: Vec<ScopeBinding>,
    /// Kubernetes namespace scopes.
    #[serde(default, rename = "kubernetesNamespaceUIDs")]
    pub kubernetes_namespace_uids: Vec<ScopeBinding>,
    /// Mobile app scopes.
    #[serde(default)]
    pub mobile_app_ids: Vec<ScopeBinding>,
    /// Website scopes.
    #[serde(default)]
    pub website_ids: Vec<ScopeBinding>,
    /// Granted permissions in wire form.
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl PermissionSet {
    /// Returns true when nothing is granted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.application_ids.is_empty()
            && self.kubernetes_cluster_uuids.is_empty()
            && self.kubernetes_namespace_uids.is_empty()
            && self.mobile_app_ids.is_empty()
            && self.website_ids.is_empty()
            && self.permissions.is_empty()
            && self.infra_dfq_filter.as_ref().is_none_or(|filter| filter.scope_id.is_empty())
    }
}

/// Group member.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// User id.
    pub user_id: String,
    /// User email.
    #[serde(default)]
    pub email: Option<String>,
}

/// RBAC group.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Backend id.
    #[serde(default)]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Members.
    #[serde(default)]
    pub members: Vec<Member>,
    /// Granted scopes and permissions.
    #[serde(default)]
    pub permission_set: PermissionSet,
}

impl InstanaDataObject for Group {
    fn id(&self) -> &str {
        &self.id
    }
}
