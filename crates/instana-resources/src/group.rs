// crates/instana-resources/src/group.rs
// ============================================================================
// Module: RBAC Group Handle
// Description: Groups with members and scoped permissions.
// Purpose: Map plain id sets to the scope bindings the backend stores.
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
use instana_core::StateUpgrader;
use instana_core::StateValue;
use instana_core::Validator;
use instana_core::upgrade::identity;
use instana_restapi::InstanaApi;
use instana_restapi::RestResource;
use instana_restapi::models::group::Group;
use instana_restapi::models::group::Member;
use instana_restapi::models::group::PermissionSet;
use instana_restapi::models::group::SUPPORTED_PERMISSIONS;
use instana_restapi::models::group::ScopeBinding;

use crate::common::FIELD_ID;
use crate::common::FIELD_NAME;
use crate::common::id_attribute;
use crate::common::id_from_state;
use crate::common::optional_non_empty;
use crate::common::set_or_null;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Host resource name.
pub const RESOURCE_NAME: &str = "instana_group";
/// Current schema version.
const SCHEMA_VERSION: i64 = 1;

/// Member set.
pub const FIELD_MEMBER: &str = "member";
/// Permission set block.
pub const FIELD_PERMISSION_SET: &str = "permission_set";
/// Member user id.
const FIELD_USER_ID: &str = "user_id";
/// Member email.
const FIELD_EMAIL: &str = "email";
/// Application scopes.
const FIELD_APPLICATION_IDS: &str = "application_ids";
/// Infrastructure query scope.
const FIELD_INFRA_DFQ_FILTER: &str = "infra_dfq_filter";
/// Kubernetes cluster scopes.
const FIELD_KUBERNETES_CLUSTER_UUIDS: &str = "kubernetes_cluster_uuids";
/// Kubernetes namespace scopes.
const FIELD_KUBERNETES_NAMESPACES_UUIDS: &str = "kubernetes_namespaces_uuids";
/// Mobile app scopes.
const FIELD_MOBILE_APP_IDS: &str = "mobile_app_ids";
/// Website scopes.
const FIELD_WEBSITE_IDS: &str = "website_ids";
/// Granted permissions.
const FIELD_PERMISSIONS: &str = "permissions";

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Resource schema.
fn schema() -> Schema {
    Schema::new(
        "RBAC group",
        vec![
            id_attribute(),
            Attribute::string(FIELD_NAME).required().describe("The name of the Group"),
            Attribute::block_set(
                FIELD_MEMBER,
                vec![Attribute::string(FIELD_USER_ID).required(), Attribute::string(FIELD_EMAIL)],
            )
            .describe("The members of the group"),
            Attribute::block(
                FIELD_PERMISSION_SET,
                vec![
                    Attribute::new(FIELD_APPLICATION_IDS, AttributeType::string_set()),
                    Attribute::string(FIELD_INFRA_DFQ_FILTER),
                    Attribute::new(FIELD_KUBERNETES_CLUSTER_UUIDS, AttributeType::string_set()),
                    Attribute::new(FIELD_KUBERNETES_NAMESPACES_UUIDS, AttributeType::string_set()),
                    Attribute::new(FIELD_MOBILE_APP_IDS, AttributeType::string_set()),
                    Attribute::new(FIELD_WEBSITE_IDS, AttributeType::string_set()),
                    Attribute::new(FIELD_PERMISSIONS, AttributeType::string_set())
                        .validate(Validator::EachOneOf(&SUPPORTED_PERMISSIONS)),
                ],
            )
            .describe("The permission set of the group"),
        ],
    )
}

// ============================================================================
// SECTION: Handle
// ============================================================================

/// Handle for RBAC groups.
#[derive(Debug)]
pub struct GroupHandle {
    /// Static description.
    metadata: ResourceMetadata,
}

impl GroupHandle {
    /// Builds the handle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: ResourceMetadata::new(RESOURCE_NAME, schema(), SCHEMA_VERSION)
                .with_upgraders(vec![StateUpgrader::new(0, identity)]),
        }
    }
}

impl Default for GroupHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceHandle for GroupHandle {
    type Payload = Group;

    fn metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }

    fn rest_resource(&self, api: &InstanaApi) -> RestResource<Group> {
        api.groups()
    }

    fn state_to_payload(&self, state: &StateValue) -> Result<Group, Diagnostics> {
        group_from_state(&ObjectReader::root(state))
    }

    fn payload_to_state(
        &self,
        payload: &Group,
        _prior: &StateValue,
    ) -> Result<StateValue, Diagnostics> {
        Ok(group_to_state(payload))
    }
}

// ============================================================================
// SECTION: State To Payload
// ============================================================================

/// Maps a resource object to the payload.
fn group_from_state(reader: &ObjectReader<'_>) -> Result<Group, Diagnostics> {
    let mut diagnostics = Diagnostics::new();
    let group = Group {
        id: diagnostics.take(id_from_state(reader)),
        name: diagnostics.take(reader.required_string(FIELD_NAME)),
        members: diagnostics.take(members_from_state(reader)),
        permission_set: diagnostics.take(permission_block_from_state(reader)),
    };
    diagnostics.finish(group)
}

/// Maps the member set, reporting every invalid member.
fn members_from_state(reader: &ObjectReader<'_>) -> Result<Vec<Member>, Diagnostics> {
    let mut diagnostics = Diagnostics::new();
    let members = diagnostics
        .take(reader.objects(FIELD_MEMBER))
        .into_iter()
        .filter_map(|(path, value)| {
            let member = ObjectReader::new(value, &path);
            diagnostics.collect(member_from_state(&member))
        })
        .collect();
    diagnostics.finish(members)
}

/// Maps one member.
fn member_from_state(member: &ObjectReader<'_>) -> Result<Member, MappingError> {
    Ok(Member {
        user_id: member.required_string(FIELD_USER_ID)?,
        email: optional_non_empty(member, FIELD_EMAIL)?,
    })
}

/// Maps the optional permission set block.
fn permission_block_from_state(reader: &ObjectReader<'_>) -> Result<PermissionSet, MappingError> {
    match reader.object(FIELD_PERMISSION_SET)? {
        Some(block) => {
            let path = reader.field_path(FIELD_PERMISSION_SET);
            permission_set_from_state(&ObjectReader::new(&block, &path))
        }
        None => Ok(PermissionSet::default()),
    }
}

/// Maps the permission set block.
fn permission_set_from_state(reader: &ObjectReader<'_>) -> Result<PermissionSet, MappingError> {
    let bindings = |name: &str| -> Result<Vec<ScopeBinding>, MappingError> {
        Ok(reader.string_list(name)?.into_iter().map(ScopeBinding::new).collect())
    };
    Ok(PermissionSet {
        application_ids: bindings(FIELD_APPLICATION_IDS)?,
        infra_dfq_filter: optional_non_empty(reader, FIELD_INFRA_DFQ_FILTER)?
            .map(ScopeBinding::new),
        kubernetes_cluster_uuids: bindings(FIELD_KUBERNETES_CLUSTER_UUIDS)?,
        kubernetes_namespace_uids: bindings(FIELD_KUBERNETES_NAMESPACES_UUIDS)?,
        mobile_app_ids: bindings(FIELD_MOBILE_APP_IDS)?,
        website_ids: bindings(FIELD_WEBSITE_IDS)?,
        permissions: reader.string_list(FIELD_PERMISSIONS)?,
    })
}

// ============================================================================
// SECTION: Payload To State
// ============================================================================

/// Maps the payload to a resource object.
fn group_to_state(group: &Group) -> StateValue {
    let members = group
        .members
        .iter()
        .map(|member| {
            StateValue::object()
                .with(FIELD_USER_ID, &member.user_id)
                .with(FIELD_EMAIL, member.email.clone().filter(|email| !email.is_empty()))
        })
        .collect();
    let permission_set = if group.permission_set.is_empty() {
        StateValue::Null
    } else {
        permission_set_to_state(&group.permission_set)
    };
    StateValue::object()
        .with(FIELD_ID, &group.id)
        .with(FIELD_NAME, &group.name)
        .with(FIELD_MEMBER, set_or_null(members))
        .with(FIELD_PERMISSION_SET, permission_set)
}

/// Maps a non-empty permission set.
fn permission_set_to_state(permissions: &PermissionSet) -> StateValue {
    let scopes = |bindings: &[ScopeBinding]| {
        set_or_null(bindings.iter().map(|binding| StateValue::from(&binding.scope_id)).collect())
    };
    StateValue::object()
        .with(FIELD_APPLICATION_IDS, scopes(&permissions.application_ids))
        .with(
            FIELD_INFRA_DFQ_FILTER,
            permissions
                .infra_dfq_filter
                .as_ref()
                .map(|binding| binding.scope_id.clone())
                .filter(|query| !query.is_empty()),
        )
        .with(FIELD_KUBERNETES_CLUSTER_UUIDS, scopes(&permissions.kubernetes_cluster_uuids))
        .with(FIELD_KUBERNETES_NAMESPACES_UUIDS, scopes(&permissions.kubernetes_namespace_uids))
        .with(FIELD_MOBILE_APP_IDS, scopes(&permissions.mobile_app_ids))
        .with(FIELD_WEBSITE_IDS, scopes(&permissions.website_ids))
        .with(FIELD_PERMISSIONS, StateValue::string_set_or_null(&permissions.permissions))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
