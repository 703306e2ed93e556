// crates/instana-restapi/src/models/access_rule.rs
// ============================================================================
// Module: Access Rule Payloads
// Description: Access rules shared by dashboards and application configs.
// Purpose: Model who may read or edit a shared object.
// Dependencies: serde
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Accepted `accessType` values.
pub const ACCESS_TYPES: [&str; 2] = ["READ", "READ_WRITE"];

/// Accepted `relationType` values.
pub const RELATION_TYPES: [&str; 5] = ["USER", "API_TOKEN", "ROLE", "TEAM", "GLOBAL"];

// ============================================================================
// SECTION: Types
// ============================================================================

/// Grants access to a user, token, role, team, or everyone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRule {
    /// `READ` or `READ_WRITE`.
    pub access_type: String,
    /// Related user, token, role, or team id; absent for `GLOBAL`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_id: Option<String>,
    /// Kind of the related object.
    pub relation_type: String,
}
