// crates/instana-core/src/upgrade.rs
// ============================================================================
// Module: State Upgrade Pipeline
// Description: Version-indexed migrations of stored raw state.
// Purpose: Bring state written by older schema versions to the current shape.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Upgraders run in order, starting at the stored version, until the state
//! reaches the current version. Each upgrader detects whether its legacy
//! fields are present and leaves current state unchanged otherwise, so the
//! pipeline is the identity on current-version state.

use crate::error::MappingError;
use crate::handle::RawState;
use crate::handle::StateUpgrader;
use crate::path::AttributePath;

// ============================================================================
// SECTION: Pipeline
// ============================================================================

/// Applies every upgrader at or above `stored_version`.
///
/// # Errors
/// Returns [`MappingError::InvalidConfig`] when the stored version is newer
/// than `current_version`, or when an upgrader fails.
pub fn upgrade_state(
    upgraders: &[StateUpgrader],
    stored_version: i64,
    current_version: i64,
    raw: RawState,
) -> Result<RawState, MappingError> {
    if stored_version > current_version {
        let message = format!(
            "state version {stored_version} is newer than schema version {current_version}"
        );
        return Err(MappingError::invalid(&AttributePath::root(), message));
    }
    upgraders
        .iter()
        .filter(|upgrader| upgrader.from_version >= stored_version)
        .filter(|upgrader| upgrader.from_version < current_version)
        .try_fold(raw, |state, upgrader| (upgrader.upgrade)(state))
}

// ============================================================================
// SECTION: Building Blocks
// ============================================================================

/// Renames `from` to `to` when `from` is present.
///
/// A non-null legacy value replaces `to`, since older versions stored the
/// configured value there. A null legacy value is dropped.
#[must_use]
pub fn rename_attribute(mut raw: RawState, from: &str, to: &str) -> RawState {
    if let Some(legacy) = raw.remove(from)
        && !legacy.is_null()
    {
        raw.insert(to.to_string(), legacy);
    }
    raw
}

/// Removes attributes dropped from the schema.
#[must_use]
pub fn drop_attributes(mut raw: RawState, names: &[&str]) -> RawState {
    for name in names {
        raw.remove(*name);
    }
    raw
}

/// Upgrader renaming `full_name` to `name`.
///
/// # Errors
/// Never fails; the signature matches [`StateUpgrader::upgrade`].
pub fn rename_full_name(raw: RawState) -> Result<RawState, MappingError> {
    Ok(rename_attribute(raw, "full_name", "name"))
}

/// Upgrader for version bumps that did not change the stored shape.
///
/// # Errors
/// Never fails; the signature matches [`StateUpgrader::upgrade`].
pub const fn identity(raw: RawState) -> Result<RawState, MappingError> {
    Ok(raw)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
