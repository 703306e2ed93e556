// crates/instana-restapi/src/models/custom_payload.rs
// ============================================================================
// Module: Custom Payload Fields
// Description: Extra key/value entries attached to alert notifications.
// Purpose: Model the `staticString` / `dynamic` union on the wire.
// Dependencies: serde
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Tag reference resolved when a notification is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicCustomPayloadValue {
    /// Key of a key/value tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Tag name.
    pub tag_name: String,
}

/// Custom payload entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CustomPayloadField {
    /// Fixed string value.
    #[serde(rename = "staticString")]
    StaticString {
        /// Field key.
        key: String,
        /// Field value.
        value: String,
    },
    /// Value resolved from a tag.
    #[serde(rename = "dynamic")]
    Dynamic {
        /// Field key.
        key: String,
        /// Tag reference.
        value: DynamicCustomPayloadValue,
    },
}

impl CustomPayloadField {
    /// Returns the field key.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::StaticString {
                key, ..
            }
            | Self::Dynamic {
                key, ..
            } => key,
        }
    }
}
