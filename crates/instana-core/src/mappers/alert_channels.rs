// crates/instana-core/src/mappers/alert_channels.rs
// ============================================================================
// Module: Alert Channel Mapper
// Description: Severity-keyed alert channel id sets.
// Purpose: Map `alert_channels { warning, critical }` to the wire map.
// Dependencies: instana-restapi
// ============================================================================

use std::collections::BTreeMap;

use instana_restapi::models::threshold::SEVERITY_CRITICAL;
use instana_restapi::models::threshold::SEVERITY_WARNING;

use crate::error::MappingError;
use crate::reader::ObjectReader;
use crate::schema::Attribute;
use crate::schema::AttributeType;
use crate::value::StateValue;

/// Default attribute name of alert channel blocks.
pub const ALERT_CHANNELS_FIELD: &str = "alert_channels";

/// Severity slots in state order with their wire keys.
const SEVERITIES: [(&str, &str); 2] =
    [("warning", SEVERITY_WARNING), ("critical", SEVERITY_CRITICAL)];

/// Alert channel block attribute.
///
/// An absent block or severity defaults to an empty set.
#[must_use]
pub fn alert_channels_attribute() -> Attribute {
    Attribute::block(
        ALERT_CHANNELS_FIELD,
        vec![
            Attribute::new("warning", AttributeType::string_set())
                .default_value(StateValue::Set(Vec::new()))
                .describe("Alert channel ids notified for warnings"),
            Attribute::new("critical", AttributeType::string_set())
                .default_value(StateValue::Set(Vec::new()))
                .describe("Alert channel ids notified for critical alerts"),
        ],
    )
    .default_value(empty_alert_channels())
    .describe("Alert channels per severity")
}

/// Alert channel block without ids.
fn empty_alert_channels() -> StateValue {
    SEVERITIES
        .iter()
        .fold(StateValue::object(), |state, &(field, _)| {
            state.with(field, StateValue::Set(Vec::new()))
        })
}

/// Reads the alert channel block `name`; empty severities are skipped.
///
/// # Errors
/// Returns [`MappingError::InvalidConfig`] when the block is mistyped.
pub fn alert_channels_from_state(
    parent: &ObjectReader<'_>,
    name: &str,
) -> Result<BTreeMap<String, Vec<String>>, MappingError> {
    let Some(block) = parent.object(name)? else {
        return Ok(BTreeMap::new());
    };
    let path = parent.field_path(name);
    let reader = ObjectReader::new(&block, &path);
    let mut channels = BTreeMap::new();
    for (field, wire_key) in SEVERITIES {
        let ids = reader.string_list(field)?;
        if !ids.is_empty() {
            channels.insert(wire_key.to_string(), ids);
        }
    }
    Ok(channels)
}

/// Builds the alert channel block; severities without ids are empty sets.
#[must_use]
pub fn alert_channels_to_state(channels: &BTreeMap<String, Vec<String>>) -> StateValue {
    let mut state = StateValue::object();
    for (field, wire_key) in SEVERITIES {
        let ids = channels.get(wire_key).map_or(&[][..], Vec::as_slice);
        state.insert(field, StateValue::string_set(ids.iter().cloned()));
    }
    state
}
