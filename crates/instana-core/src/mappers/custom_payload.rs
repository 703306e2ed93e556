// crates/instana-core/src/mappers/custom_payload.rs
// ============================================================================
// Module: Custom Payload Mapper
// Description: Static-string and dynamic-tag notification fields.
// Purpose: Map `custom_payload_field` lists for every alert configuration.
// Dependencies: instana-restapi
// ============================================================================

//! ## Overview
//! Each state entry has a `key` and exactly one of `value` (static string) or
//! `dynamic_value { tag_name, key? }` (resolved from a tag when the alert
//! fires). Errors cite the entry index so the operator can find it.

use instana_restapi::models::custom_payload::CustomPayloadField;
use instana_restapi::models::custom_payload::DynamicCustomPayloadValue;

use crate::diagnostics::Diagnostics;
use crate::error::MappingError;
use crate::reader::ObjectReader;
use crate::schema::Attribute;
use crate::value::StateValue;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default attribute name of custom payload lists.
pub const CUSTOM_PAYLOAD_FIELD: &str = "custom_payload_field";
/// Entry key.
pub const FIELD_KEY: &str = "key";
/// Static value slot.
pub const FIELD_VALUE: &str = "value";
/// Dynamic value slot.
pub const FIELD_DYNAMIC_VALUE: &str = "dynamic_value";
/// Tag key inside the dynamic value.
pub const FIELD_DYNAMIC_KEY: &str = "key";
/// Tag name inside the dynamic value.
pub const FIELD_DYNAMIC_TAG_NAME: &str = "tag_name";

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Custom payload list attribute.
#[must_use]
pub fn custom_payload_attribute() -> Attribute {
    Attribute::block_list(
        CUSTOM_PAYLOAD_FIELD,
        vec![
            Attribute::string(FIELD_KEY).required().describe("The key of the custom payload field"),
            Attribute::string(FIELD_VALUE).describe("The static string value"),
            Attribute::block(
                FIELD_DYNAMIC_VALUE,
                vec![
                    Attribute::string(FIELD_DYNAMIC_KEY).describe("The key of the tag"),
                    Attribute::string(FIELD_DYNAMIC_TAG_NAME).describe("The name of the tag"),
                ],
            )
            .describe("The dynamic value resolved from a tag"),
        ],
    )
    .describe("Custom payload fields sent with alert notifications")
}

// ============================================================================
// SECTION: Mapping
// ============================================================================

/// Reads the custom payload list `name`, reporting every malformed entry.
///
/// # Errors
/// Returns one [`MappingError::InvalidConfig`] diagnostic per entry that sets
/// neither or both slots, or whose dynamic value lacks its tag name.
pub fn custom_payload_from_state(
    parent: &ObjectReader<'_>,
    name: &str,
) -> Result<Vec<CustomPayloadField>, Diagnostics> {
    let mut diagnostics = Diagnostics::new();
    let entries = diagnostics.take(parent.objects(name));
    let fields = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, (path, entry))| {
            diagnostics.collect(custom_payload_entry(name, index, &ObjectReader::new(entry, &path)))
        })
        .collect();
    diagnostics.finish(fields)
}

/// Maps one entry of the custom payload list.
fn custom_payload_entry(
    name: &str,
    index: usize,
    reader: &ObjectReader<'_>,
) -> Result<CustomPayloadField, MappingError> {
    let key = reader.required_string(FIELD_KEY)?;
    let has_value = reader.is_set(FIELD_VALUE);
    match (has_value, reader.object(FIELD_DYNAMIC_VALUE)?) {
        (true, Some(_)) => Err(MappingError::invalid(
            reader.path(),
            format!("{name} sets both value and dynamic_value at index {index}"),
        )),
        (_, Some(dynamic)) => {
            let dynamic_path = reader.field_path(FIELD_DYNAMIC_VALUE);
            let dynamic_reader = ObjectReader::new(&dynamic, &dynamic_path);
            let tag_name = dynamic_reader.optional_string(FIELD_DYNAMIC_TAG_NAME)?.ok_or_else(|| {
                MappingError::invalid(
                    &dynamic_path,
                    format!("{name}.dynamic_value missing tagName at index {index}"),
                )
            })?;
            Ok(CustomPayloadField::Dynamic {
                key,
                value: DynamicCustomPayloadValue {
                    key: dynamic_reader.optional_string(FIELD_DYNAMIC_KEY)?,
                    tag_name,
                },
            })
        }
        (true, None) => Ok(CustomPayloadField::StaticString {
            key,
            value: reader.required_string(FIELD_VALUE)?,
        }),
        (false, None) => Err(MappingError::invalid(
            reader.path(),
            format!("neither value nor dynamic_value present at index {index}"),
        )),
    }
}

/// Builds the custom payload list; an empty list is null.
#[must_use]
pub fn custom_payload_to_state(fields: &[CustomPayloadField]) -> StateValue {
    StateValue::list_or_null(
        fields
            .iter()
            .map(|field| match field {
                CustomPayloadField::StaticString {
                    key,
                    value,
                } => StateValue::object()
                    .with(FIELD_KEY, key)
                    .with(FIELD_VALUE, value)
                    .with(FIELD_DYNAMIC_VALUE, StateValue::Null),
                CustomPayloadField::Dynamic {
                    key,
                    value,
                } => StateValue::object()
                    .with(FIELD_KEY, key)
                    .with(FIELD_VALUE, StateValue::Null)
                    .with(
                        FIELD_DYNAMIC_VALUE,
                        StateValue::object()
                            .with(FIELD_DYNAMIC_KEY, value.key.clone())
                            .with(FIELD_DYNAMIC_TAG_NAME, &value.tag_name),
                    ),
            })
            .collect(),
    )
}
