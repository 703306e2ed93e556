// crates/instana-core/src/mappers/tag_filter.rs
// ============================================================================
// Module: Tag Filter Field Mapper
// Description: Tag filter expression attributes to backend node trees.
// Purpose: Store normalized expression text and send parsed trees.
// Dependencies: instana-tagfilter
// ============================================================================

use instana_tagfilter::TagFilter;
use instana_tagfilter::map_tag_filter_to_normalized_string;
use instana_tagfilter::parse_to_api;

use crate::error::MappingError;
use crate::path::AttributePath;
use crate::reader::ObjectReader;
use crate::value::StateValue;

/// Default attribute name of tag filter expressions.
pub const TAG_FILTER_FIELD: &str = "tag_filter";

/// Parses the expression attribute `name`; absent reads as `None`.
///
/// # Errors
/// Returns [`MappingError::Parse`] when the expression does not parse.
pub fn tag_filter_from_state(
    parent: &ObjectReader<'_>,
    name: &str,
) -> Result<Option<TagFilter>, MappingError> {
    let path = parent.field_path(name);
    parent
        .optional_string(name)?
        .filter(|text| !text.trim().is_empty())
        .map(|text| parse_to_api(&text).map_err(|err| MappingError::from_tag_filter(&path, err)))
        .transpose()
}

/// Renders a backend tree as normalized expression text; no filter is null.
///
/// # Errors
/// Returns [`MappingError::UnsupportedFilterType`] for unknown node types.
pub fn tag_filter_to_state(
    filter: Option<&TagFilter>,
    path: &AttributePath,
) -> Result<StateValue, MappingError> {
    let Some(filter) = filter else {
        return Ok(StateValue::Null);
    };
    map_tag_filter_to_normalized_string(filter)
        .map(StateValue::from)
        .map_err(|err| MappingError::from_tag_filter(path, err))
}
