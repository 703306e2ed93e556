// crates/instana-core/src/mappers/union.rs
// ============================================================================
// Module: Union Selection
// Description: Exactly-one-of selection over optional variant slots.
// Purpose: Reject zero or multiple populated slots uniformly.
// Dependencies: crate::reader
// ============================================================================

//! ## Overview
//! Slots are scanned in the declared order. A slot is populated when it
//! carries data (see [`StateValue::is_absent`]).

use crate::error::MappingError;
use crate::path::AttributePath;
use crate::reader::ObjectReader;
use crate::value::StateValue;

// ============================================================================
// SECTION: Selection
// ============================================================================

/// Populated variant slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedVariant {
    /// Slot name.
    pub name: &'static str,
    /// Slot content.
    pub value: StateValue,
    /// Slot path.
    pub path: AttributePath,
}

impl SelectedVariant {
    /// Reader over the slot content.
    #[must_use]
    pub const fn reader(&self) -> ObjectReader<'_> {
        ObjectReader::new(&self.value, &self.path)
    }
}

/// Selects the single populated slot of a union block.
///
/// # Errors
/// Returns [`MappingError::InvalidConfig`] ("{label} must select exactly one
/// variant") when zero or several slots are populated, and rejects a slot
/// given as a list of more than one block at its second element.
pub fn select_variant(
    union: &ObjectReader<'_>,
    variants: &[&'static str],
    label: &str,
) -> Result<SelectedVariant, MappingError> {
    let mut populated = variants.iter().copied().filter(|name| union.is_set(name));
    match (populated.next(), populated.next()) {
        (Some(name), None) => {
            let path = union.field_path(name);
            let value = match union.get(name) {
                StateValue::List(items) | StateValue::Set(items) => match items.as_slice() {
                    [single] => single.clone(),
                    _ => {
                        return Err(MappingError::invalid(
                            &path.index(1),
                            format!("{label}.{name} must hold a single block, got {}", items.len()),
                        ));
                    }
                },
                value => value.clone(),
            };
            Ok(SelectedVariant {
                name,
                value,
                path,
            })
        }
        _ => Err(MappingError::invalid(
            union.path(),
            format!("{label} must select exactly one variant"),
        )),
    }
}

/// Builds a union block with `selected` populated and every other slot null.
#[must_use]
pub fn variant_state(variants: &[&'static str], selected: &str, value: StateValue) -> StateValue {
    let mut state = StateValue::object();
    let mut value = Some(value);
    for name in variants {
        let slot =
            if *name == selected { value.take().unwrap_or_default() } else { StateValue::Null };
        state.insert(name, slot);
    }
    state
}
