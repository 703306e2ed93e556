// crates/instana-core/src/reader.rs
// ============================================================================
// Module: State Object Reader
// Description: Path-aware typed reads from state objects.
// Purpose: Turn missing or mistyped attributes into path-bound errors.
// Dependencies: crate::value, crate::path, crate::error
// ============================================================================

//! ## Overview
//! An [`ObjectReader`] wraps a state object together with the attribute path
//! that leads to it. Every getter reports failures as
//! [`MappingError::InvalidConfig`] at the exact attribute, so mappers never
//! format paths themselves.
//!
//! Unknown values read as absent: the host validates again once they are
//! known, and payload mapping only runs on known plans.

use std::collections::BTreeMap;

use crate::error::MappingError;
use crate::path::AttributePath;
use crate::value::StateValue;

// ============================================================================
// SECTION: Reader
// ============================================================================

/// Borrowed view over a state object.
#[derive(Debug, Clone, Copy)]
pub struct ObjectReader<'a> {
    /// Object being read.
    value: &'a StateValue,
    /// Path of the object.
    path: &'a AttributePath,
}

/// Root path shared by readers created with [`ObjectReader::root`].
static ROOT: AttributePath = AttributePath::root();

impl<'a> ObjectReader<'a> {
    /// Reader for an object at `path`.
    #[must_use]
    pub const fn new(value: &'a StateValue, path: &'a AttributePath) -> Self {
        Self {
            value,
            path,
        }
    }

    /// Reader for a top-level resource object.
    #[must_use]
    pub fn root(value: &'a StateValue) -> Self {
        Self::new(value, &ROOT)
    }

    /// Returns the object path.
    #[must_use]
    pub const fn path(&self) -> &'a AttributePath {
        self.path
    }

    /// Returns the wrapped value.
    #[must_use]
    pub const fn value(&self) -> &'a StateValue {
        self.value
    }

    /// Path of a child attribute.
    #[must_use]
    pub fn field_path(&self, name: &str) -> AttributePath {
        self.path.child(name)
    }

    /// Returns a raw attribute value; missing attributes read as null.
    #[must_use]
    pub fn get(&self, name: &str) -> &'a StateValue {
        self.value.get(name)
    }

    /// Returns true when the attribute carries data.
    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        !self.get(name).is_absent()
    }

    /// Builds a type mismatch error.
    fn mismatch(&self, name: &str, expected: &str, found: &StateValue) -> MappingError {
        MappingError::invalid(
            &self.field_path(name),
            format!("{} must be {expected}, got {}", self.field_path(name), found.kind_name()),
        )
    }

    /// Builds a missing attribute error.
    fn missing(&self, name: &str) -> MappingError {
        MappingError::invalid(
            &self.field_path(name),
            format!("{} is required", self.field_path(name)),
        )
    }

    // ------------------------------------------------------------------------
    // Strings
    // ------------------------------------------------------------------------

    /// Reads an optional string.
    ///
    /// # Errors
    /// Returns [`MappingError::InvalidConfig`] on a type mismatch.
    pub fn optional_string(&self, name: &str) -> Result<Option<String>, MappingError> {
        match self.get(name) {
            StateValue::Null | StateValue::Unknown => Ok(None),
            StateValue::String(value) => Ok(Some(value.clone())),
            other => Err(self.mismatch(name, "a string", other)),
        }
    }

    /// Reads a required string.
    ///
    /// # Errors
    /// Returns [`MappingError::InvalidConfig`] when absent or mistyped.
    pub fn required_string(&self, name: &str) -> Result<String, MappingError> {
        self.optional_string(name)?.ok_or_else(|| self.missing(name))
    }

    /// Reads a string, falling back to `default` when absent.
    ///
    /// # Errors
    /// Returns [`MappingError::InvalidConfig`] on a type mismatch.
    pub fn string_or(&self, name: &str, default: &str) -> Result<String, MappingError> {
        Ok(self.optional_string(name)?.unwrap_or_else(|| default.to_string()))
    }

    // ------------------------------------------------------------------------
    // Booleans
    // ------------------------------------------------------------------------

    /// Reads an optional boolean.
    ///
    /// # Errors
    /// Returns [`MappingError::InvalidConfig`] on a type mismatch.
    pub fn optional_bool(&self, name: &str) -> Result<Option<bool>, MappingError> {
        match self.get(name) {
            StateValue::Null | StateValue::Unknown => Ok(None),
            StateValue::Bool(value) => Ok(Some(*value)),
            other => Err(self.mismatch(name, "a bool", other)),
        }
    }

    /// Reads a required boolean.
    ///
    /// # Errors
    /// Returns [`MappingError::InvalidConfig`] when absent or mistyped.
    pub fn required_bool(&self, name: &str) -> Result<bool, MappingError> {
        self.optional_bool(name)?.ok_or_else(|| self.missing(name))
    }

    /// Reads a boolean, falling back to `default` when absent.
    ///
    /// # Errors
    /// Returns [`MappingError::InvalidConfig`] on a type mismatch.
    pub fn bool_or(&self, name: &str, default: bool) -> Result<bool, MappingError> {
        Ok(self.optional_bool(name)?.unwrap_or(default))
    }

    // ------------------------------------------------------------------------
    // Numbers
    // ------------------------------------------------------------------------

    /// Reads an optional integer.
    ///
    /// # Errors
    /// Returns [`MappingError::InvalidConfig`] on a type mismatch.
    pub fn optional_i64(&self, name: &str) -> Result<Option<i64>, MappingError> {
        match self.get(name) {
            StateValue::Null | StateValue::Unknown => Ok(None),
            other => {
                other.as_i64().map(Some).ok_or_else(|| self.mismatch(name, "an integer", other))
            }
        }
    }

    /// Reads a required integer.
    ///
    /// # Errors
    /// Returns [`MappingError::InvalidConfig`] when absent or mistyped.
    pub fn required_i64(&self, name: &str) -> Result<i64, MappingError> {
        self.optional_i64(name)?.ok_or_else(|| self.missing(name))
    }

    /// Reads an integer, falling back to `default` when absent.
    ///
    /// # Errors
    /// Returns [`MappingError::InvalidConfig`] on a type mismatch.
    pub fn i64_or(&self, name: &str, default: i64) -> Result<i64, MappingError> {
        Ok(self.optional_i64(name)?.unwrap_or(default))
    }

    /// Reads an optional number.
    ///
    /// # Errors
    /// Returns [`MappingError::InvalidConfig`] on a type mismatch.
    pub fn optional_f64(&self, name: &str) -> Result<Option<f64>, MappingError> {
        match self.get(name) {
            StateValue::Null | StateValue::Unknown => Ok(None),
            other => other.as_f64().map(Some).ok_or_else(|| self.mismatch(name, "a number", other)),
        }
    }

    /// Reads a required number.
    ///
    /// # Errors
    /// Returns [`MappingError::InvalidConfig`] when absent or mistyped.
    pub fn required_f64(&self, name: &str) -> Result<f64, MappingError> {
        self.optional_f64(name)?.ok_or_else(|| self.missing(name))
    }

    // ------------------------------------------------------------------------
    // Collections
    // ------------------------------------------------------------------------

    /// Reads a list or set of strings; null reads as empty.
    ///
    /// # Errors
    /// Returns [`MappingError::InvalidConfig`] when the attribute or an
    /// element is mistyped.
    pub fn string_list(&self, name: &str) -> Result<Vec<String>, MappingError> {
        let value = self.get(name);
        if value.is_null() || value.is_unknown() {
            return Ok(Vec::new());
        }
        let items = value.as_items().ok_or_else(|| self.mismatch(name, "a list", value))?;
        items
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.is_null() && !item.is_unknown())
            .map(|(index, item)| {
                item.as_str().map(ToString::to_string).ok_or_else(|| {
                    let path = self.field_path(name).index(index);
                    MappingError::invalid(
                        &path,
                        format!("{path} must be a string, got {}", item.kind_name()),
                    )
                })
            })
            .collect()
    }

    /// Reads a map of strings; null reads as empty.
    ///
    /// # Errors
    /// Returns [`MappingError::InvalidConfig`] when the attribute or a value
    /// is mistyped.
    pub fn string_map(&self, name: &str) -> Result<BTreeMap<String, String>, MappingError> {
        let value = self.get(name);
        if value.is_null() || value.is_unknown() {
            return Ok(BTreeMap::new());
        }
        let fields = value.as_fields().ok_or_else(|| self.mismatch(name, "a map", value))?;
        fields
            .iter()
            .filter(|(_, item)| !item.is_null() && !item.is_unknown())
            .map(|(key, item)| {
                item.as_str().map(|text| (key.clone(), text.to_string())).ok_or_else(|| {
                    let path = self.field_path(name).key(key);
                    MappingError::invalid(
                        &path,
                        format!("{path} must be a string, got {}", item.kind_name()),
                    )
                })
            })
            .collect()
    }

    // ------------------------------------------------------------------------
    // Nested Blocks
    // ------------------------------------------------------------------------

    /// Returns a single nested block, if set.
    ///
    /// A list holding exactly one object is accepted as the same block.
    ///
    /// # Errors
    /// Returns [`MappingError::InvalidConfig`] when the attribute is not an
    /// object (or a single-object list).
    pub fn object(&self, name: &str) -> Result<Option<StateValue>, MappingError> {
        let value = self.get(name);
        match value {
            StateValue::Null | StateValue::Unknown => Ok(None),
            StateValue::Object(_) => Ok(Some(value.clone())),
            StateValue::List(items) | StateValue::Set(items) => match items.as_slice() {
                [] => Ok(None),
                [item @ StateValue::Object(_)] => Ok(Some(item.clone())),
                _ => Err(MappingError::invalid(
                    &self.field_path(name),
                    format!("{} must contain exactly one block", self.field_path(name)),
                )),
            },
            other => Err(self.mismatch(name, "a block", other)),
        }
    }

    /// Returns a required nested block.
    ///
    /// # Errors
    /// Returns [`MappingError::InvalidConfig`] when absent or mistyped.
    pub fn required_object(&self, name: &str) -> Result<StateValue, MappingError> {
        self.object(name)?.ok_or_else(|| self.missing(name))
    }

    /// Returns repeated nested blocks with their element paths.
    ///
    /// # Errors
    /// Returns [`MappingError::InvalidConfig`] when the attribute is not a
    /// list of objects.
    pub fn objects(
        &self,
        name: &str,
    ) -> Result<Vec<(AttributePath, &'a StateValue)>, MappingError> {
        let value = self.get(name);
        if value.is_null() || value.is_unknown() {
            return Ok(Vec::new());
        }
        let items = value.as_items().ok_or_else(|| self.mismatch(name, "a list of blocks", value))?;
        let base = self.field_path(name);
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let path = base.index(index);
                match item {
                    StateValue::Object(_) => Ok((path, item)),
                    other => Err(MappingError::invalid(
                        &path,
                        format!("{path} must be a block, got {}", other.kind_name()),
                    )),
                }
            })
            .collect()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
