// crates/instana-core/src/value.rs
// ============================================================================
// Module: State Values
// Description: Weakly typed values observed and planned by the host.
// Purpose: Represent host state with the known / unknown / null distinction.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! [`StateValue`] mirrors the host's value model. Unknown marks a value that
//! is only computed after apply; null marks an attribute without a value.
//! Neither is ever coerced to a zero value.
//!
//! Sets are kept in canonical order (sorted, deduplicated) so equality does
//! not depend on the order the backend returned elements in.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde_json::Map;
use serde_json::Number;
use serde_json::Value;

// ============================================================================
// SECTION: Value
// ============================================================================

/// Host state value.
///
/// # Invariants
/// - `Set` elements are sorted by [`StateValue::canonical_cmp`] and unique.
/// - `Object` keys are schema attribute names; `Map` keys are user data.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum StateValue {
    /// Value not known until apply.
    Unknown,
    /// Explicitly absent value.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// String.
    String(String),
    /// Ordered list.
    List(Vec<StateValue>),
    /// Unordered set.
    Set(Vec<StateValue>),
    /// Map with user-defined keys.
    Map(BTreeMap<String, StateValue>),
    /// Object with schema-defined attributes.
    Object(BTreeMap<String, StateValue>),
}

/// Shared null returned for missing attributes.
pub(crate) static NULL: StateValue = StateValue::Null;

impl StateValue {
    /// Empty object.
    #[must_use]
    pub const fn object() -> Self {
        Self::Object(BTreeMap::new())
    }

    /// Builds a set in canonical order.
    #[must_use]
    pub fn set_of(mut items: Vec<Self>) -> Self {
        items.sort_by(Self::canonical_cmp);
        items.dedup();
        Self::Set(items)
    }

    /// Builds a set of strings.
    #[must_use]
    pub fn string_set<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::set_of(items.into_iter().map(|item| Self::String(item.into())).collect())
    }

    /// Builds a list of strings.
    #[must_use]
    pub fn string_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(|item| Self::String(item.into())).collect())
    }

    /// Builds a string set, or null when empty.
    #[must_use]
    pub fn string_set_or_null(items: &[String]) -> Self {
        if items.is_empty() { Self::Null } else { Self::string_set(items.iter().cloned()) }
    }

    /// Builds a string list, or null when empty.
    #[must_use]
    pub fn string_list_or_null(items: &[String]) -> Self {
        if items.is_empty() { Self::Null } else { Self::string_list(items.iter().cloned()) }
    }

    /// Builds a map of strings, or null when empty.
    #[must_use]
    pub fn string_map_or_null(entries: &BTreeMap<String, String>) -> Self {
        if entries.is_empty() {
            return Self::Null;
        }
        Self::Map(entries.iter().map(|(key, value)| (key.clone(), Self::from(value))).collect())
    }

    /// Builds a list, or null when empty.
    #[must_use]
    pub fn list_or_null(items: Vec<Self>) -> Self {
        if items.is_empty() { Self::Null } else { Self::List(items) }
    }

    /// Adds an attribute and returns the object.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<Self>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets an attribute, turning null or unknown into an empty object first.
    ///
    /// Values that are neither objects nor maps are replaced by an object.
    pub fn insert(&mut self, key: &str, value: impl Into<Self>) {
        match self {
            Self::Object(fields) | Self::Map(fields) => {
                fields.insert(key.to_string(), value.into());
            }
            _ => {
                let mut fields = BTreeMap::new();
                fields.insert(key.to_string(), value.into());
                *self = Self::Object(fields);
            }
        }
    }

    /// Returns an attribute or map entry; missing entries read as null.
    #[must_use]
    pub fn get(&self, key: &str) -> &Self {
        match self {
            Self::Object(fields) | Self::Map(fields) => fields.get(key).unwrap_or(&NULL),
            _ => &NULL,
        }
    }

    /// Returns true for null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true for unknown.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Returns true when the value carries no data: null, unknown, or an
    /// empty collection.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        match self {
            Self::Null | Self::Unknown => true,
            Self::List(items) | Self::Set(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Returns true when the value or any nested value is unknown.
    #[must_use]
    pub fn contains_unknown(&self) -> bool {
        match self {
            Self::Unknown => true,
            Self::List(items) | Self::Set(items) => items.iter().any(Self::contains_unknown),
            Self::Map(fields) | Self::Object(fields) => {
                fields.values().any(Self::contains_unknown)
            }
            _ => false,
        }
    }

    /// Returns the string content.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the boolean content.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the integer content; integral floats are accepted.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Only integral floats in i64 range convert."
    )]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Float(value)
                if value.fract() == 0.0 && *value >= -9.2e18 && *value <= 9.2e18 =>
            {
                Some(*value as i64)
            }
            _ => None,
        }
    }

    /// Returns the numeric content as a float.
    #[must_use]
    #[allow(clippy::cast_precision_loss, reason = "State integers are small configuration values.")]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    /// Returns list or set elements.
    #[must_use]
    pub fn as_items(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) | Self::Set(items) => Some(items),
            _ => None,
        }
    }

    /// Returns object attributes or map entries.
    #[must_use]
    pub const fn as_fields(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Object(fields) | Self::Map(fields) => Some(fields),
            _ => None,
        }
    }

    /// Short name of the value kind for error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) | Self::Float(_) => "number",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Set(_) => "set",
            Self::Map(_) => "map",
            Self::Object(_) => "object",
        }
    }

    /// Total order used to keep sets canonical.
    #[must_use]
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::String(a), Self::String(b)) => a.cmp(b),
            (Self::List(a), Self::List(b)) | (Self::Set(a), Self::Set(b)) => {
                cmp_sequences(a, b)
            }
            (Self::Map(a), Self::Map(b)) | (Self::Object(a), Self::Object(b)) => {
                cmp_fields(a, b)
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }

    /// Variant rank for cross-variant ordering.
    const fn rank(&self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Null => 1,
            Self::Bool(_) => 2,
            Self::Int(_) => 3,
            Self::Float(_) => 4,
            Self::String(_) => 5,
            Self::List(_) => 6,
            Self::Set(_) => 7,
            Self::Map(_) => 8,
            Self::Object(_) => 9,
        }
    }

    /// Converts to JSON; unknown values encode as null.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Unknown | Self::Null => Value::Null,
            Self::Bool(value) => Value::Bool(*value),
            Self::Int(value) => Value::Number(Number::from(*value)),
            Self::Float(value) => Number::from_f64(*value).map_or(Value::Null, Value::Number),
            Self::String(value) => Value::String(value.clone()),
            Self::List(items) | Self::Set(items) => {
                Value::Array(items.iter().map(Self::to_json).collect())
            }
            Self::Map(fields) | Self::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect::<Map<_, _>>(),
            ),
        }
    }
}

/// Lexicographic comparison of element sequences.
fn cmp_sequences(a: &[StateValue], b: &[StateValue]) -> Ordering {
    for (left, right) in a.iter().zip(b) {
        let ordering = left.canonical_cmp(right);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    a.len().cmp(&b.len())
}

/// Lexicographic comparison of key/value entries.
fn cmp_fields(a: &BTreeMap<String, StateValue>, b: &BTreeMap<String, StateValue>) -> Ordering {
    for ((left_key, left), (right_key, right)) in a.iter().zip(b) {
        let ordering = left_key.cmp(right_key).then_with(|| left.canonical_cmp(right));
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    a.len().cmp(&b.len())
}

// ============================================================================
// SECTION: Conversions
// ============================================================================

impl From<bool> for StateValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for StateValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for StateValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for StateValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for StateValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&String> for StateValue {
    fn from(value: &String) -> Self {
        Self::String(value.clone())
    }
}

impl<T: Into<Self>> From<Option<T>> for StateValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
