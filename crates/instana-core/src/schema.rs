// crates/instana-core/src/schema.rs
// ============================================================================
// Module: Schema Descriptors
// Description: Declarative attribute trees with types, defaults, and checks.
// Purpose: Validate planned state generically and shape stored state.
// Dependencies: crate::value, serde_json
// ============================================================================

//! ## Overview
//! A [`Schema`] lists the [`Attribute`]s of a resource. Nested blocks are
//! `Object` attributes (single block) or `List`/`Set` of `Object` (repeated
//! blocks). The same descriptor drives three things:
//! - [`Schema::validate`]: required attributes, value types, and
//!   [`Validator`]s, reported as path-bound diagnostics;
//! - [`Schema::apply_defaults`]: fills null optional attributes with their
//!   declared defaults before mapping;
//! - [`Schema::complete`] / [`Schema::decode_json`]: shape state so every
//!   declared attribute is present, with explicit nulls where absent.
//!
//! Unknown values pass validation untouched; they are checked again once
//! the host knows them.

use std::collections::BTreeMap;

use serde_json::Number;
use serde_json::Value;

use crate::diagnostics::Diagnostic;
use crate::diagnostics::Diagnostics;
use crate::path::AttributePath;
use crate::value::StateValue;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Declared type of an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeType {
    /// String.
    String,
    /// Boolean.
    Bool,
    /// Integer.
    Int,
    /// Number (integers accepted).
    Float,
    /// Ordered list.
    List(Box<AttributeType>),
    /// Unordered set.
    Set(Box<AttributeType>),
    /// Map with string keys.
    Map(Box<AttributeType>),
    /// Nested object with named attributes.
    Object(Vec<Attribute>),
}

impl AttributeType {
    /// Shorthand for a list of strings.
    #[must_use]
    pub fn string_list() -> Self {
        Self::List(Box::new(Self::String))
    }

    /// Shorthand for a set of strings.
    #[must_use]
    pub fn string_set() -> Self {
        Self::Set(Box::new(Self::String))
    }

    /// Shorthand for a map of strings.
    #[must_use]
    pub fn string_map() -> Self {
        Self::Map(Box::new(Self::String))
    }

    /// Type name for diagnostics.
    const fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Int => "integer",
            Self::Float => "number",
            Self::List(_) => "list",
            Self::Set(_) => "set",
            Self::Map(_) => "map",
            Self::Object(_) => "object",
        }
    }
}

// ============================================================================
// SECTION: Validators
// ============================================================================

/// Value constraint checked after the type check.
#[derive(Debug, Clone, PartialEq)]
pub enum Validator {
    /// String must be one of the listed values.
    OneOf(&'static [&'static str]),
    /// String length (in characters) within bounds, inclusive.
    LengthBetween(usize, usize),
    /// Integer within bounds, inclusive.
    IntBetween(i64, i64),
    /// Integer must be one of the listed values.
    IntOneOf(&'static [i64]),
    /// Number strictly greater than the bound.
    FloatGreaterThan(f64),
    /// Number strictly between the bounds.
    FloatBetweenExclusive(f64, f64),
    /// Collection element count within bounds, inclusive.
    SizeBetween(usize, usize),
    /// Each string element must be one of the listed values.
    EachOneOf(&'static [&'static str]),
    /// String must parse as JSON.
    Json,
}

impl Validator {
    /// Checks a known, correctly typed value; returns the failure message.
    fn check(&self, value: &StateValue) -> Option<String> {
        match self {
            Self::OneOf(allowed) => value
                .as_str()
                .filter(|text| !allowed.contains(text))
                .map(|text| format!("value must be one of {allowed:?}, got \"{text}\"")),
            Self::LengthBetween(min, max) => value.as_str().and_then(|text| {
                let length = text.chars().count();
                (length < *min || length > *max).then(|| {
                    format!("string length must be between {min} and {max}, got {length}")
                })
            }),
            Self::IntBetween(min, max) => value
                .as_i64()
                .filter(|number| number < min || number > max)
                .map(|number| format!("value must be between {min} and {max}, got {number}")),
            Self::IntOneOf(allowed) => value
                .as_i64()
                .filter(|number| !allowed.contains(number))
                .map(|number| format!("value must be one of {allowed:?}, got {number}")),
            Self::FloatGreaterThan(bound) => value
                .as_f64()
                .filter(|number| number <= bound)
                .map(|number| format!("value must be greater than {bound}, got {number}")),
            Self::FloatBetweenExclusive(low, high) => value
                .as_f64()
                .filter(|number| number <= low || number >= high)
                .map(|number| {
                    format!("value must be between {low} and {high} exclusive, got {number}")
                }),
            Self::SizeBetween(min, max) => value.as_items().and_then(|items| {
                (items.len() < *min || items.len() > *max).then(|| {
                    format!("must contain between {min} and {max} elements, got {}", items.len())
                })
            }),
            Self::EachOneOf(allowed) => value.as_items().and_then(|items| {
                items
                    .iter()
                    .filter_map(StateValue::as_str)
                    .find(|text| !allowed.contains(text))
                    .map(|text| format!("elements must be one of {allowed:?}, got \"{text}\""))
            }),
            Self::Json => value.as_str().and_then(|text| {
                serde_json::from_str::<Value>(text).err().map(|err| format!("invalid JSON: {err}"))
            }),
        }
    }
}

// ============================================================================
// SECTION: Attributes
// ============================================================================

/// Declared attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Attribute name.
    pub name: &'static str,
    /// Declared type.
    pub kind: AttributeType,
    /// Must be set by the operator.
    pub required: bool,
    /// Set by the provider (possibly also settable by the operator).
    pub computed: bool,
    /// Never shown in plans or logs.
    pub sensitive: bool,
    /// Value used when the operator leaves the attribute null.
    pub default: Option<StateValue>,
    /// Value constraints.
    pub validators: Vec<Validator>,
    /// Operator-facing description.
    pub description: &'static str,
}

impl Attribute {
    /// Optional attribute of the given type.
    #[must_use]
    pub const fn new(name: &'static str, kind: AttributeType) -> Self {
        Self {
            name,
            kind,
            required: false,
            computed: false,
            sensitive: false,
            default: None,
            validators: Vec::new(),
            description: "",
        }
    }

    /// Optional string attribute.
    #[must_use]
    pub const fn string(name: &'static str) -> Self {
        Self::new(name, AttributeType::String)
    }

    /// Optional boolean attribute.
    #[must_use]
    pub const fn bool(name: &'static str) -> Self {
        Self::new(name, AttributeType::Bool)
    }

    /// Optional integer attribute.
    #[must_use]
    pub const fn int(name: &'static str) -> Self {
        Self::new(name, AttributeType::Int)
    }

    /// Optional number attribute.
    #[must_use]
    pub const fn float(name: &'static str) -> Self {
        Self::new(name, AttributeType::Float)
    }

    /// Single nested block.
    #[must_use]
    pub const fn block(name: &'static str, attributes: Vec<Self>) -> Self {
        Self::new(name, AttributeType::Object(attributes))
    }

    /// Repeated nested block with list semantics.
    #[must_use]
    pub fn block_list(name: &'static str, attributes: Vec<Self>) -> Self {
        Self::new(name, AttributeType::List(Box::new(AttributeType::Object(attributes))))
    }

    /// Repeated nested block with set semantics.
    #[must_use]
    pub fn block_set(name: &'static str, attributes: Vec<Self>) -> Self {
        Self::new(name, AttributeType::Set(Box::new(AttributeType::Object(attributes))))
    }

    /// Marks the attribute required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the attribute computed.
    #[must_use]
    pub const fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    /// Marks the attribute sensitive.
    #[must_use]
    pub const fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Declares a default; defaulted attributes are also computed.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<StateValue>) -> Self {
        self.default = Some(value.into());
        self.computed = true;
        self
    }

    /// Adds a validator.
    #[must_use]
    pub fn validate(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Sets the description.
    #[must_use]
    pub const fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }
}

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Declared shape of a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    /// Operator-facing description.
    pub description: &'static str,
    /// Top-level attributes.
    pub attributes: Vec<Attribute>,
}

impl Schema {
    /// Builds a schema.
    #[must_use]
    pub const fn new(description: &'static str, attributes: Vec<Attribute>) -> Self {
        Self {
            description,
            attributes,
        }
    }

    /// Looks up a top-level attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attribute| attribute.name == name)
    }

    /// Validates a planned state object.
    #[must_use]
    pub fn validate(&self, value: &StateValue) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        validate_object(&self.attributes, value, &AttributePath::root(), &mut diagnostics);
        diagnostics
    }

    /// Fills null attributes that declare a default, recursively.
    #[must_use]
    pub fn apply_defaults(&self, value: StateValue) -> StateValue {
        defaults_object(&self.attributes, value)
    }

    /// Adds explicit nulls for every declared attribute missing from `value`.
    #[must_use]
    pub fn complete(&self, value: StateValue) -> StateValue {
        complete_object(&self.attributes, value)
    }

    /// Decodes stored JSON into a complete state object.
    ///
    /// Attributes the schema does not declare are dropped.
    #[must_use]
    pub fn decode_json(&self, raw: &serde_json::Map<String, Value>) -> StateValue {
        decode_object(&self.attributes, raw)
    }
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates an object against its attributes.
fn validate_object(
    attributes: &[Attribute],
    value: &StateValue,
    path: &AttributePath,
    diagnostics: &mut Diagnostics,
) {
    let Some(fields) = value.as_fields() else {
        if !value.is_absent() {
            diagnostics.push(
                Diagnostic::error(
                    "Invalid attribute type",
                    format!("expected object, got {}", value.kind_name()),
                )
                .at(path.clone()),
            );
        }
        return;
    };
    for key in fields.keys() {
        if !attributes.iter().any(|attribute| attribute.name == key) {
            diagnostics.push(
                Diagnostic::error(
                    "Unsupported argument",
                    format!("an argument named \"{key}\" is not expected here"),
                )
                .at(path.child(key)),
            );
        }
    }
    for attribute in attributes {
        let child = path.child(attribute.name);
        let field = value.get(attribute.name);
        if field.is_unknown() {
            continue;
        }
        if field.is_null() {
            if attribute.required {
                diagnostics.push(
                    Diagnostic::error(
                        "Missing required argument",
                        format!("the argument \"{}\" is required", attribute.name),
                    )
                    .at(child),
                );
            }
            continue;
        }
        validate_value(attribute, &attribute.kind, field, &child, diagnostics);
    }
}

/// Validates a known value against its declared type and validators.
fn validate_value(
    attribute: &Attribute,
    kind: &AttributeType,
    value: &StateValue,
    path: &AttributePath,
    diagnostics: &mut Diagnostics,
) {
    if !type_matches(kind, value) {
        diagnostics.push(
            Diagnostic::error(
                "Invalid attribute type",
                format!("expected {}, got {}", kind.name(), value.kind_name()),
            )
            .at(path.clone()),
        );
        return;
    }
    match kind {
        AttributeType::List(element) | AttributeType::Set(element) => {
            for (index, item) in value.as_items().unwrap_or_default().iter().enumerate() {
                if item.is_unknown() {
                    continue;
                }
                validate_element(element, item, &path.index(index), diagnostics);
            }
        }
        AttributeType::Map(element) => {
            for (key, item) in value.as_fields().into_iter().flatten() {
                if !item.is_unknown() {
                    validate_element(element, item, &path.key(key), diagnostics);
                }
            }
        }
        AttributeType::Object(children) => validate_object(children, value, path, diagnostics),
        AttributeType::String | AttributeType::Bool | AttributeType::Int | AttributeType::Float => {
        }
    }
    if value.contains_unknown() {
        return;
    }
    for validator in &attribute.validators {
        if let Some(message) = validator.check(value) {
            diagnostics.push(
                Diagnostic::error("Invalid attribute value", message).at(path.clone()),
            );
        }
    }
}

/// Validates a collection element (elements carry no validators of their own).
fn validate_element(
    kind: &AttributeType,
    value: &StateValue,
    path: &AttributePath,
    diagnostics: &mut Diagnostics,
) {
    if let AttributeType::Object(children) = kind {
        validate_object(children, value, path, diagnostics);
        return;
    }
    if !value.is_null() && !type_matches(kind, value) {
        diagnostics.push(
            Diagnostic::error(
                "Invalid attribute type",
                format!("expected {}, got {}", kind.name(), value.kind_name()),
            )
            .at(path.clone()),
        );
    }
}

/// Returns true when a known value has the declared type.
fn type_matches(kind: &AttributeType, value: &StateValue) -> bool {
    match (kind, value) {
        (AttributeType::String, StateValue::String(_))
        | (AttributeType::Bool, StateValue::Bool(_))
        | (AttributeType::Float, StateValue::Int(_) | StateValue::Float(_))
        | (AttributeType::List(_) | AttributeType::Set(_), StateValue::List(_) | StateValue::Set(_))
        | (AttributeType::Map(_), StateValue::Map(_) | StateValue::Object(_))
        | (AttributeType::Object(_), StateValue::Object(_)) => true,
        (AttributeType::Int, _) => value.as_i64().is_some(),
        _ => false,
    }
}

// ============================================================================
// SECTION: Defaults And Completion
// ============================================================================

/// Applies defaults inside an object.
fn defaults_object(attributes: &[Attribute], value: StateValue) -> StateValue {
    let StateValue::Object(mut fields) = value else {
        return value;
    };
    for attribute in attributes {
        let current = fields.remove(attribute.name).unwrap_or(StateValue::Null);
        let updated = match (&attribute.default, current) {
            (Some(default), StateValue::Null) => default.clone(),
            (_, current) => defaults_nested(&attribute.kind, current),
        };
        fields.insert(attribute.name.to_string(), updated);
    }
    StateValue::Object(fields)
}

/// Applies defaults inside nested blocks.
fn defaults_nested(kind: &AttributeType, value: StateValue) -> StateValue {
    match (kind, value) {
        (AttributeType::Object(children), value) => defaults_object(children, value),
        (AttributeType::List(element), StateValue::List(items)) => StateValue::List(
            items.into_iter().map(|item| defaults_nested(element, item)).collect(),
        ),
        (AttributeType::Set(element), StateValue::Set(items) | StateValue::List(items)) => {
            let items = items.into_iter().map(|item| defaults_nested(element, item)).collect();
            StateValue::set_of(items)
        }
        (_, value) => value,
    }
}

/// Adds explicit nulls inside an object.
fn complete_object(attributes: &[Attribute], value: StateValue) -> StateValue {
    let mut fields = match value {
        StateValue::Object(fields) => fields,
        other => return other,
    };
    for attribute in attributes {
        let current = fields.remove(attribute.name).unwrap_or(StateValue::Null);
        fields.insert(attribute.name.to_string(), complete_nested(&attribute.kind, current));
    }
    StateValue::Object(fields)
}

/// Adds explicit nulls inside nested blocks.
fn complete_nested(kind: &AttributeType, value: StateValue) -> StateValue {
    match (kind, value) {
        (AttributeType::Object(children), value) => complete_object(children, value),
        (AttributeType::List(element), StateValue::List(items)) => StateValue::List(
            items.into_iter().map(|item| complete_nested(element, item)).collect(),
        ),
        (AttributeType::Set(element), StateValue::Set(items) | StateValue::List(items)) => {
            let items = items.into_iter().map(|item| complete_nested(element, item)).collect();
            StateValue::set_of(items)
        }
        (_, value) => value,
    }
}

// ============================================================================
// SECTION: JSON Decoding
// ============================================================================

/// Decodes a stored object.
fn decode_object(attributes: &[Attribute], raw: &serde_json::Map<String, Value>) -> StateValue {
    let fields: BTreeMap<String, StateValue> = attributes
        .iter()
        .map(|attribute| {
            let value = raw.get(attribute.name).map_or(StateValue::Null, |value| {
                decode_value(&attribute.kind, value)
            });
            (attribute.name.to_string(), value)
        })
        .collect();
    StateValue::Object(fields)
}

/// Decodes a stored value by declared type.
fn decode_value(kind: &AttributeType, raw: &Value) -> StateValue {
    match (kind, raw) {
        (_, Value::Null) => StateValue::Null,
        (AttributeType::String, Value::String(text)) => StateValue::String(text.clone()),
        (AttributeType::Bool, Value::Bool(flag)) => StateValue::Bool(*flag),
        (AttributeType::Int, Value::Number(number)) => decode_number(number),
        (AttributeType::Float, Value::Number(number)) => {
            StateValue::Float(number.as_f64().unwrap_or_default())
        }
        (AttributeType::List(element), Value::Array(items)) => {
            StateValue::List(items.iter().map(|item| decode_value(element, item)).collect())
        }
        (AttributeType::Set(element), Value::Array(items)) => {
            StateValue::set_of(items.iter().map(|item| decode_value(element, item)).collect())
        }
        (AttributeType::Map(element), Value::Object(entries)) => StateValue::Map(
            entries
                .iter()
                .map(|(key, value)| (key.clone(), decode_value(element, value)))
                .collect(),
        ),
        (AttributeType::Object(children), Value::Object(entries)) => {
            decode_object(children, entries)
        }
        (AttributeType::Object(_), Value::Array(items)) if items.len() == 1 => {
            items.first().map_or(StateValue::Null, |item| decode_value(kind, item))
        }
        (_, other) => decode_untyped(other),
    }
}

/// Integral numbers decode as ints, everything else as floats.
fn decode_number(number: &Number) -> StateValue {
    number
        .as_i64()
        .map_or_else(|| StateValue::Float(number.as_f64().unwrap_or_default()), StateValue::Int)
}

/// Decodes a value whose stored type does not match the schema.
fn decode_untyped(raw: &Value) -> StateValue {
    match raw {
        Value::Null => StateValue::Null,
        Value::Bool(flag) => StateValue::Bool(*flag),
        Value::Number(number) => decode_number(number),
        Value::String(text) => StateValue::String(text.clone()),
        Value::Array(items) => StateValue::List(items.iter().map(decode_untyped).collect()),
        Value::Object(entries) => StateValue::Map(
            entries.iter().map(|(key, value)| (key.clone(), decode_untyped(value))).collect(),
        ),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
