// crates/instana-tagfilter/src/api.rs
// ============================================================================
// Module: Tag Filter API Tree
// Description: Serde model of the backend's tag filter node tree.
// Purpose: Carry tag filters over the wire exactly as the backend expects.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The backend stores tag filters as a recursive tree. `EXPRESSION` nodes hold
//! a logical operator and child elements; `TAG_FILTER` nodes hold a single
//! comparison. The node type is kept as raw text so unknown kinds survive
//! deserialization and can be reported by the mapper.

use serde::Deserialize;
use serde::Serialize;

use crate::expression::EntityOrigin;
use crate::expression::Operator;

// ============================================================================
// SECTION: Node Types
// ============================================================================

/// Known tag filter node types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagFilterNodeType {
    /// Interior node combining child elements.
    Expression,
    /// Leaf comparison.
    TagFilter,
}

impl TagFilterNodeType {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expression => "EXPRESSION",
            Self::TagFilter => "TAG_FILTER",
        }
    }

    /// Parses the wire representation.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "EXPRESSION" => Some(Self::Expression),
            "TAG_FILTER" => Some(Self::TagFilter),
            _ => None,
        }
    }
}

/// Logical operator of an `EXPRESSION` node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalOperator {
    /// All children must match.
    And,
    /// Any child must match.
    Or,
}

// ============================================================================
// SECTION: Tree
// ============================================================================

/// Backend tag filter node.
///
/// # Invariants
/// - `EXPRESSION` nodes use `logical_operator` and `elements`.
/// - `TAG_FILTER` nodes use `name`, `entity`, `operator`, and at most one of
///   the value fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagFilter {
    /// Raw node type (`EXPRESSION`, `TAG_FILTER`, or something unknown).
    #[serde(rename = "type")]
    pub kind: String,
    /// Logical operator for `EXPRESSION` nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical_operator: Option<LogicalOperator>,
    /// Child nodes for `EXPRESSION` nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<Self>,
    /// Tag name for `TAG_FILTER` nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Entity origin (`SOURCE`, `DESTINATION`, `NOT_APPLICABLE`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    /// Comparison operator keyword.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    /// Key of a key/value tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// String operand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    /// Numeric operand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_value: Option<i64>,
    /// Boolean operand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boolean_value: Option<bool>,
    /// Value of a key/value tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl TagFilter {
    /// Builds an `EXPRESSION` node.
    #[must_use]
    pub fn expression(operator: LogicalOperator, elements: Vec<Self>) -> Self {
        Self {
            kind: TagFilterNodeType::Expression.as_str().to_string(),
            logical_operator: Some(operator),
            elements,
            ..Self::default()
        }
    }

    /// Builds a `TAG_FILTER` leaf without an operand.
    #[must_use]
    pub fn leaf(entity: EntityOrigin, name: &str, operator: Operator) -> Self {
        Self {
            kind: TagFilterNodeType::TagFilter.as_str().to_string(),
            name: Some(name.to_string()),
            entity: Some(entity.api_name().to_string()),
            operator: Some(operator.as_str().to_string()),
            ..Self::default()
        }
    }

    /// Builds a `TAG_FILTER` leaf comparing against a string.
    #[must_use]
    pub fn string(entity: EntityOrigin, name: &str, operator: Operator, value: &str) -> Self {
        Self {
            string_value: Some(value.to_string()),
            ..Self::leaf(entity, name, operator)
        }
    }

    /// Builds a `TAG_FILTER` leaf comparing against a number.
    #[must_use]
    pub fn number(entity: EntityOrigin, name: &str, operator: Operator, value: i64) -> Self {
        Self {
            number_value: Some(value),
            ..Self::leaf(entity, name, operator)
        }
    }

    /// Builds a `TAG_FILTER` leaf comparing against a boolean.
    #[must_use]
    pub fn boolean(entity: EntityOrigin, name: &str, operator: Operator, value: bool) -> Self {
        Self {
            boolean_value: Some(value),
            ..Self::leaf(entity, name, operator)
        }
    }

    /// Builds a `TAG_FILTER` leaf comparing a key/value tag.
    #[must_use]
    pub fn key_value(
        entity: EntityOrigin,
        name: &str,
        operator: Operator,
        key: &str,
        value: &str,
    ) -> Self {
        Self {
            key: Some(key.to_string()),
            value: Some(value.to_string()),
            ..Self::leaf(entity, name, operator)
        }
    }

    /// Returns the parsed node type, if known.
    #[must_use]
    pub fn node_type(&self) -> Option<TagFilterNodeType> {
        TagFilterNodeType::parse(&self.kind)
    }
}
