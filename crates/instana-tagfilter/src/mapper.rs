// crates/instana-tagfilter/src/mapper.rs
// ============================================================================
// Module: Tag Filter Mapper
// Description: Conversions between expression text, the typed tree, and the
//              backend node tree.
// Purpose: Give resource mappers one entry point per direction.
// Dependencies: crate::api, crate::expression, crate::parser
// ============================================================================

//! ## Overview
//! State stores tag filters as normalized text; the backend stores the
//! [`TagFilter`] node tree. Mapping in either direction goes through
//! [`Expression`] so both sides agree on grouping and operand order.
//!
//! Reading from the backend tolerates degenerate groups: an `EXPRESSION`
//! with no elements maps to `None`, and a group with a single element
//! collapses into that element.

use crate::api::LogicalOperator;
use crate::api::TagFilter;
use crate::api::TagFilterNodeType;
use crate::error::TagFilterError;
use crate::expression::EntityOrigin;
use crate::expression::Expression;
use crate::expression::Literal;
use crate::expression::Operator;
use crate::expression::TagComparison;
use crate::parser::parse_expression;

// ============================================================================
// SECTION: Text
// ============================================================================

/// Parses and re-renders an expression in canonical form.
///
/// # Errors
/// Returns [`TagFilterError`] when the input does not parse.
pub fn normalize(input: &str) -> Result<String, TagFilterError> {
    parse_expression(input).map(|expression| expression.to_string())
}

/// Parses expression text straight into the backend node tree.
///
/// # Errors
/// Returns [`TagFilterError`] when the input does not parse.
pub fn parse_to_api(input: &str) -> Result<TagFilter, TagFilterError> {
    parse_expression(input).map(|expression| to_api(&expression))
}

/// Renders a backend node tree as normalized expression text.
///
/// Returns `Ok(None)` when the tree holds no comparisons.
///
/// # Errors
/// Returns [`TagFilterError`] for unknown node types or malformed leaves.
pub fn map_tag_filter_to_normalized_string(
    filter: &TagFilter,
) -> Result<Option<String>, TagFilterError> {
    Ok(from_api(filter)?.map(|expression| expression.to_string()))
}

// ============================================================================
// SECTION: Expression To API
// ============================================================================

/// Converts an expression into the backend node tree.
#[must_use]
pub fn to_api(expression: &Expression) -> TagFilter {
    match expression {
        Expression::And(items) => {
            TagFilter::expression(LogicalOperator::And, items.iter().map(to_api).collect())
        }
        Expression::Or(items) => {
            TagFilter::expression(LogicalOperator::Or, items.iter().map(to_api).collect())
        }
        Expression::Comparison(comparison) => comparison_to_api(comparison),
    }
}

/// Converts a single comparison into a `TAG_FILTER` leaf.
fn comparison_to_api(comparison: &TagComparison) -> TagFilter {
    let TagComparison {
        name,
        entity,
        operator,
        value,
    } = comparison;
    match value {
        None => TagFilter::leaf(*entity, name, *operator),
        Some(Literal::String(value)) => TagFilter::string(*entity, name, *operator, value),
        Some(Literal::Number(value)) => TagFilter::number(*entity, name, *operator, *value),
        Some(Literal::Boolean(value)) => TagFilter::boolean(*entity, name, *operator, *value),
        Some(Literal::KeyValue {
            key,
            value,
        }) => TagFilter::key_value(*entity, name, *operator, key, value),
    }
}

// ============================================================================
// SECTION: API To Expression
// ============================================================================

/// Converts a backend node tree into an expression.
///
/// # Errors
/// Returns [`TagFilterError::UnsupportedFilterType`] for unknown node types and
/// [`TagFilterError::InvalidNode`] for leaves missing required fields.
pub fn from_api(filter: &TagFilter) -> Result<Option<Expression>, TagFilterError> {
    match filter.node_type() {
        Some(TagFilterNodeType::Expression) => expression_from_api(filter),
        Some(TagFilterNodeType::TagFilter) => {
            comparison_from_api(filter).map(|c| Some(Expression::Comparison(c)))
        }
        None => Err(TagFilterError::UnsupportedFilterType {
            kind: filter.kind.clone(),
        }),
    }
}

/// Converts an `EXPRESSION` node, collapsing empty and single-element groups.
fn expression_from_api(filter: &TagFilter) -> Result<Option<Expression>, TagFilterError> {
    let mut children = Vec::with_capacity(filter.elements.len());
    for element in &filter.elements {
        if let Some(child) = from_api(element)? {
            children.push(child);
        }
    }
    if children.len() <= 1 {
        return Ok(children.pop());
    }
    match filter.logical_operator {
        Some(LogicalOperator::And) => Ok(Some(Expression::And(children))),
        Some(LogicalOperator::Or) => Ok(Some(Expression::Or(children))),
        None => Err(TagFilterError::InvalidNode {
            reason: "expression node without logicalOperator".to_string(),
        }),
    }
}

/// Converts a `TAG_FILTER` leaf.
fn comparison_from_api(filter: &TagFilter) -> Result<TagComparison, TagFilterError> {
    let name = filter.name.clone().ok_or_else(|| TagFilterError::InvalidNode {
        reason: "tag filter without name".to_string(),
    })?;
    let entity = match filter.entity.as_deref() {
        None => EntityOrigin::Destination,
        Some(raw) => {
            EntityOrigin::from_api_name(raw).ok_or_else(|| TagFilterError::InvalidNode {
                reason: format!("unknown entity `{raw}` for tag `{name}`"),
            })?
        }
    };
    let raw_operator = filter.operator.as_deref().ok_or_else(|| TagFilterError::InvalidNode {
        reason: format!("tag filter `{name}` without operator"),
    })?;
    let operator = Operator::parse(raw_operator).ok_or_else(|| TagFilterError::InvalidNode {
        reason: format!("unknown operator `{raw_operator}` for tag `{name}`"),
    })?;
    let value = if operator.is_unary() {
        None
    } else {
        Some(literal_from_api(filter).ok_or_else(|| TagFilterError::InvalidNode {
            reason: format!("tag filter `{name}` with operator {operator} has no value"),
        })?)
    };
    Ok(TagComparison {
        name,
        entity,
        operator,
        value,
    })
}

/// Picks the operand of a leaf, preferring key/value over scalar fields.
fn literal_from_api(filter: &TagFilter) -> Option<Literal> {
    if let (Some(key), Some(value)) = (&filter.key, &filter.value) {
        return Some(Literal::KeyValue {
            key: key.clone(),
            value: value.clone(),
        });
    }
    if let Some(value) = &filter.string_value {
        return Some(Literal::String(value.clone()));
    }
    if let Some(value) = filter.number_value {
        return Some(Literal::Number(value));
    }
    if let Some(value) = filter.boolean_value {
        return Some(Literal::Boolean(value));
    }
    filter.value.clone().map(Literal::String)
}
