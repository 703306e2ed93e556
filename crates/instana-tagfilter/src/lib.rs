// crates/instana-tagfilter/src/lib.rs
// ============================================================================
// Module: Instana Tag Filter
// Description: Tag-filter expression language and its API tree form.
// Purpose: Parse, normalize, and translate tag filters between the textual
//          state form and the backend's typed tree.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Tag filters restrict which calls, entities, or beacons an alert applies to.
//! Operators author them as infix expressions such as
//! `service.name@dest EQUALS 'checkout' AND call.http.status@na GREATER_THAN 499`;
//! the backend stores them as a tree of `EXPRESSION` and `TAG_FILTER` nodes.
//!
//! This crate provides:
//! - [`parse_expression`]: surface syntax to [`Expression`].
//! - [`to_api`] / [`from_api`]: [`Expression`] to and from the [`TagFilter`] tree.
//! - [`normalize`]: the canonical text stored in state for drift detection.
//!
//! Invariants:
//! - `parse(normalize(parse(s))) == parse(s)` for every accepted `s`.
//! - `from_api(to_api(e)) == e` for every parsed expression `e`.
//! - Normalization preserves operand order and grouping.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod api;
pub mod error;
pub mod expression;
pub mod mapper;
pub mod parser;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use api::LogicalOperator;
pub use api::TagFilter;
pub use api::TagFilterNodeType;
pub use error::TagFilterError;
pub use expression::EntityOrigin;
pub use expression::Expression;
pub use expression::Literal;
pub use expression::Operator;
pub use expression::TagComparison;
pub use mapper::from_api;
pub use mapper::map_tag_filter_to_normalized_string;
pub use mapper::normalize;
pub use mapper::parse_to_api;
pub use mapper::to_api;
pub use parser::parse_expression;
