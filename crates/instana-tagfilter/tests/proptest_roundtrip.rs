// crates/instana-tagfilter/tests/proptest_roundtrip.rs
// ============================================================================
// Module: Tag Filter Round-Trip Property Tests
// Description: Generated expressions checked against the round-trip laws.
// Purpose: Ensure normalization and API lowering never lose structure.
// Dependencies: instana-tagfilter, proptest
// ============================================================================

//! ## Overview
//! Generates arbitrary expression trees and checks that normalized text parses
//! back to the same tree and that the API tree maps back to the same tree.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use instana_tagfilter::EntityOrigin;
use instana_tagfilter::Expression;
use instana_tagfilter::Literal;
use instana_tagfilter::Operator;
use instana_tagfilter::TagComparison;
use instana_tagfilter::from_api;
use instana_tagfilter::parse_expression;
use instana_tagfilter::to_api;
use proptest::prelude::*;

// ============================================================================
// SECTION: Strategies
// ============================================================================

/// Generates tag names that cannot collide with keywords.
fn tag_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,6}(\\.[a-z0-9_:/-]{1,6}){1,2}"
}

/// Generates a literal.
fn literal() -> impl Strategy<Value = Literal> {
    prop_oneof![
        "[ -~]{0,12}".prop_map(Literal::String),
        any::<i64>().prop_map(Literal::Number),
        any::<bool>().prop_map(Literal::Boolean),
        ("[a-z']{1,6}", "[a-z\\\\]{0,6}").prop_map(|(key, value)| Literal::KeyValue {
            key,
            value,
        }),
    ]
}

/// Generates a single comparison leaf respecting operator arity.
fn comparison() -> impl Strategy<Value = Expression> {
    (
        tag_name(),
        prop::sample::select(EntityOrigin::ALL.to_vec()),
        prop::sample::select(Operator::ALL.to_vec()),
        literal(),
    )
        .prop_map(|(name, entity, operator, value)| {
            Expression::Comparison(TagComparison {
                name,
                entity,
                operator,
                value: if operator.is_unary() { None } else { Some(value) },
            })
        })
}

/// Generates expression trees whose groups have at least two operands.
fn expression() -> impl Strategy<Value = Expression> {
    comparison().prop_recursive(4, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 2 .. 4).prop_map(Expression::And),
            prop::collection::vec(inner, 2 .. 4).prop_map(Expression::Or),
        ]
    })
}

// ============================================================================
// SECTION: Properties
// ============================================================================

proptest! {
    #[test]
    fn normalized_text_parses_to_same_tree(expr in expression()) {
        let text = expr.to_string();
        let reparsed = parse_expression(&text).unwrap();
        prop_assert_eq!(&reparsed, &expr);
        prop_assert_eq!(reparsed.to_string(), text);
    }

    #[test]
    fn api_tree_maps_back_to_same_tree(expr in expression()) {
        let api = to_api(&expr);
        prop_assert_eq!(from_api(&api).unwrap(), Some(expr));
    }

    #[test]
    fn parser_never_panics_on_arbitrary_input(input in ".{0,64}") {
        let _ = parse_expression(&input);
    }
}
