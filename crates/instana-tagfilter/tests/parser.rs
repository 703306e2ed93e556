// crates/instana-tagfilter/tests/parser.rs
// ============================================================================
// Module: Tag Filter Parser Tests
// Description: Syntax acceptance, precedence, and error reporting.
// Purpose: Pin down the grammar accepted by `parse_expression`.
// Dependencies: instana-tagfilter
// ============================================================================

//! ## Overview
//! Covers comparison forms, AND/OR precedence, grouping, literal kinds, and
//! positioned syntax errors.

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
use instana_tagfilter::TagFilterError;
use instana_tagfilter::parse_expression;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds a comparison leaf.
fn cmp(name: &str, entity: EntityOrigin, operator: Operator, value: Option<Literal>) -> Expression {
    Expression::Comparison(TagComparison {
        name: name.to_string(),
        entity,
        operator,
        value,
    })
}

/// Builds a destination-side string equality leaf.
fn eq(name: &str, value: &str) -> Expression {
    cmp(name, EntityOrigin::Destination, Operator::Equals, Some(Literal::String(value.to_string())))
}

// ============================================================================
// SECTION: Comparisons
// ============================================================================

#[test]
fn parses_comparison_with_explicit_origin() {
    let parsed = parse_expression("host.fqdn@na STARTS_WITH 'fooBar'").unwrap();
    assert_eq!(
        parsed,
        cmp(
            "host.fqdn",
            EntityOrigin::NotApplicable,
            Operator::StartsWith,
            Some(Literal::String("fooBar".to_string()))
        )
    );
}

#[test]
fn missing_origin_defaults_to_destination() {
    let parsed = parse_expression("service.name EQUALS 'a'").unwrap();
    assert_eq!(parsed, eq("service.name", "a"));
}

#[test]
fn parses_number_boolean_and_key_value_literals() {
    assert_eq!(
        parse_expression("call.http.status@src GREATER_THAN -5").unwrap(),
        cmp(
            "call.http.status",
            EntityOrigin::Source,
            Operator::GreaterThan,
            Some(Literal::Number(-5))
        )
    );
    assert_eq!(
        parse_expression("call.erroneous equals TRUE").unwrap(),
        cmp(
            "call.erroneous",
            EntityOrigin::Destination,
            Operator::Equals,
            Some(Literal::Boolean(true))
        )
    );
    assert_eq!(
        parse_expression("agent.tag EQUALS 'env'='prod'").unwrap(),
        cmp(
            "agent.tag",
            EntityOrigin::Destination,
            Operator::Equals,
            Some(Literal::KeyValue {
                key: "env".to_string(),
                value: "prod".to_string(),
            })
        )
    );
}

#[test]
fn unary_operators_take_no_value() {
    let parsed = parse_expression("endpoint.name@dest NOT_EMPTY").unwrap();
    assert_eq!(parsed, cmp("endpoint.name", EntityOrigin::Destination, Operator::NotEmpty, None));
}

// ============================================================================
// SECTION: Composition
// ============================================================================

#[test]
fn and_binds_tighter_than_or() {
    let parsed = parse_expression("a EQUALS 'x' OR b EQUALS 'y' AND c EQUALS 'z'").unwrap();
    assert_eq!(
        parsed,
        Expression::Or(vec![eq("a", "x"), Expression::And(vec![eq("b", "y"), eq("c", "z")])])
    );
}

#[test]
fn parentheses_override_precedence_and_keep_nesting() {
    let parsed = parse_expression("(a EQUALS 'x' OR b EQUALS 'y') AND c EQUALS 'z'").unwrap();
    assert_eq!(
        parsed,
        Expression::And(vec![Expression::Or(vec![eq("a", "x"), eq("b", "y")]), eq("c", "z")])
    );
    let nested = parse_expression("a EQUALS 'x' AND (b EQUALS 'y' AND c EQUALS 'z')").unwrap();
    assert_eq!(
        nested,
        Expression::And(vec![eq("a", "x"), Expression::And(vec![eq("b", "y"), eq("c", "z")])])
    );
}

#[test]
fn parenthesized_single_comparison_unwraps() {
    assert_eq!(parse_expression("((a EQUALS 'x'))").unwrap(), eq("a", "x"));
}

// ============================================================================
// SECTION: Errors
// ============================================================================

#[test]
fn rejects_empty_input() {
    assert_eq!(parse_expression("   ").unwrap_err(), TagFilterError::EmptyInput);
}

#[test]
fn reports_missing_operator_position() {
    let err = parse_expression("service.name 'a'").unwrap_err();
    match err {
        TagFilterError::UnexpectedToken {
            expected,
            position,
            ..
        } => {
            assert_eq!(expected, "comparison operator");
            assert_eq!(position, 13);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn rejects_unknown_origin() {
    let err = parse_expression("a@nowhere EQUALS 'x'").unwrap_err();
    assert!(matches!(err, TagFilterError::UnexpectedToken { position: 2, .. }));
}

#[test]
fn rejects_binary_operator_without_value() {
    let err = parse_expression("a EQUALS").unwrap_err();
    assert!(matches!(err, TagFilterError::UnexpectedToken { .. }));
}

#[test]
fn rejects_trailing_input() {
    let err = parse_expression("a IS_EMPTY )").unwrap_err();
    assert_eq!(err, TagFilterError::TrailingInput {
        position: 11
    });
}

#[test]
fn rejects_overflowing_number() {
    let err = parse_expression("a EQUALS 99999999999999999999").unwrap_err();
    assert!(matches!(err, TagFilterError::InvalidNumber { .. }));
}

#[test]
fn rejects_excessive_nesting() {
    let source = format!("{}a IS_EMPTY{}", "(".repeat(40), ")".repeat(40));
    let err = parse_expression(&source).unwrap_err();
    assert!(matches!(err, TagFilterError::NestingTooDeep { max_depth: 32, .. }));
}
