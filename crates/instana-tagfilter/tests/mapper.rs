// crates/instana-tagfilter/tests/mapper.rs
// ============================================================================
// Module: Tag Filter Mapper Tests
// Description: Normalization and API tree conversions.
// Purpose: Validate canonical text and backend tree shapes in both directions.
// Dependencies: instana-tagfilter, serde_json
// ============================================================================

//! ## Overview
//! Exercises `normalize`, `to_api`, `from_api`, and the backend JSON shape.

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
use instana_tagfilter::LogicalOperator;
use instana_tagfilter::Operator;
use instana_tagfilter::TagFilter;
use instana_tagfilter::TagFilterError;
use instana_tagfilter::from_api;
use instana_tagfilter::map_tag_filter_to_normalized_string;
use instana_tagfilter::normalize;
use instana_tagfilter::parse_expression;
use instana_tagfilter::parse_to_api;
use instana_tagfilter::to_api;
use serde_json::json;

// ============================================================================
// SECTION: Normalization
// ============================================================================

#[test]
fn normalized_comparison_is_stable() {
    let source = "host.fqdn@na STARTS_WITH 'fooBar'";
    assert_eq!(normalize(source).unwrap(), source);
}

#[test]
fn normalization_adds_origin_and_uppercases_keywords() {
    assert_eq!(
        normalize("service.name equals 'a' and x@SRC is_empty").unwrap(),
        "service.name@dest EQUALS 'a' AND x@src IS_EMPTY"
    );
}

#[test]
fn normalization_keeps_grouping_and_order() {
    assert_eq!(
        normalize("(b EQUALS 1 OR a EQUALS 2) AND (c EQUALS true AND d EQUALS false)").unwrap(),
        "(b@dest EQUALS 1 OR a@dest EQUALS 2) AND (c@dest EQUALS true AND d@dest EQUALS false)"
    );
    assert_eq!(
        normalize("a IS_BLANK OR (b IS_BLANK OR c IS_BLANK)").unwrap(),
        "a@dest IS_BLANK OR (b@dest IS_BLANK OR c@dest IS_BLANK)"
    );
    assert_eq!(
        normalize("a IS_BLANK OR b IS_BLANK AND c IS_BLANK").unwrap(),
        "a@dest IS_BLANK OR b@dest IS_BLANK AND c@dest IS_BLANK"
    );
}

#[test]
fn normalization_escapes_string_values() {
    assert_eq!(normalize(r"a EQUALS 'it\'s'").unwrap(), r"a@dest EQUALS 'it\'s'");
    assert_eq!(normalize("k EQUALS 'a'  =  'b'").unwrap(), "k@dest EQUALS 'a'='b'");
}

// ============================================================================
// SECTION: To API
// ============================================================================

#[test]
fn to_api_emits_tag_filter_leaf() {
    let api = parse_to_api("host.fqdn@na STARTS_WITH 'fooBar'").unwrap();
    assert_eq!(
        api,
        TagFilter::string(EntityOrigin::NotApplicable, "host.fqdn", Operator::StartsWith, "fooBar")
    );
    assert_eq!(
        serde_json::to_value(&api).unwrap(),
        json!({
            "type": "TAG_FILTER",
            "name": "host.fqdn",
            "entity": "NOT_APPLICABLE",
            "operator": "STARTS_WITH",
            "stringValue": "fooBar"
        })
    );
}

#[test]
fn to_api_emits_expression_nodes() {
    let expression = parse_expression("a EQUALS 1 OR b@src NOT_EMPTY").unwrap();
    let api = to_api(&expression);
    assert_eq!(
        serde_json::to_value(&api).unwrap(),
        json!({
            "type": "EXPRESSION",
            "logicalOperator": "OR",
            "elements": [
                {
                    "type": "TAG_FILTER",
                    "name": "a",
                    "entity": "DESTINATION",
                    "operator": "EQUALS",
                    "numberValue": 1
                },
                {"type": "TAG_FILTER", "name": "b", "entity": "SOURCE", "operator": "NOT_EMPTY"}
            ]
        })
    );
}

// ============================================================================
// SECTION: From API
// ============================================================================

#[test]
fn number_leaf_maps_to_normalized_string() {
    let input = TagFilter::number(EntityOrigin::Destination, "name", Operator::Equals, 1234);
    assert_eq!(
        map_tag_filter_to_normalized_string(&input).unwrap().as_deref(),
        Some("name@dest EQUALS 1234")
    );
}

#[test]
fn empty_expression_maps_to_none() {
    let input = TagFilter::expression(LogicalOperator::Or, Vec::new());
    assert_eq!(map_tag_filter_to_normalized_string(&input).unwrap(), None);
}

#[test]
fn single_element_expression_collapses() {
    let input = TagFilter::expression(
        LogicalOperator::And,
        vec![TagFilter::leaf(EntityOrigin::Source, "x", Operator::IsEmpty)],
    );
    let normalized = map_tag_filter_to_normalized_string(&input).unwrap();
    assert_eq!(normalized.as_deref(), Some("x@src IS_EMPTY"));
}

#[test]
fn unknown_node_type_is_rejected() {
    let input = TagFilter {
        kind: "invalid".to_string(),
        ..TagFilter::default()
    };
    assert_eq!(from_api(&input).unwrap_err(), TagFilterError::UnsupportedFilterType {
        kind: "invalid".to_string()
    });
}

#[test]
fn unknown_node_type_nested_in_expression_is_rejected() {
    let input = TagFilter::expression(LogicalOperator::And, vec![
        TagFilter::leaf(EntityOrigin::Source, "x", Operator::IsEmpty),
        TagFilter {
            kind: "CUSTOM".to_string(),
            ..TagFilter::default()
        },
    ]);
    assert!(matches!(from_api(&input), Err(TagFilterError::UnsupportedFilterType { .. })));
}

#[test]
fn leaf_without_value_for_binary_operator_is_invalid() {
    let input = TagFilter::leaf(EntityOrigin::Destination, "x", Operator::Equals);
    assert!(matches!(from_api(&input), Err(TagFilterError::InvalidNode { .. })));
}

#[test]
fn backend_json_decodes_and_maps() {
    let raw = json!({
        "type": "EXPRESSION",
        "logicalOperator": "AND",
        "elements": [
            {
                "type": "TAG_FILTER",
                "name": "service.name",
                "entity": "DESTINATION",
                "operator": "EQUALS",
                "stringValue": "checkout"
            },
            {
                "type": "TAG_FILTER",
                "name": "kubernetes.label",
                "entity": "SOURCE",
                "operator": "EQUALS",
                "key": "app",
                "value": "web"
            }
        ]
    });
    let filter: TagFilter = serde_json::from_value(raw).unwrap();
    assert_eq!(
        map_tag_filter_to_normalized_string(&filter).unwrap().as_deref(),
        Some("service.name@dest EQUALS 'checkout' AND kubernetes.label@src EQUALS 'app'='web'")
    );
}
