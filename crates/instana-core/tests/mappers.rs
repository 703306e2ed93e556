// crates/instana-core/tests/mappers.rs
// ============================================================================
// Module: Shared Mapper Tests
// Description: Union, custom payload, channel, time threshold, tag filter.
// Purpose: Validate the sub-mappers every alert configuration relies on.
// Dependencies: instana-core, instana-restapi, instana-tagfilter
// ============================================================================

//! Union, custom payload, channel, time threshold, tag filter.

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

use std::collections::BTreeMap;

use instana_core::AttributePath;
use instana_core::MappingError;
use instana_core::ObjectReader;
use instana_core::StateValue;
use instana_core::mappers::TimeThresholdVariant;
use instana_core::mappers::alert_channels_attribute;
use instana_core::mappers::alert_channels_from_state;
use instana_core::mappers::alert_channels_to_state;
use instana_core::mappers::custom_payload_from_state;
use instana_core::mappers::custom_payload_to_state;
use instana_core::mappers::select_variant;
use instana_core::mappers::tag_filter_from_state;
use instana_core::mappers::tag_filter_to_state;
use instana_core::mappers::time_threshold_from_state;
use instana_core::mappers::time_threshold_to_state;
use instana_core::mappers::variant_state;
use instana_restapi::models::custom_payload::CustomPayloadField;
use instana_restapi::models::time_threshold::TimeThreshold;
use instana_tagfilter::EntityOrigin;
use instana_tagfilter::Operator;
use instana_tagfilter::TagFilter;

const RULE_VARIANTS: [&str; 6] =
    ["error_rate", "errors", "logs", "slowness", "status_code", "throughput"];

// ============================================================================
// SECTION: Unions
// ============================================================================

#[test]
fn rule_with_two_variants_is_rejected() {
    let rule = StateValue::object()
        .with("error_rate", StateValue::object().with("metric_name", "errors"))
        .with("errors", StateValue::object().with("metric_name", "errors"));
    let path = AttributePath::attribute("rule");
    let reader = ObjectReader::new(&rule, &path);
    let err = select_variant(&reader, &RULE_VARIANTS, "rule").unwrap_err();
    assert_eq!(
        err,
        MappingError::InvalidConfig {
            path,
            message: "rule must select exactly one variant".to_string(),
        }
    );
}

#[test]
fn rule_without_variant_is_rejected() {
    let rule = StateValue::object().with("errors", StateValue::Null);
    let err = select_variant(&ObjectReader::root(&rule), &RULE_VARIANTS, "rule").unwrap_err();
    assert_eq!(err.to_string(), "rule must select exactly one variant");
}

#[test]
fn selected_variant_reads_relative_to_its_slot() {
    let rule =
        StateValue::object().with("slowness", StateValue::object().with("aggregation", "P90"));
    let selected = select_variant(&ObjectReader::root(&rule), &RULE_VARIANTS, "rule").unwrap();
    assert_eq!(selected.name, "slowness");
    let err = selected.reader().required_string("metric_name").unwrap_err();
    assert_eq!(err.to_string(), "slowness.metric_name is required");
}

#[test]
fn slot_list_with_one_block_selects_that_block() {
    let block = StateValue::object().with("metric_name", "latency");
    let rule = StateValue::object().with("slowness", StateValue::List(vec![block.clone()]));
    let selected = select_variant(&ObjectReader::root(&rule), &RULE_VARIANTS, "rule").unwrap();
    assert_eq!(selected.value, block);
}

#[test]
fn slot_list_with_several_blocks_is_rejected_at_second_block() {
    let first = StateValue::object().with("metric_name", "latency");
    let second = StateValue::object().with("metric_name", "p99");
    let rule = StateValue::object().with("slowness", StateValue::List(vec![first, second]));
    let err = select_variant(&ObjectReader::root(&rule), &RULE_VARIANTS, "rule").unwrap_err();
    assert_eq!(err.path(), Some(&AttributePath::attribute("slowness").index(1)));
    assert_eq!(err.to_string(), "rule.slowness must hold a single block, got 2");
}

#[test]
fn variant_state_nulls_every_other_slot() {
    let block = StateValue::object().with("metric_name", "errors");
    let state = variant_state(&RULE_VARIANTS, "errors", block);
    let fields = state.as_fields().unwrap();
    assert_eq!(fields.len(), RULE_VARIANTS.len());
    let nulls = fields.values().filter(|value| value.is_null()).count();
    assert_eq!(nulls, RULE_VARIANTS.len() - 1);
}

// ============================================================================
// SECTION: Custom Payload
// ============================================================================

#[test]
fn static_custom_payload_round_trips_with_null_dynamic_value() {
    let entry = StateValue::object().with("key", "test1").with("value", "foo");
    let state =
        StateValue::object().with("custom_payload_field", StateValue::List(vec![entry]));
    let reader = ObjectReader::root(&state);
    let fields = custom_payload_from_state(&reader, "custom_payload_field").unwrap();
    assert_eq!(
        fields,
        vec![CustomPayloadField::StaticString {
            key: "test1".to_string(),
            value: "foo".to_string(),
        }]
    );
    let back = custom_payload_to_state(&fields);
    let expected = StateValue::object()
        .with("key", "test1")
        .with("value", "foo")
        .with("dynamic_value", StateValue::Null);
    assert_eq!(back, StateValue::List(vec![expected]));
}

#[test]
fn dynamic_custom_payload_without_tag_name_is_rejected() {
    let entry = StateValue::object()
        .with("key", "k")
        .with("dynamic_value", StateValue::object().with("key", "dk"));
    let state =
        StateValue::object().with("custom_payload_field", StateValue::List(vec![entry]));
    let reader = ObjectReader::root(&state);
    let err = custom_payload_from_state(&reader, "custom_payload_field").unwrap_err();
    let diagnostic = err.iter().next().unwrap();
    assert_eq!(diagnostic.summary, "Invalid configuration");
    assert_eq!(
        diagnostic.detail,
        "custom_payload_field.dynamic_value missing tagName at index 0"
    );
}

#[test]
fn custom_payload_entry_needs_exactly_one_value() {
    let empty = StateValue::object().with("key", "k");
    let state =
        StateValue::object().with("custom_payload_field", StateValue::List(vec![empty]));
    let reader = ObjectReader::root(&state);
    let err = custom_payload_from_state(&reader, "custom_payload_field").unwrap_err();
    assert_eq!(
        err.iter().next().unwrap().detail,
        "neither value nor dynamic_value present at index 0"
    );

    let both = StateValue::object()
        .with("key", "k")
        .with("value", "v")
        .with("dynamic_value", StateValue::object().with("tag_name", "t"));
    let state = StateValue::object().with("custom_payload_field", StateValue::List(vec![both]));
    let reader = ObjectReader::root(&state);
    assert!(custom_payload_from_state(&reader, "custom_payload_field").is_err());
}

#[test]
fn every_malformed_custom_payload_entry_is_reported() {
    let valid = StateValue::object().with("key", "ok").with("value", "v");
    let empty = StateValue::object().with("key", "k");
    let untagged = StateValue::object()
        .with("key", "k")
        .with("dynamic_value", StateValue::object().with("key", "dk"));
    let state = StateValue::object()
        .with("custom_payload_field", StateValue::List(vec![empty, valid, untagged]));
    let reader = ObjectReader::root(&state);
    let err = custom_payload_from_state(&reader, "custom_payload_field").unwrap_err();
    let paths: Vec<String> = err
        .iter()
        .filter_map(|diagnostic| diagnostic.path.as_ref().map(ToString::to_string))
        .collect();
    assert_eq!(paths, vec!["custom_payload_field[0]", "custom_payload_field[2].dynamic_value"]);
}

#[test]
fn empty_custom_payload_is_null_in_state() {
    assert!(custom_payload_to_state(&[]).is_null());
}

// ============================================================================
// SECTION: Alert Channels
// ============================================================================

#[test]
fn alert_channels_skip_empty_severities() {
    let state = StateValue::object().with(
        "alert_channels",
        StateValue::object()
            .with("warning", StateValue::string_set(["b", "a"]))
            .with("critical", StateValue::Set(Vec::new())),
    );
    let reader = ObjectReader::root(&state);
    let channels = alert_channels_from_state(&reader, "alert_channels").unwrap();
    assert_eq!(channels.len(), 1);
    assert_eq!(channels.get("WARNING").unwrap(), &vec!["a".to_string(), "b".to_string()]);

    let back = alert_channels_to_state(&channels);
    assert_eq!(back.get("critical"), &StateValue::Set(Vec::new()));
}

#[test]
fn alert_channels_without_ids_are_empty_sets() {
    let expected = StateValue::object()
        .with("warning", StateValue::Set(Vec::new()))
        .with("critical", StateValue::Set(Vec::new()));
    assert_eq!(alert_channels_to_state(&BTreeMap::new()), expected);

    let schema_default = alert_channels_attribute().default.unwrap();
    assert_eq!(schema_default, expected);
}

// ============================================================================
// SECTION: Time Thresholds
// ============================================================================

#[test]
fn violations_in_period_is_bounded() {
    let variants =
        [TimeThresholdVariant::ViolationsInSequence, TimeThresholdVariant::ViolationsInPeriod];
    let state = StateValue::object().with(
        "time_threshold",
        StateValue::object().with(
            "violations_in_period",
            StateValue::object().with("time_window", 600_000_i64).with("violations", 13_i64),
        ),
    );
    let reader = ObjectReader::root(&state);
    let err = time_threshold_from_state(&reader, "time_threshold", &variants).unwrap_err();
    assert!(err.to_string().contains("between 1 and 12"));
}

#[test]
fn time_threshold_round_trips_and_rejects_foreign_variants() {
    let variants =
        [TimeThresholdVariant::ViolationsInSequence, TimeThresholdVariant::RequestImpact];
    let threshold = TimeThreshold::RequestImpact {
        time_window: 60_000,
        requests: 5,
    };
    let block = time_threshold_to_state(&threshold, &variants).unwrap();
    assert!(block.get("violations_in_sequence").is_null());
    let state = StateValue::object().with("time_threshold", block);
    let reader = ObjectReader::root(&state);
    let back = time_threshold_from_state(&reader, "time_threshold", &variants).unwrap();
    assert_eq!(back, threshold);

    let foreign = TimeThreshold::ViolationsInPeriod {
        time_window: 1,
        violations: 1,
    };
    assert!(matches!(
        time_threshold_to_state(&foreign, &variants),
        Err(MappingError::UnsupportedEntityType { .. })
    ));
}

// ============================================================================
// SECTION: Tag Filters
// ============================================================================

#[test]
fn tag_filter_parses_and_normalizes() {
    let source = "host.fqdn@na STARTS_WITH 'fooBar'";
    let state = StateValue::object().with("tag_filter", source);
    let reader = ObjectReader::root(&state);
    let filter = tag_filter_from_state(&reader, "tag_filter").unwrap().unwrap();
    assert_eq!(
        filter,
        TagFilter::string(
            EntityOrigin::NotApplicable,
            "host.fqdn",
            Operator::StartsWith,
            "fooBar"
        )
    );
    let path = AttributePath::attribute("tag_filter");
    assert_eq!(tag_filter_to_state(Some(&filter), &path).unwrap(), StateValue::from(source));
    assert!(tag_filter_to_state(None, &path).unwrap().is_null());
}

#[test]
fn unparsable_tag_filter_is_a_parse_error() {
    let state = StateValue::object().with("tag_filter", "host.fqdn EQUALS");
    let err = tag_filter_from_state(&ObjectReader::root(&state), "tag_filter").unwrap_err();
    assert!(matches!(err, MappingError::Parse { .. }));
}
