// crates/instana-core/src/mappers/threshold.rs
// ============================================================================
// Module: Threshold Mapper
// Description: Severity-keyed thresholds between state blocks and the wire map.
// Purpose: Share static and baseline threshold handling across alert configs.
// Dependencies: instana-restapi, crate::mappers::union
// ============================================================================

//! ## Overview
//! State shape:
//! `threshold { warning { static | adaptive_baseline | historic_baseline },
//! critical { ... } }`. Each severity block is a union; which slots exist is
//! chosen per resource through [`ThresholdVariant`] lists. The wire map is
//! keyed `WARNING` / `CRITICAL`.
//!
//! Absent severities are explicit nulls in state. At least one severity is
//! required when mapping to the wire.

use std::collections::BTreeMap;

use instana_restapi::models::threshold::SEVERITY_CRITICAL;
use instana_restapi::models::threshold::SEVERITY_WARNING;
use instana_restapi::models::threshold::THRESHOLD_TYPE_ADAPTIVE_BASELINE;
use instana_restapi::models::threshold::THRESHOLD_TYPE_HISTORIC_BASELINE;
use instana_restapi::models::threshold::THRESHOLD_TYPE_STATIC;
use instana_restapi::models::threshold::ThresholdRule;

use crate::error::MappingError;
use crate::mappers::union::select_variant;
use crate::mappers::union::variant_state;
use crate::reader::ObjectReader;
use crate::schema::Attribute;
use crate::schema::AttributeType;
use crate::schema::Validator;
use crate::value::StateValue;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// State name of the warning severity block.
pub const THRESHOLD_FIELD_WARNING: &str = "warning";
/// State name of the critical severity block.
pub const THRESHOLD_FIELD_CRITICAL: &str = "critical";
/// Seasonalities accepted by baseline thresholds.
pub const SEASONALITIES: [&str; 2] = ["DAILY", "WEEKLY"];

/// Severity blocks in state order with their wire keys.
const SEVERITIES: [(&str, &str); 2] = [
    (THRESHOLD_FIELD_WARNING, SEVERITY_WARNING),
    (THRESHOLD_FIELD_CRITICAL, SEVERITY_CRITICAL),
];

// ============================================================================
// SECTION: Variants
// ============================================================================

/// Threshold kind a resource accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdVariant {
    /// Fixed value.
    Static,
    /// Baseline learned continuously by the backend.
    AdaptiveBaseline,
    /// Baseline computed from historic samples.
    HistoricBaseline,
}

/// Only static thresholds.
pub const STATIC_ONLY: &[ThresholdVariant] = &[ThresholdVariant::Static];
/// Static and adaptive baseline thresholds.
pub const STATIC_AND_ADAPTIVE: &[ThresholdVariant] =
    &[ThresholdVariant::Static, ThresholdVariant::AdaptiveBaseline];
/// Every threshold kind.
pub const ALL_THRESHOLDS: &[ThresholdVariant] = &[
    ThresholdVariant::Static,
    ThresholdVariant::AdaptiveBaseline,
    ThresholdVariant::HistoricBaseline,
];

impl ThresholdVariant {
    /// State slot name.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::AdaptiveBaseline => "adaptive_baseline",
            Self::HistoricBaseline => "historic_baseline",
        }
    }

    /// Wire `type`.
    #[must_use]
    pub const fn wire_type(self) -> &'static str {
        match self {
            Self::Static => THRESHOLD_TYPE_STATIC,
            Self::AdaptiveBaseline => THRESHOLD_TYPE_ADAPTIVE_BASELINE,
            Self::HistoricBaseline => THRESHOLD_TYPE_HISTORIC_BASELINE,
        }
    }

    /// Resolves a wire `type`.
    #[must_use]
    pub fn from_wire(kind: &str) -> Option<Self> {
        match kind {
            THRESHOLD_TYPE_STATIC => Some(Self::Static),
            THRESHOLD_TYPE_ADAPTIVE_BASELINE => Some(Self::AdaptiveBaseline),
            THRESHOLD_TYPE_HISTORIC_BASELINE => Some(Self::HistoricBaseline),
            _ => None,
        }
    }

    /// Slot attributes.
    fn attributes(self) -> Vec<Attribute> {
        match self {
            Self::Static => vec![Attribute::float("value").describe("The value of the threshold")],
            Self::AdaptiveBaseline => vec![
                Attribute::float("deviation_factor"),
                Attribute::float("adaptability"),
                Attribute::string("seasonality").validate(Validator::OneOf(&SEASONALITIES)),
            ],
            Self::HistoricBaseline => vec![
                Attribute::new(
                    "baseline",
                    AttributeType::List(Box::new(AttributeType::List(Box::new(
                        AttributeType::Float,
                    )))),
                )
                .computed()
                .describe("Historic baseline as list of [timestamp, mean, sd] entries"),
                Attribute::float("deviation_factor").computed(),
                Attribute::string("seasonality")
                    .computed()
                    .validate(Validator::OneOf(&SEASONALITIES)),
            ],
        }
    }
}

/// Slot names of the given variants.
fn slot_names(variants: &[ThresholdVariant]) -> Vec<&'static str> {
    variants.iter().map(|variant| variant.field()).collect()
}

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Threshold block attribute named `name`.
#[must_use]
pub fn threshold_attribute(name: &'static str, variants: &[ThresholdVariant]) -> Attribute {
    let severity_block = || -> Vec<Attribute> {
        variants
            .iter()
            .map(|variant| Attribute::block(variant.field(), variant.attributes()))
            .collect()
    };
    Attribute::block(
        name,
        vec![
            Attribute::block(THRESHOLD_FIELD_WARNING, severity_block()),
            Attribute::block(THRESHOLD_FIELD_CRITICAL, severity_block()),
        ],
    )
    .describe("Threshold per severity")
}

// ============================================================================
// SECTION: State To Payload
// ============================================================================

/// Reads the threshold block `name` into the wire map.
///
/// # Errors
/// Returns [`MappingError::InvalidConfig`] when the block is missing, defines
/// no severity, or a severity does not select exactly one kind.
pub fn thresholds_from_state(
    parent: &ObjectReader<'_>,
    name: &str,
    variants: &[ThresholdVariant],
) -> Result<BTreeMap<String, ThresholdRule>, MappingError> {
    let block = parent.required_object(name)?;
    let path = parent.field_path(name);
    let reader = ObjectReader::new(&block, &path);
    let slots = slot_names(variants);
    let mut thresholds = BTreeMap::new();
    for (field, wire_key) in SEVERITIES {
        let Some(severity) = reader.object(field)? else {
            continue;
        };
        let severity_path = reader.field_path(field);
        let severity_reader = ObjectReader::new(&severity, &severity_path);
        let selected = select_variant(&severity_reader, &slots, &severity_path.to_string())?;
        let variant = variants
            .iter()
            .copied()
            .find(|variant| variant.field() == selected.name)
            .ok_or_else(|| {
                let message = format!("unsupported threshold {}", selected.name);
                MappingError::invalid(&selected.path, message)
            })?;
        let rule = threshold_rule_from_state(variant, &selected.reader())?;
        thresholds.insert(wire_key.to_string(), rule);
    }
    if thresholds.is_empty() {
        return Err(MappingError::invalid(
            &path,
            format!("{path} must define at least one of warning or critical"),
        ));
    }
    Ok(thresholds)
}

/// Maps one selected threshold slot.
fn threshold_rule_from_state(
    variant: ThresholdVariant,
    reader: &ObjectReader<'_>,
) -> Result<ThresholdRule, MappingError> {
    let mut rule = ThresholdRule {
        kind: variant.wire_type().to_string(),
        ..ThresholdRule::default()
    };
    match variant {
        ThresholdVariant::Static => {
            rule.value = Some(reader.required_f64("value")?);
        }
        ThresholdVariant::AdaptiveBaseline => {
            rule.deviation_factor = reader.optional_f64("deviation_factor")?;
            rule.adaptability = reader.optional_f64("adaptability")?;
            rule.seasonality = reader.optional_string("seasonality")?;
        }
        ThresholdVariant::HistoricBaseline => {
            rule.baseline = baseline_from_state(reader)?;
            rule.deviation_factor = reader.optional_f64("deviation_factor")?;
            rule.seasonality = reader.optional_string("seasonality")?;
        }
    }
    Ok(rule)
}

/// Reads baseline samples exactly as stored.
fn baseline_from_state(reader: &ObjectReader<'_>) -> Result<Option<Vec<Vec<f64>>>, MappingError> {
    let value = reader.get("baseline");
    let Some(rows) = value.as_items() else {
        return Ok(None);
    };
    let path = reader.field_path("baseline");
    rows.iter()
        .enumerate()
        .map(|(row_index, row)| {
            row.as_items()
                .unwrap_or_default()
                .iter()
                .enumerate()
                .map(|(column, sample)| {
                    sample.as_f64().ok_or_else(|| {
                        let at = path.index(row_index).index(column);
                        MappingError::invalid(&at, format!("{at} must be a number"))
                    })
                })
                .collect()
        })
        .collect::<Result<Vec<Vec<f64>>, MappingError>>()
        .map(Some)
}

// ============================================================================
// SECTION: Payload To State
// ============================================================================

/// Builds the threshold block from the wire map.
///
/// Severities missing from the map become explicit nulls.
///
/// # Errors
/// Returns [`MappingError::UnsupportedEntityType`] when the backend returns
/// an unknown threshold kind or one the resource does not declare.
pub fn thresholds_to_state(
    thresholds: &BTreeMap<String, ThresholdRule>,
    variants: &[ThresholdVariant],
) -> Result<StateValue, MappingError> {
    let slots = slot_names(variants);
    let mut state = StateValue::object();
    for (field, wire_key) in SEVERITIES {
        let severity = match thresholds.get(wire_key) {
            Some(rule) => {
                let variant = ThresholdVariant::from_wire(&rule.kind)
                    .filter(|variant| variants.contains(variant))
                    .ok_or_else(|| MappingError::UnsupportedEntityType {
                        kind: rule.kind.clone(),
                    })?;
                variant_state(&slots, variant.field(), threshold_rule_to_state(variant, rule))
            }
            None => StateValue::Null,
        };
        state.insert(field, severity);
    }
    Ok(state)
}

/// Maps one wire threshold to its slot content.
fn threshold_rule_to_state(variant: ThresholdVariant, rule: &ThresholdRule) -> StateValue {
    match variant {
        ThresholdVariant::Static => StateValue::object().with("value", rule.value),
        ThresholdVariant::AdaptiveBaseline => StateValue::object()
            .with("deviation_factor", rule.deviation_factor)
            .with("adaptability", rule.adaptability)
            .with("seasonality", rule.seasonality.clone()),
        ThresholdVariant::HistoricBaseline => StateValue::object()
            .with("baseline", baseline_to_state(rule.baseline.as_deref()))
            .with("deviation_factor", rule.deviation_factor)
            .with("seasonality", rule.seasonality.clone()),
    }
}

/// Renders baseline samples at full precision.
fn baseline_to_state(baseline: Option<&[Vec<f64>]>) -> StateValue {
    baseline.map_or(StateValue::Null, |rows| {
        StateValue::List(
            rows.iter()
                .map(|row| StateValue::List(row.iter().copied().map(StateValue::Float).collect()))
                .collect(),
        )
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
