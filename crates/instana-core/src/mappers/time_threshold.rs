// crates/instana-core/src/mappers/time_threshold.rs
// ============================================================================
// Module: Time Threshold Mapper
// Description: How long or how often a condition must hold before alerting.
// Purpose: Map the time threshold union with per-resource variant subsets.
// Dependencies: instana-restapi, crate::mappers::union
// ============================================================================

//! ## Overview
//! The state block has one slot per variant the resource accepts:
//!
//! - `violations_in_sequence` (`violationsInSequence`): `time_window`
//! - `violations_in_period` (`violationsInPeriod`): `time_window`, `violations` (1..=12)
//! - `request_impact` (`requestImpact`): `time_window`, `requests`
//! - `user_impact_of_violations_in_sequence` (`userImpactOfViolationsInSequence`):
//!   `time_window`, `impact_measurement_method`, optional `user_percentage` and `users`

use instana_restapi::models::time_threshold::TimeThreshold;

use crate::error::MappingError;
use crate::mappers::union::select_variant;
use crate::mappers::union::variant_state;
use crate::reader::ObjectReader;
use crate::schema::Attribute;
use crate::schema::Validator;
use crate::value::StateValue;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default attribute name of time threshold blocks.
pub const TIME_THRESHOLD_FIELD: &str = "time_threshold";
/// Accepted impact measurement methods.
pub const IMPACT_MEASUREMENT_METHODS: [&str; 2] = ["AGGREGATED", "PER_WINDOW"];

// ============================================================================
// SECTION: Variants
// ============================================================================

/// Time threshold kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeThresholdVariant {
    /// Continuous violation for the window.
    ViolationsInSequence,
    /// Number of violations within the window.
    ViolationsInPeriod,
    /// Number of affected requests within the window.
    RequestImpact,
    /// Continuous violation weighted by affected users.
    UserImpactOfViolationsInSequence,
}

impl TimeThresholdVariant {
    /// State slot name.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::ViolationsInSequence => "violations_in_sequence",
            Self::ViolationsInPeriod => "violations_in_period",
            Self::RequestImpact => "request_impact",
            Self::UserImpactOfViolationsInSequence => "user_impact_of_violations_in_sequence",
        }
    }

    /// Variant of a wire payload.
    #[must_use]
    pub const fn of(threshold: &TimeThreshold) -> Self {
        match threshold {
            TimeThreshold::ViolationsInSequence {
                ..
            } => Self::ViolationsInSequence,
            TimeThreshold::ViolationsInPeriod {
                ..
            } => Self::ViolationsInPeriod,
            TimeThreshold::RequestImpact {
                ..
            } => Self::RequestImpact,
            TimeThreshold::UserImpactOfViolationsInSequence {
                ..
            } => Self::UserImpactOfViolationsInSequence,
        }
    }

    /// Slot attributes.
    fn attributes(self) -> Vec<Attribute> {
        let time_window =
            Attribute::int("time_window").required().describe("The time window in milliseconds");
        match self {
            Self::ViolationsInSequence => vec![time_window],
            Self::ViolationsInPeriod => vec![
                time_window,
                Attribute::int("violations").required().validate(Validator::IntBetween(1, 12)),
            ],
            Self::RequestImpact => vec![time_window, Attribute::int("requests").required()],
            Self::UserImpactOfViolationsInSequence => vec![
                time_window,
                Attribute::string("impact_measurement_method")
                    .required()
                    .validate(Validator::OneOf(&IMPACT_MEASUREMENT_METHODS)),
                Attribute::float("user_percentage")
                    .validate(Validator::FloatBetweenExclusive(0.0, 1.0)),
                Attribute::int("users").validate(Validator::IntBetween(1, i64::MAX)),
            ],
        }
    }
}

/// Slot names of the given variants.
fn slot_names(variants: &[TimeThresholdVariant]) -> Vec<&'static str> {
    variants.iter().map(|variant| variant.field()).collect()
}

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Time threshold block attribute accepting `variants`.
#[must_use]
pub fn time_threshold_attribute(variants: &[TimeThresholdVariant]) -> Attribute {
    Attribute::block(
        TIME_THRESHOLD_FIELD,
        variants
            .iter()
            .map(|variant| Attribute::block(variant.field(), variant.attributes()))
            .collect(),
    )
    .required()
    .describe("Indicates the type of violation of the defined threshold")
}

// ============================================================================
// SECTION: Mapping
// ============================================================================

/// Reads the time threshold block `name`.
///
/// # Errors
/// Returns [`MappingError::InvalidConfig`] when the block is missing, does
/// not select exactly one accepted variant, or carries invalid values.
pub fn time_threshold_from_state(
    parent: &ObjectReader<'_>,
    name: &str,
    variants: &[TimeThresholdVariant],
) -> Result<TimeThreshold, MappingError> {
    let block = parent.required_object(name)?;
    let path = parent.field_path(name);
    let union = ObjectReader::new(&block, &path);
    let selected = select_variant(&union, &slot_names(variants), name)?;
    let reader = selected.reader();
    let time_window = reader.required_i64("time_window")?;
    let variant = variants
        .iter()
        .copied()
        .find(|variant| variant.field() == selected.name)
        .unwrap_or(TimeThresholdVariant::ViolationsInSequence);
    match variant {
        TimeThresholdVariant::ViolationsInSequence => Ok(TimeThreshold::ViolationsInSequence {
            time_window,
        }),
        TimeThresholdVariant::ViolationsInPeriod => {
            let violations = reader.required_i64("violations")?;
            if !(1 ..= 12).contains(&violations) {
                return Err(MappingError::invalid(
                    &reader.field_path("violations"),
                    format!("violations must be between 1 and 12, got {violations}"),
                ));
            }
            Ok(TimeThreshold::ViolationsInPeriod {
                time_window,
                violations,
            })
        }
        TimeThresholdVariant::RequestImpact => Ok(TimeThreshold::RequestImpact {
            time_window,
            requests: reader.required_i64("requests")?,
        }),
        TimeThresholdVariant::UserImpactOfViolationsInSequence => {
            Ok(TimeThreshold::UserImpactOfViolationsInSequence {
                time_window,
                impact_measurement_method: reader.required_string("impact_measurement_method")?,
                user_percentage: reader.optional_f64("user_percentage")?,
                users: reader.optional_i64("users")?,
            })
        }
    }
}

/// Builds the time threshold block with every other accepted slot null.
///
/// # Errors
/// Returns [`MappingError::UnsupportedEntityType`] when the backend returns a
/// variant the resource does not accept.
pub fn time_threshold_to_state(
    threshold: &TimeThreshold,
    variants: &[TimeThresholdVariant],
) -> Result<StateValue, MappingError> {
    let variant = TimeThresholdVariant::of(threshold);
    if !variants.contains(&variant) {
        return Err(MappingError::UnsupportedEntityType {
            kind: threshold.kind().to_string(),
        });
    }
    let slot = match threshold {
        TimeThreshold::ViolationsInSequence {
            time_window,
        } => StateValue::object().with("time_window", *time_window),
        TimeThreshold::ViolationsInPeriod {
            time_window,
            violations,
        } => StateValue::object().with("time_window", *time_window).with("violations", *violations),
        TimeThreshold::RequestImpact {
            time_window,
            requests,
        } => StateValue::object().with("time_window", *time_window).with("requests", *requests),
        TimeThreshold::UserImpactOfViolationsInSequence {
            time_window,
            impact_measurement_method,
            user_percentage,
            users,
        } => StateValue::object()
            .with("time_window", *time_window)
            .with("impact_measurement_method", impact_measurement_method)
            .with("user_percentage", *user_percentage)
            .with("users", *users),
    };
    Ok(variant_state(&slot_names(variants), variant.field(), slot))
}
