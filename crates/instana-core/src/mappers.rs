// crates/instana-core/src/mappers.rs
// ============================================================================
// Module: Shared Sub-Mappers
// Description: Mapping helpers reused by many resource handles.
// Purpose: Keep union selection and recurring sub-structures in one place.
// Dependencies: instana-restapi, instana-tagfilter
// ============================================================================

//! ## Overview
//! Every union in state is a block with one optional slot per variant.
//! [`union::select_variant`] enforces that exactly one slot is populated;
//! [`union::variant_state`] writes the selected slot and nulls the rest.
//! The remaining modules build on it for the structures most alert
//! configurations share.

/// Severity-keyed alert channel id sets.
pub mod alert_channels;
pub mod custom_payload;
/// Tag filter expression attributes to backend node trees.
pub mod tag_filter;
pub mod threshold;
pub mod time_threshold;
pub mod union;

pub use alert_channels::ALERT_CHANNELS_FIELD;
pub use alert_channels::alert_channels_attribute;
pub use alert_channels::alert_channels_from_state;
pub use alert_channels::alert_channels_to_state;
pub use custom_payload::CUSTOM_PAYLOAD_FIELD;
pub use custom_payload::custom_payload_attribute;
pub use custom_payload::custom_payload_from_state;
pub use custom_payload::custom_payload_to_state;
pub use tag_filter::TAG_FILTER_FIELD;
pub use tag_filter::tag_filter_from_state;
pub use tag_filter::tag_filter_to_state;
pub use threshold::ALL_THRESHOLDS;
pub use threshold::STATIC_AND_ADAPTIVE;
pub use threshold::STATIC_ONLY;
pub use threshold::ThresholdVariant;
pub use threshold::threshold_attribute;
pub use threshold::thresholds_from_state;
pub use threshold::thresholds_to_state;
pub use time_threshold::TIME_THRESHOLD_FIELD;
pub use time_threshold::TimeThresholdVariant;
pub use time_threshold::time_threshold_attribute;
pub use time_threshold::time_threshold_from_state;
pub use time_threshold::time_threshold_to_state;
pub use union::SelectedVariant;
pub use union::select_variant;
pub use union::variant_state;
