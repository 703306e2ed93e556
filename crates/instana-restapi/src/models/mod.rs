// crates/instana-restapi/src/models/mod.rs
// ============================================================================
// Module: Payload Models
// Description: serde payloads for every managed resource kind.
// Purpose: Mirror the backend JSON shapes with camelCase field names.
// Dependencies: instana-tagfilter, serde, serde_json
// ============================================================================

//! ## Overview
//! Payloads mirror the JSON the backend accepts and returns. Optional fields
//! are `Option` and omitted when unset unless the backend expects explicit
//! nulls. Shared building blocks (thresholds, time thresholds, custom payload
//! fields, access rules) live in their own modules.

/// Access rules shared by dashboards and application configs.
pub mod access_rule;
pub mod alerting_channel;
/// Classic alert configurations routing events to channels.
pub mod alerting_config;
pub mod api_token;
pub mod application_alert;
/// Application perspectives defined by a tag filter.
pub mod application_config;
pub mod automation;
/// Shared dashboards with free-form widget definitions.
pub mod custom_dashboard;
/// User-defined event specifications and their rules.
pub mod custom_event_spec;
/// Extra key/value entries attached to alert notifications.
pub mod custom_payload;
/// Groups with members and a scoped permission set.
pub mod group;
/// Smart alert configurations over infrastructure metrics.
pub mod infra_alert;
/// Smart alert configurations over log volume.
pub mod log_alert;
pub mod sli;
pub mod slo;
/// Smart alerts over service level objectives.
pub mod slo_alert;
/// Synthetic tests and synthetic smart alerts.
pub mod synthetic;
pub mod threshold;
pub mod time_threshold;
/// Smart alert configurations for end-user monitored websites.
pub mod website_alert;
