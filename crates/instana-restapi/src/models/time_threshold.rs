// crates/instana-restapi/src/models/time_threshold.rs
// ============================================================================
// Module: Time Threshold Payloads
// Description: How long or how often a condition must hold before alerting.
// Purpose: Model the `timeThreshold` union shared by smart alert configs.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The backend discriminates time thresholds by their `type` field. Each
//! alert config kind accepts a subset of the variants; the subset is enforced
//! by the resource mappers, not by this type.

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Time threshold union.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum TimeThreshold {
    /// Condition violated continuously for the window.
    ViolationsInSequence {
        /// Window length in milliseconds.
        #[serde(default)]
        time_window: i64,
    },
    /// Condition violated a number of times within the window.
    ViolationsInPeriod {
        /// Window length in milliseconds.
        #[serde(default)]
        time_window: i64,
        /// Required number of violations.
        #[serde(default)]
        violations: i64,
    },
    /// Condition affected a number of requests within the window.
    RequestImpact {
        /// Window length in milliseconds.
        #[serde(default)]
        time_window: i64,
        /// Required number of affected requests.
        #[serde(default)]
        requests: i64,
    },
    /// Continuous violation weighted by the number of affected users.
    UserImpactOfViolationsInSequence {
        /// Window length in milliseconds.
        #[serde(default)]
        time_window: i64,
        /// `AGGREGATED` or `PER_WINDOW`.
        impact_measurement_method: String,
        /// Share of affected users.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user_percentage: Option<f64>,
        /// Number of affected users.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        users: Option<i64>,
    },
}

impl TimeThreshold {
    /// Returns the wire discriminator.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ViolationsInSequence {
                ..
            } => "violationsInSequence",
            Self::ViolationsInPeriod {
                ..
            } => "violationsInPeriod",
            Self::RequestImpact {
                ..
            } => "requestImpact",
            Self::UserImpactOfViolationsInSequence {
                ..
            } => "userImpactOfViolationsInSequence",
        }
    }
}
