// crates/instana-core/src/severity.rs
// ============================================================================
// Module: Severity Codec
// Description: Bijection between textual and numeric alert severities.
// Purpose: Share one severity mapping across every resource that stores one.
// Dependencies: crate::error
// ============================================================================

//! ## Overview
//! State stores `warning` / `critical`; the backend uses `5` / `10`.
//! Anything else is rejected with [`MappingError::UnknownSeverity`].

use std::fmt;

use crate::error::MappingError;

// ============================================================================
// SECTION: Severity
// ============================================================================

/// Alert severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Warning, code 5.
    Warning,
    /// Critical, code 10.
    Critical,
}

/// Textual severities accepted in state.
pub const SUPPORTED_SEVERITIES: [&str; 2] = ["warning", "critical"];

impl Severity {
    /// Every severity in ascending order.
    pub const ALL: [Self; 2] = [Self::Warning, Self::Critical];

    /// State representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }

    /// Wire code.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Warning => 5,
            Self::Critical => 10,
        }
    }

    /// Parses the state representation.
    ///
    /// # Errors
    /// Returns [`MappingError::UnknownSeverity`] for any other term.
    pub fn from_term(term: &str) -> Result<Self, MappingError> {
        match term {
            "warning" => Ok(Self::Warning),
            "critical" => Ok(Self::Critical),
            other => Err(MappingError::UnknownSeverity {
                input: other.to_string(),
            }),
        }
    }

    /// Parses a wire code.
    ///
    /// # Errors
    /// Returns [`MappingError::UnknownSeverity`] for any other code.
    pub fn from_code(code: i64) -> Result<Self, MappingError> {
        match code {
            5 => Ok(Self::Warning),
            10 => Ok(Self::Critical),
            other => Err(MappingError::UnknownSeverity {
                input: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Maps a state severity to its wire code.
///
/// # Errors
/// Returns [`MappingError::UnknownSeverity`] for unrecognized terms.
pub fn severity_to_code(term: &str) -> Result<i64, MappingError> {
    Severity::from_term(term).map(Severity::code)
}

/// Maps a wire code to its state severity.
///
/// # Errors
/// Returns [`MappingError::UnknownSeverity`] for unrecognized codes.
pub fn severity_from_code(code: i64) -> Result<&'static str, MappingError> {
    Severity::from_code(code).map(Severity::as_str)
}
