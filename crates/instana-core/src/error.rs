// crates/instana-core/src/error.rs
// ============================================================================
// Module: Mapping Errors
// Description: Error taxonomy for state mapping and resource operations.
// Purpose: Classify mapping failures and keep transport errors separate.
// Dependencies: instana-restapi, instana-tagfilter, thiserror
// ============================================================================

//! ## Overview
//! [`MappingError`] is what mappers return; every variant converts into a
//! [`Diagnostic`] bound to the attribute path it concerns. [`ResourceError`]
//! is what resource operations return: diagnostics, or an [`ApiError`]
//! passed through verbatim.

use instana_restapi::ApiError;
use instana_tagfilter::TagFilterError;
use thiserror::Error;

use crate::diagnostics::Diagnostic;
use crate::diagnostics::Diagnostics;
use crate::path::AttributePath;

// ============================================================================
// SECTION: Mapping Errors
// ============================================================================

/// Failure while translating between state and payload.
///
/// # Invariants
/// - Mapping errors are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// Missing sub-structure, union arity violation, or invalid value.
    #[error("{message}")]
    InvalidConfig {
        /// Offending attribute.
        path: AttributePath,
        /// Operator-facing message.
        message: String,
    },
    /// Severity is neither `warning` nor `critical` (or 5 / 10 on the wire).
    #[error("unknown severity `{input}`")]
    UnknownSeverity {
        /// Rejected input.
        input: String,
    },
    /// Tag filter tree contains a node type that cannot be mapped.
    #[error("unsupported tag filter type `{kind}`")]
    UnsupportedFilterType {
        /// Rejected node type.
        kind: String,
    },
    /// Backend returned an entity or sub-type this provider does not model.
    #[error("unsupported entity type `{kind}`")]
    UnsupportedEntityType {
        /// Rejected type.
        kind: String,
    },
    /// Tag filter text does not parse.
    #[error("failed to parse tag filter: {message}")]
    Parse {
        /// Attribute holding the expression.
        path: AttributePath,
        /// Parser message including the byte position.
        message: String,
    },
}

impl MappingError {
    /// Builds an [`MappingError::InvalidConfig`].
    #[must_use]
    pub fn invalid(path: &AttributePath, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            path: path.clone(),
            message: message.into(),
        }
    }

    /// Converts a tag filter failure for the attribute at `path`.
    #[must_use]
    pub fn from_tag_filter(path: &AttributePath, err: TagFilterError) -> Self {
        match err {
            TagFilterError::UnsupportedFilterType {
                kind,
            } => Self::UnsupportedFilterType {
                kind,
            },
            other => Self::Parse {
                path: path.clone(),
                message: other.to_string(),
            },
        }
    }

    /// Returns the attribute the error concerns, if recorded.
    #[must_use]
    pub const fn path(&self) -> Option<&AttributePath> {
        match self {
            Self::InvalidConfig {
                path, ..
            }
            | Self::Parse {
                path, ..
            } => Some(path),
            Self::UnknownSeverity {
                ..
            }
            | Self::UnsupportedFilterType {
                ..
            }
            | Self::UnsupportedEntityType {
                ..
            } => None,
        }
    }

    /// Short summary used as the diagnostic headline.
    const fn summary(&self) -> &'static str {
        match self {
            Self::InvalidConfig {
                ..
            } => "Invalid configuration",
            Self::UnknownSeverity {
                ..
            } => "Unknown severity",
            Self::UnsupportedFilterType {
                ..
            } => "Unsupported tag filter",
            Self::UnsupportedEntityType {
                ..
            } => "Unsupported entity type",
            Self::Parse {
                ..
            } => "Invalid tag filter",
        }
    }
}

impl From<MappingError> for Diagnostic {
    fn from(err: MappingError) -> Self {
        let diagnostic = Self::error(err.summary(), err.to_string());
        match err.path() {
            Some(path) => diagnostic.at(path.clone()),
            None => diagnostic,
        }
    }
}

impl From<MappingError> for Diagnostics {
    fn from(err: MappingError) -> Self {
        Self::from(Diagnostic::from(err))
    }
}

// ============================================================================
// SECTION: Resource Errors
// ============================================================================

/// Failure of a resource operation.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// Validation or mapping failed; nothing was sent to the backend.
    #[error("{0}")]
    Diagnostics(Diagnostics),
    /// The backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ResourceError {
    /// Returns the diagnostics of a mapping failure.
    #[must_use]
    pub const fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Self::Diagnostics(diagnostics) => Some(diagnostics),
            Self::Api(_) => None,
        }
    }
}

impl From<Diagnostics> for ResourceError {
    fn from(diagnostics: Diagnostics) -> Self {
        Self::Diagnostics(diagnostics)
    }
}

impl From<Diagnostic> for ResourceError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self::Diagnostics(Diagnostics::from(diagnostic))
    }
}

impl From<MappingError> for ResourceError {
    fn from(err: MappingError) -> Self {
        Self::Diagnostics(Diagnostics::from(err))
    }
}
