// crates/instana-restapi/src/error.rs
// ============================================================================
// Module: REST API Errors
// Description: Error taxonomy for backend calls.
// Purpose: Distinguish missing records from transport and protocol failures.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! [`ApiError::NotFound`] is the only variant callers branch on: a read that
//! returns it removes the record from state. Everything else is surfaced to
//! the operator unchanged.

use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors returned by REST calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered 404.
    #[error("failed to get resource from Instana API: 404 - resource not found")]
    NotFound,
    /// The backend answered with another non-success status.
    #[error("Instana API request failed with status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },
    /// Network, TLS, or timeout failure.
    #[error("Instana API transport error: {0}")]
    Transport(String),
    /// Response body could not be decoded into the expected payload.
    #[error("failed to decode Instana API response: {0}")]
    Decode(String),
    /// Request payload could not be serialized.
    #[error("failed to encode Instana API request: {0}")]
    Encode(String),
    /// The resource path does not support updates.
    #[error("update is not supported for resource path {path}")]
    UpdateNotSupported {
        /// Resource path that rejected the update.
        path: String,
    },
    /// Endpoint or resource path could not form a valid URL.
    #[error("invalid Instana API url: {0}")]
    InvalidUrl(String),
    /// HTTP client construction failed.
    #[error("failed to build Instana API client: {0}")]
    Client(String),
}

impl ApiError {
    /// Returns true when the error means the record does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}
