// crates/instana-restapi/src/lib.rs
// ============================================================================
// Module: Instana REST API
// Description: Typed access to the Instana configuration REST endpoints.
// Purpose: Provide the transport, resource views, and JSON payload models
//          used by resource handles.
// Dependencies: reqwest, serde, serde_json, thiserror, tracing, url
// ============================================================================

//! ## Overview
//! The REST layer has three parts:
//! - [`RestClient`]: byte-level HTTP verbs against the backend, implemented by
//!   [`HttpRestClient`] over a blocking reqwest client.
//! - [`RestResource`]: a typed view over one resource path that encodes the
//!   create/update verb combination ([`RestMode`]) of that endpoint.
//! - [`models`]: serde payloads for every managed resource kind.
//!
//! [`InstanaApi`] ties them together and hands out one [`RestResource`] per
//! resource kind. The client is shared behind an `Arc` and is safe to call
//! from concurrent operations.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod api;
pub mod client;
pub mod error;
pub mod models;
pub mod resource;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use api::InstanaApi;
pub use client::HttpRestClient;
pub use client::RestClient;
pub use client::RestClientConfig;
pub use error::ApiError;
pub use resource::InstanaDataObject;
pub use resource::RestMode;
pub use resource::RestResource;
