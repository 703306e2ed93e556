// crates/instana-core/src/lib.rs
// ============================================================================
// Module: Instana Core
// Description: State model, mapping framework, and resource lifecycle driver.
// Purpose: Give every resource handle the same state representation, error
//          taxonomy, shared sub-mappers, and CRUD sequencing.
// Dependencies: instana-restapi, instana-tagfilter, rand, serde_json, thiserror,
//               tracing
// ============================================================================

//! ## Overview
//! Resource handles translate between two worlds:
//! - host state: a weakly typed tree of [`StateValue`]s shaped by a [`Schema`],
//!   where every attribute is known, unknown (not yet computed), or null;
//! - backend payloads: strongly typed serde models from `instana-restapi`.
//!
//! This crate provides the pieces every handle shares:
//! - [`ObjectReader`] for path-aware reads of state objects;
//! - [`mappers`] for discriminated unions, thresholds, custom payload fields,
//!   alert channels, time thresholds, and tag filters;
//! - [`severity`] for the warning/critical codec;
//! - [`ResourceHandle`] and [`ManagedResource`] for the create/read/update/
//!   delete sequence, random ids, and state upgrades.
//!
//! Mapping failures are reported as [`Diagnostics`] bound to attribute paths;
//! transport failures pass through unchanged as [`ResourceError::Api`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod diagnostics;
pub mod error;
/// Uniform contract implemented by every managed resource kind.
pub mod handle;
/// Locally generated record identifiers.
pub mod id;
/// Create/read/update/delete sequencing over a resource handle.
pub mod managed;
pub mod mappers;
/// Locations of values inside a state tree.
pub mod path;
pub mod reader;
pub mod schema;
pub mod severity;
pub mod upgrade;
pub mod value;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use diagnostics::Diagnostic;
pub use diagnostics::DiagnosticSeverity;
pub use diagnostics::Diagnostics;
pub use error::MappingError;
pub use error::ResourceError;
pub use handle::RawState;
pub use handle::ResourceHandle;
pub use handle::ResourceMetadata;
pub use handle::StateUpgrader;
pub use managed::ManagedResource;
pub use managed::ResourceOperations;
pub use path::AttributePath;
pub use path::PathStep;
pub use reader::ObjectReader;
pub use schema::Attribute;
pub use schema::AttributeType;
pub use schema::Schema;
pub use schema::Validator;
pub use severity::Severity;
pub use value::StateValue;
