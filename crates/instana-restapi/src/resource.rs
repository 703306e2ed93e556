// crates/instana-restapi/src/resource.rs
// ============================================================================
// Module: Typed REST Resources
// Description: Typed CRUD views over a single backend resource path.
// Purpose: Encode the verb combination each endpoint uses for create and
//          update, and decode payloads with serde.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A [`RestResource`] pairs a resource path with a [`RestMode`] and a payload
//! type implementing [`InstanaDataObject`]. Endpoints differ in whether they
//! create with `PUT` or `POST` and whether they update at all; the mode table
//! keeps those differences out of the resource handles.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::client::RestClient;
use crate::error::ApiError;

// ============================================================================
// SECTION: Data Objects
// ============================================================================

/// Payload type managed through a [`RestResource`].
pub trait InstanaDataObject:
    Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static
{
    /// Returns the backend-assigned identifier.
    fn id(&self) -> &str;

    /// Returns the identifier used in resource URLs.
    ///
    /// Most payloads route by [`InstanaDataObject::id`]; API tokens route by
    /// their internal id.
    fn id_for_resource_path(&self) -> &str {
        self.id()
    }
}

// ============================================================================
// SECTION: Modes
// ============================================================================

/// Verb combination used by an endpoint for create and update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestMode {
    /// Create and update with `PUT {path}/{id}`.
    CreatePutUpdatePut,
    /// Create with `POST {path}`, update with `PUT {path}/{id}`.
    CreatePostUpdatePut,
    /// Create with `POST {path}`, update with `POST {path}/{id}`.
    CreatePostUpdatePost,
    /// Create with `POST {path}`; updates are rejected.
    CreatePostUpdateNotSupported,
}

impl RestMode {
    /// Returns true when the endpoint accepts updates.
    #[must_use]
    pub const fn supports_update(self) -> bool {
        !matches!(self, Self::CreatePostUpdateNotSupported)
    }
}

// ============================================================================
// SECTION: Resource
// ============================================================================

/// Typed CRUD view over one resource path.
///
/// # Invariants
/// - `path` is absolute and has no trailing slash.
pub struct RestResource<T> {
    /// Shared transport.
    client: Arc<dyn RestClient>,
    /// Absolute resource path.
    path: &'static str,
    /// Create/update verb combination.
    mode: RestMode,
    /// Payload type marker.
    marker: PhantomData<fn() -> T>,
}

impl<T> Clone for RestResource<T> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            path: self.path,
            mode: self.mode,
            marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for RestResource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestResource")
            .field("path", &self.path)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl<T: InstanaDataObject> RestResource<T> {
    /// Creates a resource view.
    #[must_use]
    pub fn new(client: Arc<dyn RestClient>, path: &'static str, mode: RestMode) -> Self {
        Self {
            client,
            path,
            mode,
            marker: PhantomData,
        }
    }

    /// Returns the resource path.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Returns the create/update verb combination.
    #[must_use]
    pub const fn mode(&self) -> RestMode {
        self.mode
    }

    /// Fetches every record under the path.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport or decode failures.
    pub fn get_all(&self) -> Result<Vec<T>, ApiError> {
        let body = self.client.get(self.path)?;
        decode(&body)
    }

    /// Fetches one record by routing id.
    ///
    /// # Errors
    /// Returns [`ApiError::NotFound`] when the record does not exist.
    pub fn get_one(&self, id: &str) -> Result<T, ApiError> {
        let body = self.client.get_one(self.path, id)?;
        decode(&body)
    }

    /// Creates a record and returns the stored version.
    ///
    /// # Errors
    /// Returns [`ApiError`] on encode, transport, or decode failures.
    pub fn create(&self, data: &T) -> Result<T, ApiError> {
        let body = encode(data)?;
        let response = match self.mode {
            RestMode::CreatePutUpdatePut => {
                self.client.put(self.path, data.id_for_resource_path(), &body)?
            }
            RestMode::CreatePostUpdatePut
            | RestMode::CreatePostUpdatePost
            | RestMode::CreatePostUpdateNotSupported => self.client.post(self.path, &body)?,
        };
        decode_or_echo(&response, data)
    }

    /// Updates a record and returns the stored version.
    ///
    /// # Errors
    /// Returns [`ApiError::UpdateNotSupported`] for create-only endpoints and
    /// [`ApiError`] on encode, transport, or decode failures.
    pub fn update(&self, data: &T) -> Result<T, ApiError> {
        let id = data.id_for_resource_path();
        let response = match self.mode {
            RestMode::CreatePutUpdatePut | RestMode::CreatePostUpdatePut => {
                self.client.put(self.path, id, &encode(data)?)?
            }
            RestMode::CreatePostUpdatePost => {
                self.client.post_with_id(self.path, id, &encode(data)?)?
            }
            RestMode::CreatePostUpdateNotSupported => {
                return Err(ApiError::UpdateNotSupported {
                    path: self.path.to_string(),
                });
            }
        };
        decode_or_echo(&response, data)
    }

    /// Deletes the given record.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport failures.
    pub fn delete(&self, data: &T) -> Result<(), ApiError> {
        self.delete_by_id(data.id_for_resource_path())
    }

    /// Deletes a record by routing id.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport failures.
    pub fn delete_by_id(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(self.path, id)
    }
}

// ============================================================================
// SECTION: Codec
// ============================================================================

/// Serializes a payload to JSON bytes.
fn encode<T: Serialize>(data: &T) -> Result<Vec<u8>, ApiError> {
    serde_json::to_vec(data).map_err(|err| ApiError::Encode(err.to_string()))
}

/// Deserializes a JSON response body.
fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|err| ApiError::Decode(err.to_string()))
}

/// Decodes a write response, echoing the request payload when the body is empty.
fn decode_or_echo<T: InstanaDataObject>(body: &[u8], sent: &T) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(sent.clone());
    }
    decode(body)
}
