// crates/instana-restapi/src/client.rs
// ============================================================================
// Module: REST Client
// Description: Byte-level HTTP verbs against the Instana backend.
// Purpose: Inject authentication, enforce timeouts and response limits, and
//          map HTTP outcomes into `ApiError`.
// Dependencies: reqwest, tracing, url
// ============================================================================

//! ## Overview
//! [`RestClient`] is the seam between typed resources and the network. The
//! production implementation, [`HttpRestClient`], wraps a blocking reqwest
//! client that is built once and never mutated afterwards, so a single
//! instance can be shared across concurrent resource operations.
//!
//! Every request carries `Authorization: apiToken <token>`. Redirects are not
//! followed. Request cancellation is bounded by the configured timeout.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::io::Read;
use std::time::Duration;

use reqwest::Method;
use reqwest::blocking::Client;
use reqwest::blocking::RequestBuilder;
use reqwest::header::ACCEPT;
use reqwest::header::AUTHORIZATION;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use tracing::debug;
use url::Url;

use crate::error::ApiError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// Default maximum response size in bytes.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 16 * 1024 * 1024;
/// Default user agent for outbound requests.
pub const DEFAULT_USER_AGENT: &str = concat!("instana-provider/", env!("CARGO_PKG_VERSION"));
/// Content type used for JSON request bodies.
const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
/// Maximum number of body bytes echoed into status errors.
const MAX_ERROR_BODY_CHARS: usize = 2048;

// ============================================================================
// SECTION: Client Trait
// ============================================================================

/// HTTP verbs used by typed REST resources.
///
/// Paths are absolute resource paths such as `/api/settings/slo`; ids are
/// appended as a single percent-encoded path segment.
pub trait RestClient: Send + Sync {
    /// Issues `GET {path}`.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport failures or non-success statuses.
    fn get(&self, path: &str) -> Result<Vec<u8>, ApiError>;

    /// Issues `GET {path}/{id}`.
    ///
    /// # Errors
    /// Returns [`ApiError::NotFound`] on 404 and [`ApiError`] otherwise.
    fn get_one(&self, path: &str, id: &str) -> Result<Vec<u8>, ApiError>;

    /// Issues `POST {path}` with a JSON body.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport failures or non-success statuses.
    fn post(&self, path: &str, body: &[u8]) -> Result<Vec<u8>, ApiError>;

    /// Issues `POST {path}/{id}` with a JSON body.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport failures or non-success statuses.
    fn post_with_id(&self, path: &str, id: &str, body: &[u8]) -> Result<Vec<u8>, ApiError>;

    /// Issues `PUT {path}/{id}` with a JSON body.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport failures or non-success statuses.
    fn put(&self, path: &str, id: &str, body: &[u8]) -> Result<Vec<u8>, ApiError>;

    /// Issues `DELETE {path}/{id}`.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport failures or non-success statuses.
    fn delete(&self, path: &str, id: &str) -> Result<(), ApiError>;
}

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for [`HttpRestClient`].
///
/// # Invariants
/// - `base_url` has no trailing path; resource paths are absolute.
/// - `api_token` is never logged.
#[derive(Clone)]
pub struct RestClientConfig {
    /// Scheme and host of the backend.
    pub base_url: Url,
    /// API token sent in the `Authorization` header.
    pub api_token: String,
    /// Disables TLS certificate validation.
    pub tls_skip_verify: bool,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum response size in bytes.
    pub max_response_bytes: usize,
    /// User agent for outbound requests.
    pub user_agent: String,
}

impl RestClientConfig {
    /// Builds a configuration for `https://{endpoint}`.
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidUrl`] when the endpoint is not a valid host.
    pub fn for_endpoint(endpoint: &str, api_token: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(&format!("https://{endpoint}"))
            .map_err(|err| ApiError::InvalidUrl(format!("{endpoint}: {err}")))?;
        Ok(Self::with_base_url(base_url, api_token))
    }

    /// Builds a configuration for an explicit base URL (used for local testing).
    #[must_use]
    pub fn with_base_url(base_url: Url, api_token: &str) -> Self {
        Self {
            base_url,
            api_token: api_token.to_string(),
            tls_skip_verify: false,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl fmt::Debug for RestClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_token", &"<redacted>")
            .field("tls_skip_verify", &self.tls_skip_verify)
            .field("timeout_ms", &self.timeout_ms)
            .field("max_response_bytes", &self.max_response_bytes)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

// ============================================================================
// SECTION: HTTP Client
// ============================================================================

/// Blocking reqwest implementation of [`RestClient`].
///
/// # Invariants
/// - The inner client and configuration are immutable after construction.
pub struct HttpRestClient {
    /// Client configuration.
    config: RestClientConfig,
    /// Underlying HTTP client.
    client: Client,
}

impl HttpRestClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    /// Returns [`ApiError::Client`] when the HTTP client cannot be built.
    pub fn new(config: RestClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .danger_accept_invalid_certs(config.tls_skip_verify)
            .build()
            .map_err(|err| ApiError::Client(err.to_string()))?;
        Ok(Self {
            config,
            client,
        })
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &RestClientConfig {
        &self.config
    }

    /// Builds the absolute URL for a path and optional id segment.
    fn url(&self, path: &str, id: Option<&str>) -> Result<Url, ApiError> {
        let mut url = self
            .config
            .base_url
            .join(path)
            .map_err(|err| ApiError::InvalidUrl(format!("{path}: {err}")))?;
        if let Some(id) = id {
            url.path_segments_mut()
                .map_err(|()| ApiError::InvalidUrl(format!("{path}: cannot append id")))?
                .pop_if_empty()
                .push(id);
        }
        Ok(url)
    }

    /// Prepares a request with authentication and content negotiation headers.
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(AUTHORIZATION, format!("apiToken {}", self.config.api_token))
            .header(ACCEPT, "application/json")
    }

    /// Sends a request and returns the response body.
    fn execute(
        &self,
        method: Method,
        path: &str,
        id: Option<&str>,
        body: Option<&[u8]>,
    ) -> Result<Vec<u8>, ApiError> {
        let url = self.url(path, id)?;
        let mut request = self.request(method.clone(), url);
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, JSON_CONTENT_TYPE).body(body.to_vec());
        }
        let mut response = request.send().map_err(|err| ApiError::Transport(err.to_string()))?;
        let status = response.status();
        debug!(method = %method, path, id, status = status.as_u16(), "instana api request");
        let bytes = read_response_limited(&mut response, self.config.max_response_bytes)?;
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }
        if !status.is_success() {
            let text = String::from_utf8_lossy(&bytes);
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }
        Ok(bytes)
    }
}

impl RestClient for HttpRestClient {
    fn get(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        self.execute(Method::GET, path, None, None)
    }

    fn get_one(&self, path: &str, id: &str) -> Result<Vec<u8>, ApiError> {
        self.execute(Method::GET, path, Some(id), None)
    }

    fn post(&self, path: &str, body: &[u8]) -> Result<Vec<u8>, ApiError> {
        self.execute(Method::POST, path, None, Some(body))
    }

    fn post_with_id(&self, path: &str, id: &str, body: &[u8]) -> Result<Vec<u8>, ApiError> {
        self.execute(Method::POST, path, Some(id), Some(body))
    }

    fn put(&self, path: &str, id: &str, body: &[u8]) -> Result<Vec<u8>, ApiError> {
        self.execute(Method::PUT, path, Some(id), Some(body))
    }

    fn delete(&self, path: &str, id: &str) -> Result<(), ApiError> {
        self.execute(Method::DELETE, path, Some(id), None).map(|_| ())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads a response body while enforcing a hard size limit.
fn read_response_limited(
    response: &mut reqwest::blocking::Response,
    max_bytes: usize,
) -> Result<Vec<u8>, ApiError> {
    let max_bytes_u64 = u64::try_from(max_bytes)
        .map_err(|_| ApiError::Transport("response size limit exceeds u64".to_string()))?;
    if let Some(expected) = response.content_length()
        && expected > max_bytes_u64
    {
        return Err(ApiError::Transport("response exceeds size limit".to_string()));
    }
    let mut buf = Vec::new();
    let mut handle = response.take(max_bytes_u64.saturating_add(1));
    handle.read_to_end(&mut buf).map_err(|err| ApiError::Transport(err.to_string()))?;
    if buf.len() > max_bytes {
        return Err(ApiError::Transport("response exceeds size limit".to_string()));
    }
    Ok(buf)
}
