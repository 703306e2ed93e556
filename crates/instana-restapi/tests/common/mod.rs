// crates/instana-restapi/tests/common/mod.rs
// ============================================================================
// Module: REST API Test Support
// Description: Local HTTP servers and a recording client for REST tests.
// Purpose: Capture outbound requests and serve canned responses.
// Dependencies: instana-restapi, tiny_http
// ============================================================================

#![allow(dead_code, reason = "Each test binary uses a subset of the helpers.")]

use std::io::Read;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;

use instana_restapi::ApiError;
use instana_restapi::RestClient;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Captured Requests
// ============================================================================

/// Request observed by a test server or the recording client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRequest {
    /// HTTP verb.
    pub method: String,
    /// Request URL path.
    pub url: String,
    /// `Authorization` header, if any.
    pub authorization: Option<String>,
    /// Request body as text.
    pub body: String,
}

// ============================================================================
// SECTION: HTTP Server
// ============================================================================

/// Serves `responses` in order, one per request, and returns what it saw.
pub fn serve(
    responses: Vec<(u16, &'static str)>,
) -> (String, thread::JoinHandle<Vec<CapturedRequest>>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let handle = thread::spawn(move || {
        let mut seen = Vec::new();
        for (status, body) in responses {
            let Ok(mut request) = server.recv() else {
                break;
            };
            let mut text = String::new();
            let _ = request.as_reader().read_to_string(&mut text);
            let authorization = request
                .headers()
                .iter()
                .find(|header| header.field.equiv("Authorization"))
                .map(|header| header.value.as_str().to_string());
            seen.push(CapturedRequest {
                method: request.method().as_str().to_string(),
                url: request.url().to_string(),
                authorization,
                body: text,
            });
            let _ = request.respond(Response::from_string(body).with_status_code(status));
        }
        seen
    });
    (format!("http://{addr}"), handle)
}

// ============================================================================
// SECTION: Recording Client
// ============================================================================

/// In-memory [`RestClient`] that records calls and replays one response.
#[derive(Default)]
pub struct RecordingClient {
    /// Calls as `(verb, path, id)`.
    pub calls: Mutex<Vec<(String, String, Option<String>)>>,
    /// Body returned for every call.
    pub response: Mutex<Vec<u8>>,
}

impl RecordingClient {
    /// Creates a client answering every call with `response`.
    pub fn answering(response: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            response: Mutex::new(response.as_bytes().to_vec()),
        })
    }

    /// Returns recorded calls.
    pub fn calls(&self) -> Vec<(String, String, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, verb: &str, path: &str, id: Option<&str>) -> Vec<u8> {
        self.calls.lock().unwrap().push((
            verb.to_string(),
            path.to_string(),
            id.map(str::to_string),
        ));
        self.response.lock().unwrap().clone()
    }
}

impl RestClient for RecordingClient {
    fn get(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        Ok(self.record("GET", path, None))
    }

    fn get_one(&self, path: &str, id: &str) -> Result<Vec<u8>, ApiError> {
        Ok(self.record("GET", path, Some(id)))
    }

    fn post(&self, path: &str, _body: &[u8]) -> Result<Vec<u8>, ApiError> {
        Ok(self.record("POST", path, None))
    }

    fn post_with_id(&self, path: &str, id: &str, _body: &[u8]) -> Result<Vec<u8>, ApiError> {
        Ok(self.record("POST", path, Some(id)))
    }

    fn put(&self, path: &str, id: &str, _body: &[u8]) -> Result<Vec<u8>, ApiError> {
        Ok(self.record("PUT", path, Some(id)))
    }

    fn delete(&self, path: &str, id: &str) -> Result<(), ApiError> {
        self.record("DELETE", path, Some(id));
        Ok(())
    }
}
