// crates/instana-provider/tests/common/mod.rs
// ============================================================================
// Module: Provider Test Support
// Description: Local HTTP server for end-to-end provider tests.
// Purpose: Capture the requests a configured provider sends.
// Dependencies: tiny_http
// ============================================================================

#![allow(dead_code, reason = "Each test binary uses a subset of the helpers.")]

use std::io::Read;
use std::thread;

use tiny_http::Response;
use tiny_http::Server;

/// Request observed by the test server.
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
