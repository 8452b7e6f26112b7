//! Executors for `HttpRequest` values.
//!
//! The mobile host usually runs requests on its own network stack and feeds
//! the response back through the C ABI. `UreqTransport` covers Rust callers
//! (tests, tools) that want a blocking round-trip.

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
#[cfg(feature = "ureq")]
use crate::http::HttpMethod;

/// Runs one HTTP round-trip.
///
/// Implementations return non-2xx responses as data; only failures to
/// complete the exchange are errors, and those are `ApiError::NetworkError`.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking transport backed by a `ureq` agent.
///
/// Status-code-as-error is disabled so 4xx/5xx bodies reach the parser.
/// Timeouts are left at the agent defaults.
#[cfg(feature = "ureq")]
pub struct UreqTransport {
    agent: ureq::Agent,
}

#[cfg(feature = "ureq")]
impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

#[cfg(feature = "ureq")]
impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "ureq")]
impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.agent.get(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let mut response = builder.call().map_err(|e| {
            tracing::warn!(error = %e, method = request.method.as_str(), "transport failure");
            ApiError::NetworkError(e.to_string())
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::NetworkError(e.to_string()))?;

        tracing::debug!(status, bytes = body.len(), "received response");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
