//! Request builder and response parser for the movie search endpoint.
//!
//! # Design
//! `SearchClient` holds only its `ClientConfig` and carries no mutable state
//! between calls. A search is split into `build_search`, which produces an
//! `HttpRequest`, and `parse_search`, which consumes an `HttpResponse`.
//! `search` glues the two around a `Transport` for callers that want the
//! round-trip done for them.

use serde::Deserialize;
use url::Url;

use crate::config::{ClientConfig, ImageConfig};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{MovieRecord, SearchResults};

const SEARCH_PATH: &str = "/3/search/movie";

/// Stateless client for `GET /3/search/movie`.
#[derive(Debug, Clone)]
pub struct SearchClient {
    config: ClientConfig,
}

impl SearchClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn images(&self) -> &ImageConfig {
        &self.config.images
    }

    /// Build the search request for `query`.
    ///
    /// The query is sent as-is, including when it is empty.
    pub fn build_search(&self, query: &str) -> Result<HttpRequest, ApiError> {
        let endpoint = format!("{}{SEARCH_PATH}", self.config.base_url.trim_end_matches('/'));
        let mut url = Url::parse(&endpoint)
            .map_err(|e| ApiError::InvalidRequest(format!("{endpoint}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidRequest(format!(
                "unsupported scheme: {}",
                url.scheme()
            )));
        }

        url.query_pairs_mut()
            .append_pair("api_key", &self.config.api_key)
            .append_pair("adult", "false")
            .append_pair("language", &self.config.language)
            .append_pair("query", query);

        tracing::debug!(query, host = url.host_str().unwrap_or(""), "built search request");

        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: url.into(),
            headers: vec![("accept".to_string(), "application/json".to_string())],
        })
    }

    /// Decode a search response into records, in upstream order.
    pub fn parse_search(&self, response: HttpResponse) -> Result<Vec<MovieRecord>, ApiError> {
        check_status(&response)?;
        let parsed: SearchResults = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DecodeError(e.to_string()))?;
        tracing::debug!(count = parsed.results.len(), "decoded search results");
        Ok(parsed.results)
    }

    /// Build, execute and parse a search in one call.
    pub fn search<T: Transport + ?Sized>(
        &self,
        transport: &T,
        query: &str,
    ) -> Result<Vec<MovieRecord>, ApiError> {
        let request = self.build_search(query)?;
        let response = transport.execute(request)?;
        self.parse_search(response)
    }
}

/// Body TMDB sends alongside error statuses.
#[derive(Deserialize)]
struct UpstreamError {
    status_message: String,
}

/// Map non-2xx status codes to `ApiError::HttpError`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let message = serde_json::from_str::<UpstreamError>(&response.body)
        .map(|e| e.status_message)
        .unwrap_or_else(|_| response.body.clone());
    Err(ApiError::HttpError {
        status: response.status,
        message,
    })
}
