//! Error types for the movie search client.
//!
//! # Design
//! Every failure a search can produce lands in one `ApiError` variant, so a
//! search always resolves to either a record list or a classified error.
//! `HttpError` keeps the upstream status and the TMDB `status_message` (or
//! the raw body when the body is not a TMDB error document).
//!
//! `ApiError` is `Clone` because failed searches are stored in state
//! snapshots for the presentation layer to render.

use thiserror::Error;

/// Errors returned by `SearchClient` and `Transport` implementations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request URL could not be constructed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The transport could not complete the round-trip.
    #[error("network error: {0}")]
    NetworkError(String),

    /// Upstream answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// The response body is not valid JSON or does not have the expected shape.
    #[error("decode error: {0}")]
    DecodeError(String),
}

/// Coarse classification of an `ApiError`, used by view models and the C ABI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidRequest,
    Network,
    Http,
    Decode,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::InvalidRequest(_) => ErrorKind::InvalidRequest,
            ApiError::NetworkError(_) => ErrorKind::Network,
            ApiError::HttpError { .. } => ErrorKind::Http,
            ApiError::DecodeError(_) => ErrorKind::Decode,
        }
    }
}

/// Errors raised while loading `ClientConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TMDB_API_KEY is not set")]
    MissingApiKey,

    #[error("{name} is set but empty")]
    Empty { name: &'static str },
}
