//! Movie search core for the TMDB search endpoint.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The host executes the HTTP
//! round-trip and feeds the outcome back into a `SearchStore`, whose state
//! snapshots are projected into view models for rendering.
//!
//! # Design
//! - `SearchClient` is stateless; it holds only its `ClientConfig`.
//! - The API key is injected through `ClientConfig`, never compiled in.
//! - `SearchStore` applies discrete `Action`s through a pure reducer and
//!   drops responses to superseded requests by sequence number.
//! - `UreqTransport` is a blocking `Transport` for Rust callers; the mobile
//!   host brings its own network stack through the C ABI.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod store;
pub mod transport;
pub mod types;
pub mod view;

pub use client::SearchClient;
pub use config::{ClientConfig, ImageConfig};
pub use error::{ApiError, ConfigError, ErrorKind};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use store::{
    reduce, run_command, Action, Command, ErrorInfo, RequestId, SearchState, SearchStatus,
    SearchStore,
};
pub use transport::Transport;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use types::{ImageSize, ImageSource, MovieId, MovieRecord, SearchResults};
pub use view::{Banner, MovieDetail, MovieRow, SearchViewModel};
