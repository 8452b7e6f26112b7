//! Search screen state container.
//!
//! # Design
//! `SearchState` is an immutable snapshot. Every change goes through
//! [`reduce`], a pure function from `(state, action)` to a new state plus an
//! optional [`Command`] the host must execute. [`SearchStore`] owns the
//! current snapshot and is what the UI thread talks to.
//!
//! Every `Submit` issues a new, strictly increasing [`RequestId`]. Searches
//! are never cancelled; instead a completion whose id is not the latest one
//! issued is dropped, so an older response can never overwrite a newer one.

use crate::client::SearchClient;
use crate::error::{ApiError, ErrorKind};
use crate::transport::Transport;
use crate::types::{MovieId, MovieRecord};

/// Sequence number of an issued search. Zero means "nothing issued yet".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestId(pub u64);

impl RequestId {
    fn next(self) -> Self {
        RequestId(self.0 + 1)
    }
}

/// Failure details kept in state for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub message: String,
    /// Upstream status code, set only for `ErrorKind::Http`.
    pub status: Option<u16>,
}

impl From<&ApiError> for ErrorInfo {
    fn from(err: &ApiError) -> Self {
        let status = match err {
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        };
        Self {
            kind: err.kind(),
            message: err.to_string(),
            status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(ErrorInfo),
}

/// Snapshot of everything the search screen shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<MovieRecord>,
    pub selected: Option<MovieId>,
    pub status: SearchStatus,
    pub latest_request: RequestId,
}

impl SearchState {
    pub fn selected_record(&self) -> Option<&MovieRecord> {
        let id = self.selected?;
        self.results.iter().find(|m| m.id() == id)
    }

    pub fn is_loading(&self) -> bool {
        self.status == SearchStatus::Loading
    }
}

/// Discrete inputs to the state container.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The search field text changed.
    QueryChanged(String),
    /// The clear button was tapped.
    ClearQuery,
    /// The user committed the search field.
    Submit,
    /// A search issued earlier finished.
    SearchCompleted {
        request_id: RequestId,
        outcome: Result<Vec<MovieRecord>, ApiError>,
    },
    /// A row was tapped.
    Select(MovieId),
    /// The detail view was closed.
    Dismiss,
}

/// Side effects the host must perform on behalf of the state container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search { request_id: RequestId, query: String },
}

/// Apply `action` to `state`, returning the next snapshot and any command.
pub fn reduce(state: &SearchState, action: Action) -> (SearchState, Option<Command>) {
    let mut next = state.clone();
    let command = match action {
        Action::QueryChanged(query) => {
            next.query = query;
            None
        }
        Action::ClearQuery => {
            next.query.clear();
            None
        }
        Action::Submit => {
            let request_id = state.latest_request.next();
            next.latest_request = request_id;
            next.status = SearchStatus::Loading;
            tracing::debug!(request_id = request_id.0, query = %next.query, "search submitted");
            Some(Command::Search {
                request_id,
                query: next.query.clone(),
            })
        }
        Action::SearchCompleted {
            request_id,
            outcome,
        } => {
            if request_id != state.latest_request {
                tracing::warn!(
                    request_id = request_id.0,
                    latest = state.latest_request.0,
                    "dropping stale search response"
                );
                return (next, None);
            }
            match outcome {
                Ok(results) => {
                    tracing::debug!(request_id = request_id.0, count = results.len(), "search applied");
                    if let Some(id) = next.selected {
                        if !results.iter().any(|m| m.id() == id) {
                            next.selected = None;
                        }
                    }
                    next.results = results;
                    next.status = SearchStatus::Loaded;
                }
                Err(err) => {
                    tracing::warn!(request_id = request_id.0, error = %err, "search failed");
                    next.status = SearchStatus::Failed(ErrorInfo::from(&err));
                }
            }
            None
        }
        Action::Select(id) => {
            if state.results.iter().any(|m| m.id() == id) {
                next.selected = Some(id);
            } else {
                tracing::debug!(id, "ignoring selection of unknown record");
            }
            None
        }
        Action::Dismiss => {
            next.selected = None;
            None
        }
    };
    (next, command)
}

/// Execute a command and produce the action that reports its outcome.
pub fn run_command<T: Transport + ?Sized>(
    client: &SearchClient,
    transport: &T,
    command: Command,
) -> Action {
    match command {
        Command::Search { request_id, query } => Action::SearchCompleted {
            request_id,
            outcome: client.search(transport, &query),
        },
    }
}

/// Owner of the current `SearchState` snapshot.
#[derive(Debug, Default)]
pub struct SearchStore {
    state: SearchState,
}

impl SearchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> Option<Command> {
        let (next, command) = reduce(&self.state, action);
        self.state = next;
        command
    }
}
