//! C-ABI wrapper around `movies-core`.
//!
//! # Overview
//! Exposes the movie search client and the search screen state container
//! through `extern "C"` functions, so a mobile host (Swift, Kotlin via JNI)
//! can build requests, run them on its own network stack, and feed the
//! responses back without linking an async runtime.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Stateless calls (`movies_build_search` / `movies_parse_search`) mirror
//!   the core client 1:1.
//! - `movies_store_*` drive a `SearchStore`: submit returns a ticket with a
//!   request id, and a completion for anything but the latest id is dropped.
//! - The caller owns all returned pointers and must call the matching
//!   `movies_free_*` function to release them.

pub mod types;

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::catch_unwind;

use movies_core::{
    Action, ApiError, ClientConfig, Command, HttpResponse, RequestId, SearchClient, SearchStatus,
    SearchStore,
};
use tracing_subscriber::EnvFilter;

use types::*;

/// Read a caller-provided C string. Returns `None` for null.
fn read_c_str(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Install a `tracing` subscriber writing to stderr, filtered by `RUST_LOG`
/// (default `info`). Returns false if a subscriber was already installed.
#[unsafe(no_mangle)]
pub extern "C" fn movies_init_logging() -> bool {
    catch_unwind(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok()
    })
    .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `SearchClient`.
///
/// `api_key` is required and must not be blank. `base_url` and `language`
/// may be null to use the TMDB defaults. Returns null on invalid input or if
/// an internal panic occurs. Free with `movies_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn movies_client_new(
    api_key: *const c_char,
    base_url: *const c_char,
    language: *const c_char,
) -> *mut FfiSearchClient {
    catch_unwind(|| {
        let Some(api_key) = read_c_str(api_key) else {
            return std::ptr::null_mut();
        };
        if api_key.trim().is_empty() {
            tracing::warn!("refusing to create client with blank api key");
            return std::ptr::null_mut();
        }

        let mut config = ClientConfig::new(api_key.trim());
        if let Some(base_url) = read_c_str(base_url) {
            config = config.with_base_url(base_url);
        }
        if let Some(language) = read_c_str(language) {
            config = config.with_language(language);
        }
        Box::into_raw(Box::new(FfiSearchClient {
            inner: SearchClient::new(config),
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `movies_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn movies_client_free(client: *mut FfiSearchClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Stateless search
// ---------------------------------------------------------------------------

/// Build the search request for `query`. An empty query is still built.
///
/// Returns null if an argument is null or the configured base URL is
/// unusable. Free with `movies_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn movies_build_search(
    client: *const FfiSearchClient,
    query: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let Some(query) = read_c_str(query) else {
            return std::ptr::null_mut();
        };
        let client = unsafe { &*client };
        match client.inner.build_search(&query) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(e) => {
                tracing::warn!(error = %e, "could not build search request");
                std::ptr::null_mut()
            }
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. A null body is
/// read as empty.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    HttpResponse {
        status: resp.status,
        headers: Vec::new(),
        body: read_c_str(resp.body).unwrap_or_default(),
    }
}

/// Parse a search response into movies. Free with `movies_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn movies_parse_search(
    client: *const FfiSearchClient,
    response: *const FfiHttpResponse,
) -> *mut FfiSearchResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiSearchResult::null_arg("client");
        }
        if response.is_null() {
            return FfiSearchResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        match client.inner.parse_search(ffi_response_to_core(resp)) {
            Ok(movies) => FfiSearchResult::ok(&movies, client.inner.images()),
            Err(e) => FfiSearchResult::from_error(&e),
        }
    })
    .unwrap_or_else(|_| FfiSearchResult::panic("panic in movies_parse_search"))
}

// ---------------------------------------------------------------------------
// State container
// ---------------------------------------------------------------------------

/// Create a state container bound to a copy of `client`.
///
/// Returns null if `client` is null. Free with `movies_store_free`.
#[unsafe(no_mangle)]
pub extern "C" fn movies_store_new(client: *const FfiSearchClient) -> *mut FfiMovieStore {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        Box::into_raw(Box::new(FfiMovieStore {
            client: client.inner.clone(),
            store: SearchStore::new(),
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a store created by `movies_store_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn movies_store_free(store: *mut FfiMovieStore) {
    if !store.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(store) });
        });
    }
}

/// Set the query and issue a new search.
///
/// The returned ticket carries the request id to pass back to
/// `movies_store_complete` / `movies_store_fail`, and the request to
/// execute. Earlier in-flight searches are not cancelled; their completions
/// will be reported as `Stale`. Free with `movies_free_ticket`.
#[unsafe(no_mangle)]
pub extern "C" fn movies_store_submit(
    store: *mut FfiMovieStore,
    query: *const c_char,
) -> *mut FfiSearchTicket {
    catch_unwind(|| {
        if store.is_null() {
            return std::ptr::null_mut();
        }
        let Some(query) = read_c_str(query) else {
            return std::ptr::null_mut();
        };
        let handle = unsafe { &mut *store };
        handle.store.dispatch(Action::QueryChanged(query));
        let Some(Command::Search { request_id, query }) = handle.store.dispatch(Action::Submit)
        else {
            return std::ptr::null_mut();
        };

        let request = match handle.client.build_search(&query) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(e) => {
                handle.store.dispatch(Action::SearchCompleted {
                    request_id,
                    outcome: Err(e),
                });
                std::ptr::null_mut()
            }
        };
        Box::into_raw(Box::new(FfiSearchTicket {
            request_id: request_id.0,
            request,
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Dispatch a completion and report how the store used it.
fn complete(
    handle: &mut FfiMovieStore,
    request_id: u64,
    outcome: Result<Vec<movies_core::MovieRecord>, ApiError>,
) -> FfiCompletion {
    let request_id = RequestId(request_id);
    if request_id != handle.store.state().latest_request {
        handle.store.dispatch(Action::SearchCompleted {
            request_id,
            outcome,
        });
        return FfiCompletion::Stale;
    }
    let failed = outcome.is_err();
    handle.store.dispatch(Action::SearchCompleted {
        request_id,
        outcome,
    });
    if failed {
        FfiCompletion::Failed
    } else {
        FfiCompletion::Applied
    }
}

/// Hand the response for `request_id` to the store.
#[unsafe(no_mangle)]
pub extern "C" fn movies_store_complete(
    store: *mut FfiMovieStore,
    request_id: u64,
    response: *const FfiHttpResponse,
) -> FfiCompletion {
    catch_unwind(|| {
        if store.is_null() || response.is_null() {
            return FfiCompletion::NullArg;
        }
        let handle = unsafe { &mut *store };
        let resp = unsafe { &*response };
        let outcome = handle.client.parse_search(ffi_response_to_core(resp));
        complete(handle, request_id, outcome)
    })
    .unwrap_or(FfiCompletion::Panic)
}

/// Report that the host could not execute the request for `request_id`.
/// `message` may be null.
#[unsafe(no_mangle)]
pub extern "C" fn movies_store_fail(
    store: *mut FfiMovieStore,
    request_id: u64,
    message: *const c_char,
) -> FfiCompletion {
    catch_unwind(|| {
        if store.is_null() {
            return FfiCompletion::NullArg;
        }
        let handle = unsafe { &mut *store };
        let message = read_c_str(message).unwrap_or_else(|| "transport failure".to_string());
        complete(handle, request_id, Err(ApiError::NetworkError(message)))
    })
    .unwrap_or(FfiCompletion::Panic)
}

/// Snapshot of the current results and status. Free with `movies_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn movies_store_results(store: *const FfiMovieStore) -> *mut FfiSearchResult {
    catch_unwind(|| {
        if store.is_null() {
            return FfiSearchResult::null_arg("store");
        }
        let handle = unsafe { &*store };
        let state = handle.store.state();
        let failure = match &state.status {
            SearchStatus::Failed(info) => Some(info),
            _ => None,
        };
        FfiSearchResult::snapshot(
            &state.results,
            failure,
            state.is_loading(),
            handle.client.images(),
        )
    })
    .unwrap_or_else(|_| FfiSearchResult::panic("panic in movies_store_results"))
}

/// Clear the stored query text.
#[unsafe(no_mangle)]
pub extern "C" fn movies_store_clear_query(store: *mut FfiMovieStore) {
    if !store.is_null() {
        let _ = catch_unwind(|| {
            let handle = unsafe { &mut *store };
            handle.store.dispatch(Action::ClearQuery);
        });
    }
}

/// Select the record with `id` for the detail view. Returns false if no
/// record in the current results has that id.
#[unsafe(no_mangle)]
pub extern "C" fn movies_store_select(store: *mut FfiMovieStore, id: i64) -> bool {
    catch_unwind(|| {
        if store.is_null() {
            return false;
        }
        let handle = unsafe { &mut *store };
        handle.store.dispatch(Action::Select(id));
        handle.store.state().selected == Some(id)
    })
    .unwrap_or(false)
}

/// The selected record, or null if nothing is selected. No request is made.
/// Free with `movies_free_movie`.
#[unsafe(no_mangle)]
pub extern "C" fn movies_store_selected(store: *const FfiMovieStore) -> *mut FfiMovie {
    catch_unwind(|| {
        if store.is_null() {
            return std::ptr::null_mut();
        }
        let handle = unsafe { &*store };
        match handle.store.state().selected_record() {
            Some(record) => Box::into_raw(Box::new(FfiMovie::from_record(
                record,
                handle.client.images(),
            ))),
            None => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Close the detail view.
#[unsafe(no_mangle)]
pub extern "C" fn movies_store_dismiss(store: *mut FfiMovieStore) {
    if !store.is_null() {
        let _ = catch_unwind(|| {
            let handle = unsafe { &mut *store };
            handle.store.dispatch(Action::Dismiss);
        });
    }
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a request returned by `movies_build_search`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn movies_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        req.free_fields();
    });
}

/// Free a result returned by `movies_parse_search` or
/// `movies_store_results`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn movies_free_result(result: *mut FfiSearchResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        result.free_fields();
    });
}

/// Free a ticket returned by `movies_store_submit`, including its request.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn movies_free_ticket(ticket: *mut FfiSearchTicket) {
    if ticket.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let ticket = unsafe { Box::from_raw(ticket) };
        if !ticket.request.is_null() {
            let req = unsafe { Box::from_raw(ticket.request) };
            req.free_fields();
        }
    });
}

/// Free a movie returned by `movies_store_selected`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn movies_free_movie(movie: *mut FfiMovie) {
    if movie.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let movie = unsafe { Box::from_raw(movie) };
        movie.free_fields();
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn movies_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| free_c_string(s));
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    const SAMPLE: &str = r#"{"results":[{"id":1,"title":"A","release_date":"2020-05-01","overview":"x","poster_path":null,"backdrop_path":"/b.jpg","vote_average":7.5},{"id":2,"title":"B","release_date":"","overview":"","poster_path":"/p.jpg","backdrop_path":null,"vote_average":6.0}]}"#;

    fn new_client() -> *mut FfiSearchClient {
        let key = CString::new("k3y").unwrap();
        let url = CString::new("http://localhost:3000").unwrap();
        movies_client_new(key.as_ptr(), url.as_ptr(), std::ptr::null())
    }

    fn text(ptr: *const c_char) -> &'static str {
        unsafe { CStr::from_ptr(ptr) }.to_str().unwrap()
    }

    fn movies(result: &FfiSearchResult) -> &[FfiMovie] {
        if result.movies.is_null() {
            return &[];
        }
        unsafe { std::slice::from_raw_parts(result.movies, result.movies_len as usize) }
    }

    #[test]
    fn client_new_and_free() {
        let client = new_client();
        assert!(!client.is_null());
        movies_client_free(client);
    }

    #[test]
    fn client_new_null_key_returns_null() {
        let client = movies_client_new(std::ptr::null(), std::ptr::null(), std::ptr::null());
        assert!(client.is_null());
    }

    #[test]
    fn client_new_blank_key_returns_null() {
        let key = CString::new("   ").unwrap();
        let client = movies_client_new(key.as_ptr(), std::ptr::null(), std::ptr::null());
        assert!(client.is_null());
    }

    #[test]
    fn client_free_null_is_safe() {
        movies_client_free(std::ptr::null_mut());
    }

    #[test]
    fn build_search_returns_get_with_encoded_query() {
        let client = new_client();
        let query = CString::new("o poderoso").unwrap();
        let req = movies_build_search(client, query.as_ptr());
        assert!(!req.is_null());

        let req_ref = unsafe { &*req };
        assert!(matches!(req_ref.method, FfiHttpMethod::Get));
        assert_eq!(
            text(req_ref.url),
            "http://localhost:3000/3/search/movie?api_key=k3y&adult=false&language=pt-BR&query=o+poderoso"
        );
        assert_eq!(req_ref.headers_len, 1);

        movies_free_request(req);
        movies_client_free(client);
    }

    #[test]
    fn build_search_uses_language_override() {
        let key = CString::new("k").unwrap();
        let lang = CString::new("en-US").unwrap();
        let client = movies_client_new(key.as_ptr(), std::ptr::null(), lang.as_ptr());
        let query = CString::new("x").unwrap();
        let req = movies_build_search(client, query.as_ptr());
        let url = text(unsafe { &*req }.url);
        assert!(url.starts_with("https://api.themoviedb.org/3/search/movie?"));
        assert!(url.contains("language=en-US"));

        movies_free_request(req);
        movies_client_free(client);
    }

    #[test]
    fn build_search_null_args_return_null() {
        let client = new_client();
        assert!(movies_build_search(client, std::ptr::null()).is_null());
        let query = CString::new("x").unwrap();
        assert!(movies_build_search(std::ptr::null(), query.as_ptr()).is_null());
        movies_client_free(client);
    }

    #[test]
    fn build_search_bad_base_url_returns_null() {
        let key = CString::new("k").unwrap();
        let url = CString::new("not a url").unwrap();
        let client = movies_client_new(key.as_ptr(), url.as_ptr(), std::ptr::null());
        let query = CString::new("x").unwrap();
        assert!(movies_build_search(client, query.as_ptr()).is_null());
        movies_client_free(client);
    }

    #[test]
    fn parse_search_success() {
        let client = new_client();
        let body = CString::new(SAMPLE).unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = movies_parse_search(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert!(r.error_message.is_null());

        let items = movies(r);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, 1);
        assert_eq!(text(items[0].title), "A");
        assert_eq!(text(items[0].year), "2020");
        assert_eq!(items[0].vote_average, 7.5);
        assert!(items[0].poster_path.is_null());
        assert!(items[0].poster_url.is_null());
        assert_eq!(
            text(items[0].backdrop_url),
            "https://image.tmdb.org/t/p/w1280/b.jpg"
        );
        assert_eq!(text(items[1].year), "");
        assert_eq!(text(items[1].poster_url), "https://image.tmdb.org/t/p/w500/p.jpg");

        movies_free_result(result);
        movies_client_free(client);
    }

    #[test]
    fn parse_search_decode_error() {
        let client = new_client();
        let body = CString::new(r#"{"results":[{"id":1}]}"#).unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = movies_parse_search(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Decode);
        assert!(!r.error_message.is_null());
        assert!(r.movies.is_null());

        movies_free_result(result);
        movies_client_free(client);
    }

    #[test]
    fn parse_search_http_error_carries_status() {
        let client = new_client();
        let body = CString::new(r#"{"status_code":7,"status_message":"Invalid API key"}"#).unwrap();
        let resp = FfiHttpResponse {
            status: 401,
            body: body.as_ptr(),
        };
        let result = movies_parse_search(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Http);
        assert_eq!(r.http_status, 401);
        assert_eq!(text(r.error_message), "HTTP 401: Invalid API key");

        movies_free_result(result);
        movies_client_free(client);
    }

    #[test]
    fn parse_search_null_response() {
        let client = new_client();
        let result = movies_parse_search(client, std::ptr::null());
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::NullArg);
        movies_free_result(result);
        movies_client_free(client);
    }

    #[test]
    fn store_applies_latest_and_drops_stale() {
        let client = new_client();
        let store = movies_store_new(client);
        assert!(!store.is_null());

        let q1 = CString::new("a").unwrap();
        let first = movies_store_submit(store, q1.as_ptr());
        let q2 = CString::new("ab").unwrap();
        let second = movies_store_submit(store, q2.as_ptr());
        let (first_id, second_id) = unsafe { ((*first).request_id, (*second).request_id) };
        assert!(second_id > first_id);
        assert!(!unsafe { &*second }.request.is_null());

        let loading = movies_store_results(store);
        assert!(unsafe { &*loading }.is_loading);
        movies_free_result(loading);

        let body = CString::new(SAMPLE).unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        assert_eq!(movies_store_complete(store, second_id, &resp), FfiCompletion::Applied);

        let empty = CString::new(r#"{"results":[]}"#).unwrap();
        let late = FfiHttpResponse {
            status: 200,
            body: empty.as_ptr(),
        };
        assert_eq!(movies_store_complete(store, first_id, &late), FfiCompletion::Stale);

        let snapshot = movies_store_results(store);
        let r = unsafe { &*snapshot };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert!(!r.is_loading);
        assert_eq!(movies(r).len(), 2);
        movies_free_result(snapshot);

        movies_free_ticket(first);
        movies_free_ticket(second);
        movies_store_free(store);
        movies_client_free(client);
    }

    #[test]
    fn store_failure_keeps_results() {
        let client = new_client();
        let store = movies_store_new(client);

        let q = CString::new("a").unwrap();
        let ticket = movies_store_submit(store, q.as_ptr());
        let body = CString::new(SAMPLE).unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let id = unsafe { &*ticket }.request_id;
        assert_eq!(movies_store_complete(store, id, &resp), FfiCompletion::Applied);
        movies_free_ticket(ticket);

        let ticket = movies_store_submit(store, q.as_ptr());
        let id = unsafe { &*ticket }.request_id;
        let msg = CString::new("offline").unwrap();
        assert_eq!(movies_store_fail(store, id, msg.as_ptr()), FfiCompletion::Failed);
        movies_free_ticket(ticket);

        let snapshot = movies_store_results(store);
        let r = unsafe { &*snapshot };
        assert_eq!(r.error_code, FfiErrorCode::Network);
        assert_eq!(r.http_status, 0);
        assert!(text(r.error_message).contains("offline"));
        assert_eq!(movies(r).len(), 2);
        movies_free_result(snapshot);

        movies_store_free(store);
        movies_client_free(client);
    }

    #[test]
    fn store_http_failure_reports_status() {
        let client = new_client();
        let store = movies_store_new(client);

        let q = CString::new("matrix").unwrap();
        let ticket = movies_store_submit(store, q.as_ptr());
        let id = unsafe { &*ticket }.request_id;
        let body = CString::new(r#"{"status_code":7,"status_message":"Invalid API key"}"#).unwrap();
        let resp = FfiHttpResponse {
            status: 401,
            body: body.as_ptr(),
        };
        assert_eq!(movies_store_complete(store, id, &resp), FfiCompletion::Failed);
        movies_free_ticket(ticket);

        let snapshot = movies_store_results(store);
        let r = unsafe { &*snapshot };
        assert_eq!(r.error_code, FfiErrorCode::Http);
        assert_eq!(r.http_status, 401);
        assert_eq!(text(r.error_message), "HTTP 401: Invalid API key");
        movies_free_result(snapshot);

        movies_store_free(store);
        movies_client_free(client);
    }

    #[test]
    fn store_submit_with_bad_base_url_records_failure() {
        let key = CString::new("k").unwrap();
        let url = CString::new("not a url").unwrap();
        let client = movies_client_new(key.as_ptr(), url.as_ptr(), std::ptr::null());
        let store = movies_store_new(client);

        let q = CString::new("x").unwrap();
        let ticket = movies_store_submit(store, q.as_ptr());
        assert!(!ticket.is_null());
        assert!(unsafe { &*ticket }.request.is_null());

        let snapshot = movies_store_results(store);
        assert_eq!(unsafe { &*snapshot }.error_code, FfiErrorCode::InvalidRequest);
        movies_free_result(snapshot);

        movies_free_ticket(ticket);
        movies_store_free(store);
        movies_client_free(client);
    }

    #[test]
    fn store_select_and_dismiss() {
        let client = new_client();
        let store = movies_store_new(client);

        assert!(!movies_store_select(store, 1));
        assert!(movies_store_selected(store).is_null());

        let q = CString::new("a").unwrap();
        let ticket = movies_store_submit(store, q.as_ptr());
        let body = CString::new(SAMPLE).unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        movies_store_complete(store, unsafe { &*ticket }.request_id, &resp);
        movies_free_ticket(ticket);

        assert!(movies_store_select(store, 2));
        let movie = movies_store_selected(store);
        assert!(!movie.is_null());
        let m = unsafe { &*movie };
        assert_eq!(text(m.title), "B");
        assert_eq!(m.vote_average, 6.0);
        assert!(m.backdrop_url.is_null());
        movies_free_movie(movie);

        movies_store_dismiss(store);
        assert!(movies_store_selected(store).is_null());

        movies_store_clear_query(store);
        movies_store_free(store);
        movies_client_free(client);
    }

    #[test]
    fn store_null_args() {
        assert!(movies_store_new(std::ptr::null()).is_null());
        assert!(movies_store_submit(std::ptr::null_mut(), std::ptr::null()).is_null());
        assert_eq!(
            movies_store_complete(std::ptr::null_mut(), 1, std::ptr::null()),
            FfiCompletion::NullArg
        );
        assert_eq!(
            movies_store_fail(std::ptr::null_mut(), 1, std::ptr::null()),
            FfiCompletion::NullArg
        );
        assert!(!movies_store_select(std::ptr::null_mut(), 1));
        movies_store_dismiss(std::ptr::null_mut());
        movies_store_clear_query(std::ptr::null_mut());
        movies_store_free(std::ptr::null_mut());
    }

    #[test]
    fn free_functions_accept_null() {
        movies_free_request(std::ptr::null_mut());
        movies_free_result(std::ptr::null_mut());
        movies_free_ticket(std::ptr::null_mut());
        movies_free_movie(std::ptr::null_mut());
        movies_free_string(std::ptr::null_mut());
    }
}
