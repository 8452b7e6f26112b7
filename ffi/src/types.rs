//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! enums with explicit discriminants. Conversion functions live here to keep
//! `lib.rs` focused on the `extern "C"` surface.
//!
//! Strings handed to C never contain interior NULs; any NUL coming from
//! upstream data is stripped before conversion.

use std::ffi::CString;
use std::os::raw::c_char;

use movies_core::{
    ApiError, ErrorInfo, ErrorKind, HttpMethod, ImageConfig, MovieRecord, SearchClient,
    SearchStore,
};

/// Opaque handle to a `SearchClient`.
pub struct FfiSearchClient {
    pub(crate) inner: SearchClient,
}

/// Opaque handle to a search screen state container.
///
/// Must only be used from the thread that owns the UI state.
pub struct FfiMovieStore {
    pub(crate) client: SearchClient,
    pub(crate) store: SearchStore,
}

/// Convert `s` into a heap-allocated C string owned by the caller.
pub(crate) fn c_string(s: &str) -> *mut c_char {
    CString::new(s.replace('\0', ""))
        .unwrap_or_default()
        .into_raw()
}

fn c_string_opt(s: Option<&str>) -> *mut c_char {
    s.map(c_string).unwrap_or(std::ptr::null_mut())
}

/// Release a string produced by `c_string`. Null is ignored.
pub(crate) fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `movies_build_search` and `movies_store_submit`. The host
/// executes the request and passes the response back in.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: movies_core::HttpRequest) -> *mut Self {
        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Vec<FfiHeader> = req
                .headers
                .iter()
                .map(|(k, v)| FfiHeader {
                    key: c_string(k),
                    value: c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers.into_boxed_slice()) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url: c_string(&req.url),
            headers,
            headers_len,
        }))
    }

    /// Release the fields of a request previously built by `from_core`.
    pub(crate) fn free_fields(&self) {
        free_c_string(self.url);
        if !self.headers.is_null() && self.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    self.headers,
                    self.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The host constructs this on the stack after executing a request and
/// passes a pointer in. The FFI layer reads but does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiSearchResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    InvalidRequest = 1,
    Network = 2,
    Http = 3,
    Decode = 4,
    Panic = 5,
    NullArg = 6,
}

impl From<ErrorKind> for FfiErrorCode {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::InvalidRequest => FfiErrorCode::InvalidRequest,
            ErrorKind::Network => FfiErrorCode::Network,
            ErrorKind::Http => FfiErrorCode::Http,
            ErrorKind::Decode => FfiErrorCode::Decode,
        }
    }
}

/// Outcome of handing a response to the state container.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiCompletion {
    /// The response was for the latest search and replaced the results.
    Applied = 0,
    /// The response was for the latest search and failed; results kept.
    Failed = 1,
    /// A newer search was issued since; the response was dropped.
    Stale = 2,
    NullArg = 3,
    Panic = 4,
}

/// A single movie exposed to C.
///
/// `poster_url` / `backdrop_url` are null when the slot shows a placeholder;
/// `poster_path` / `backdrop_path` are null when upstream sent null.
#[repr(C)]
pub struct FfiMovie {
    pub id: i64,
    pub title: *mut c_char,
    pub release_date: *mut c_char,
    pub year: *mut c_char,
    pub overview: *mut c_char,
    pub poster_path: *mut c_char,
    pub backdrop_path: *mut c_char,
    pub poster_url: *mut c_char,
    pub backdrop_url: *mut c_char,
    pub vote_average: f64,
}

impl FfiMovie {
    pub(crate) fn from_record(record: &MovieRecord, images: &ImageConfig) -> Self {
        FfiMovie {
            id: record.id(),
            title: c_string(record.title()),
            release_date: c_string(record.release_date()),
            year: c_string(record.release_year()),
            overview: c_string(record.overview()),
            poster_path: c_string_opt(record.poster_path()),
            backdrop_path: c_string_opt(record.backdrop_path()),
            poster_url: c_string_opt(record.poster(images).url()),
            backdrop_url: c_string_opt(record.backdrop(images).url()),
            vote_average: record.vote_average(),
        }
    }

    /// Free the C-string fields (but not the struct itself).
    pub(crate) fn free_fields(&self) {
        free_c_string(self.title);
        free_c_string(self.release_date);
        free_c_string(self.year);
        free_c_string(self.overview);
        free_c_string(self.poster_path);
        free_c_string(self.backdrop_path);
        free_c_string(self.poster_url);
        free_c_string(self.backdrop_url);
    }
}

/// Result envelope for search parsing and store snapshots.
///
/// On success `error_code` is `Ok` and `error_message` is null. On failure
/// `error_code` describes the category and `error_message` is a readable C
/// string. `movies` may be non-empty on failure when it comes from a store
/// snapshot, which keeps the previous results.
#[repr(C)]
pub struct FfiSearchResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub is_loading: bool,
    pub movies: *mut FfiMovie,
    pub movies_len: u32,
}

impl FfiSearchResult {
    fn boxed(
        error_code: FfiErrorCode,
        error_message: *mut c_char,
        http_status: u16,
        is_loading: bool,
        movies: &[MovieRecord],
        images: &ImageConfig,
    ) -> *mut Self {
        let movies_len = movies.len() as u32;
        let movies = if movies.is_empty() {
            std::ptr::null_mut()
        } else {
            let items: Vec<FfiMovie> = movies
                .iter()
                .map(|m| FfiMovie::from_record(m, images))
                .collect();
            Box::into_raw(items.into_boxed_slice()) as *mut FfiMovie
        };
        Box::into_raw(Box::new(FfiSearchResult {
            error_code,
            error_message,
            http_status,
            is_loading,
            movies,
            movies_len,
        }))
    }

    /// Build a success result carrying the decoded records.
    pub(crate) fn ok(movies: &[MovieRecord], images: &ImageConfig) -> *mut Self {
        Self::boxed(FfiErrorCode::Ok, std::ptr::null_mut(), 0, false, movies, images)
    }

    /// Build an error result from an `ApiError`.
    pub(crate) fn from_error(err: &ApiError) -> *mut Self {
        let http_status = match err {
            ApiError::HttpError { status, .. } => *status,
            _ => 0,
        };
        Self::boxed(
            err.kind().into(),
            c_string(&err.to_string()),
            http_status,
            false,
            &[],
            &ImageConfig::default(),
        )
    }

    /// Build a result from a store snapshot: current records plus the last
    /// failure, if any.
    pub(crate) fn snapshot(
        movies: &[MovieRecord],
        failure: Option<&ErrorInfo>,
        is_loading: bool,
        images: &ImageConfig,
    ) -> *mut Self {
        let (code, message, http_status) = match failure {
            Some(info) => (
                info.kind.into(),
                c_string(&info.message),
                info.status.unwrap_or(0),
            ),
            None => (FfiErrorCode::Ok, std::ptr::null_mut(), 0),
        };
        Self::boxed(code, message, http_status, is_loading, movies, images)
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::boxed(
            FfiErrorCode::NullArg,
            c_string(&format!("null argument: {name}")),
            0,
            false,
            &[],
            &ImageConfig::default(),
        )
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::boxed(
            FfiErrorCode::Panic,
            c_string(msg),
            0,
            false,
            &[],
            &ImageConfig::default(),
        )
    }

    /// Release the fields of a result previously built here.
    pub(crate) fn free_fields(&self) {
        free_c_string(self.error_message);
        if !self.movies.is_null() && self.movies_len > 0 {
            let items = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    self.movies,
                    self.movies_len as usize,
                ))
            };
            for item in items.iter() {
                item.free_fields();
            }
        }
    }
}

/// A search issued through the state container.
///
/// `request` is null when the request could not be built; the store then
/// already holds the failure and there is nothing to execute.
#[repr(C)]
pub struct FfiSearchTicket {
    pub request_id: u64,
    pub request: *mut FfiHttpRequest,
}
