//! Plain-data HTTP types for the transport adapter.
//!
//! # Design
//! Requests and responses are described as plain data. The transport
//! executes a `RequestConfig` against the network and reduces the answer to
//! a `RawResponse` before any interpretation happens, so the normalization
//! rules stay deterministic and testable without a socket. All fields are
//! owned types; nothing here knows which HTTP client runs the I/O.

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

/// Caching stance of a request.
///
/// Reads and writes default to `NoStore`: every response reflects the
/// store's current state, and shared caches along the way must not replay
/// an older one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheMode {
    #[default]
    NoStore,
    /// Leave caching to the protocol defaults.
    Default,
}

/// An HTTP request described as plain data, minus the target URL.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub cache: CacheMode,
}

impl Default for RequestConfig {
    fn default() -> Self {
        RequestConfig {
            method: HttpMethod::Get,
            headers: Vec::new(),
            body: None,
            cache: CacheMode::NoStore,
        }
    }
}

impl RequestConfig {
    /// A JSON POST carrying `body`.
    pub fn post(body: String) -> Self {
        RequestConfig {
            method: HttpMethod::Post,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
            ..RequestConfig::default()
        }
    }

    /// A JSON PUT carrying `body`.
    pub fn put(body: String) -> Self {
        RequestConfig {
            method: HttpMethod::Put,
            ..RequestConfig::post(body)
        }
    }
}

/// An HTTP response reduced to plain data, before interpretation.
///
/// `content_type` and `content_length` are carried separately from the body
/// because an empty acknowledgment is detected from the headers first; a
/// body is only parsed when the headers claim there is one.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub body: String,
}

/// Decoded outcome of a request: either data of the expected type or an
/// empty acknowledgment. Write callers decide what an empty ack means;
/// it is never an error at this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload<T> {
    Empty,
    Data(T),
}
