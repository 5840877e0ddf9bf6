//! Transport adapter: executes requests and normalizes every HTTP outcome.
//!
//! # Design
//! `Transport::send` is the only place in the crate that touches the
//! network. It reduces the wire answer to a `RawResponse` and hands it to
//! [`decode`], a pure function holding all the interpretation rules, so the
//! interesting cases (error statuses, empty acknowledgments, malformed
//! bodies) are covered by plain unit tests.
//!
//! Normalization rules, in order:
//! 1. a non-2xx status is `TodoError::Http`; the body is not parsed
//! 2. an empty body (`Content-Length: 0`, absent content type, or blank
//!    text) is `Payload::Empty`, never a parse failure
//! 3. anything else must parse as JSON into the expected type
//! 4. a request that produced no response at all is `TodoError::Network`

use serde::de::DeserializeOwned;

use crate::error::TodoError;
use crate::http::{CacheMode, HttpMethod, Payload, RawResponse, RequestConfig};

/// Async HTTP executor. Cheap to clone; the underlying client pools
/// connections.
#[derive(Debug, Clone, Default)]
pub struct Transport {
    http: reqwest::Client,
}

impl Transport {
    pub fn new() -> Self {
        Transport {
            http: reqwest::Client::new(),
        }
    }

    /// Execute `config` against `url` and decode the outcome.
    pub async fn send<T: DeserializeOwned>(
        &self,
        url: &str,
        config: RequestConfig,
    ) -> Result<Payload<T>, TodoError> {
        let raw = self.execute(url, config).await?;
        decode(raw)
    }

    async fn execute(&self, url: &str, config: RequestConfig) -> Result<RawResponse, TodoError> {
        tracing::debug!(%url, method = ?config.method, "sending request");
        let mut request = match config.method {
            HttpMethod::Get => self.http.get(url),
            HttpMethod::Post => self.http.post(url),
            HttpMethod::Put => self.http.put(url),
        };
        for (name, value) in request_headers(&config) {
            request = request.header(name, value);
        }
        if let Some(body) = config.body {
            request = request.body(body);
        }
        let response = request
            .send()
            .await
            .map_err(|e| TodoError::Network(e.to_string()))?;

        // Status and headers must be captured before `text` consumes the
        // response.
        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let content_length = response.content_length();
        let body = response
            .text()
            .await
            .map_err(|e| TodoError::Network(e.to_string()))?;

        Ok(RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            content_type,
            content_length,
            body,
        })
    }
}

/// Final header set for a request: the caller's headers, plus
/// `Cache-Control: no-store` unless the config opts out or already set one.
fn request_headers(config: &RequestConfig) -> Vec<(String, String)> {
    let mut headers = config.headers.clone();
    let has_cache_control = headers
        .iter()
        .any(|(name, _)| name.eq_ignore_ascii_case("cache-control"));
    if config.cache == CacheMode::NoStore && !has_cache_control {
        headers.push(("cache-control".to_string(), "no-store".to_string()));
    }
    headers
}

/// Interpret a raw response according to the normalization rules.
pub fn decode<T: DeserializeOwned>(raw: RawResponse) -> Result<Payload<T>, TodoError> {
    if !(200..300).contains(&raw.status) {
        return Err(TodoError::Http {
            status: raw.status,
            status_text: raw.status_text,
        });
    }
    if raw.content_length == Some(0) {
        return Ok(Payload::Empty);
    }
    if raw.content_type.as_deref().map_or(true, str::is_empty) {
        return Ok(Payload::Empty);
    }
    if raw.body.trim().is_empty() {
        return Ok(Payload::Empty);
    }
    serde_json::from_str(&raw.body)
        .map(Payload::Data)
        .map_err(|e| TodoError::Decode(e.to_string()))
}
