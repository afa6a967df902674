//! Minimal HTTP response model.
//!
//! This struct represents a **fully buffered** HTTP response returned by the
//! fetcher. It contains the final URL (after redirects, if the client follows
//! them), status code + reason, response headers, and the decoded body.
//!
//! ## Notes
//! - Any status the server sends is a valid result. A `404` is a completed
//!   exchange and lands here, not in [`FetchError`](crate::FetchError).
//! - `headers` is an `http::HeaderMap`, which is **case-insensitive** for
//!   header names.
//! - The body is decoded as UTF-8, replacing invalid sequences. The
//!   `charset` of the `Content-Type` is not consulted.
//! - `status_text` is derived from the status code's canonical reason phrase
//!   and is `"Unknown"` for non-standard codes.
//!
use http::HeaderMap;

/// Result of a completed request.
///
/// All fields reflect the **received** response; only the body is decoded.
#[derive(Debug, Clone)]
pub struct ResponseResult {
    /// Final URL of the response (after redirects, if any).
    pub url: url::Url,

    /// Numeric HTTP status code (e.g., `200`, `404`).
    pub status: u16,

    /// Human-readable reason phrase (e.g., `"OK"`, `"Not Found"`).
    pub status_text: String,

    /// Response headers as a case-insensitive map.
    pub headers: HeaderMap,

    /// Response body decoded to text.
    pub body: String,
}

impl ResponseResult {
    pub(crate) fn new(url: url::Url, status: http::StatusCode, headers: HeaderMap, raw_body: &[u8]) -> Self {
        // Lossy UTF-8 regardless of the declared charset
        let body = String::from_utf8_lossy(raw_body).into_owned();

        Self {
            url,
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            headers,
            body,
        }
    }

    /// True for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
