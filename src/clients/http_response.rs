//! HTTP response type.

use std::collections::HashMap;

/// An HTTP response as received from the server.
///
/// The body is kept as raw text; [`json`](Self::json) distinguishes an empty
/// body (`Ok(None)`) from a JSON value.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lower-cased name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(code: u16, headers: HashMap<String, Vec<String>>, body: String) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` for 4xx and 5xx status codes.
    ///
    /// Other non-2xx codes (such as `304 Not Modified`) are not failures.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.code >= 400 && self.code <= 599
    }

    /// Returns the first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// Parses the body as JSON.
    ///
    /// Returns `Ok(None)` when the body is empty, so "no content" stays
    /// distinct from an empty JSON object.
    ///
    /// # Errors
    ///
    /// Returns the serde error if a non-empty body is not valid JSON.
    pub fn json(&self) -> Result<Option<serde_json::Value>, serde_json::Error> {
        if self.body.is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&self.body).map(Some)
    }
}
