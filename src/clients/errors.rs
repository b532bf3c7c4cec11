//! HTTP-specific error types.
//!
//! - [`HttpResponseError`]: a non-2xx response, with status, body and request context
//! - [`InvalidHttpRequestError`]: a request rejected before it is sent
//! - [`HttpError`]: unified error type returned by every client layer
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_resource::clients::HttpError;
//!
//! match api.retrieve("users", 42, RequestOptions::default()).await {
//!     Ok(user) => println!("User: {user:?}"),
//!     Err(HttpError::Response(e)) if e.code == 404 => println!("no such user"),
//!     Err(HttpError::Auth(e)) => println!("auth misconfigured: {e}"),
//!     Err(HttpError::Network(e)) => println!("network error: {e}"),
//!     Err(e) => println!("other error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::auth::AuthError;
use crate::clients::http_request::HttpMethod;

/// Error returned when a request receives a non-successful (4xx/5xx) response.
///
/// Carries the status code, the raw response body and the request that
/// produced it.
///
/// # Example
///
/// ```rust
/// use rest_resource::clients::{HttpMethod, HttpResponseError};
///
/// let error = HttpResponseError {
///     code: 404,
///     method: HttpMethod::Get,
///     url: "https://api.example.com/v1/users/42/".to_string(),
///     body: r#"{"detail":"Not found."}"#.to_string(),
///     error_reference: None,
/// };
///
/// assert!(error.to_string().contains("404"));
/// assert_eq!(error.json_body().unwrap()["detail"], "Not found.");
/// ```
#[derive(Debug, Error, Clone)]
#[error("{method} {url} failed with status {code}: {body}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The method of the failed request.
    pub method: HttpMethod,
    /// The fully resolved URL of the failed request.
    pub url: String,
    /// The raw response body.
    pub body: String,
    /// Reference ID for error reporting (from the `X-Request-Id` header).
    pub error_reference: Option<String>,
}

impl HttpResponseError {
    /// Parses the response body as JSON, if it is valid JSON.
    #[must_use]
    pub fn json_body(&self) -> Option<serde_json::Value> {
        serde_json::from_str(&self.body).ok()
    }

    /// Returns `true` for 4xx status codes.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.code >= 400 && self.code <= 499
    }

    /// Returns `true` for 5xx status codes.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.code >= 500 && self.code <= 599
    }
}

/// Error returned when a request is rejected before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The HTTP method is not one of the supported methods.
    #[error("Invalid Http method {method}.")]
    InvalidMethod {
        /// The invalid method that was provided.
        method: String,
    },

    /// The request URL could not be resolved against the endpoint.
    #[error("Cannot resolve request URL '{url}': {reason}")]
    InvalidUrl {
        /// The request URL as given by the caller.
        url: String,
        /// Why it could not be resolved.
        reason: String,
    },
}

/// Unified error type for all client layers.
///
/// Every layer returns this type unchanged from the layer below.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The configured authentication could not be applied.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Request validation failed before sending.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// A non-2xx response.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Network or connection error from the transport.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A 2xx response body that is not valid JSON, or request parameters
    /// that cannot be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An error produced by a custom [`ErrorHandler`](crate::clients::ErrorHandler).
    #[error(transparent)]
    Custom(Box<dyn std::error::Error + Send + Sync>),
}

impl HttpError {
    /// Returns the status code if this is a response error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            _ => None,
        }
    }
}
