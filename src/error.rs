//! Configuration error types.
//!
//! All configuration constructors return `Result<T, ConfigError>` so that a
//! bad endpoint or a missing required field is caught before any request is
//! attempted.
//!
//! # Example
//!
//! ```rust
//! use rest_resource::{ConfigError, Endpoint};
//!
//! let result = Endpoint::new("not a url");
//! assert!(matches!(result, Err(ConfigError::InvalidEndpoint { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while building a client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The endpoint is not a usable absolute URL.
    #[error("Invalid endpoint '{url}': {reason}. Expected an absolute URL such as 'https://api.example.com/v1'.")]
    InvalidEndpoint {
        /// The endpoint that was provided.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The underlying HTTP client could not be created.
    #[error("Failed to create HTTP client: {message}")]
    HttpClientBuild {
        /// The reason reported by the HTTP library.
        message: String,
    },
}
