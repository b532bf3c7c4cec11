//! Client configuration.
//!
//! - [`ClientConfig`]: endpoint, auth settings and trailing-slash policy
//! - [`ClientConfigBuilder`]: fluent construction of [`ClientConfig`]
//! - [`Endpoint`]: a validated base URL
//!
//! A configuration can be built in code or deserialized from any serde
//! format using the same field names.
//!
//! # Example
//!
//! ```rust
//! use rest_resource::{ClientConfig, Endpoint};
//!
//! let config = ClientConfig::builder()
//!     .endpoint(Endpoint::new("https://api.example.com/v1").unwrap())
//!     .auth_type("basic")
//!     .auth_username("alice")
//!     .auth_password("s3cret")
//!     .build()
//!     .unwrap();
//!
//! assert!(config.trailing_slash());
//!
//! let config: ClientConfig = serde_json::from_str(
//!     r#"{"endpoint": "https://api.example.com/v1", "trailing_slash": false}"#,
//! )
//! .unwrap();
//! assert!(!config.trailing_slash());
//! ```

mod newtypes;

pub use newtypes::Endpoint;

use std::fmt;

use serde::Deserialize;

use crate::auth::{AuthError, AuthScheme};
use crate::error::ConfigError;

const fn default_trailing_slash() -> bool {
    true
}

/// Configuration for an [`HttpClient`](crate::clients::HttpClient).
///
/// Auth settings are kept as loose fields and resolved into an
/// [`AuthScheme`] when a request is made. Call [`validate`](Self::validate)
/// at startup to surface a bad scheme or missing credential early.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send` and `Sync`.
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    endpoint: Endpoint,
    #[serde(default)]
    auth_type: Option<String>,
    #[serde(default)]
    auth_username: Option<String>,
    #[serde(default)]
    auth_password: Option<String>,
    #[serde(default = "default_trailing_slash")]
    trailing_slash: bool,
    #[serde(default)]
    user_agent_prefix: Option<String>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the base endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns the configured auth scheme tag, if any.
    #[must_use]
    pub fn auth_type(&self) -> Option<&str> {
        self.auth_type.as_deref()
    }

    /// Returns the configured auth username, if any.
    #[must_use]
    pub fn auth_username(&self) -> Option<&str> {
        self.auth_username.as_deref()
    }

    /// Returns whether request paths get a trailing `/` appended.
    #[must_use]
    pub const fn trailing_slash(&self) -> bool {
        self.trailing_slash
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Resolves the auth settings into an [`AuthScheme`].
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the scheme tag is unknown or a required
    /// credential is missing.
    pub fn auth_scheme(&self) -> Result<AuthScheme, AuthError> {
        AuthScheme::resolve(
            self.auth_type.as_deref(),
            self.auth_username.as_deref(),
            self.auth_password.as_deref(),
        )
    }

    /// Checks the auth settings without making a request.
    ///
    /// # Errors
    ///
    /// Same as [`auth_scheme`](Self::auth_scheme).
    pub fn validate(&self) -> Result<(), AuthError> {
        self.auth_scheme().map(|_| ())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("auth_type", &self.auth_type)
            .field("auth_username", &self.auth_username)
            .field("auth_password", &self.auth_password.as_ref().map(|_| "*****"))
            .field("trailing_slash", &self.trailing_slash)
            .field("user_agent_prefix", &self.user_agent_prefix)
            .finish()
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// `endpoint` is required. Defaults:
///
/// - `trailing_slash`: `true`
/// - `auth_type`: `None` (no authentication)
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    endpoint: Option<Endpoint>,
    auth_type: Option<String>,
    auth_username: Option<String>,
    auth_password: Option<String>,
    trailing_slash: Option<bool>,
    user_agent_prefix: Option<String>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base endpoint (required).
    #[must_use]
    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Sets the auth scheme tag, e.g. `"basic"`.
    ///
    /// Unknown tags are accepted here and rejected when a request is made.
    #[must_use]
    pub fn auth_type(mut self, auth_type: impl Into<String>) -> Self {
        self.auth_type = Some(auth_type.into());
        self
    }

    /// Sets the username used by the `basic` scheme.
    #[must_use]
    pub fn auth_username(mut self, username: impl Into<String>) -> Self {
        self.auth_username = Some(username.into());
        self
    }

    /// Sets the password used by the `basic` scheme.
    #[must_use]
    pub fn auth_password(mut self, password: impl Into<String>) -> Self {
        self.auth_password = Some(password.into());
        self
    }

    /// Sets all auth fields from an already resolved scheme.
    #[must_use]
    pub fn auth(mut self, scheme: AuthScheme) -> Self {
        self.auth_type = scheme.tag().map(String::from);
        match scheme {
            AuthScheme::None => {
                self.auth_username = None;
                self.auth_password = None;
            }
            AuthScheme::Basic(credentials) => {
                self.auth_username = Some(credentials.username().to_string());
                self.auth_password = Some(credentials.password().to_string());
            }
        }
        self
    }

    /// Sets whether request paths get a trailing `/` appended.
    #[must_use]
    pub const fn trailing_slash(mut self, enabled: bool) -> Self {
        self.trailing_slash = Some(enabled);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `endpoint` is not set.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let endpoint = self
            .endpoint
            .ok_or(ConfigError::MissingRequiredField { field: "endpoint" })?;

        Ok(ClientConfig {
            endpoint,
            auth_type: self.auth_type,
            auth_username: self.auth_username,
            auth_password: self.auth_password,
            trailing_slash: self.trailing_slash.unwrap_or(true),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
