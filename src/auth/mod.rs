//! Authentication schemes and credential resolution.
//!
//! Configuration names the scheme with a string tag (`auth_type`) and carries
//! the credential fields alongside it. [`AuthScheme::resolve`] turns those
//! loose settings into a closed enum, failing with an [`AuthError`] when the
//! tag is unknown or a required field is missing.
//!
//! # Example
//!
//! ```rust
//! use rest_resource::auth::{AuthError, AuthScheme};
//!
//! let scheme = AuthScheme::resolve(Some("basic"), Some("alice"), Some("s3cret")).unwrap();
//! assert!(matches!(scheme, AuthScheme::Basic(_)));
//!
//! let err = AuthScheme::resolve(Some("oauth2"), None, None).unwrap_err();
//! assert!(matches!(err, AuthError::InvalidAuthScheme { .. }));
//! ```

use std::fmt;

use thiserror::Error;

/// Scheme tag for HTTP Basic authentication.
pub const BASIC: &str = "basic";

/// Explicit scheme tag for no authentication.
pub const NONE: &str = "none";

/// Errors produced while resolving the configured authentication scheme.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The configured `auth_type` is not a recognized scheme.
    #[error("Invalid auth scheme '{scheme}'. Supported schemes: none, basic.")]
    InvalidAuthScheme {
        /// The scheme tag that was configured.
        scheme: String,
    },

    /// A credential field required by the configured scheme is absent.
    #[error("Auth scheme '{scheme}' requires '{field}' to be configured.")]
    MissingCredentials {
        /// The scheme that needs the field.
        scheme: &'static str,
        /// The configuration field that is missing.
        field: &'static str,
    },
}

/// Username and password for HTTP Basic authentication.
///
/// The password is masked in `Debug` output.
///
/// ```rust
/// use rest_resource::auth::BasicCredentials;
///
/// let creds = BasicCredentials::new("alice", "s3cret");
/// assert!(!format!("{creds:?}").contains("s3cret"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    username: String,
    password: String,
}

impl BasicCredentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"*****")
            .finish()
    }
}

/// A resolved authentication scheme.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthScheme {
    /// Requests are sent without credentials.
    #[default]
    None,
    /// Requests carry HTTP Basic credentials.
    Basic(BasicCredentials),
}

impl AuthScheme {
    /// Resolves loose configuration settings into a scheme.
    ///
    /// A missing `auth_type` or the tag `none` means no authentication.
    /// Tags are matched case-insensitively after trimming whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidAuthScheme`] for an unknown tag and
    /// [`AuthError::MissingCredentials`] if `basic` lacks a username or
    /// password.
    pub fn resolve(
        auth_type: Option<&str>,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, AuthError> {
        let Some(tag) = auth_type else {
            return Ok(Self::None);
        };

        let tag = tag.trim();

        if tag.eq_ignore_ascii_case(NONE) {
            return Ok(Self::None);
        }

        if tag.eq_ignore_ascii_case(BASIC) {
            let username = username.ok_or(AuthError::MissingCredentials {
                scheme: BASIC,
                field: "auth_username",
            })?;
            let password = password.ok_or(AuthError::MissingCredentials {
                scheme: BASIC,
                field: "auth_password",
            })?;
            return Ok(Self::Basic(BasicCredentials::new(username, password)));
        }

        Err(AuthError::InvalidAuthScheme {
            scheme: tag.to_string(),
        })
    }

    /// Returns the configuration tag for this scheme, `None` for no auth.
    #[must_use]
    pub const fn tag(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Basic(_) => Some(BASIC),
        }
    }
}
