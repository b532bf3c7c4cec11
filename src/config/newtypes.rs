//! Validated newtype wrappers for configuration values.
//!
//! Values are validated on construction; invalid input is rejected with a
//! [`ConfigError`] that names the offending value.

use crate::error::ConfigError;
use reqwest::Url;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated base endpoint that every request URL is resolved against.
///
/// The endpoint must be an absolute `http` or `https` URL with a host. Its
/// path is normalized to end with `/`, so relative request paths are
/// appended below it instead of replacing its last segment.
///
/// # Serialization
///
/// `Endpoint` serializes to and deserializes from its normalized string:
///
/// ```rust
/// use rest_resource::Endpoint;
///
/// let endpoint = Endpoint::new("https://api.example.com/v1").unwrap();
/// let json = serde_json::to_string(&endpoint).unwrap();
/// assert_eq!(json, r#""https://api.example.com/v1/""#);
/// ```
///
/// # Example
///
/// ```rust
/// use rest_resource::Endpoint;
///
/// let endpoint = Endpoint::new("https://api.example.com/v1").unwrap();
/// assert_eq!(endpoint.as_ref(), "https://api.example.com/v1/");
/// assert_eq!(endpoint.join("users/42/").unwrap().as_str(), "https://api.example.com/v1/users/42/");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint(Url);

impl Endpoint {
    /// Creates a new validated endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpoint`] if the URL cannot be parsed,
    /// is not `http`/`https`, or has no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim();

        let invalid = |reason: &str| ConfigError::InvalidEndpoint {
            url: url.to_string(),
            reason: reason.to_string(),
        };

        let mut parsed = Url::parse(url).map_err(|e| invalid(&e.to_string()))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        if parsed.cannot_be_a_base() || parsed.host_str().is_none() {
            return Err(invalid("missing host"));
        }

        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }
        parsed.set_fragment(None);

        Ok(Self(parsed))
    }

    /// Resolves `path` against this endpoint using standard URL-join rules.
    ///
    /// Relative paths are appended below the endpoint path, paths starting
    /// with `/` replace it, and absolute URLs replace the endpoint entirely.
    ///
    /// # Errors
    ///
    /// Returns a description of the parse failure if `path` cannot be joined.
    pub fn join(&self, path: &str) -> Result<Url, String> {
        self.0.join(path).map_err(|e| e.to_string())
    }
}

impl AsRef<str> for Endpoint {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl Serialize for Endpoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for Endpoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}
