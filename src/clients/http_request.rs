//! HTTP request types.
//!
//! [`HttpMethod`] names the verb; [`RequestOptions`] carries the per-call
//! overrides (query, JSON body, headers, auth, timeout) that every client
//! layer passes down unchanged.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::auth::BasicCredentials;
use crate::clients::errors::InvalidHttpRequestError;

/// Query parameters sent with a request.
pub type Query = HashMap<String, String>;

/// HTTP methods supported by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for replacing resources.
    Put,
    /// HTTP PATCH method for partially updating resources.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    pub(crate) fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Patch => write!(f, "patch"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

impl FromStr for HttpMethod {
    type Err = InvalidHttpRequestError;

    /// Parses a method name case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "post" => Ok(Self::Post),
            "put" => Ok(Self::Put),
            "patch" => Ok(Self::Patch),
            "delete" => Ok(Self::Delete),
            _ => Err(InvalidHttpRequestError::InvalidMethod {
                method: s.to_string(),
            }),
        }
    }
}

/// Per-request overrides.
///
/// Built fresh for every call and consumed by it. Any field left as `None`
/// falls back to the client's configuration.
///
/// # Example
///
/// ```rust
/// use rest_resource::clients::RequestOptions;
/// use std::time::Duration;
///
/// let options = RequestOptions::new()
///     .query_param("page", "2")
///     .header("X-Trace", "abc")
///     .timeout(Duration::from_secs(5));
///
/// assert_eq!(options.query.unwrap().get("page"), Some(&"2".to_string()));
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    /// Query parameters to append to the URL.
    pub query: Option<Query>,
    /// JSON request body.
    pub json: Option<Value>,
    /// Additional headers to include in the request.
    pub headers: Option<HashMap<String, String>>,
    /// Explicit credentials. When set, they win over the configured scheme.
    pub auth: Option<BasicCredentials>,
    /// Timeout for this request only.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets all query parameters at once.
    #[must_use]
    pub fn query(mut self, query: Query) -> Self {
        self.query = Some(query);
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn json(mut self, body: impl Into<Value>) -> Self {
        self.json = Some(body.into());
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets explicit Basic credentials for this request.
    #[must_use]
    pub fn auth(mut self, credentials: BasicCredentials) -> Self {
        self.auth = Some(credentials);
        self
    }

    /// Sets the timeout for this request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Serializes a params struct to a query parameter map.
///
/// Nulls are skipped, arrays of scalars become comma-separated values and
/// nested objects are JSON-encoded.
///
/// # Errors
///
/// Returns the serde error if `params` cannot be represented as JSON.
pub fn serialize_to_query<T: Serialize>(params: &T) -> Result<Query, serde_json::Error> {
    let value = serde_json::to_value(params)?;

    let mut query = HashMap::new();

    if let Value::Object(map) = value {
        for (key, val) in map {
            match val {
                Value::Null => {}
                Value::String(s) => {
                    query.insert(key, s);
                }
                Value::Number(n) => {
                    query.insert(key, n.to_string());
                }
                Value::Bool(b) => {
                    query.insert(key, b.to_string());
                }
                Value::Array(arr) => {
                    let values: Vec<String> = arr
                        .iter()
                        .filter_map(|v| match v {
                            Value::String(s) => Some(s.clone()),
                            Value::Number(n) => Some(n.to_string()),
                            Value::Bool(b) => Some(b.to_string()),
                            _ => None,
                        })
                        .collect();
                    if !values.is_empty() {
                        query.insert(key, values.join(","));
                    }
                }
                Value::Object(_) => {
                    query.insert(key, val.to_string());
                }
            }
        }
    }

    Ok(query)
}
