//! Path-oriented CRUD client.
//!
//! [`ApiClient`] maps resource paths and keys onto the verbs of its
//! [`HttpClient`]. It adds no state and no error handling of its own.

use std::fmt::Display;

use serde_json::Value;

use crate::clients::{HttpClient, HttpError, HttpMethod, Query, RequestOptions};
use crate::config::ClientConfig;
use crate::error::ConfigError;

/// CRUD client over a single [`HttpClient`].
///
/// | Operation | URL | Verb |
/// |---|---|---|
/// | [`list`](Self::list) | `path` | GET with query |
/// | [`retrieve`](Self::retrieve) | `path/key` | GET |
/// | [`create`](Self::create) | `path` | POST |
/// | [`update`](Self::update) | `path/key` | PUT |
/// | [`partial_update`](Self::partial_update) | `path/key` | PATCH |
/// | [`destroy`](Self::destroy) | `path/key` | DELETE |
/// | [`request`](Self::request) | `path/key/sub_path` | any |
///
/// Keys are stringified, so numeric and string identifiers behave the same.
/// Segments are joined with `/` and not escaped; callers supply URL-safe
/// components.
///
/// # Thread Safety
///
/// `ApiClient` is `Send + Sync`; wrap it in an `Arc` to share it between
/// resources.
///
/// # Example
///
/// ```rust,ignore
/// use rest_resource::{ApiClient, ClientConfig, Endpoint};
/// use rest_resource::clients::RequestOptions;
///
/// let config = ClientConfig::builder()
///     .endpoint(Endpoint::new("https://api.example.com/v1")?)
///     .build()?;
/// let api = ApiClient::new(&config)?;
///
/// // GET https://api.example.com/v1/users/42/
/// let user = api.retrieve("users", 42, RequestOptions::default()).await?;
/// ```
#[derive(Debug)]
pub struct ApiClient {
    /// The transport all requests go through.
    http_client: HttpClient,
}

// Verify ApiClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiClient>();
};

impl ApiClient {
    /// Creates a client with a default [`HttpClient`] for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the transport cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_http_client(HttpClient::new(config)?))
    }

    /// Creates a client over an existing transport, e.g. one with a custom
    /// [`ErrorHandler`](crate::clients::ErrorHandler).
    #[must_use]
    pub const fn from_http_client(http_client: HttpClient) -> Self {
        Self { http_client }
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Lists the collection at `path`, sending `params` as the query string.
    ///
    /// `params` is merged over any query already set in `options`; on a
    /// shared key the value from `params` is sent.
    ///
    /// # Errors
    ///
    /// Propagates [`HttpError`] from the transport unchanged.
    pub async fn list(
        &self,
        path: &str,
        params: Query,
        mut options: RequestOptions,
    ) -> Result<Option<Value>, HttpError> {
        let mut query = options.query.take().unwrap_or_default();
        query.extend(params);
        self.http_client.get(path, Some(query), options).await
    }

    /// Retrieves the entity `key` under `path`.
    ///
    /// # Errors
    ///
    /// Propagates [`HttpError`] from the transport unchanged.
    pub async fn retrieve(
        &self,
        path: &str,
        key: impl Display,
        options: RequestOptions,
    ) -> Result<Option<Value>, HttpError> {
        let url = entity_path(path, &key);
        self.http_client.get(&url, None, options).await
    }

    /// Creates an entity in the collection at `path`.
    ///
    /// # Errors
    ///
    /// Propagates [`HttpError`] from the transport unchanged.
    pub async fn create(
        &self,
        path: &str,
        body: Value,
        options: RequestOptions,
    ) -> Result<Option<Value>, HttpError> {
        self.http_client.post(path, Some(body), options).await
    }

    /// Replaces the entity `key` under `path`.
    ///
    /// # Errors
    ///
    /// Propagates [`HttpError`] from the transport unchanged.
    pub async fn update(
        &self,
        path: &str,
        key: impl Display,
        body: Value,
        options: RequestOptions,
    ) -> Result<Option<Value>, HttpError> {
        let url = entity_path(path, &key);
        self.http_client.put(&url, Some(body), options).await
    }

    /// Partially updates the entity `key` under `path`.
    ///
    /// # Errors
    ///
    /// Propagates [`HttpError`] from the transport unchanged.
    pub async fn partial_update(
        &self,
        path: &str,
        key: impl Display,
        body: Value,
        options: RequestOptions,
    ) -> Result<Option<Value>, HttpError> {
        let url = entity_path(path, &key);
        self.http_client.patch(&url, Some(body), options).await
    }

    /// Deletes the entity `key` under `path`.
    ///
    /// # Errors
    ///
    /// Propagates [`HttpError`] from the transport unchanged.
    pub async fn destroy(
        &self,
        path: &str,
        key: impl Display,
        options: RequestOptions,
    ) -> Result<Option<Value>, HttpError> {
        let url = entity_path(path, &key);
        self.http_client.delete(&url, options).await
    }

    /// Calls a sub-action on a collection or entity.
    ///
    /// The URL is `path/key/sub_path`, or `path/sub_path` when `key` is
    /// `None`. A missing key drops its segment rather than leaving an empty
    /// one, so collection actions never produce `path//sub_path`.
    ///
    /// # Errors
    ///
    /// Propagates [`HttpError`] from the transport unchanged.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// // POST users/42/activate/
    /// api.request(HttpMethod::Post, "users", "activate", Some(&42), RequestOptions::default()).await?;
    ///
    /// // GET users/search/?q=ann
    /// let options = RequestOptions::new().query_param("q", "ann");
    /// api.request(HttpMethod::Get, "users", "search", None, options).await?;
    /// ```
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        sub_path: &str,
        key: Option<&(dyn Display + Sync)>,
        options: RequestOptions,
    ) -> Result<Option<Value>, HttpError> {
        let url = action_path(path, sub_path, key);
        self.http_client.request(method, &url, options).await
    }
}

/// Joins `path` and a stringified `key` with a single `/`.
pub(crate) fn entity_path(path: &str, key: &dyn Display) -> String {
    format!("{path}/{key}")
}

/// Joins `path`, an optional key and `sub_path` with single `/` separators.
pub(crate) fn action_path(
    path: &str,
    sub_path: &str,
    key: Option<&(dyn Display + Sync)>,
) -> String {
    match key {
        Some(key) => format!("{path}/{key}/{sub_path}"),
        None => format!("{path}/{sub_path}"),
    }
}
