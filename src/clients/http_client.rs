//! HTTP transport.
//!
//! [`HttpClient`] owns the endpoint, trailing-slash policy and auth settings.
//! It composes request URLs, injects credentials, sends the request and
//! turns non-2xx responses into errors.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use reqwest::Url;
use serde_json::Value;

use crate::auth::{AuthError, AuthScheme, BasicCredentials};
use crate::clients::errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
use crate::clients::http_request::{HttpMethod, Query, RequestOptions};
use crate::clients::http_response::HttpResponse;
use crate::config::{ClientConfig, Endpoint};
use crate::error::ConfigError;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Hook for intercepting non-2xx responses.
///
/// [`HttpClient::request`] hands every failed response to the installed
/// handler. The default implementation returns the error unchanged; an
/// override may translate it into another error (usually
/// [`HttpError::Custom`]) or recover by returning a value.
///
/// # Example
///
/// ```rust
/// use rest_resource::clients::{ErrorHandler, HttpError, HttpResponseError};
/// use serde_json::Value;
///
/// #[derive(Debug)]
/// struct NotFoundIsEmpty;
///
/// impl ErrorHandler for NotFoundIsEmpty {
///     fn handle_exception(&self, error: HttpResponseError) -> Result<Option<Value>, HttpError> {
///         if error.code == 404 {
///             return Ok(None);
///         }
///         Err(error.into())
///     }
/// }
/// ```
pub trait ErrorHandler: Send + Sync + fmt::Debug {
    /// Handles a non-2xx response.
    ///
    /// # Errors
    ///
    /// The default implementation always returns `error` as
    /// [`HttpError::Response`].
    fn handle_exception(&self, error: HttpResponseError) -> Result<Option<Value>, HttpError> {
        Err(HttpError::Response(error))
    }
}

/// The default [`ErrorHandler`]: every failure reaches the caller unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct PropagateErrors;

impl ErrorHandler for PropagateErrors {}

/// Low-level HTTP client bound to one endpoint.
///
/// The client handles:
/// - URL composition (trailing slash, join against the endpoint)
/// - Auth injection from the configured scheme, unless the caller overrides it
/// - Default headers including User-Agent
/// - Turning non-2xx responses into [`HttpError::Response`]
///
/// Nothing is retried.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync` and holds no mutable state, so concurrent
/// calls through a shared reference are independent.
///
/// # Example
///
/// ```rust,ignore
/// use rest_resource::{ClientConfig, Endpoint};
/// use rest_resource::clients::{HttpClient, RequestOptions};
///
/// let config = ClientConfig::builder()
///     .endpoint(Endpoint::new("https://api.example.com/v1")?)
///     .build()?;
/// let client = HttpClient::new(&config)?;
///
/// // GET https://api.example.com/v1/users/42/
/// let user = client.get("users/42", None, RequestOptions::default()).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Endpoint, auth settings and trailing-slash policy.
    config: ClientConfig,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    /// Hook consulted for non-2xx responses.
    error_handler: Arc<dyn ErrorHandler>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// Auth settings are not rejected here; a bad scheme or missing
    /// credential is logged and then reported by the first request.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientBuild`] if the underlying reqwest
    /// client cannot be created (e.g. TLS initialization failure).
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        if let Err(e) = config.validate() {
            tracing::warn!("Client auth configuration will fail at request time: {}", e);
        }

        // Build User-Agent header
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}REST Resource Client v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .map_err(|e| ConfigError::HttpClientBuild {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            config: config.clone(),
            default_headers,
            error_handler: Arc::new(PropagateErrors),
        })
    }

    /// Replaces the handler consulted for non-2xx responses.
    #[must_use]
    pub fn with_error_handler(mut self, handler: impl ErrorHandler + 'static) -> Self {
        self.error_handler = Arc::new(handler);
        self
    }

    /// Returns the base endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        self.config.endpoint()
    }

    /// Returns whether request paths get a trailing `/` appended.
    #[must_use]
    pub const fn trailing_slash(&self) -> bool {
        self.config.trailing_slash()
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Resolves a request URL against the endpoint.
    ///
    /// Applies the trailing-slash policy first, then standard URL-join
    /// rules: relative paths are appended, `/`-rooted paths replace the
    /// endpoint path, absolute URLs replace everything.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::InvalidUrl`] if the join fails.
    pub fn resolve_url(&self, url: &str) -> Result<Url, HttpError> {
        let url = if self.config.trailing_slash() {
            with_trailing_slash(url)
        } else {
            Cow::Borrowed(url)
        };

        self.config.endpoint().join(&url).map_err(|reason| {
            HttpError::InvalidRequest(InvalidHttpRequestError::InvalidUrl {
                url: url.into_owned(),
                reason,
            })
        })
    }

    /// Picks the credentials to send with a request.
    ///
    /// The configured scheme is always resolved, so a bad scheme fails even
    /// when the caller supplies credentials. Caller credentials win over
    /// scheme-derived ones.
    fn credentials_for(
        &self,
        options: &RequestOptions,
    ) -> Result<Option<BasicCredentials>, AuthError> {
        let scheme = self.config.auth_scheme()?;
        let explicit = options.auth.clone();

        Ok(match scheme {
            AuthScheme::None => explicit,
            AuthScheme::Basic(configured) => explicit.or(Some(configured)),
        })
    }

    /// Sends a request and returns the parsed JSON body.
    ///
    /// Returns `Ok(None)` when the response body is empty.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - The auth scheme is unknown or lacks credentials (`Auth`), before any network call
    /// - The URL cannot be resolved (`InvalidRequest`)
    /// - The transport fails (`Network`)
    /// - The response is 4xx/5xx (`Response`, or whatever the installed
    ///   [`ErrorHandler`] returns)
    /// - A non-empty body of any other status is not valid JSON (`Json`)
    pub async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        options: RequestOptions,
    ) -> Result<Option<Value>, HttpError> {
        let (resolved, response) = self.execute(method, url, options).await?;

        if response.is_error() {
            tracing::warn!(
                "Request {} {} failed with status {}",
                method,
                resolved,
                response.code
            );
            let error = Self::response_error(method, &resolved, response);
            return self.error_handler.handle_exception(error);
        }

        Ok(response.json()?)
    }

    /// Sends a request and returns the raw response.
    ///
    /// Useful when response headers are needed. 4xx/5xx responses are
    /// returned as [`HttpError::Response`] without consulting the
    /// [`ErrorHandler`].
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request), except that no decoding happens.
    pub async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        options: RequestOptions,
    ) -> Result<HttpResponse, HttpError> {
        let (resolved, response) = self.execute(method, url, options).await?;

        if response.is_error() {
            return Err(Self::response_error(method, &resolved, response).into());
        }

        Ok(response)
    }

    /// Sends a GET request. `query`, when `Some`, replaces `options.query`.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn get(
        &self,
        url: &str,
        query: Option<Query>,
        mut options: RequestOptions,
    ) -> Result<Option<Value>, HttpError> {
        if query.is_some() {
            options.query = query;
        }
        self.request(HttpMethod::Get, url, options).await
    }

    /// Sends a POST request. `json`, when `Some`, replaces `options.json`.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn post(
        &self,
        url: &str,
        json: Option<Value>,
        options: RequestOptions,
    ) -> Result<Option<Value>, HttpError> {
        self.request(HttpMethod::Post, url, with_json(options, json))
            .await
    }

    /// Sends a PUT request. `json`, when `Some`, replaces `options.json`.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn put(
        &self,
        url: &str,
        json: Option<Value>,
        options: RequestOptions,
    ) -> Result<Option<Value>, HttpError> {
        self.request(HttpMethod::Put, url, with_json(options, json))
            .await
    }

    /// Sends a PATCH request. `json`, when `Some`, replaces `options.json`.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn patch(
        &self,
        url: &str,
        json: Option<Value>,
        options: RequestOptions,
    ) -> Result<Option<Value>, HttpError> {
        self.request(HttpMethod::Patch, url, with_json(options, json))
            .await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn delete(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> Result<Option<Value>, HttpError> {
        self.request(HttpMethod::Delete, url, options).await
    }

    /// Resolves, authenticates and sends a request without checking status.
    async fn execute(
        &self,
        method: HttpMethod,
        url: &str,
        options: RequestOptions,
    ) -> Result<(Url, HttpResponse), HttpError> {
        let resolved = self.resolve_url(url)?;
        let credentials = self.credentials_for(&options)?;

        let headers = merge_headers(&self.default_headers, options.headers);

        let mut req_builder = self.client.request(method.as_reqwest(), resolved.clone());

        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(query) = &options.query {
            req_builder = req_builder.query(query);
        }

        if let Some(body) = &options.json {
            req_builder = req_builder.json(body);
        }

        if let Some(credentials) = &credentials {
            req_builder =
                req_builder.basic_auth(credentials.username(), Some(credentials.password()));
        }

        if let Some(timeout) = options.timeout {
            req_builder = req_builder.timeout(timeout);
        }

        tracing::debug!("Sending {} {}", method, resolved);

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body = res.text().await?;

        tracing::debug!("Received status {} for {} {}", code, method, resolved);

        Ok((resolved, HttpResponse::new(code, res_headers, body)))
    }

    /// Builds the error for a non-2xx response.
    fn response_error(method: HttpMethod, url: &Url, response: HttpResponse) -> HttpResponseError {
        let error_reference = response.request_id().map(String::from);
        HttpResponseError {
            code: response.code,
            method,
            url: url.to_string(),
            body: response.body,
            error_reference,
        }
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

/// Appends `/` to the path part of `url` unless it already ends with one.
///
/// Any query string or fragment stays after the slash. Empty paths are left
/// alone so that `""` still resolves to the endpoint itself.
fn with_trailing_slash(url: &str) -> Cow<'_, str> {
    let split = url.find(['?', '#']).unwrap_or(url.len());
    let (path, rest) = url.split_at(split);

    if path.is_empty() || path.ends_with('/') {
        Cow::Borrowed(url)
    } else {
        Cow::Owned(format!("{path}/{rest}"))
    }
}

/// Merges per-request headers over the defaults.
///
/// Names are lower-cased first so an override replaces the default
/// regardless of the case it was written in.
fn merge_headers(
    defaults: &HashMap<String, String>,
    extra: Option<HashMap<String, String>>,
) -> HashMap<String, String> {
    let mut merged: HashMap<String, String> = defaults
        .iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), value.clone()))
        .collect();
    if let Some(extra) = extra {
        merged.extend(
            extra
                .into_iter()
                .map(|(name, value)| (name.to_ascii_lowercase(), value)),
        );
    }
    merged
}

fn with_json(mut options: RequestOptions, json: Option<Value>) -> RequestOptions {
    if json.is_some() {
        options.json = json;
    }
    options
}
