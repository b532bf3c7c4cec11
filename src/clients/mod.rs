//! HTTP client layers.
//!
//! This module provides the transport and the CRUD client built on it.
//!
//! # Overview
//!
//! - [`HttpClient`]: the async transport bound to one endpoint
//! - [`RequestOptions`]: per-request overrides (query, JSON body, headers, auth, timeout)
//! - [`HttpResponse`]: a raw response from the server
//! - [`HttpMethod`]: supported HTTP methods (GET, POST, PUT, PATCH, DELETE)
//! - [`ErrorHandler`]: hook for intercepting non-2xx responses
//! - [`api::ApiClient`]: path/key oriented CRUD verbs over an [`HttpClient`]
//! - [`HttpError`]: unified error type for every layer
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_resource::{ClientConfig, Endpoint};
//! use rest_resource::clients::{HttpClient, HttpMethod, RequestOptions};
//!
//! let config = ClientConfig::builder()
//!     .endpoint(Endpoint::new("https://api.example.com/v1")?)
//!     .auth_type("basic")
//!     .auth_username("alice")
//!     .auth_password("s3cret")
//!     .build()?;
//!
//! let client = HttpClient::new(&config)?;
//! let body = client.request(HttpMethod::Get, "users", RequestOptions::default()).await?;
//! ```
//!
//! # Failure Behavior
//!
//! Non-2xx responses become [`HttpError::Response`] and are never retried.
//! An unknown auth scheme or missing credential fails the call before any
//! network traffic.

pub mod api;
mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{ErrorHandler, HttpClient, PropagateErrors, SDK_VERSION};
pub use http_request::{serialize_to_query, HttpMethod, Query, RequestOptions};
pub use http_response::HttpResponse;

// Re-export the CRUD client at the clients module level
pub use api::ApiClient;
