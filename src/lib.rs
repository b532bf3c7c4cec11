//! # REST Resource Client
//!
//! A reusable client layer for HTTP/JSON APIs. Give it a base endpoint and an
//! authentication scheme, describe each collection once as a resource, and get
//! uniform CRUD operations: list, retrieve, create, update, partial update,
//! destroy, and arbitrary sub-actions.
//!
//! ## Overview
//!
//! The crate is built in three layers, each depending only on the one below:
//! - [`HttpClient`]: URL composition, auth injection, status handling
//! - [`ApiClient`]: path/key oriented CRUD verbs over an [`HttpClient`]
//! - [`RestResource`]: a collection path bound to a shared [`ApiClient`]
//!
//! Errors flow back up unchanged. The only place they can be rewritten is
//! [`ErrorHandler::handle_exception`].
//!
//! ## Quick Start
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
//! assert!(config.validate().is_ok());
//! ```
//!
//! ## Resources
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use rest_resource::{ApiClient, RequestOptions, RestResource};
//! use serde_json::json;
//!
//! struct Users {
//!     api: Arc<ApiClient>,
//! }
//!
//! impl RestResource for Users {
//!     const PATH: &'static str = "users";
//!
//!     fn api_client(&self) -> &ApiClient {
//!         &self.api
//!     }
//! }
//!
//! let api = Arc::new(ApiClient::new(&config)?);
//! let users = Users { api: Arc::clone(&api) };
//!
//! // GET https://api.example.com/v1/users/42/
//! let user = users.retrieve(42, RequestOptions::default()).await?;
//!
//! // POST https://api.example.com/v1/users/
//! let created = users.create(json!({"name": "a"}), RequestOptions::default()).await?;
//! ```
//!
//! ## Failure Behavior
//!
//! - An unknown auth scheme or a missing credential fails the call with
//!   [`AuthError`] before any network traffic
//! - A 4xx/5xx response becomes [`HttpResponseError`]; nothing is retried
//! - An empty response body is `Ok(None)`, distinct from an empty JSON object

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use auth::{AuthError, AuthScheme, BasicCredentials};
pub use config::{ClientConfig, ClientConfigBuilder, Endpoint};
pub use error::ConfigError;

// Re-export client types
pub use clients::{
    ApiClient, ErrorHandler, HttpClient, HttpError, HttpMethod, HttpResponse, HttpResponseError,
    InvalidHttpRequestError, PropagateErrors, Query, RequestOptions,
};

pub use rest::RestResource;
