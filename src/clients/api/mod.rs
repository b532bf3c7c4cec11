//! Path-oriented CRUD client built on the [`HttpClient`](crate::clients::HttpClient).
//!
//! [`ApiClient`] turns a resource path and an optional key into a URL and
//! delegates to the transport with the matching verb. Errors from the
//! transport are returned unchanged.
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_resource::{ApiClient, ClientConfig, Endpoint};
//! use rest_resource::clients::RequestOptions;
//! use serde_json::json;
//!
//! let config = ClientConfig::builder()
//!     .endpoint(Endpoint::new("https://api.example.com/v1")?)
//!     .build()?;
//! let api = ApiClient::new(&config)?;
//!
//! // POST https://api.example.com/v1/users/
//! let created = api.create("users", json!({"name": "a"}), RequestOptions::default()).await?;
//!
//! // DELETE https://api.example.com/v1/users/1/
//! api.destroy("users", 1, RequestOptions::default()).await?;
//! ```

mod client;

pub use client::ApiClient;
