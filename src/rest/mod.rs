//! Resource layer.
//!
//! Typed clients for a service are built by implementing [`RestResource`]
//! once per collection over a shared [`ApiClient`](crate::clients::ApiClient).
//! See the [`resource`] module for a full example.

pub mod resource;

pub use resource::RestResource;
