//! The [`RestResource`] trait.
//!
//! A resource binds one collection path to a shared [`ApiClient`] and exposes
//! the CRUD vocabulary without the path argument. Every provided method is a
//! straight forward to the matching [`ApiClient`] call with [`RestResource::PATH`].
//!
//! # Implementing a Resource
//!
//! 1. Define a struct holding an `Arc<ApiClient>`
//! 2. Implement `RestResource`, setting `PATH` and returning the client
//! 3. Add domain-specific helpers on top of [`action`](RestResource::action)
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use rest_resource::{ApiClient, HttpError, HttpMethod, RequestOptions, RestResource};
//! use serde_json::Value;
//!
//! pub struct Users {
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
//! impl Users {
//!     pub async fn activate(&self, id: u64) -> Result<Option<Value>, HttpError> {
//!         self.action(HttpMethod::Post, "activate", Some(&id), RequestOptions::default())
//!             .await
//!     }
//! }
//!
//! // GET users/42/
//! let user = users.retrieve(42, RequestOptions::default()).await?;
//! ```

use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;

use crate::clients::{serialize_to_query, ApiClient, HttpError, HttpMethod, Query, RequestOptions};

/// A collection of entities at a fixed path under the client's endpoint.
///
/// Implementors supply [`PATH`](Self::PATH) and the shared [`ApiClient`];
/// all operations are provided.
///
/// # Thread Safety
///
/// Implementors usually hold an `Arc<ApiClient>`, so several resources can
/// share one client and be used from different tasks.
#[allow(async_fn_in_trait)]
pub trait RestResource {
    /// The collection path relative to the endpoint (e.g. `"users"`).
    const PATH: &'static str;

    /// Returns the client every request goes through.
    fn api_client(&self) -> &ApiClient;

    /// Lists the collection. `None` sends no query parameters.
    ///
    /// # Errors
    ///
    /// Propagates [`HttpError`] from the client unchanged.
    async fn list(
        &self,
        params: Option<Query>,
        options: RequestOptions,
    ) -> Result<Option<Value>, HttpError> {
        self.api_client()
            .list(Self::PATH, params.unwrap_or_default(), options)
            .await
    }

    /// Lists the collection with query parameters taken from a serializable
    /// struct.
    ///
    /// `None` fields are skipped and arrays are sent comma-separated.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Json`] if `params` cannot be serialized, otherwise
    /// propagates [`HttpError`] from the client.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// #[derive(Serialize)]
    /// struct UserFilter {
    ///     active: bool,
    ///     #[serde(skip_serializing_if = "Option::is_none")]
    ///     team: Option<String>,
    ///     ids: Vec<u64>,
    /// }
    ///
    /// // GET users/?active=true&ids=1,2
    /// let filter = UserFilter { active: true, team: None, ids: vec![1, 2] };
    /// users.list_with(&filter, RequestOptions::default()).await?;
    /// ```
    async fn list_with<P: Serialize>(
        &self,
        params: &P,
        options: RequestOptions,
    ) -> Result<Option<Value>, HttpError> {
        let query = serialize_to_query(params)?;
        self.api_client().list(Self::PATH, query, options).await
    }

    /// Retrieves the entity `key`.
    ///
    /// # Errors
    ///
    /// Propagates [`HttpError`] from the client unchanged.
    async fn retrieve(
        &self,
        key: impl Display,
        options: RequestOptions,
    ) -> Result<Option<Value>, HttpError> {
        self.api_client().retrieve(Self::PATH, key, options).await
    }

    /// Creates an entity in the collection.
    ///
    /// # Errors
    ///
    /// Propagates [`HttpError`] from the client unchanged.
    async fn create(
        &self,
        body: Value,
        options: RequestOptions,
    ) -> Result<Option<Value>, HttpError> {
        self.api_client().create(Self::PATH, body, options).await
    }

    /// Replaces the entity `key`.
    ///
    /// # Errors
    ///
    /// Propagates [`HttpError`] from the client unchanged.
    async fn update(
        &self,
        key: impl Display,
        body: Value,
        options: RequestOptions,
    ) -> Result<Option<Value>, HttpError> {
        self.api_client()
            .update(Self::PATH, key, body, options)
            .await
    }

    /// Partially updates the entity `key`.
    ///
    /// # Errors
    ///
    /// Propagates [`HttpError`] from the client unchanged.
    async fn partial_update(
        &self,
        key: impl Display,
        body: Value,
        options: RequestOptions,
    ) -> Result<Option<Value>, HttpError> {
        self.api_client()
            .partial_update(Self::PATH, key, body, options)
            .await
    }

    /// Deletes the entity `key`.
    ///
    /// # Errors
    ///
    /// Propagates [`HttpError`] from the client unchanged.
    async fn destroy(
        &self,
        key: impl Display,
        options: RequestOptions,
    ) -> Result<Option<Value>, HttpError> {
        self.api_client().destroy(Self::PATH, key, options).await
    }

    /// Calls `sub_path` on the collection, or on entity `key` when given.
    ///
    /// # Errors
    ///
    /// Propagates [`HttpError`] from the client unchanged.
    async fn action(
        &self,
        method: HttpMethod,
        sub_path: &str,
        key: Option<&(dyn Display + Sync)>,
        options: RequestOptions,
    ) -> Result<Option<Value>, HttpError> {
        self.api_client()
            .request(method, Self::PATH, sub_path, key, options)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClientConfig, Endpoint};
    use std::sync::Arc;

    struct Users {
        api: Arc<ApiClient>,
    }

    impl RestResource for Users {
        const PATH: &'static str = "users";

        fn api_client(&self) -> &ApiClient {
            &self.api
        }
    }

    struct Groups {
        api: Arc<ApiClient>,
    }

    impl RestResource for Groups {
        const PATH: &'static str = "groups";

        fn api_client(&self) -> &ApiClient {
            &self.api
        }
    }

    fn shared_client() -> Arc<ApiClient> {
        let config = ClientConfig::builder()
            .endpoint(Endpoint::new("https://api.example.com/v1").unwrap())
            .build()
            .unwrap();
        Arc::new(ApiClient::new(&config).unwrap())
    }

    #[test]
    fn test_resources_share_one_client() {
        let api = shared_client();
        let users = Users { api: Arc::clone(&api) };
        let groups = Groups { api: Arc::clone(&api) };

        assert!(std::ptr::eq(users.api_client(), groups.api_client()));
        assert_eq!(Users::PATH, "users");
        assert_eq!(Groups::PATH, "groups");
    }

    #[tokio::test]
    async fn test_list_with_rejects_unserializable_params() {
        struct Broken;

        impl Serialize for Broken {
            fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("cannot serialize"))
            }
        }

        let users = Users {
            api: shared_client(),
        };
        let result = users.list_with(&Broken, RequestOptions::default()).await;

        assert!(matches!(result, Err(HttpError::Json(_))));
    }
}
