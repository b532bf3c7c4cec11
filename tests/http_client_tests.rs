//! Integration tests for the HTTP transport.
//!
//! These tests run the client against a wiremock server and verify URL
//! composition, auth injection, status handling and body decoding.

mod common;

use std::time::Duration;

use rest_resource::clients::{ErrorHandler, HttpResponseError};
use rest_resource::{AuthError, BasicCredentials, HttpError, HttpMethod, RequestOptions};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// URL Composition
// ============================================================================

#[tokio::test]
async fn test_relative_path_gets_trailing_slash() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users/42/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 42})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::http_client(&common::config_builder(&mock_server).build().unwrap());
    let body = client
        .get("users/42", None, RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(body, Some(json!({"id": 42})));
}

#[tokio::test]
async fn test_trailing_slash_disabled_sends_path_as_is() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 42})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = common::config_builder(&mock_server)
        .trailing_slash(false)
        .build()
        .unwrap();
    let client = common::http_client(&config);

    client
        .get("users/42", None, RequestOptions::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_absolute_path_replaces_endpoint_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::http_client(&common::config_builder(&mock_server).build().unwrap());
    let body = client
        .get("/health", None, RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(body, Some(json!({"ok": true})));
}

#[tokio::test]
async fn test_query_parameters_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users/"))
        .and(query_param("active", "true"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::http_client(&common::config_builder(&mock_server).build().unwrap());
    let options = RequestOptions::new()
        .query_param("active", "true")
        .query_param("page", "2");

    let body = client.get("users", None, options).await.unwrap();

    assert_eq!(body, Some(json!([])));
}

// ============================================================================
// Auth Injection
// ============================================================================

#[tokio::test]
async fn test_basic_auth_header_is_injected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users/"))
        .and(header(
            "authorization",
            common::basic_header(common::USERNAME, common::PASSWORD).as_str(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::http_client(&common::basic_config(&mock_server));
    client
        .get("users", None, RequestOptions::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_caller_supplied_auth_wins() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users/"))
        .and(header("authorization", common::basic_header("bob", "pw").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::http_client(&common::basic_config(&mock_server));
    let options = RequestOptions::new().auth(BasicCredentials::new("bob", "pw"));

    client.get("users", None, options).await.unwrap();
}

#[tokio::test]
async fn test_no_auth_scheme_sends_no_authorization_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::http_client(&common::config_builder(&mock_server).build().unwrap());
    client
        .get("users", None, RequestOptions::default())
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_unknown_auth_scheme_fails_without_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = common::config_builder(&mock_server)
        .auth_type("oauth2")
        .build()
        .unwrap();
    let client = common::http_client(&config);

    let result = client.get("users", None, RequestOptions::default()).await;

    assert!(matches!(
        result,
        Err(HttpError::Auth(AuthError::InvalidAuthScheme { ref scheme })) if scheme == "oauth2"
    ));
}

#[tokio::test]
async fn test_unknown_auth_scheme_fails_even_with_caller_auth() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = common::config_builder(&mock_server)
        .auth_type("digest")
        .build()
        .unwrap();
    let client = common::http_client(&config);
    let options = RequestOptions::new().auth(BasicCredentials::new("bob", "pw"));

    let result = client.get("users", None, options).await;

    assert!(matches!(
        result,
        Err(HttpError::Auth(AuthError::InvalidAuthScheme { .. }))
    ));
}

#[tokio::test]
async fn test_missing_password_fails_without_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = common::config_builder(&mock_server)
        .auth_type("basic")
        .auth_username(common::USERNAME)
        .build()
        .unwrap();
    let client = common::http_client(&config);

    let result = client.get("users", None, RequestOptions::default()).await;

    assert!(matches!(
        result,
        Err(HttpError::Auth(AuthError::MissingCredentials {
            field: "auth_password",
            ..
        }))
    ));
}

// ============================================================================
// Status Handling and Decoding
// ============================================================================

#[tokio::test]
async fn test_not_found_is_returned_without_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users/999/"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_string(r#"{"detail":"Not found."}"#)
                .insert_header("X-Request-Id", "req-123"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::http_client(&common::config_builder(&mock_server).build().unwrap());
    let result = client
        .get("users/999", None, RequestOptions::default())
        .await;

    match result {
        Err(HttpError::Response(error)) => {
            assert_eq!(error.code, 404);
            assert_eq!(error.method, HttpMethod::Get);
            assert!(error.url.ends_with("/v1/users/999/"));
            assert_eq!(error.json_body().unwrap()["detail"], "Not found.");
            assert_eq!(error.error_reference.as_deref(), Some("req-123"));
        }
        other => panic!("Expected response error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_is_returned() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::http_client(&common::config_builder(&mock_server).build().unwrap());
    let error = client
        .delete("users/1", RequestOptions::default())
        .await
        .unwrap_err();

    assert_eq!(error.status(), Some(503));
}

#[tokio::test]
async fn test_empty_body_is_none_and_empty_object_is_some() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/users/1/"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/users/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let client = common::http_client(&common::config_builder(&mock_server).build().unwrap());

    let deleted = client
        .delete("users/1", RequestOptions::default())
        .await
        .unwrap();
    let fetched = client
        .get("users/1", None, RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(deleted, None);
    assert_eq!(fetched, Some(json!({})));
}

#[tokio::test]
async fn test_not_modified_is_not_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users/"))
        .and(header("if-none-match", "\"abc\""))
        .respond_with(ResponseTemplate::new(304))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::http_client(&common::config_builder(&mock_server).build().unwrap());
    let options = RequestOptions::new().header("If-None-Match", "\"abc\"");

    let body = client.get("users", None, options).await.unwrap();

    assert_eq!(body, None);
}

#[tokio::test]
async fn test_send_returns_not_modified_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(304).insert_header("ETag", "\"abc\""))
        .mount(&mock_server)
        .await;

    let client = common::http_client(&common::config_builder(&mock_server).build().unwrap());
    let response = client
        .send(HttpMethod::Get, "users", RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(response.code, 304);
    assert_eq!(response.header("etag"), Some("\"abc\""));
}

#[tokio::test]
async fn test_non_json_success_body_is_json_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&mock_server)
        .await;

    let client = common::http_client(&common::config_builder(&mock_server).build().unwrap());
    let result = client.get("users", None, RequestOptions::default()).await;

    assert!(matches!(result, Err(HttpError::Json(_))));
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/users/"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"name": "a"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1, "name": "a"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::http_client(&common::config_builder(&mock_server).build().unwrap());
    let body = client
        .post("users", Some(json!({"name": "a"})), RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(body, Some(json!({"id": 1, "name": "a"})));
}

#[tokio::test]
async fn test_timeout_surfaces_as_network_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let client = common::http_client(&common::config_builder(&mock_server).build().unwrap());
    let options = RequestOptions::new().timeout(Duration::from_millis(50));

    match client.get("users", None, options).await {
        Err(HttpError::Network(error)) => assert!(error.is_timeout()),
        other => panic!("Expected timeout, got {other:?}"),
    }
}

// ============================================================================
// Raw Responses and Headers
// ============================================================================

#[tokio::test]
async fn test_send_returns_headers_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("[]")
                .insert_header("X-Total-Count", "0"),
        )
        .mount(&mock_server)
        .await;

    let client = common::http_client(&common::config_builder(&mock_server).build().unwrap());
    let response = client
        .send(HttpMethod::Get, "users", RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(response.code, 200);
    assert_eq!(response.header("x-total-count"), Some("0"));
    assert_eq!(response.json().unwrap(), Some(json!([])));
}

#[tokio::test]
async fn test_default_and_extra_headers_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("accept", "application/json"))
        .and(header("x-trace", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = common::config_builder(&mock_server)
        .user_agent_prefix("MyApp/1.0")
        .build()
        .unwrap();
    let client = common::http_client(&config);
    let options = RequestOptions::new().header("X-Trace", "abc");

    client.get("users", None, options).await.unwrap();

    let user_agent = client.default_headers().get("User-Agent").unwrap();
    assert!(user_agent.starts_with("MyApp/1.0 | REST Resource Client v"));
}

#[tokio::test]
async fn test_header_override_replaces_default_in_any_case() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("accept", "application/vnd.api+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::http_client(&common::config_builder(&mock_server).build().unwrap());
    let options = RequestOptions::new().header("accept", "application/vnd.api+json");

    // The exact-value matcher fails if the default Accept is sent as well
    let body = client.get("users", None, options).await.unwrap();

    assert_eq!(body, Some(json!([])));
}

// ============================================================================
// Error Handler
// ============================================================================

#[derive(Debug, thiserror::Error)]
#[error("service said no ({status})")]
struct ServiceError {
    status: u16,
}

#[derive(Debug)]
struct TranslateErrors;

impl ErrorHandler for TranslateErrors {
    fn handle_exception(&self, error: HttpResponseError) -> Result<Option<Value>, HttpError> {
        Err(HttpError::Custom(Box::new(ServiceError { status: error.code })))
    }
}

#[derive(Debug)]
struct NotFoundIsEmpty;

impl ErrorHandler for NotFoundIsEmpty {
    fn handle_exception(&self, error: HttpResponseError) -> Result<Option<Value>, HttpError> {
        if error.code == 404 {
            return Ok(None);
        }
        Err(error.into())
    }
}

#[tokio::test]
async fn test_error_handler_can_translate_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::http_client(&common::config_builder(&mock_server).build().unwrap())
        .with_error_handler(TranslateErrors);

    match client.get("users", None, RequestOptions::default()).await {
        Err(HttpError::Custom(error)) => {
            let error = error.downcast_ref::<ServiceError>().unwrap();
            assert_eq!(error.status, 403);
        }
        other => panic!("Expected custom error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_handler_can_recover() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users/1/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/users/2/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = common::http_client(&common::config_builder(&mock_server).build().unwrap())
        .with_error_handler(NotFoundIsEmpty);

    let missing = client
        .get("users/1", None, RequestOptions::default())
        .await
        .unwrap();
    let broken = client.get("users/2", None, RequestOptions::default()).await;

    assert_eq!(missing, None);
    assert_eq!(broken.unwrap_err().status(), Some(500));
}

#[tokio::test]
async fn test_send_bypasses_error_handler() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = common::http_client(&common::config_builder(&mock_server).build().unwrap())
        .with_error_handler(NotFoundIsEmpty);

    let result = client
        .send(HttpMethod::Get, "users/1", RequestOptions::default())
        .await;

    assert_eq!(result.unwrap_err().status(), Some(404));
}
