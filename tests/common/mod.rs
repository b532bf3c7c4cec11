//! Shared helpers for the integration tests.

#![allow(dead_code)]

use base64::Engine;
use rest_resource::{ApiClient, ClientConfig, ClientConfigBuilder, Endpoint, HttpClient};
use wiremock::MockServer;

pub const USERNAME: &str = "alice";
pub const PASSWORD: &str = "s3cret";

/// Returns a builder pointed at `{mock_server}/v1` with no auth.
pub fn config_builder(mock_server: &MockServer) -> ClientConfigBuilder {
    let endpoint = Endpoint::new(format!("{}/v1", mock_server.uri())).unwrap();
    ClientConfig::builder().endpoint(endpoint)
}

/// Returns a config using basic auth with the test credentials.
pub fn basic_config(mock_server: &MockServer) -> ClientConfig {
    config_builder(mock_server)
        .auth_type("basic")
        .auth_username(USERNAME)
        .auth_password(PASSWORD)
        .build()
        .unwrap()
}

pub fn http_client(config: &ClientConfig) -> HttpClient {
    HttpClient::new(config).unwrap()
}

pub fn api_client(config: &ClientConfig) -> ApiClient {
    ApiClient::new(config).unwrap()
}

/// The `Authorization` header value for basic auth.
pub fn basic_header(username: &str, password: &str) -> String {
    let encoded =
        base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"));
    format!("Basic {encoded}")
}
