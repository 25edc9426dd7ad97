//! Shared utilities for integration tests.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use unless_middleware::config::{AppConfig, RuleSetConfig};
use unless_middleware::http::HttpServer;

pub const API_KEY: &str = "test-key";

/// Demo app with the given `[unless]` rules (TOML) and a known API key.
pub fn app_with_rules(rules_toml: &str) -> Router {
    let unless: RuleSetConfig = toml::from_str(rules_toml).unwrap();
    let mut config = AppConfig::default();
    config.auth.api_key = API_KEY.to_string();
    config.unless = unless;
    HttpServer::new(config).unwrap().into_router()
}

/// Send one request through the router; returns status and body text.
pub async fn send(app: &Router, method: &str, uri: &str, api_key: Option<&str>) -> (StatusCode, String) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = api_key {
        builder = builder.header("x-api-key", key);
    }
    let request = builder.body(Body::empty()).unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}
