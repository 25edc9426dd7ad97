//! Skip behaviour of the unless layer inside an axum app.

use axum::http::StatusCode;

mod common;
use common::{app_with_rules, send, API_KEY};

#[tokio::test]
async fn test_guard_runs_when_nothing_matches() {
    let app = app_with_rules(r#"path = "/health""#);

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, "Missing API key");

    let (status, body) = send(&app, "GET", "/", Some(API_KEY)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "unless demo");

    let (status, _) = send(&app, "GET", "/", Some("wrong")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_literal_path_is_exact() {
    let app = app_with_rules(r#"path = "/health""#);

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");

    let (status, _) = send(&app, "GET", "/health?probe=1", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", "/assets/health", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_method_rule() {
    let app = app_with_rules(r#"method = ["OPTIONS", "HEAD"]"#);

    let (status, body) = send(&app, "OPTIONS", "/v1/anything", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OPTIONS /anything (original /v1/anything)");

    let (status, _) = send(&app, "POST", "/v1/anything", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_pattern_matches_anywhere() {
    let app = app_with_rules(r#"path = { regex = "/assets/" }"#);

    let (status, body) = send(&app, "GET", "/assets/logo.png", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "asset /assets/logo.png");

    let (status, _) = send(&app, "GET", "/v1/public/assets/", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", "/v1/status", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_extension_rule() {
    let app = app_with_rules(r#"ext = [".css", ".js"]"#);

    let (status, _) = send(&app, "GET", "/assets/app.js", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", "/assets/app.jsx", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_nested_rule_needs_matching_method() {
    let app = app_with_rules(
        r#"
        path = [{ path = "/v1/admin", method = "POST" }]
        "#,
    );

    let (status, body) = send(&app, "POST", "/v1/admin", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "POST /admin (original /v1/admin)");

    let (status, _) = send(&app, "GET", "/v1/admin", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_original_url_by_default() {
    let app = app_with_rules(r#"path = "/v1/status""#);
    let (status, body) = send(&app, "GET", "/v1/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "running");

    // The nested router sees "/status", which is not configured.
    let app = app_with_rules(r#"path = "/status""#);
    let (status, _) = send(&app, "GET", "/v1/status", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_rewritten_url_when_original_disabled() {
    let app = app_with_rules(
        r#"
        path = "/status"
        use_original_url = false
        "#,
    );
    let (status, _) = send(&app, "GET", "/v1/status", None).await;
    assert_eq!(status, StatusCode::OK);

    let app = app_with_rules(
        r#"
        path = "/v1/status"
        use_original_url = false
        "#,
    );
    let (status, _) = send(&app, "GET", "/v1/status", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_flat_mode_ignores_nested_rules() {
    let app = app_with_rules(
        r#"
        path = ["/health", { path = "/v1/admin", method = "POST" }]
        path_mode = "flat"
        "#,
    );

    let (status, _) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "POST", "/v1/admin", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_repeated_requests_decide_the_same() {
    let app = app_with_rules(r#"path = { regex = "^/assets/" }"#);
    for _ in 0..3 {
        let (status, _) = send(&app, "GET", "/assets/a.css", None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, "GET", "/v1/status", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_dot_segments_do_not_match_literal_path() {
    let app = app_with_rules(r#"path = "/v1/health""#);

    let (status, body) = send(&app, "GET", "/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "GET /health (original /v1/health)");

    let (status, body) = send(&app, "GET", "/v1/public/../health", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, "Missing API key");
}
