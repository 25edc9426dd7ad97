//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the demo handlers
//! - Wire up middleware (tracing, API key check wrapped in `unless`)
//! - Bind server to listener

use axum::{
    body::Body,
    extract::{OriginalUri, Request, State},
    http::{HeaderName, StatusCode},
    middleware::{from_fn_with_state, Next},
    response::{IntoResponse, Response},
    routing::{any, get},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::{AppConfig, AuthConfig, ConfigError, ValidationError};
use crate::http::layer::UnlessExt;
use crate::matching::RuleSet;

/// Expected API key and where to find it.
#[derive(Clone)]
pub struct ApiKeyState {
    header: HeaderName,
    key: Arc<str>,
}

impl ApiKeyState {
    pub fn from_config(config: &AuthConfig) -> Result<Self, axum::http::header::InvalidHeaderName> {
        Ok(Self {
            header: HeaderName::try_from(config.header.as_str())?,
            key: Arc::from(config.api_key.as_str()),
        })
    }
}

/// Rejects requests without the configured API key.
pub async fn require_api_key(
    State(state): State<ApiKeyState>,
    req: Request,
    next: Next,
) -> Response {
    let presented = req
        .headers()
        .get(&state.header)
        .and_then(|v| v.to_str().ok());

    match presented {
        Some(key) if key == &*state.key => next.run(req).await,
        Some(_) => (StatusCode::FORBIDDEN, "Invalid API key").into_response(),
        None => {
            tracing::warn!(path = %req.uri().path(), "Missing API key");
            (StatusCode::UNAUTHORIZED, "Missing API key").into_response()
        }
    }
}

/// Build the demo app. Requests matching `rules` bypass the API key check.
///
/// The check is attached to the `/v1` router before nesting, so it sees the
/// prefix-stripped URL while the original one stays available.
pub fn build_router(auth: ApiKeyState, rules: RuleSet<Request<Body>>) -> Router {
    let guard = from_fn_with_state(auth, require_api_key).unless(rules);

    let api = Router::new()
        .route("/status", get(status))
        .route("/{*rest}", any(echo))
        .layer(guard.clone());

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/assets/{*file}", get(asset))
        .layer(guard)
        .nest("/v1", api)
        .layer(TraceLayer::new_for_http())
}

/// HTTP server for the demo app.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Result<Self, ConfigError> {
        let rules = config.unless.compile()?;
        let auth = ApiKeyState::from_config(&config.auth).map_err(|_| {
            ConfigError::Validation(vec![ValidationError::InvalidHeader(
                config.auth.header.clone(),
            )])
        })?;

        tracing::info!(rules = ?rules, "Unless rules compiled");

        let router = build_router(auth, rules);
        Ok(Self { router, config })
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The assembled router, for in-process testing.
    pub fn into_router(self) -> Router {
        self.router
    }
}

async fn index() -> &'static str {
    "unless demo"
}

async fn health() -> &'static str {
    "ok"
}

async fn status() -> &'static str {
    "running"
}

async fn asset(OriginalUri(uri): OriginalUri) -> String {
    format!("asset {}", uri.path())
}

async fn echo(OriginalUri(original): OriginalUri, req: Request) -> String {
    format!("{} {} (original {})", req.method(), req.uri().path(), original.path())
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
