//! Demo server for the `unless` middleware.
//!
//! Serves a small axum app whose API key check is skipped for requests that
//! match the configured rules.
//!
//! ```text
//!     Client Request
//!         → TraceLayer
//!         → Unless (rules match?) ──yes──▶ route handler
//!               │ no
//!               ▼
//!           require_api_key ──▶ route handler
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use unless_middleware::config::{load_config, AppConfig};
use unless_middleware::http::HttpServer;
use unless_middleware::observability::logging;

#[derive(Parser)]
#[command(name = "unless-demo")]
#[command(about = "Serve a demo app with an API key check skipped by unless rules", long_about = None)]
struct Cli {
    /// Configuration file (TOML, or JSON with a `.json` extension).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability)?;

    tracing::info!("unless-demo v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        config_file = ?cli.config,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let server = HttpServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
