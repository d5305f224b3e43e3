//! ping-rest: HTTP ping service.
//!
//! This is the application entry point. It parses the command line, loads
//! configuration, initializes tracing, builds the Axum router and runs the
//! HTTP server until SIGINT/SIGTERM.

use clap::Parser;

use ping_rest::config::{AppConfig, PING_PATH};
use ping_rest::telemetry::{init_tracing, log_filter};
use ping_rest::{create_router, http, AppError};

/// ping-rest: answers GET /rest with "ping"
#[derive(Parser, Debug)]
#[command(name = "ping-rest", version, about)]
struct Args {
    /// Path to configuration file (defaults to config/default.toml when present)
    #[arg(short, long)]
    config: Option<String>,

    /// Log level filter (e.g., "ping_rest=debug,axum=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    let (config, source) = AppConfig::resolve(args.config.as_deref())?;

    let filter = log_filter(args.log_level, std::env::var("RUST_LOG").ok());
    init_tracing(&filter, &config.logging)?;

    let source = source
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<built-in defaults>".to_string());
    tracing::info!(
        config = %source,
        host = %config.http.host,
        port = config.http.port,
        tls = ?config.http.tls.mode,
        "Loaded configuration"
    );

    let app = create_router();
    tracing::info!(path = PING_PATH, "Ping route registered");

    http::start_server(app, &config).await?;

    tracing::info!("Server stopped");
    Ok(())
}
