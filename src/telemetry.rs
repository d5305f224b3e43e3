//! Tracing subscriber setup.
//!
//! The filter comes from the CLI, then `RUST_LOG`, then [`DEFAULT_LOG_FILTER`].
//! Output is human-readable text or JSON lines depending on `logging.format`.

use tracing::Subscriber;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

use crate::config::{LoggingConfig, DEFAULT_LOG_FILTER};
use crate::AppError;

/// Pick the log filter. Priority: CLI > env > default.
pub fn log_filter(cli: Option<String>, env: Option<String>) -> String {
    cli.or(env).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// Build the subscriber without installing it.
pub fn build_subscriber(
    filter: &str,
    logging: &LoggingConfig,
) -> Result<Box<dyn Subscriber + Send + Sync>, AppError> {
    let env_filter = EnvFilter::try_new(filter)
        .map_err(|e| AppError::Logging(format!("invalid filter '{}': {}", filter, e)))?;
    let registry = tracing_subscriber::registry().with(env_filter);

    if logging.is_json() {
        Ok(Box::new(registry.with(
            tracing_subscriber::fmt::layer().json().with_current_span(true),
        )))
    } else {
        Ok(Box::new(registry.with(tracing_subscriber::fmt::layer())))
    }
}

/// Build the subscriber and install it as the global default.
pub fn init_tracing(filter: &str, logging: &LoggingConfig) -> Result<(), AppError> {
    let subscriber = build_subscriber(filter, logging)?;
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| AppError::Logging(e.to_string()))
}
