//! Process-level errors.
//!
//! Request handling has no failure path of its own; everything here can only
//! happen while starting or running the server.

use crate::config::ConfigError;
use crate::http::ServerError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Server(#[from] ServerError),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}
