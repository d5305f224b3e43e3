//! HTTP server module with optional TLS.
//!
//! This module serves the router in one of two modes:
//! - **None (default)**: Plain HTTP (development or behind a reverse proxy)
//! - **Manual**: User-provided certificate and key files
//!
//! The server includes:
//! - HTTP to HTTPS redirect (when TLS enabled)
//! - Graceful shutdown on SIGTERM/SIGINT
//! - Certificate hot-reload via SIGHUP (manual mode)

mod redirect;
mod server;
mod shutdown;

pub use server::{listen_addr, start_server, ServerError};
