//! HTTP/HTTPS server startup logic.
//!
//! Supports two TLS modes:
//! - Manual: User-provided certificate files
//! - None: Plain HTTP

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use axum_server::Handle;

use crate::config::{AppConfig, HttpServerConfig, TlsConfig, TlsMode};

use super::redirect;
use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    #[error("Failed to resolve listen address '{0}'")]
    Resolve(String),

    #[error("Failed to load TLS configuration: {0}")]
    TlsConfig(String),
}

/// Start the HTTP/HTTPS server based on configuration.
///
/// This function blocks until the server shuts down.
pub async fn start_server(app: Router, config: &AppConfig) -> Result<(), ServerError> {
    let addr = listen_addr(&config.http).await?;

    let handle = Handle::new();
    let grace = Duration::from_secs(config.http.shutdown_timeout_seconds);
    shutdown::setup_shutdown_handler(handle.clone(), grace);

    match config.http.tls.mode {
        TlsMode::None => {
            tracing::warn!(
                "TLS disabled - server running on plain HTTP (not recommended for production)"
            );
            start_plain_server(app, addr, handle).await
        }
        TlsMode::Manual => start_manual_tls_server(app, addr, &config.http.tls, handle).await,
    }
}

/// Resolve `host:port` to the first matching socket address.
///
/// `host` may be an IP literal or a hostname.
pub async fn listen_addr(http: &HttpServerConfig) -> Result<SocketAddr, ServerError> {
    let target = format!("{}:{}", http.host, http.port);
    let mut addrs = tokio::net::lookup_host(target.clone())
        .await
        .map_err(|_| ServerError::Resolve(target.clone()))?;
    addrs.next().ok_or(ServerError::Resolve(target))
}

/// Start a plain HTTP server (no TLS).
async fn start_plain_server(
    app: Router,
    addr: SocketAddr,
    handle: Handle,
) -> Result<(), ServerError> {
    tracing::info!(%addr, "Starting HTTP server (no TLS)");

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .map_err(ServerError::Bind)
}

/// Start HTTPS server with user-provided certificates.
async fn start_manual_tls_server(
    app: Router,
    addr: SocketAddr,
    tls_config: &TlsConfig,
    handle: Handle,
) -> Result<(), ServerError> {
    let (cert_path, key_path) = match (&tls_config.cert_path, &tls_config.key_path) {
        (Some(cert), Some(key)) => (cert.clone(), key.clone()),
        _ => {
            return Err(ServerError::TlsConfig(
                "manual TLS mode requires cert_path and key_path".to_string(),
            ))
        }
    };

    tracing::info!(%addr, cert = %cert_path, key = %key_path, "Starting HTTPS server (manual certs)");

    let rustls_config = RustlsConfig::from_pem_file(&cert_path, &key_path)
        .await
        .map_err(|e| ServerError::TlsConfig(format!("Failed to load certificates: {}", e)))?;

    shutdown::setup_reload_handler(rustls_config.clone(), cert_path, key_path);

    if tls_config.redirect_http {
        redirect::spawn_redirect_server(addr.ip(), tls_config.redirect_port, addr.port());
    }

    axum_server::bind_rustls(addr, rustls_config)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .map_err(ServerError::Bind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http_config(host: &str, port: u16) -> HttpServerConfig {
        HttpServerConfig {
            host: host.to_string(),
            port,
            ..HttpServerConfig::default()
        }
    }

    #[tokio::test]
    async fn test_listen_addr_ip_literal() {
        let addr = listen_addr(&http_config("127.0.0.1", 8080)).await.unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:8080");
    }

    #[tokio::test]
    async fn test_listen_addr_resolves_hostname() {
        let addr = listen_addr(&http_config("localhost", 8080)).await.unwrap();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 8080);
    }

    #[tokio::test]
    async fn test_listen_addr_rejects_garbage() {
        let err = listen_addr(&http_config("not a host", 8080)).await.unwrap_err();
        assert!(matches!(err, ServerError::Resolve(_)));
    }
}
