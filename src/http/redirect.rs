//! HTTP to HTTPS redirect listener.
//!
//! When TLS is enabled and `redirect_http` is set, a second plain-HTTP
//! listener answers every request with a permanent redirect to the HTTPS
//! origin, keeping path and query intact.

use std::net::{IpAddr, SocketAddr};

use axum::http::Uri;
use axum::response::Redirect;
use axum::routing::any;
use axum::Router;
use axum_extra::extract::Host;

/// Spawn the redirect listener in the background.
pub fn spawn_redirect_server(ip: IpAddr, http_port: u16, https_port: u16) {
    tokio::spawn(async move {
        let addr = SocketAddr::new(ip, http_port);

        tracing::info!(
            %addr,
            https_port,
            "Starting HTTP->HTTPS redirect server"
        );

        let app = Router::new().fallback(any(move |Host(host): Host, uri: Uri| async move {
            let location = https_location(&host, &uri, https_port);
            tracing::debug!(from = %uri, to = %location, "Redirecting HTTP to HTTPS");
            Redirect::permanent(&location)
        }));

        match axum_server::bind(addr).serve(app.into_make_service()).await {
            Ok(()) => tracing::debug!("HTTP redirect server stopped"),
            Err(e) => tracing::error!(error = %e, "HTTP redirect server failed"),
        }
    });
}

/// Build the HTTPS URL for a plain-HTTP request.
fn https_location(host: &str, uri: &Uri, https_port: u16) -> String {
    let hostname = strip_port(host);
    let path = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    if https_port == 443 {
        format!("https://{}{}", hostname, path)
    } else {
        format!("https://{}:{}{}", hostname, https_port, path)
    }
}

/// Drop a trailing `:port` from a Host header value, keeping IPv6 brackets.
fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    host.split(':').next().unwrap_or(host)
}
