//! HTTP route handlers.
//!
//! The router serves exactly one resource. Unknown paths and unsupported
//! methods fall through to axum's own 404 and 405 responses.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod ping;

use axum::{middleware, routing::get, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{CACHE_CONTROL_PING, PING_PATH};
use crate::middleware::request_id_layer;

/// Creates the Axum router with the ping route and its headers.
pub fn create_router() -> Router {
    // Ping - never cached, always answered by the origin
    let ping_routes = Router::new().route(PING_PATH, get(ping::ping)).layer(
        SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_PING),
        ),
    );

    Router::new()
        .merge(ping_routes)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
