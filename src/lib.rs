//! ping-rest: a minimal HTTP service answering `GET /rest` with `ping`.
//!
//! The library exposes the router and server so the binary and the
//! integration tests share one assembly path.

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use error::AppError;
pub use routes::create_router;
