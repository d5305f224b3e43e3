//! The `/rest` ping endpoint.
//!
//! Used by load balancers and smoke tests to verify the service answers HTTP.
//! The handler is stateless; repeated or concurrent calls are indistinguishable.

use crate::config::PING_BODY;

/// Ping handler.
///
/// Returns `200 OK` with the literal body `ping` as `text/plain`.
pub async fn ping() -> &'static str {
    PING_BODY
}
