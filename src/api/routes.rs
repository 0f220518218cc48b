//! API route configuration.

use crate::api::handlers::{status_handler, subsidiaries_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Public read-only API routes. No authentication.
///
/// # Endpoints
///
/// - `GET /status`        - Aggregate status snapshot
/// - `GET /subsidiaries`  - Full subsidiary list
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(status_handler))
        .route("/subsidiaries", get(subsidiaries_handler))
}
