//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /`                  - Landing page
//! - `GET  /health`            - Health check: database, cache
//! - `GET  /api/status`        - Status snapshot (cache-aside)
//! - `GET  /api/subsidiaries`  - Subsidiary list (cache-aside)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, not_found_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use crate::web;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .merge(web::routes::public_routes())
        .route("/health", get(health_handler))
        .nest("/api", api::routes::routes())
        .fallback(not_found_handler)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
