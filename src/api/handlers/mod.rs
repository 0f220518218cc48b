//! HTTP request handlers for API endpoints.

pub mod health;
pub mod status;

pub use health::health_handler;
pub use status::{DATA_SOURCE_HEADER, status_handler, subsidiaries_handler};

use axum::http::Uri;
use serde_json::json;

use crate::error::AppError;

/// Fallback for unknown routes.
pub async fn not_found_handler(uri: Uri) -> AppError {
    AppError::not_found("Route not found", json!({ "path": uri.path() }))
}
