//! Error types shared across layers.
//!
//! - [`StoreError`] - failures of the mandatory record store, surfaced to clients
//!   as data inside an error snapshot
//! - [`AppError`] - HTTP-level failures rendered as a JSON error body

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;

/// Errors raised by the record store.
///
/// Never retried inside the repository.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The database could not be reached (pool timeout, I/O, TLS, closed pool).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The query reached the database and failed there.
    #[error("store query failed: {0}")]
    QueryFailed(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => Self::Unavailable(e.to_string()),
            other => Self::QueryFailed(other.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

#[derive(Debug)]
pub enum AppError {
    NotFound { message: String, details: Value },
}

impl AppError {
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::NotFound { message, .. } => write!(f, "{}", message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pool_timeout_maps_to_unavailable() {
        let err = StoreError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[test]
    fn test_row_not_found_maps_to_query_failed() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::QueryFailed(_)));
    }

    #[test]
    fn test_not_found_response_status() {
        let response = AppError::not_found("Route not found", json!({})).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
