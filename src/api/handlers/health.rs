//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Database reachable (the cache may be down; it is optional)
/// - **503 Service Unavailable**: Database unreachable
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok" },
///     "cache": { "status": "unavailable", "message": "Serving from database only" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;
    let cache_check = check_cache(&state).await;

    let healthy = db_check.status == "ok";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database: db_check,
            cache: cache_check,
        },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    match state.status_service.check_store().await {
        Ok(()) => CheckStatus {
            status: "ok".to_string(),
            message: None,
        },
        Err(e) => CheckStatus {
            status: "error".to_string(),
            message: Some(e.to_string()),
        },
    }
}

async fn check_cache(state: &AppState) -> CheckStatus {
    if state.status_service.check_cache().await {
        CheckStatus {
            status: "ok".to_string(),
            message: None,
        }
    } else {
        CheckStatus {
            status: "unavailable".to_string(),
            message: Some("Serving from database only".to_string()),
        }
    }
}
