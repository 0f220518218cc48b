//! Handlers for the status data endpoints.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::domain::entities::{DataSource, StatusSnapshot};
use crate::state::AppState;

/// Response header naming where the payload came from (`cache` or `store`).
pub const DATA_SOURCE_HEADER: &str = "x-data-source";

/// Returns the aggregate status snapshot.
///
/// # Endpoint
///
/// `GET /api/status`
///
/// # Response Codes
///
/// - **200 OK**: Snapshot served from cache or database
/// - **503 Service Unavailable**: Database read failed; body is the error snapshot
///
/// # Response
///
/// ```json
/// {
///   "status": "success",
///   "message": "Data retrieved from cache",
///   "data": { "total_count": 3, "fetched_at": "2026-10-18T09:00:00Z" }
/// }
/// ```
pub async fn status_handler(State(state): State<AppState>) -> Response {
    let snapshot = state.status_service.get_status().await;

    let code = if snapshot.value.is_error() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    with_source(code, snapshot.source, Json(snapshot.value))
}

/// Returns every subsidiary ordered by id.
///
/// # Endpoint
///
/// `GET /api/subsidiaries`
///
/// # Response Codes
///
/// - **200 OK**: JSON array of `{id, name, status}`
/// - **503 Service Unavailable**: Database read failed; body is an error snapshot
pub async fn subsidiaries_handler(State(state): State<AppState>) -> Response {
    match state.status_service.get_subsidiaries().await {
        Ok(list) => with_source(StatusCode::OK, list.source, Json(list.value)),
        Err(e) => with_source(
            StatusCode::SERVICE_UNAVAILABLE,
            DataSource::Store,
            Json(StatusSnapshot::error(e)),
        ),
    }
}

fn with_source(code: StatusCode, source: DataSource, body: impl IntoResponse) -> Response {
    (code, [(DATA_SOURCE_HEADER, source.as_str())], body).into_response()
}
