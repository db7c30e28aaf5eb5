//! Health check and catch-all handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::super::{AppError, AppState, HealthResponse};

/// GET /health - Liveness plus a store directory check.
pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_dir_exists = tokio::fs::metadata(state.store.dir())
        .await
        .is_ok_and(|meta| meta.is_dir());
    Json(HealthResponse {
        status: "ok",
        store_dir_exists,
    })
}

/// OPTIONS /upload - Bare success for clients probing the endpoint.
///
/// CORS preflights carrying `Access-Control-Request-Method` are answered by
/// the CORS layer before reaching this handler.
pub(crate) async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Any other method on /upload.
pub(crate) async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Unknown paths.
pub(crate) async fn not_found() -> AppError {
    AppError::NotFound("Not found".to_string())
}
