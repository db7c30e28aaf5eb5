//! Listing and serving stored photos.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::Response;
use axum::{Extension, Json};
use tracing::error;

use super::super::{AppError, AppState, ListResponse, RequestContext};
use crate::constants::PHOTO_CACHE_CONTROL;

/// GET /api/photos - Every stored photo, newest first.
///
/// Public unless `gallery.require_key_for_listing` is set.
pub(crate) async fn list_photos(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    headers: HeaderMap,
) -> Result<Json<ListResponse>, AppError> {
    if state.config.gallery.require_key_for_listing {
        state.authorize(&headers, &ctx, "/api/photos")?;
    }
    let photos = state.store.list_async().await?;
    Ok(Json(ListResponse::from(photos)))
}

/// GET /<url_prefix>/{filename} - Serve one stored photo.
pub(crate) async fn get_photo(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let not_found = || AppError::NotFound(format!("Photo '{filename}' not found"));

    let path = state.store.locate(&filename)?.ok_or_else(not_found)?;
    let contents = match tokio::fs::read(&path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
        Err(e) => {
            error!(path = %path.display(), error = %e, "Failed to read photo");
            return Err(AppError::Internal("Photo could not be read".to_string()));
        },
    };

    let content_type = mime_guess::from_path(&path).first_or_octet_stream();
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type.essence_str())
        .header(header::CACHE_CONTROL, PHOTO_CACHE_CONTROL)
        .body(Body::from(contents))
        .map_err(|e| {
            error!(error = %e, "Failed to build photo response");
            AppError::Internal("Photo could not be read".to_string())
        })
}
