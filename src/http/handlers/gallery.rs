//! Gallery page handler.

use axum::extract::State;
use axum::response::Html;

use super::super::{AppError, AppState};
use crate::gallery::render_page;

/// GET / - HTML gallery, newest first.
pub(crate) async fn gallery_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let photos = state.store.list_async().await?;
    Ok(Html(render_page(&state.config.gallery.title, &photos)))
}
