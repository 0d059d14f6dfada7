use axum::{
    Json, Router,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::get,
};

use crate::{adapters::http::app_state::AppState, app_error::AppResult};

pub fn router() -> Router<AppState> {
    Router::new().route("/preview/{slug}", get(preview))
}

/// GET /api/posts/preview/{slug}
/// Public, cacheable preview of a post: title, leading blocks, publication date.
async fn preview(
    State(app_state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let previews = app_state.preview_use_cases.clone();
    let preview = previews.load_preview(&slug).await?;

    let cache_control = format!(
        "public, s-maxage={}, stale-while-revalidate",
        previews.revalidate_secs()
    );

    Ok(([(header::CACHE_CONTROL, cache_control)], Json(preview)))
}
