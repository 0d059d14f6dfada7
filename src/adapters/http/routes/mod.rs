pub mod auth;
pub mod posts;

use axum::Router;

use crate::adapters::http::app_state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/auth/callbacks", auth::router())
        .nest("/posts", posts::router())
}
