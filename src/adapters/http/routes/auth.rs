//! Callback hooks invoked by the authentication framework.

use axum::{
    Json, Router,
    extract::State,
    http::HeaderMap,
    response::IntoResponse,
    routing::post,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    adapters::http::{app_state::AppState, hook_auth::verify_hook_secret},
    app_error::AppResult,
    domain::entities::session::Session,
};

#[derive(Deserialize)]
struct SignInPayload {
    user: SignInUser,
    #[serde(default)]
    account: Option<Value>,
    #[serde(default)]
    profile: Option<Value>,
}

#[derive(Deserialize)]
struct SignInUser {
    #[serde(default)]
    email: Option<String>,
}

#[derive(Serialize)]
struct SignInResponse {
    allow: bool,
}

#[derive(Deserialize)]
struct SessionPayload {
    session: Session,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sign-in", post(sign_in))
        .route("/session", post(session))
}

/// POST /api/auth/callbacks/sign-in
/// Provisions the local user. Always answers 200; `allow` carries the decision.
async fn sign_in(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SignInPayload>,
) -> AppResult<impl IntoResponse> {
    verify_hook_secret(&headers, &app_state.config.hook_secret)?;

    let provider = payload
        .account
        .as_ref()
        .and_then(|a| a.get("provider"))
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    tracing::debug!(
        provider,
        has_profile = payload.profile.is_some(),
        "Sign-in callback"
    );

    let allow = app_state
        .auth_use_cases
        .provision_sign_in(payload.user.email.as_deref())
        .await;

    Ok(Json(SignInResponse { allow }))
}

/// POST /api/auth/callbacks/session
/// Returns the session with `activeSubscription` attached (or `null`).
async fn session(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SessionPayload>,
) -> AppResult<impl IntoResponse> {
    verify_hook_secret(&headers, &app_state.config.hook_secret)?;

    let enriched = app_state
        .auth_use_cases
        .enrich_session(payload.session)
        .await;

    Ok(Json(enriched))
}
