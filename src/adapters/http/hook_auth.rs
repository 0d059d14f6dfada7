//! Shared-secret check for the authentication framework's callback hooks.

use axum::http::{HeaderMap, header::AUTHORIZATION};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

use crate::app_error::{AppError, AppResult};

/// Accepts the request only if it carries `Authorization: Bearer <secret>`.
pub fn verify_hook_secret(headers: &HeaderMap, secret: &SecretString) -> AppResult<()> {
    let provided = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(AppError::InvalidCredentials)?;

    // Digests have a fixed length, so the comparison time does not depend on
    // how much of the secret matched.
    if digest(provided) == digest(secret.expose_secret()) {
        Ok(())
    } else {
        Err(AppError::InvalidCredentials)
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}
