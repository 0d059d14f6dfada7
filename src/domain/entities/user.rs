use caseless::Caseless;
use chrono::{DateTime, Utc};
use serde::Serialize;
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    /// Email as first supplied by the identity provider.
    pub email: String,
    /// Lookup key, unique per user.
    pub email_folded: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Case-folds an email so that identity matching is case-insensitive.
///
/// Full Unicode case folding under compatibility normalization (NFKC_Casefold),
/// so `ß` matches `SS` and width variants match their plain forms. The folded
/// value is what the `users.email_folded` unique index holds, so every lookup
/// and every insert must go through this function.
pub fn fold_email(email: &str) -> String {
    email
        .trim()
        .nfd()
        .default_case_fold()
        .nfkd()
        .default_case_fold()
        .nfkc()
        .collect()
}
