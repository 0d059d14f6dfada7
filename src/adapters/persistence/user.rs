use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    domain::entities::user::User,
    use_cases::user::{ProvisionedUser, UserRepo},
};

// User struct as stored in the db.
#[derive(sqlx::FromRow, Debug)]
pub struct UserDb {
    pub id: Uuid,
    pub email: String,
    pub email_folded: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Inserts the user unless the folded email is taken. Never touches an
/// existing row; on conflict nothing is returned.
const INSERT_USER_IF_ABSENT: &str = r#"
    INSERT INTO users (id, email, email_folded)
    VALUES ($1, $2, $3)
    ON CONFLICT (email_folded) DO NOTHING
    RETURNING id, email, email_folded, created_at
"#;

const SELECT_USER_BY_FOLDED_EMAIL: &str =
    "SELECT id, email, email_folded, created_at FROM users WHERE email_folded = $1";

impl From<UserDb> for User {
    fn from(row: UserDb) -> Self {
        User {
            id: row.id,
            email: row.email,
            email_folded: row.email_folded,
            created_at: row.created_at,
        }
    }
}

/// Combines the outcome of the conditional insert with the follow-up read.
fn provisioned(inserted: Option<UserDb>, existing: Option<UserDb>) -> AppResult<ProvisionedUser> {
    match (inserted, existing) {
        (Some(row), _) => Ok(ProvisionedUser {
            user: row.into(),
            created: true,
        }),
        (None, Some(row)) => Ok(ProvisionedUser {
            user: row.into(),
            created: false,
        }),
        // Conflicting row vanished between the insert and the read.
        (None, None) => Err(AppError::Database("User disappeared during upsert".into())),
    }
}

#[async_trait]
impl UserRepo for PostgresPersistence {
    async fn upsert_by_email(
        &self,
        email: &str,
        email_folded: &str,
    ) -> AppResult<ProvisionedUser> {
        // A concurrent insert of the same key blocks on the unique index until it
        // commits, so the read below sees the winner's row.
        let inserted = sqlx::query_as::<_, UserDb>(INSERT_USER_IF_ABSENT)
            .bind(Uuid::new_v4())
            .bind(email)
            .bind(email_folded)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?;

        let existing = match inserted {
            Some(_) => None,
            None => sqlx::query_as::<_, UserDb>(SELECT_USER_BY_FOLDED_EMAIL)
                .bind(email_folded)
                .fetch_optional(&self.pool)
                .await
                .map_err(AppError::from)?,
        };

        provisioned(inserted, existing)
    }

    async fn get_by_folded_email(&self, email_folded: &str) -> AppResult<Option<User>> {
        let rec = sqlx::query_as::<_, UserDb>(SELECT_USER_BY_FOLDED_EMAIL)
            .bind(email_folded)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?;
        Ok(rec.map(User::from))
    }
}
