use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    domain::entities::subscription::{Subscription, SubscriptionStatus},
    use_cases::user::SubscriptionRepo,
};

#[derive(sqlx::FromRow, Debug)]
struct SubscriptionDb {
    id: String,
    user_id: Uuid,
    status: String,
    price_id: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

impl From<SubscriptionDb> for Subscription {
    fn from(row: SubscriptionDb) -> Self {
        Subscription {
            id: row.id,
            user_id: row.user_id,
            status: SubscriptionStatus::from_raw(&row.status),
            price_id: row.price_id,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl SubscriptionRepo for PostgresPersistence {
    async fn get_active_for_user(&self, user_id: Uuid) -> AppResult<Option<Subscription>> {
        // Both predicates are backed by their own index (user_id, status).
        let rec = sqlx::query_as::<_, SubscriptionDb>(
            r#"
                SELECT id, user_id, status, price_id, created_at
                FROM subscriptions
                WHERE user_id = $1 AND status = $2
                ORDER BY created_at ASC, id ASC
                LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(SubscriptionStatus::Active.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(rec.map(Subscription::from))
    }
}
