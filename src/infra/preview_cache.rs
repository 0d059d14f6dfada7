use async_trait::async_trait;
use redis::{AsyncCommands, aio::ConnectionManager};

use super::InfraError;
use crate::{
    app_error::{AppError, AppResult},
    use_cases::preview::{PostPreview, PreviewCache},
};

/// Generated previews keyed by slug. Entries expire after the revalidation
/// period, after which the next request rebuilds them from the CMS.
#[derive(Clone)]
pub struct RedisPreviewCache {
    manager: ConnectionManager,
}

impl RedisPreviewCache {
    pub async fn new(redis_url: &str) -> Result<Self, InfraError> {
        let client = redis::Client::open(redis_url).map_err(InfraError::RedisConnection)?;
        let manager = ConnectionManager::new(client)
            .await
            .map_err(InfraError::RedisConnection)?;

        Ok(Self { manager })
    }

    fn key(slug: &str) -> String {
        format!("preview:{slug}")
    }
}

#[async_trait]
impl PreviewCache for RedisPreviewCache {
    async fn get(&self, slug: &str) -> AppResult<Option<PostPreview>> {
        let mut conn = self.manager.clone();

        let raw: Option<String> = conn
            .get(Self::key(slug))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;

        raw.map(|value| {
            serde_json::from_str(&value).map_err(|e| AppError::Internal(e.to_string()))
        })
        .transpose()
    }

    async fn put(&self, slug: &str, preview: &PostPreview, ttl_secs: u64) -> AppResult<()> {
        let mut conn = self.manager.clone();
        let value =
            serde_json::to_string(preview).map_err(|e| AppError::Internal(e.to_string()))?;

        let _: () = conn
            .set_ex(Self::key(slug), value, ttl_secs.max(1))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;

        Ok(())
    }
}
