use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::{
    app_error::{AppError, AppResult},
    application::{
        helpers::{
            publication_date::format_publication_date,
            rich_text::{as_html, as_text},
        },
        validators::is_valid_slug,
    },
    domain::entities::cms_post::CmsPost,
};

/// Seconds a generated preview stays valid before it is rebuilt from the CMS.
pub const DEFAULT_REVALIDATE_SECS: u64 = 60 * 30;
/// Number of content blocks shown to readers without a subscription.
pub const DEFAULT_PREVIEW_BLOCKS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPreview {
    pub slug: String,
    pub title: String,
    /// HTML of the leading content blocks.
    pub content: String,
    pub updated_at: String,
}

#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn get_post_by_uid(&self, uid: &str) -> AppResult<Option<CmsPost>>;
}

#[async_trait]
pub trait PreviewCache: Send + Sync {
    async fn get(&self, slug: &str) -> AppResult<Option<PostPreview>>;
    async fn put(&self, slug: &str, preview: &PostPreview, ttl_secs: u64) -> AppResult<()>;
}

#[derive(Clone)]
pub struct PreviewUseCases {
    content: Arc<dyn ContentSource>,
    cache: Arc<dyn PreviewCache>,
    revalidate_secs: u64,
    block_limit: usize,
}

impl PreviewUseCases {
    pub fn new(
        content: Arc<dyn ContentSource>,
        cache: Arc<dyn PreviewCache>,
        revalidate_secs: u64,
        block_limit: usize,
    ) -> Self {
        Self {
            content,
            cache,
            revalidate_secs,
            block_limit,
        }
    }

    pub fn revalidate_secs(&self) -> u64 {
        self.revalidate_secs
    }

    /// Returns the cached preview for `slug`, building it from the CMS on a miss.
    /// Cache errors degrade to a CMS fetch and never fail the request.
    #[instrument(skip(self))]
    pub async fn load_preview(&self, slug: &str) -> AppResult<PostPreview> {
        if !is_valid_slug(slug) {
            return Err(AppError::InvalidInput("Invalid post slug".into()));
        }

        match self.cache.get(slug).await {
            Ok(Some(preview)) => {
                debug!("Preview cache hit");
                return Ok(preview);
            }
            Ok(None) => debug!("Preview cache miss"),
            Err(err) => warn!(error = %err, "Preview cache read failed"),
        }

        let post = self
            .content
            .get_post_by_uid(slug)
            .await?
            .ok_or(AppError::NotFound)?;

        let preview = build_preview(slug, &post, self.block_limit);

        if let Err(err) = self
            .cache
            .put(slug, &preview, self.revalidate_secs)
            .await
        {
            warn!(error = %err, "Preview cache write failed");
        }

        Ok(preview)
    }
}

pub fn build_preview(slug: &str, post: &CmsPost, block_limit: usize) -> PostPreview {
    let shown = &post.content[..post.content.len().min(block_limit)];
    PostPreview {
        slug: slug.to_string(),
        title: as_text(&post.title),
        content: as_html(shown),
        updated_at: post
            .last_publication_date
            .map(format_publication_date)
            .unwrap_or_default(),
    }
}
