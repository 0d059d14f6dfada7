//! In-memory mock implementations for the CMS and the preview cache.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    app_error::{AppError, AppResult},
    domain::entities::cms_post::CmsPost,
    use_cases::preview::{ContentSource, PostPreview, PreviewCache},
};

/// ContentSource serving fixed posts and counting fetches.
#[derive(Default)]
pub struct InMemoryContentSource {
    pub posts: Mutex<HashMap<String, CmsPost>>,
    fetches: AtomicUsize,
}

impl InMemoryContentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_posts(posts: Vec<CmsPost>) -> Self {
        let map: HashMap<String, CmsPost> =
            posts.into_iter().map(|p| (p.uid.clone(), p)).collect();
        Self {
            posts: Mutex::new(map),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentSource for InMemoryContentSource {
    async fn get_post_by_uid(&self, uid: &str) -> AppResult<Option<CmsPost>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.posts.lock().unwrap().get(uid).cloned())
    }
}

/// PreviewCache that remembers the TTL each entry was stored with.
#[derive(Default)]
pub struct InMemoryPreviewCache {
    pub entries: Mutex<HashMap<String, (PostPreview, u64)>>,
}

impl InMemoryPreviewCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self, slug: &str) -> Option<(PostPreview, u64)> {
        self.entries.lock().unwrap().get(slug).cloned()
    }
}

#[async_trait]
impl PreviewCache for InMemoryPreviewCache {
    async fn get(&self, slug: &str) -> AppResult<Option<PostPreview>> {
        Ok(self.entry(slug).map(|(preview, _)| preview))
    }

    async fn put(&self, slug: &str, preview: &PostPreview, ttl_secs: u64) -> AppResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(slug.to_string(), (preview.clone(), ttl_secs));
        Ok(())
    }
}

/// PreviewCache that is always unreachable.
#[derive(Default)]
pub struct FailingPreviewCache;

#[async_trait]
impl PreviewCache for FailingPreviewCache {
    async fn get(&self, _slug: &str) -> AppResult<Option<PostPreview>> {
        Err(AppError::Internal("cache unavailable".into()))
    }

    async fn put(&self, _slug: &str, _preview: &PostPreview, _ttl_secs: u64) -> AppResult<()> {
        Err(AppError::Internal("cache unavailable".into()))
    }
}
