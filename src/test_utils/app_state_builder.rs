//! Test app state builder for HTTP-level testing.
//!
//! `TestAppStateBuilder` creates an `AppState` over in-memory mocks; any port
//! not overridden gets an empty in-memory implementation.

use std::sync::Arc;

use axum::http::HeaderValue;
use secrecy::SecretString;
use url::Url;

use crate::{
    adapters::http::app_state::AppState,
    infra::config::AppConfig,
    test_utils::{
        InMemoryContentSource, InMemoryPreviewCache, InMemorySubscriptionRepo, InMemoryUserRepo,
    },
    use_cases::{
        preview::{
            ContentSource, DEFAULT_PREVIEW_BLOCKS, DEFAULT_REVALIDATE_SECS, PreviewCache,
            PreviewUseCases,
        },
        user::{AuthUseCases, SubscriptionRepo, UserRepo},
    },
};

pub const TEST_HOOK_SECRET: &str = "test_hook_secret_12345678";

pub fn test_config() -> AppConfig {
    AppConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        cors_origin: HeaderValue::from_static("http://localhost:3000"),
        database_url: "postgres://localhost/ignews_test".to_string(),
        database_max_connections: 1,
        redis_url: "redis://127.0.0.1:6379".to_string(),
        hook_secret: SecretString::new(TEST_HOOK_SECRET.into()),
        prismic_api_url: Url::parse("https://ignews-test.cdn.prismic.io/api/v2").unwrap(),
        prismic_access_token: None,
        preview_revalidate_secs: DEFAULT_REVALIDATE_SECS,
        preview_block_limit: DEFAULT_PREVIEW_BLOCKS,
        log_file: "test.log".to_string(),
    }
}

pub struct TestAppStateBuilder {
    users: Arc<dyn UserRepo>,
    subscriptions: Arc<dyn SubscriptionRepo>,
    content: Arc<dyn ContentSource>,
    cache: Arc<dyn PreviewCache>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepo::new()),
            subscriptions: Arc::new(InMemorySubscriptionRepo::new()),
            content: Arc::new(InMemoryContentSource::new()),
            cache: Arc::new(InMemoryPreviewCache::new()),
        }
    }

    pub fn with_users(mut self, users: Arc<dyn UserRepo>) -> Self {
        self.users = users;
        self
    }

    pub fn with_subscriptions(mut self, subscriptions: Arc<dyn SubscriptionRepo>) -> Self {
        self.subscriptions = subscriptions;
        self
    }

    pub fn with_content(mut self, content: Arc<dyn ContentSource>) -> Self {
        self.content = content;
        self
    }

    pub fn with_cache(mut self, cache: Arc<dyn PreviewCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn build(self) -> AppState {
        let config = test_config();

        let auth_use_cases = AuthUseCases::new(self.users, self.subscriptions);
        let preview_use_cases = PreviewUseCases::new(
            self.content,
            self.cache,
            config.preview_revalidate_secs,
            config.preview_block_limit,
        );

        AppState {
            config: Arc::new(config),
            auth_use_cases: Arc::new(auth_use_cases),
            preview_use_cases: Arc::new(preview_use_cases),
        }
    }
}
