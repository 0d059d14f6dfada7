use std::net::SocketAddr;

use axum::http::HeaderValue;
use env_helpers::{get_env, get_env_default};
use secrecy::SecretString;
use url::Url;

use crate::use_cases::preview::{DEFAULT_PREVIEW_BLOCKS, DEFAULT_REVALIDATE_SECS};

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub cors_origin: HeaderValue,
    pub database_url: String,
    pub database_max_connections: u32,
    pub redis_url: String,
    /// Bearer secret shared with the authentication framework that calls the hooks.
    pub hook_secret: SecretString,
    /// CMS API entry point, e.g. `https://<repo>.cdn.prismic.io/api/v2`.
    pub prismic_api_url: Url,
    pub prismic_access_token: Option<SecretString>,
    /// Lifetime of a generated preview.
    pub preview_revalidate_secs: u64,
    /// Content blocks shown in a preview.
    pub preview_block_limit: usize,
    pub log_file: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_addr: SocketAddr =
            get_env_default("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3001)));
        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:3000"))
                .parse()
                .expect("CORS_ORIGIN must be a valid header value");

        let database_url: String = get_env("DATABASE_URL");
        let database_max_connections: u32 = get_env_default("DATABASE_MAX_CONNECTIONS", 5);
        let redis_url: String = get_env_default("REDIS_URL", "redis://127.0.0.1:6379".to_string());

        let hook_secret: SecretString = SecretString::new(get_env::<String>("HOOK_SECRET").into());

        let prismic_api_url: Url = get_env("PRISMIC_API_URL");
        let prismic_access_token: Option<SecretString> = std::env::var("PRISMIC_ACCESS_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty())
            .map(|t| SecretString::new(t.into()));

        let preview_revalidate_secs: u64 =
            get_env_default("PREVIEW_REVALIDATE_SECS", DEFAULT_REVALIDATE_SECS);
        let preview_block_limit: usize =
            get_env_default("PREVIEW_BLOCK_LIMIT", DEFAULT_PREVIEW_BLOCKS);

        let log_file: String = get_env_default("LOG_FILE", "app.log".to_string());

        Self {
            bind_addr,
            cors_origin,
            database_url,
            database_max_connections,
            redis_url,
            hook_secret,
            prismic_api_url,
            prismic_access_token,
            preview_revalidate_secs,
            preview_block_limit,
            log_file,
        }
    }
}
