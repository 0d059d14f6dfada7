use crate::{
    adapters::{cms::PrismicClient, http::app_state::AppState},
    infra::{
        InfraError, config::AppConfig, postgres_persistence, preview_cache::RedisPreviewCache,
    },
    use_cases::{
        preview::{ContentSource, PreviewCache, PreviewUseCases},
        user::{AuthUseCases, SubscriptionRepo, UserRepo},
    },
};
use std::fs::File;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub async fn init_app_state() -> Result<AppState, InfraError> {
    let mut config = AppConfig::from_env();

    init_tracing(&config.log_file)?;

    let postgres_arc = Arc::new(
        postgres_persistence(&config.database_url, config.database_max_connections).await?,
    );

    let preview_cache = Arc::new(RedisPreviewCache::new(&config.redis_url).await?);
    let content = Arc::new(PrismicClient::new(
        config.prismic_api_url.clone(),
        config.prismic_access_token.take(),
    )?);

    let auth_use_cases = AuthUseCases::new(
        postgres_arc.clone() as Arc<dyn UserRepo>,
        postgres_arc.clone() as Arc<dyn SubscriptionRepo>,
    );

    let preview_use_cases = PreviewUseCases::new(
        content as Arc<dyn ContentSource>,
        preview_cache as Arc<dyn PreviewCache>,
        config.preview_revalidate_secs,
        config.preview_block_limit,
    );

    Ok(AppState {
        config: Arc::new(config),
        auth_use_cases: Arc::new(auth_use_cases),
        preview_use_cases: Arc::new(preview_use_cases),
    })
}

pub fn init_tracing(log_file: &str) -> Result<(), InfraError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ignews=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false) // don't show target (module path)
        .with_level(true)
        .pretty();

    // File (structured JSON logs)
    let file = File::create(log_file).map_err(InfraError::LogFile)?;
    let json_layer = fmt::layer()
        .json()
        .with_writer(file)
        .with_current_span(true)
        .with_span_list(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();

    Ok(())
}
