//! Application state - shared across all handlers.

use std::sync::Arc;

use cinegate_core::CatalogService;
use cinegate_core::ports::{Cache, PubSub, ViewNotifier};
use cinegate_infra::{
    ChannelViewNotifier, InMemoryCache, InMemoryPubSub, TmdbClient, TmdbConfigError,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
}

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Upstream(#[from] TmdbConfigError),

    #[error("Redis unavailable and fallback disabled: {0}")]
    Redis(String),
}

impl AppState {
    /// Build the catalog service with the configured adapters.
    pub async fn new(config: &AppConfig) -> Result<Self, StartupError> {
        let provider = Arc::new(TmdbClient::new(config.tmdb.clone())?);
        let (cache, notifier) = build_stores(config).await?;

        let catalog = CatalogService::new(cache, provider, notifier)
            .with_default_language(config.default_language.clone());

        tracing::info!(
            default_language = %config.default_language,
            "Application state initialized"
        );

        Ok(Self {
            catalog: Arc::new(catalog),
        })
    }
}

#[cfg(feature = "redis")]
async fn build_stores(
    config: &AppConfig,
) -> Result<(Arc<dyn Cache>, Arc<dyn ViewNotifier>), StartupError> {
    use cinegate_infra::{RedisCache, RedisPubSub};

    let Some(redis) = &config.redis else {
        tracing::warn!("REDIS_URL not set. Running with in-memory cache and event channel.");
        return Ok(in_memory_stores(config).await);
    };

    let connected = match RedisCache::new(redis).await {
        Ok(cache) => RedisPubSub::new(redis)
            .await
            .map(|pubsub| (cache, pubsub))
            .map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };

    match connected {
        Ok((cache, pubsub)) => {
            let cache: Arc<dyn Cache> = Arc::new(cache);
            let notifier: Arc<dyn ViewNotifier> = Arc::new(ChannelViewNotifier::new(
                Arc::new(pubsub),
                config.view_events.clone(),
            ));
            Ok((cache, notifier))
        }
        Err(e) if redis.fallback_to_memory => {
            tracing::error!(error = %e, "Failed to connect to Redis. Using in-memory fallback.");
            Ok(in_memory_stores(config).await)
        }
        Err(e) => Err(StartupError::Redis(e)),
    }
}

#[cfg(not(feature = "redis"))]
async fn build_stores(
    config: &AppConfig,
) -> Result<(Arc<dyn Cache>, Arc<dyn ViewNotifier>), StartupError> {
    tracing::info!("Running without redis feature - using in-memory cache and event channel");
    Ok(in_memory_stores(config).await)
}

/// In-process stores. View events are logged by a local subscriber since
/// nothing outside the process can receive them.
async fn in_memory_stores(config: &AppConfig) -> (Arc<dyn Cache>, Arc<dyn ViewNotifier>) {
    let pubsub = Arc::new(InMemoryPubSub::default());

    let subscribed = pubsub
        .subscribe(&config.view_events.channel, |msg| {
            Box::pin(async move {
                tracing::info!(channel = %msg.channel, payload = %msg.payload, "View event");
            })
        })
        .await;
    if let Err(e) = subscribed {
        tracing::warn!(error = %e, "Failed to attach view event log subscriber");
    }

    let cache: Arc<dyn Cache> = Arc::new(InMemoryCache::new());
    let notifier: Arc<dyn ViewNotifier> =
        Arc::new(ChannelViewNotifier::new(pubsub, config.view_events.clone()));
    (cache, notifier)
}
