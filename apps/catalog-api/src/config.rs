//! Application configuration loaded from environment variables.

use std::env;

use cinegate_core::catalog::DEFAULT_LANGUAGE;
use cinegate_infra::{TmdbConfig, TmdbConfigError, ViewNotifierConfig};

#[cfg(feature = "redis")]
use cinegate_infra::RedisConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Locale used when a request does not name one.
    pub default_language: String,
    pub tmdb: TmdbConfig,
    pub view_events: ViewNotifierConfig,
    /// `None` runs the cache and event channel in memory.
    #[cfg(feature = "redis")]
    pub redis: Option<RedisConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, TmdbConfigError> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            default_language: env::var("CATALOG_DEFAULT_LANGUAGE")
                .ok()
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            tmdb: TmdbConfig::from_env()?,
            view_events: ViewNotifierConfig::from_env(),
            #[cfg(feature = "redis")]
            redis: RedisConfig::from_env(),
        })
    }
}
