//! TMDb HTTP client implementing the catalog provider port.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use cinegate_core::ports::{CallError, CatalogProvider};

/// Upstream API configuration.
#[derive(Clone)]
pub struct TmdbConfig {
    /// Base URL without trailing slash (e.g., https://api.themoviedb.org/3)
    pub base_url: String,
    pub api_key: String,
    /// Whole-request timeout; the only bound on a slow upstream call.
    pub timeout: Duration,
}

// api_key is redacted
impl fmt::Debug for TmdbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TmdbConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl TmdbConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `TMDB_API_KEY` is required.
    pub fn from_env() -> Result<Self, TmdbConfigError> {
        let api_key = std::env::var("TMDB_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or(TmdbConfigError::Missing("TMDB_API_KEY"))?;

        Ok(Self {
            base_url: std::env::var("TMDB_API_URL")
                .unwrap_or_else(|_| "https://api.themoviedb.org/3".to_string()),
            api_key,
            timeout: Duration::from_secs(
                std::env::var("TMDB_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
        })
    }
}

/// Single-attempt client for the upstream movie metadata API.
pub struct TmdbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(config: TmdbConfig) -> Result<Self, TmdbConfigError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TmdbConfigError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }
}

#[async_trait]
impl CatalogProvider for TmdbClient {
    async fn call(
        &self,
        path: &str,
        language: &str,
        params: &[(&str, &str)],
    ) -> Result<Value, CallError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(&[("api_key", self.api_key.as_str()), ("language", language)])
            .query(params)
            .send()
            .await
            .map_err(|e| CallError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // Body only feeds the fault message
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(path = %path, status = status.as_u16(), "Upstream returned an error status");
            return Err(CallError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| CallError::Transport(e.to_string()))?;

        serde_json::from_slice(&bytes).map_err(|e| CallError::Decode(e.to_string()))
    }
}
