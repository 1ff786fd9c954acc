//! Cache-aside orchestration over the upstream catalog.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::catalog::{CacheKey, Normalize};
use crate::domain::{ActorId, CatalogItem, CatalogItemDetails, CatalogPage, ViewEvent};
use crate::error::CatalogError;
use crate::ports::{Cache, CacheError, CatalogProvider, ViewNotifier};

/// Locale used when a caller does not ask for one.
pub const DEFAULT_LANGUAGE: &str = "pt-BR";

/// Read operations over the catalog, fronted by the cache.
///
/// Only raw upstream values are ever written to the cache; normalization is
/// applied on the way out, for hits and misses alike.
///
/// Concurrent misses on the same key are not coalesced: each one calls upstream
/// and the last write wins.
pub struct CatalogService {
    cache: Arc<dyn Cache>,
    provider: Arc<dyn CatalogProvider>,
    notifier: Arc<dyn ViewNotifier>,
    default_language: String,
}

impl CatalogService {
    pub fn new(
        cache: Arc<dyn Cache>,
        provider: Arc<dyn CatalogProvider>,
        notifier: Arc<dyn ViewNotifier>,
    ) -> Self {
        Self {
            cache,
            provider,
            notifier,
            default_language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }

    /// Movies currently popular upstream.
    pub async fn popular(&self, language: Option<&str>) -> Result<Vec<CatalogItem>, CatalogError> {
        let key = CacheKey::popular(self.language(language));
        let items = self
            .read_through(&key, "/movie/popular", &[], decode_page)
            .await?;
        Ok(items.normalize())
    }

    /// Movies currently in theaters.
    pub async fn now_playing(
        &self,
        language: Option<&str>,
    ) -> Result<Vec<CatalogItem>, CatalogError> {
        let key = CacheKey::now_playing(self.language(language));
        let items = self
            .read_through(&key, "/movie/now_playing", &[], decode_page)
            .await?;
        Ok(items.normalize())
    }

    /// Free-text search. An empty result is a valid, cached answer.
    pub async fn search(
        &self,
        query: &str,
        language: Option<&str>,
    ) -> Result<Vec<CatalogItem>, CatalogError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CatalogError::InvalidRequest(
                "search query must not be empty".to_string(),
            ));
        }

        let key = CacheKey::search(query, self.language(language));
        let items = self
            .read_through(&key, "/search/movie", &[("query", query)], decode_page)
            .await?;
        Ok(items.normalize())
    }

    /// Details for one item. When `actor` is given, a view event is handed to
    /// the notifier once the read has succeeded.
    pub async fn details(
        &self,
        id: u64,
        language: Option<&str>,
        actor: Option<ActorId>,
    ) -> Result<CatalogItemDetails, CatalogError> {
        if id == 0 {
            return Err(CatalogError::InvalidRequest(
                "item id must be positive".to_string(),
            ));
        }

        let language = self.language(language);
        let key = CacheKey::details(id, language);
        let path = format!("/movie/{id}");
        let details = self.read_through(&key, &path, &[], decode_details).await?;

        if let Some(actor_id) = actor {
            self.notifier
                .notify_viewed(ViewEvent::new(actor_id, id, language));
        }

        Ok(details.normalize())
    }

    /// Drop a single entry so the next read goes upstream.
    pub async fn invalidate(&self, key: &CacheKey) -> Result<(), CatalogError> {
        self.cache.delete(&key.to_string()).await?;
        tracing::debug!(key = %key, "Catalog cache entry invalidated");
        Ok(())
    }

    fn language<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(&self.default_language)
    }

    async fn read_through<T>(
        &self,
        key: &CacheKey,
        path: &str,
        params: &[(&str, &str)],
        decode: fn(Value) -> Result<T, serde_json::Error>,
    ) -> Result<T, CatalogError>
    where
        T: Serialize + DeserializeOwned,
    {
        let cache_key = key.to_string();

        if let Some(cached) = self.cache.get(&cache_key).await? {
            match serde_json::from_str::<T>(&cached) {
                Ok(value) => {
                    tracing::debug!(key = %cache_key, "Catalog cache hit");
                    return Ok(value);
                }
                Err(e) => {
                    tracing::warn!(key = %cache_key, error = %e, "Discarding undecodable cache entry");
                }
            }
        }

        tracing::debug!(key = %cache_key, path = %path, "Catalog cache miss");

        let raw = self
            .provider
            .call(path, key.language(), params)
            .await
            .map_err(|e| {
                let err = CatalogError::from(e);
                tracing::warn!(key = %cache_key, error = %err, "Upstream catalog call failed");
                err
            })?;

        let value = decode(raw).map_err(|e| CatalogError::Decode(e.to_string()))?;
        let serialized = serde_json::to_string(&value)
            .map_err(|e| CacheError::Serialization(e.to_string()))?;
        self.cache
            .set(&cache_key, &serialized, Some(key.ttl()))
            .await?;

        Ok(value)
    }
}

fn decode_page(raw: Value) -> Result<Vec<CatalogItem>, serde_json::Error> {
    serde_json::from_value::<CatalogPage>(raw).map(|page| page.results)
}

fn decode_details(raw: Value) -> Result<CatalogItemDetails, serde_json::Error> {
    serde_json::from_value(raw)
}
