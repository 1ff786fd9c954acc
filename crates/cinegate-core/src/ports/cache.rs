use async_trait::async_trait;
use std::time::Duration;

/// Key-value store fronting the upstream catalog (Redis, in-memory).
///
/// Every operation touches a single key; writes replace the whole value.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Get a value. `Ok(None)` is a miss; `Err` means the store is unusable.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Set a value with optional TTL.
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), CacheError>;

    /// Delete a key from the cache.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

/// Cache operation errors.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Operation failed: {0}")]
    Operation(String),
}
