//! Upstream catalog provider port.

use async_trait::async_trait;
use serde_json::Value;

/// Raw access to the upstream movie metadata API.
///
/// Implementations attach the API credential and `language` to every call and
/// make exactly one attempt. Retry policy belongs to whatever wraps them.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// GET `path` with the given language and extra query parameters.
    async fn call(
        &self,
        path: &str,
        language: &str,
        params: &[(&str, &str)],
    ) -> Result<Value, CallError>;
}

/// Unclassified failure of a single upstream call.
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    /// No HTTP response was received.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Upstream answered with a non-2xx status.
    #[error("Upstream responded with HTTP {status}")]
    Http { status: u16, body: String },

    /// A 2xx response whose body was not JSON.
    #[error("Invalid upstream payload: {0}")]
    Decode(String),
}
