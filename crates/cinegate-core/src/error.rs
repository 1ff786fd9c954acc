//! Catalog error taxonomy.

use thiserror::Error;

use crate::ports::{CacheError, CallError};

/// Classified upstream failure - a pure function of the HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    #[error("Resource not found upstream")]
    NotFound,

    #[error("Upstream rejected the API credential")]
    InvalidCredentials,

    #[error("Upstream rate limit exceeded")]
    RateLimited,

    #[error("Upstream fault ({status}): {message}")]
    Fault { status: u16, message: String },
}

/// Errors surfaced by catalog read operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// No HTTP response at all (connect failure, timeout).
    #[error("Upstream transport failed: {0}")]
    Transport(String),

    #[error("Upstream payload could not be decoded: {0}")]
    Decode(String),

    #[error("Cache failure: {0}")]
    Cache(#[from] CacheError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<CallError> for CatalogError {
    fn from(err: CallError) -> Self {
        match err {
            CallError::Http { status, body } => {
                CatalogError::Upstream(crate::catalog::classify(status, &body))
            }
            CallError::Transport(msg) => CatalogError::Transport(msg),
            CallError::Decode(msg) => CatalogError::Decode(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_failures_are_classified() {
        let err = CatalogError::from(CallError::Http {
            status: 404,
            body: String::new(),
        });
        assert!(matches!(err, CatalogError::Upstream(UpstreamError::NotFound)));
    }

    #[test]
    fn test_transport_failure_stays_distinct() {
        let err = CatalogError::from(CallError::Transport("connection refused".into()));
        assert!(matches!(err, CatalogError::Transport(_)));
    }
}
