//! Upstream failure classification.

use serde::Deserialize;

use crate::error::UpstreamError;

const UNKNOWN_UPSTREAM_MESSAGE: &str = "Unknown TMDb API error";

/// Error body the provider sends alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    status_message: Option<String>,
}

/// Map an upstream HTTP failure to its domain kind.
///
/// Only the status decides the kind; the body contributes the message of a
/// generic fault and nothing else.
pub fn classify(status: u16, body: &str) -> UpstreamError {
    match status {
        404 => UpstreamError::NotFound,
        401 => UpstreamError::InvalidCredentials,
        429 => UpstreamError::RateLimited,
        _ => UpstreamError::Fault {
            status,
            message: serde_json::from_str::<ProviderErrorBody>(body)
                .ok()
                .and_then(|b| b.status_message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| UNKNOWN_UPSTREAM_MESSAGE.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_table() {
        assert_eq!(classify(404, ""), UpstreamError::NotFound);
        assert_eq!(classify(401, ""), UpstreamError::InvalidCredentials);
        assert_eq!(classify(429, ""), UpstreamError::RateLimited);
        assert!(matches!(
            classify(500, ""),
            UpstreamError::Fault { status: 500, .. }
        ));
    }

    #[test]
    fn test_fault_carries_upstream_message() {
        let body = r#"{"status_code": 11, "status_message": "Internal error: Something went wrong."}"#;
        assert_eq!(
            classify(503, body),
            UpstreamError::Fault {
                status: 503,
                message: "Internal error: Something went wrong.".to_string(),
            }
        );
    }

    #[test]
    fn test_fault_without_message_uses_fallback() {
        assert_eq!(
            classify(502, "<html>Bad Gateway</html>"),
            UpstreamError::Fault {
                status: 502,
                message: UNKNOWN_UPSTREAM_MESSAGE.to_string(),
            }
        );
    }

    #[test]
    fn test_body_never_changes_the_kind() {
        let body = r#"{"status_code": 7, "status_message": "Invalid API key"}"#;
        assert_eq!(classify(404, body), UpstreamError::NotFound);
    }
}
