//! Error handling - maps catalog failures to RFC 7807 responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use cinegate_core::{CatalogError, UpstreamError};
use cinegate_shared::ErrorResponse;
use std::fmt;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    /// The provider rejected this service's own API key.
    UpstreamUnauthorized,
    RateLimited,
    BadGateway(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::UpstreamUnauthorized => write!(f, "Upstream rejected credentials"),
            AppError::RateLimited => write!(f, "Upstream rate limited"),
            AppError::BadGateway(msg) => write!(f, "Bad gateway: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamUnauthorized => StatusCode::UNAUTHORIZED,
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::UpstreamUnauthorized => ErrorResponse::new(401, "Unauthorized")
                .with_detail("The catalog provider rejected the configured API key."),
            AppError::RateLimited => ErrorResponse::too_many_requests(),
            AppError::BadGateway(detail) => ErrorResponse::bad_gateway(detail),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Upstream(UpstreamError::NotFound) => {
                AppError::NotFound("Movie not found".to_string())
            }
            CatalogError::Upstream(UpstreamError::InvalidCredentials) => {
                tracing::error!("Catalog provider rejected the API key");
                AppError::UpstreamUnauthorized
            }
            CatalogError::Upstream(UpstreamError::RateLimited) => AppError::RateLimited,
            CatalogError::Upstream(UpstreamError::Fault { status, message }) => {
                tracing::warn!(status, message = %message, "Catalog provider fault");
                AppError::BadGateway(message)
            }
            CatalogError::Transport(msg) => {
                tracing::warn!("Catalog provider unreachable: {}", msg);
                AppError::BadGateway("Catalog provider unreachable".to_string())
            }
            CatalogError::Decode(msg) => {
                tracing::warn!("Catalog provider payload rejected: {}", msg);
                AppError::BadGateway("Unexpected response from catalog provider".to_string())
            }
            CatalogError::Cache(e) => AppError::Internal(format!("Cache error: {}", e)),
            CatalogError::InvalidRequest(msg) => AppError::BadRequest(msg),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
