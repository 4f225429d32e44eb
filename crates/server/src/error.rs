use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::services::ImageProxyError;

/// Unified application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid request parameters.
    #[error("{0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// Image proxy host not on the allow-list.
    #[error("Domain not allowed: {0}")]
    DomainNotAllowed(String),

    /// Image proxy rate limit hit with no servable cached copy.
    #[error("Rate limit exceeded, please try again later")]
    RateLimited,

    /// Upstream store call failed (single-store endpoints only; the
    /// aggregator absorbs these).
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Unexpected internal failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body; every JSON error uses this shape.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "Bad request"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "Not found"),
            AppError::DomainNotAllowed(host) => {
                // Potential abuse signal: someone pointing the proxy at an
                // arbitrary host.
                tracing::warn!("Image proxy rejected disallowed host: {}", host);
                (StatusCode::FORBIDDEN, "Domain not allowed")
            }
            AppError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "Rate limit exceeded"),
            AppError::Upstream(msg) => {
                tracing::error!("Upstream error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Upstream error")
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

impl From<catalog::ProviderError> for AppError {
    fn from(e: catalog::ProviderError) -> Self {
        AppError::Upstream(e.to_string())
    }
}

impl From<ImageProxyError> for AppError {
    fn from(e: ImageProxyError) -> Self {
        match e {
            ImageProxyError::InvalidUrl(url) => {
                AppError::BadRequest(format!("Invalid image URL: {}", url))
            }
            ImageProxyError::DomainNotAllowed(host) => AppError::DomainNotAllowed(host),
            ImageProxyError::RateLimited => AppError::RateLimited,
            ImageProxyError::Fetch(e) => AppError::Upstream(e.to_string()),
        }
    }
}
