//! Error types for the web service

use advocacy_site_client::ClientError;
use advocacy_site_core::CoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use crate::api::ApiResponse;

/// Error type for the web service
#[derive(Error, Debug)]
pub enum WebError {
    /// Requested item does not exist
    #[error("{0}")]
    NotFound(String),

    /// Request is malformed
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Feature is not configured on this deployment
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Upstream service failed
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for the web service
pub type Result<T> = std::result::Result<T, WebError>;

impl WebError {
    /// HTTP status for the error
    pub fn status(&self) -> StatusCode {
        match self {
            WebError::NotFound(_) => StatusCode::NOT_FOUND,
            WebError::BadRequest(_) => StatusCode::BAD_REQUEST,
            WebError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            WebError::Upstream(_) => StatusCode::BAD_GATEWAY,
            WebError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ClientError> for WebError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotFound { .. } => WebError::NotFound(err.to_string()),
            ClientError::InvalidInput(msg) => WebError::BadRequest(msg),
            ClientError::Config(msg) => WebError::Unavailable(msg),
            ClientError::Core(CoreError::InvalidInput(msg)) => WebError::BadRequest(msg),
            other => WebError::Upstream(other.to_string()),
        }
    }
}

impl From<CoreError> for WebError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidInput(msg) => WebError::BadRequest(msg),
            CoreError::ConfigError(msg) => WebError::Config(msg),
            other => WebError::Upstream(other.to_string()),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!("Request failed: {}", self);
        }
        let body: ApiResponse<()> = ApiResponse::Error {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
