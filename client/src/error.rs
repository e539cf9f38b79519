//! Error types for the client crate
//!
//! This module provides the error type shared by the upstream clients and the
//! content resolver.

use advocacy_site_core::CoreError;
use thiserror::Error;

/// Error type for client operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Upstream answered with an error status
    #[error("Server error: {0}")]
    Server(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Caller broke an input contract
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No addressing strategy produced a document
    #[error("Content not found for slug '{slug}' in locale '{locale}'")]
    NotFound {
        /// Requested base slug
        slug: String,

        /// Requested locale
        locale: String,
    },

    /// Token could not be obtained or was rejected
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Client is missing configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the core crate
    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Build a server error from a non-success response
pub(crate) async fn server_error(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read error response".to_string());
    ClientError::Server(format!("{} - {}", status, text))
}
