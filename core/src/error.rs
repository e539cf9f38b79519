//! Error types for the core crate
//!
//! This module provides a consolidated error type for the core crate,
//! wrapping errors from the loaders and the input contracts of the
//! public operations.

use std::io;
use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// An input contract was violated by the caller
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Static data did not satisfy its invariants
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for the core crate
pub type Result<T> = std::result::Result<T, CoreError>;
