//! Error types for the vaultprep brief compiler
//!
//! This module provides structured error definitions using thiserror, with
//! anyhow used for ad-hoc error propagation at the edges.
//!
//! Two failure classes matter to callers: vault access failures propagate
//! uncaught out of the relevance engine, while completion failures are
//! absorbed by the ranking fallback and never surface. Empty results are
//! not errors anywhere in the pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for vaultprep operations
#[derive(Error, Debug)]
pub enum PrepError {
    /// Vault could not be opened or read
    #[error("Vault access error: {0}")]
    VaultAccess(String),

    /// Note does not exist in the vault
    #[error("Note not found: {}", .0.display())]
    NoteNotFound(PathBuf),

    /// Completion API request failed or returned a malformed response
    #[error("Completion error: {0}")]
    Completion(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Frontmatter could not be parsed
    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] serde_yaml::Error),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for vaultprep operations
pub type Result<T> = std::result::Result<T, PrepError>;

/// Convert anyhow::Error to PrepError
impl From<anyhow::Error> for PrepError {
    fn from(err: anyhow::Error) -> Self {
        PrepError::Other(err.to_string())
    }
}
