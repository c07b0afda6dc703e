//! Crate-wide error type.
//!
//! Resolution-stage errors (`DirectoryRead`) abort a whole drop. Routing-stage errors
//! (`FileAccess`, `Upload`, `Metadata`) are caught per entry by the router and turned into
//! failed entries, so they never cross the orchestrator boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Directory read error: {0}")]
    DirectoryRead(String),

    #[error("File access error: {0}")]
    FileAccess(String),

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Metadata write error: {0}")]
    Metadata(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
