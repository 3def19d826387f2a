//! Error types for the kt-app service layer.

use std::path::PathBuf;

/// Unified error for the CLI and any other front end.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Source error: {0}")]
    Source(String),

    #[error("Graph error: {0}")]
    Graph(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Failed to read layout config: {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Layout config error: {0}")]
    Config(String),

    #[error("Context not found: {0}")]
    ContextNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for kt-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<kt_source::SourceError> for AppError {
    fn from(err: kt_source::SourceError) -> Self {
        AppError::Source(err.to_string())
    }
}

impl From<kt_core::KtError> for AppError {
    fn from(err: kt_core::KtError) -> Self {
        AppError::Graph(err.to_string())
    }
}

impl From<kt_layout::LayoutError> for AppError {
    fn from(err: kt_layout::LayoutError) -> Self {
        AppError::Layout(err.to_string())
    }
}
