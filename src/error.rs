//! Error types for the import pipeline.

use std::path::PathBuf;

use thiserror::Error;

use crate::integrations::TrelloError;

/// Result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// Errors that can occur while importing a checklist.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Input document does not exist.
    #[error("Markdown file '{}' not found!", .0.display())]
    NotFound(PathBuf),

    /// Input document exists but could not be read.
    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Custom configuration could not be loaded.
    #[error("Failed to load configuration '{}': {source}", path.display())]
    ConfigLoad {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Required settings (credentials) are missing.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The ticketing service rejected a board or label request.
    #[error(transparent)]
    Remote(#[from] TrelloError),
}
