//! Error types shared across dvapi crates

use thiserror::Error;

/// Result type alias for shared dvapi operations
pub type Result<T> = std::result::Result<T, DvError>;

/// Main error type for shared dvapi helpers
#[derive(Error, Debug)]
pub enum DvError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid JSON in '{path}': {source}")]
    InvalidJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
