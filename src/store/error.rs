//! Store error types.

use std::path::PathBuf;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Failures while reading from or writing to the photo directory.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The store directory could not be created.
    #[error("failed to create store directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No temporary file could be created inside the store directory.
    #[error("failed to create temporary file in {path:?}: {source}")]
    TempFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing or flushing the temporary file failed.
    #[error("failed to write upload: {0}")]
    Write(#[source] std::io::Error),

    /// The temporary file could not be moved to its final name.
    #[error("failed to move upload to {filename}: {source}")]
    Persist {
        filename: String,
        #[source]
        source: std::io::Error,
    },

    /// Every generated name collided with an existing file.
    #[error("no free filename after {attempts} attempts")]
    NameExhausted { attempts: usize },

    /// Scanning the store directory failed.
    #[error("failed to read store directory {path:?}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A requested filename is not a valid stored photo name.
    #[error("invalid photo name: {0:?}")]
    InvalidName(String),

    /// A blocking store task panicked or was cancelled.
    #[error("store task failed: {0}")]
    Join(String),
}

impl StoreError {
    /// Short message safe to show to HTTP clients.
    #[must_use]
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::CreateDir { .. } => "Failed to create upload directory",
            Self::TempFile { .. } => "Missing a temporary folder",
            Self::Write(_) => "Failed to write file to disk",
            Self::Persist { .. } | Self::NameExhausted { .. } | Self::Join(_) => {
                "Failed to save file"
            },
            Self::ReadDir { .. } => "Failed to read photo directory",
            Self::InvalidName(_) => "Invalid photo name",
        }
    }
}
