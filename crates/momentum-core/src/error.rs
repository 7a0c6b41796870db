//! Core error types for momentum-core.
//!
//! Errors are grouped by concern with thiserror. Persistence and widget-sync
//! failures inside the store's save cycle are deliberately *not* surfaced
//! through these types; the store logs and swallows them (see `store.rs`).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for momentum-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Import failures (decode or version gate)
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the local database
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Import-specific errors. Any variant means no mutation was performed.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The embedded version tag does not match the running version
    #[error("Version mismatch: export is '{found}', expected '{expected}'")]
    VersionMismatch { found: String, expected: String },

    /// The export payload could not be decoded
    #[error("Failed to decode export data: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::QueryFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
