//! Storage error types.

use thiserror::Error;

/// Errors from the durable storage layer.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Filesystem failure reading or writing a slot.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized for storage.
    #[error("storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// No usable storage directory could be determined.
    #[error("no storage directory available")]
    NoStorageDir,
}
