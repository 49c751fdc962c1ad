// error.rs — Error types for the virtual file store.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during file store operations.
///
/// A missing path is never an error: `get` returns `None` and `delete`
/// is a no-op.
#[derive(Debug, Error)]
pub enum VfsError {
    /// A file I/O operation on the backing storage failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file table could not be serialized or parsed.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The backend refused the operation (store closed, read-only, quota).
    #[error("file store unavailable: {0}")]
    Unavailable(String),
}
