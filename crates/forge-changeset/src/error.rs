// error.rs — Error types for the changeset subsystem.
//
// Storage failures during apply/revert are not wrapped here: the engine
// returns the file store's own `VfsError` unchanged.

use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// Errors from parsing assistant replies and persisting change-set history.
#[derive(Debug, Error)]
pub enum ChangeSetError {
    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// A history file could not be read or written.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A stored change-set no longer matches its content hash.
    #[error(
        "change-set {changeset_id} at {}:{line} failed integrity check; \
         restore or delete that line to recover",
        .path.display()
    )]
    HashMismatch {
        changeset_id: Uuid,
        path: PathBuf,
        line: usize,
    },

    /// A history line that does not parse as a record.
    #[error("corrupt history record at {}:{line}: {source}", .path.display())]
    CorruptRecord {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },

    /// A workspace ID that cannot be used as a history file name.
    #[error("invalid workspace id '{workspace}': must be a single path component")]
    InvalidWorkspace { workspace: String },
}
