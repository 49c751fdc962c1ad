// error.rs — Error types for the remote mirror.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while pushing to or exporting from a mirror.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// The HTTP request could not be sent or its body not decoded.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("mirror returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The local mirror's file store failed.
    #[error("store error: {0}")]
    Store(#[from] forge_vfs::VfsError),

    /// Writing an exported bundle to disk failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A bundle path would land outside the export directory.
    #[error("path traversal detected: '{path}'")]
    PathTraversal { path: String },

    /// The mirror is not configured well enough to be used.
    #[error("invalid mirror configuration: {0}")]
    InvalidConfig(String),
}
