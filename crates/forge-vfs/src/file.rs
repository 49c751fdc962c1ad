// file.rs — A single record in the file table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One file in the workspace.
///
/// The path is the unique key. Every write replaces `content` and bumps
/// `updated_at`; there is no version history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VFile {
    /// Workspace-relative path (e.g., "src/main.ts").
    pub path: String,

    /// Full UTF-8 content of the file.
    pub content: String,

    /// When the file was last written.
    pub updated_at: DateTime<Utc>,
}

impl VFile {
    /// Create a record stamped with the current time.
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            updated_at: Utc::now(),
        }
    }

    /// Size of the content in bytes.
    pub fn size(&self) -> usize {
        self.content.len()
    }
}
