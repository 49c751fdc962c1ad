// mirror.rs — The RemoteMirror trait and per-operation results.

use forge_changeset::FileOperation;
use serde::{Deserialize, Serialize};

use crate::bundle::ProjectBundle;
use crate::error::MirrorError;

/// Outcome of one operation on the mirror.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OperationResult {
    pub path: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OperationResult {
    pub fn ok(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            success: true,
            error: None,
        }
    }

    pub fn failed(path: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            success: false,
            error: Some(error.into()),
        }
    }
}

/// A remote copy of one project.
pub trait RemoteMirror {
    /// Apply a batch to the mirror.
    ///
    /// Every known operation yields one result, in batch order; unknown
    /// operations yield none. A failed operation does not stop the batch.
    /// `Err` is reserved for failures of the push as a whole.
    fn push(&mut self, operations: &[FileOperation]) -> Result<Vec<OperationResult>, MirrorError>;

    /// Export the mirrored project.
    fn export(&self) -> Result<ProjectBundle, MirrorError>;
}

/// Count failed results, for log lines and CLI summaries.
pub fn failure_count(results: &[OperationResult]) -> usize {
    results.iter().filter(|r| !r.success).count()
}
