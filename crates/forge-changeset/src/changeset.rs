// changeset.rs — One applied batch and its pre-batch snapshot.
//
// A ChangeSet is what `apply_operations` hands back to the caller: the
// operations exactly as received, plus the state of every touched path as it
// was before *any* operation in the batch ran. Reverting restores those
// paths directly, so a batch that writes the same path twice reverts to the
// original state, never to the intermediate one.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::operation::FileOperation;
use crate::snapshot::Snapshot;

/// An applied operation batch with its pre-batch snapshot.
///
/// Owned by whoever requested the apply. It goes stale silently if the same
/// paths are changed by something else before it is reverted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChangeSet {
    /// Unique identifier for this change-set.
    pub changeset_id: Uuid,

    /// When the batch was applied.
    pub created_at: DateTime<Utc>,

    /// The batch, in the order it was applied.
    pub operations: Vec<FileOperation>,

    /// Pre-batch state, one entry per distinct touched path.
    pub before: BTreeMap<String, Snapshot>,

    /// SHA-256 of the operations and snapshot, for integrity checks on reload.
    pub content_hash: String,
}

impl ChangeSet {
    /// Create a change-set with a freshly computed content hash.
    pub fn new(operations: Vec<FileOperation>, before: BTreeMap<String, Snapshot>) -> Self {
        let content_hash = compute_content_hash(&operations, &before);
        Self {
            changeset_id: Uuid::new_v4(),
            created_at: Utc::now(),
            operations,
            before,
            content_hash,
        }
    }

    /// Verify the content hash matches the operations and snapshot.
    pub fn verify_hash(&self) -> bool {
        self.content_hash == compute_content_hash(&self.operations, &self.before)
    }

    /// Pre-batch state of `path`, if the batch touched it.
    pub fn snapshot(&self, path: &str) -> Option<&Snapshot> {
        self.before.get(path)
    }

    /// Distinct paths touched by the batch, sorted.
    pub fn paths(&self) -> BTreeSet<&str> {
        self.operations.iter().filter_map(FileOperation::path).collect()
    }

    /// True if the batch contained no operations at all.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// One-line description for listings, e.g. "2 write(s), 1 delete(s)".
    pub fn summary(&self) -> String {
        let writes = self
            .operations
            .iter()
            .filter(|op| matches!(op, FileOperation::WriteFile { .. }))
            .count();
        let deletes = self
            .operations
            .iter()
            .filter(|op| matches!(op, FileOperation::DeleteFile { .. }))
            .count();
        let ignored = self.operations.len() - writes - deletes;

        let mut summary = format!("{} write(s), {} delete(s)", writes, deletes);
        if ignored > 0 {
            summary.push_str(&format!(", {} ignored", ignored));
        }
        summary
    }
}

fn compute_content_hash(
    operations: &[FileOperation],
    before: &BTreeMap<String, Snapshot>,
) -> String {
    let json = serde_json::to_string(&(operations, before)).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ChangeSet {
        let ops = vec![
            FileOperation::write("x.ts", "let a=1;"),
            FileOperation::delete("y.ts"),
            FileOperation::write("x.ts", "let a=2;"),
        ];
        let mut before = BTreeMap::new();
        before.insert("x.ts".to_string(), Snapshot::Absent);
        before.insert("y.ts".to_string(), Snapshot::Present("let b=2;".to_string()));
        ChangeSet::new(ops, before)
    }

    #[test]
    fn creation_computes_hash() {
        let cs = sample();
        assert_eq!(cs.content_hash.len(), 64);
        assert!(cs.verify_hash());
    }

    #[test]
    fn hash_is_deterministic() {
        let a = sample();
        let b = sample();
        assert_ne!(a.changeset_id, b.changeset_id);
        assert_eq!(a.content_hash, b.content_hash);
    }

    #[test]
    fn tampering_breaks_hash() {
        let mut cs = sample();
        cs.before
            .insert("x.ts".to_string(), Snapshot::Present("evil".to_string()));
        assert!(!cs.verify_hash());
    }

    #[test]
    fn paths_are_distinct() {
        let cs = sample();
        let paths: Vec<&str> = cs.paths().into_iter().collect();
        assert_eq!(paths, vec!["x.ts", "y.ts"]);
    }

    #[test]
    fn summary_counts_kinds() {
        let mut cs = sample();
        assert_eq!(cs.summary(), "2 write(s), 1 delete(s)");

        cs.operations
            .push(FileOperation::Unknown(serde_json::json!({"op": "chmod"})));
        assert_eq!(cs.summary(), "2 write(s), 1 delete(s), 1 ignored");
    }

    #[test]
    fn serialization_round_trip() {
        let cs = sample();
        let json = serde_json::to_string(&cs).unwrap();
        let restored: ChangeSet = serde_json::from_str(&json).unwrap();
        assert_eq!(cs, restored);
        assert!(restored.verify_hash());
    }
}
