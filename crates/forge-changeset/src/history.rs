// history.rs — ChangeSetStore trait and JsonlChangeSetStore implementation.
//
// The history records every batch the assistant applied, so the latest one
// can still be reverted after the editor restarts and so past turns can be
// listed. Each workspace gets its own JSONL file: `<store_dir>/<workspace>.jsonl`,
// one `ChangeSetRecord` per line, in the order the batches were applied.
//
// Appends are cheap; status changes and removals rewrite the file.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::changeset::ChangeSet;
use crate::error::ChangeSetError;

/// Lifecycle of a recorded change-set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChangeSetStatus {
    /// The batch is in effect.
    Applied,
    /// The batch was undone.
    Reverted,
}

impl std::fmt::Display for ChangeSetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Self::Applied => "applied",
            Self::Reverted => "reverted",
        })
    }
}

/// One line of the history file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChangeSetRecord {
    pub changeset: ChangeSet,
    pub status: ChangeSetStatus,
    /// When the status last changed.
    pub updated_at: DateTime<Utc>,
}

impl ChangeSetRecord {
    fn applied(changeset: ChangeSet) -> Self {
        Self {
            updated_at: changeset.created_at,
            changeset,
            status: ChangeSetStatus::Applied,
        }
    }
}

/// Persistence for applied change-sets.
///
/// Lets the history move from JSONL files to another backend without
/// touching callers.
pub trait ChangeSetStore {
    /// Record a freshly applied change-set.
    fn save(&mut self, workspace: &str, changeset: &ChangeSet) -> Result<(), ChangeSetError>;

    /// All records for a workspace, oldest first.
    fn list(&self, workspace: &str) -> Result<Vec<ChangeSetRecord>, ChangeSetError>;

    /// A record by change-set ID.
    fn get(
        &self,
        workspace: &str,
        changeset_id: Uuid,
    ) -> Result<Option<ChangeSetRecord>, ChangeSetError>;

    /// The most recently saved record.
    fn latest(&self, workspace: &str) -> Result<Option<ChangeSetRecord>, ChangeSetError> {
        Ok(self.list(workspace)?.pop())
    }

    /// Update the status of a record. Returns false if the ID is unknown.
    fn set_status(
        &mut self,
        workspace: &str,
        changeset_id: Uuid,
        status: ChangeSetStatus,
    ) -> Result<bool, ChangeSetError>;

    /// Remove a record. Returns false if the ID is unknown.
    fn remove(&mut self, workspace: &str, changeset_id: Uuid) -> Result<bool, ChangeSetError>;
}

/// JSON Lines file-based history.
///
/// Records are verified against their content hash when read; a record that
/// was edited by hand fails with [`ChangeSetError::HashMismatch`] naming the
/// file and line, so the entry can be restored or dropped.
#[derive(Debug)]
pub struct JsonlChangeSetStore {
    store_dir: PathBuf,
}

impl JsonlChangeSetStore {
    /// Create a store backed by the given directory, creating it if needed.
    pub fn new(store_dir: impl AsRef<Path>) -> Result<Self, ChangeSetError> {
        let store_dir = store_dir.as_ref().to_path_buf();
        fs::create_dir_all(&store_dir).map_err(|source| ChangeSetError::IoError {
            path: store_dir.clone(),
            source,
        })?;
        Ok(Self { store_dir })
    }

    /// `<store_dir>/<workspace>.jsonl`. The ID must stay inside `store_dir`.
    fn workspace_file(&self, workspace: &str) -> Result<PathBuf, ChangeSetError> {
        let mut components = Path::new(workspace).components();
        let single_normal = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !single_normal || workspace.contains(&['/', '\\'][..]) {
            return Err(ChangeSetError::InvalidWorkspace {
                workspace: workspace.to_string(),
            });
        }
        Ok(self.store_dir.join(format!("{}.jsonl", workspace)))
    }

    fn rewrite(&self, workspace: &str, records: &[ChangeSetRecord]) -> Result<(), ChangeSetError> {
        let path = self.workspace_file(workspace)?;
        let file = File::create(&path).map_err(|source| ChangeSetError::IoError {
            path: path.clone(),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        for record in records {
            let json = serde_json::to_string(record)?;
            writeln!(writer, "{}", json).map_err(|source| ChangeSetError::IoError {
                path: path.clone(),
                source,
            })?;
        }

        writer
            .flush()
            .map_err(|source| ChangeSetError::IoError { path, source })
    }
}

impl ChangeSetStore for JsonlChangeSetStore {
    fn save(&mut self, workspace: &str, changeset: &ChangeSet) -> Result<(), ChangeSetError> {
        let path = self.workspace_file(workspace)?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| ChangeSetError::IoError {
                path: path.clone(),
                source,
            })?;

        let mut writer = BufWriter::new(file);
        let json = serde_json::to_string(&ChangeSetRecord::applied(changeset.clone()))?;
        writeln!(writer, "{}", json).map_err(|source| ChangeSetError::IoError {
            path: path.clone(),
            source,
        })?;
        writer
            .flush()
            .map_err(|source| ChangeSetError::IoError { path, source })?;

        Ok(())
    }

    fn list(&self, workspace: &str) -> Result<Vec<ChangeSetRecord>, ChangeSetError> {
        let path = self.workspace_file(workspace)?;

        if !path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&path).map_err(|source| ChangeSetError::IoError {
            path: path.clone(),
            source,
        })?;

        let mut records = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|source| ChangeSetError::IoError {
                path: path.clone(),
                source,
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let record: ChangeSetRecord =
                serde_json::from_str(&line).map_err(|source| ChangeSetError::CorruptRecord {
                    path: path.clone(),
                    line: index + 1,
                    source,
                })?;
            if !record.changeset.verify_hash() {
                return Err(ChangeSetError::HashMismatch {
                    changeset_id: record.changeset.changeset_id,
                    path,
                    line: index + 1,
                });
            }
            records.push(record);
        }

        Ok(records)
    }

    fn get(
        &self,
        workspace: &str,
        changeset_id: Uuid,
    ) -> Result<Option<ChangeSetRecord>, ChangeSetError> {
        Ok(self
            .list(workspace)?
            .into_iter()
            .find(|r| r.changeset.changeset_id == changeset_id))
    }

    fn set_status(
        &mut self,
        workspace: &str,
        changeset_id: Uuid,
        status: ChangeSetStatus,
    ) -> Result<bool, ChangeSetError> {
        let mut records = self.list(workspace)?;
        let Some(record) = records
            .iter_mut()
            .find(|r| r.changeset.changeset_id == changeset_id)
        else {
            return Ok(false);
        };

        record.status = status;
        record.updated_at = Utc::now();
        self.rewrite(workspace, &records)?;
        Ok(true)
    }

    fn remove(&mut self, workspace: &str, changeset_id: Uuid) -> Result<bool, ChangeSetError> {
        let records = self.list(workspace)?;
        let original_len = records.len();

        let remaining: Vec<ChangeSetRecord> = records
            .into_iter()
            .filter(|r| r.changeset.changeset_id != changeset_id)
            .collect();

        if remaining.len() == original_len {
            return Ok(false);
        }

        self.rewrite(workspace, &remaining)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::FileOperation;
    use crate::snapshot::Snapshot;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn test_changeset(path: &str) -> ChangeSet {
        let mut before = BTreeMap::new();
        before.insert(path.to_string(), Snapshot::Absent);
        ChangeSet::new(
            vec![FileOperation::write(path, format!("content of {}", path))],
            before,
        )
    }

    #[test]
    fn save_and_list_round_trip() {
        let dir = tempdir().unwrap();
        let mut store = JsonlChangeSetStore::new(dir.path().join("history")).unwrap();

        let cs1 = test_changeset("a.ts");
        let cs2 = test_changeset("b.ts");
        store.save("ws", &cs1).unwrap();
        store.save("ws", &cs2).unwrap();

        let listed = store.list("ws").unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].changeset, cs1);
        assert_eq!(listed[1].changeset, cs2);
        assert!(listed.iter().all(|r| r.status == ChangeSetStatus::Applied));
    }

    #[test]
    fn list_empty_workspace_returns_empty() {
        let dir = tempdir().unwrap();
        let store = JsonlChangeSetStore::new(dir.path()).unwrap();
        assert!(store.list("nothing").unwrap().is_empty());
        assert!(store.latest("nothing").unwrap().is_none());
    }

    #[test]
    fn latest_is_last_saved() {
        let dir = tempdir().unwrap();
        let mut store = JsonlChangeSetStore::new(dir.path()).unwrap();

        store.save("ws", &test_changeset("a.ts")).unwrap();
        let last = test_changeset("b.ts");
        store.save("ws", &last).unwrap();

        let latest = store.latest("ws").unwrap().unwrap();
        assert_eq!(latest.changeset.changeset_id, last.changeset_id);
    }

    #[test]
    fn set_status_marks_reverted() {
        let dir = tempdir().unwrap();
        let mut store = JsonlChangeSetStore::new(dir.path()).unwrap();

        let cs = test_changeset("a.ts");
        store.save("ws", &cs).unwrap();

        assert!(store
            .set_status("ws", cs.changeset_id, ChangeSetStatus::Reverted)
            .unwrap());
        let record = store.get("ws", cs.changeset_id).unwrap().unwrap();
        assert_eq!(record.status, ChangeSetStatus::Reverted);

        assert!(!store
            .set_status("ws", Uuid::new_v4(), ChangeSetStatus::Reverted)
            .unwrap());
    }

    #[test]
    fn remove_changeset() {
        let dir = tempdir().unwrap();
        let mut store = JsonlChangeSetStore::new(dir.path()).unwrap();

        let cs1 = test_changeset("a.ts");
        let cs2 = test_changeset("b.ts");
        store.save("ws", &cs1).unwrap();
        store.save("ws", &cs2).unwrap();

        assert!(store.remove("ws", cs1.changeset_id).unwrap());
        assert!(!store.remove("ws", cs1.changeset_id).unwrap());

        let listed = store.list("ws").unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].changeset.changeset_id, cs2.changeset_id);
    }

    #[test]
    fn workspaces_are_isolated() {
        let dir = tempdir().unwrap();
        let mut store = JsonlChangeSetStore::new(dir.path()).unwrap();

        store.save("one", &test_changeset("a.ts")).unwrap();
        store.save("two", &test_changeset("b.ts")).unwrap();

        assert_eq!(store.list("one").unwrap().len(), 1);
        assert_eq!(store.list("two").unwrap().len(), 1);
    }

    #[test]
    fn store_survives_reopen() {
        let dir = tempdir().unwrap();
        let cs = test_changeset("a.ts");

        {
            let mut store = JsonlChangeSetStore::new(dir.path()).unwrap();
            store.save("ws", &cs).unwrap();
        }

        {
            let store = JsonlChangeSetStore::new(dir.path()).unwrap();
            let latest = store.latest("ws").unwrap().unwrap();
            assert_eq!(latest.changeset, cs);
        }
    }

    #[test]
    fn unknown_operations_are_stored_verbatim() {
        let dir = tempdir().unwrap();
        let mut store = JsonlChangeSetStore::new(dir.path()).unwrap();

        let raw = r#"{"op":"renameFile","path":"a.ts","to":"b.ts"}"#;
        let unknown: FileOperation = serde_json::from_str(raw).unwrap();
        let cs = ChangeSet::new(vec![unknown], BTreeMap::new());
        store.save("ws", &cs).unwrap();

        let text = fs::read_to_string(dir.path().join("ws.jsonl")).unwrap();
        assert!(text.contains(raw), "{}", text);

        let latest = store.latest("ws").unwrap().unwrap();
        assert_eq!(latest.changeset, cs);
        assert_eq!(
            serde_json::to_string(&latest.changeset.operations[0]).unwrap(),
            raw
        );
    }

    #[test]
    fn tampered_record_is_rejected() {
        let dir = tempdir().unwrap();
        let mut store = JsonlChangeSetStore::new(dir.path()).unwrap();
        store.save("ws", &test_changeset("z.ts")).unwrap();
        let cs = test_changeset("a.ts");
        store.save("ws", &cs).unwrap();

        let path = dir.path().join("ws.jsonl");
        let text = fs::read_to_string(&path).unwrap();
        fs::write(&path, text.replace("content of a.ts", "rm -rf")).unwrap();

        let err = store.list("ws").unwrap_err();
        assert!(matches!(
            &err,
            ChangeSetError::HashMismatch { changeset_id, line: 2, .. }
                if *changeset_id == cs.changeset_id
        ));
        let message = err.to_string();
        assert!(message.contains("ws.jsonl:2"), "{}", message);
        assert!(message.contains("restore or delete that line"), "{}", message);
    }

    #[test]
    fn corrupt_line_names_its_position() {
        let dir = tempdir().unwrap();
        let mut store = JsonlChangeSetStore::new(dir.path()).unwrap();
        store.save("ws", &test_changeset("a.ts")).unwrap();

        let path = dir.path().join("ws.jsonl");
        let mut text = fs::read_to_string(&path).unwrap();
        text.push_str("{not json\n");
        fs::write(&path, text).unwrap();

        let err = store.list("ws").unwrap_err();
        assert!(matches!(err, ChangeSetError::CorruptRecord { line: 2, .. }));
    }

    #[test]
    fn workspace_id_cannot_leave_store_dir() {
        let dir = tempdir().unwrap();
        let mut store = JsonlChangeSetStore::new(dir.path().join("history")).unwrap();
        let cs = test_changeset("a.ts");

        for workspace in ["../x", "..", "a/b", "a\\b", "/abs", "", "."] {
            let err = store.save(workspace, &cs).unwrap_err();
            assert!(
                matches!(err, ChangeSetError::InvalidWorkspace { .. }),
                "{:?} accepted",
                workspace
            );
            assert!(store.list(workspace).is_err());
        }
        assert!(!dir.path().join("x.jsonl").exists());

        store.save("my-project_2", &cs).unwrap();
        assert_eq!(store.list("my-project_2").unwrap().len(), 1);
    }
}
