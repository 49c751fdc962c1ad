// engine.rs — Apply and revert operation batches against a FileStore.
//
// apply:  snapshot every touched path first, then run the operations in
//         order. Duplicate paths keep the first snapshot.
// revert: walk the operations backwards and put each path back to its
//         snapshot (delete if it was absent, rewrite otherwise).
//
// Neither step is transactional. A store error aborts the walk and is
// returned unchanged; operations that already ran stay applied.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use forge_vfs::{FileStore, VfsError};

use crate::changeset::ChangeSet;
use crate::operation::FileOperation;
use crate::snapshot::Snapshot;

/// Apply `operations` to `store` and return the change-set that undoes them.
///
/// A `writeFile` without content is skipped (the file is neither cleared nor
/// created) but its path is still snapshotted. Unknown operations are skipped
/// and not snapshotted.
pub fn apply_operations<S>(
    store: &mut S,
    operations: Vec<FileOperation>,
) -> Result<ChangeSet, VfsError>
where
    S: FileStore + ?Sized,
{
    let mut before = BTreeMap::new();
    for path in operations.iter().filter_map(FileOperation::path) {
        if let Entry::Vacant(slot) = before.entry(path.to_string()) {
            let current = store.get(path)?.map(|file| file.content);
            slot.insert(Snapshot::from(current));
        }
    }

    for operation in &operations {
        match operation {
            FileOperation::WriteFile {
                path,
                content: Some(content),
            } => {
                tracing::debug!("writeFile {} ({} bytes)", path, content.len());
                store.put(path, content)?;
            }
            FileOperation::WriteFile { path, content: None } => {
                tracing::debug!("writeFile {} has no content, skipping", path);
            }
            FileOperation::DeleteFile { path } => {
                tracing::debug!("deleteFile {}", path);
                store.delete(path)?;
            }
            FileOperation::Unknown(_) => {
                tracing::debug!("ignoring unknown file operation");
            }
        }
    }

    let changeset = ChangeSet::new(operations, before);
    tracing::info!(
        "applied change-set {}: {}",
        changeset.changeset_id,
        changeset.summary()
    );
    Ok(changeset)
}

/// Restore every path touched by `changeset` to its pre-batch state.
///
/// Running this twice yields the same end state. Changes made to the same
/// paths after the apply are overwritten without warning.
pub fn revert_changeset<S>(store: &mut S, changeset: &ChangeSet) -> Result<(), VfsError>
where
    S: FileStore + ?Sized,
{
    for operation in changeset.operations.iter().rev() {
        let Some(path) = operation.path() else {
            continue;
        };
        match changeset.snapshot(path) {
            Some(Snapshot::Absent) => {
                tracing::debug!("revert {}: removing (absent before batch)", path);
                store.delete(path)?;
            }
            Some(Snapshot::Present(content)) => {
                tracing::debug!("revert {}: restoring {} bytes", path, content.len());
                store.put(path, content)?;
            }
            None => {}
        }
    }

    tracing::info!("reverted change-set {}", changeset.changeset_id);
    Ok(())
}
