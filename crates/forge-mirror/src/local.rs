// local.rs — LocalMirror: mirror semantics over a FileStore.
//
// Used when no project server is configured: the mirror is another file
// table (typically a JsonFileStore under `.forge/mirror/<project>/`). It
// applies batches exactly as the server does, so the two are
// interchangeable behind `RemoteMirror`.

use forge_changeset::FileOperation;
use forge_vfs::FileStore;

use crate::bundle::{ProjectBundle, ProjectInfo};
use crate::error::MirrorError;
use crate::mirror::{failure_count, OperationResult, RemoteMirror};

/// A mirror backed by a local file store.
#[derive(Debug)]
pub struct LocalMirror<S: FileStore> {
    project: ProjectInfo,
    store: S,
}

impl<S: FileStore> LocalMirror<S> {
    pub fn new(project: ProjectInfo, store: S) -> Self {
        Self { project, store }
    }

    pub fn project(&self) -> &ProjectInfo {
        &self.project
    }

    /// The underlying store, for inspection.
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: FileStore> RemoteMirror for LocalMirror<S> {
    fn push(&mut self, operations: &[FileOperation]) -> Result<Vec<OperationResult>, MirrorError> {
        let mut results = Vec::with_capacity(operations.len());

        for operation in operations {
            let (path, outcome) = match operation {
                FileOperation::WriteFile { path, content } => (
                    path,
                    self.store.put(path, content.as_deref().unwrap_or_default()),
                ),
                FileOperation::DeleteFile { path } => (path, self.store.delete(path)),
                FileOperation::Unknown(_) => continue,
            };

            results.push(match outcome {
                Ok(()) => OperationResult::ok(path.as_str()),
                Err(e) => {
                    tracing::warn!("mirror {}: {} failed: {}", self.project.id, path, e);
                    OperationResult::failed(path.as_str(), e.to_string())
                }
            });
        }

        tracing::info!(
            "pushed {} operation(s) to mirror {} ({} failed)",
            results.len(),
            self.project.id,
            failure_count(&results)
        );
        Ok(results)
    }

    fn export(&self) -> Result<ProjectBundle, MirrorError> {
        ProjectBundle::from_store(self.project.clone(), &self.store)
    }
}
