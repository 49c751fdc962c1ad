// store.rs — FileStore trait and the in-memory implementation.
//
// The FileStore trait is the seam between the workspace table and everything
// that edits it (the change-set engine, the CLI, the local mirror). Mutations
// take `&mut self`, so all operations on one store handle are serialized by
// the borrow checker; there is no locking.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::error::VfsError;
use crate::file::VFile;

/// Path-keyed storage for workspace files.
pub trait FileStore {
    /// All stored files. Order is not significant to callers.
    fn list(&self) -> Result<Vec<VFile>, VfsError>;

    /// The file at `path`, or `None` if nothing is stored there.
    fn get(&self, path: &str) -> Result<Option<VFile>, VfsError>;

    /// Insert or fully replace the file at `path`, stamping `updated_at` now.
    fn put(&mut self, path: &str, content: &str) -> Result<(), VfsError>;

    /// Remove the file at `path`. Removing an absent path is a no-op.
    fn delete(&mut self, path: &str) -> Result<(), VfsError>;
}

impl<S: FileStore + ?Sized> FileStore for &mut S {
    fn list(&self) -> Result<Vec<VFile>, VfsError> {
        (**self).list()
    }

    fn get(&self, path: &str) -> Result<Option<VFile>, VfsError> {
        (**self).get(path)
    }

    fn put(&mut self, path: &str, content: &str) -> Result<(), VfsError> {
        (**self).put(path, content)
    }

    fn delete(&mut self, path: &str) -> Result<(), VfsError> {
        (**self).delete(path)
    }
}

/// A file table held in memory. Lost when dropped.
#[derive(Debug, Default, Clone)]
pub struct MemoryFileStore {
    files: BTreeMap<String, VFile>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileStore for MemoryFileStore {
    fn list(&self) -> Result<Vec<VFile>, VfsError> {
        Ok(self.files.values().cloned().collect())
    }

    fn get(&self, path: &str) -> Result<Option<VFile>, VfsError> {
        Ok(self.files.get(path).cloned())
    }

    fn put(&mut self, path: &str, content: &str) -> Result<(), VfsError> {
        self.files.insert(
            path.to_string(),
            VFile {
                path: path.to_string(),
                content: content.to_string(),
                updated_at: Utc::now(),
            },
        );
        Ok(())
    }

    fn delete(&mut self, path: &str) -> Result<(), VfsError> {
        self.files.remove(path);
        Ok(())
    }
}
