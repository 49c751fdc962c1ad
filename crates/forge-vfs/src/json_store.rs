// json_store.rs — JsonFileStore: the persistent file table.
//
// The whole table lives in one JSON document: `<store_dir>/files.json`.
// The table is loaded once by `open()` and kept in memory; every mutation
// rewrites the document by writing `files.json.tmp` and renaming it over the
// original, so a crash mid-write leaves the previous table intact.
//
// Opening is an explicit step done once at startup. Callers own the handle
// and lend it to whatever needs the workspace.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::VfsError;
use crate::file::VFile;
use crate::store::FileStore;

const TABLE_FILE: &str = "files.json";

/// File table persisted as a single JSON document.
#[derive(Debug)]
pub struct JsonFileStore {
    store_dir: PathBuf,
    files: BTreeMap<String, VFile>,
}

impl JsonFileStore {
    /// Open the store in `store_dir`, creating the directory if needed.
    ///
    /// An existing `files.json` is loaded; a missing one means an empty table.
    pub fn open(store_dir: impl AsRef<Path>) -> Result<Self, VfsError> {
        let store_dir = store_dir.as_ref().to_path_buf();
        fs::create_dir_all(&store_dir).map_err(|source| VfsError::IoError {
            path: store_dir.clone(),
            source,
        })?;

        let table_path = store_dir.join(TABLE_FILE);
        let files = if table_path.exists() {
            let json = fs::read_to_string(&table_path).map_err(|source| VfsError::IoError {
                path: table_path.clone(),
                source,
            })?;
            let records: Vec<VFile> = serde_json::from_str(&json)?;
            records
                .into_iter()
                .map(|file| (file.path.clone(), file))
                .collect()
        } else {
            BTreeMap::new()
        };

        tracing::debug!(
            "opened file store at {} ({} file(s))",
            store_dir.display(),
            files.len()
        );

        Ok(Self { store_dir, files })
    }

    /// Directory holding the table document.
    pub fn store_dir(&self) -> &Path {
        &self.store_dir
    }

    fn table_path(&self) -> PathBuf {
        self.store_dir.join(TABLE_FILE)
    }

    /// Write the in-memory table to disk atomically.
    fn persist(&self) -> Result<(), VfsError> {
        let records: Vec<&VFile> = self.files.values().collect();
        let json = serde_json::to_string_pretty(&records)?;

        let table_path = self.table_path();
        let tmp_path = self.store_dir.join(format!("{}.tmp", TABLE_FILE));
        fs::write(&tmp_path, json).map_err(|source| VfsError::IoError {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, &table_path).map_err(|source| VfsError::IoError {
            path: table_path,
            source,
        })?;
        Ok(())
    }
}

impl FileStore for JsonFileStore {
    fn list(&self) -> Result<Vec<VFile>, VfsError> {
        Ok(self.files.values().cloned().collect())
    }

    fn get(&self, path: &str) -> Result<Option<VFile>, VfsError> {
        Ok(self.files.get(path).cloned())
    }

    fn put(&mut self, path: &str, content: &str) -> Result<(), VfsError> {
        let previous = self.files.insert(
            path.to_string(),
            VFile {
                path: path.to_string(),
                content: content.to_string(),
                updated_at: Utc::now(),
            },
        );

        // Keep memory and disk in step if the write fails.
        if let Err(e) = self.persist() {
            match previous {
                Some(file) => self.files.insert(path.to_string(), file),
                None => self.files.remove(path),
            };
            return Err(e);
        }
        Ok(())
    }

    fn delete(&mut self, path: &str) -> Result<(), VfsError> {
        let Some(previous) = self.files.remove(path) else {
            return Ok(());
        };

        if let Err(e) = self.persist() {
            self.files.insert(path.to_string(), previous);
            return Err(e);
        }
        Ok(())
    }
}
