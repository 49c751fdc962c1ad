// bundle.rs — Exported project bundles.
//
// An export is the whole project in one JSON document:
//
//   { "project": { "id": "...", "name": "..." },
//     "files": [ { "path": "...", "content": "..." }, ... ] }
//
// Files are sorted by path. A bundle can be written out as a plain directory
// tree, e.g. to hand the project to a local toolchain.

use std::fs;
use std::path::{Component, Path, PathBuf};

use forge_vfs::FileStore;
use serde::{Deserialize, Serialize};

use crate::error::MirrorError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectInfo {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BundleFile {
    pub path: String,
    pub content: String,
}

/// A project export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectBundle {
    pub project: ProjectInfo,
    #[serde(default)]
    pub files: Vec<BundleFile>,
}

impl ProjectBundle {
    /// Snapshot every file in `store` into a bundle.
    pub fn from_store<S>(project: ProjectInfo, store: &S) -> Result<Self, MirrorError>
    where
        S: FileStore + ?Sized,
    {
        let mut files: Vec<BundleFile> = store
            .list()?
            .into_iter()
            .map(|f| BundleFile {
                path: f.path,
                content: f.content,
            })
            .collect();
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(Self { project, files })
    }

    /// Write every file under `dir`, creating parent directories.
    ///
    /// Returns the number of files written. Paths that are absolute or climb
    /// out of `dir` are rejected before anything is written.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<usize, MirrorError> {
        let dir = dir.as_ref();
        let targets = self
            .files
            .iter()
            .map(|file| resolve_path(dir, &file.path).map(|target| (target, file)))
            .collect::<Result<Vec<_>, MirrorError>>()?;

        for (target, file) in &targets {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|source| MirrorError::IoError {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            fs::write(target, &file.content).map_err(|source| MirrorError::IoError {
                path: target.clone(),
                source,
            })?;
        }

        tracing::info!(
            "exported {} file(s) of project {} to {}",
            targets.len(),
            self.project.id,
            dir.display()
        );
        Ok(targets.len())
    }
}

/// Resolve a bundle path under `root`, rejecting traversal.
fn resolve_path(root: &Path, relative_path: &str) -> Result<PathBuf, MirrorError> {
    let relative = Path::new(relative_path);
    let escapes = relative_path.is_empty()
        || relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(MirrorError::PathTraversal {
            path: relative_path.to_string(),
        });
    }
    Ok(root.join(relative))
}
