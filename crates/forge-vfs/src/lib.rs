//! # forge-vfs
//!
//! The editor's virtual file store: a durable, path-keyed table of file
//! contents that acts as the user's workspace.
//!
//! Storage is abstracted behind the [`FileStore`] trait so the change-set
//! engine and the mirror can run against any backend.
//!
//! ## Key components
//!
//! - [`VFile`] — one stored file (path, content, last-modified time).
//! - [`FileStore`] — list/get/put/delete over the file table.
//! - [`MemoryFileStore`] — in-process table, used for scratch work and tests.
//! - [`JsonFileStore`] — persistent table kept in a single JSON document
//!   under the workspace's `.forge/vfs/` directory. Survives restarts.

pub mod error;
pub mod file;
pub mod json_store;
pub mod store;

pub use error::VfsError;
pub use file::VFile;
pub use json_store::JsonFileStore;
pub use store::{FileStore, MemoryFileStore};
