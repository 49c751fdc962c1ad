//! # forge-mirror
//!
//! Pushes operation batches to a remote copy of the project and exports the
//! project back as a bundle, for syncing a workspace across devices.
//!
//! The mirror is independent of the local change-set engine: the same batch
//! is applied to both, and a failure on one side never rolls back the other.
//!
//! Remote apply differs from local apply in two ways that callers rely on:
//! a `writeFile` without content writes an empty file, and a failing
//! operation is reported in its [`OperationResult`] instead of stopping the
//! batch.
//!
//! ## Key components
//!
//! - [`RemoteMirror`] — push a batch, export the project.
//! - [`LocalMirror`] — mirror semantics over any [`forge_vfs::FileStore`].
//! - [`HttpMirror`] — talks to the project server's apply/export endpoints.
//! - [`ProjectBundle`] — exported project: id, name, files sorted by path.

pub mod bundle;
pub mod error;
pub mod http;
pub mod local;
pub mod mirror;

pub use bundle::{BundleFile, ProjectBundle, ProjectInfo};
pub use error::MirrorError;
pub use http::HttpMirror;
pub use local::LocalMirror;
pub use mirror::{failure_count, OperationResult, RemoteMirror};
