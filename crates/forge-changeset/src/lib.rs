//! # forge-changeset
//!
//! Batches of assistant-proposed file operations and the engine that applies
//! and reverts them against a [`forge_vfs::FileStore`].
//!
//! A [`ChangeSet`] is one applied batch plus the content (or absence) of every
//! path it touched, captured once before the batch ran. Reverting a change-set
//! puts those paths back to their pre-batch state, giving a single-level
//! "undo this whole AI turn".
//!
//! ## Key components
//!
//! - [`FileOperation`] — `writeFile` / `deleteFile`, as emitted by the assistant.
//! - [`apply_operations`] / [`revert_changeset`] — the engine.
//! - [`UndoSlot`] — holds the one change-set that can currently be reverted.
//! - [`AssistantReply`] — parses the assistant's `{ message, ops }` reply.
//! - [`ChangeSetStore`] / [`JsonlChangeSetStore`] — history of applied batches.

pub mod changeset;
pub mod engine;
pub mod error;
pub mod history;
pub mod operation;
pub mod reply;
pub mod snapshot;
pub mod undo;

pub use changeset::ChangeSet;
pub use engine::{apply_operations, revert_changeset};
pub use error::ChangeSetError;
pub use history::{ChangeSetRecord, ChangeSetStatus, ChangeSetStore, JsonlChangeSetStore};
pub use operation::FileOperation;
pub use reply::AssistantReply;
pub use snapshot::Snapshot;
pub use undo::UndoSlot;
