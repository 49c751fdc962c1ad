// undo.rs — The single-level "revert last AI change" slot.

use forge_vfs::{FileStore, VfsError};

use crate::changeset::ChangeSet;
use crate::engine::revert_changeset;

/// Holds at most one revertible change-set.
///
/// Recording a new change-set replaces the previous one, which can then no
/// longer be reverted through the slot.
#[derive(Debug, Default)]
pub struct UndoSlot {
    last: Option<ChangeSet>,
}

impl UndoSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `changeset` as the one to revert next.
    pub fn record(&mut self, changeset: ChangeSet) {
        if let Some(replaced) = self.last.replace(changeset) {
            tracing::debug!("undo slot dropped change-set {}", replaced.changeset_id);
        }
    }

    /// The held change-set, if any.
    pub fn last(&self) -> Option<&ChangeSet> {
        self.last.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_none()
    }

    /// Remove and return the held change-set without reverting it.
    pub fn take(&mut self) -> Option<ChangeSet> {
        self.last.take()
    }

    /// Revert the held change-set and empty the slot.
    ///
    /// Returns `Ok(None)` if there was nothing to revert. On a store error the
    /// change-set stays in the slot; paths reverted before the failure stay
    /// reverted.
    pub fn revert_last<S>(&mut self, store: &mut S) -> Result<Option<ChangeSet>, VfsError>
    where
        S: FileStore + ?Sized,
    {
        let Some(changeset) = self.last.take() else {
            return Ok(None);
        };

        if let Err(e) = revert_changeset(store, &changeset) {
            self.last = Some(changeset);
            return Err(e);
        }
        Ok(Some(changeset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::apply_operations;
    use crate::operation::FileOperation;
    use forge_vfs::MemoryFileStore;

    #[test]
    fn empty_slot_reverts_nothing() {
        let mut slot = UndoSlot::new();
        let mut store = MemoryFileStore::new();
        assert!(slot.revert_last(&mut store).unwrap().is_none());
    }

    #[test]
    fn revert_last_clears_slot() {
        let mut store = MemoryFileStore::new();
        let mut slot = UndoSlot::new();

        let cs = apply_operations(&mut store, vec![FileOperation::write("a", "1")]).unwrap();
        let id = cs.changeset_id;
        slot.record(cs);

        let reverted = slot.revert_last(&mut store).unwrap().unwrap();
        assert_eq!(reverted.changeset_id, id);
        assert!(slot.is_empty());
        assert!(store.get("a").unwrap().is_none());
    }

    #[test]
    fn only_latest_change_is_held() {
        let mut store = MemoryFileStore::new();
        let mut slot = UndoSlot::new();

        let first = apply_operations(&mut store, vec![FileOperation::write("a", "1")]).unwrap();
        slot.record(first);
        let second = apply_operations(&mut store, vec![FileOperation::write("b", "2")]).unwrap();
        let second_id = second.changeset_id;
        slot.record(second);

        assert_eq!(slot.last().unwrap().changeset_id, second_id);

        slot.revert_last(&mut store).unwrap();
        assert_eq!(store.get("a").unwrap().unwrap().content, "1");
        assert!(store.get("b").unwrap().is_none());
        assert!(slot.revert_last(&mut store).unwrap().is_none());
    }
}
