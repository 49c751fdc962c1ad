// changes.rs — Assistant batches: apply, revert, history.
//
// `apply` runs the batch through the change-set engine and appends the
// resulting change-set to the workspace history. `revert` undoes the newest
// history entry, once; older entries are kept for reference only, matching
// the editor's single "Revert last AI change" button.

use std::path::Path;

use forge_changeset::{
    apply_operations, ChangeSetStatus, ChangeSetStore, JsonlChangeSetStore, UndoSlot,
};
use forge_vfs::JsonFileStore;

use super::read_reply;
use crate::config::ForgeConfig;

pub fn apply(config: &ForgeConfig, reply_path: &Path, push: bool) -> anyhow::Result<()> {
    let mut reply = read_reply(reply_path)?;
    if !reply.message.is_empty() {
        println!("{}", reply.message);
    }
    if !reply.has_operations() {
        println!("No file operations to apply.");
        return Ok(());
    }

    let operations = reply.take_operations();
    let mut store = JsonFileStore::open(&config.vfs_dir)?;
    let changeset = apply_operations(&mut store, operations)?;

    let mut history = JsonlChangeSetStore::new(&config.history_dir)?;
    history.save(&config.settings.workspace_id, &changeset)?;

    println!(
        "Applied change-set {} ({}).",
        changeset.changeset_id,
        changeset.summary()
    );
    for path in changeset.paths() {
        println!("  {}", path);
    }

    if push {
        // The local apply stands even if the push fails.
        super::mirror::push_operations(config, &changeset.operations)?;
    }
    Ok(())
}

pub fn revert(config: &ForgeConfig) -> anyhow::Result<()> {
    let workspace = &config.settings.workspace_id;
    let mut history = JsonlChangeSetStore::new(&config.history_dir)?;

    let mut slot = UndoSlot::new();
    match history.latest(workspace)? {
        Some(record) if record.status == ChangeSetStatus::Applied => slot.record(record.changeset),
        _ => {
            println!("Nothing to revert.");
            return Ok(());
        }
    }

    let mut store = JsonFileStore::open(&config.vfs_dir)?;
    let Some(changeset) = slot.revert_last(&mut store)? else {
        return Ok(());
    };
    history.set_status(workspace, changeset.changeset_id, ChangeSetStatus::Reverted)?;

    println!("Reverted change-set {}.", changeset.changeset_id);
    for path in changeset.paths() {
        println!("  {}", path);
    }
    Ok(())
}

pub fn history(config: &ForgeConfig, n: usize) -> anyhow::Result<()> {
    let history = JsonlChangeSetStore::new(&config.history_dir)?;
    let records = history.list(&config.settings.workspace_id)?;

    let start = records.len().saturating_sub(n);
    let recent = &records[start..];
    if recent.is_empty() {
        println!("No change-sets.");
        return Ok(());
    }

    println!(
        "{:<20} {:<38} {:<10} SUMMARY",
        "APPLIED", "CHANGESET", "STATUS"
    );
    println!("{}", "-".repeat(100));
    for record in recent {
        println!(
            "{:<20} {:<38} {:<10} {}",
            record.changeset.created_at.format("%Y-%m-%d %H:%M:%S"),
            record.changeset.changeset_id.to_string(),
            record.status,
            record.changeset.summary(),
        );
    }
    Ok(())
}
