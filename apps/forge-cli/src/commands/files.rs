// files.rs — Direct edits to the workspace file table: ls, cat, write, touch, rm.
//
// These bypass the change-set engine, like typing in the editor does. They
// are not recorded in history and a later revert may overwrite them.

use std::path::Path;

use forge_vfs::{FileStore, JsonFileStore};

use super::read_input;
use crate::config::ForgeConfig;

fn open_store(config: &ForgeConfig) -> anyhow::Result<JsonFileStore> {
    Ok(JsonFileStore::open(&config.vfs_dir)?)
}

pub fn list(config: &ForgeConfig) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let files = store.list()?;

    if files.is_empty() {
        println!("No files in workspace.");
        return Ok(());
    }

    println!("{:<20} {:>8}  PATH", "UPDATED", "BYTES");
    println!("{}", "-".repeat(60));
    for file in files {
        println!(
            "{:<20} {:>8}  {}",
            file.updated_at.format("%Y-%m-%d %H:%M:%S"),
            file.size(),
            file.path
        );
    }
    Ok(())
}

pub fn cat(config: &ForgeConfig, path: &str) -> anyhow::Result<()> {
    let store = open_store(config)?;
    match store.get(path)? {
        Some(file) => {
            print!("{}", file.content);
            Ok(())
        }
        None => anyhow::bail!("no such file: {}", path),
    }
}

pub fn write(
    config: &ForgeConfig,
    path: &str,
    content: Option<String>,
    from: Option<&Path>,
) -> anyhow::Result<()> {
    let content = match (content, from) {
        (Some(content), _) => content,
        (None, Some(from)) => read_input(from)?,
        (None, None) => read_input(Path::new("-"))?,
    };

    let mut store = open_store(config)?;
    store.put(path, &content)?;
    println!("Wrote {} ({} bytes).", path, content.len());
    Ok(())
}

pub fn touch(config: &ForgeConfig, path: &str) -> anyhow::Result<()> {
    let mut store = open_store(config)?;
    if store.get(path)?.is_some() {
        anyhow::bail!("file already exists: {}", path);
    }
    store.put(path, "")?;
    println!("Created {}.", path);
    Ok(())
}

pub fn remove(config: &ForgeConfig, path: &str) -> anyhow::Result<()> {
    let mut store = open_store(config)?;
    store.delete(path)?;
    println!("Deleted {}.", path);
    Ok(())
}
