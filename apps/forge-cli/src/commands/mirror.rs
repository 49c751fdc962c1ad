// mirror.rs — Mirror subcommands: push, export.

use std::path::Path;

use anyhow::Context;
use forge_changeset::FileOperation;
use forge_mirror::{
    failure_count, HttpMirror, LocalMirror, ProjectBundle, ProjectInfo, RemoteMirror,
};
use forge_vfs::JsonFileStore;

use super::read_reply;
use crate::config::ForgeConfig;

fn project_info(config: &ForgeConfig) -> ProjectInfo {
    ProjectInfo {
        id: config.settings.mirror.project_id.clone(),
        name: config.settings.mirror.project_name.clone(),
    }
}

/// The configured mirror: the project server if `base_url` is set,
/// otherwise a file table under `.forge/mirror/<project>/`.
fn open_mirror(config: &ForgeConfig) -> anyhow::Result<Box<dyn RemoteMirror>> {
    let mirror = &config.settings.mirror;
    match &mirror.base_url {
        Some(base_url) => {
            let token = std::env::var(&mirror.token_env).ok();
            if token.is_none() {
                tracing::debug!("{} not set, sending unauthenticated requests", mirror.token_env);
            }
            Ok(Box::new(HttpMirror::new(
                base_url.as_str(),
                project_info(config),
                token,
            )?))
        }
        None => {
            let store = JsonFileStore::open(config.local_mirror_dir())?;
            Ok(Box::new(LocalMirror::new(project_info(config), store)))
        }
    }
}

pub fn push_operations(config: &ForgeConfig, operations: &[FileOperation]) -> anyhow::Result<()> {
    let mut mirror = open_mirror(config)?;
    let results = mirror
        .push(operations)
        .with_context(|| format!("pushing to mirror {}", config.settings.mirror.project_id))?;

    for result in &results {
        match &result.error {
            None => println!("  pushed  {}", result.path),
            Some(error) => println!("  FAILED  {}: {}", result.path, error),
        }
    }

    let failed = failure_count(&results);
    if failed > 0 {
        anyhow::bail!("{} of {} operation(s) failed on the mirror", failed, results.len());
    }
    println!("Mirror {} up to date.", config.settings.mirror.project_id);
    Ok(())
}

pub fn push(config: &ForgeConfig, reply_path: &Path) -> anyhow::Result<()> {
    let reply = read_reply(reply_path)?;
    if !reply.has_operations() {
        println!("No file operations to push.");
        return Ok(());
    }
    push_operations(config, &reply.ops)
}

pub fn export(config: &ForgeConfig, out: Option<&Path>, remote: bool) -> anyhow::Result<()> {
    let bundle = if remote {
        open_mirror(config)?.export()?
    } else {
        let store = JsonFileStore::open(&config.vfs_dir)?;
        ProjectBundle::from_store(project_info(config), &store)?
    };

    match out {
        Some(dir) => {
            let written = bundle.write_to_dir(dir)?;
            println!("Exported {} file(s) to {}.", written, dir.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&bundle)?),
    }
    Ok(())
}
