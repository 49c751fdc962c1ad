pub mod changes;
pub mod files;
pub mod mirror;

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use forge_changeset::AssistantReply;

/// Read a whole input file, or stdin when the path is `-`.
pub fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Read and parse an assistant reply document.
pub fn read_reply(path: &Path) -> anyhow::Result<AssistantReply> {
    let json = read_input(path)?;
    AssistantReply::parse(&json)
        .with_context(|| format!("{} is not a valid assistant reply", path.display()))
}
