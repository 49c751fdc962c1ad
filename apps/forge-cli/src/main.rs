//! # forge
//!
//! Command-line front end for a Forge editor workspace.
//!
//! - `forge ls/cat/write/touch/rm` — edit the workspace file table directly
//! - `forge apply <reply.json>` — apply an assistant reply's operation batch
//! - `forge revert` — undo the most recent assistant batch
//! - `forge history` — list applied and reverted batches
//! - `forge push/export` — sync with the project mirror

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::ForgeConfig;

/// Forge — apply and revert AI-proposed edits in a local workspace.
#[derive(Parser)]
#[command(name = "forge", version, about)]
struct Cli {
    /// Workspace root directory (defaults to current directory).
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Log every file operation to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List files in the workspace.
    Ls,
    /// Print a file's content.
    Cat {
        path: String,
    },
    /// Write a file (content from --content, --from, or stdin).
    Write {
        path: String,
        /// Literal content to write.
        #[arg(long, conflicts_with = "from")]
        content: Option<String>,
        /// Read content from this file on disk.
        #[arg(long)]
        from: Option<PathBuf>,
    },
    /// Create an empty file.
    Touch {
        path: String,
    },
    /// Delete a file.
    Rm {
        path: String,
    },
    /// Apply the operations in an assistant reply (`-` for stdin).
    Apply {
        reply: PathBuf,
        /// Also push the batch to the project mirror.
        #[arg(long)]
        push: bool,
    },
    /// Revert the most recent assistant change.
    Revert,
    /// Show applied change-sets.
    History {
        /// Number of entries to show.
        #[arg(short, default_value = "10")]
        n: usize,
    },
    /// Push the operations in an assistant reply to the mirror only.
    Push {
        reply: PathBuf,
    },
    /// Export the project as a bundle.
    Export {
        /// Write files into this directory instead of printing JSON.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Export the mirror's copy rather than the local workspace.
        #[arg(long)]
        remote: bool,
    },
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { "debug" } else { "warn" };
    // Logs go to stderr so command output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("forge_vfs={}", level).parse()?)
                .add_directive(format!("forge_changeset={}", level).parse()?)
                .add_directive(format!("forge_mirror={}", level).parse()?)
                .add_directive(format!("forge={}", level).parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let project_root = cli.project_root.canonicalize().unwrap_or(cli.project_root);
    let config = ForgeConfig::for_project(&project_root);
    tracing::debug!(
        "workspace root: {} (settings: {})",
        config.workspace_root.display(),
        config.settings_file.display()
    );

    match cli.command {
        Commands::Ls => commands::files::list(&config),
        Commands::Cat { path } => commands::files::cat(&config, &path),
        Commands::Write {
            path,
            content,
            from,
        } => commands::files::write(&config, &path, content, from.as_deref()),
        Commands::Touch { path } => commands::files::touch(&config, &path),
        Commands::Rm { path } => commands::files::remove(&config, &path),
        Commands::Apply { reply, push } => commands::changes::apply(&config, &reply, push),
        Commands::Revert => commands::changes::revert(&config),
        Commands::History { n } => commands::changes::history(&config, n),
        Commands::Push { reply } => commands::mirror::push(&config, &reply),
        Commands::Export { out, remote } => {
            commands::mirror::export(&config, out.as_deref(), remote)
        }
    }
}
