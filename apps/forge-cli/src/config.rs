// config.rs — Workspace layout and settings.
//
// Everything Forge keeps for a workspace lives under `<root>/.forge/`:
//
//   .forge/config.toml          optional settings (see ForgeSettings)
//   .forge/vfs/files.json       the file table
//   .forge/history/<ws>.jsonl   applied change-sets
//   .forge/mirror/<project>/    local mirror, when no server is configured

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Settings read from `.forge/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForgeSettings {
    /// Key for this workspace's history file.
    #[serde(default = "default_workspace_id")]
    pub workspace_id: String,

    #[serde(default)]
    pub mirror: MirrorConfig,
}

impl Default for ForgeSettings {
    fn default() -> Self {
        Self {
            workspace_id: default_workspace_id(),
            mirror: MirrorConfig::default(),
        }
    }
}

/// Where pushes and remote exports go.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MirrorConfig {
    /// Project server URL. Without one, a local mirror under `.forge/mirror/` is used.
    pub base_url: Option<String>,

    #[serde(default = "default_project_id")]
    pub project_id: String,

    #[serde(default = "default_project_name")]
    pub project_name: String,

    /// Environment variable holding the bearer token for the server.
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            project_id: default_project_id(),
            project_name: default_project_name(),
            token_env: default_token_env(),
        }
    }
}

fn default_workspace_id() -> String {
    "default".to_string()
}

fn default_project_id() -> String {
    "local".to_string()
}

fn default_project_name() -> String {
    "workspace".to_string()
}

fn default_token_env() -> String {
    "FORGE_TOKEN".to_string()
}

impl ForgeSettings {
    /// Parse settings from a TOML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load settings, falling back to defaults if the file is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("ignoring {}: {}", path.display(), e);
            Self::default()
        })
    }
}

/// Resolved paths and settings for one workspace.
#[derive(Debug, Clone)]
pub struct ForgeConfig {
    pub workspace_root: PathBuf,
    pub vfs_dir: PathBuf,
    pub history_dir: PathBuf,
    pub mirror_dir: PathBuf,
    pub settings_file: PathBuf,
    pub settings: ForgeSettings,
}

impl ForgeConfig {
    /// Standard `.forge/` layout for a workspace, with settings loaded from disk.
    pub fn for_project(workspace_root: impl AsRef<Path>) -> Self {
        let root = workspace_root.as_ref().to_path_buf();
        let forge_dir = root.join(".forge");
        let settings_file = forge_dir.join("config.toml");
        let settings = ForgeSettings::load_or_default(&settings_file);
        Self {
            workspace_root: root,
            vfs_dir: forge_dir.join("vfs"),
            history_dir: forge_dir.join("history"),
            mirror_dir: forge_dir.join("mirror"),
            settings_file,
            settings,
        }
    }

    /// Directory of the local mirror for the configured project.
    pub fn local_mirror_dir(&self) -> PathBuf {
        self.mirror_dir.join(&self.settings.mirror.project_id)
    }
}
