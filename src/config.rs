use crate::zed::ThemeIdentity;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the optional workspace configuration.
pub const CONFIG_FILE_NAME: &str = "symbols-workspace.toml";

/// Workspace configuration (`symbols-workspace.toml` at the workspace root).
///
/// Every field has a default, so a missing file or a partial one is fine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Branch that is rebased, committed and pushed (default: main)
    #[serde(default = "default_branch_name")]
    pub branch: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Identity written into the generated Zed manifest
    #[serde(default)]
    pub zed: ThemeIdentity,
}

/// Workspace-relative locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_vscode_dir")]
    pub vscode_dir: PathBuf,
    #[serde(default = "default_zed_dir")]
    pub zed_dir: PathBuf,
    /// Custom mapping overrides (JSON with comments)
    #[serde(default = "default_mappings_path")]
    pub mappings: PathBuf,
    /// Generated JSON Schema for the mappings file
    #[serde(default = "default_schema_path")]
    pub schema: PathBuf,
    #[serde(default = "default_preview_dir")]
    pub preview_dir: PathBuf,
}

/// Upstream repositories the submodules are rebased onto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Remote name configured in both submodules (default: upstream)
    #[serde(default = "default_remote_name")]
    pub remote: String,
    #[serde(default = "default_vscode_url")]
    pub vscode_url: String,
    #[serde(default = "default_zed_url")]
    pub zed_url: String,
    /// Ref to rebase onto (default: upstream/main)
    #[serde(default = "default_upstream_ref")]
    pub upstream_ref: String,
}

fn default_branch_name() -> String {
    "main".to_string()
}

fn default_vscode_dir() -> PathBuf {
    PathBuf::from("vscode-symbols")
}

fn default_zed_dir() -> PathBuf {
    PathBuf::from("zed-symbols")
}

fn default_mappings_path() -> PathBuf {
    PathBuf::from("custom-mappings.jsonc")
}

fn default_schema_path() -> PathBuf {
    PathBuf::from("custom-mappings.schema.json")
}

fn default_preview_dir() -> PathBuf {
    PathBuf::from("preview")
}

fn default_remote_name() -> String {
    "upstream".to_string()
}

fn default_vscode_url() -> String {
    "https://github.com/miguelsolorio/vscode-symbols.git".to_string()
}

fn default_zed_url() -> String {
    "https://github.com/sebastiandotdev/zed-symbols.git".to_string()
}

fn default_upstream_ref() -> String {
    "upstream/main".to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            vscode_dir: default_vscode_dir(),
            zed_dir: default_zed_dir(),
            mappings: default_mappings_path(),
            schema: default_schema_path(),
            preview_dir: default_preview_dir(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            remote: default_remote_name(),
            vscode_url: default_vscode_url(),
            zed_url: default_zed_url(),
            upstream_ref: default_upstream_ref(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            branch: default_branch_name(),
            paths: PathsConfig::default(),
            upstream: UpstreamConfig::default(),
            zed: ThemeIdentity::default(),
        }
    }
}

impl Config {
    /// Path of the configuration file inside a workspace.
    pub fn config_path(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE_NAME)
    }

    /// Load the workspace configuration, falling back to defaults when the
    /// file does not exist.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        let config_path = Self::config_path(root);
        if !config_path.exists() {
            debug!("No {} in {:?}, using defaults", CONFIG_FILE_NAME, root);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        // An explicitly empty branch means the default
        if config.branch.is_empty() {
            config.branch = default_branch_name();
        }

        Ok(config)
    }

    /// Save configuration to the workspace root.
    pub fn save(&self, root: &Path) -> Result<()> {
        let config_path = Self::config_path(root);
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;
        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))
    }
}
