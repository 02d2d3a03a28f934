use crate::config::Config;
use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

/// Theme file inside the VS Code submodule.
const SOURCE_THEME: &str = "src/symbol-icon-theme.json";
/// Merged theme written next to the source theme.
const MODIFIED_THEME: &str = "src/symbol-icon-theme.modified.json";
/// Generated manifest inside the Zed submodule.
const ZED_MANIFEST: &str = "icon_themes/symbols-icon-theme.json";

/// Get the log directory (`<cache>/symbols-workspace`, home as fallback)
pub fn get_log_dir() -> PathBuf {
    dirs::cache_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("symbols-workspace")
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    get_log_dir().join("symbols-workspace.log")
}

/// Concrete paths of one workspace, derived from its root and configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspacePaths {
    pub root: PathBuf,
    pub vscode_dir: PathBuf,
    pub zed_dir: PathBuf,
    pub mappings: PathBuf,
    pub schema: PathBuf,
    pub preview_dir: PathBuf,
}

impl WorkspacePaths {
    pub fn new(root: &Path, config: &Config) -> Self {
        Self {
            root: root.to_path_buf(),
            vscode_dir: root.join(&config.paths.vscode_dir),
            zed_dir: root.join(&config.paths.zed_dir),
            mappings: root.join(&config.paths.mappings),
            schema: root.join(&config.paths.schema),
            preview_dir: root.join(&config.paths.preview_dir),
        }
    }

    pub fn source_theme(&self) -> PathBuf {
        self.vscode_dir.join(SOURCE_THEME)
    }

    pub fn modified_theme(&self) -> PathBuf {
        self.vscode_dir.join(MODIFIED_THEME)
    }

    pub fn vscode_file_icons(&self) -> PathBuf {
        self.vscode_dir.join("src").join("icons").join("files")
    }

    pub fn vscode_folder_icons(&self) -> PathBuf {
        self.vscode_dir.join("src").join("icons").join("folders")
    }

    pub fn zed_manifest(&self) -> PathBuf {
        self.zed_dir.join(ZED_MANIFEST)
    }

    pub fn zed_file_icons(&self) -> PathBuf {
        self.zed_dir.join("icons").join("files")
    }

    pub fn zed_folder_icons(&self) -> PathBuf {
        self.zed_dir.join("icons").join("folders")
    }

    /// Theme the generators should read: the merged one when it exists,
    /// otherwise the untouched source theme.
    pub fn resolve_theme(&self, exists: impl Fn(&Path) -> bool) -> Result<PathBuf> {
        let modified = self.modified_theme();
        if exists(&modified) {
            return Ok(modified);
        }
        let source = self.source_theme();
        if exists(&source) {
            return Ok(source);
        }
        bail!(
            "Unable to locate vscode-symbols theme. Expected {} or {}",
            MODIFIED_THEME,
            SOURCE_THEME
        )
    }

    /// `path` relative to the workspace root, for messages and reports.
    pub fn display(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }
}
