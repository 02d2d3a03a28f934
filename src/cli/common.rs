//! Common CLI utilities shared across all CLI commands.
//!
//! This module provides:
//! - `CliContext`: workspace root, loaded configuration and derived paths
//! - Output helpers: `print_success`, `print_error`, `print_warning`, `print_info`

use crate::config::Config;
use crate::utils::WorkspacePaths;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Shared context for CLI commands.
pub struct CliContext {
    /// The loaded (or default) workspace configuration
    pub config: Config,
    /// Paths derived from the root and the configuration
    pub paths: WorkspacePaths,
}

impl CliContext {
    /// Load the context for `root`, or the current directory when `None`.
    pub fn load(root: Option<&Path>) -> Result<Self> {
        let root = match root {
            Some(root) => root.to_path_buf(),
            None => std::env::current_dir().context("Failed to get current directory")?,
        };
        let root = absolute_root(root)?;

        let config = Config::load_or_default(&root).context("Failed to load configuration")?;
        let paths = WorkspacePaths::new(&root, &config);

        Ok(Self { config, paths })
    }

    /// Workspace root directory.
    pub fn root(&self) -> &Path {
        &self.paths.root
    }
}

fn absolute_root(root: PathBuf) -> Result<PathBuf> {
    if !root.is_dir() {
        anyhow::bail!("Workspace root is not a directory: {:?}", root);
    }
    root.canonicalize()
        .with_context(|| format!("Failed to resolve workspace root: {:?}", root))
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Print a success message with a checkmark prefix.
pub fn print_success(msg: &str) {
    println!("\u{2713} {}", msg);
}

/// Print an error message with an X prefix to stderr.
pub fn print_error(msg: &str) {
    eprintln!("\u{2717} {}", msg);
}

/// Print a warning message with a warning sign prefix.
pub fn print_warning(msg: &str) {
    println!("\u{26A0}\u{FE0F} {}", msg);
}

/// Print an info message with an info sign prefix.
pub fn print_info(msg: &str) {
    println!("\u{2139}\u{FE0F} {}", msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_context_uses_defaults_without_config() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = CliContext::load(Some(temp_dir.path())).unwrap();

        assert_eq!(ctx.config, Config::default());
        assert_eq!(ctx.root(), temp_dir.path().canonicalize().unwrap());
        assert!(ctx.paths.vscode_dir.ends_with("vscode-symbols"));
    }

    #[test]
    fn test_context_rejects_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");
        assert!(CliContext::load(Some(&missing)).is_err());
    }
}
