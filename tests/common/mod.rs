//! Shared test utilities for workflow integration tests.
//!
//! Provides `TestWorkspace` - an isolated workspace on disk with a VS Code
//! theme, custom mappings and icon assets, cleaned up via `TempDir` - and
//! `RecordingRunner`, a `CommandRunner` that records commands instead of
//! running them.

use anyhow::Result;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use symbols_workspace::config::Config;
use symbols_workspace::git::GitManager;
use symbols_workspace::utils::{command::command_line, CommandFailed, CommandRunner};
use symbols_workspace::WorkspacePaths;

/// Source theme used unless a test provides its own.
pub const DEFAULT_THEME: &str = r#"{
    "iconDefinitions": {
        "default": { "iconPath": "./icons/files/default.svg" },
        "git": { "iconPath": "./icons/files/git.svg" },
        "rust": { "iconPath": "./icons/files/rust.svg" },
        "docker": { "iconPath": "./icons/files/docker.svg" },
        "folder-src": { "iconPath": "./icons/folders/src.svg" },
        "folder-src-open": { "iconPath": "./icons/folders/src-open.svg" },
        "folder-assets": { "iconPath": "./icons/folders/assets.svg" }
    },
    "file": "default",
    "folder": "folder",
    "fileExtensions": { "rs": "rust" },
    "fileNames": { "Dockerfile": "docker", ".gitignore": "git" },
    "folderNames": { "src": "folder-src", "broken": "folder-missing" },
    "folderNamesExpanded": { "src": "folder-src-open" }
}"#;

/// Override document used unless a test provides its own.
pub const DEFAULT_MAPPINGS: &str = r#"{
    "$schema": "./custom-mappings.schema.json",
    // Rust object notation
    "fileExtensions": { "ron": "rust" },
    "fileNames": { "Dockerfile": "git" },
    "folderNames": { "infra": "folder-assets" },
    "folderNamesExpanded": {},
}"#;

/// An isolated workspace on disk.
#[allow(dead_code)]
pub struct TestWorkspace {
    temp_dir: TempDir,
    pub config: Config,
    pub paths: WorkspacePaths,
}

#[allow(dead_code)]
impl TestWorkspace {
    /// Create a new TestWorkspaceBuilder for fluent configuration.
    pub fn new() -> TestWorkspaceBuilder {
        TestWorkspaceBuilder::default()
    }

    pub fn root(&self) -> &Path {
        &self.paths.root
    }

    pub fn read(&self, path: &Path) -> String {
        fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {:?}: {}", path, e))
    }

    pub fn read_json(&self, path: &Path) -> serde_json::Value {
        serde_json::from_str(&self.read(path)).expect("valid JSON")
    }

    pub fn write(&self, path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// Commit `relative` (with `content`) into the repository at `repo_dir`.
    pub fn commit_file(&self, repo_dir: &Path, relative: &str, content: &str) {
        self.write(&repo_dir.join(relative), content);

        let git = GitManager::open(repo_dir).unwrap();
        let repo = git.repo();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new(relative)).unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        let signature = git2::Signature::now("test", "test@localhost").unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        repo.commit(Some("HEAD"), &signature, &signature, "test", &tree, &parents)
            .unwrap();
    }
}

/// Builder for [`TestWorkspace`].
pub struct TestWorkspaceBuilder {
    theme: Option<String>,
    mappings: Option<String>,
    file_icons: Vec<String>,
    folder_icons: Vec<String>,
    git_repos: bool,
}

impl Default for TestWorkspaceBuilder {
    fn default() -> Self {
        Self {
            theme: Some(DEFAULT_THEME.to_string()),
            mappings: Some(DEFAULT_MAPPINGS.to_string()),
            file_icons: vec!["rust.svg".into(), "git.svg".into(), "docker.svg".into()],
            folder_icons: vec!["src.svg".into(), "src-open.svg".into(), "assets.svg".into()],
            git_repos: false,
        }
    }
}

#[allow(dead_code)]
impl TestWorkspaceBuilder {
    pub fn with_theme(mut self, theme: &str) -> Self {
        self.theme = Some(theme.to_string());
        self
    }

    pub fn without_theme(mut self) -> Self {
        self.theme = None;
        self
    }

    pub fn with_mappings(mut self, mappings: &str) -> Self {
        self.mappings = Some(mappings.to_string());
        self
    }

    pub fn without_mappings(mut self) -> Self {
        self.mappings = None;
        self
    }

    pub fn with_file_icon(mut self, name: &str) -> Self {
        self.file_icons.push(name.to_string());
        self
    }

    /// Initialise the root and both submodule directories as git repositories.
    pub fn with_git_repos(mut self) -> Self {
        self.git_repos = true;
        self
    }

    pub fn build(self) -> Result<TestWorkspace> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().canonicalize()?;
        let config = Config::default();
        let paths = WorkspacePaths::new(&root, &config);

        fs::create_dir_all(paths.vscode_file_icons())?;
        fs::create_dir_all(paths.vscode_folder_icons())?;
        fs::create_dir_all(&paths.zed_dir)?;

        if let Some(theme) = &self.theme {
            fs::write(paths.source_theme(), theme)?;
        }
        if let Some(mappings) = &self.mappings {
            fs::write(&paths.mappings, mappings)?;
        }
        for icon in &self.file_icons {
            fs::write(paths.vscode_file_icons().join(icon), format!("<svg>{icon}</svg>"))?;
        }
        for icon in &self.folder_icons {
            fs::write(paths.vscode_folder_icons().join(icon), format!("<svg>{icon}</svg>"))?;
        }

        if self.git_repos {
            GitManager::init(&paths.root)?;
            GitManager::init(&paths.vscode_dir)?;
            GitManager::init(&paths.zed_dir)?;
        }

        Ok(TestWorkspace {
            temp_dir,
            config,
            paths,
        })
    }
}

/// One command seen by [`RecordingRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommand {
    pub cwd: PathBuf,
    pub command: String,
}

/// `CommandRunner` that records every command and succeeds, except for a
/// command configured to fail.
#[derive(Default)]
pub struct RecordingRunner {
    commands: RefCell<Vec<RecordedCommand>>,
    fail: Option<(String, i32)>,
}

#[allow(dead_code)]
impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every command whose rendered form starts with `prefix` fail.
    pub fn failing_on(prefix: &str, status: i32) -> Self {
        Self {
            commands: RefCell::default(),
            fail: Some((prefix.to_string(), status)),
        }
    }

    pub fn commands(&self) -> Vec<RecordedCommand> {
        self.commands.borrow().clone()
    }

    /// Commands run in `cwd`, in order.
    pub fn commands_in(&self, cwd: &Path) -> Vec<String> {
        self.commands
            .borrow()
            .iter()
            .filter(|c| c.cwd == cwd)
            .map(|c| c.command.clone())
            .collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<()> {
        let command = command_line(program, args);
        self.commands.borrow_mut().push(RecordedCommand {
            cwd: cwd.to_path_buf(),
            command: command.clone(),
        });

        match &self.fail {
            Some((prefix, status)) if command.starts_with(prefix.as_str()) => {
                Err(CommandFailed {
                    command,
                    status: Some(*status),
                }
                .into())
            }
            _ => Ok(()),
        }
    }
}
