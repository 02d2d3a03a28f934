//! Workspace-level git workflows.
//!
//! These orchestrate the `git`/`pnpm` binaries and the build steps. The first
//! failing step ends the workflow; nothing is rolled back.

use crate::config::Config;
use crate::git::GitManager;
use crate::services::build_service::{BuildService, ZedSyncSummary};
use crate::storage::Storage;
use crate::utils::{CommandRunner, WorkspacePaths};
use anyhow::{bail, Result};
use std::path::Path;
use tracing::{info, warn};

/// Commit message for regenerated Zed assets.
pub const ZED_COMMIT_MESSAGE: &str = "chore: sync generated assets from workspace";
/// Commit message for the workspace root.
pub const ROOT_COMMIT_MESSAGE: &str = "chore: sync workspace mappings and submodule pointers";

/// What `publish` committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishSummary {
    pub zed_committed: bool,
    pub root_committed: bool,
}

/// Service for the multi-repository workflows.
pub struct WorkspaceService<'a> {
    config: &'a Config,
    paths: &'a WorkspacePaths,
    storage: &'a dyn Storage,
    runner: &'a dyn CommandRunner,
    progress: &'a dyn Fn(&str),
}

impl<'a> WorkspaceService<'a> {
    pub fn new(
        config: &'a Config,
        paths: &'a WorkspacePaths,
        storage: &'a dyn Storage,
        runner: &'a dyn CommandRunner,
        progress: &'a dyn Fn(&str),
    ) -> Self {
        Self {
            config,
            paths,
            storage,
            runner,
            progress,
        }
    }

    /// Bring both submodules up to date with their upstreams, then regenerate.
    ///
    /// 1. `git submodule update --init --recursive`
    /// 2. refuse to continue if either submodule has uncommitted changes
    /// 3. point the upstream remote of each submodule at the configured URL
    /// 4. checkout, fetch and rebase each submodule onto the upstream ref
    /// 5. apply custom mappings and regenerate the Zed theme
    pub fn sync(&self) -> Result<ZedSyncSummary> {
        let root = &self.paths.root;
        let vscode = &self.paths.vscode_dir;
        let zed = &self.paths.zed_dir;

        self.git(&["submodule", "update", "--init", "--recursive"], root)?;

        self.ensure_clean(vscode)?;
        self.ensure_clean(zed)?;

        let remote = &self.config.upstream.remote;
        GitManager::open(vscode)?.ensure_remote(remote, &self.config.upstream.vscode_url)?;
        GitManager::open(zed)?.ensure_remote(remote, &self.config.upstream.zed_url)?;

        for dir in [vscode, zed] {
            (self.progress)(&format!(
                "Syncing {} from {}...",
                self.paths.display(dir),
                self.config.upstream.upstream_ref
            ));
            self.rebase_on_upstream(dir)?;
        }

        (self.progress)("Applying root custom mappings...");
        BuildService::apply_custom_mappings(self.storage, self.paths)?;

        (self.progress)("Syncing zed assets from local vscode-symbols...");
        let summary = BuildService::sync_zed(self.storage, self.paths, &self.config.zed)?;

        info!("Workspace sync complete");
        Ok(summary)
    }

    /// Regenerate, commit what changed, and push all three repositories.
    pub fn publish(&self) -> Result<PublishSummary> {
        (self.progress)("Building zed-symbols from workspace mappings...");
        BuildService::build(self.storage, self.paths, &self.config.zed)?;

        let zed_committed = self.commit_if_changed(&self.paths.zed_dir, ZED_COMMIT_MESSAGE)?;
        let root_committed = self.commit_if_changed(&self.paths.root, ROOT_COMMIT_MESSAGE)?;

        for dir in [&self.paths.vscode_dir, &self.paths.zed_dir, &self.paths.root] {
            (self.progress)(&format!("Pushing {}...", self.label(dir)));
            self.push(dir)?;
        }

        info!(
            "Workspace publish complete (zed committed: {}, root committed: {})",
            zed_committed, root_committed
        );
        Ok(PublishSummary {
            zed_committed,
            root_committed,
        })
    }

    /// Run each submodule's own upstream sync and build scripts through pnpm.
    pub fn sync_all(&self) -> Result<()> {
        let root = &self.paths.root;
        let vscode = format!("./{}", self.config.paths.vscode_dir.display());
        let zed = format!("./{}", self.config.paths.zed_dir.display());

        (self.progress)("Syncing vscode-symbols from upstream...");
        self.runner
            .run("pnpm", &["--dir", &vscode, "sync:upstream"], root)?;

        (self.progress)("Building zed-symbols from local vscode-symbols...");
        self.runner.run("pnpm", &["--dir", &zed, "build"], root)?;

        Ok(())
    }

    fn git(&self, args: &[&str], cwd: &Path) -> Result<()> {
        self.runner.run("git", args, cwd)
    }

    fn label(&self, dir: &Path) -> String {
        if dir == self.paths.root.as_path() {
            "root workspace".to_string()
        } else {
            self.paths.display(dir)
        }
    }

    fn ensure_clean(&self, repo_dir: &Path) -> Result<()> {
        if GitManager::open(repo_dir)?.has_uncommitted_changes()? {
            warn!("Uncommitted changes in {:?}", repo_dir);
            bail!(
                "{} has uncommitted changes. Commit or stash first.",
                self.paths.display(repo_dir)
            );
        }
        Ok(())
    }

    fn rebase_on_upstream(&self, repo_dir: &Path) -> Result<()> {
        let upstream = &self.config.upstream;
        self.git(&["checkout", &self.config.branch], repo_dir)?;
        self.git(&["fetch", &upstream.remote, "--tags"], repo_dir)?;
        self.git(&["rebase", &upstream.upstream_ref], repo_dir)
    }

    /// `git add -A`, then commit only if something is staged or modified.
    fn commit_if_changed(&self, repo_dir: &Path, message: &str) -> Result<bool> {
        self.git(&["add", "-A"], repo_dir)?;
        if !GitManager::open(repo_dir)?.has_uncommitted_changes()? {
            info!("Nothing to commit in {:?}", repo_dir);
            return Ok(false);
        }
        self.git(&["commit", "-m", message], repo_dir)?;
        Ok(true)
    }

    fn push(&self, repo_dir: &Path) -> Result<()> {
        let branch = &self.config.branch;
        if let Some(current) = GitManager::open(repo_dir)?.get_current_branch() {
            if &current != branch {
                warn!(
                    "{:?} is on branch '{}', pushing '{}'",
                    repo_dir, current, branch
                );
            }
        }
        self.git(&["push", "origin", branch], repo_dir)
    }
}
