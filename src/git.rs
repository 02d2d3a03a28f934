use anyhow::{Context, Result};
use git2::Repository;
use std::path::Path;
use tracing::{debug, info};

/// What [`GitManager::ensure_remote`] had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteChange {
    Added,
    Updated,
    Unchanged,
}

/// Local (offline) git queries on one repository of the workspace.
///
/// Anything that talks to a remote or rewrites history goes through the
/// `git` binary instead; see [`crate::utils::CommandRunner`].
pub struct GitManager {
    repo: Repository,
}

impl GitManager {
    /// Open an existing repository (a submodule checkout counts).
    pub fn open(repo_path: &Path) -> Result<Self> {
        let repo = Repository::open(repo_path)
            .with_context(|| format!("Failed to open repository: {:?}", repo_path))?;

        if repo.is_bare() {
            return Err(anyhow::anyhow!(
                "Repository at {:?} is a bare repository and has no working directory.",
                repo_path
            ));
        }

        Ok(Self { repo })
    }

    /// Initialize a new non-bare repository.
    pub fn init(repo_path: &Path) -> Result<Self> {
        let repo = Repository::init(repo_path)
            .with_context(|| format!("Failed to initialize repository: {:?}", repo_path))?;
        Ok(Self { repo })
    }

    /// Get the repository reference
    pub fn repo(&self) -> &Repository {
        &self.repo
    }

    /// Whether there are staged or unstaged changes to tracked files.
    ///
    /// Matches `git diff --cached --quiet || git diff --quiet`: untracked files
    /// do not count.
    pub fn has_uncommitted_changes(&self) -> Result<bool> {
        let mut index = self.repo.index().context("Failed to get repository index")?;

        // Refresh the index to get current state
        index.read(true).context("Failed to read index")?;

        let head_tree = match self.repo.head() {
            Ok(head) => Some(head.peel_to_tree().context("Failed to peel HEAD to tree")?),
            Err(_) => None,
        };

        let staged = self
            .repo
            .diff_tree_to_index(head_tree.as_ref(), Some(&index), None)
            .context("Failed to diff HEAD against the index")?;
        if staged.deltas().next().is_some() {
            debug!("Staged changes in {:?}", self.repo.workdir());
            return Ok(true);
        }

        let unstaged = self
            .repo
            .diff_index_to_workdir(Some(&index), None)
            .context("Failed to diff the index against the working tree")?;
        let dirty = unstaged.deltas().next().is_some();
        if dirty {
            debug!("Unstaged changes in {:?}", self.repo.workdir());
        }
        Ok(dirty)
    }

    /// URL of a remote, if it is configured.
    pub fn remote_url(&self, name: &str) -> Option<String> {
        let remote = self.repo.find_remote(name).ok()?;
        remote.url().map(str::to_string)
    }

    /// Make `name` point at `url`: add it when missing, rewrite it when it
    /// points elsewhere.
    pub fn ensure_remote(&self, name: &str, url: &str) -> Result<RemoteChange> {
        match self.remote_url(name) {
            None => {
                self.repo
                    .remote(name, url)
                    .with_context(|| format!("Failed to add remote '{}'", name))?;
                info!("Added remote '{}' -> {}", name, url);
                Ok(RemoteChange::Added)
            }
            Some(current) if current != url => {
                self.repo
                    .remote_set_url(name, url)
                    .with_context(|| format!("Failed to set URL of remote '{}'", name))?;
                info!("Updated remote '{}': {} -> {}", name, current, url);
                Ok(RemoteChange::Updated)
            }
            Some(_) => Ok(RemoteChange::Unchanged),
        }
    }

    /// Get the current branch name
    pub fn get_current_branch(&self) -> Option<String> {
        let head = self.repo.head().ok()?;
        let name = head.name()?;
        name.strip_prefix("refs/heads/").map(|s| s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn commit_file(git: &GitManager, name: &str, content: &str) {
        let repo = git.repo();
        let workdir = repo.workdir().unwrap().to_path_buf();
        fs::write(workdir.join(name), content).unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new(name)).unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        let signature = git2::Signature::now("test", "test@localhost").unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        repo.commit(Some("HEAD"), &signature, &signature, "test", &tree, &parents)
            .unwrap();
    }

    #[test]
    fn test_fresh_repo_is_clean() {
        let temp_dir = TempDir::new().unwrap();
        let git = GitManager::init(temp_dir.path()).unwrap();
        assert!(!git.has_uncommitted_changes().unwrap());
    }

    #[test]
    fn test_untracked_files_do_not_count() {
        let temp_dir = TempDir::new().unwrap();
        let git = GitManager::init(temp_dir.path()).unwrap();
        commit_file(&git, "tracked.txt", "v1");

        fs::write(temp_dir.path().join("untracked.txt"), "new").unwrap();
        assert!(!git.has_uncommitted_changes().unwrap());
    }

    #[test]
    fn test_modified_tracked_file_is_dirty() {
        let temp_dir = TempDir::new().unwrap();
        let git = GitManager::init(temp_dir.path()).unwrap();
        commit_file(&git, "tracked.txt", "v1");

        fs::write(temp_dir.path().join("tracked.txt"), "v2").unwrap();
        assert!(git.has_uncommitted_changes().unwrap());
    }

    #[test]
    fn test_staged_file_is_dirty() {
        let temp_dir = TempDir::new().unwrap();
        let git = GitManager::init(temp_dir.path()).unwrap();
        commit_file(&git, "tracked.txt", "v1");

        fs::write(temp_dir.path().join("staged.txt"), "new").unwrap();
        let mut index = git.repo().index().unwrap();
        index.add_path(Path::new("staged.txt")).unwrap();
        index.write().unwrap();

        assert!(git.has_uncommitted_changes().unwrap());
    }

    #[test]
    fn test_ensure_remote() {
        let temp_dir = TempDir::new().unwrap();
        let git = GitManager::init(temp_dir.path()).unwrap();
        let url = "https://example.com/upstream.git";

        assert_eq!(git.remote_url("upstream"), None);
        assert_eq!(git.ensure_remote("upstream", url).unwrap(), RemoteChange::Added);
        assert_eq!(git.ensure_remote("upstream", url).unwrap(), RemoteChange::Unchanged);
        assert_eq!(
            git.ensure_remote("upstream", "https://example.com/other.git")
                .unwrap(),
            RemoteChange::Updated
        );
        assert_eq!(
            git.remote_url("upstream").as_deref(),
            Some("https://example.com/other.git")
        );
    }

    #[test]
    fn test_current_branch_after_commit() {
        let temp_dir = TempDir::new().unwrap();
        let git = GitManager::init(temp_dir.path()).unwrap();
        commit_file(&git, "a.txt", "a");
        assert!(git.get_current_branch().is_some());
    }

    #[test]
    fn test_open_missing_repo_fails() {
        let temp_dir = TempDir::new().unwrap();
        assert!(GitManager::open(&temp_dir.path().join("nope")).is_err());
    }
}
