use crate::errors::{Result, StackError};
use std::path::{Path, PathBuf};

/// Read-only view of the repository state that stack operations consult
pub trait Repository {
    /// Fail with `NotARepository` unless this handle points at a usable work tree
    fn ensure_git_repository(&self) -> Result<()>;

    /// Name of the checked-out branch
    fn current_branch(&self) -> Result<String>;

    /// All local branch names
    fn branches(&self) -> Result<Vec<String>>;

    /// Whether git's rebase state directories are present
    fn is_rebase_in_progress(&self) -> bool;

    /// Check if a local branch exists
    fn branch_exists(&self, name: &str) -> bool {
        self.branches()
            .map(|branches| branches.iter().any(|b| b == name))
            .unwrap_or(false)
    }
}

impl<T: Repository + ?Sized> Repository for &T {
    fn ensure_git_repository(&self) -> Result<()> {
        (**self).ensure_git_repository()
    }

    fn current_branch(&self) -> Result<String> {
        (**self).current_branch()
    }

    fn branches(&self) -> Result<Vec<String>> {
        (**self).branches()
    }

    fn is_rebase_in_progress(&self) -> bool {
        (**self).is_rebase_in_progress()
    }

    fn branch_exists(&self, name: &str) -> bool {
        (**self).branch_exists(name)
    }
}

/// Wrapper around git2::Repository for the queries stack operations need
pub struct GitRepository {
    repo: git2::Repository,
    path: PathBuf,
}

impl GitRepository {
    /// Open the Git repository containing the given path
    pub fn open(path: &Path) -> Result<Self> {
        let repo = git2::Repository::discover(path)
            .map_err(|e| StackError::NotARepository(format!("{}: {}", path.display(), e)))?;

        let workdir = repo
            .workdir()
            .ok_or_else(|| {
                StackError::NotARepository("Repository has no working directory".to_string())
            })?
            .to_path_buf();

        Ok(Self {
            repo,
            path: workdir,
        })
    }

    /// Get repository working directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Per-worktree git directory (`.git` or the worktree's gitdir)
    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    /// Get remote URL for a given remote name
    pub fn get_remote_url(&self, name: &str) -> Result<String> {
        let remote = self.repo.find_remote(name)?;

        let url = remote.url().ok_or_else(|| {
            StackError::Git(git2::Error::from_str("Remote URL is not valid UTF-8"))
        })?;

        Ok(url.to_string())
    }
}

impl Repository for GitRepository {
    fn ensure_git_repository(&self) -> Result<()> {
        if self.repo.is_bare() {
            return Err(StackError::NotARepository(format!(
                "{} is a bare repository",
                self.repo.path().display()
            )));
        }
        Ok(())
    }

    fn current_branch(&self) -> Result<String> {
        let head = self
            .repo
            .head()
            .map_err(|e| StackError::config(format!("Could not get HEAD: {e}")))?;

        if head.is_branch() {
            if let Some(name) = head.shorthand() {
                return Ok(name.to_string());
            }
        }

        // Detached HEAD (e.g. mid-rebase) - return commit hash
        let commit = head
            .peel_to_commit()
            .map_err(|e| StackError::config(format!("Could not get HEAD commit: {e}")))?;
        Ok(format!("HEAD@{}", commit.id()))
    }

    fn branches(&self) -> Result<Vec<String>> {
        let branches = self.repo.branches(Some(git2::BranchType::Local))?;

        let mut branch_names = Vec::new();
        for branch in branches {
            let (branch, _) = branch?;
            if let Some(name) = branch.name()? {
                branch_names.push(name.to_string());
            }
        }

        Ok(branch_names)
    }

    fn is_rebase_in_progress(&self) -> bool {
        let git_dir = self.git_dir();
        git_dir.join("rebase-merge").exists() || git_dir.join("rebase-apply").exists()
    }

    fn branch_exists(&self, name: &str) -> bool {
        self.repo.find_branch(name, git2::BranchType::Local).is_ok()
    }
}
