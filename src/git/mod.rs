pub mod repository;
pub mod runner;

pub use repository::{GitRepository, Repository};
pub use runner::{GitRunner, Runner};

use crate::errors::{Result, StackError};
use std::path::Path;

/// Find the root of the Git repository
pub fn find_repository_root(start_path: &Path) -> Result<std::path::PathBuf> {
    let repo = git2::Repository::discover(start_path)
        .map_err(|e| StackError::NotARepository(format!("{}: {}", start_path.display(), e)))?;

    let workdir = repo.workdir().ok_or_else(|| {
        StackError::NotARepository("Repository has no working directory (bare repo?)".to_string())
    })?;

    Ok(workdir.to_path_buf())
}

/// Get the current working directory as a Git repository
pub fn get_current_repository() -> Result<GitRepository> {
    let current_dir = std::env::current_dir()
        .map_err(|e| StackError::config(format!("Could not get current directory: {e}")))?;

    let repo_root = find_repository_root(&current_dir)?;
    GitRepository::open(&repo_root)
}
