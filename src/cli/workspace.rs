//! Wires the real git collaborators together for one command invocation.

use crate::config::Settings;
use crate::errors::{Result, StackError};
use crate::git::{get_current_repository, GitRepository, GitRunner, Repository};
use crate::github::{parse_github_remote, GitHubClient};
use crate::stack::{GitConfigStore, RepoContext};
use tracing::debug;

/// The repository the command runs in, plus the runner and store bound to it
pub struct Workspace {
    repo: GitRepository,
    runner: GitRunner,
    store: GitConfigStore<GitRunner>,
}

impl Workspace {
    /// Open the repository containing the current directory
    pub fn open() -> Result<Self> {
        let repo = get_current_repository()?;
        repo.ensure_git_repository()?;
        let runner = GitRunner::new(repo.path());
        let store = GitConfigStore::new(runner.clone());
        debug!("Using repository at {}", repo.path().display());

        Ok(Self {
            repo,
            runner,
            store,
        })
    }

    pub fn context(&self) -> RepoContext<'_> {
        RepoContext::new(&self.store, &self.runner, &self.repo)
    }

    /// GitHub client for this repository.
    ///
    /// Owner and name come from settings when set, otherwise from the URL of
    /// the configured remote.
    pub fn github_client(&self, settings: &Settings) -> Result<GitHubClient> {
        let token = settings.github_token().unwrap_or_default();

        let (owner, repo) = match (&settings.github.owner, &settings.github.repo) {
            (Some(owner), Some(repo)) if !owner.is_empty() && !repo.is_empty() => {
                (owner.clone(), repo.clone())
            }
            _ => {
                let url = self.repo.get_remote_url(&settings.stack.remote)?;
                let remote = parse_github_remote(&url).ok_or_else(|| {
                    StackError::config(format!(
                        "Could not determine the GitHub repository from '{url}'. \
                         Set github.owner and github.repo"
                    ))
                })?;
                (remote.owner, remote.repo)
            }
        };

        debug!("GitHub repository: {}/{}", owner, repo);
        GitHubClient::new(&settings.github.api_url, &owner, &repo, &token)
    }
}
