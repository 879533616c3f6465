//! Pull request hosting. Stack operations only see the `PullRequestClient`
//! trait; `GitHubClient` is the REST implementation.

pub mod client;
pub mod remote;

pub use client::GitHubClient;
pub use remote::{parse_github_remote, RemoteRepo};

use crate::errors::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Pull request information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    /// Branch the PR merges from
    pub head: String,
    /// Branch the PR merges into
    pub base: String,
    pub draft: bool,
    pub html_url: String,
}

/// Request to create a pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePullRequest {
    pub title: String,
    pub body: String,
    pub head: String,
    pub base: String,
    pub draft: bool,
}

/// Merge strategy options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMethod {
    #[default]
    Merge,
    Squash,
    Rebase,
}

impl std::fmt::Display for MergeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeMethod::Merge => write!(f, "merge"),
            MergeMethod::Squash => write!(f, "squash"),
            MergeMethod::Rebase => write!(f, "rebase"),
        }
    }
}

/// Pull request operations consumed by submit and merge
#[async_trait]
pub trait PullRequestClient: Send + Sync {
    /// Open pull requests for the repository
    async fn list_pull_requests(&self) -> Result<Vec<PullRequest>>;

    async fn create_pull_request(&self, request: CreatePullRequest) -> Result<PullRequest>;

    async fn merge_pull_request(&self, number: u64, method: MergeMethod) -> Result<()>;
}
