use crate::errors::{Result, StackError};
use crate::github::{CreatePullRequest, MergeMethod, PullRequest, PullRequestClient};
use crate::stack::context::RepoContext;
use crate::stack::graph::StackGraph;
use crate::stack::selector::Selector;
use std::collections::{HashSet, VecDeque};
use tracing::{debug, info};

/// How one branch is submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    Normal,
    Draft,
    Skip,
}

impl SubmitMode {
    const CHOICES: [&'static str; 3] = ["normal", "draft", "skip"];

    fn from_choice(choice: &str) -> Option<Self> {
        match choice {
            "normal" => Some(SubmitMode::Normal),
            "draft" => Some(SubmitMode::Draft),
            "skip" => Some(SubmitMode::Skip),
            _ => None,
        }
    }
}

/// Options for submitting a stack
#[derive(Debug, Clone)]
pub struct SubmitOptions {
    /// Branch to start from (defaults to the current branch)
    pub start: Option<String>,
    /// Remote to force-push to
    pub remote: String,
    /// Open new PRs as drafts unless the prompt says otherwise
    pub draft: bool,
    /// Ask normal/draft/skip for every branch
    pub interactive: bool,
}

impl Default for SubmitOptions {
    fn default() -> Self {
        Self {
            start: None,
            remote: "origin".to_string(),
            draft: false,
            interactive: false,
        }
    }
}

/// What `submit_stack` did, branch by branch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitReport {
    pub pushed: Vec<String>,
    /// (branch, PR number)
    pub created: Vec<(String, u64)>,
    /// Branches that already had an open PR
    pub existing: Vec<String>,
    pub skipped: Vec<String>,
}

/// Push every branch of the stack above `start` and open missing PRs.
///
/// Breadth-first like restack so a PR's base branch is always pushed before
/// the PR is opened. Any failure stops the walk and leaves the failing branch
/// checked out; only a complete walk returns to the starting branch.
pub async fn submit_stack(
    ctx: RepoContext<'_>,
    client: &dyn PullRequestClient,
    selector: &dyn Selector,
    options: &SubmitOptions,
) -> Result<SubmitReport> {
    let original = ctx.repo.current_branch()?;
    let start = options.start.clone().unwrap_or_else(|| original.clone());
    let graph = StackGraph::new(ctx);

    let existing: HashSet<String> = client
        .list_pull_requests()
        .await?
        .into_iter()
        .map(|pr| pr.head)
        .collect();
    debug!("{} branches already have open PRs", existing.len());

    let mut report = SubmitReport::default();
    let mut visited: HashSet<String> = HashSet::from([start.clone()]);
    let mut queue = VecDeque::new();

    // The starting branch only gets a PR when it sits on top of something
    if let Some(parent) = graph.get_parent(&start)? {
        submit_branch(ctx, client, selector, options, &existing, &start, &parent, &mut report)
            .await?;
    }
    queue.push_back(start.clone());

    while let Some(node) = queue.pop_front() {
        for child in graph.get_children(&node)? {
            if child == node || !visited.insert(child.clone()) {
                continue;
            }
            submit_branch(ctx, client, selector, options, &existing, &child, &node, &mut report)
                .await?;
            queue.push_back(child);
        }
    }

    ctx.runner
        .git(&["checkout", &original])
        .map_err(|e| StackError::checkout(&original, e.to_string()))?;

    info!(
        "Submitted stack from '{}': {} pushed, {} new PRs",
        start,
        report.pushed.len(),
        report.created.len()
    );
    Ok(report)
}

#[allow(clippy::too_many_arguments)]
async fn submit_branch(
    ctx: RepoContext<'_>,
    client: &dyn PullRequestClient,
    selector: &dyn Selector,
    options: &SubmitOptions,
    existing: &HashSet<String>,
    branch: &str,
    parent: &str,
    report: &mut SubmitReport,
) -> Result<()> {
    ctx.runner
        .git(&["checkout", branch])
        .map_err(|e| StackError::checkout(branch, e.to_string()))?;

    let mode = if options.interactive {
        let choices: Vec<String> = SubmitMode::CHOICES.iter().map(|c| c.to_string()).collect();
        let choice = selector
            .select_one(&format!("Submit '{branch}' as"), &choices)?
            .ok_or(StackError::Cancelled)?;
        SubmitMode::from_choice(&choice)
            .ok_or_else(|| StackError::validation(format!("Unknown submit mode '{choice}'")))?
    } else if options.draft {
        SubmitMode::Draft
    } else {
        SubmitMode::Normal
    };

    if mode == SubmitMode::Skip {
        info!("Skipping '{}'", branch);
        report.skipped.push(branch.to_string());
        return Ok(());
    }

    let refspec = format!("{branch}:{branch}");
    ctx.runner.git(&["push", "--force", &options.remote, &refspec])?;
    report.pushed.push(branch.to_string());

    if existing.contains(branch) {
        debug!("'{}' already has a pull request", branch);
        report.existing.push(branch.to_string());
        return Ok(());
    }

    let base = parent.to_string();
    let title = ctx
        .runner
        .git_output(&["log", "-1", "--format=%s", branch])
        .ok()
        .filter(|subject| !subject.is_empty())
        .unwrap_or_else(|| branch.to_string());

    let pr = client
        .create_pull_request(CreatePullRequest {
            title,
            body: format!("Stacked on `{base}`."),
            head: branch.to_string(),
            base,
            draft: mode == SubmitMode::Draft,
        })
        .await?;
    info!("Opened PR #{} for '{}'", pr.number, branch);
    report.created.push((branch.to_string(), pr.number));
    Ok(())
}

/// Merge the open pull request whose head is `branch`
pub async fn merge_branch_pr(
    client: &dyn PullRequestClient,
    branch: &str,
    method: MergeMethod,
) -> Result<PullRequest> {
    let pr = client
        .list_pull_requests()
        .await?
        .into_iter()
        .find(|pr| pr.head == branch)
        .ok_or_else(|| StackError::validation(format!("No open pull request for '{branch}'")))?;

    debug!("Merging PR #{} ({}) with {}", pr.number, pr.head, method);
    client.merge_pull_request(pr.number, method).await?;
    info!("Merged PR #{} for '{}'", pr.number, branch);
    Ok(pr)
}
