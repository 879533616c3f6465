//! Operations that change where a branch sits in the graph: deleting a branch
//! (its children move up to the grandparent) and moving a branch onto a new
//! parent.

use crate::errors::{Result, StackError};
use crate::stack::context::RepoContext;
use crate::stack::graph::StackGraph;
use crate::stack::rebase::RebaseCoordinator;
use tracing::info;

/// What `delete_branch` changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteReport {
    pub branch: String,
    pub parent: Option<String>,
    pub relinked: Vec<String>,
}

/// Delete `branch` and reattach its children to its parent.
///
/// Parent and children are captured before git deletes anything. When the
/// branch was untracked its children are left pointing at the deleted name.
pub fn delete_branch(ctx: RepoContext<'_>, branch: &str, force: bool) -> Result<DeleteReport> {
    let graph = StackGraph::new(ctx);

    if ctx.repo.current_branch()? == branch {
        return Err(StackError::validation(format!(
            "Cannot delete '{branch}' while it is checked out"
        )));
    }

    let parent = graph.get_parent(branch)?;
    let children = graph.get_children(branch)?;

    let flag = if force { "-D" } else { "-d" };
    ctx.runner.git(&["branch", flag, branch])?;
    info!("Deleted branch '{}'", branch);

    // Relink before dropping the deleted branch's own record
    graph.relink_parent_children(parent.as_deref(), &children)?;
    graph.delete_parent(branch)?;

    let relinked = if parent.is_some() { children } else { Vec::new() };
    Ok(DeleteReport {
        branch: branch.to_string(),
        parent,
        relinked,
    })
}

/// Branches `branch` may be moved onto: everything except itself and its descendants
pub fn move_candidates(ctx: RepoContext<'_>, branch: &str) -> Result<Vec<String>> {
    let descendants = StackGraph::new(ctx).descendants(branch)?;
    Ok(ctx
        .repo
        .branches()?
        .into_iter()
        .filter(|b| b != branch && !descendants.contains(b))
        .collect())
}

/// Rebase `branch` onto `onto` and make `onto` its parent
pub fn move_branch(ctx: RepoContext<'_>, branch: &str, onto: &str) -> Result<()> {
    if branch == onto {
        return Err(StackError::validation(format!(
            "Cannot move '{branch}' onto itself"
        )));
    }
    if !ctx.repo.branch_exists(onto) {
        return Err(StackError::validation(format!(
            "Target branch '{onto}' does not exist"
        )));
    }
    if StackGraph::new(ctx).descendants(branch)?.iter().any(|d| d == onto) {
        return Err(StackError::validation(format!(
            "Cannot move '{branch}' onto its own descendant '{onto}'"
        )));
    }

    RebaseCoordinator::new(ctx).rebase_branch(branch, onto)?;
    info!("Moved '{}' onto '{}'", branch, onto);
    Ok(())
}
