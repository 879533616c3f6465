use crate::errors::{Result, StackError};
use crate::stack::context::RepoContext;
use crate::stack::graph::StackGraph;
use tracing::info;

/// Create `name` from `parent` (default: current branch), check it out and track it
pub fn create_branch(ctx: RepoContext<'_>, name: &str, parent: Option<&str>) -> Result<String> {
    let graph = StackGraph::new(ctx);
    graph.validate_branch_name(name)?;

    if ctx.repo.branch_exists(name) {
        return Err(StackError::validation(format!(
            "Branch '{name}' already exists"
        )));
    }

    let parent = match parent {
        Some(parent) => parent.to_string(),
        None => ctx.repo.current_branch()?,
    };

    ctx.runner
        .git(&["checkout", "-b", name, &parent])
        .map_err(|e| StackError::checkout(name, e.to_string()))?;
    graph.set_parent(&parent, name)?;

    info!("Created '{}' on top of '{}'", name, parent);
    Ok(parent)
}

/// Start tracking an existing branch under `parent`
pub fn track_branch(ctx: RepoContext<'_>, branch: &str, parent: &str) -> Result<()> {
    let graph = StackGraph::new(ctx);
    graph.validate_branch_name(branch)?;
    graph.validate_branch_name(parent)?;

    for name in [branch, parent] {
        if !ctx.repo.branch_exists(name) {
            return Err(StackError::validation(format!(
                "Branch '{name}' does not exist"
            )));
        }
    }
    if branch == parent {
        return Err(StackError::validation(format!(
            "'{branch}' cannot be its own parent"
        )));
    }

    graph.set_parent(parent, branch)?;
    info!("Tracking '{}' on top of '{}'", branch, parent);
    Ok(())
}

/// Forget the parent of `branch`. Returns the parent it had, if any.
pub fn untrack_branch(ctx: RepoContext<'_>, branch: &str) -> Result<Option<String>> {
    let graph = StackGraph::new(ctx);
    let parent = graph.get_parent(branch)?;
    graph.delete_parent(branch)?;
    Ok(parent)
}
