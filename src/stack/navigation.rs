use crate::errors::{Result, StackError};
use crate::stack::context::RepoContext;
use crate::stack::graph::StackGraph;
use crate::stack::selector::Selector;
use tracing::info;

fn checkout(ctx: RepoContext<'_>, branch: &str) -> Result<()> {
    ctx.runner
        .git(&["checkout", branch])
        .map_err(|e| StackError::checkout(branch, e.to_string()))?;
    info!("Switched to '{}'", branch);
    Ok(())
}

/// Check out the parent of `branch` (default: current). Returns the parent.
pub fn down(ctx: RepoContext<'_>, branch: Option<&str>) -> Result<String> {
    let branch = match branch {
        Some(branch) => branch.to_string(),
        None => ctx.repo.current_branch()?,
    };

    let parent = StackGraph::new(ctx)
        .get_parent(&branch)?
        .ok_or_else(|| StackError::NoParent(branch.clone()))?;

    checkout(ctx, &parent)?;
    Ok(parent)
}

/// Check out a child of `branch` (default: current), asking when there are several
pub fn up(ctx: RepoContext<'_>, branch: Option<&str>, selector: &dyn Selector) -> Result<String> {
    let branch = match branch {
        Some(branch) => branch.to_string(),
        None => ctx.repo.current_branch()?,
    };

    let mut children = StackGraph::new(ctx).get_children(&branch)?;
    let child = match children.len() {
        0 => return Err(StackError::NoChildren(branch)),
        1 => children.remove(0),
        _ => selector
            .select_one(&format!("Which child of '{branch}'?"), &children)?
            .ok_or(StackError::Cancelled)?,
    };

    checkout(ctx, &child)?;
    Ok(child)
}
