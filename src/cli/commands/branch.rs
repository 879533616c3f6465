use super::branch_or_current;
use crate::cli::output::Output;
use crate::cli::workspace::Workspace;
use crate::errors::Result;
use crate::stack;
use console::style;

/// Create and check out a branch stacked on the current (or given) branch
pub async fn create(name: String, parent: Option<String>) -> Result<()> {
    let workspace = Workspace::open()?;
    let parent = stack::create_branch(workspace.context(), &name, parent.as_deref())?;

    Output::success(format!("Created branch '{}'", style(&name).cyan()));
    Output::sub_item(format!("Parent: {}", style(parent).cyan()));
    Ok(())
}

pub async fn track(branch: Option<String>, parent: String) -> Result<()> {
    let workspace = Workspace::open()?;
    let ctx = workspace.context();
    let branch = branch_or_current(branch, ctx)?;

    stack::track_branch(ctx, &branch, &parent)?;
    Output::success(format!("Tracking '{branch}' on top of '{parent}'"));
    Ok(())
}

pub async fn untrack(branch: Option<String>) -> Result<()> {
    let workspace = Workspace::open()?;
    let ctx = workspace.context();
    let branch = branch_or_current(branch, ctx)?;

    match stack::untrack_branch(ctx, &branch)? {
        Some(parent) => Output::success(format!("'{branch}' is no longer stacked on '{parent}'")),
        None => Output::info(format!("'{branch}' was not tracked")),
    }
    Ok(())
}

/// Delete a branch; its children move onto its parent
pub async fn delete(branch: String, force: bool) -> Result<()> {
    let workspace = Workspace::open()?;
    let report = stack::delete_branch(workspace.context(), &branch, force)?;

    Output::success(format!("Deleted branch '{}'", report.branch));
    if let Some(parent) = &report.parent {
        for child in &report.relinked {
            Output::sub_item(format!("'{child}' now stacked on '{parent}'"));
        }
    }
    if !report.relinked.is_empty() {
        Output::tip("Run 'gt restack' to rebase the relinked branches");
    }
    Ok(())
}
