use super::{branch_or_current, explain_pause};
use crate::cli::output::Output;
use crate::cli::selector::DialoguerSelector;
use crate::cli::workspace::Workspace;
use crate::config::load_settings;
use crate::errors::{Result, StackError};
use crate::github::MergeMethod;
use crate::stack::{self, ContinueOutcome, MoveState, RebaseCoordinator, Selector, StackGraph};
use crate::utils::Spinner;
use console::style;

/// Move a branch onto a new parent, prompting for the parent when not given
pub async fn move_branch(
    branch: Option<String>,
    onto: Option<String>,
    restack_after: bool,
) -> Result<()> {
    let workspace = Workspace::open()?;
    let ctx = workspace.context();
    let branch = branch_or_current(branch, ctx)?;

    let onto = match onto {
        Some(onto) => onto,
        None => {
            let candidates = stack::move_candidates(ctx, &branch)?;
            if candidates.is_empty() {
                return Err(StackError::validation(format!(
                    "No branch available to move '{branch}' onto"
                )));
            }
            DialoguerSelector
                .select_one(&format!("Move '{branch}' onto"), &candidates)?
                .ok_or(StackError::Cancelled)?
        }
    };

    explain_pause(stack::move_branch(ctx, &branch, &onto))?;
    Output::success(format!(
        "Moved '{}' onto '{}'",
        style(&branch).cyan(),
        style(&onto).cyan()
    ));

    if restack_after {
        let rebased = explain_pause(stack::restack(ctx, Some(&branch)))?;
        for name in rebased {
            Output::sub_item(format!("Restacked '{name}'"));
        }
    }
    Ok(())
}

/// Rebase every branch above the current (or given) branch
pub async fn restack(branch: Option<String>) -> Result<()> {
    let workspace = Workspace::open()?;
    let rebased = explain_pause(stack::restack(workspace.context(), branch.as_deref()))?;

    if rebased.is_empty() {
        Output::info("Nothing to restack");
    } else {
        Output::success(format!("Restacked {} branches", rebased.len()));
        for name in rebased {
            Output::sub_item(name);
        }
    }
    Ok(())
}

/// Finish a conflicted rebase
pub async fn cont() -> Result<()> {
    let workspace = Workspace::open()?;

    match RebaseCoordinator::new(workspace.context()).continue_rebase()? {
        ContinueOutcome::StillRebasing => {
            Output::warning("The rebase still has unresolved conflicts");
            Output::tip("Resolve them, 'git add' the files and run 'gt cont' again");
        }
        ContinueOutcome::Finalized { parent, child } => {
            Output::success(format!("Moved '{child}' onto '{parent}'"));
            Output::tip(format!(
                "Run 'gt restack {child}' to bring its descendants along"
            ));
        }
        ContinueOutcome::NothingPending => {
            Output::info("Rebase finished; no pending move to record");
        }
    }
    Ok(())
}

/// Abandon a conflicted rebase
pub async fn abort() -> Result<()> {
    let workspace = Workspace::open()?;

    match RebaseCoordinator::new(workspace.context()).abort_rebase()? {
        MoveState::Paused { parent, child } => {
            Output::success(format!("Aborted moving '{child}' onto '{parent}'"));
        }
        MoveState::Idle => Output::info("No pending move"),
    }
    Ok(())
}

/// Print the tracked tree below `root` (default: trunk)
pub async fn log(root: Option<String>) -> Result<()> {
    let settings = load_settings()?;
    let workspace = Workspace::open()?;
    let ctx = workspace.context();

    let root = root.unwrap_or_else(|| settings.stack.trunk.clone());
    let current = ctx.repo.current_branch().ok();

    for line in stack::stack_tree(ctx, &root)? {
        Output::tree_line(
            &line.prefix,
            &line.branch,
            current.as_deref() == Some(line.branch.as_str()),
        );
    }

    if let MoveState::Paused { parent, child } = RebaseCoordinator::new(ctx).pending_move()? {
        println!();
        Output::warning(format!(
            "Moving '{child}' onto '{parent}' is waiting for 'gt cont'"
        ));
    }
    Ok(())
}

/// Push the stack and open the missing pull requests
pub async fn submit(branch: Option<String>, interactive: bool, draft: bool) -> Result<()> {
    let settings = load_settings()?;
    let workspace = Workspace::open()?;
    let client = workspace.github_client(&settings)?;

    let options = stack::SubmitOptions {
        start: branch,
        remote: settings.stack.remote.clone(),
        draft: draft || settings.stack.draft,
        interactive,
    };

    let report =
        stack::submit_stack(workspace.context(), &client, &DialoguerSelector, &options).await?;

    if report.pushed.is_empty() && report.skipped.is_empty() {
        Output::info("Nothing to submit");
        return Ok(());
    }

    Output::success(format!("Pushed {} branches", report.pushed.len()));
    for (branch, number) in &report.created {
        Output::sub_item(format!("#{number} opened for '{branch}'"));
    }
    for branch in &report.existing {
        Output::sub_item(format!("'{branch}' already has an open PR"));
    }
    for branch in &report.skipped {
        Output::sub_item(format!("'{branch}' skipped"));
    }
    Ok(())
}

/// Merge the open pull request of a branch
pub async fn merge(branch: Option<String>, method: MergeMethod) -> Result<()> {
    let settings = load_settings()?;
    let workspace = Workspace::open()?;
    let ctx = workspace.context();
    let branch = branch_or_current(branch, ctx)?;
    let client = workspace.github_client(&settings)?;

    let spinner = Spinner::new(format!("Merging pull request for '{branch}'..."));
    let result = stack::merge_branch_pr(&client, &branch, method).await;
    spinner.stop();
    let pr = result?;

    Output::success(format!("Merged PR #{}: {}", pr.number, pr.title));
    if !pr.html_url.is_empty() {
        Output::sub_item(&pr.html_url);
    }

    if !StackGraph::new(ctx).get_children(&branch)?.is_empty() {
        Output::tip(format!(
            "Branches stacked on '{branch}' still point at it; \
             'gt delete {branch}' relinks them to '{}'",
            pr.base
        ));
    }
    Ok(())
}
