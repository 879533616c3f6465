pub mod branch;
pub mod completions;
pub mod config;
pub mod navigate;
pub mod stack;
pub mod version;

use crate::cli::output::Output;
use crate::errors::{Result, StackError};

/// Print recovery instructions when a rebase stopped on conflicts, then pass
/// the result through unchanged
pub(crate) fn explain_pause<T>(result: Result<T>) -> Result<T> {
    if let Err(StackError::RebasePaused { parent, child, .. }) = &result {
        Output::warning(format!(
            "Rebase of '{child}' onto '{parent}' stopped on conflicts"
        ));
        Output::next_steps(&[
            "Resolve the conflicts and stage the files with 'git add'",
            "Run 'gt cont' to finish and record the new parent",
            "Or run 'gt abort' to give up on this move",
        ]);
    }
    result
}

/// Branch given on the command line, or the checked-out one
pub(crate) fn branch_or_current(
    branch: Option<String>,
    ctx: crate::stack::RepoContext<'_>,
) -> Result<String> {
    match branch {
        Some(branch) => Ok(branch),
        None => ctx.repo.current_branch(),
    }
}
