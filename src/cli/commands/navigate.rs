use crate::cli::output::Output;
use crate::cli::selector::DialoguerSelector;
use crate::cli::workspace::Workspace;
use crate::errors::Result;
use crate::stack;

/// Check out a child of the current branch, asking when there are several
pub async fn up() -> Result<()> {
    let workspace = Workspace::open()?;
    let child = stack::up(workspace.context(), None, &DialoguerSelector)?;
    Output::success(format!("Checked out '{child}'"));
    Ok(())
}

/// Check out the parent of the current branch
pub async fn down() -> Result<()> {
    let workspace = Workspace::open()?;
    let parent = stack::down(workspace.context(), None)?;
    Output::success(format!("Checked out '{parent}'"));
    Ok(())
}
