use crate::errors::Result;
use crate::stack::context::RepoContext;
use crate::stack::graph::StackGraph;
use crate::stack::rebase::RebaseCoordinator;
use std::collections::{HashSet, VecDeque};
use tracing::{info, warn};

/// Rebase every descendant of `start` (default: current branch) onto its parent.
///
/// Breadth-first, so a branch is only rebased after its own parent has been.
/// The first failure (including a conflict pause) stops the walk; rerun after
/// `gt cont` to cover the remaining branches. Returns the rebased branches in
/// order.
pub fn restack(ctx: RepoContext<'_>, start: Option<&str>) -> Result<Vec<String>> {
    let original = ctx.repo.current_branch()?;
    let start = start.map(str::to_string).unwrap_or_else(|| original.clone());

    let graph = StackGraph::new(ctx);
    let coordinator = RebaseCoordinator::new(ctx);

    let mut visited: HashSet<String> = HashSet::from([start.clone()]);
    let mut queue = VecDeque::from([start.clone()]);
    let mut rebased = Vec::new();

    while let Some(node) = queue.pop_front() {
        for child in graph.get_children(&node)? {
            if child == node {
                continue;
            }
            if !visited.insert(child.clone()) {
                warn!("'{}' reached twice while restacking; skipping", child);
                continue;
            }

            coordinator.rebase_branch(&child, &node)?;
            rebased.push(child.clone());
            queue.push_back(child);
        }
    }

    if !rebased.is_empty() {
        ctx.runner.git(&["checkout", &original])?;
    }

    info!("Restacked {} branches above '{}'", rebased.len(), start);
    Ok(rebased)
}
