use crate::errors::{Result, StackError};
use crate::stack::context::RepoContext;
use crate::stack::graph::StackGraph;
use crate::stack::store::BranchStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

const PENDING_PARENT_KEY: &str = "gt.pending.parent";
const PENDING_CHILD_KEY: &str = "gt.pending.child";

/// Whether a move is waiting on conflict resolution.
///
/// Persisted as the `gt.pending.parent` / `gt.pending.child` pair; there is at
/// most one per repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveState {
    Idle,
    Paused { parent: String, child: String },
}

impl MoveState {
    /// Read the pending pair. A half-written pair counts as idle.
    pub fn load(store: &dyn BranchStore) -> Result<Self> {
        let parent = store.get(PENDING_PARENT_KEY)?;
        let child = store.get(PENDING_CHILD_KEY)?;

        match (parent, child) {
            (Some(parent), Some(child)) if !parent.is_empty() && !child.is_empty() => {
                Ok(MoveState::Paused { parent, child })
            }
            _ => Ok(MoveState::Idle),
        }
    }

    /// Write this state; `Idle` removes both keys
    pub fn save(&self, store: &dyn BranchStore) -> Result<()> {
        match self {
            MoveState::Idle => {
                store.unset(PENDING_PARENT_KEY)?;
                store.unset(PENDING_CHILD_KEY)
            }
            MoveState::Paused { parent, child } => {
                store.set(PENDING_PARENT_KEY, parent)?;
                store.set(PENDING_CHILD_KEY, child)
            }
        }
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, MoveState::Paused { .. })
    }
}

/// Result of `RebaseCoordinator::continue_rebase`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContinueOutcome {
    /// Git still reports a rebase in progress; more conflicts to resolve
    StillRebasing,
    /// The paused move finished and its relationship was recorded
    Finalized { parent: String, child: String },
    /// Rebase finished but there was no pending move to record
    NothingPending,
}

/// Runs single checkout+rebase steps and finishes them after conflicts
pub struct RebaseCoordinator<'a> {
    ctx: RepoContext<'a>,
    graph: StackGraph<'a>,
}

impl<'a> RebaseCoordinator<'a> {
    pub fn new(ctx: RepoContext<'a>) -> Self {
        Self {
            ctx,
            graph: StackGraph::new(ctx),
        }
    }

    /// Rebase `branch` onto `parent` and record the relationship.
    ///
    /// A failed rebase leaves the pending move in place and returns
    /// `StackError::RebasePaused`; `continue_rebase` finishes the bookkeeping.
    pub fn rebase_branch(&self, branch: &str, parent: &str) -> Result<()> {
        self.ctx
            .runner
            .git(&["checkout", branch])
            .map_err(|e| StackError::checkout(branch, e.to_string()))?;

        match MoveState::load(self.ctx.store) {
            Ok(MoveState::Paused {
                parent: old_parent,
                child: old_child,
            }) => warn!(
                "Replacing unfinished move of '{}' onto '{}'",
                old_child, old_parent
            ),
            Ok(MoveState::Idle) => {}
            Err(e) => debug!("Could not read pending move: {}", e),
        }

        let pending = MoveState::Paused {
            parent: parent.to_string(),
            child: branch.to_string(),
        };
        if let Err(e) = pending.save(self.ctx.store) {
            warn!("Failed to record pending move for '{}': {}", branch, e);
        }

        info!("Rebasing '{}' onto '{}'", branch, parent);
        if let Err(e) = self.ctx.runner.git(&["rebase", parent]) {
            return Err(StackError::RebasePaused {
                parent: parent.to_string(),
                child: branch.to_string(),
                cause: e.to_string(),
            });
        }

        // The rebase already happened; only the bookkeeping can fail from here
        if let Err(e) = MoveState::Idle.save(self.ctx.store) {
            warn!("Failed to clear pending move: {}", e);
        }
        self.graph.set_parent(parent, branch)
    }

    /// Finish a rebase the user resolved, recording the paused relationship
    pub fn continue_rebase(&self) -> Result<ContinueOutcome> {
        if self.ctx.repo.is_rebase_in_progress() {
            if let Err(e) = self
                .ctx
                .runner
                .git(&["-c", "core.editor=true", "rebase", "--continue"])
            {
                if !self.ctx.repo.is_rebase_in_progress() {
                    return Err(e);
                }
                debug!("rebase --continue stopped again: {}", e);
            }
        }

        if self.ctx.repo.is_rebase_in_progress() {
            return Ok(ContinueOutcome::StillRebasing);
        }

        match MoveState::load(self.ctx.store)? {
            MoveState::Paused { parent, child } => {
                self.graph.set_parent(&parent, &child)?;
                MoveState::Idle.save(self.ctx.store)?;
                info!("Finished moving '{}' onto '{}'", child, parent);
                Ok(ContinueOutcome::Finalized { parent, child })
            }
            MoveState::Idle => Ok(ContinueOutcome::NothingPending),
        }
    }

    /// Abandon the paused rebase; relationships stay as they were before it
    pub fn abort_rebase(&self) -> Result<MoveState> {
        if self.ctx.repo.is_rebase_in_progress() {
            self.ctx.runner.git(&["rebase", "--abort"])?;
        }

        let abandoned = MoveState::load(self.ctx.store)?;
        MoveState::Idle.save(self.ctx.store)?;
        Ok(abandoned)
    }

    pub fn pending_move(&self) -> Result<MoveState> {
        MoveState::load(self.ctx.store)
    }
}
