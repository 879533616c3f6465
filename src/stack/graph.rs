//! Parent/child relationships between branches.
//!
//! Only the parent pointer is persisted (`gt.branch.<child>.parent`); children
//! are always derived by scanning every local branch, so there is no second
//! index that could drift out of sync.

use crate::errors::{Result, StackError};
use crate::stack::context::RepoContext;
use std::collections::{HashSet, VecDeque};
use tracing::{debug, info};

/// Config key holding the parent of `child`
pub fn parent_key(child: &str) -> String {
    format!("gt.branch.{child}.parent")
}

/// Relationship layer over the branch store
pub struct StackGraph<'a> {
    ctx: RepoContext<'a>,
}

impl<'a> StackGraph<'a> {
    pub fn new(ctx: RepoContext<'a>) -> Self {
        Self { ctx }
    }

    /// Record `parent` as the parent of `child`. No cycle detection.
    pub fn set_parent(&self, parent: &str, child: &str) -> Result<()> {
        self.ctx.store.set(&parent_key(child), parent)?;
        debug!("Set parent of '{}' to '{}'", child, parent);
        Ok(())
    }

    /// Parent of `child`, or `None` when the branch is untracked
    pub fn get_parent(&self, child: &str) -> Result<Option<String>> {
        Ok(self
            .ctx
            .store
            .get(&parent_key(child))?
            .filter(|parent| !parent.is_empty()))
    }

    pub fn delete_parent(&self, child: &str) -> Result<()> {
        self.ctx.store.unset(&parent_key(child))?;
        debug!("Removed parent of '{}'", child);
        Ok(())
    }

    /// Branches whose stored parent is `branch`, in branch-listing order
    pub fn get_children(&self, branch: &str) -> Result<Vec<String>> {
        let mut children = Vec::new();
        for candidate in self.ctx.repo.branches()? {
            match self.get_parent(&candidate) {
                Ok(Some(parent)) if parent == branch => children.push(candidate),
                Ok(_) => {}
                Err(e) => debug!("Skipping '{}' while scanning children: {}", candidate, e),
            }
        }
        Ok(children)
    }

    /// Every branch below `branch`, breadth-first. Tolerates accidental cycles.
    pub fn descendants(&self, branch: &str) -> Result<Vec<String>> {
        let mut seen: HashSet<String> = HashSet::from([branch.to_string()]);
        let mut queue = VecDeque::from([branch.to_string()]);
        let mut result = Vec::new();

        while let Some(node) = queue.pop_front() {
            for child in self.get_children(&node)? {
                if seen.insert(child.clone()) {
                    result.push(child.clone());
                    queue.push_back(child);
                }
            }
        }

        Ok(result)
    }

    /// Reject names git would not accept as a branch
    pub fn validate_branch_name(&self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(StackError::invalid_branch_name(
                name,
                "branch name cannot be empty",
            ));
        }

        self.ctx
            .runner
            .git(&["check-ref-format", "--branch", name])
            .map_err(|e| StackError::invalid_branch_name(name, e.to_string()))
    }

    /// Point every branch in `children` at `parent`.
    ///
    /// With no parent the children are left alone and simply become roots.
    pub fn relink_parent_children(&self, parent: Option<&str>, children: &[String]) -> Result<()> {
        let Some(parent) = parent else {
            debug!("No parent to relink {} children onto", children.len());
            return Ok(());
        };

        for child in children {
            self.set_parent(parent, child)?;
            info!("Relinked '{}' onto '{}'", child, parent);
        }
        Ok(())
    }
}
