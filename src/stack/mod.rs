//! Stack graph engine
//!
//! Branch relationships live in the repository's local git config as one
//! parent pointer per branch. Everything else (children, descendants, the
//! traversal order of restack and submit) is derived from those pointers.
//!
//! - `store`: key/value persistence (`GitConfigStore`, `MemoryStore`)
//! - `graph`: parent/child relationships and relinking
//! - `rebase`: the pausable rebase state machine behind move and restack
//! - `restack`, `relink`, `navigation`, `submit`, `branch`, `tree`: operations

pub mod branch;
pub mod context;
pub mod graph;
pub mod navigation;
pub mod rebase;
pub mod relink;
pub mod restack;
pub mod selector;
pub mod store;
pub mod submit;
pub mod tree;

#[cfg(test)]
mod testing;

pub use branch::{create_branch, track_branch, untrack_branch};
pub use context::RepoContext;
pub use graph::{parent_key, StackGraph};
pub use navigation::{down, up};
pub use rebase::{ContinueOutcome, MoveState, RebaseCoordinator};
pub use relink::{delete_branch, move_branch, move_candidates, DeleteReport};
pub use restack::restack;
pub use selector::Selector;
pub use store::{BranchStore, GitConfigStore, MemoryStore};
pub use submit::{merge_branch_pr, submit_stack, SubmitMode, SubmitOptions, SubmitReport};
pub use tree::{stack_tree, TreeLine};
