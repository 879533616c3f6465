use crate::git::{Repository, Runner};
use crate::stack::store::BranchStore;

/// Handles for one repository, passed into every stack component.
///
/// Cheap to copy; all three collaborators are borrowed.
#[derive(Clone, Copy)]
pub struct RepoContext<'a> {
    pub store: &'a dyn BranchStore,
    pub runner: &'a dyn Runner,
    pub repo: &'a dyn Repository,
}

impl<'a> RepoContext<'a> {
    pub fn new(
        store: &'a dyn BranchStore,
        runner: &'a dyn Runner,
        repo: &'a dyn Repository,
    ) -> Self {
        Self {
            store,
            runner,
            repo,
        }
    }
}
