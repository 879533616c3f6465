//! Scripted stand-ins for git and the selector used by unit tests.

use crate::errors::{Result, StackError};
use crate::git::{Repository, Runner};
use crate::stack::context::RepoContext;
use crate::stack::selector::Selector;
use crate::stack::store::{BranchStore, MemoryStore};
use std::cell::{Cell, RefCell};
use std::collections::{HashSet, VecDeque};

/// Simulates the handful of git commands stack operations issue
pub struct FakeGit {
    branches: RefCell<Vec<String>>,
    current: RefCell<String>,
    rebasing: Cell<bool>,
    calls: RefCell<Vec<String>>,
    failures: RefCell<HashSet<String>>,
}

impl FakeGit {
    pub fn new(branches: &[&str], current: &str) -> Self {
        Self {
            branches: RefCell::new(branches.iter().map(|b| b.to_string()).collect()),
            current: RefCell::new(current.to_string()),
            rebasing: Cell::new(false),
            calls: RefCell::new(Vec::new()),
            failures: RefCell::new(HashSet::new()),
        }
    }

    pub fn context<'a>(&'a self, store: &'a dyn BranchStore) -> RepoContext<'a> {
        RepoContext::new(store, self, self)
    }

    /// Make every exact invocation of `command` fail until cleared
    pub fn fail_on(&self, command: &str) {
        self.failures.borrow_mut().insert(command.to_string());
    }

    pub fn clear_failures(&self) {
        self.failures.borrow_mut().clear();
    }

    pub fn set_rebasing(&self, rebasing: bool) {
        self.rebasing.set(rebasing);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Branches passed to `git rebase <onto>` paired with the branch checked out at the time
    pub fn rebases(&self) -> Vec<(String, String)> {
        let mut current = String::new();
        let mut rebases = Vec::new();
        for call in self.calls.borrow().iter() {
            if let Some(branch) = call.strip_prefix("checkout ") {
                current = branch.to_string();
            } else if let Some(onto) = call.strip_prefix("rebase ") {
                if !onto.starts_with("--") {
                    rebases.push((current.clone(), onto.to_string()));
                }
            }
        }
        rebases
    }

    pub fn current(&self) -> String {
        self.current.borrow().clone()
    }

    fn fail(&self, command: &str) -> StackError {
        if command.starts_with("rebase ") {
            self.rebasing.set(true);
        }
        StackError::Command {
            command: command.to_string(),
            code: Some(1),
            stderr: format!("simulated failure of '{command}'"),
        }
    }
}

impl Runner for FakeGit {
    fn git_output(&self, args: &[&str]) -> Result<String> {
        let command = args.join(" ");
        self.calls.borrow_mut().push(command.clone());

        if self.failures.borrow().contains(&command) {
            return Err(self.fail(&command));
        }

        match args {
            ["checkout", "-b", name, ..] => {
                self.branches.borrow_mut().push(name.to_string());
                *self.current.borrow_mut() = name.to_string();
            }
            ["checkout", name] => {
                if !self.branches.borrow().iter().any(|b| b == name) {
                    return Err(StackError::Command {
                        command,
                        code: Some(1),
                        stderr: format!("pathspec '{name}' did not match"),
                    });
                }
                *self.current.borrow_mut() = name.to_string();
            }
            ["branch", "-d" | "-D", name] => {
                self.branches.borrow_mut().retain(|b| b != name);
            }
            ["check-ref-format", "--branch", name] => {
                if name.contains("..") || name.contains(' ') || name.ends_with('/') {
                    return Err(StackError::Command {
                        command,
                        code: Some(128),
                        stderr: format!("fatal: '{name}' is not a valid branch name"),
                    });
                }
                return Ok(name.to_string());
            }
            [.., "rebase", "--continue"] | ["rebase", "--abort"] => self.rebasing.set(false),
            ["log", "-1", "--format=%s", ..] => {
                return Ok(format!("Commit on {}", self.current.borrow()));
            }
            _ => {}
        }

        Ok(String::new())
    }
}

impl Repository for FakeGit {
    fn ensure_git_repository(&self) -> Result<()> {
        Ok(())
    }

    fn current_branch(&self) -> Result<String> {
        Ok(self.current())
    }

    fn branches(&self) -> Result<Vec<String>> {
        Ok(self.branches.borrow().clone())
    }

    fn is_rebase_in_progress(&self) -> bool {
        self.rebasing.get()
    }
}

/// `MemoryStore` whose writes to chosen keys fail
#[derive(Default)]
pub struct FailingStore {
    inner: MemoryStore,
    failing: RefCell<HashSet<String>>,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `set` and `unset` of `key` fail from now on
    pub fn fail_writes_to(&self, key: &str) {
        self.failing.borrow_mut().insert(key.to_string());
    }

    fn check(&self, key: &str) -> Result<()> {
        if self.failing.borrow().contains(key) {
            return Err(StackError::store(format!("simulated write failure for '{key}'")));
        }
        Ok(())
    }
}

impl BranchStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check(key)?;
        self.inner.set(key, value)
    }

    fn unset(&self, key: &str) -> Result<()> {
        self.check(key)?;
        self.inner.unset(key)
    }
}

/// Selector returning pre-recorded answers and remembering what it was shown
#[derive(Default)]
pub struct ScriptedSelector {
    answers: RefCell<VecDeque<Option<String>>>,
    shown: RefCell<Vec<Vec<String>>>,
}

impl ScriptedSelector {
    pub fn answering(answers: &[Option<&str>]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().map(|a| a.map(str::to_string)).collect()),
            shown: RefCell::new(Vec::new()),
        }
    }

    pub fn shown(&self) -> Vec<Vec<String>> {
        self.shown.borrow().clone()
    }
}

impl Selector for ScriptedSelector {
    fn select_one(&self, _prompt: &str, candidates: &[String]) -> Result<Option<String>> {
        self.shown.borrow_mut().push(candidates.to_vec());
        Ok(self.answers.borrow_mut().pop_front().flatten())
    }
}
