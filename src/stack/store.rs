use crate::errors::{Result, StackError};
use crate::git::Runner;
use std::cell::RefCell;
use std::collections::BTreeMap;
use tracing::trace;

/// Key/value persistence for stack relationships.
///
/// Implementations must be scoped to a single repository so parent pointers
/// never leak between checkouts. A missing key is `Ok(None)`, not an error.
pub trait BranchStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn unset(&self, key: &str) -> Result<()>;
}

impl<T: BranchStore + ?Sized> BranchStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn unset(&self, key: &str) -> Result<()> {
        (**self).unset(key)
    }
}

/// Stores values in the repository's local git config (`git config --local`)
#[derive(Debug, Clone)]
pub struct GitConfigStore<R: Runner> {
    runner: R,
}

/// `git config --get` exits with 1 when the key does not exist
const CONFIG_KEY_MISSING: i32 = 1;
/// `git config --unset` exits with 5 when there is nothing to remove
const CONFIG_NOTHING_TO_UNSET: i32 = 5;

impl<R: Runner> GitConfigStore<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: Runner> BranchStore for GitConfigStore<R> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self.runner.git_output(&["config", "--local", "--get", key]) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.exit_code() == Some(CONFIG_KEY_MISSING) => {
                trace!("config key {} not set", key);
                Ok(None)
            }
            Err(e) => Err(StackError::store(format!("Failed to read '{key}': {e}"))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.runner
            .git(&["config", "--local", key, value])
            .map_err(|e| StackError::store(format!("Failed to write '{key}': {e}")))
    }

    fn unset(&self, key: &str) -> Result<()> {
        match self.runner.git(&["config", "--local", "--unset", key]) {
            Ok(()) => Ok(()),
            Err(e)
                if matches!(
                    e.exit_code(),
                    Some(CONFIG_NOTHING_TO_UNSET) | Some(CONFIG_KEY_MISSING)
                ) =>
            {
                trace!("config key {} already unset", key);
                Ok(())
            }
            Err(e) => Err(StackError::store(format!("Failed to remove '{key}': {e}"))),
        }
    }
}

/// In-memory store with the same contract, for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored key, sorted
    pub fn keys(&self) -> Vec<String> {
        self.values.borrow().keys().cloned().collect()
    }
}

impl BranchStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn unset(&self, key: &str) -> Result<()> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}
