use crate::errors::Result;

/// Interactive disambiguation between several branches (or choices).
///
/// `Ok(None)` means the user cancelled; callers turn that into
/// `StackError::Cancelled` when the choice is required.
pub trait Selector {
    fn select_one(&self, prompt: &str, candidates: &[String]) -> Result<Option<String>>;
}
