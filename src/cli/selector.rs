use crate::errors::{Result, StackError};
use crate::stack::Selector;
use dialoguer::{theme::ColorfulTheme, Select};

/// Terminal menu backed by `dialoguer`; Esc or `q` cancels
pub struct DialoguerSelector;

impl Selector for DialoguerSelector {
    fn select_one(&self, prompt: &str, candidates: &[String]) -> Result<Option<String>> {
        if candidates.is_empty() {
            return Ok(None);
        }
        if !console::user_attended() {
            return Err(StackError::validation(format!(
                "{prompt}: an interactive terminal is required to choose between {}",
                candidates.join(", ")
            )));
        }

        let index = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(candidates)
            .default(0)
            .interact_opt()
            .map_err(|e| StackError::validation(format!("Prompt failed: {e}")))?;

        Ok(index.map(|i| candidates[i].clone()))
    }
}
