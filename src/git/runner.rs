use crate::errors::{Result, StackError};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, trace};

/// Synchronous access to the `git` executable.
///
/// Every stack operation that changes the working tree or the local config
/// goes through this trait so tests can substitute a scripted fake.
pub trait Runner {
    /// Run `git <args>` and return its trimmed stdout
    fn git_output(&self, args: &[&str]) -> Result<String>;

    /// Run `git <args>`, discarding stdout
    fn git(&self, args: &[&str]) -> Result<()> {
        self.git_output(args).map(|_| ())
    }
}

impl<T: Runner + ?Sized> Runner for &T {
    fn git_output(&self, args: &[&str]) -> Result<String> {
        (**self).git_output(args)
    }
}

/// Runs `git` as a subprocess inside a repository's working directory
#[derive(Debug, Clone)]
pub struct GitRunner {
    workdir: PathBuf,
}

impl GitRunner {
    pub fn new(workdir: &Path) -> Self {
        Self {
            workdir: workdir.to_path_buf(),
        }
    }
}

impl Runner for GitRunner {
    fn git_output(&self, args: &[&str]) -> Result<String> {
        let command = args.join(" ");
        debug!("git {}", command);

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|e| StackError::config(format!("Failed to run git: {e}")))?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if output.status.success() {
            trace!("git {} -> {}", command, stdout);
            return Ok(stdout);
        }

        // Rebase reports conflicts on stdout, so fall back to it when stderr is empty
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let message = if stderr.is_empty() { stdout } else { stderr };

        Err(StackError::Command {
            command,
            code: output.status.code(),
            stderr: message,
        })
    }
}
