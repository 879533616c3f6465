use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Create a repository on `main` with one commit
pub fn create_test_git_repo() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let repo_path = temp_dir.path().to_path_buf();

    let git_commands = [
        vec!["init", "-b", "main"],
        vec!["config", "user.name", "Test User"],
        vec!["config", "user.email", "test@example.com"],
        vec!["config", "core.autocrlf", "false"],
    ];
    for cmd_args in &git_commands {
        git(&repo_path, cmd_args);
    }

    std::fs::write(repo_path.join("README.md"), "# Test\n").unwrap();
    git(&repo_path, &["add", "."]);
    git(&repo_path, &["commit", "-m", "Initial commit"]);

    (temp_dir, repo_path)
}

/// Run git in `repo_path`, panicking on failure, and return trimmed stdout
pub fn git(repo_path: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Run the `gt` binary with an isolated config file
pub fn run_gt(repo_path: &Path, config_path: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gt"))
        .args(args)
        .arg("--no-color")
        .current_dir(repo_path)
        .env("GT_CONFIG", config_path)
        .env_remove("GITHUB_TOKEN")
        .env_remove("GT_GITHUB_TOKEN")
        .output()
        .unwrap()
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
