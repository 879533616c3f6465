use super::test_helpers::{create_test_git_repo, git, run_gt, stderr, stdout};

#[test]
fn test_create_log_and_navigate() {
    let (temp_dir, repo_path) = create_test_git_repo();
    let config = temp_dir.path().join("gt-config.json");

    let output = run_gt(&repo_path, &config, &["create", "feature-1"]);
    assert!(output.status.success(), "create failed: {}", stderr(&output));
    let output = run_gt(&repo_path, &config, &["create", "feature-2"]);
    assert!(output.status.success(), "create failed: {}", stderr(&output));

    assert_eq!(
        git(&repo_path, &["config", "--local", "--get", "gt.branch.feature-2.parent"]),
        "feature-1"
    );

    let output = run_gt(&repo_path, &config, &["log"]);
    assert!(output.status.success());
    let log = stdout(&output);
    assert!(log.contains("main"));
    assert!(log.contains("└─ feature-1"));
    assert!(log.contains("└─ feature-2 (current)"));

    let output = run_gt(&repo_path, &config, &["down"]);
    assert!(output.status.success(), "down failed: {}", stderr(&output));
    assert_eq!(git(&repo_path, &["branch", "--show-current"]), "feature-1");

    let output = run_gt(&repo_path, &config, &["up"]);
    assert!(output.status.success(), "up failed: {}", stderr(&output));
    assert_eq!(git(&repo_path, &["branch", "--show-current"]), "feature-2");
}

#[test]
fn test_down_from_untracked_branch_fails() {
    let (temp_dir, repo_path) = create_test_git_repo();
    let config = temp_dir.path().join("gt-config.json");

    let output = run_gt(&repo_path, &config, &["down"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("No parent available for 'main'"));
}

#[test]
fn test_delete_relinks_through_cli() {
    let (temp_dir, repo_path) = create_test_git_repo();
    let config = temp_dir.path().join("gt-config.json");

    assert!(run_gt(&repo_path, &config, &["create", "A"]).status.success());
    assert!(run_gt(&repo_path, &config, &["create", "B"]).status.success());
    git(&repo_path, &["checkout", "main"]);

    let output = run_gt(&repo_path, &config, &["delete", "A"]);
    assert!(output.status.success(), "delete failed: {}", stderr(&output));
    assert!(stdout(&output).contains("'B' now stacked on 'main'"));
    assert_eq!(
        git(&repo_path, &["config", "--local", "--get", "gt.branch.B.parent"]),
        "main"
    );
}

#[test]
fn test_track_untrack_and_invalid_names() {
    let (temp_dir, repo_path) = create_test_git_repo();
    let config = temp_dir.path().join("gt-config.json");
    git(&repo_path, &["branch", "side"]);

    let output = run_gt(&repo_path, &config, &["track", "main", "--branch", "side"]);
    assert!(output.status.success(), "track failed: {}", stderr(&output));

    let output = run_gt(&repo_path, &config, &["untrack", "side"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("no longer stacked on 'main'"));

    let output = run_gt(&repo_path, &config, &["create", "bad..name"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("bad..name"));
}

#[test]
fn test_config_roundtrip_uses_isolated_file() {
    let (temp_dir, repo_path) = create_test_git_repo();
    let config = temp_dir.path().join("gt-config.json");

    let output = run_gt(&repo_path, &config, &["config", "set", "stack.trunk", "develop"]);
    assert!(output.status.success(), "config set failed: {}", stderr(&output));
    assert!(config.exists());

    let output = run_gt(&repo_path, &config, &["config", "get", "stack.trunk"]);
    assert!(stdout(&output).contains("stack.trunk = develop"));

    let output = run_gt(&repo_path, &config, &["config", "set", "stack.nope", "x"]);
    assert!(!output.status.success());
}

#[test]
fn test_submit_without_token_fails_before_pushing() {
    let (temp_dir, repo_path) = create_test_git_repo();
    let config = temp_dir.path().join("gt-config.json");
    git(
        &repo_path,
        &["remote", "add", "origin", "git@github.com:acme/widgets.git"],
    );
    assert!(run_gt(&repo_path, &config, &["create", "feature"]).status.success());

    let output = run_gt(&repo_path, &config, &["submit"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("token"));
}

#[test]
fn test_version_prints_one_line() {
    let (temp_dir, repo_path) = create_test_git_repo();
    let config = temp_dir.path().join("gt-config.json");

    let output = run_gt(&repo_path, &config, &["version"]);

    assert!(output.status.success());
    let printed = stdout(&output);
    assert_eq!(printed.lines().count(), 1);
    assert!(printed.starts_with(&format!("gt {} (", env!("CARGO_PKG_VERSION"))));
}
