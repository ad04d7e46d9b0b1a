//! Integration tests for the gwa binary.
//!
//! These tests run the CLI against temporary directories and verify
//! exit status, output, and the audit trail it leaves behind.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// =============================================================================
// Test Fixtures
// =============================================================================

/// Get a command for running gwa in `dir`.
fn gwa(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gwa").unwrap();
    cmd.arg("--cwd").arg(dir).env("USER", "tester").env_remove("RUST_LOG");
    cmd
}

/// Test fixture: a directory with a `.git` and an optional policy file.
struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        fs::create_dir(dir.path().join(".git")).expect("failed to create .git");
        Self { dir }
    }

    fn with_config(contents: &str) -> Self {
        let repo = Self::new();
        fs::write(repo.path().join(".gwa.toml"), contents).expect("failed to write config");
        repo
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn audit_lines(&self) -> Vec<serde_json::Value> {
        let path = self.path().join(".git/gwa/audit.jsonl");
        fs::read_to_string(path)
            .unwrap_or_default()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }
}

const PREFIX_POLICY: &str = r#"
[branch]
prefix_required = true
allowed_prefixes = ["feature", "bugfix"]
"#;

// =============================================================================
// check branch
// =============================================================================

#[test]
fn branch_with_allowed_prefix_passes() {
    let repo = TestRepo::with_config(PREFIX_POLICY);

    gwa(repo.path())
        .args(["check", "branch", "feature/x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("satisfies policy"));

    let lines = repo.audit_lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["command"], "check-branch");
    assert_eq!(lines[0]["status"], "success");
    assert_eq!(lines[0]["user"], "tester");
    assert_eq!(lines[0]["details"]["branch"], "feature/x");
    assert!(lines[0].get("error").is_none());
}

#[test]
fn branch_without_prefix_rejected() {
    let repo = TestRepo::with_config(PREFIX_POLICY);

    gwa(repo.path())
        .args(["check", "branch", "x"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Branch name must start with one of: feature, bugfix",
        ));

    let lines = repo.audit_lines();
    assert_eq!(lines[0]["status"], "failure");
    assert_eq!(lines[0]["details"]["rule"], "missing_prefix");
    assert!(lines[0]["error"]
        .as_str()
        .unwrap()
        .contains("must start with one of"));
}

#[test]
fn protected_branch_rejected_with_defaults() {
    let repo = TestRepo::new();

    gwa(repo.path())
        .args(["check", "branch", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("protected name: master"));
}

#[test]
fn dry_run_recorded() {
    let repo = TestRepo::with_config(PREFIX_POLICY);

    gwa(repo.path())
        .args(["--dry-run", "check", "branch", "nope"])
        .assert()
        .failure();

    let lines = repo.audit_lines();
    assert_eq!(lines[0]["status"], "dry_run");
    assert!(lines[0].get("error").is_none());
    assert_eq!(lines[0]["details"]["rule"], "missing_prefix");
}

#[test]
fn outside_git_repo_no_audit() {
    let dir = TempDir::new().unwrap();

    gwa(dir.path())
        .args(["check", "branch", "anything"])
        .assert()
        .success();

    assert!(!dir.path().join(".git").exists());
}

#[test]
fn linked_worktree_is_audited() {
    let temp = TempDir::new().unwrap();
    let main_git = temp.path().join("repo/.git");
    let wt_git = main_git.join("worktrees/wt");
    fs::create_dir_all(&wt_git).unwrap();
    fs::write(wt_git.join("commondir"), "../..\n").unwrap();
    let wt = temp.path().join("wt");
    fs::create_dir(&wt).unwrap();
    fs::write(wt.join(".git"), format!("gitdir: {}\n", wt_git.display())).unwrap();

    gwa(&wt)
        .args(["check", "branch", "main"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("protected name: main"));

    assert!(wt.join(".git").is_file());
    let raw = fs::read_to_string(main_git.join("gwa/audit.jsonl")).unwrap();
    let entry: serde_json::Value = serde_json::from_str(raw.trim_end()).unwrap();
    assert_eq!(entry["status"], "failure");
    assert_eq!(entry["details"]["rule"], "protected_branch");

    gwa(&wt)
        .args(["history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("protected name: main"));
}

// =============================================================================
// check commit
// =============================================================================

#[test]
fn conventional_commit_passes() {
    let repo = TestRepo::new();

    gwa(repo.path())
        .args(["check", "commit", "feat: add x"])
        .assert()
        .success();
}

#[test]
fn free_text_commit_rejected() {
    let repo = TestRepo::new();

    gwa(repo.path())
        .args(["check", "commit", "Added x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("conventional commits format"));
}

#[test]
fn scope_required_from_config() {
    let repo = TestRepo::with_config("[commit]\nrequire_scope = true\n");

    gwa(repo.path())
        .args(["check", "commit", "feat: add x"])
        .assert()
        .failure();
    gwa(repo.path())
        .args(["check", "commit", "feat(core): add x"])
        .assert()
        .success();
}

#[test]
fn commit_message_from_file() {
    let repo = TestRepo::new();
    let msg = repo.path().join("COMMIT_EDITMSG");
    fs::write(&msg, "fix(cli): handle empty input\n\nLonger body text.\n").unwrap();

    gwa(repo.path())
        .args(["check", "commit", "--file"])
        .arg(&msg)
        .assert()
        .success();

    let lines = repo.audit_lines();
    assert_eq!(lines[0]["command"], "check-commit");
    assert_eq!(lines[0]["details"]["subject"], "fix(cli): handle empty input");
}

#[test]
fn explicit_config_path() {
    let repo = TestRepo::new();
    let config = repo.path().join("strict.toml");
    fs::write(&config, "[commit]\nmax_subject_length = 10\n").unwrap();

    gwa(repo.path())
        .args(["check", "commit", "feat: a long subject"])
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds 10 characters"));
}

#[test]
fn missing_explicit_config_warns() {
    let repo = TestRepo::new();

    gwa(repo.path())
        .args(["check", "branch", "feature/x", "--config", "nope.toml"])
        .assert()
        .success()
        .stderr(predicate::str::contains("warning: Config file nope.toml not found"));

    gwa(repo.path())
        .args(["check", "branch", "feature/x"])
        .assert()
        .success()
        .stderr(predicate::str::contains("not found").not());
}

// =============================================================================
// config errors
// =============================================================================

#[test]
fn malformed_config_is_an_error() {
    let repo = TestRepo::with_config("[branch\n");

    gwa(repo.path())
        .args(["check", "branch", "feature/x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("failed to parse config file"));
}

#[test]
fn short_subject_limit_is_an_error() {
    let repo = TestRepo::with_config("[commit]\nmax_subject_length = 5\n");

    gwa(repo.path())
        .args(["config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_subject_length"));
}

// =============================================================================
// history / config / completion
// =============================================================================

#[test]
fn history_lists_entries_oldest_first() {
    let repo = TestRepo::new();
    for name in ["feature/a", "main", "feature/b", "feature/c"] {
        let _ = gwa(repo.path()).args(["check", "branch", name]).output().unwrap();
    }

    let output = gwa(repo.path())
        .args(["history", "--limit", "2", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let entries: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["details"]["branch"], "feature/b");
    assert_eq!(entries[1]["details"]["branch"], "feature/c");
}

#[test]
fn history_text_shows_failures() {
    let repo = TestRepo::new();
    let _ = gwa(repo.path()).args(["check", "branch", "main"]).output().unwrap();

    gwa(repo.path())
        .args(["history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("failure"))
        .stdout(predicate::str::contains("protected name: main"));
}

#[test]
fn history_empty() {
    let repo = TestRepo::new();

    gwa(repo.path())
        .args(["history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No audit entries recorded"));
}

#[test]
fn config_prints_effective_values() {
    let repo = TestRepo::with_config("[branch]\nmain_branch = \"develop\"\n");

    gwa(repo.path())
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("main_branch = \"develop\""))
        .stdout(predicate::str::contains("max_subject_length = 72"));
}

#[test]
fn config_defaults() {
    let repo = TestRepo::with_config("[branch]\nmain_branch = \"develop\"\n");

    gwa(repo.path())
        .args(["config", "--defaults"])
        .assert()
        .success()
        .stdout(predicate::str::contains("main_branch = \"main\""));
}

#[test]
fn completion_generates_script() {
    let dir = TempDir::new().unwrap();

    gwa(dir.path())
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gwa"));
}

#[test]
fn version_flag_works() {
    Command::cargo_bin("gwa")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gwa"));
}
