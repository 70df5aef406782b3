//! Integration tests against real throwaway repositories. Skipped when the
//! `git` binary is not on PATH.

use std::fs;
use std::process::Command;

use cp_git::{GitError, Repo};

fn git_available() -> bool {
    Command::new("git").arg("--version").output().map(|o| o.status.success()).unwrap_or(false)
}

fn git(dir: &std::path::Path, args: &[&str]) {
    let status = Command::new("git").args(args).current_dir(dir).status().expect("run git");
    assert!(status.success(), "git {:?} failed", args);
}

fn init_repo(dir: &std::path::Path) {
    git(dir, &["init", "--initial-branch=main"]);
    git(dir, &["config", "user.email", "dev@example.com"]);
    git(dir, &["config", "user.name", "Dev"]);
    fs::write(dir.join("README.md"), "hello\n").unwrap();
    git(dir, &["add", "README.md"]);
    git(dir, &["commit", "-m", "init"]);
}

#[test]
fn staged_diff_then_commit() {
    if !git_available() {
        return;
    }
    let tmp = tempfile::tempdir().unwrap();
    init_repo(tmp.path());
    let repo = Repo::open(tmp.path());

    fs::write(tmp.path().join("README.md"), "hello\nworld\n").unwrap();
    git(tmp.path(), &["add", "README.md"]);

    let diff = repo.diff_staged(&[]).expect("staged diff");
    let diff_text = String::from_utf8_lossy(&diff);
    assert!(diff_text.contains("+world"), "diff should contain the new line: {diff_text}");

    repo.commit("Add world line").expect("commit");

    // Everything is committed now, so the staged diff is empty again.
    match repo.diff_staged(&[]) {
        Err(GitError::NoStagedChanges) => {}
        other => panic!("expected NoStagedChanges, got {other:?}"),
    }
}

#[test]
fn status_files_reports_untracked() {
    if !git_available() {
        return;
    }
    let tmp = tempfile::tempdir().unwrap();
    init_repo(tmp.path());
    let repo = Repo::open(tmp.path());

    fs::write(tmp.path().join("notes.txt"), "scratch\n").unwrap();
    fs::write(tmp.path().join("README.md"), "changed\n").unwrap();

    let files = repo.status_files().expect("status");
    assert!(files.untracked.contains(&"notes.txt".to_string()));
    assert!(files.tracked.contains(&"README.md".to_string()));
}

#[test]
fn commit_failure_carries_git_output() {
    if !git_available() {
        return;
    }
    let tmp = tempfile::tempdir().unwrap();
    init_repo(tmp.path());
    let repo = Repo::open(tmp.path());

    // Nothing staged: git commit exits non-zero.
    match repo.commit("empty") {
        Err(GitError::Command(msg)) => assert!(!msg.is_empty()),
        other => panic!("expected command error, got {other:?}"),
    }
}
