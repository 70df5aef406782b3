//! Thin wrapper around the `git` CLI: repository discovery, staged diff,
//! commit, and the porcelain status listing shown when nothing is staged.

mod error;
mod status;

pub use error::GitError;
pub use status::{GitFiles, parse_porcelain};

use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use std::time::Duration;

// The 50/72 rule for commit messages: subject line and body wrap widths.
pub const COMMIT_SUBJECT_CHARS: usize = 50;
pub const COMMIT_BODY_CHARS: usize = 72;

const GIT_CMD_TIMEOUT_SECS: u64 = 30;

/// A discovered repository. All commands run from its top-level directory.
pub struct Repo {
    dir: PathBuf,
}

impl Repo {
    /// Locate the repository containing the current working directory.
    pub fn discover() -> Result<Self, GitError> {
        let output = run_git(None, &["rev-parse", "--show-toplevel"])?;
        if !output.status.success() {
            return Err(GitError::RepoNotFound);
        }
        let dir = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Self { dir: PathBuf::from(dir) })
    }

    /// Open a repository rooted at an explicit directory.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Diff all staged files, or only the given paths.
    pub fn diff_staged(&self, files: &[String]) -> Result<Vec<u8>, GitError> {
        let mut args: Vec<&str> = vec!["diff", "--staged", "HEAD"];
        args.extend(files.iter().map(String::as_str));

        let output = run_git(Some(&self.dir), &args)?;
        if !output.status.success() {
            return Err(GitError::Command(stderr_text(&output)));
        }
        if output.stdout.is_empty() {
            return Err(GitError::NoStagedChanges);
        }
        Ok(output.stdout)
    }

    /// Commit the staged changes with the given message.
    pub fn commit(&self, message: &str) -> Result<(), GitError> {
        let output = run_git(Some(&self.dir), &["commit", "-m", message])?;
        if !output.status.success() {
            return Err(GitError::Command(stderr_text(&output)));
        }
        Ok(())
    }

    /// Working-tree files by staging state, for the "nothing staged" listing.
    pub fn status_files(&self) -> Result<GitFiles, GitError> {
        let output = run_git(Some(&self.dir), &["status", "--porcelain"])?;
        if !output.status.success() {
            return Err(GitError::Command(stderr_text(&output)));
        }
        Ok(parse_porcelain(&String::from_utf8_lossy(&output.stdout)))
    }
}

fn stderr_text(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.is_empty() {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    } else {
        stderr
    }
}

fn run_git(dir: Option<&std::path::Path>, args: &[&str]) -> Result<Output, GitError> {
    let mut cmd = Command::new("git");
    cmd.args(args).env("GIT_TERMINAL_PROMPT", "0");
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }
    Ok(run_with_timeout(cmd, GIT_CMD_TIMEOUT_SECS)?)
}

/// Run a command, killing the wait after `timeout_secs`.
fn run_with_timeout(mut cmd: Command, timeout_secs: u64) -> std::io::Result<Output> {
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped()).stdin(Stdio::null());
    let child = cmd.spawn()?;
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let _ = tx.send(child.wait_with_output());
    });
    match rx.recv_timeout(Duration::from_secs(timeout_secs)) {
        Ok(result) => result,
        Err(_) => Err(std::io::Error::new(
            std::io::ErrorKind::TimedOut,
            format!("Command timed out after {}s", timeout_secs),
        )),
    }
}
