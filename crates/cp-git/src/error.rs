use std::fmt;
use std::io;

#[derive(Debug)]
pub enum GitError {
    /// No repository at or above the working directory
    RepoNotFound,
    /// The staged diff is empty
    NoStagedChanges,
    /// git ran but failed; carries its stderr
    Command(String),
    /// git could not be spawned or timed out
    Io(io::Error),
}

impl fmt::Display for GitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitError::RepoNotFound => write!(f, "repository not found"),
            GitError::NoStagedChanges => write!(f, "no staged files"),
            GitError::Command(msg) => write!(f, "git: {}", msg),
            GitError::Io(e) => write!(f, "git: {}", e),
        }
    }
}

impl std::error::Error for GitError {}

impl From<io::Error> for GitError {
    fn from(e: io::Error) -> Self {
        GitError::Io(e)
    }
}
