// Git collaborator: the `git` binary driven as a subprocess

mod cli;
mod utils;

pub use cli::GitCli;
pub use utils::*;

/// Failures from the version-control collaborator
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GitError {
    /// Staged files could not be enumerated (fatal for a run)
    #[error("error running git diff --cached: {0}")]
    List(String),
    /// One file's diff could not be read (recorded against that file only)
    #[error("error getting diff for {path}: {detail}")]
    Diff { path: String, detail: String },
    /// `git commit` failed; `output` is what git printed
    #[error("error committing {path}: {detail}")]
    Commit {
        path: String,
        detail: String,
        output: String,
    },
}

/// The three operations the commit pipeline needs from version control.
///
/// Calls block; async callers should hop onto a blocking thread.
pub trait Vcs: Send + Sync {
    /// Staged paths, in the order git reports them
    fn list_staged_files(&self) -> Result<Vec<String>, GitError>;

    /// Staged diff of a single path
    fn diff(&self, path: &str) -> Result<String, GitError>;

    /// Commit only `path` with `message`, returning git's combined output
    fn commit(&self, path: &str, message: &str) -> Result<String, GitError>;
}
