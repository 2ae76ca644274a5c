use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use super::{GitError, Vcs};
use crate::log_debug;

/// [`Vcs`] backed by the `git` executable
#[derive(Debug, Clone, Default)]
pub struct GitCli {
    workdir: Option<PathBuf>,
}

impl GitCli {
    /// Operate on the repository containing the current directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Operate on the repository containing `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            workdir: Some(dir.as_ref().to_path_buf()),
        }
    }

    fn git(&self, args: &[&str]) -> std::io::Result<Output> {
        let mut command = Command::new("git");
        command.args(args);
        if let Some(dir) = &self.workdir {
            command.current_dir(dir);
        }
        command.output()
    }
}

/// stderr if git wrote any, otherwise the exit status
fn failure_detail(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.is_empty() {
        output.status.to_string()
    } else {
        stderr
    }
}

/// Split `git diff --name-only` output into paths, keeping git's order
pub fn parse_name_only(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

impl Vcs for GitCli {
    fn list_staged_files(&self) -> Result<Vec<String>, GitError> {
        log_debug!("Listing staged files");
        let output = self
            .git(&["diff", "--cached", "--name-only"])
            .map_err(|e| GitError::List(e.to_string()))?;

        if !output.status.success() {
            return Err(GitError::List(failure_detail(&output)));
        }

        let files = parse_name_only(&String::from_utf8_lossy(&output.stdout));
        log_debug!("Found {} staged files", files.len());
        Ok(files)
    }

    fn diff(&self, path: &str) -> Result<String, GitError> {
        log_debug!("Getting diff for file: {}", path);
        let output = self
            .git(&["diff", "--cached", "--", path])
            .map_err(|e| GitError::Diff {
                path: path.to_string(),
                detail: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(GitError::Diff {
                path: path.to_string(),
                detail: failure_detail(&output),
            });
        }

        let diff = String::from_utf8_lossy(&output.stdout).into_owned();
        log_debug!("Generated diff for {} ({} bytes)", path, diff.len());
        Ok(diff)
    }

    fn commit(&self, path: &str, message: &str) -> Result<String, GitError> {
        log_debug!("Committing {} with message: {}", path, message);
        let output = self
            .git(&["commit", "-m", message, "--", path])
            .map_err(|e| GitError::Commit {
                path: path.to_string(),
                detail: e.to_string(),
                output: String::new(),
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if output.status.success() {
            Ok(combined)
        } else {
            Err(GitError::Commit {
                path: path.to_string(),
                detail: failure_detail(&output),
                output: combined,
            })
        }
    }
}
