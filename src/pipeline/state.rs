//! Session state for the commit review pipeline

use std::collections::HashMap;
use std::fmt;

/// Where the pipeline is in its run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Loading,
    Processing,
    Review,
    Complete,
    Error,
}

static PENDING: FileStatus = FileStatus::Pending;

/// Last known outcome for a single staged file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Pending,
    Ignored,
    Generated,
    /// Diff could not be read; the file has no message
    Failed(String),
    /// Combined output of the commit command
    Committed(String),
}

impl FileStatus {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Ignored => write!(f, "Ignored"),
            Self::Generated => write!(f, "Commit message generated"),
            Self::Failed(cause) => write!(f, "Error: {cause}"),
            Self::Committed(output) => {
                let summary = output.lines().map(str::trim).find(|l| !l.is_empty());
                match summary {
                    Some(line) => write!(f, "Committed: {line}"),
                    None => write!(f, "Committed"),
                }
            }
        }
    }
}

/// Everything the controller knows about one run.
///
/// `files` is fixed once loaded. Cursors only move forward, except the review
/// selection which follows the user.
#[derive(Debug, Clone)]
pub struct PipelineSession {
    pub files: Vec<String>,
    pub messages: HashMap<String, String>,
    pub statuses: HashMap<String, FileStatus>,
    pub generation_cursor: usize,
    pub commit_cursor: usize,
    pub selected: usize,
    /// A collaborator call is outstanding
    pub busy: bool,
    /// Confirm was pressed and commits are running
    pub committing: bool,
    pub lifecycle: Lifecycle,
    pub last_error: Option<String>,
    /// Spinner frame counter, advanced on ticks
    pub tick: usize,
}

impl Default for PipelineSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineSession {
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            messages: HashMap::new(),
            statuses: HashMap::new(),
            generation_cursor: 0,
            commit_cursor: 0,
            selected: 0,
            busy: false,
            committing: false,
            lifecycle: Lifecycle::Loading,
            last_error: None,
            tick: 0,
        }
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn status(&self, path: &str) -> &FileStatus {
        self.statuses.get(path).unwrap_or(&PENDING)
    }

    pub fn message(&self, path: &str) -> Option<&str> {
        self.messages.get(path).map(String::as_str)
    }

    /// File under the generation cursor while processing
    pub fn current_file(&self) -> Option<&str> {
        self.files.get(self.generation_cursor).map(String::as_str)
    }

    pub fn selected_file(&self) -> Option<&str> {
        self.files.get(self.selected).map(String::as_str)
    }

    /// Fraction of files processed, 0.0 to 1.0
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    pub fn progress(&self) -> f64 {
        if self.files.is_empty() {
            return 1.0;
        }
        self.generation_cursor as f64 / self.files.len() as f64
    }

    /// A file takes part in commits only when it has a message and was
    /// neither ignored nor already committed
    pub fn is_committable(&self, path: &str) -> bool {
        self.messages.contains_key(path)
            && matches!(self.status(path), FileStatus::Generated)
    }

    /// Retry only makes sense for files that were generated or failed
    pub fn is_retryable(&self, path: &str) -> bool {
        matches!(
            self.status(path),
            FileStatus::Generated | FileStatus::Failed(_)
        )
    }

    pub fn committed_count(&self) -> usize {
        self.statuses
            .values()
            .filter(|s| matches!(s, FileStatus::Committed(_)))
            .count()
    }

    /// First file index at or after the commit cursor that should be committed
    pub fn next_commit_index(&self) -> Option<usize> {
        (self.commit_cursor..self.files.len()).find(|&i| {
            self.files
                .get(i)
                .is_some_and(|path| self.is_committable(path))
        })
    }

    /// Put the review selection on the first file that can still be retried
    pub fn reset_selection(&mut self) {
        self.selected = self
            .files
            .iter()
            .position(|path| self.is_retryable(path))
            .unwrap_or(0);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.files.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn fail(&mut self, cause: impl Into<String>) {
        self.last_error = Some(cause.into());
        self.lifecycle = Lifecycle::Error;
        self.busy = false;
        self.committing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        assert_eq!(FileStatus::Ignored.to_string(), "Ignored");
        assert_eq!(
            FileStatus::Generated.to_string(),
            "Commit message generated"
        );
        assert_eq!(
            FileStatus::Failed("bad path".to_string()).to_string(),
            "Error: bad path"
        );
        assert_eq!(
            FileStatus::Committed("\n[main 1a2b3c] feat: x\n 1 file changed".to_string())
                .to_string(),
            "Committed: [main 1a2b3c] feat: x"
        );
        assert_eq!(FileStatus::Committed(String::new()).to_string(), "Committed");
    }

    #[test]
    fn test_progress() {
        let mut session = PipelineSession::new();
        assert!((session.progress() - 1.0).abs() < f64::EPSILON);
        session.files = vec!["a".into(), "b".into(), "c".into(), "d".into()];
        session.generation_cursor = 1;
        assert!((session.progress() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut session = PipelineSession::new();
        session.files = vec!["a".into(), "b".into()];
        session.select_prev();
        assert_eq!(session.selected, 0);
        session.select_next();
        session.select_next();
        assert_eq!(session.selected, 1);
    }

    #[test]
    fn test_reset_selection_skips_ignored() {
        let mut session = PipelineSession::new();
        session.files = vec!["logo.png".into(), "a.txt".into()];
        session.statuses.insert("logo.png".into(), FileStatus::Ignored);
        session.statuses.insert("a.txt".into(), FileStatus::Generated);
        session.reset_selection();
        assert_eq!(session.selected_file(), Some("a.txt"));
    }
}
