//! Pure reducer for the commit review pipeline
//!
//! All state transitions happen here. No I/O and no async: the function takes
//! the session and one event, mutates the session and returns the effects the
//! runtime should execute next. At most one collaborator call is requested at
//! a time, which keeps generation and commits strictly sequential.

use std::time::Duration;

use super::events::{Effect, FileOutcome, PipelineEvent};
use super::state::{FileStatus, Lifecycle, PipelineSession};
use crate::git::IgnoreMatcher;

/// How long the completion screen stays up before the process exits
pub const COMPLETE_DISPLAY_DELAY: Duration = Duration::from_secs(2);

/// Reducer: (session, event) → effects
pub fn reduce(
    session: &mut PipelineSession,
    event: PipelineEvent,
    matcher: &IgnoreMatcher,
) -> Vec<Effect> {
    match event {
        // ─────────────────────────────────────────────────────────────────────
        // Collaborator results
        // ─────────────────────────────────────────────────────────────────────
        PipelineEvent::Start => {
            if session.lifecycle != Lifecycle::Loading || session.busy {
                return Vec::new();
            }
            session.busy = true;
            vec![Effect::LoadFiles]
        }

        PipelineEvent::FilesLoaded(files) => {
            if session.lifecycle != Lifecycle::Loading {
                return Vec::new();
            }
            session.busy = false;
            if files.is_empty() {
                session.lifecycle = Lifecycle::Complete;
                return vec![Effect::ExitAfter(COMPLETE_DISPLAY_DELAY)];
            }
            session.files = files;
            session.lifecycle = Lifecycle::Processing;
            process_next(session, matcher)
        }

        PipelineEvent::LoadFailed(cause) => {
            if session.lifecycle == Lifecycle::Loading {
                session.fail(cause);
            }
            Vec::new()
        }

        PipelineEvent::FileProcessed { path, outcome } => {
            if session.lifecycle != Lifecycle::Processing
                || session.current_file() != Some(path.as_str())
            {
                return Vec::new();
            }
            session.busy = false;
            record_outcome(session, path, outcome);
            session.generation_cursor += 1;
            process_next(session, matcher)
        }

        PipelineEvent::MessageRegenerated { path, outcome } => {
            if session.lifecycle == Lifecycle::Review {
                session.busy = false;
                record_outcome(session, path, outcome);
            }
            Vec::new()
        }

        PipelineEvent::CommitFinished { path, output } => {
            if session.lifecycle != Lifecycle::Review || !session.committing {
                return Vec::new();
            }
            session.busy = false;
            session.statuses.insert(path, FileStatus::Committed(output));
            session.commit_cursor += 1;
            commit_next(session)
        }

        PipelineEvent::CommitFailed { path: _, error } => {
            if session.lifecycle == Lifecycle::Review {
                session.fail(error);
            }
            Vec::new()
        }

        // ─────────────────────────────────────────────────────────────────────
        // User commands
        // ─────────────────────────────────────────────────────────────────────
        PipelineEvent::Confirm => {
            if session.lifecycle != Lifecycle::Review || session.busy {
                return Vec::new();
            }
            session.committing = true;
            commit_next(session)
        }

        PipelineEvent::Retry => {
            if session.lifecycle != Lifecycle::Review || session.busy {
                return Vec::new();
            }
            let Some(path) = session.selected_file().map(str::to_string) else {
                return Vec::new();
            };
            if !session.is_retryable(&path) {
                return Vec::new();
            }
            session.busy = true;
            vec![Effect::RegenerateMessage { path }]
        }

        PipelineEvent::Quit => vec![Effect::Exit],

        PipelineEvent::SelectNext => {
            if session.lifecycle == Lifecycle::Review {
                session.select_next();
            }
            Vec::new()
        }

        PipelineEvent::SelectPrev => {
            if session.lifecycle == Lifecycle::Review {
                session.select_prev();
            }
            Vec::new()
        }

        PipelineEvent::Tick => {
            session.tick = session.tick.wrapping_add(1);
            Vec::new()
        }
    }
}

fn record_outcome(session: &mut PipelineSession, path: String, outcome: FileOutcome) {
    match outcome {
        FileOutcome::Generated(message) => {
            session.messages.insert(path.clone(), message);
            session.statuses.insert(path, FileStatus::Generated);
        }
        FileOutcome::DiffFailed(cause) => {
            session.messages.remove(&path);
            session.statuses.insert(path, FileStatus::Failed(cause));
        }
    }
}

/// Advance past ignored files and request generation for the next real one,
/// or move to review when every file has been visited
fn process_next(session: &mut PipelineSession, matcher: &IgnoreMatcher) -> Vec<Effect> {
    while let Some(path) = session.current_file().map(str::to_string) {
        if matcher.is_ignored(&path) {
            session.statuses.insert(path, FileStatus::Ignored);
            session.generation_cursor += 1;
            continue;
        }
        session.busy = true;
        return vec![Effect::GenerateMessage { path }];
    }

    session.lifecycle = Lifecycle::Review;
    session.reset_selection();
    Vec::new()
}

/// Request the next commit, or finish when nothing committable is left
fn commit_next(session: &mut PipelineSession) -> Vec<Effect> {
    let next = session.next_commit_index().and_then(|index| {
        let path = session.files.get(index)?.clone();
        let message = session.messages.get(&path)?.clone();
        Some((index, path, message))
    });

    if let Some((index, path, message)) = next {
        session.commit_cursor = index;
        session.busy = true;
        return vec![Effect::Commit { path, message }];
    }

    session.commit_cursor = session.files.len();
    session.committing = false;
    session.lifecycle = Lifecycle::Complete;
    vec![Effect::ExitAfter(COMPLETE_DISPLAY_DELAY)]
}
