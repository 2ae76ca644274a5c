//! Events in, effects out
//!
//! Events are everything that can change a [`PipelineSession`](super::PipelineSession):
//! user commands, timer ticks and results of collaborator calls. Effects are
//! the collaborator calls the reducer asks the runtime to make.

use std::time::Duration;

/// Result of reading a diff and generating a message for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Generated(String),
    DiffFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    /// Kick off the run
    Start,
    FilesLoaded(Vec<String>),
    LoadFailed(String),
    FileProcessed {
        path: String,
        outcome: FileOutcome,
    },
    MessageRegenerated {
        path: String,
        outcome: FileOutcome,
    },
    CommitFinished {
        path: String,
        output: String,
    },
    CommitFailed {
        path: String,
        error: String,
    },

    // User commands
    Confirm,
    Retry,
    Quit,
    SelectNext,
    SelectPrev,

    /// Animation timer
    Tick,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadFiles,
    GenerateMessage { path: String },
    RegenerateMessage { path: String },
    Commit { path: String, message: String },
    /// Leave after showing the current screen for a while
    ExitAfter(Duration),
    Exit,
}
