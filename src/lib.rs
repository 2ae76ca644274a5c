//! Luna - AI commit messages, one file at a time
//!
//! Lists the staged files, asks a text-generation provider for a short subject
//! per file, lets the user review the results and then commits each file on
//! its own.

#![allow(clippy::uninlined_format_args)] // Style preference
#![allow(clippy::format_push_string)] // Performance improvement but stylistic
#![allow(clippy::return_self_not_must_use)] // Builder pattern is clear enough
#![allow(clippy::items_after_statements)] // Locally-scoped use statements are fine

pub mod cli;
pub mod commands;
pub mod commit;
pub mod config;
pub mod git;
pub mod llm_providers;
pub mod logger;
pub mod pipeline;
pub mod tui;
pub mod ui;

pub use commit::CommitMessageGenerator;
pub use config::Settings;
pub use git::{GitCli, GitError, IgnoreMatcher, Vcs};
pub use llm_providers::{GeminiProvider, LLMProvider, ProviderError};
pub use pipeline::{PipelineSession, reduce};
