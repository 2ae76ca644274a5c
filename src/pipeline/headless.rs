use super::events::PipelineEvent;
use super::runner::EffectRunner;
use super::state::{Lifecycle, PipelineSession};
use crate::git::IgnoreMatcher;
use crate::log_info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadlessMode {
    /// Generate every message, then commit everything without asking
    CommitAll,
    /// Generate and stop at review
    DryRun,
}

/// Run the pipeline without a terminal UI.
///
/// The returned session is in `Complete`, `Error`, or `Review` for a dry run.
pub async fn run_headless(
    runner: &EffectRunner,
    matcher: &IgnoreMatcher,
    mode: HeadlessMode,
) -> PipelineSession {
    let mut session = PipelineSession::new();
    runner
        .drive(&mut session, matcher, PipelineEvent::Start)
        .await;

    if session.lifecycle != Lifecycle::Review {
        return session;
    }

    match mode {
        HeadlessMode::DryRun => {
            log_info!("Dry run: {} files reviewed, nothing committed", session.file_count());
        }
        HeadlessMode::CommitAll => {
            runner
                .drive(&mut session, matcher, PipelineEvent::Confirm)
                .await;
            log_info!("Committed {} files", session.committed_count());
        }
    }

    session
}
