use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use super::events::{Effect, FileOutcome, PipelineEvent};
use super::reducer::reduce;
use super::state::PipelineSession;
use crate::commit::CommitMessageGenerator;
use crate::git::{GitError, IgnoreMatcher, Vcs};
use crate::{log_debug, log_error};

/// How a driven run asked to stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitRequest {
    Now,
    After(Duration),
}

/// Executes effects against the real collaborators and turns each result
/// back into an event. Cheap to clone, so the TUI can hand a copy to every
/// spawned task.
#[derive(Clone)]
pub struct EffectRunner {
    vcs: Arc<dyn Vcs>,
    generator: Arc<CommitMessageGenerator>,
}

impl EffectRunner {
    pub fn new(vcs: Arc<dyn Vcs>, generator: Arc<CommitMessageGenerator>) -> Self {
        Self { vcs, generator }
    }

    /// Run one effect. Exit effects produce no event.
    pub async fn execute(&self, effect: Effect) -> Option<PipelineEvent> {
        match effect {
            Effect::LoadFiles => {
                let vcs = Arc::clone(&self.vcs);
                let event = match run_git(move || vcs.list_staged_files()).await {
                    Ok(files) => {
                        log_debug!("Loaded {} staged files", files.len());
                        PipelineEvent::FilesLoaded(files)
                    }
                    Err(e) => {
                        log_error!("Listing staged files failed: {}", e);
                        PipelineEvent::LoadFailed(e)
                    }
                };
                Some(event)
            }
            Effect::GenerateMessage { path } => {
                let outcome = self.generate_for(&path).await;
                Some(PipelineEvent::FileProcessed { path, outcome })
            }
            Effect::RegenerateMessage { path } => {
                let outcome = self.generate_for(&path).await;
                Some(PipelineEvent::MessageRegenerated { path, outcome })
            }
            Effect::Commit { path, message } => {
                let vcs = Arc::clone(&self.vcs);
                let target = path.clone();
                let event = match run_git(move || vcs.commit(&target, &message)).await {
                    Ok(output) => PipelineEvent::CommitFinished { path, output },
                    Err(error) => {
                        log_error!("Commit of {} failed: {}", path, error);
                        PipelineEvent::CommitFailed { path, error }
                    }
                };
                Some(event)
            }
            Effect::ExitAfter(_) | Effect::Exit => None,
        }
    }

    async fn generate_for(&self, path: &str) -> FileOutcome {
        let vcs = Arc::clone(&self.vcs);
        let target = path.to_string();
        match run_git(move || vcs.diff(&target)).await {
            Ok(diff) => FileOutcome::Generated(self.generator.generate(path, &diff).await),
            Err(e) => {
                log_error!("Diff of {} failed: {}", path, e);
                FileOutcome::DiffFailed(e)
            }
        }
    }

    /// Feed `event` through the reducer and execute the resulting effects
    /// until the pipeline settles or asks to exit.
    ///
    /// Used by the non-interactive paths; the TUI executes effects itself so
    /// it can keep drawing while calls are outstanding.
    pub async fn drive(
        &self,
        session: &mut PipelineSession,
        matcher: &IgnoreMatcher,
        event: PipelineEvent,
    ) -> Option<ExitRequest> {
        let mut queue = VecDeque::from([event]);

        while let Some(event) = queue.pop_front() {
            for effect in reduce(session, event, matcher) {
                match effect {
                    Effect::Exit => return Some(ExitRequest::Now),
                    Effect::ExitAfter(delay) => return Some(ExitRequest::After(delay)),
                    other => {
                        if let Some(next) = self.execute(other).await {
                            queue.push_back(next);
                        }
                    }
                }
            }
        }

        None
    }
}

/// Run a blocking git call off the async workers, flattening the error to
/// the text shown to the user
async fn run_git<T, F>(call: F) -> Result<T, String>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, GitError> + Send + 'static,
{
    match tokio::task::spawn_blocking(call).await {
        Ok(result) => result.map_err(|e| e.to_string()),
        Err(join_error) => Err(format!("git task failed: {join_error}")),
    }
}
