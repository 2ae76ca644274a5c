mod app;
mod render;
mod spinner;
mod theme;

pub use app::{ExitResult, ReviewApp, key_to_event};
pub use render::{REVIEW_HELP, draw};
pub use theme::Theme;

use anyhow::Result;

use crate::git::IgnoreMatcher;
use crate::pipeline::EffectRunner;

/// Run the interactive review on the current runtime
pub fn run_review(runner: EffectRunner, matcher: IgnoreMatcher) -> Result<ExitResult> {
    let mut app = ReviewApp::new(runner, matcher);
    tokio::task::block_in_place(|| app.run())
}
