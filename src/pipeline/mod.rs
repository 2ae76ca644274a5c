//! Commit review pipeline
//!
//! Load staged files, generate one message per file, review, then commit each
//! file on its own. The flow is an explicit state machine:
//!
//! ```text
//! Loading ──▶ Processing ──▶ Review ──▶ Complete
//!    │                          │
//!    └──────────▶ Error ◀───────┘
//! ```
//!
//! - `state`: the session owned by the controller
//! - `events`: what can happen, and what the runtime should do about it
//! - `reducer`: the pure transition function
//! - `runner`: executes effects against git and the text-generation provider
//! - `headless`: drives a whole run without a terminal

mod events;
mod headless;
mod reducer;
mod runner;
mod state;


pub use events::{Effect, FileOutcome, PipelineEvent};
pub use headless::{HeadlessMode, run_headless};
pub use reducer::{COMPLETE_DISPLAY_DELAY, reduce};
pub use runner::{EffectRunner, ExitRequest};
pub use state::{FileStatus, Lifecycle, PipelineSession};
