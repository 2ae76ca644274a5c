pub mod message;
pub mod prompt;

pub use message::{
    EMOJI_PALETTE, decorate_with_emoji, ensure_prefix, fallback_message, has_allowed_prefix,
    process_commit_message, truncate_message,
};
pub use prompt::create_commit_prompt;

use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;

use crate::config::Settings;
use crate::llm_providers::LLMProvider;
use crate::{log_debug, log_warn};

/// Produces one finished commit subject per diff.
///
/// Provider failures never escape: they are logged and the fallback message is
/// used instead. The RNG drives prefix and emoji selection and is only locked
/// while post-processing.
pub struct CommitMessageGenerator {
    provider: Arc<dyn LLMProvider>,
    settings: Settings,
    use_emoji: bool,
    rng: Mutex<StdRng>,
}

impl CommitMessageGenerator {
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        settings: Settings,
        use_emoji: bool,
        rng: StdRng,
    ) -> Self {
        Self {
            provider,
            settings,
            use_emoji,
            rng: Mutex::new(rng),
        }
    }

    /// Generator seeded from the OS
    pub fn from_entropy(provider: Arc<dyn LLMProvider>, settings: Settings, use_emoji: bool) -> Self {
        Self::new(provider, settings, use_emoji, StdRng::from_os_rng())
    }

    pub async fn generate(&self, path: &str, diff: &str) -> String {
        let prompt = create_commit_prompt(diff);
        let raw = match self.provider.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                log_warn!(
                    "{} generation for {} failed, using fallback: {}",
                    self.provider.name(),
                    path,
                    e
                );
                String::new()
            }
        };

        let mut rng = self.rng.lock();
        let message =
            process_commit_message(&raw, path, &self.settings, self.use_emoji, &mut *rng);
        log_debug!("Message for {}: {}", path, message);
        message
    }
}
