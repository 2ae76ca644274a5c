use rand::Rng;
use rand::seq::IndexedRandom;

use crate::config::Settings;

/// Symbols used when a message is decorated with an emoji
pub const EMOJI_PALETTE: [&str; 10] = [
    "✨", "🛠️", "🐛", "🔥", "📝", "🚀", "🔧", "🎨", "🔒", "💄",
];

const ELLIPSIS: &str = "...";

/// Message used when the provider produced nothing
pub fn fallback_message(path: &str) -> String {
    format!("update {path}")
}

/// Case-insensitive check against the configured prefixes
pub fn has_allowed_prefix(message: &str, prefixes: &[String]) -> bool {
    let lowered = message.to_lowercase();
    prefixes
        .iter()
        .any(|prefix| lowered.starts_with(&prefix.to_lowercase()))
}

/// Prepend a random configured prefix unless one is already present
pub fn ensure_prefix<R: Rng + ?Sized>(message: String, prefixes: &[String], rng: &mut R) -> String {
    if has_allowed_prefix(&message, prefixes) {
        return message;
    }
    match prefixes.choose(rng) {
        Some(prefix) => format!("{prefix} {message}"),
        None => message,
    }
}

pub fn decorate_with_emoji<R: Rng + ?Sized>(message: &str, rng: &mut R) -> String {
    match EMOJI_PALETTE.choose(rng) {
        Some(emoji) => format!("{emoji} {message}"),
        None => message.to_string(),
    }
}

/// Cut `message` to `max_len` characters, ending in `...` when shortened.
///
/// Counts `char`s, so multi-byte symbols are never split.
pub fn truncate_message(message: &str, max_len: usize) -> String {
    if message.chars().count() <= max_len {
        return message.to_string();
    }
    let keep = max_len.saturating_sub(ELLIPSIS.len());
    let mut truncated: String = message.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Turn a raw completion into the final commit subject.
///
/// Empty completions fall back to `update <path>`; then the prefix rule,
/// optional emoji and length limit are applied in that order.
pub fn process_commit_message<R: Rng + ?Sized>(
    raw: &str,
    path: &str,
    settings: &Settings,
    use_emoji: bool,
    rng: &mut R,
) -> String {
    let raw = raw.trim();
    let message = if raw.is_empty() {
        fallback_message(path)
    } else {
        raw.to_string()
    };

    let mut message = ensure_prefix(message, &settings.commit_prefixes, &mut *rng);

    if use_emoji {
        message = decorate_with_emoji(&message, &mut *rng);
    }

    truncate_message(&message, settings.max_commit_length)
}
