/// Upper bound the model is asked to respect; the configured limit is enforced
/// afterwards regardless
pub const PROMPT_CHARACTER_HINT: usize = 60;

/// Build the instruction sent to the text-generation provider for one diff
pub fn create_commit_prompt(diff: &str) -> String {
    format!(
        "Generate a short, concise, one-line commit message for the following diff. \
         Keep it under {PROMPT_CHARACTER_HINT} characters and include type like \
         chore:, refactor:, feat:, fix:, docs:, test:\n{diff}"
    )
}
