//! Text-generation providers
//!
//! The commit pipeline only needs "prompt in, text out". Everything else
//! (endpoint, auth, wire format) stays inside the provider.

mod gemini;

use async_trait::async_trait;

pub use gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiProvider};

/// Errors a provider can report. The commit pipeline degrades all of them to
/// an empty completion.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("API key required for provider: {0}")]
    MissingApiKey(&'static str),
    #[error("request to {provider} failed: {source}")]
    Request {
        provider: &'static str,
        source: reqwest::Error,
    },
    #[error("{provider} API request failed with status {status}: {body}")]
    Status {
        provider: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("failed to parse {provider} response: {source}")]
    Decode {
        provider: &'static str,
        source: reqwest::Error,
    },
}

#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Short provider name for logs
    fn name(&self) -> &'static str;

    /// Send `prompt` and return the completion, trimmed. An empty string is a
    /// valid answer.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}
