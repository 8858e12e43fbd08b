//! Generation provider trait for the external completion service

use async_trait::async_trait;

use crate::error::Result;
use crate::types::Completion;

/// Trait for the external generative model
///
/// Implementations:
/// - `OpenAiChatClient`: any OpenAI-compatible chat-completions endpoint
///   (Groq, OpenAI, local servers exposing the same API)
///
/// A call may fail with `Error::RateLimited` whose message embeds a
/// server-suggested retry delay; callers run completions under a
/// `RetryPolicy`.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Send a system + user prompt pair and return text plus token usage
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<Completion>;

    /// Check if the provider is healthy and available
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// The model being used
    fn model(&self) -> &str;
}
