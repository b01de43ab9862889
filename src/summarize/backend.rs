//! Capability trait for pluggable LLM backends.
//!
//! One method: a single-shot completion. Streaming, tool use, and
//! multi-turn state are out of scope — summarization is one request,
//! one response.

use async_trait::async_trait;

use crate::error::Result;

/// A pluggable LLM completion backend.
///
/// Implementations own their provider's wire format and authentication.
/// They must be `Send + Sync`; completions for different hits run
/// concurrently over the same backend instance.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Human-readable backend name, used in logs.
    fn name(&self) -> &'static str;

    /// Run one completion for `prompt`.
    ///
    /// # Errors
    ///
    /// [`crate::SearchError::Provider`] for transport, authentication, or
    /// response-shape failures. Timeouts are applied by the caller.
    async fn complete(&self, prompt: &str, max_tokens: u32, temperature: f32) -> Result<String>;
}
