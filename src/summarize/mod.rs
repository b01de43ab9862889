//! LLM-powered content summarization.
//!
//! One-shot summarization: input text is truncated to a character
//! ceiling, wrapped in a prompt with the page title and source URL for
//! context, and sent to the configured backend in a single
//! timeout-bounded call. No chunking, no retries, and never a silently
//! empty summary.

pub mod anthropic;
pub mod backend;
pub mod openai;

pub use anthropic::AnthropicBackend;
pub use backend::LlmBackend;
pub use openai::OpenAiBackend;

use std::sync::Arc;
use std::time::Duration;

use crate::config::{LlmProvider, SummaryConfig, SummaryLength};
use crate::error::{Result, SearchError};
use crate::types::ExtractedContent;

/// Appended to truncated input so the model knows the text was cut.
const TRUNCATION_MARKER: &str = "[Content truncated for summarization]";

/// Inputs beyond this multiple of the truncation ceiling are refused
/// outright — that much text signals runaway extraction, not an article.
const HARD_CAP_MULTIPLIER: usize = 10;

/// Build the backend named by `config`, applying any base-URL override.
pub fn build_backend(config: &SummaryConfig) -> Arc<dyn LlmBackend> {
    match config.provider {
        LlmProvider::OpenAi => {
            let mut backend = OpenAiBackend::new(&config.api_key, config.resolved_model());
            if let Some(base) = &config.base_url {
                backend = backend.with_base_url(base);
            }
            Arc::new(backend)
        }
        LlmProvider::Anthropic => {
            let mut backend = AnthropicBackend::new(&config.api_key, config.resolved_model());
            if let Some(base) = &config.base_url {
                backend = backend.with_base_url(base);
            }
            Arc::new(backend)
        }
    }
}

/// Summarizes extracted page content through a pluggable LLM backend.
pub struct ContentSummarizer {
    backend: Arc<dyn LlmBackend>,
    config: SummaryConfig,
}

impl ContentSummarizer {
    /// Build a summarizer with the backend selected by `config`.
    pub fn new(config: SummaryConfig) -> Result<Self> {
        config.validate()?;
        let backend = build_backend(&config);
        Ok(Self { backend, config })
    }

    /// Build a summarizer over a caller-supplied backend (tests, custom
    /// providers). The config's provider/key fields are not consulted.
    pub fn with_backend(config: SummaryConfig, backend: Arc<dyn LlmBackend>) -> Self {
        Self { backend, config }
    }

    /// Summarize extracted content in one backend call.
    ///
    /// # Errors
    ///
    /// [`SearchError::ContentTooLarge`] when input exceeds the hard
    /// ceiling; [`SearchError::SummarizationTimeout`] when the backend
    /// misses the deadline; [`SearchError::Provider`] for backend
    /// failures or an empty completion.
    pub async fn summarize(&self, content: &ExtractedContent) -> Result<String> {
        if content.text.trim().is_empty() {
            return Err(SearchError::InvalidInput(
                "no content provided for summarization".into(),
            ));
        }

        let ceiling = self.config.max_input_chars;
        if content.length > ceiling * HARD_CAP_MULTIPLIER {
            return Err(SearchError::ContentTooLarge(format!(
                "{} chars exceeds the {} char ceiling",
                content.length,
                ceiling * HARD_CAP_MULTIPLIER
            )));
        }

        let (input, truncated) = truncate_input(&content.text, ceiling);
        if truncated {
            tracing::debug!(
                url = %content.url,
                original = content.length,
                ceiling,
                "content truncated for summarization"
            );
        }

        let prompt = build_prompt(
            &input,
            truncated,
            &content.title,
            &content.url,
            self.config.length,
        );

        let deadline = Duration::from_secs(self.config.timeout_secs);
        let completion = match tokio::time::timeout(
            deadline,
            self.backend
                .complete(&prompt, self.config.max_tokens, self.config.temperature),
        )
        .await
        {
            Ok(result) => result?,
            Err(_) => {
                return Err(SearchError::SummarizationTimeout(format!(
                    "{} exceeded {}s",
                    self.backend.name(),
                    self.config.timeout_secs
                )))
            }
        };

        if completion.trim().is_empty() {
            return Err(SearchError::Provider(format!(
                "empty completion from {}",
                self.backend.name()
            )));
        }
        Ok(completion)
    }
}

/// Truncate `text` to at most `max_chars` characters.
///
/// Character-exact: the returned string contains exactly `max_chars`
/// characters when truncation occurs.
pub(crate) fn truncate_input(text: &str, max_chars: usize) -> (String, bool) {
    let mut count = 0usize;
    for (offset, _) in text.char_indices() {
        if count == max_chars {
            return (text[..offset].to_owned(), true);
        }
        count += 1;
    }
    (text.to_owned(), false)
}

/// Assemble the summarization prompt.
fn build_prompt(
    content: &str,
    truncated: bool,
    title: &str,
    url: &str,
    length: SummaryLength,
) -> String {
    let mut prompt = format!(
        "Please summarize the following content. {}\n\n\
         Focus on:\n\
         - Key facts and main points\n\
         - Important insights or conclusions\n\
         - Actionable information if present\n\
         - Most relevant details for the reader\n\n",
        length_instruction(length)
    );

    if !title.is_empty() {
        prompt.push_str(&format!("Title: {title}\n\n"));
    }
    if !url.is_empty() {
        prompt.push_str(&format!("Source: {url}\n\n"));
    }

    prompt.push_str("Content:\n");
    prompt.push_str(content);
    if truncated {
        prompt.push_str(&format!("\n\n{TRUNCATION_MARKER}"));
    }
    prompt.push_str("\n\nSummary:");
    prompt
}

fn length_instruction(length: SummaryLength) -> &'static str {
    match length {
        SummaryLength::Short => "Provide a concise summary in 1-2 sentences.",
        SummaryLength::Medium => "Provide a comprehensive summary in 1-2 paragraphs.",
        SummaryLength::Long => "Provide a detailed summary in 2-3 paragraphs.",
    }
}
