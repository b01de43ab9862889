//! # currents
//!
//! Recency-ranked multi-source web search with rendered-page content
//! extraction and LLM-generated summaries.
//!
//! ## Design
//!
//! - Queries Google News, Bing News, and Wikipedia concurrently and
//!   merges hits, deduplicated by normalised URL and sorted newest-first
//! - In-memory TTL cache keyed by normalised query, injected rather than
//!   process-global so callers control its lifetime
//! - Renders result pages in a headless WebDriver session so
//!   client-side-rendered content resolves before text extraction
//! - Summarizes extracted text through a pluggable LLM backend (OpenAI
//!   or Anthropic) under a strict character ceiling and request timeout
//! - Graceful degradation throughout: a failing source, page, or
//!   provider call degrades its own slice of the response and nothing
//!   else
//!
//! ## Security
//!
//! - API keys appear only in request headers, never in logs or errors
//! - Search queries are logged only at trace level
//! - No network listeners — this is a library plus an interactive CLI

pub mod aggregator;
pub mod cache;
pub mod config;
pub mod content;
pub mod enrich;
pub mod error;
pub mod http;
pub mod page;
pub mod render;
pub mod source;
pub mod sources;
pub mod summarize;
pub mod types;

pub use aggregator::SearchAggregator;
pub use cache::ResultCache;
pub use config::{
    DedupPolicy, EnrichConfig, LlmProvider, RenderConfig, SearchConfig, SourceKind, SummaryConfig,
    SummaryLength,
};
pub use enrich::SummarizationService;
pub use error::{Result, SearchError};
pub use page::{PageExtractor, WebDriverParser};
pub use source::SourceClient;
pub use summarize::{ContentSummarizer, LlmBackend};
pub use types::{EnrichedResult, ExtractedContent, SearchHit, SearchReport, Summary};

use std::time::Duration;

/// Search the web using all configured sources concurrently.
///
/// Convenience wrapper constructing a single-use aggregator and cache.
/// Callers wanting caching across queries should hold a
/// [`SearchAggregator`] with their own [`ResultCache`] instead.
///
/// # Errors
///
/// Returns [`SearchError::NoSourcesAvailable`] if every configured
/// source fails. Individual source failures are logged but tolerated as
/// long as any source responds.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> currents::Result<()> {
/// let config = currents::SearchConfig::default();
/// let hits = currents::search("rust async runtime", &config).await?;
/// for hit in &hits {
///     println!("{}: {}", hit.title, hit.url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(query: &str, config: &SearchConfig) -> Result<Vec<SearchHit>> {
    let cache = ResultCache::new(Duration::from_secs(config.cache_ttl_secs));
    SearchAggregator::new(config.clone(), cache)?
        .search(query)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn search_rejects_empty_source_list() {
        let config = SearchConfig {
            sources: vec![],
            ..Default::default()
        };
        let result = search("test", &config).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("source"));
    }

    #[tokio::test]
    async fn search_rejects_zero_deadline() {
        let config = SearchConfig {
            source_deadline_secs: 0,
            ..Default::default()
        };
        let result = search("test", &config).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn search_rejects_blank_query() {
        let config = SearchConfig::default();
        let result = search("   ", &config).await;
        assert!(matches!(result, Err(SearchError::InvalidInput(_))));
    }
}
