//! Bing News RSS search source.
//!
//! Bing serves its news search as RSS when `format=RSS` is requested and
//! links directly to publisher URLs, so no redirect unwrapping is needed.

use async_trait::async_trait;

use crate::config::{SearchConfig, SourceKind};
use crate::error::{Result, SearchError};
use crate::http;
use crate::source::SourceClient;
use crate::types::SearchHit;

use super::rss::parse_rss_items;

/// Feed-backed source over the Bing News search endpoint.
pub struct BingNewsSource {
    base_url: String,
}

impl BingNewsSource {
    pub fn new() -> Self {
        Self {
            base_url: "https://www.bing.com".into(),
        }
    }

    /// Override the endpoint base (mock servers in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for BingNewsSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SourceClient for BingNewsSource {
    fn name(&self) -> &'static str {
        SourceKind::BingNews.name()
    }

    async fn fetch(&self, query: &str, config: &SearchConfig) -> Result<Vec<SearchHit>> {
        tracing::trace!(query, "Bing News search");
        http::request_jitter(config.request_delay_ms).await;

        let client = http::build_client(config.source_deadline_secs, config.user_agent.as_deref())?;
        let response = client
            .get(format!("{}/news/search", self.base_url))
            .query(&[("q", query), ("format", "RSS")])
            .send()
            .await
            .map_err(|e| SearchError::SourceUnavailable(format!("Bing News request failed: {e}")))?
            .error_for_status()
            .map_err(|e| SearchError::SourceUnavailable(format!("Bing News HTTP error: {e}")))?;

        let xml = response
            .text()
            .await
            .map_err(|e| SearchError::SourceUnavailable(format!("Bing News read failed: {e}")))?;

        let hits: Vec<SearchHit> = parse_rss_items(&xml, config.max_results_per_source)
            .into_iter()
            .map(|item| SearchHit {
                title: item.title,
                url: item.url,
                published_at: item.published_at,
                source: self.name().to_string(),
            })
            .collect();

        tracing::debug!(count = hits.len(), "Bing News results parsed");
        Ok(hits)
    }
}
