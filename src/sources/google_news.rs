//! Google News RSS search source.

use async_trait::async_trait;

use crate::config::{SearchConfig, SourceKind};
use crate::error::{Result, SearchError};
use crate::http;
use crate::source::SourceClient;
use crate::types::SearchHit;

use super::rss::parse_rss_items;

/// Feed-backed source over the Google News RSS search endpoint.
pub struct GoogleNewsSource {
    base_url: String,
}

impl GoogleNewsSource {
    pub fn new() -> Self {
        Self {
            base_url: "https://news.google.com".into(),
        }
    }

    /// Override the endpoint base (mock servers in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for GoogleNewsSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SourceClient for GoogleNewsSource {
    fn name(&self) -> &'static str {
        SourceKind::GoogleNews.name()
    }

    async fn fetch(&self, query: &str, config: &SearchConfig) -> Result<Vec<SearchHit>> {
        tracing::trace!(query, "Google News search");
        http::request_jitter(config.request_delay_ms).await;

        let client = http::build_client(config.source_deadline_secs, config.user_agent.as_deref())?;
        let response = client
            .get(format!("{}/rss/search", self.base_url))
            .query(&[
                ("q", query),
                ("hl", "en-US"),
                ("gl", "US"),
                ("ceid", "US:en"),
            ])
            .send()
            .await
            .map_err(|e| SearchError::SourceUnavailable(format!("Google News request failed: {e}")))?
            .error_for_status()
            .map_err(|e| SearchError::SourceUnavailable(format!("Google News HTTP error: {e}")))?;

        let xml = response
            .text()
            .await
            .map_err(|e| SearchError::SourceUnavailable(format!("Google News read failed: {e}")))?;

        let hits: Vec<SearchHit> = parse_rss_items(&xml, config.max_results_per_source)
            .into_iter()
            .map(|item| SearchHit {
                title: item.title,
                url: item.url,
                published_at: item.published_at,
                source: self.name().to_string(),
            })
            .collect();

        tracing::debug!(count = hits.len(), "Google News results parsed");
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_name() {
        assert_eq!(GoogleNewsSource::new().name(), "Google News");
    }

    #[test]
    fn is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GoogleNewsSource>();
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_source_unavailable() {
        let source = GoogleNewsSource::new().with_base_url("http://127.0.0.1:1");
        let config = SearchConfig {
            request_delay_ms: (0, 0),
            source_deadline_secs: 2,
            ..Default::default()
        };
        let result = source.fetch("rust", &config).await;
        assert!(matches!(result, Err(SearchError::SourceUnavailable(_))));
    }

    #[tokio::test]
    #[ignore] // Live test — run with `cargo test -- --ignored`
    async fn live_google_news_search() {
        let source = GoogleNewsSource::new();
        let config = SearchConfig::default();
        let hits = source
            .fetch("rust programming", &config)
            .await
            .expect("live search should work");
        assert!(!hits.is_empty());
        for hit in &hits {
            assert!(!hit.title.is_empty());
            assert!(hit.url.starts_with("http"));
            assert_eq!(hit.source, "Google News");
        }
    }
}
