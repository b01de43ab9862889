//! Wikipedia search source, backed by the MediaWiki search API.
//!
//! Wikipedia reports result timestamps as ISO-8601 last-edit times, which
//! slot into the same recency ordering as news publication dates.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::config::{SearchConfig, SourceKind};
use crate::error::{Result, SearchError};
use crate::http;
use crate::source::SourceClient;
use crate::types::SearchHit;

use super::rss::clean_text;

/// API-backed source over MediaWiki full-text search.
pub struct WikipediaSource {
    base_url: String,
}

impl WikipediaSource {
    pub fn new() -> Self {
        Self {
            base_url: "https://en.wikipedia.org".into(),
        }
    }

    /// Override the endpoint base (mock servers in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for WikipediaSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SourceClient for WikipediaSource {
    fn name(&self) -> &'static str {
        SourceKind::Wikipedia.name()
    }

    async fn fetch(&self, query: &str, config: &SearchConfig) -> Result<Vec<SearchHit>> {
        tracing::trace!(query, "Wikipedia search");
        http::request_jitter(config.request_delay_ms).await;

        let limit = config.max_results_per_source.to_string();
        let client = http::build_client(config.source_deadline_secs, config.user_agent.as_deref())?;
        let response = client
            .get(format!("{}/w/api.php", self.base_url))
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query),
                ("utf8", ""),
                ("format", "json"),
                ("srlimit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SearchError::SourceUnavailable(format!("Wikipedia request failed: {e}")))?
            .error_for_status()
            .map_err(|e| SearchError::SourceUnavailable(format!("Wikipedia HTTP error: {e}")))?;

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SearchError::SourceUnavailable(format!("Wikipedia response parse failed: {e}")))?;

        Ok(self.hits_from_response(&data))
    }
}

impl WikipediaSource {
    /// Map the MediaWiki search payload into hits.
    ///
    /// Extracted for testability with canned payloads. Entries without a
    /// page id cannot be linked and are dropped with a warning.
    fn hits_from_response(&self, data: &serde_json::Value) -> Vec<SearchHit> {
        let entries = data
            .pointer("/query/search")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();

        let mut hits = Vec::new();
        for entry in &entries {
            let Some(page_id) = entry.get("pageid").and_then(|v| v.as_u64()) else {
                tracing::warn!("dropping Wikipedia entry without a pageid");
                continue;
            };
            let title = entry
                .get("title")
                .and_then(|v| v.as_str())
                .map(clean_text)
                .unwrap_or_default();
            if title.is_empty() {
                tracing::warn!(page_id, "dropping Wikipedia entry without a title");
                continue;
            }
            let published_at = entry
                .get("timestamp")
                .and_then(|v| v.as_str())
                .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
                .map(|dt| dt.with_timezone(&Utc));

            hits.push(SearchHit {
                title,
                url: format!("{}/?curid={page_id}", self.base_url),
                published_at,
                source: self.name().to_string(),
            });
        }

        tracing::debug!(count = hits.len(), "Wikipedia results parsed");
        hits
    }
}
