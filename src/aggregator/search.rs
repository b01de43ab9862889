//! Search aggregation: concurrent multi-source fan-out, merge, dedup,
//! recency sort, cache.
//!
//! Each source runs under its own deadline; a source that errors or
//! times out contributes nothing and is logged. Only the failure of
//! every source fails the query.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::ResultCache;
use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::source::{build_sources, SourceClient};
use crate::types::SearchHit;

use super::dedup::deduplicate;

/// Aggregates hits from all configured sources for one query.
///
/// Holds the injected [`ResultCache`] — the only state shared between
/// in-flight queries — and a fixed set of source clients chosen at
/// construction time.
pub struct SearchAggregator {
    sources: Vec<Arc<dyn SourceClient>>,
    cache: ResultCache,
    config: SearchConfig,
}

impl SearchAggregator {
    /// Build an aggregator with the sources named in `config`.
    pub fn new(config: SearchConfig, cache: ResultCache) -> Result<Self> {
        config.validate()?;
        let sources = build_sources(&config);
        Ok(Self {
            sources,
            cache,
            config,
        })
    }

    /// Build an aggregator over caller-supplied sources.
    ///
    /// Used by tests to inject stub sources; `config.sources` is ignored
    /// in favour of the given list.
    pub fn with_sources(
        config: SearchConfig,
        cache: ResultCache,
        sources: Vec<Arc<dyn SourceClient>>,
    ) -> Result<Self> {
        if sources.is_empty() {
            return Err(SearchError::Config(
                "at least one source must be supplied".into(),
            ));
        }
        Ok(Self {
            sources,
            cache,
            config,
        })
    }

    /// Run a query against every source concurrently.
    ///
    /// Returns the deduplicated hit list sorted by `published_at`
    /// descending; hits without a timestamp sort last, and ties keep
    /// source arrival order. Results are cached by normalised query.
    ///
    /// # Errors
    ///
    /// [`SearchError::InvalidInput`] for a blank query;
    /// [`SearchError::NoSourcesAvailable`] when every source fails.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        if query.trim().is_empty() {
            return Err(SearchError::InvalidInput("query must not be empty".into()));
        }

        if let Some(hits) = self.cache.get(query).await {
            tracing::debug!(query, count = hits.len(), "cache hit");
            return Ok(hits);
        }

        let deadline = Duration::from_secs(self.config.source_deadline_secs);
        let futures: Vec<_> = self
            .sources
            .iter()
            .map(|source| {
                let source = Arc::clone(source);
                let config = self.config.clone();
                let query = query.to_string();
                async move {
                    let name = source.name();
                    let outcome =
                        match tokio::time::timeout(deadline, source.fetch(&query, &config)).await {
                            Ok(result) => result,
                            Err(_) => Err(SearchError::SourceTimeout(format!(
                                "{name} exceeded {}s",
                                config.source_deadline_secs
                            ))),
                        };
                    (name, outcome)
                }
            })
            .collect();

        let outcomes = futures::future::join_all(futures).await;

        let mut merged: Vec<SearchHit> = Vec::new();
        let mut failures: Vec<String> = Vec::new();
        let mut successes = 0usize;

        for (name, outcome) in outcomes {
            match outcome {
                Ok(hits) => {
                    tracing::debug!(source = name, count = hits.len(), "source returned hits");
                    successes += 1;
                    merged.extend(hits);
                }
                Err(err) => {
                    tracing::warn!(source = name, error = %err, "source query failed");
                    failures.push(format!("{name}: {err}"));
                }
            }
        }

        if successes == 0 {
            return Err(SearchError::NoSourcesAvailable(failures.join("; ")));
        }

        let mut hits = deduplicate(merged, self.config.dedup);
        // None sorts below every Some, so undated hits land last under a
        // descending comparison; the sort is stable so arrival order
        // breaks ties.
        hits.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        self.cache.put(query, hits.clone()).await;
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubSource {
        name: &'static str,
        hits: Vec<SearchHit>,
        fail: bool,
        delay_ms: u64,
        calls: Arc<AtomicUsize>,
    }

    impl StubSource {
        fn ok(name: &'static str, hits: Vec<SearchHit>) -> Arc<Self> {
            Arc::new(Self {
                name,
                hits,
                fail: false,
                delay_ms: 0,
                calls: Arc::new(AtomicUsize::new(0)),
            })
        }

        fn failing(name: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                hits: vec![],
                fail: true,
                delay_ms: 0,
                calls: Arc::new(AtomicUsize::new(0)),
            })
        }

        fn slow(name: &'static str, delay_ms: u64) -> Arc<Self> {
            Arc::new(Self {
                name,
                hits: vec![make_hit("https://slow.com", name, None)],
                fail: false,
                delay_ms,
                calls: Arc::new(AtomicUsize::new(0)),
            })
        }
    }

    #[async_trait]
    impl SourceClient for StubSource {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn fetch(&self, _query: &str, _config: &SearchConfig) -> Result<Vec<SearchHit>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
            }
            if self.fail {
                return Err(SearchError::SourceUnavailable(format!(
                    "{} is down",
                    self.name
                )));
            }
            Ok(self.hits.clone())
        }
    }

    fn make_hit(url: &str, source: &str, date: Option<(i32, u32, u32)>) -> SearchHit {
        SearchHit {
            title: format!("Title from {source}"),
            url: url.to_string(),
            published_at: date.map(|(y, m, d)| Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()),
            source: source.to_string(),
        }
    }

    fn test_config() -> SearchConfig {
        SearchConfig {
            request_delay_ms: (0, 0),
            source_deadline_secs: 1,
            ..Default::default()
        }
    }

    fn fresh_cache() -> ResultCache {
        ResultCache::new(Duration::from_secs(900))
    }

    #[tokio::test]
    async fn recency_ordering_across_sources() {
        let older = StubSource::ok(
            "Older",
            vec![make_hit("https://sept.com", "Older", Some((2024, 9, 1)))],
        );
        let newer = StubSource::ok(
            "Newer",
            vec![make_hit("https://oct.com", "Newer", Some((2024, 10, 28)))],
        );
        let aggregator =
            SearchAggregator::with_sources(test_config(), fresh_cache(), vec![older, newer])
                .expect("valid");

        let hits = aggregator
            .search("AAPL latest earnings transcript")
            .await
            .expect("should succeed");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].url, "https://oct.com");
        assert_eq!(hits[1].url, "https://sept.com");
    }

    #[tokio::test]
    async fn undated_hits_sort_last_in_arrival_order() {
        let source = StubSource::ok(
            "Mixed",
            vec![
                make_hit("https://undated-1.com", "Mixed", None),
                make_hit("https://dated.com", "Mixed", Some((2024, 10, 1))),
                make_hit("https://undated-2.com", "Mixed", None),
            ],
        );
        let aggregator =
            SearchAggregator::with_sources(test_config(), fresh_cache(), vec![source])
                .expect("valid");

        let hits = aggregator.search("query").await.expect("should succeed");
        assert_eq!(hits[0].url, "https://dated.com");
        assert_eq!(hits[1].url, "https://undated-1.com");
        assert_eq!(hits[2].url, "https://undated-2.com");
    }

    #[tokio::test]
    async fn partial_failure_returns_surviving_hits() {
        let good = StubSource::ok(
            "Good",
            vec![make_hit("https://good.com", "Good", Some((2024, 10, 1)))],
        );
        let bad = StubSource::failing("Bad");
        let aggregator =
            SearchAggregator::with_sources(test_config(), fresh_cache(), vec![bad, good])
                .expect("valid");

        let hits = aggregator.search("query").await.expect("should succeed");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].url, "https://good.com");
    }

    #[tokio::test]
    async fn all_sources_failing_is_no_sources_available() {
        let aggregator = SearchAggregator::with_sources(
            test_config(),
            fresh_cache(),
            vec![StubSource::failing("A"), StubSource::failing("B")],
        )
        .expect("valid");

        let err = aggregator.search("query").await.unwrap_err();
        match err {
            SearchError::NoSourcesAvailable(reason) => {
                assert!(reason.contains("A is down"));
                assert!(reason.contains("B is down"));
            }
            other => panic!("expected NoSourcesAvailable, got {other}"),
        }
    }

    #[tokio::test]
    async fn all_sources_empty_is_empty_success() {
        let aggregator = SearchAggregator::with_sources(
            test_config(),
            fresh_cache(),
            vec![StubSource::ok("Empty", vec![])],
        )
        .expect("valid");

        let hits = aggregator.search("query").await.expect("empty success");
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn slow_source_times_out_without_failing_the_query() {
        let slow = StubSource::slow("Slow", 3_000);
        let fast = StubSource::ok(
            "Fast",
            vec![make_hit("https://fast.com", "Fast", Some((2024, 10, 1)))],
        );
        let aggregator =
            SearchAggregator::with_sources(test_config(), fresh_cache(), vec![slow, fast])
                .expect("valid");

        let hits = aggregator.search("query").await.expect("should succeed");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].url, "https://fast.com");
    }

    #[tokio::test]
    async fn duplicate_urls_across_sources_are_merged_first_seen() {
        let first = StubSource::ok(
            "First",
            vec![make_hit("https://example.com/story", "First", Some((2024, 10, 1)))],
        );
        let second = StubSource::ok(
            "Second",
            vec![make_hit(
                "https://example.com/story?utm_source=x",
                "Second",
                Some((2024, 10, 20)),
            )],
        );
        let aggregator =
            SearchAggregator::with_sources(test_config(), fresh_cache(), vec![first, second])
                .expect("valid");

        let hits = aggregator.search("query").await.expect("should succeed");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].source, "First");
    }

    #[tokio::test]
    async fn cached_query_skips_sources() {
        let source = StubSource::ok(
            "Counted",
            vec![make_hit("https://a.com", "Counted", Some((2024, 10, 1)))],
        );
        let calls = Arc::clone(&source.calls);
        let aggregator =
            SearchAggregator::with_sources(test_config(), fresh_cache(), vec![source])
                .expect("valid");

        aggregator.search("Repeated Query").await.expect("first");
        aggregator.search("  repeated query ").await.expect("second");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn blank_query_rejected() {
        let aggregator = SearchAggregator::with_sources(
            test_config(),
            fresh_cache(),
            vec![StubSource::ok("A", vec![])],
        )
        .expect("valid");

        let err = aggregator.search("   ").await.unwrap_err();
        assert!(matches!(err, SearchError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn no_duplicate_normalised_urls_in_output() {
        let a = StubSource::ok(
            "A",
            vec![
                make_hit("https://x.com/a", "A", Some((2024, 10, 1))),
                make_hit("https://x.com/a/", "A", Some((2024, 10, 2))),
            ],
        );
        let b = StubSource::ok(
            "B",
            vec![make_hit("https://X.com/a#frag", "B", None)],
        );
        let aggregator =
            SearchAggregator::with_sources(test_config(), fresh_cache(), vec![a, b])
                .expect("valid");

        let hits = aggregator.search("query").await.expect("should succeed");
        let urls: std::collections::HashSet<String> = hits
            .iter()
            .map(|h| super::super::url_normalize::normalize_url(&h.url))
            .collect();
        assert_eq!(urls.len(), hits.len());
    }
}
