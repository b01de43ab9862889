//! Time-windowed result cache keyed by normalised query.
//!
//! Caches the final deduplicated, recency-sorted hit list per query.
//! Uses [`moka`] for async-friendly caching with TTL expiry enforced on
//! read, so an expired entry behaves as absent. The cache is an explicit
//! instance injected into the aggregator — tests construct their own,
//! pre-populated or fresh.

use std::time::Duration;

use moka::future::Cache;

use crate::types::SearchHit;

/// Maximum number of cached queries. Expiry does the real eviction work;
/// this bounds a pathological session.
const MAX_CACHE_ENTRIES: u64 = 100;

/// Normalise a query for use as a cache key: trimmed and lowercased.
///
/// The query itself is passed to sources verbatim — normalisation only
/// affects cache identity.
pub fn normalise_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// TTL cache of aggregated search results.
#[derive(Clone)]
pub struct ResultCache {
    inner: Cache<String, Vec<SearchHit>>,
}

impl ResultCache {
    /// Build a cache whose entries expire `ttl` after insertion.
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(MAX_CACHE_ENTRIES)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Look up cached hits for `query`. Expired entries behave as absent.
    pub async fn get(&self, query: &str) -> Option<Vec<SearchHit>> {
        self.inner.get(&normalise_query(query)).await
    }

    /// Store hits for `query`, replacing any previous entry.
    pub async fn put(&self, query: &str, hits: Vec<SearchHit>) {
        self.inner.insert(normalise_query(query), hits).await;
    }
}
