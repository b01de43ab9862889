//! Capability trait for pluggable search sources.
//!
//! Each provider (Google News, Bing News, Wikipedia) implements
//! [`SourceClient`] to give the aggregator a uniform fetch interface.
//! The trait is object-safe so the aggregator holds `Arc<dyn SourceClient>`
//! values chosen at construction time — adding a provider means adding an
//! implementation, never a branch in the aggregation path.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{SearchConfig, SourceKind};
use crate::error::Result;
use crate::sources::{BingNewsSource, GoogleNewsSource, WikipediaSource};
use crate::types::SearchHit;

/// A pluggable search source.
///
/// Implementors own their provider's URL construction, request headers,
/// and response mapping into [`SearchHit`] values. Items that fail to
/// parse are dropped with a warning, never surfaced as a fetch error.
/// Implementations must be `Send + Sync`; fetches run concurrently.
#[async_trait]
pub trait SourceClient: Send + Sync {
    /// Human-readable source name, used in logs and hit attribution.
    fn name(&self) -> &'static str;

    /// Fetch raw hits for a query.
    ///
    /// # Errors
    ///
    /// [`crate::SearchError::SourceUnavailable`] when the provider cannot
    /// be reached or rejects the request. Per-source timeouts are applied
    /// by the aggregator, not here.
    async fn fetch(&self, query: &str, config: &SearchConfig) -> Result<Vec<SearchHit>>;
}

/// Build the concrete source for a configured [`SourceKind`].
pub fn build_source(kind: SourceKind) -> Arc<dyn SourceClient> {
    match kind {
        SourceKind::GoogleNews => Arc::new(GoogleNewsSource::new()),
        SourceKind::BingNews => Arc::new(BingNewsSource::new()),
        SourceKind::Wikipedia => Arc::new(WikipediaSource::new()),
    }
}

/// Build sources for every kind named in `config.sources`, in order.
pub fn build_sources(config: &SearchConfig) -> Vec<Arc<dyn SourceClient>> {
    config.sources.iter().copied().map(build_source).collect()
}
