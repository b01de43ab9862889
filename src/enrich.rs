//! Enrichment service: per-hit extract→summarize under bounded
//! concurrency.
//!
//! Each hit gets its own unit of work. A fixed-capacity semaphore keeps
//! the number of in-flight headless renders and provider calls bounded;
//! the permit spans the whole unit and is released on every exit path.
//! A failing unit degrades to a reasoned failure on its own hit and
//! never disturbs its siblings, and the recency ordering fixed by the
//! aggregator is preserved through enrichment regardless of completion
//! order.

use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::config::EnrichConfig;
use crate::error::{Result, SearchError};
use crate::page::PageExtractor;
use crate::summarize::ContentSummarizer;
use crate::types::{EnrichedResult, SearchHit, Summary};

/// Orchestrates page extraction and summarization across a hit list.
pub struct SummarizationService {
    extractor: Arc<dyn PageExtractor>,
    summarizer: Arc<ContentSummarizer>,
    semaphore: Arc<Semaphore>,
    config: EnrichConfig,
}

impl SummarizationService {
    pub fn new(
        config: EnrichConfig,
        extractor: Arc<dyn PageExtractor>,
        summarizer: ContentSummarizer,
    ) -> Result<Self> {
        config.validate()?;
        let semaphore = Arc::new(Semaphore::new(config.concurrency));
        Ok(Self {
            extractor,
            summarizer: Arc::new(summarizer),
            semaphore,
            config,
        })
    }

    /// Attach summaries to the first `max_summaries` hits (from config).
    ///
    /// Output order equals input order. Hits beyond the cut-off pass
    /// through with no summary; a hit whose unit fails carries a
    /// `Summary` with `succeeded = false` and the failure reason.
    ///
    /// # Errors
    ///
    /// [`SearchError::InvalidInput`] when `hits` is empty — the only
    /// outright failure.
    pub async fn enrich(&self, hits: Vec<SearchHit>) -> Result<Vec<EnrichedResult>> {
        self.enrich_limited(hits, self.config.max_summaries).await
    }

    /// [`Self::enrich`] with a per-call summary count override.
    pub async fn enrich_limited(
        &self,
        hits: Vec<SearchHit>,
        max_summaries: usize,
    ) -> Result<Vec<EnrichedResult>> {
        if hits.is_empty() {
            return Err(SearchError::InvalidInput(
                "no results to enrich".into(),
            ));
        }

        let cut = max_summaries.min(hits.len());
        let mut hits = hits;
        let passthrough = hits.split_off(cut);

        let units: Vec<_> = hits
            .into_iter()
            .map(|hit| {
                let extractor = Arc::clone(&self.extractor);
                let summarizer = Arc::clone(&self.summarizer);
                let semaphore = Arc::clone(&self.semaphore);
                async move {
                    let _permit = match semaphore.acquire_owned().await {
                        Ok(permit) => permit,
                        Err(_) => {
                            return EnrichedResult {
                                hit,
                                summary: Some(Summary::failed("concurrency gate closed")),
                            }
                        }
                    };
                    let summary = summarize_one(&*extractor, &summarizer, &hit).await;
                    EnrichedResult {
                        hit,
                        summary: Some(summary),
                    }
                }
            })
            .collect();

        // join_all returns results in input order, so completion order
        // never reorders the output.
        let mut results = futures::future::join_all(units).await;
        results.extend(passthrough.into_iter().map(EnrichedResult::bare));
        Ok(results)
    }
}

/// Run one extract→summarize unit, folding failures into the Summary.
async fn summarize_one(
    extractor: &dyn PageExtractor,
    summarizer: &ContentSummarizer,
    hit: &SearchHit,
) -> Summary {
    tracing::debug!(url = %hit.url, "extracting content");
    let content = match extractor.extract(&hit.url).await {
        Ok(content) => content,
        Err(err) => {
            tracing::warn!(url = %hit.url, error = %err, "content extraction failed");
            return Summary::failed(err.to_string());
        }
    };

    tracing::debug!(url = %hit.url, chars = content.length, "summarizing content");
    match summarizer.summarize(&content).await {
        Ok(text) => Summary::ok(text, content.length),
        Err(err) => {
            tracing::warn!(url = %hit.url, error = %err, "summarization failed");
            Summary::failed(err.to_string())
        }
    }
}
