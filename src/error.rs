//! Error types for the currents crate.
//!
//! One flat taxonomy covering the whole pipeline. Per-source and per-item
//! variants are caught at their own boundary and converted into degraded
//! results; only query-level variants reach the caller. All messages are
//! stable strings suitable for display — no API keys or credentials ever
//! appear in them.

/// Errors that can occur during search, extraction, or summarization.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A single source could not be reached or rejected the request.
    /// Non-fatal to aggregation.
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    /// A single source did not respond within its deadline.
    /// Non-fatal to aggregation.
    #[error("source timed out: {0}")]
    SourceTimeout(String),

    /// Every configured source failed — fatal to the query.
    #[error("no sources available: {0}")]
    NoSourcesAvailable(String),

    /// A page could not be fetched or rendered (network, HTTP, or
    /// WebDriver failure). Non-fatal to enrichment.
    #[error("fetch failed: {0}")]
    FetchFailed(String),

    /// Page rendering exceeded the configured deadline.
    /// Non-fatal to enrichment.
    #[error("render timed out: {0}")]
    RenderTimeout(String),

    /// The page payload is not HTML, or yielded no readable text.
    /// Non-fatal to enrichment.
    #[error("unsupported content: {0}")]
    UnsupportedContent(String),

    /// The LLM request exceeded the configured deadline.
    /// Non-fatal to enrichment.
    #[error("summarization timed out: {0}")]
    SummarizationTimeout(String),

    /// The LLM backend returned an error or an unusable response.
    /// Non-fatal to enrichment.
    #[error("provider error: {0}")]
    Provider(String),

    /// Extracted content exceeds the hard input ceiling — summarization
    /// is refused before any provider call is made.
    #[error("content too large: {0}")]
    ContentTooLarge(String),

    /// Invalid configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Invalid caller input (blank query, empty result set).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for currents results.
pub type Result<T> = std::result::Result<T, SearchError>;
