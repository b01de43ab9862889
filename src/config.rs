//! Configuration types with sensible defaults.
//!
//! Each pipeline stage takes its own small config struct. Defaults are
//! tuned for polite scraping and interactive use; everything here is
//! injected by the caller — the library never reads the environment.

use crate::error::SearchError;

/// Search sources that can be queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SourceKind {
    /// Google News RSS search feed.
    GoogleNews,
    /// Bing News RSS search feed.
    BingNews,
    /// Wikipedia MediaWiki search API.
    Wikipedia,
}

impl SourceKind {
    /// Human-readable source name, used in logs and hit attribution.
    pub fn name(&self) -> &'static str {
        match self {
            Self::GoogleNews => "Google News",
            Self::BingNews => "Bing News",
            Self::Wikipedia => "Wikipedia",
        }
    }

    /// All available source variants.
    pub fn all() -> &'static [SourceKind] {
        &[Self::GoogleNews, Self::BingNews, Self::Wikipedia]
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What to keep when two sources report the same normalised URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupPolicy {
    /// Keep the first-seen entry (source arrival order).
    #[default]
    KeepFirst,
    /// Keep the entry with the most recent timestamp; an undated entry
    /// never displaces a dated one.
    KeepNewest,
}

/// Configuration for search aggregation.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Which sources to query. Queried concurrently; results are merged
    /// in this order before recency sorting.
    pub sources: Vec<SourceKind>,
    /// Maximum hits taken from each source.
    pub max_results_per_source: usize,
    /// Per-source deadline in seconds. A source that misses it
    /// contributes nothing to the merge.
    pub source_deadline_secs: u64,
    /// How long aggregated results stay cached, in seconds.
    pub cache_ttl_secs: u64,
    /// Random delay range in milliseconds `(min, max)` applied before
    /// each source request to avoid burst rate limiting.
    pub request_delay_ms: (u64, u64),
    /// Custom User-Agent. `None` rotates through a built-in browser list.
    pub user_agent: Option<String>,
    /// Duplicate-URL resolution policy.
    pub dedup: DedupPolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            sources: vec![
                SourceKind::GoogleNews,
                SourceKind::BingNews,
                SourceKind::Wikipedia,
            ],
            max_results_per_source: 5,
            source_deadline_secs: 8,
            cache_ttl_secs: 900,
            request_delay_ms: (100, 500),
            user_agent: None,
            dedup: DedupPolicy::KeepFirst,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.sources.is_empty() {
            return Err(SearchError::Config(
                "at least one source must be enabled".into(),
            ));
        }
        if self.max_results_per_source == 0 {
            return Err(SearchError::Config(
                "max_results_per_source must be greater than 0".into(),
            ));
        }
        if self.source_deadline_secs == 0 {
            return Err(SearchError::Config(
                "source_deadline_secs must be greater than 0".into(),
            ));
        }
        if self.request_delay_ms.0 > self.request_delay_ms.1 {
            return Err(SearchError::Config(
                "request_delay_ms min must be <= max".into(),
            ));
        }
        Ok(())
    }
}

/// Configuration for headless page rendering.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// WebDriver endpoint (Chromedriver-compatible).
    pub webdriver_url: String,
    /// Hard deadline for navigate + settle + source, in seconds.
    pub timeout_secs: u64,
    /// Post-navigation settle delay in milliseconds, giving dynamic
    /// content a moment to render.
    pub settle_ms: u64,
    /// Custom User-Agent for the browser session.
    pub user_agent: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".into(),
            timeout_secs: 30,
            settle_ms: 1500,
            user_agent: None,
        }
    }
}

impl RenderConfig {
    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.webdriver_url.is_empty() {
            return Err(SearchError::Config("webdriver_url must be set".into()));
        }
        if self.timeout_secs == 0 {
            return Err(SearchError::Config(
                "render timeout_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Supported LLM providers for summarization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    OpenAi,
    Anthropic,
}

impl LlmProvider {
    /// Default model identifier for this provider.
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4o-mini",
            Self::Anthropic => "claude-3-5-haiku-latest",
        }
    }
}

/// Summary length options, controlling the prompt instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryLength {
    /// 1-2 sentences.
    Short,
    /// 1-2 paragraphs.
    #[default]
    Medium,
    /// 2-3 paragraphs.
    Long,
}

/// Configuration for LLM summarization.
#[derive(Debug, Clone)]
pub struct SummaryConfig {
    /// Which backend to use.
    pub provider: LlmProvider,
    /// API key for the selected provider.
    pub api_key: String,
    /// Model identifier. Empty selects the provider default.
    pub model: String,
    /// Override for the provider base URL (mock servers, proxies).
    pub base_url: Option<String>,
    /// Max tokens requested per completion.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Summary length instruction.
    pub length: SummaryLength,
    /// Character ceiling applied to input text before the provider call.
    pub max_input_chars: usize,
    /// Provider request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::OpenAi,
            api_key: String::new(),
            model: String::new(),
            base_url: None,
            max_tokens: 4096,
            temperature: 0.3,
            length: SummaryLength::Medium,
            max_input_chars: 50_000,
            timeout_secs: 60,
        }
    }
}

impl SummaryConfig {
    /// The model to use, falling back to the provider default.
    pub fn resolved_model(&self) -> &str {
        if self.model.is_empty() {
            self.provider.default_model()
        } else {
            &self.model
        }
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.api_key.is_empty() {
            return Err(SearchError::Config(
                "an API key is required for the summarization provider".into(),
            ));
        }
        if self.max_tokens == 0 {
            return Err(SearchError::Config(
                "max_tokens must be greater than 0".into(),
            ));
        }
        if self.max_input_chars == 0 {
            return Err(SearchError::Config(
                "max_input_chars must be greater than 0".into(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(SearchError::Config(
                "summarization timeout_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Configuration for the enrichment service.
#[derive(Debug, Clone)]
pub struct EnrichConfig {
    /// Maximum extract→summarize units in flight at once.
    pub concurrency: usize,
    /// How many leading hits receive summaries; the rest pass through.
    pub max_summaries: usize,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            concurrency: 5,
            max_summaries: 5,
        }
    }
}

impl EnrichConfig {
    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.concurrency == 0 {
            return Err(SearchError::Config(
                "concurrency must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_search_config_is_valid() {
        let config = SearchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sources.len(), 3);
        assert_eq!(config.cache_ttl_secs, 900);
        assert_eq!(config.source_deadline_secs, 8);
        assert_eq!(config.dedup, DedupPolicy::KeepFirst);
    }

    #[test]
    fn empty_sources_rejected() {
        let config = SearchConfig {
            sources: vec![],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("source"));
    }

    #[test]
    fn zero_max_results_rejected() {
        let config = SearchConfig {
            max_results_per_source: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn inverted_delay_range_rejected() {
        let config = SearchConfig {
            request_delay_ms: (500, 100),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("delay"));
    }

    #[test]
    fn source_kind_names() {
        assert_eq!(SourceKind::GoogleNews.name(), "Google News");
        assert_eq!(SourceKind::BingNews.name(), "Bing News");
        assert_eq!(SourceKind::Wikipedia.to_string(), "Wikipedia");
        assert_eq!(SourceKind::all().len(), 3);
    }

    #[test]
    fn default_render_config_is_valid() {
        let config = RenderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.webdriver_url, "http://localhost:9515");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn zero_render_timeout_rejected() {
        let config = RenderConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn summary_config_requires_api_key() {
        let config = SummaryConfig::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("API key"));

        let config = SummaryConfig {
            api_key: "test-key".into(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn summary_config_resolves_provider_default_model() {
        let config = SummaryConfig {
            provider: LlmProvider::Anthropic,
            ..Default::default()
        };
        assert_eq!(config.resolved_model(), "claude-3-5-haiku-latest");

        let config = SummaryConfig {
            model: "gpt-4o".into(),
            ..Default::default()
        };
        assert_eq!(config.resolved_model(), "gpt-4o");
    }

    #[test]
    fn summary_config_default_ceiling() {
        let config = SummaryConfig::default();
        assert_eq!(config.max_input_chars, 50_000);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn enrich_config_rejects_zero_concurrency() {
        let config = EnrichConfig {
            concurrency: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn enrich_config_defaults() {
        let config = EnrichConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.concurrency, 5);
        assert_eq!(config.max_summaries, 5);
    }
}
