//! Interactive search CLI.
//!
//! Reads queries from stdin in a loop, runs the search pipeline, and
//! prints the resulting report as pretty JSON. Configuration comes from
//! environment variables; the library itself never reads the
//! environment.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use currents::{
    ContentSummarizer, EnrichConfig, LlmProvider, RenderConfig, ResultCache, SearchAggregator,
    SearchConfig, SearchReport, SummarizationService, SummaryConfig, WebDriverParser,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let search_config = search_config_from_env();
    let cache = ResultCache::new(Duration::from_secs(search_config.cache_ttl_secs));
    let aggregator = SearchAggregator::new(search_config, cache)
        .map_err(|e| anyhow::anyhow!("invalid search configuration: {e}"))?;

    // Built on first use so search-only sessions never need an API key
    // or a WebDriver endpoint.
    let mut enrichment: Option<SummarizationService> = None;

    loop {
        let Some(query) = prompt_line("Enter search query: ") else {
            break;
        };
        let query = query.trim().to_string();
        if query.is_empty() {
            println!("No query entered. Try again or type 'q' to quit.");
            continue;
        }
        if matches!(query.to_lowercase().as_str(), "q" | "quit" | "exit") {
            println!("Goodbye.");
            break;
        }

        let include_summaries = prompt_line("Include AI summaries? (y/n): ")
            .map(|answer| matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
            .unwrap_or(false);
        let max_summaries = if include_summaries {
            prompt_line("Enter maximum number of summaries: ")
                .and_then(|raw| raw.trim().parse::<usize>().ok())
                .unwrap_or(5)
        } else {
            0
        };

        match run_query(&aggregator, &mut enrichment, &query, include_summaries, max_summaries)
            .await
        {
            Ok(report) => {
                println!("Search Results:");
                println!("{}", serde_json::to_string_pretty(&report.to_json())?);
            }
            Err(err) => println!("Search failed: {err}"),
        }
    }

    Ok(())
}

/// Run one query end to end, enriching when requested and possible.
async fn run_query(
    aggregator: &SearchAggregator,
    enrichment: &mut Option<SummarizationService>,
    query: &str,
    include_summaries: bool,
    max_summaries: usize,
) -> currents::Result<SearchReport> {
    let hits = aggregator.search(query).await?;

    if !include_summaries || hits.is_empty() {
        return Ok(SearchReport {
            query: query.to_string(),
            summaries_generated: false,
            results: hits.into_iter().map(currents::EnrichedResult::bare).collect(),
        });
    }

    if enrichment.is_none() {
        match build_enrichment() {
            Ok(service) => *enrichment = Some(service),
            Err(err) => {
                println!("Summaries unavailable: {err}");
                return Ok(SearchReport {
                    query: query.to_string(),
                    summaries_generated: false,
                    results: hits.into_iter().map(currents::EnrichedResult::bare).collect(),
                });
            }
        }
    }
    let service = enrichment
        .as_ref()
        .ok_or_else(|| currents::SearchError::Config("enrichment unavailable".into()))?;

    let results = service.enrich_limited(hits, max_summaries).await?;
    Ok(SearchReport {
        query: query.to_string(),
        summaries_generated: true,
        results,
    })
}

/// Assemble the enrichment service from environment configuration.
fn build_enrichment() -> currents::Result<SummarizationService> {
    let render_config = RenderConfig {
        webdriver_url: env_string("CURRENTS_WEBDRIVER_URL", "http://localhost:9515"),
        timeout_secs: env_u64("CURRENTS_RENDER_TIMEOUT_SECS", 30),
        ..Default::default()
    };
    let parser = WebDriverParser::new(render_config)?;

    let provider = match env_string("CURRENTS_LLM_PROVIDER", "openai").to_lowercase().as_str() {
        "anthropic" => LlmProvider::Anthropic,
        _ => LlmProvider::OpenAi,
    };
    let key_var = match provider {
        LlmProvider::OpenAi => "OPENAI_API_KEY",
        LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
    };
    let summary_config = SummaryConfig {
        provider,
        api_key: std::env::var(key_var).unwrap_or_default(),
        model: env_string("CURRENTS_MODEL", ""),
        max_input_chars: env_u64("CURRENTS_MAX_INPUT_CHARS", 50_000) as usize,
        timeout_secs: env_u64("CURRENTS_SUMMARIZE_TIMEOUT_SECS", 60),
        ..Default::default()
    };
    let summarizer = ContentSummarizer::new(summary_config)?;

    let enrich_config = EnrichConfig {
        concurrency: env_u64("CURRENTS_CONCURRENCY", 5) as usize,
        ..Default::default()
    };
    SummarizationService::new(enrich_config, Arc::new(parser), summarizer)
}

fn search_config_from_env() -> SearchConfig {
    SearchConfig {
        source_deadline_secs: env_u64("CURRENTS_SOURCE_DEADLINE_SECS", 8),
        cache_ttl_secs: env_u64("CURRENTS_CACHE_TTL_SECS", 900),
        max_results_per_source: env_u64("CURRENTS_MAX_RESULTS_PER_SOURCE", 5) as usize,
        ..Default::default()
    }
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

/// Print a prompt and read one line. Returns `None` on EOF.
fn prompt_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    std::io::stdout().flush().ok()?;
    let mut line = String::new();
    match std::io::stdin().read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line),
        Err(_) => None,
    }
}
