//! Shared HTTP client construction with User-Agent rotation.
//!
//! Provides configured [`reqwest::Client`] values with browser-like
//! headers, cookie support, and rotating User-Agent strings for the feed
//! and API requests the pipeline makes outside the headless renderer.

use crate::error::{Result, SearchError};
use rand::seq::SliceRandom;
use std::time::Duration;

/// Realistic browser User-Agent strings, rotated per client.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
];

/// Build a [`reqwest::Client`] for feed/API requests.
///
/// The client has a cookie store, the given request timeout, a random
/// User-Agent from the rotation list (or the custom one when provided),
/// limited redirects, and gzip/brotli decompression.
///
/// # Errors
///
/// Returns [`SearchError::SourceUnavailable`] if the client cannot be
/// constructed.
pub fn build_client(timeout_secs: u64, user_agent: Option<&str>) -> Result<reqwest::Client> {
    let ua = match user_agent {
        Some(custom) => custom.to_owned(),
        None => random_user_agent().to_owned(),
    };

    reqwest::Client::builder()
        .cookie_store(true)
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::SourceUnavailable(format!("failed to build HTTP client: {e}")))
}

/// Select a random User-Agent string from the rotation list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

/// Sleep for a random duration inside the configured jitter range.
///
/// Spreads concurrent source requests over time to avoid burst rate
/// limiting. A `(0, 0)` range returns immediately.
pub async fn request_jitter(delay_ms: (u64, u64)) {
    let (min, max) = delay_ms;
    if max == 0 {
        return;
    }
    let delay = if min == max {
        min
    } else {
        rand::Rng::gen_range(&mut rand::thread_rng(), min..=max)
    };
    tokio::time::sleep(Duration::from_millis(delay)).await;
}
