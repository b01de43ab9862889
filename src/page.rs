//! Page parsing: content-type probe, headless render, text extraction.
//!
//! [`PageExtractor`] is the capability the enrichment service works
//! against; [`WebDriverParser`] is the production implementation. Tests
//! substitute stub extractors.

use async_trait::async_trait;

use crate::config::RenderConfig;
use crate::content::extract_content;
use crate::error::{Result, SearchError};
use crate::http;
use crate::render::PageRenderer;
use crate::types::ExtractedContent;

/// Capability for turning a URL into readable text.
#[async_trait]
pub trait PageExtractor: Send + Sync {
    /// Render the page at `url` and extract its readable content.
    ///
    /// # Errors
    ///
    /// [`SearchError::FetchFailed`], [`SearchError::RenderTimeout`], or
    /// [`SearchError::UnsupportedContent`] — all recoverable per page.
    async fn extract(&self, url: &str) -> Result<ExtractedContent>;
}

/// Production extractor: probe, render in headless Chrome, extract text.
pub struct WebDriverParser {
    renderer: PageRenderer,
    probe_client: reqwest::Client,
}

impl WebDriverParser {
    pub fn new(config: RenderConfig) -> Result<Self> {
        config.validate()?;
        let probe_client = http::build_client(config.timeout_secs, config.user_agent.as_deref())
            .map_err(|e| SearchError::Config(format!("probe client: {e}")))?;
        Ok(Self {
            renderer: PageRenderer::new(config),
            probe_client,
        })
    }

    /// Check the payload type before paying for a render.
    ///
    /// A reachable URL with a non-HTML `Content-Type` is refused. Servers
    /// that reject `HEAD` outright are given the benefit of the doubt and
    /// proceed to the render.
    async fn probe(&self, url: &str) -> Result<()> {
        let response = match self.probe_client.head(url).send().await {
            Ok(response) => response,
            Err(e) => {
                return Err(SearchError::FetchFailed(format!(
                    "probe of {url} failed: {e}"
                )))
            }
        };

        let status = response.status();
        if status == reqwest::StatusCode::METHOD_NOT_ALLOWED
            || status == reqwest::StatusCode::NOT_IMPLEMENTED
        {
            tracing::debug!(url, %status, "HEAD not supported; skipping probe");
            return Ok(());
        }
        if status.is_client_error() || status.is_server_error() {
            return Err(SearchError::FetchFailed(format!("{url} returned {status}")));
        }

        if let Some(content_type) = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            let essence = content_type.split(';').next().unwrap_or("").trim();
            if !essence.is_empty() && !essence.contains("html") {
                return Err(SearchError::UnsupportedContent(essence.to_owned()));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl PageExtractor for WebDriverParser {
    async fn extract(&self, url: &str) -> Result<ExtractedContent> {
        self.probe(url).await?;
        let html = self.renderer.render(url).await?;
        extract_content(&html, url)
    }
}
