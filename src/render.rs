//! Headless page rendering via WebDriver.
//!
//! Loads a URL in a headless Chrome session driven over the WebDriver
//! protocol so client-side-rendered content resolves to its final DOM,
//! then returns the rendered source. Each render uses a fresh session,
//! closed on the way out.

use std::time::Duration;

use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use webdriver::capabilities::Capabilities;

use crate::config::RenderConfig;
use crate::error::{Result, SearchError};
use crate::http;

/// Scroll to the bottom of the page to trigger lazy-loaded content.
const SCROLL_SCRIPT: &str = "window.scrollTo(0, document.body.scrollHeight);";

/// Renders pages in a headless browser session per call.
pub struct PageRenderer {
    config: RenderConfig,
}

impl PageRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render `url` and return the final DOM source.
    ///
    /// The whole render (connect, navigate, settle, scroll, source) is
    /// bounded by the configured timeout.
    ///
    /// # Errors
    ///
    /// [`SearchError::RenderTimeout`] when the deadline lapses;
    /// [`SearchError::FetchFailed`] for WebDriver or navigation failures.
    pub async fn render(&self, url: &str) -> Result<String> {
        let deadline = Duration::from_secs(self.config.timeout_secs);
        match tokio::time::timeout(deadline, self.render_inner(url)).await {
            Ok(result) => result,
            Err(_) => Err(SearchError::RenderTimeout(format!(
                "{url} after {}s",
                self.config.timeout_secs
            ))),
        }
    }

    async fn render_inner(&self, url: &str) -> Result<String> {
        let client = self.connect().await?;
        let outcome = self.capture(&client, url).await;
        // Always try to close the session; the render outcome wins.
        if let Err(err) = client.close().await {
            tracing::debug!(error = %err, "webdriver session close failed");
        }
        outcome
    }

    /// Open a fresh headless session against the configured endpoint.
    async fn connect(&self) -> Result<Client> {
        let mut caps = Capabilities::new();
        let mut args = vec![
            json!("--headless"),
            json!("--disable-gpu"),
            json!("--no-sandbox"),
            json!("--window-size=1280,1024"),
        ];
        let ua = self
            .config
            .user_agent
            .clone()
            .unwrap_or_else(|| http::random_user_agent().to_owned());
        args.push(json!(format!("--user-agent={ua}")));
        caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));

        ClientBuilder::native()
            .capabilities(caps)
            .connect(&self.config.webdriver_url)
            .await
            .map_err(|e| {
                SearchError::FetchFailed(format!(
                    "webdriver connect to {} failed: {e}",
                    self.config.webdriver_url
                ))
            })
    }

    /// Navigate, give dynamic content a moment, nudge lazy loading, and
    /// take the rendered source.
    async fn capture(&self, client: &Client, url: &str) -> Result<String> {
        client
            .goto(url)
            .await
            .map_err(|e| SearchError::FetchFailed(format!("navigation to {url} failed: {e}")))?;

        tokio::time::sleep(Duration::from_millis(self.config.settle_ms)).await;

        if let Err(err) = client.execute(SCROLL_SCRIPT, vec![]).await {
            tracing::debug!(error = %err, "auto-scroll failed; continuing with current DOM");
        }
        tokio::time::sleep(Duration::from_millis(self.config.settle_ms)).await;

        client
            .source()
            .await
            .map_err(|e| SearchError::FetchFailed(format!("reading page source failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_webdriver_is_fetch_failed() {
        let renderer = PageRenderer::new(RenderConfig {
            webdriver_url: "http://127.0.0.1:1".into(),
            timeout_secs: 5,
            settle_ms: 0,
            user_agent: None,
        });
        let result = renderer.render("https://example.com").await;
        assert!(matches!(result, Err(SearchError::FetchFailed(_))));
    }

    #[tokio::test]
    async fn deadline_surfaces_as_render_timeout() {
        // A session endpoint that stalls past the deadline.
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .and(wiremock::matchers::path("/session"))
            .respond_with(
                wiremock::ResponseTemplate::new(500).set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let renderer = PageRenderer::new(RenderConfig {
            webdriver_url: server.uri(),
            timeout_secs: 1,
            settle_ms: 0,
            user_agent: None,
        });
        let result = renderer.render("https://example.com").await;
        assert!(matches!(result, Err(SearchError::RenderTimeout(_))));
    }

    #[tokio::test]
    #[ignore] // Requires a running Chromedriver at localhost:9515
    async fn live_render_returns_dom_source() {
        let renderer = PageRenderer::new(RenderConfig::default());
        let html = renderer
            .render("https://example.com")
            .await
            .expect("live render should work");
        assert!(html.contains("<html"));
    }
}
