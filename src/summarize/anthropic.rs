//! Anthropic Messages API backend.

use async_trait::async_trait;

use crate::error::{Result, SearchError};

use super::backend::LlmBackend;

/// Backend over the Anthropic Messages API.
#[derive(Debug, Clone)]
pub struct AnthropicBackend {
    api_key: String,
    base_url: String,
    model: String,
    api_version: String,
    client: reqwest::Client,
}

impl AnthropicBackend {
    /// Create a new Anthropic backend.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.anthropic.com".to_string(),
            model: model.into(),
            api_version: "2023-06-01".to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Set the base URL (useful for testing with mock servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the API version header value.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }
}

#[async_trait]
impl LlmBackend for AnthropicBackend {
    fn name(&self) -> &'static str {
        "Anthropic"
    }

    async fn complete(&self, prompt: &str, max_tokens: u32, temperature: f32) -> Result<String> {
        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": max_tokens,
            "temperature": temperature,
            "messages": [{"role": "user", "content": prompt}],
        });

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
            .json(&body)
            .send()
            .await
            .map_err(|e| SearchError::Provider(format!("Anthropic request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Provider(format!(
                "Anthropic returned {status}"
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SearchError::Provider(format!("Anthropic response parse failed: {e}")))?;

        json.pointer("/content/0/text")
            .and_then(|v| v.as_str())
            .map(|s| s.trim().to_owned())
            .ok_or_else(|| {
                SearchError::Provider("Anthropic response missing completion text".into())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn completion_text_extracted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "test-key"))
            .and(header("anthropic-version", "2023-06-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": [{"type": "text", "text": "A tidy summary."}]
            })))
            .mount(&server)
            .await;

        let backend =
            AnthropicBackend::new("test-key", "claude-3-5-haiku-latest").with_base_url(server.uri());
        let text = backend
            .complete("Summarize this.", 4096, 0.3)
            .await
            .expect("should succeed");
        assert_eq!(text, "A tidy summary.");
    }

    #[tokio::test]
    async fn error_status_is_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(529))
            .mount(&server)
            .await;

        let backend =
            AnthropicBackend::new("test-key", "claude-3-5-haiku-latest").with_base_url(server.uri());
        let err = backend.complete("p", 16, 0.0).await.unwrap_err();
        assert!(matches!(err, SearchError::Provider(_)));
    }

    #[tokio::test]
    async fn missing_content_is_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": []
            })))
            .mount(&server)
            .await;

        let backend =
            AnthropicBackend::new("test-key", "claude-3-5-haiku-latest").with_base_url(server.uri());
        let err = backend.complete("p", 16, 0.0).await.unwrap_err();
        assert!(err.to_string().contains("missing completion text"));
    }
}
