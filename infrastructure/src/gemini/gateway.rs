//! Gemini gateway implementation
//!
//! One `generate` call is one HTTP POST to the `generateContent`
//! endpoint. No retries here — retry policy lives in the application
//! layer. The API key travels in the query string, so request URLs are
//! never logged.

use super::error::{classify_http, classify_message};
use super::protocol::{GenerateContentRequest, GenerateContentResponse};
use async_trait::async_trait;
use macrolens_application::{GatewayError, ModelGateway};
use macrolens_domain::GenerationRequest;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Connection settings for the Gemini gateway
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the endpoint base URL (used by tests and proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// [`ModelGateway`] adapter for the Gemini REST API
pub struct GeminiGateway {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiGateway {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_key
        )
    }
}

#[async_trait]
impl ModelGateway for GeminiGateway {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
        if self.config.api_key.trim().is_empty() {
            return Err(GatewayError::Auth("API key not configured".to_string()));
        }

        let body = GenerateContentRequest::from_domain(request);
        debug!(model = %self.config.model, "sending generateContent request");

        let response = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_message(&e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_http(status.as_u16(), &body));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Fatal(format!("malformed response body: {e}")))?;

        parsed
            .first_candidate_text()
            .ok_or_else(|| GatewayError::Fatal("response contained no candidate text".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macrolens_domain::PromptPayload;

    #[test]
    fn test_endpoint_includes_model_and_key() {
        let gateway = GeminiGateway::new(GeminiConfig::new("k123", "gemini-2.0-flash"));
        assert_eq!(
            gateway.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent?key=k123"
        );
    }

    #[tokio::test]
    async fn test_blank_key_fails_auth_before_any_network_io() {
        let gateway = GeminiGateway::new(GeminiConfig::new("  ", "gemini-2.0-flash"));
        let request = GenerationRequest::new(PromptPayload::text("hello"));

        let result = gateway.generate(&request).await;
        assert!(matches!(result, Err(GatewayError::Auth(_))));
    }
}
