//! Generation request value objects
//!
//! A [`GenerationRequest`] bundles everything one structured-generation
//! call needs: the prompt payload (text, optionally with an inline binary
//! attachment for vision flows), sampling parameters, and the retry
//! policy governing transport and parse/validation re-invocations.

use serde::{Deserialize, Serialize};

/// Inline binary attachment for multimodal prompts
///
/// The data is carried base64-encoded, matching how it crosses the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineData {
    /// Base64-encoded payload
    pub data: String,
    /// MIME type (e.g. "image/jpeg")
    pub mime_type: String,
}

/// The prompt part of a generation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromptPayload {
    /// Plain text prompt
    Text(String),
    /// Text prompt plus an inline binary part (vision flows)
    Multimodal { text: String, inline: InlineData },
}

impl PromptPayload {
    /// Create a plain text payload
    pub fn text(prompt: impl Into<String>) -> Self {
        PromptPayload::Text(prompt.into())
    }

    /// Create a text + inline binary payload
    pub fn multimodal(
        prompt: impl Into<String>,
        data: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        PromptPayload::Multimodal {
            text: prompt.into(),
            inline: InlineData {
                data: data.into(),
                mime_type: mime_type.into(),
            },
        }
    }

    /// The text portion of the prompt
    pub fn text_part(&self) -> &str {
        match self {
            PromptPayload::Text(t) => t,
            PromptPayload::Multimodal { text, .. } => text,
        }
    }

    /// The inline binary portion, if any
    pub fn inline_part(&self) -> Option<&InlineData> {
        match self {
            PromptPayload::Text(_) => None,
            PromptPayload::Multimodal { inline, .. } => Some(inline),
        }
    }
}

/// Sampling parameters sent with every model call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.4,
            top_k: 32,
            top_p: 0.95,
            max_output_tokens: 4096,
        }
    }
}

impl GenerationParams {
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = max;
        self
    }
}

/// Retry policy for one logical generation call
///
/// Transport retries and parse/validation re-invocations are budgeted
/// separately, but both use this policy: at most `max_retries + 1`
/// invocations per category, with delay
/// `initial_delay_ms * backoff_multiplier^attempt` between transport
/// attempts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 1000,
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay_ms(mut self, ms: u64) -> Self {
        self.initial_delay_ms = ms;
        self
    }

    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Delay before the retry following `attempt` (0-indexed)
    pub fn delay_for_attempt(&self, attempt: u32) -> std::time::Duration {
        let ms = self.initial_delay_ms as f64 * self.backoff_multiplier.powi(attempt as i32);
        std::time::Duration::from_millis(ms as u64)
    }
}

/// A complete request for one structured generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub payload: PromptPayload,
    pub params: GenerationParams,
    pub retry: RetryPolicy,
}

impl GenerationRequest {
    /// Create a request with default parameters and retry policy
    pub fn new(payload: PromptPayload) -> Self {
        Self {
            payload,
            params: GenerationParams::default(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_backoff_delays_are_exponential() {
        let policy = RetryPolicy::default()
            .with_initial_delay_ms(100)
            .with_backoff_multiplier(2.0);

        assert_eq!(policy.delay_for_attempt(0), Duration::from_millis(100));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(200));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(400));
    }

    #[test]
    fn test_default_policy_matches_documented_defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 3);
        assert_eq!(policy.initial_delay_ms, 1000);
        assert_eq!(policy.backoff_multiplier, 2.0);
    }

    #[test]
    fn test_multimodal_payload_parts() {
        let payload = PromptPayload::multimodal("what is this meal", "aGVsbG8=", "image/jpeg");
        assert_eq!(payload.text_part(), "what is this meal");
        let inline = payload.inline_part().unwrap();
        assert_eq!(inline.mime_type, "image/jpeg");

        assert!(PromptPayload::text("plain").inline_part().is_none());
    }
}
