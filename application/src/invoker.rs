//! Model invoker with bounded backoff retries
//!
//! Wraps the [`ModelGateway`] port with the transport retry policy:
//! transient failures are retried with exponential backoff (delay =
//! `initial_delay * multiplier^attempt`); auth and fatal failures
//! surface immediately. The transient budget is carried across calls so
//! one logical pipeline never exceeds `max_retries` transport retries in
//! total, even when parse failures force fresh invocations.

use crate::ports::model_gateway::{GatewayError, ModelGateway};
use macrolens_domain::{GenerationRequest, RetryPolicy};
use tokio::time::sleep;
use tracing::{debug, warn};

/// Retrying invoker over a gateway, scoped to one logical call
pub struct ModelInvoker<'a, G: ModelGateway> {
    gateway: &'a G,
    policy: &'a RetryPolicy,
    transient_used: u32,
}

impl<'a, G: ModelGateway> ModelInvoker<'a, G> {
    pub fn new(gateway: &'a G, policy: &'a RetryPolicy) -> Self {
        Self {
            gateway,
            policy,
            transient_used: 0,
        }
    }

    /// How many transient retries this invoker has performed so far
    pub fn transient_retries_used(&self) -> u32 {
        self.transient_used
    }

    /// Invoke the model once, retrying transient transport failures
    /// within the remaining budget.
    pub async fn invoke(&mut self, request: &GenerationRequest) -> Result<String, GatewayError> {
        loop {
            match self.gateway.generate(request).await {
                Ok(raw) => {
                    debug!(preview = %redacted_preview(&raw), "model responded");
                    return Ok(raw);
                }
                Err(e) if e.is_transient() && self.transient_used < self.policy.max_retries => {
                    let delay = self.policy.delay_for_attempt(self.transient_used);
                    warn!(
                        attempt = self.transient_used + 1,
                        delay_ms = delay.as_millis() as u64,
                        "transient transport error, backing off: {e}"
                    );
                    self.transient_used += 1;
                    sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// First ~100 characters of a response, for observability without
/// logging entire payloads. Never used for credentials.
pub fn redacted_preview(text: &str) -> String {
    let mut preview: String = text.chars().take(100).collect();
    if preview.len() < text.len() {
        preview.push('…');
    }
    preview
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedGateway;
    use macrolens_domain::PromptPayload;
    use std::time::Instant;

    fn request(policy: RetryPolicy) -> GenerationRequest {
        GenerationRequest::new(PromptPayload::text("2 chapatis and dal")).with_retry(policy)
    }

    #[tokio::test]
    async fn test_all_transient_performs_max_retries_plus_one_attempts() {
        let gateway = ScriptedGateway::always(GatewayError::Transient("503 unavailable".into()));
        let policy = RetryPolicy::default()
            .with_max_retries(3)
            .with_initial_delay_ms(1);

        let mut invoker = ModelInvoker::new(&gateway, &policy);
        let result = invoker.invoke(&request(policy.clone())).await;

        assert!(matches!(result, Err(GatewayError::Transient(_))));
        assert_eq!(gateway.calls(), 4);
    }

    #[tokio::test]
    async fn test_auth_error_stops_immediately() {
        let gateway = ScriptedGateway::always(GatewayError::Auth("API key missing".into()));
        let policy = RetryPolicy::default().with_initial_delay_ms(1);

        let mut invoker = ModelInvoker::new(&gateway, &policy);
        let result = invoker.invoke(&request(policy.clone())).await;

        assert!(matches!(result, Err(GatewayError::Auth(_))));
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn test_backoff_delays_accumulate() {
        let gateway = ScriptedGateway::new(vec![
            Err(GatewayError::Transient("503 try later".into())),
            Err(GatewayError::Transient("503 try later".into())),
            Ok("{\"ok\": 1}".to_string()),
        ]);
        let policy = RetryPolicy::default().with_initial_delay_ms(20);

        let started = Instant::now();
        let mut invoker = ModelInvoker::new(&gateway, &policy);
        let result = invoker.invoke(&request(policy.clone())).await;

        assert!(result.is_ok());
        assert_eq!(gateway.calls(), 3);
        // delay(0) + delay(1) = 20ms + 40ms
        assert!(started.elapsed() >= std::time::Duration::from_millis(60));
    }

    #[tokio::test]
    async fn test_budget_is_shared_across_invocations() {
        let gateway = ScriptedGateway::new(vec![
            Err(GatewayError::Transient("503".into())),
            Ok("first".to_string()),
            Err(GatewayError::Transient("503".into())),
            Err(GatewayError::Transient("503".into())),
        ]);
        let policy = RetryPolicy::default()
            .with_max_retries(2)
            .with_initial_delay_ms(1);

        let mut invoker = ModelInvoker::new(&gateway, &policy);
        assert!(invoker.invoke(&request(policy.clone())).await.is_ok());
        assert_eq!(invoker.transient_retries_used(), 1);

        // Only one transient retry remains for the second invocation
        let result = invoker.invoke(&request(policy.clone())).await;
        assert!(matches!(result, Err(GatewayError::Transient(_))));
        assert_eq!(gateway.calls(), 4);
    }

    #[test]
    fn test_redacted_preview_truncates() {
        let long = "x".repeat(250);
        let preview = redacted_preview(&long);
        assert_eq!(preview.chars().count(), 101);
        assert!(preview.ends_with('…'));
        assert_eq!(redacted_preview("short"), "short");
    }
}
