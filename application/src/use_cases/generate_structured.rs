//! Single-sample structured generation
//!
//! Orchestrates one pipeline: invoke → sanitize → parse → validate →
//! coerce. Transport failures are handled inside the invoker with their
//! own backoff budget. Parse and validation failures cannot be repaired
//! locally, so each one schedules a fresh model invocation, bounded by a
//! second, independent budget (`max_retries + 1` attempts). Coercion
//! never fails, so an attempt that survives validation always succeeds.

use crate::invoker::{ModelInvoker, redacted_preview};
use crate::ports::model_gateway::ModelGateway;
use macrolens_domain::{
    GenerationError, GenerationRequest, Shape, coerce::coerce_tree, sanitize::sanitize,
    validate::{fatal_summary, validate_tree},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Use case producing one coerced result for one request
pub struct GenerateStructuredUseCase<G: ModelGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: ModelGateway + 'static> GenerateStructuredUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Run the pipeline, returning the coerced tree.
    pub async fn execute(
        &self,
        request: &GenerationRequest,
        shape: &Shape,
    ) -> Result<Value, GenerationError> {
        let budget = request.retry.max_retries;
        let mut invoker = ModelInvoker::new(self.gateway.as_ref(), &request.retry);
        let mut last_failure = GenerationError::ParseFailure("no attempt made".to_string());

        for attempt in 0..=budget {
            let raw = invoker.invoke(request).await?;

            let candidate = match sanitize(&raw) {
                Ok(candidate) => candidate,
                Err(e) => {
                    warn!(attempt, "sanitization failed: {e}");
                    last_failure = GenerationError::ParseFailure(e.to_string());
                    continue;
                }
            };

            let tree: Value = match serde_json::from_str(&candidate) {
                Ok(tree) => tree,
                Err(e) => {
                    warn!(
                        attempt,
                        candidate = %redacted_preview(&candidate),
                        "repaired candidate did not parse: {e}"
                    );
                    last_failure = GenerationError::ParseFailure(e.to_string());
                    continue;
                }
            };

            let findings = validate_tree(&tree);
            for finding in findings.iter().filter(|f| !f.is_fatal()) {
                debug!(path = %finding.path, "validation warning: {}", finding.message);
            }
            if let Some(summary) = fatal_summary(&findings) {
                warn!(attempt, "structural validation rejected tree: {summary}");
                last_failure = GenerationError::ValidationFailure(summary);
                continue;
            }

            info!(attempt, "structured generation succeeded");
            return Ok(coerce_tree(&tree, shape));
        }

        Err(last_failure)
    }

    /// Run the pipeline and deserialize the coerced tree into `T`.
    pub async fn execute_typed<T: DeserializeOwned>(
        &self,
        request: &GenerationRequest,
        shape: &Shape,
    ) -> Result<T, GenerationError> {
        let tree = self.execute(request, shape).await?;
        serde_json::from_value(tree)
            .map_err(|e| GenerationError::ValidationFailure(format!("shape/type mismatch: {e}")))
    }
}
