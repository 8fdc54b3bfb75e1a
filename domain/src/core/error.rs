//! Domain error taxonomy
//!
//! Every failure surfaced to a feature caller is one of these kinds, so
//! callers can distinguish credential problems from transport flakiness
//! from a model that simply refuses to produce parseable JSON.

use thiserror::Error;

/// Classified generation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// Bad or missing credential. Never retried.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Transient transport failure (e.g. a 503). Retried with backoff;
    /// only surfaced once the transport retry budget is exhausted.
    #[error("Transient transport error: {0}")]
    TransportTransient(String),

    /// Non-transient transport failure. Surfaced immediately.
    #[error("Transport error: {0}")]
    TransportFatal(String),

    /// No JSON could be extracted from the response, or the extracted
    /// candidate failed to parse, on every attempt.
    #[error("Could not parse model output as JSON: {0}")]
    ParseFailure(String),

    /// The parsed tree was structurally rejected on every attempt.
    #[error("Model output failed structural validation: {0}")]
    ValidationFailure(String),

    /// Every consensus sample failed.
    #[error("All {0} consensus samples failed")]
    ConsensusFailure(usize),

    /// The operation was cancelled by the caller.
    #[error("Operation cancelled")]
    Cancelled,
}

impl GenerationError {
    /// Whether retrying the model invocation could plausibly help.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerationError::TransportTransient(_)
                | GenerationError::ParseFailure(_)
                | GenerationError::ValidationFailure(_)
        )
    }

    /// Check if this error represents a credential problem
    pub fn is_auth(&self) -> bool {
        matches!(self, GenerationError::Auth(_))
    }

    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, GenerationError::Cancelled)
    }
}
