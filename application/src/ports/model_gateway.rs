//! Model gateway port
//!
//! Defines the interface for a single invocation of the generative
//! model. Implementations (adapters) live in the infrastructure layer
//! and perform no retries of their own — retry policy belongs to the
//! application layer.

use async_trait::async_trait;
use macrolens_domain::{GenerationError, GenerationRequest};
use thiserror::Error;

/// Errors from one model invocation, classified for retry decisions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// Bad or missing credential; retrying cannot help
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Known-transient upstream failure (e.g. a 503)
    #[error("Transient transport error: {0}")]
    Transient(String),

    /// Any other transport failure
    #[error("Transport error: {0}")]
    Fatal(String),
}

impl GatewayError {
    /// Whether this error is worth retrying with backoff
    pub fn is_transient(&self) -> bool {
        matches!(self, GatewayError::Transient(_))
    }
}

impl From<GatewayError> for GenerationError {
    fn from(error: GatewayError) -> Self {
        match error {
            GatewayError::Auth(msg) => GenerationError::Auth(msg),
            GatewayError::Transient(msg) => GenerationError::TransportTransient(msg),
            GatewayError::Fatal(msg) => GenerationError::TransportFatal(msg),
        }
    }
}

/// Gateway for one model invocation
///
/// `generate` sends the request and returns the raw, unstructured
/// response text of a single attempt.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError>;
}
