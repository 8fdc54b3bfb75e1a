//! In-memory gateway for use-case tests

use crate::ports::model_gateway::{GatewayError, ModelGateway};
use async_trait::async_trait;
use macrolens_domain::GenerationRequest;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

/// A gateway that replays a scripted sequence of responses.
///
/// Once the script is exhausted it either repeats the configured
/// fallback (see [`ScriptedGateway::always`]) or fails fatally.
pub struct ScriptedGateway {
    script: Mutex<VecDeque<Result<String, GatewayError>>>,
    repeat: Option<Result<String, GatewayError>>,
    calls: AtomicU32,
}

impl ScriptedGateway {
    pub fn new(script: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            repeat: None,
            calls: AtomicU32::new(0),
        }
    }

    /// A gateway that returns the same error on every call.
    pub fn always(error: GatewayError) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            repeat: Some(Err(error)),
            calls: AtomicU32::new(0),
        }
    }

    /// A gateway that returns the same response on every call.
    pub fn always_ok(response: impl Into<String>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            repeat: Some(Ok(response.into())),
            calls: AtomicU32::new(0),
        }
    }

    /// Total number of `generate` calls observed.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelGateway for ScriptedGateway {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(next) = self.script.lock().unwrap().pop_front() {
            return next;
        }

        match &self.repeat {
            Some(result) => result.clone(),
            None => Err(GatewayError::Fatal("script exhausted".to_string())),
        }
    }
}
