//! Multi-sample consensus generation
//!
//! Runs k independent single-sample pipelines concurrently for the same
//! request and reconciles the survivors into one result. Samples share
//! no mutable state; each carries its own retry budgets and logs
//! independently. A sample that fails after exhausting its budgets is
//! simply discarded — consensus only fails when every sample does.

use crate::ports::model_gateway::ModelGateway;
use crate::use_cases::generate_structured::GenerateStructuredUseCase;
use macrolens_domain::{
    GenerationError, GenerationRequest, Shape,
    consensus::{ConsensusOutcome, MergePlan, merge_candidates},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Use case reconciling k concurrent samples into one result
pub struct RunConsensusUseCase<G: ModelGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: ModelGateway + 'static> RunConsensusUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Run `samples` pipelines and merge the survivors.
    pub async fn execute(
        &self,
        request: &GenerationRequest,
        shape: &Shape,
        plan: &MergePlan,
        samples: usize,
    ) -> Result<ConsensusOutcome, GenerationError> {
        let samples = samples.max(1);
        info!(samples, "starting consensus generation");

        let mut join_set = JoinSet::new();

        for index in 0..samples {
            let gateway = Arc::clone(&self.gateway);
            let request = request.clone();
            let shape = shape.clone();

            join_set.spawn(async move {
                let pipeline = GenerateStructuredUseCase::new(gateway);
                let result = pipeline.execute(&request, &shape).await;
                (index, result)
            });
        }

        // Survivors kept in sample order so ties resolve deterministically
        let mut slots: Vec<Option<Value>> = vec![None; samples];

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, Ok(value))) => {
                    info!(sample = index, "sample succeeded");
                    slots[index] = Some(value);
                }
                Ok((index, Err(e))) => {
                    warn!(sample = index, "sample failed: {e}");
                }
                Err(e) => {
                    warn!("sample task join error: {e}");
                }
            }
        }

        let survivors: Vec<Value> = slots.into_iter().flatten().collect();

        merge_candidates(&survivors, plan)
            .ok_or(GenerationError::ConsensusFailure(samples))
            .inspect(|outcome| {
                info!(
                    survivors = survivors.len(),
                    primary = outcome.primary_index,
                    breakdown = outcome.breakdown_len,
                    aggregation = ?outcome.aggregation,
                    "consensus reached"
                )
            })
    }

    /// Run consensus and deserialize the merged result into `T`.
    pub async fn execute_typed<T: DeserializeOwned>(
        &self,
        request: &GenerationRequest,
        shape: &Shape,
        plan: &MergePlan,
        samples: usize,
    ) -> Result<T, GenerationError> {
        let outcome = self.execute(request, shape, plan, samples).await?;
        serde_json::from_value(outcome.merged)
            .map_err(|e| GenerationError::ValidationFailure(format!("shape/type mismatch: {e}")))
    }
}
