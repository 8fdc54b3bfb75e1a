//! Application layer for macrolens
//!
//! Use cases orchestrating the structured-generation pipeline, and the
//! ports they depend on. Infrastructure adapters implement the ports;
//! the binary wires everything together with explicit dependency
//! injection, so every use case is testable against an in-memory
//! gateway.

pub mod invoker;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod testing;

pub use invoker::ModelInvoker;
pub use ports::model_gateway::{GatewayError, ModelGateway};
pub use use_cases::generate_structured::GenerateStructuredUseCase;
pub use use_cases::run_consensus::RunConsensusUseCase;
