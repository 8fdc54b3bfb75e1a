//! Use cases

pub mod generate_structured;
pub mod run_consensus;

pub use generate_structured::GenerateStructuredUseCase;
pub use run_consensus::RunConsensusUseCase;
