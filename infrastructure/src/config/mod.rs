//! Configuration loading

mod file_config;
mod loader;

pub use file_config::{ConsensusSection, FileConfig, GenerationSection, RetrySection};
pub use loader::ConfigLoader;
