//! Infrastructure layer for macrolens
//!
//! Adapters implementing the application ports: the Gemini HTTP gateway
//! and the multi-source configuration loader.

pub mod config;
pub mod gemini;

pub use config::{ConfigLoader, FileConfig};
pub use gemini::{GeminiConfig, GeminiGateway};
