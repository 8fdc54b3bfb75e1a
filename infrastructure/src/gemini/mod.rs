//! Gemini adapter
//!
//! Implements the [`ModelGateway`](macrolens_application::ModelGateway)
//! port against the Gemini `generateContent` REST API.

mod error;
mod gateway;
mod protocol;

pub use gateway::{GeminiConfig, GeminiGateway};
pub use protocol::{GenerateContentRequest, GenerateContentResponse};
