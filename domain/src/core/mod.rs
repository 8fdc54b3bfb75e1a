//! Core domain primitives

pub mod error;

pub use error::GenerationError;
