//! Domain layer for macrolens
//!
//! This crate contains the core business logic for turning unreliable
//! free-text model output into validated, strongly-typed domain data.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Sanitize → Validate → Coerce
//!
//! A generative model returns prose-wrapped, sometimes malformed "JSON".
//! The domain pipeline repairs the text into a parse candidate
//! ([`sanitize`]), rejects structurally broken trees ([`validate`]), and
//! maps what survives onto a declarative [`shape::Shape`] with safe
//! defaults ([`coerce`]).
//!
//! ## Consensus
//!
//! Some flows generate several independent samples for the same request
//! and reconcile them into one confident result ([`consensus`]).

pub mod coerce;
pub mod consensus;
pub mod core;
pub mod nutrition;
pub mod prompt;
pub mod request;
pub mod sanitize;
pub mod shape;
pub mod validate;
pub mod workout;

// Re-export commonly used types
pub use coerce::{coerce_tree, coerce_typed};
pub use consensus::{ConsensusOutcome, MergePlan, merge_candidates};
pub use crate::core::error::GenerationError;
pub use nutrition::{FoodItem, ItemBreakdown, MealAnalysis, NutritionInfo};
pub use prompt::PromptTemplate;
pub use request::{GenerationParams, GenerationRequest, InlineData, PromptPayload, RetryPolicy};
pub use sanitize::{SanitizeError, sanitize};
pub use shape::{FieldKind, FieldSpec, Shape};
pub use validate::{Finding, Severity, validate_tree};
pub use workout::{Exercise, WorkoutDay, WorkoutPlan};
