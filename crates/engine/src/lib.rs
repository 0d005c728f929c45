//! Engine crate for the movie recommender.
//!
//! This crate contains the engine that coordinates all components
//! of the recommendation flow: candidate generation from the similarity
//! matrix, metadata lookups and filtering.

pub mod orchestrator;
pub mod request;

pub use orchestrator::RecommendationEngine;
pub use request::{DEFAULT_CAP, MovieRecommendation, RecommendationRequest};
pub use sources::RecommendError;
