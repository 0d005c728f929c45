//! Filter implementations for the candidate pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod minimum_rating;

// Re-export for convenience
pub use minimum_rating::MinimumRatingFilter;
