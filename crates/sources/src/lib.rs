//! # Sources Crate
//!
//! This crate implements candidate generation for movie recommendations.
//!
//! ## Similarity Source
//! Content-based ranking over a precomputed similarity matrix:
//! - Resolve the user's favorite titles to catalog rows
//! - Sum their similarity rows into one score per catalog movie
//! - Rank the whole catalog by that score
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::SimilaritySource;
//! use data_loader::Dataset;
//! use std::sync::Arc;
//!
//! let dataset = Arc::new(Dataset::load_from_files(Path::new("data"))?);
//! let source = SimilaritySource::new(dataset.clone());
//!
//! let ranked = source.get_candidates(&["Avatar", "Titanic"])?;
//! for candidate in ranked.iter().take(10) {
//!     println!("{:?}", candidate);
//! }
//! ```

// Public modules
pub mod error;
pub mod similarity;
pub mod types;

// Re-export commonly used types
pub use error::RecommendError;
pub use similarity::{aggregate, rank, resolve_seeds, SimilaritySource};
pub use types::{Candidate, RankedCandidates};
