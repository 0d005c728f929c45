//! Pipeline for filtering recommendation candidates.
//!
//! This crate provides:
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//!
//! ## Architecture
//! The engine walks ranked candidates one at a time. For each candidate it
//! fetches metadata, then asks the pipeline whether the candidate may be
//! recommended. Filters only see one candidate at a time, which keeps the
//! number of metadata fetches bounded by how far down the ranking the engine
//! has to go.
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::FilterPipeline;
//! use pipeline::filters::MinimumRatingFilter;
//!
//! let pipeline = FilterPipeline::new()
//!     .add_filter(MinimumRatingFilter::new(6.0));
//!
//! if pipeline.accepts(&candidate, &metadata) {
//!     results.push((candidate, metadata));
//! }
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;

// Re-export main types
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
