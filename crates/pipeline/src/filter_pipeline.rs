//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::traits::Filter;
use metadata::MovieMetadata;
use sources::Candidate;

/// Chains multiple filters together; a candidate must pass all of them.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(MinimumRatingFilter::new(6.0));
///
/// if pipeline.accepts(&candidate, &metadata) { ... }
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Name of the first filter that rejects the candidate, if any.
    ///
    /// Filters run in the order they were added and stop at the first
    /// rejection.
    pub fn rejected_by(&self, candidate: &Candidate, metadata: &MovieMetadata) -> Option<&str> {
        self.filters
            .iter()
            .find(|filter| !filter.accept(candidate, metadata))
            .map(|filter| filter.name())
    }

    /// Whether every filter accepts the candidate
    pub fn accepts(&self, candidate: &Candidate, metadata: &MovieMetadata) -> bool {
        match self.rejected_by(candidate, metadata) {
            Some(name) => {
                tracing::debug!(
                    "Candidate row {} (movie {}) rejected by {}",
                    candidate.row,
                    metadata.movie_id,
                    name
                );
                false
            }
            None => true,
        }
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
