//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to candidates one at a time.

use metadata::MovieMetadata;
use sources::Candidate;

/// Core trait for filtering candidates.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - Filters judge a single candidate after its metadata has been fetched,
///   so the engine can stop fetching as soon as it has enough results
/// - `Send + Sync` allows filters to be shared by concurrent requests
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Whether the candidate may appear in the result.
    ///
    /// # Arguments
    /// * `candidate` - The ranked catalog row being considered
    /// * `metadata` - Metadata fetched for that row
    fn accept(&self, candidate: &Candidate, metadata: &MovieMetadata) -> bool;
}
