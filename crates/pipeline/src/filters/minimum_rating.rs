//! Filter to ensure minimum quality threshold.
//!
//! Removes movies whose audience rating does not exceed the threshold,
//! ensuring we only recommend well-received titles.

use crate::traits::Filter;
use metadata::MovieMetadata;
use sources::Candidate;

/// Default threshold on TMDB's 0-10 rating scale
pub const DEFAULT_MIN_RATING: f32 = 6.0;

/// Keeps candidates whose rating is strictly greater than `min_rating`.
#[derive(Debug, Clone, Copy)]
pub struct MinimumRatingFilter {
    min_rating: f32,
}

impl MinimumRatingFilter {
    pub fn new(min_rating: f32) -> Self {
        Self { min_rating }
    }

    pub fn min_rating(&self) -> f32 {
        self.min_rating
    }
}

impl Default for MinimumRatingFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_RATING)
    }
}

impl Filter for MinimumRatingFilter {
    fn name(&self) -> &str {
        "MinimumRatingFilter"
    }

    fn accept(&self, _candidate: &Candidate, metadata: &MovieMetadata) -> bool {
        metadata.rating > self.min_rating
    }
}
