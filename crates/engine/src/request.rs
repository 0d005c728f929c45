//! Request and response types for the recommendation engine.

use data_loader::{MovieId, RowIndex};
use metadata::MovieMetadata;
use pipeline::filters::minimum_rating::DEFAULT_MIN_RATING;
use serde::{Deserialize, Serialize};

/// Default number of recommendations returned per request
pub const DEFAULT_CAP: usize = 5;

/// What the caller asks for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// Favorite titles, matched exactly against the catalog
    pub seed_titles: Vec<String>,
    /// Maximum number of recommendations
    pub cap: usize,
    /// Candidates need a rating strictly above this value
    pub rating_threshold: f32,
}

impl RecommendationRequest {
    pub fn new<I, S>(seed_titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            seed_titles: seed_titles.into_iter().map(Into::into).collect(),
            cap: DEFAULT_CAP,
            rating_threshold: DEFAULT_MIN_RATING,
        }
    }

    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_rating_threshold(mut self, rating_threshold: f32) -> Self {
        self.rating_threshold = rating_threshold;
        self
    }
}

/// Final recommendation returned to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecommendation {
    pub title: String,
    pub movie_id: MovieId,
    pub row: RowIndex,
    /// Summed similarity to the seed set
    pub score: f32,
    pub metadata: MovieMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = RecommendationRequest::new(["Avatar"]);
        assert_eq!(request.seed_titles, vec!["Avatar".to_string()]);
        assert_eq!(request.cap, 5);
        assert_eq!(request.rating_threshold, 6.0);
    }

    #[test]
    fn test_request_builder() {
        let request = RecommendationRequest::new(vec!["A".to_string(), "B".to_string()])
            .with_cap(10)
            .with_rating_threshold(7.5);

        assert_eq!(request.seed_titles.len(), 2);
        assert_eq!(request.cap, 10);
        assert_eq!(request.rating_threshold, 7.5);
    }
}
