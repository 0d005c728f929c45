//! Descriptive fields fetched for a recommended movie.

use data_loader::MovieId;
use serde::{Deserialize, Serialize};

pub const DEFAULT_OVERVIEW: &str = "No overview available.";

fn default_overview() -> String {
    DEFAULT_OVERVIEW.to_string()
}

/// Everything the presentation layer shows next to a recommendation.
///
/// Only `rating` is consulted by the recommendation logic itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieMetadata {
    pub movie_id: MovieId,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default = "default_overview")]
    pub overview: String,
    /// Average audience rating on a 0-10 scale
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub release_year: Option<u16>,
    #[serde(default)]
    pub trailer_url: Option<String>,
    #[serde(default)]
    pub streaming_providers: Vec<StreamingProvider>,
    /// Top-billed cast, at most five members
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

impl MovieMetadata {
    /// Metadata with a rating and default values for everything else
    pub fn new(movie_id: MovieId, rating: f32) -> Self {
        Self {
            movie_id,
            poster_url: None,
            overview: default_overview(),
            rating,
            release_year: None,
            trailer_url: None,
            streaming_providers: Vec::new(),
            cast: Vec::new(),
        }
    }
}

/// A subscription service the movie can be streamed on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamingProvider {
    pub name: String,
    pub logo_url: Option<String>,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub name: String,
    pub profile_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_fills_defaults() {
        let metadata: MovieMetadata =
            serde_json::from_str(r#"{ "movie_id": 603, "rating": 8.2 }"#).unwrap();

        assert_eq!(metadata.movie_id, 603);
        assert_eq!(metadata.rating, 8.2);
        assert_eq!(metadata.overview, DEFAULT_OVERVIEW);
        assert!(metadata.cast.is_empty());
        assert!(metadata.trailer_url.is_none());
    }

    #[test]
    fn test_new_uses_defaults() {
        let metadata = MovieMetadata::new(1, 6.5);
        let parsed: MovieMetadata = serde_json::from_str(r#"{"movie_id":1,"rating":6.5}"#).unwrap();
        assert_eq!(metadata, parsed);
    }
}
