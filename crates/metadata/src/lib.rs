//! Movie metadata lookup.
//!
//! The recommendation engine needs one piece of external data per candidate:
//! its rating, fetched together with the descriptive fields shown to the
//! user (overview, poster, release year, cast, trailer, streaming services).
//! This crate provides:
//! - The [`MetadataProvider`] trait the engine calls once per examined candidate
//! - [`TmdbClient`], which talks to the TMDB HTTP API
//! - [`InMemoryMetadataProvider`], backed by a map or a JSON file

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use data_loader::MovieId;

pub mod memory;
pub mod tmdb;
pub mod types;

pub use memory::InMemoryMetadataProvider;
pub use tmdb::{TmdbClient, TmdbConfig};
pub use types::{CastMember, MovieMetadata, StreamingProvider};

/// Errors that can occur when fetching metadata for one movie
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Metadata service returned status {status} for movie {movie_id}")]
    Status { movie_id: MovieId, status: u16 },

    #[error("No metadata for movie {0}")]
    NotFound(MovieId),

    #[error("Metadata fetch for movie {0} timed out")]
    Timeout(MovieId),

    #[error("Invalid response from metadata service: {0}")]
    InvalidResponse(String),

    #[error("Failed to read metadata file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse metadata: {0}")]
    Json(#[from] serde_json::Error),
}

/// Source of descriptive metadata, keyed by external movie id.
///
/// Implementations may be slow or fail; callers treat every error as a
/// failure of that single movie.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn fetch(&self, movie_id: MovieId) -> Result<MovieMetadata, MetadataError>;
}

#[async_trait]
impl<P: MetadataProvider + ?Sized> MetadataProvider for Arc<P> {
    async fn fetch(&self, movie_id: MovieId) -> Result<MovieMetadata, MetadataError> {
        (**self).fetch(movie_id).await
    }
}
