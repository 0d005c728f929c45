//! In-memory metadata provider.
//!
//! Serves metadata from a map, either built in code or loaded from a JSON
//! file holding an array of [`MovieMetadata`]. Used for offline runs of the
//! CLI and as a deterministic provider in tests.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;

use crate::types::MovieMetadata;
use crate::{MetadataError, MetadataProvider};
use data_loader::MovieId;

#[derive(Debug, Clone, Default)]
pub struct InMemoryMetadataProvider {
    entries: HashMap<MovieId, MovieMetadata>,
}

impl InMemoryMetadataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry (builder pattern)
    pub fn with(mut self, metadata: MovieMetadata) -> Self {
        self.insert(metadata);
        self
    }

    /// Add or replace the entry for `metadata.movie_id`
    pub fn insert(&mut self, metadata: MovieMetadata) {
        self.entries.insert(metadata.movie_id, metadata);
    }

    /// Load a JSON array of metadata records
    pub async fn from_json_file(path: &Path) -> Result<Self, MetadataError> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self, MetadataError> {
        let records: Vec<MovieMetadata> = serde_json::from_str(content)?;
        Ok(records.into_iter().fold(Self::new(), Self::with))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl MetadataProvider for InMemoryMetadataProvider {
    async fn fetch(&self, movie_id: MovieId) -> Result<MovieMetadata, MetadataError> {
        self.entries
            .get(&movie_id)
            .cloned()
            .ok_or(MetadataError::NotFound(movie_id))
    }
}
