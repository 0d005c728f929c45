//! # Recommendation Engine
//!
//! This module coordinates the entire recommendation flow:
//! 1. Resolve seed titles to catalog rows
//! 2. Aggregate the seeds' similarity rows and rank the catalog
//! 3. Walk the ranking, skipping seeds and titles already recommended
//! 4. Fetch metadata for each remaining candidate and apply the filters
//! 5. Stop as soon as `cap` recommendations have been collected
//!
//! Metadata fetches are awaited one at a time, in ranked order, so a request
//! never fetches more candidates than it needs to fill the result.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use data_loader::{Dataset, MovieId};
use metadata::{MetadataError, MetadataProvider, MovieMetadata};
use pipeline::FilterPipeline;
use pipeline::filters::MinimumRatingFilter;
use sources::{Candidate, RecommendError, SimilaritySource};

use crate::request::{MovieRecommendation, RecommendationRequest};

/// Main engine that coordinates candidate generation, metadata and filtering
#[derive(Clone)]
pub struct RecommendationEngine {
    dataset: Arc<Dataset>,
    source: SimilaritySource,
    metadata: Arc<dyn MetadataProvider>,
    fetch_timeout: Option<Duration>,
}

impl RecommendationEngine {
    /// Create an engine over a loaded dataset
    ///
    /// # Arguments
    /// * `dataset` - Shared, read-only catalog and similarity matrix
    /// * `metadata` - Provider queried once per examined candidate
    pub fn new(dataset: Arc<Dataset>, metadata: impl MetadataProvider + 'static) -> Self {
        Self::with_provider(dataset, Arc::new(metadata))
    }

    /// Create an engine around a provider that is already shared
    pub fn with_provider(dataset: Arc<Dataset>, metadata: Arc<dyn MetadataProvider>) -> Self {
        let source = SimilaritySource::new(dataset.clone());
        Self {
            dataset,
            source,
            metadata,
            fetch_timeout: None,
        }
    }

    /// Give up on a single candidate's metadata after `timeout`
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    /// Main entry point: get recommendations for a set of favorite titles
    ///
    /// # Returns
    /// Up to `request.cap` recommendations, best first. An empty vector means
    /// no candidate passed the filters; it is not an error.
    ///
    /// # Errors
    /// `EmptySeedSet` or `UnknownTitle`, detected before any ranking or
    /// metadata work.
    pub async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<MovieRecommendation>, RecommendError> {
        let start_time = Instant::now();

        let ranked = self.source.get_candidates(request.seed_titles.as_slice())?;
        info!(
            "Ranked {} candidates for {} seed titles",
            ranked.len(),
            ranked.seed_rows.len()
        );

        let filters = FilterPipeline::new()
            .add_filter(MinimumRatingFilter::new(request.rating_threshold));

        let recommendations = self
            .select_top(&ranked.candidates, request.seed_titles.as_slice(), request.cap, &filters)
            .await;

        if recommendations.is_empty() {
            info!(
                "No candidate rated above {} for seeds {:?}",
                request.rating_threshold, request.seed_titles
            );
        }

        info!(
            "Selected {} recommendations in {:.2?}",
            recommendations.len(),
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    /// Recommendations for a single movie with default settings
    pub async fn similar_to(
        &self,
        title: &str,
    ) -> Result<Vec<MovieRecommendation>, RecommendError> {
        self.recommend(&RecommendationRequest::new([title])).await
    }

    /// Recommendations for several favorites with default settings
    pub async fn personalized<S: AsRef<str>>(
        &self,
        titles: &[S],
    ) -> Result<Vec<MovieRecommendation>, RecommendError> {
        let request = RecommendationRequest::new(titles.iter().map(|t| t.as_ref().to_string()));
        self.recommend(&request).await
    }

    /// Walk ranked candidates and keep the first `cap` that qualify.
    ///
    /// For each candidate, in order:
    /// 1. Skip it if its title is a seed title
    /// 2. Skip it if its title was already selected
    /// 3. Fetch metadata; a failed fetch skips only this candidate
    /// 4. Skip it unless every filter accepts it
    /// 5. Stop once `cap` recommendations are collected
    pub async fn select_top<S: AsRef<str>>(
        &self,
        ranked: &[Candidate],
        seed_titles: &[S],
        cap: usize,
        filters: &FilterPipeline,
    ) -> Vec<MovieRecommendation> {
        let catalog = self.dataset.catalog();
        let seeds: HashSet<&str> = seed_titles.iter().map(|t| t.as_ref()).collect();
        let mut added: HashSet<&str> = HashSet::new();
        let mut recommendations = Vec::with_capacity(cap);

        let mut examined = 0usize;
        let mut failed = 0usize;

        for candidate in ranked {
            if recommendations.len() >= cap {
                break;
            }

            let Some(entry) = catalog.get(candidate.row) else {
                warn!("Ranked row {} is not in the catalog", candidate.row);
                continue;
            };
            let title = entry.title.as_str();

            if seeds.contains(title) || added.contains(title) {
                continue;
            }

            examined += 1;
            let metadata = match self.fetch_metadata(entry.movie_id).await {
                Ok(metadata) => metadata,
                Err(e) => {
                    failed += 1;
                    warn!(
                        movie_id = entry.movie_id,
                        error = %e,
                        "Skipping '{}': metadata fetch failed", title
                    );
                    continue;
                }
            };

            if !filters.accepts(candidate, &metadata) {
                continue;
            }

            debug!(
                "Selected '{}' (score {:.3}, rating {:.1})",
                title, candidate.score, metadata.rating
            );
            added.insert(title);
            recommendations.push(MovieRecommendation {
                title: entry.title.clone(),
                movie_id: entry.movie_id,
                row: candidate.row,
                score: candidate.score,
                metadata,
            });
        }

        info!(
            "Examined {} candidates ({} fetch failures), selected {}",
            examined,
            failed,
            recommendations.len()
        );
        recommendations
    }

    async fn fetch_metadata(&self, movie_id: MovieId) -> Result<MovieMetadata, MetadataError> {
        let fetch = self.metadata.fetch(movie_id);
        match self.fetch_timeout {
            Some(limit) => tokio::time::timeout(limit, fetch)
                .await
                .unwrap_or(Err(MetadataError::Timeout(movie_id))),
            None => fetch.await,
        }
    }
}
