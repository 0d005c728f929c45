//! Similarity Source - content-based candidate generation
//!
//! Generates candidates from the precomputed similarity matrix:
//! "Movies similar to everything you picked"
//!
//! ## Algorithm
//! 1. Resolve every seed title to its catalog row (fail fast on unknown titles)
//! 2. Sum the similarity rows of all seeds, column by column
//! 3. Rank every catalog row by its summed score, highest first, keeping
//!    catalog order among equal scores

use crate::error::{RecommendError, Result};
use crate::types::{Candidate, RankedCandidates};
use data_loader::{Catalog, Dataset, RowIndex, SimilarityMatrix};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Map seed titles to catalog rows, in input order.
///
/// Every title is checked before anything else happens; the first unknown
/// title fails the whole request.
pub fn resolve_seeds<S: AsRef<str>>(catalog: &Catalog, seed_titles: &[S]) -> Result<Vec<RowIndex>> {
    if seed_titles.is_empty() {
        return Err(RecommendError::EmptySeedSet);
    }

    seed_titles
        .iter()
        .map(|title| {
            let title = title.as_ref();
            catalog
                .lookup_title(title)
                .ok_or_else(|| RecommendError::UnknownTitle(title.to_string()))
        })
        .collect()
}

/// Element-wise sum of the similarity rows of `rows`.
///
/// Each column accumulates its seeds in the order given, so the result is
/// identical across runs regardless of how rayon splits the work.
pub fn aggregate(similarity: &SimilarityMatrix, rows: &[RowIndex]) -> Vec<f32> {
    let mut totals = vec![0.0f32; similarity.dimension()];

    for &row in rows {
        totals
            .par_iter_mut()
            .zip(similarity.row(row).par_iter())
            .for_each(|(total, score)| *total += score);
    }

    totals
}

/// Sort key for descending order. NaN sorts last and -0.0 ties with 0.0.
fn descending(a: f32, b: f32) -> Ordering {
    fn key(score: f32) -> f32 {
        if score.is_nan() {
            f32::NEG_INFINITY
        } else {
            score + 0.0
        }
    }
    key(b).total_cmp(&key(a))
}

/// Rank every row by score, highest first.
///
/// The sort is stable: rows with equal scores stay in ascending row order.
pub fn rank(scores: &[f32]) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = scores
        .iter()
        .enumerate()
        .map(|(row, &score)| Candidate::new(row, score))
        .collect();

    candidates.sort_by(|a, b| descending(a.score, b.score));
    candidates
}

/// Candidate source backed by the shared dataset
#[derive(Debug, Clone)]
pub struct SimilaritySource {
    /// Shared reference to the dataset (read-only, so no Mutex needed)
    dataset: Arc<Dataset>,
}

impl SimilaritySource {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    /// Resolve, aggregate and rank for one set of seed titles
    #[instrument(skip(self, seed_titles), fields(seeds = seed_titles.len()))]
    pub fn get_candidates<S: AsRef<str>>(&self, seed_titles: &[S]) -> Result<RankedCandidates> {
        let seed_rows = resolve_seeds(self.dataset.catalog(), seed_titles)?;
        debug!("Resolved seed rows: {:?}", seed_rows);

        let scores = aggregate(self.dataset.similarity(), &seed_rows);
        let candidates = rank(&scores);

        debug!("Ranked {} candidates", candidates.len());
        Ok(RankedCandidates {
            seed_rows,
            candidates,
        })
    }
}
