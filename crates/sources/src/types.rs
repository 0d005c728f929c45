//! Candidate types shared by the source, the filters and the engine.

use data_loader::RowIndex;
use serde::{Deserialize, Serialize};

/// One catalog row and its aggregated similarity to the seed set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub row: RowIndex,
    pub score: f32,
}

impl Candidate {
    pub fn new(row: RowIndex, score: f32) -> Self {
        Self { row, score }
    }
}

/// Output of candidate generation for one request.
///
/// `candidates` covers the whole catalog, seeds included, ordered by score
/// (highest first, ties in catalog order). Seed exclusion happens later, by
/// title, while the engine walks the list.
#[derive(Debug, Clone, Default)]
pub struct RankedCandidates {
    pub seed_rows: Vec<RowIndex>,
    pub candidates: Vec<Candidate>,
}

impl RankedCandidates {
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }
}
