//! Core domain types for the movie catalog and similarity matrix.
//!
//! Both structures are built once at startup and never mutated afterwards,
//! so they can be shared across requests behind an `Arc` without locking.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{DataLoadError, Result};

// =============================================================================
// Type Aliases
// =============================================================================

/// Position of a movie in the catalog, and therefore its row (and column)
/// in the similarity matrix
pub type RowIndex = usize;

/// External identifier used to query the metadata provider (a TMDB id)
pub type MovieId = u32;

// =============================================================================
// Catalog
// =============================================================================

/// One movie of the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub title: String,
    pub row_index: RowIndex,
    pub movie_id: MovieId,
}

/// Ordered list of catalog entries plus a title lookup table.
///
/// Entries are stored in row order, so `entries[i].row_index == i`.
/// The title map keeps the first row for each title: if the same title
/// appears twice, lookups resolve to the earlier row.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    title_index: HashMap<String, RowIndex>,
}

impl Catalog {
    /// Build a catalog from parsed entries.
    ///
    /// Row indices are reassigned from the position in `entries`.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        let mut title_index = HashMap::with_capacity(entries.len());
        let mut entries = entries;
        let mut duplicates = 0usize;

        for (row, entry) in entries.iter_mut().enumerate() {
            entry.row_index = row;
            if title_index.contains_key(&entry.title) {
                duplicates += 1;
                continue;
            }
            title_index.insert(entry.title.clone(), row);
        }

        if duplicates > 0 {
            tracing::warn!(
                duplicates,
                "Catalog contains duplicate titles; lookups resolve to the first row"
            );
        }

        Self {
            entries,
            title_index,
        }
    }

    /// Row of the first entry with exactly this title
    pub fn lookup_title(&self, title: &str) -> Option<RowIndex> {
        self.title_index.get(title).copied()
    }

    pub fn title_of(&self, row: RowIndex) -> Option<&str> {
        self.entries.get(row).map(|e| e.title.as_str())
    }

    pub fn movie_id_of(&self, row: RowIndex) -> Option<MovieId> {
        self.entries.get(row).map(|e| e.movie_id)
    }

    pub fn get(&self, row: RowIndex) -> Option<&CatalogEntry> {
        self.entries.get(row)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct titles (smaller than `len()` when titles repeat)
    pub fn distinct_titles(&self) -> usize {
        self.title_index.len()
    }

    /// Case-insensitive substring search over titles.
    ///
    /// Exact (case-insensitive) matches come first, then substring matches,
    /// each group in catalog order.
    pub fn search(&self, query: &str) -> Vec<&CatalogEntry> {
        let query = query.to_lowercase();
        let mut exact = Vec::new();
        let mut partial = Vec::new();

        for entry in &self.entries {
            let title = entry.title.to_lowercase();
            if title == query {
                exact.push(entry);
            } else if title.contains(&query) {
                partial.push(entry);
            }
        }

        exact.extend(partial);
        exact
    }
}

// =============================================================================
// Similarity Matrix
// =============================================================================

/// Dense square matrix of pairwise similarity scores, stored row-major.
///
/// Entry `(i, j)` is the similarity between catalog rows `i` and `j`;
/// higher means more similar.
#[derive(Debug, Clone, Default)]
pub struct SimilarityMatrix {
    dimension: usize,
    scores: Vec<f32>,
}

impl SimilarityMatrix {
    /// Build a matrix from its rows.
    ///
    /// Every row must have as many columns as there are rows.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let dimension = rows.len();
        let mut scores = Vec::with_capacity(dimension * dimension);

        for row in rows {
            if row.len() != dimension {
                return Err(DataLoadError::DimensionMismatch {
                    expected: dimension,
                    found: row.len(),
                });
            }
            scores.extend(row);
        }

        Ok(Self { dimension, scores })
    }

    /// Number of rows (equal to the number of columns)
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Similarity of row `row` to every catalog item
    ///
    /// Panics if `row` is out of bounds.
    pub fn row(&self, row: RowIndex) -> &[f32] {
        let start = row * self.dimension;
        &self.scores[start..start + self.dimension]
    }

    /// Panics if either index is out of bounds.
    pub fn get(&self, row: RowIndex, col: RowIndex) -> f32 {
        self.row(row)[col]
    }

    /// Reject NaN and infinite scores, which would make ranking ill-defined
    pub fn validate(&self) -> Result<()> {
        if let Some(pos) = self.scores.iter().position(|s| !s.is_finite()) {
            return Err(DataLoadError::InvalidValue {
                field: format!(
                    "similarity[{}][{}]",
                    pos / self.dimension,
                    pos % self.dimension
                ),
                value: self.scores[pos].to_string(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// Dataset - catalog and matrix together
// =============================================================================

/// Everything the engine needs, loaded once per process.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub(crate) catalog: Catalog,
    pub(crate) similarity: SimilarityMatrix,
}

impl Dataset {
    /// Pair a catalog with its similarity matrix, checking they line up
    pub fn new(catalog: Catalog, similarity: SimilarityMatrix) -> Result<Self> {
        let dataset = Self {
            catalog,
            similarity,
        };
        dataset.validate()?;
        Ok(dataset)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    /// (catalog entries, distinct titles, matrix dimension)
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.catalog.len(),
            self.catalog.distinct_titles(),
            self.similarity.dimension(),
        )
    }
}
