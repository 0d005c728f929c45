//! Dataset loading and validation.
//!
//! Reads the catalog and the similarity matrix from a data directory,
//! builds the title index and checks that the two files agree.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::info;

impl Dataset {
    /// Load the catalog and similarity matrix from a directory
    ///
    /// This is the main entry point for loading data.
    ///
    /// Steps:
    /// 1. Parse movies.dat and similarity.dat in parallel
    /// 2. Build the catalog title index
    /// 3. Validate matrix shape and values against the catalog
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading catalog from {:?}", data_dir);

        let catalog_path = data_dir.join(parser::CATALOG_FILE);
        let similarity_path = data_dir.join(parser::SIMILARITY_FILE);

        let (entries, similarity) = rayon::join(
            || parser::parse_catalog(&catalog_path),
            || parser::parse_similarity(&similarity_path),
        );
        let entries = entries?;
        let similarity = similarity?;

        info!(
            "Loaded {} catalog entries and a {}x{} similarity matrix",
            entries.len(),
            similarity.dimension(),
            similarity.dimension()
        );

        let dataset = Dataset::new(Catalog::from_entries(entries), similarity)?;

        info!("Dataset successfully built and validated");
        Ok(dataset)
    }

    /// Validate data integrity
    ///
    /// Check that:
    /// - The catalog is not empty
    /// - The matrix has one row per catalog entry
    /// - Every score is finite
    pub fn validate(&self) -> Result<()> {
        if self.catalog.is_empty() {
            return Err(DataLoadError::ValidationError(
                "catalog is empty".to_string(),
            ));
        }
        if self.similarity.dimension() != self.catalog.len() {
            return Err(DataLoadError::DimensionMismatch {
                expected: self.catalog.len(),
                found: self.similarity.dimension(),
            });
        }
        self.similarity.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_dataset(dir: &Path, movies: &str, similarity: &str) {
        fs::write(dir.join(parser::CATALOG_FILE), movies).unwrap();
        fs::write(dir.join(parser::SIMILARITY_FILE), similarity).unwrap();
    }

    #[test]
    fn test_load_dataset() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(
            dir.path(),
            "10::Alpha\n20::Beta\n30::Gamma\n",
            "1 0.9 0.2\n0.9 1 0.1\n0.2 0.1 1\n",
        );

        let dataset = Dataset::load_from_files(dir.path()).unwrap();
        let (entries, titles, dimension) = dataset.counts();

        assert_eq!(entries, 3);
        assert_eq!(titles, 3);
        assert_eq!(dimension, 3);
        assert_eq!(dataset.catalog().lookup_title("Beta"), Some(1));
        assert_eq!(dataset.catalog().movie_id_of(2), Some(30));
        assert_eq!(dataset.similarity().get(0, 1), 0.9);
    }

    #[test]
    fn test_dimension_must_match_catalog() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path(), "10::Alpha\n20::Beta\n30::Gamma\n", "1 0\n0 1\n");

        let err = Dataset::load_from_files(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::DimensionMismatch {
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn test_non_finite_scores_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path(), "10::Alpha\n20::Beta\n", "1 NaN\n0 1\n");

        let err = Dataset::load_from_files(dir.path()).unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidValue { .. }));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let result = Dataset::new(Catalog::default(), SimilarityMatrix::default());
        assert!(matches!(result, Err(DataLoadError::ValidationError(_))));
    }

    #[test]
    fn test_missing_similarity_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(parser::CATALOG_FILE), "1::Only\n").unwrap();

        let err = Dataset::load_from_files(dir.path()).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }
}
