//! # Data Loader Crate
//!
//! This crate loads the movie catalog and its precomputed similarity matrix.
//!
//! ## Main Components
//!
//! - **types**: Catalog, CatalogEntry, SimilarityMatrix, Dataset
//! - **parser**: Parse movies.dat and similarity.dat
//! - **index**: Load a data directory and validate it
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Dataset;
//! use std::path::Path;
//!
//! let dataset = Dataset::load_from_files(Path::new("data"))?;
//!
//! let row = dataset.catalog().lookup_title("Avatar").unwrap();
//! let scores = dataset.similarity().row(row);
//! println!("Avatar has {} similarity scores", scores.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{
    // Type aliases
    MovieId,
    RowIndex,
    // Core types
    Catalog,
    CatalogEntry,
    Dataset,
    SimilarityMatrix,
};
