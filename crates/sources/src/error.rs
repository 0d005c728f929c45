//! Request-level failures.
//!
//! Both variants are detected while resolving seed titles, before any
//! aggregation or metadata work starts.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    /// The request contained no seed titles
    #[error("At least one seed title is required")]
    EmptySeedSet,

    /// A seed title does not exist in the catalog
    #[error("Unknown title: {0}")]
    UnknownTitle(String),
}

pub type Result<T> = std::result::Result<T, RecommendError>;
