//! Integration tests for the pipeline.
//!
//! These tests verify that ranked candidates from the similarity source
//! and the filters work together in a realistic scenario.

use data_loader::{Catalog, CatalogEntry, Dataset, SimilarityMatrix};
use metadata::MovieMetadata;
use pipeline::FilterPipeline;
use pipeline::filters::*;
use sources::SimilaritySource;
use std::collections::HashMap;
use std::sync::Arc;

fn create_test_setup() -> (SimilaritySource, HashMap<u32, MovieMetadata>) {
    let titles = ["Alien (1979)", "Aliens (1986)", "Heat (1995)", "Predator (1987)"];
    let entries = titles
        .iter()
        .enumerate()
        .map(|(row, title)| CatalogEntry {
            title: title.to_string(),
            row_index: row,
            movie_id: 10 + row as u32,
        })
        .collect();

    let similarity = SimilarityMatrix::from_rows(vec![
        vec![1.0, 0.9, 0.1, 0.6],
        vec![0.9, 1.0, 0.2, 0.7],
        vec![0.1, 0.2, 1.0, 0.3],
        vec![0.6, 0.7, 0.3, 1.0],
    ])
    .unwrap();

    let dataset = Dataset::new(Catalog::from_entries(entries), similarity).unwrap();

    let ratings = HashMap::from([
        (10, MovieMetadata::new(10, 8.4)),
        (11, MovieMetadata::new(11, 7.9)),
        (12, MovieMetadata::new(12, 7.9)),
        (13, MovieMetadata::new(13, 5.8)),
    ]);

    (SimilaritySource::new(Arc::new(dataset)), ratings)
}

#[test]
fn test_rating_filter_over_ranked_candidates() {
    let (source, metadata) = create_test_setup();
    let ranked = source.get_candidates(&["Alien (1979)"]).unwrap();

    let pipeline = FilterPipeline::new().add_filter(MinimumRatingFilter::default());

    let accepted: Vec<usize> = ranked
        .iter()
        .filter(|c| !ranked.seed_rows.contains(&c.row))
        .filter(|c| {
            let movie_id = source.dataset().catalog().movie_id_of(c.row).unwrap();
            pipeline.accepts(c, &metadata[&movie_id])
        })
        .map(|c| c.row)
        .collect();

    // Aliens (0.9) passes, Predator (0.6) is rated too low, Heat (0.1) passes
    assert_eq!(accepted, vec![1, 2]);
}

#[test]
fn test_stricter_threshold_removes_everything() {
    let (source, metadata) = create_test_setup();
    let ranked = source.get_candidates(&["Heat (1995)"]).unwrap();

    let pipeline = FilterPipeline::new().add_filter(MinimumRatingFilter::new(9.0));

    let accepted = ranked
        .iter()
        .filter(|c| {
            let movie_id = source.dataset().catalog().movie_id_of(c.row).unwrap();
            pipeline.accepts(c, &metadata[&movie_id])
        })
        .count();

    assert_eq!(accepted, 0);
}
