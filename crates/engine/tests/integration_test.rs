//! End-to-end tests for the recommendation engine.
//!
//! These build a small in-memory dataset and metadata provider and check
//! the observable guarantees of `recommend`: ordering, seed exclusion,
//! dedup, the rating threshold and the error cases.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use data_loader::{Catalog, CatalogEntry, Dataset, MovieId, SimilarityMatrix};
use engine::{RecommendError, RecommendationEngine, RecommendationRequest};
use metadata::{InMemoryMetadataProvider, MetadataError, MetadataProvider, MovieMetadata};

fn dataset(titles: &[&str], rows: Vec<Vec<f32>>) -> Arc<Dataset> {
    let entries = titles
        .iter()
        .enumerate()
        .map(|(row, title)| CatalogEntry {
            title: title.to_string(),
            row_index: row,
            movie_id: 100 + row as MovieId,
        })
        .collect();

    let similarity = SimilarityMatrix::from_rows(rows).expect("square matrix");
    Arc::new(Dataset::new(Catalog::from_entries(entries), similarity).expect("valid dataset"))
}

fn provider(ratings: &[f32]) -> InMemoryMetadataProvider {
    ratings
        .iter()
        .enumerate()
        .fold(InMemoryMetadataProvider::new(), |p, (row, &rating)| {
            p.with(MovieMetadata::new(100 + row as MovieId, rating))
        })
}

/// Catalog {A:0, B:1, C:2, D:3}
fn abcd_dataset() -> Arc<Dataset> {
    dataset(
        &["A", "B", "C", "D"],
        vec![
            vec![1.0, 0.9, 0.2, 0.1],
            vec![0.9, 1.0, 0.1, 0.8],
            vec![0.2, 0.1, 1.0, 0.3],
            vec![0.1, 0.8, 0.3, 1.0],
        ],
    )
}

/// Ten movies with pseudo-random but fixed similarities
fn larger_dataset() -> (Arc<Dataset>, Vec<String>) {
    let titles: Vec<String> = (0..10).map(|i| format!("Movie {}", i)).collect();
    let rows: Vec<Vec<f32>> = (0..10)
        .map(|i| {
            (0..10)
                .map(|j| if i == j { 1.0 } else { ((i * 7 + j * 3) % 10) as f32 / 10.0 })
                .collect::<Vec<f32>>()
        })
        .collect();
    let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
    (dataset(&refs, rows), titles)
}

/// Fails for one specific movie id
struct FlakyProvider {
    inner: InMemoryMetadataProvider,
    broken: MovieId,
}

#[async_trait]
impl MetadataProvider for FlakyProvider {
    async fn fetch(&self, movie_id: MovieId) -> Result<MovieMetadata, MetadataError> {
        if movie_id == self.broken {
            return Err(MetadataError::Status {
                movie_id,
                status: 503,
            });
        }
        self.inner.fetch(movie_id).await
    }
}

#[tokio::test]
async fn test_two_seed_scenario_keeps_only_well_rated() {
    // A, B, C, D rated 8, 8, 5, 7
    let engine = RecommendationEngine::new(abcd_dataset(), provider(&[8.0, 8.0, 5.0, 7.0]));

    let request = RecommendationRequest::new(["A", "B"]).with_rating_threshold(6.0);
    let recs = engine.recommend(&request).await.expect("request should succeed");

    let titles: Vec<&str> = recs.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["D"]);
    assert!((recs[0].score - 0.9).abs() < 1e-6);
    assert_eq!(recs[0].metadata.rating, 7.0);
    assert_eq!(recs[0].movie_id, 103);
}

#[tokio::test]
async fn test_unknown_seed_fails_without_partial_result() {
    let engine = RecommendationEngine::new(abcd_dataset(), provider(&[8.0, 8.0, 8.0, 8.0]));

    let result = engine
        .recommend(&RecommendationRequest::new(["A", "Zed"]))
        .await;

    assert_eq!(result, Err(RecommendError::UnknownTitle("Zed".to_string())));
}

#[tokio::test]
async fn test_empty_seed_set_is_rejected() {
    let engine = RecommendationEngine::new(abcd_dataset(), provider(&[8.0, 8.0, 8.0, 8.0]));

    let result = engine
        .recommend(&RecommendationRequest::new(Vec::<String>::new()))
        .await;

    assert_eq!(result, Err(RecommendError::EmptySeedSet));
}

#[tokio::test]
async fn test_all_candidates_filtered_is_empty_success() {
    let engine = RecommendationEngine::new(abcd_dataset(), provider(&[3.0, 3.0, 3.0, 3.0]));

    let recs = engine.similar_to("A").await;

    assert_eq!(recs, Ok(vec![]));
}

#[tokio::test]
async fn test_threshold_is_strict() {
    let engine = RecommendationEngine::new(abcd_dataset(), provider(&[6.0, 6.0, 6.0, 6.5]));

    let recs = engine.similar_to("A").await.unwrap();

    let titles: Vec<&str> = recs.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["D"]);
}

#[tokio::test]
async fn test_failed_fetch_skips_only_that_candidate() {
    // D (id 103) is the best candidate for A+B but its lookup fails
    let engine = RecommendationEngine::new(
        abcd_dataset(),
        FlakyProvider {
            inner: provider(&[8.0, 8.0, 7.0, 9.0]),
            broken: 103,
        },
    );

    let recs = engine.personalized(&["A", "B"]).await.unwrap();

    let titles: Vec<&str> = recs.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["C"]);
}

#[tokio::test]
async fn test_result_properties_hold_for_many_seed_sets() {
    let (dataset, titles) = larger_dataset();
    let ratings: Vec<f32> = (0..10).map(|i| if i % 3 == 0 { 5.0 } else { 7.5 }).collect();
    let engine = RecommendationEngine::new(dataset, provider(&ratings));

    for seed_count in 1..=5 {
        for offset in 0..10 {
            let seeds: Vec<String> = (0..seed_count)
                .map(|k| titles[(offset + k * 3) % 10].clone())
                .collect::<HashSet<_>>()
                .into_iter()
                .collect();

            for cap in [0, 1, 3, 5] {
                let request = RecommendationRequest::new(seeds.clone()).with_cap(cap);
                let recs = engine.recommend(&request).await.unwrap();

                assert!(recs.len() <= cap);

                let result_titles: HashSet<&str> = recs.iter().map(|r| r.title.as_str()).collect();
                assert_eq!(result_titles.len(), recs.len(), "duplicate titles");

                for rec in &recs {
                    assert!(!seeds.contains(&rec.title), "seed {} recommended", rec.title);
                    assert!(rec.metadata.rating > 6.0);
                }

                for pair in recs.windows(2) {
                    assert!(pair[0].score > pair[1].score
                        || (pair[0].score == pair[1].score && pair[0].row < pair[1].row));
                }
            }
        }
    }
}

#[tokio::test]
async fn test_identical_requests_give_identical_results() {
    let (dataset, titles) = larger_dataset();
    let engine = RecommendationEngine::new(dataset, provider(&[7.0; 10]));
    let request = RecommendationRequest::new([titles[2].clone(), titles[7].clone()]);

    let first = engine.recommend(&request).await.unwrap();
    for _ in 0..5 {
        assert_eq!(engine.recommend(&request).await.unwrap(), first);
    }
}
