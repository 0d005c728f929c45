//! TMDB metadata provider.
//!
//! Each fetch makes two calls to the TMDB v3 API:
//! 1. `/movie/{id}` with videos and credits appended → overview, rating,
//!    poster, release year, trailer, cast
//! 2. `/movie/{id}/watch/providers` → subscription services in one region

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::types::{CastMember, MovieMetadata, StreamingProvider, DEFAULT_OVERVIEW};
use crate::{MetadataError, MetadataProvider};
use data_loader::MovieId;

const MAX_CAST: usize = 5;
const PLACEHOLDER_PROFILE_URL: &str = "https://via.placeholder.com/100";
const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Connection settings for the TMDB API
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub api_key: String,
    pub base_url: String,
    pub image_base_url: String,
    pub language: String,
    /// ISO 3166-1 region whose streaming providers are reported
    pub region: String,
    pub timeout: Duration,
}

impl TmdbConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.themoviedb.org/3".to_string(),
            image_base_url: "https://image.tmdb.org/t/p/w500".to_string(),
            language: "en-US".to_string(),
            region: "IN".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn image_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.image_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

// =============================================================================
// Response shapes (only the fields we read)
// =============================================================================

#[derive(Debug, Default, Deserialize)]
struct TmdbMovie {
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    vote_average: Option<f32>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    videos: TmdbVideos,
    #[serde(default)]
    credits: TmdbCredits,
}

#[derive(Debug, Default, Deserialize)]
struct TmdbVideos {
    #[serde(default)]
    results: Vec<TmdbVideo>,
}

#[derive(Debug, Deserialize)]
struct TmdbVideo {
    #[serde(default)]
    site: String,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    key: String,
}

#[derive(Debug, Default, Deserialize)]
struct TmdbCredits {
    #[serde(default)]
    cast: Vec<TmdbCastMember>,
}

#[derive(Debug, Deserialize)]
struct TmdbCastMember {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    profile_path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TmdbWatchProviders {
    #[serde(default)]
    results: HashMap<String, TmdbRegionProviders>,
}

#[derive(Debug, Deserialize)]
struct TmdbRegionProviders {
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    flatrate: Vec<TmdbProvider>,
}

#[derive(Debug, Deserialize)]
struct TmdbProvider {
    provider_name: String,
    #[serde(default)]
    logo_path: Option<String>,
}

/// Combine the two TMDB responses into our metadata shape
fn build_metadata(
    movie_id: MovieId,
    movie: TmdbMovie,
    providers: TmdbWatchProviders,
    config: &TmdbConfig,
) -> MovieMetadata {
    let trailer_url = movie
        .videos
        .results
        .iter()
        .find(|v| v.site == "YouTube" && v.kind == "Trailer")
        .map(|v| format!("{}{}", YOUTUBE_WATCH_URL, v.key));

    let release_year = movie
        .release_date
        .as_deref()
        .and_then(|date| date.get(..4))
        .and_then(|year| year.parse().ok());

    let streaming_providers = providers
        .results
        .get(&config.region)
        .map(|region| {
            let link = region.link.clone().unwrap_or_else(|| "#".to_string());
            region
                .flatrate
                .iter()
                .map(|p| StreamingProvider {
                    name: p.provider_name.clone(),
                    logo_url: p.logo_path.as_deref().map(|path| config.image_url(path)),
                    link: link.clone(),
                })
                .collect()
        })
        .unwrap_or_default();

    let cast = movie
        .credits
        .cast
        .into_iter()
        .take(MAX_CAST)
        .map(|member| CastMember {
            name: member.name.unwrap_or_else(|| "Unknown".to_string()),
            profile_url: member
                .profile_path
                .as_deref()
                .filter(|p| !p.is_empty())
                .map(|p| config.image_url(p))
                .unwrap_or_else(|| PLACEHOLDER_PROFILE_URL.to_string()),
        })
        .collect();

    MovieMetadata {
        movie_id,
        poster_url: movie
            .poster_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| config.image_url(p)),
        overview: movie
            .overview
            .unwrap_or_else(|| DEFAULT_OVERVIEW.to_string()),
        rating: movie.vote_average.unwrap_or(0.0),
        release_year,
        trailer_url,
        streaming_providers,
        cast,
    }
}

// =============================================================================
// Client
// =============================================================================

/// HTTP client for the TMDB API
#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    config: TmdbConfig,
}

impl TmdbClient {
    pub fn new(config: TmdbConfig) -> Result<Self, MetadataError> {
        let http_client = HttpClient::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn config(&self) -> &TmdbConfig {
        &self.config
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        movie_id: MovieId,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, MetadataError> {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.config.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(MetadataError::NotFound(movie_id));
        }
        if !status.is_success() {
            return Err(MetadataError::Status {
                movie_id,
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| {
            MetadataError::InvalidResponse(format!("{} for movie {}: {}", path, movie_id, e))
        })
    }
}

#[async_trait]
impl MetadataProvider for TmdbClient {
    #[instrument(skip(self))]
    async fn fetch(&self, movie_id: MovieId) -> Result<MovieMetadata, MetadataError> {
        let movie_path = format!("/movie/{}", movie_id);
        let providers_path = format!("/movie/{}/watch/providers", movie_id);

        let movie_query = [
            ("language", self.config.language.as_str()),
            ("append_to_response", "videos,credits"),
        ];

        let (movie, providers) = tokio::try_join!(
            self.get_json::<TmdbMovie>(movie_id, &movie_path, &movie_query),
            self.get_json::<TmdbWatchProviders>(movie_id, &providers_path, &[]),
        )?;

        let metadata = build_metadata(movie_id, movie, providers, &self.config);
        debug!(
            movie_id,
            rating = metadata.rating,
            providers = metadata.streaming_providers.len(),
            "Fetched TMDB metadata"
        );
        Ok(metadata)
    }
}
