use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::Dataset;
use engine::{DEFAULT_CAP, MovieRecommendation, RecommendationEngine, RecommendationRequest};
use metadata::{InMemoryMetadataProvider, MetadataProvider, TmdbClient, TmdbConfig};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// MovieRecs - content-based movie recommendations
#[derive(Parser)]
#[command(name = "movie-recs")]
#[command(about = "Recommend movies similar to your favorites", long_about = None)]
struct Cli {
    /// Directory holding movies.dat and similarity.dat
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// TMDB API key used to fetch ratings and details
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
    tmdb_api_key: Option<String>,

    /// Offline metadata (JSON array); takes precedence over TMDB
    #[arg(long)]
    metadata_file: Option<PathBuf>,

    /// Region used for streaming availability
    #[arg(long, default_value = "IN")]
    region: String,

    /// Language for overviews and other TMDB text
    #[arg(long, default_value = "en-US")]
    language: String,

    /// Give up on a single movie's metadata after this many seconds
    #[arg(long, default_value = "10")]
    fetch_timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies based on several favorite titles
    Recommend {
        /// Favorite title (repeat for more than one)
        #[arg(long = "title", required = true)]
        titles: Vec<String>,

        /// Number of recommendations to return
        #[arg(long, default_value_t = DEFAULT_CAP)]
        limit: usize,

        /// Only keep movies rated strictly above this value
        #[arg(long, default_value = "6.0")]
        min_rating: f32,
    },

    /// Recommend movies similar to one title
    Similar {
        /// Title to find similar movies for
        #[arg(long)]
        title: String,

        #[arg(long, default_value_t = DEFAULT_CAP)]
        limit: usize,

        #[arg(long, default_value = "6.0")]
        min_rating: f32,
    },

    /// Search the catalog by title
    Search {
        /// Case-insensitive substring to look for
        #[arg(long)]
        title: String,
    },

    /// Time candidate generation for random seed sets (no metadata calls)
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Seed titles per request
        #[arg(long, default_value = "3")]
        seeds: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    println!("Loading dataset from {}...", cli.data_dir.display());
    let start = Instant::now();
    let dataset = Arc::new(
        Dataset::load_from_files(&cli.data_dir).context("Failed to load movie dataset")?,
    );
    println!("{} Loaded dataset in {:?}", "✓".green(), start.elapsed());

    match &cli.command {
        Commands::Recommend {
            titles,
            limit,
            min_rating,
        } => {
            let request = RecommendationRequest::new(titles.iter().cloned())
                .with_cap(*limit)
                .with_rating_threshold(*min_rating);
            handle_recommend(&cli, dataset, request).await?
        }
        Commands::Similar {
            title,
            limit,
            min_rating,
        } => {
            let request = RecommendationRequest::new([title.clone()])
                .with_cap(*limit)
                .with_rating_threshold(*min_rating);
            handle_recommend(&cli, dataset, request).await?
        }
        Commands::Search { title } => handle_search(&dataset, title),
        Commands::Benchmark { requests, seeds } => handle_benchmark(dataset, *requests, *seeds)?,
    }

    Ok(())
}

/// Pick the metadata provider from the global options
async fn build_provider(cli: &Cli) -> Result<Arc<dyn MetadataProvider>> {
    if let Some(path) = &cli.metadata_file {
        let provider = InMemoryMetadataProvider::from_json_file(path)
            .await
            .with_context(|| format!("Failed to load metadata from {}", path.display()))?;
        info!("Using offline metadata for {} movies", provider.len());
        return Ok(Arc::new(provider));
    }

    let Some(api_key) = &cli.tmdb_api_key else {
        bail!("No metadata source: pass --metadata-file or set TMDB_API_KEY");
    };

    let config = TmdbConfig::new(api_key.clone())
        .with_region(cli.region.clone())
        .with_language(cli.language.clone())
        .with_timeout(Duration::from_secs(cli.fetch_timeout_secs));
    let client = TmdbClient::new(config).context("Failed to create TMDB client")?;
    info!(
        "Using TMDB metadata (region {}, language {})",
        client.config().region,
        client.config().language
    );
    Ok(Arc::new(client))
}

/// Handle the 'recommend' and 'similar' commands
async fn handle_recommend(
    cli: &Cli,
    dataset: Arc<Dataset>,
    request: RecommendationRequest,
) -> Result<()> {
    let provider = build_provider(cli).await?;
    let engine = RecommendationEngine::with_provider(dataset, provider)
        .with_fetch_timeout(Duration::from_secs(cli.fetch_timeout_secs));

    let start = Instant::now();
    let recommendations = engine
        .recommend(&request)
        .await
        .context("Recommendation request failed")?;

    if recommendations.is_empty() {
        println!(
            "{}",
            format!(
                "No suitable recommendations found with rating above {}.",
                request.rating_threshold
            )
            .yellow()
        );
        return Ok(());
    }

    print_recommendations(&request.seed_titles, &recommendations);
    println!("\nCompleted in {:?}", start.elapsed());
    Ok(())
}

/// Handle the 'search' command
fn handle_search(dataset: &Dataset, query: &str) {
    let matches = dataset.catalog().search(query);

    println!("{}", format!("Search results for '{}':", query).bold().blue());
    if matches.is_empty() {
        println!("  (no matches)");
        return;
    }

    for entry in matches.iter().take(20) {
        println!(
            "  {} {} (movie id {})",
            format!("[{}]", entry.row_index).dimmed(),
            entry.title,
            entry.movie_id
        );
    }
    if matches.len() > 20 {
        println!("  ... and {} more", matches.len() - 20);
    }
}

/// Handle the 'benchmark' command
fn handle_benchmark(dataset: Arc<Dataset>, requests: usize, seeds: usize) -> Result<()> {
    let catalog_size = dataset.catalog().len();
    if requests == 0 || seeds == 0 {
        bail!("--requests and --seeds must both be positive");
    }

    let source = sources::SimilaritySource::new(dataset.clone());

    // Random seed titles drawn from the catalog
    let seed_sets: Vec<Vec<String>> = (0..requests)
        .map(|_| {
            (0..seeds)
                .filter_map(|_| {
                    let row = rand::random_range(0..catalog_size);
                    dataset.catalog().title_of(row).map(str::to_string)
                })
                .collect()
        })
        .collect();

    let total_start = Instant::now();
    let mut timings = Vec::with_capacity(requests);
    for seed_titles in &seed_sets {
        let start = Instant::now();
        source
            .get_candidates(seed_titles.as_slice())
            .context("Candidate generation failed")?;
        timings.push(start.elapsed());
    }
    let total_time = total_start.elapsed();

    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let percentile = |p: f32| timings[((timings.len() as f32 * p) as usize).min(timings.len() - 1)];
    let throughput = requests as f32 / total_time.as_secs_f32();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Catalog size: {}", catalog_size);
    println!("Requests: {} ({} seeds each)", requests, seeds);
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Format and print the ranked recommendations with their metadata
fn print_recommendations(seed_titles: &[String], recommendations: &[MovieRecommendation]) {
    println!(
        "{}",
        format!("Because you liked {}:", seed_titles.join(", ")).bold().blue()
    );

    for (i, rec) in recommendations.iter().enumerate() {
        let meta = &rec.metadata;
        let year = meta
            .release_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "N/A".to_string());

        println!(
            "\n{}. {} ({}) - {} {:.1}/10  {}",
            (i + 1).to_string().green(),
            rec.title.bold(),
            year,
            "★".yellow(),
            meta.rating,
            format!("similarity {:.3}", rec.score).dimmed()
        );
        println!("   {}", meta.overview);

        if let Some(poster) = &meta.poster_url {
            println!("   {} {}", "Poster:".cyan(), poster);
        }
        if let Some(trailer) = &meta.trailer_url {
            println!("   {} {}", "Trailer:".cyan(), trailer);
        }
        if !meta.streaming_providers.is_empty() {
            let names = meta
                .streaming_providers
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            println!("   {} {}", "Streaming on:".cyan(), names);
        }
        if !meta.cast.is_empty() {
            let names = meta
                .cast
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            println!("   {} {}", "Cast:".cyan(), names);
        }
    }
}
