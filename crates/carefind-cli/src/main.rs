mod find;
mod geocode;

use clap::{Args, Parser, Subcommand};
use carefind_core::CategoryFilter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "carefind")]
#[command(about = "Find cancer support resources near a location")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for resources around a coordinate or a place name
    Find(FindArgs),
    /// Resolve a place name to coordinates
    Geocode {
        /// Free-text place, e.g. "Austin, TX"
        query: String,
    },
}

#[derive(Debug, Args)]
#[command(group(
    clap::ArgGroup::new("origin")
        .required(true)
        .args(["lat", "near"])
))]
struct FindArgs {
    /// Latitude of the search center
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Longitude of the search center
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lng: Option<f64>,

    /// Place name to geocode as the search center
    #[arg(long)]
    near: Option<String>,

    /// Search radius in kilometres
    #[arg(long, default_value_t = 10.0)]
    radius: f64,

    /// Category label, or "all"
    #[arg(long, default_value = "all")]
    category: CategoryFilter,

    /// Language for relevance prompts (e.g. "en", "es")
    #[arg(long, default_value = "en")]
    language: String,

    /// Skip the relevance classifier even when a key is configured
    #[arg(long)]
    no_relevance: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = carefind_core::load_app_config_from_env()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Find(args) => find::run_find(&config, &args).await,
        Commands::Geocode { query } => geocode::run_geocode(&config, &query).await,
    }
}
