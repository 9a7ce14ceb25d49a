//! movies-sync - keep a local movie cache in step with the catalogue.

mod commands;
mod output;

use clap::{Parser, Subcommand};
use config_and_utils::{init_logging, Config, Paths};
use tracing::debug;

/// movies-sync - refresh and page a local movie cache.
#[derive(Parser)]
#[command(name = "movies-sync")]
#[command(about = "Stale-while-revalidate movie cache backed by SQLite")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text", global = true)]
    format: output::OutputFormat,

    /// Log level (trace, debug, info, warn, error); defaults to the config file
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also print logs to stderr
    #[arg(long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Refresh popular movies, then load more pages into the cache
    Popular {
        /// Number of pages to load after the refresh
        #[arg(short, long, default_value = "1")]
        pages: u32,
    },

    /// Refresh a single movie by catalogue id
    Movie {
        /// Catalogue movie id
        id: String,
    },

    /// List cached movies without contacting the catalogue
    Cached {
        /// Show at most this many movies
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Delete every cached movie
    Clear,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let paths = Paths::new()?;
    let config = Config::load(&paths)?;

    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    if let Err(e) = init_logging(level, &paths, cli.verbose) {
        eprintln!("Warning: logging disabled: {}", e);
    }
    debug!(base_dir = %paths.base_dir().display(), "Starting movies-sync");

    match cli.command {
        Commands::Popular { pages } => commands::popular(pages, &paths, &config, &cli.format).await,
        Commands::Movie { id } => commands::movie(&id, &paths, &config, &cli.format).await,
        Commands::Cached { limit } => commands::cached(limit, &paths, &cli.format).await,
        Commands::Clear => commands::clear(&paths, &cli.format).await,
    }
}
