//! CLI command implementations.

mod cache;
mod movie;
mod popular;

pub use cache::{cached, clear};
pub use movie::movie;
pub use popular::popular;

use std::sync::Arc;

use anyhow::{Context, Result};
use bound_resource::TokioExecutor;
use config_and_utils::{Config, Paths};
use movie_api_client::TmdbClient;
use movie_store::MovieStore;
use movies_repository::{Configuration, MoviesRepository};
use tracing::debug;

/// Opens the local movie cache.
pub async fn open_store(paths: &Paths) -> Result<MovieStore> {
    let path = paths.database_file();
    debug!(path = %path.display(), "Opening movie cache");
    MovieStore::open(&path)
        .await
        .with_context(|| format!("Failed to open movie cache at {}", path.display()))
}

/// Builds the repository over the cache and the configured catalogue.
pub async fn open_repository(
    paths: &Paths,
    config: &Config,
) -> Result<MoviesRepository<TokioExecutor>> {
    let client = TmdbClient::new(config.api_url()?, config.require_api_key()?, &config.language)?;
    let store = open_store(paths).await?;

    Ok(MoviesRepository::new(
        TokioExecutor::try_current()?,
        Configuration::from_config(config),
        Arc::new(client),
        store,
    ))
}
