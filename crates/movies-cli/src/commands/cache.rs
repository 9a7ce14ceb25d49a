//! Offline cache commands.

use anyhow::Result;
use config_and_utils::Paths;

use super::open_store;
use crate::output::{self, OutputFormat};

/// List cached movies without touching the network.
pub async fn cached(limit: Option<usize>, paths: &Paths, format: &OutputFormat) -> Result<()> {
    let store = open_store(paths).await?;
    let mut movies = store.load_movies().await?;
    if let Some(limit) = limit {
        movies.truncate(limit);
    }
    output::print_movie_list(&movies, format);
    Ok(())
}

/// Delete every cached movie.
pub async fn clear(paths: &Paths, format: &OutputFormat) -> Result<()> {
    let store = open_store(paths).await?;
    let deleted = store.clear().await?;
    output::print_success(&format!("Removed {} cached movies", deleted), format);
    Ok(())
}
