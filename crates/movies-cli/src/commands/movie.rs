//! Refresh a single movie.

use anyhow::Result;
use bound_resource::Resource;
use config_and_utils::{Config, Paths};
use futures_util::StreamExt;

use super::open_repository;
use crate::output::{self, OutputFormat};

/// Show the cached movie, refresh it, and show the result.
pub async fn movie(id: &str, paths: &Paths, config: &Config, format: &OutputFormat) -> Result<()> {
    let repository = open_repository(paths, config).await?;

    let mut failure = None;
    let mut events = repository.movie(id).into_stream();
    while let Some(event) = events.next().await {
        output::print_movie_event(&event, format);
        if let Resource::Error { message, .. } = event {
            failure = Some(message);
        }
    }

    match failure {
        Some(message) => anyhow::bail!("Failed to refresh movie {}: {}", id, message),
        None => Ok(()),
    }
}
