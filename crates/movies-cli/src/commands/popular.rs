//! Refresh the popular listing, then page through it.

use anyhow::Result;
use bound_resource::{ExecutionContext, LoadMoreState, PageRequest};
use config_and_utils::{Config, Paths};
use futures_util::{FutureExt, StreamExt};
use movies_repository::MoviesRepository;
use tracing::{debug, info};

use super::open_repository;
use crate::output::{self, OutputFormat};

/// Refresh the first page, then load up to `pages` further pages into the cache.
pub async fn popular(pages: u32, paths: &Paths, config: &Config, format: &OutputFormat) -> Result<()> {
    let repository = open_repository(paths, config).await?;
    let count = sync_popular(&repository, pages, format).await?;
    output::print_success(&format!("{} movies cached", count), format);
    Ok(())
}

/// Runs the refresh and the paging. Returns the number of cached movies.
pub(crate) async fn sync_popular<C: ExecutionContext>(
    repository: &MoviesRepository<C>,
    pages: u32,
    format: &OutputFormat,
) -> Result<u64> {
    let mut events = repository.movies().into_stream();
    while let Some(event) = events.next().await {
        output::print_movies_event(&event, format);
    }

    // The pager starts on the page the refresh just wrote; step over it
    // quietly so every requested page is a new one.
    let mut more = match repository.query_next_page().await {
        PageRequest::Completed { has_more, .. } => has_more,
        other => {
            debug!(?other, "pager did not move past the refreshed page");
            false
        }
    };

    let mut states = repository.load_more_state();
    for _ in 0..pages {
        if !more {
            break;
        }
        let outcome = repository.query_next_page().await;

        // Transitions are published before the request resolves.
        while let Some(Some(state)) = states.next().now_or_never() {
            output::print_state(&state, format);
        }
        output::print_page_request(&outcome, format);

        more = matches!(outcome, PageRequest::Completed { has_more: true, .. });
    }

    let count = repository.store().count().await?;
    info!(count, "Popular movies synced");
    if matches!(repository.next_page_handler().state(), LoadMoreState::Error { .. }) {
        anyhow::bail!("Paging stopped on an error; {} movies cached", count);
    }
    Ok(count)
}
