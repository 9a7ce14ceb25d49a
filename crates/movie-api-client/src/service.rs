//! The remote source seam.

use async_trait::async_trait;

use crate::{ApiResult, MoviesPage, RawMovie};

/// Request/response access to the movie catalogue.
///
/// Implemented by [`TmdbClient`](crate::TmdbClient) and by in-memory fakes in
/// tests.
#[async_trait]
pub trait MovieService: Send + Sync {
    /// One page of popular movies. Pages start at 1.
    async fn popular_movies(&self, page: u32) -> ApiResult<MoviesPage>;

    /// A single movie by catalogue id.
    async fn movie(&self, movie_id: &str) -> ApiResult<RawMovie>;
}
