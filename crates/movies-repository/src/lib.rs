//! # movies-repository
//!
//! Wires the movie cache and the catalogue into the reconciliation pipeline.
//!
//! ```text
//! movies()           → NetworkBoundResource<Vec<Movie>>  (watch_movies + popular page 1)
//! movie(id)          → NetworkBoundResource<Movie>       (watch_movie + movie(id))
//! query_next_page()  → next popular page saved into the cache
//! load_more_state()  → LoadMoreState stream of the pager
//! ```
//!
//! Fetched pages are never handed to consumers directly: they are mapped
//! with [`BuildMovie`], upserted, and become visible through the cache.

mod configuration;
mod movie;
mod repository;

#[cfg(test)]
mod tests;

pub use configuration::Configuration;
pub use movie::BuildMovie;
pub use movie_store::Movie;
pub use repository::MoviesRepository;
