//! SQLite movie cache for movies-sync.
//!
//! This crate provides:
//! - Async SQLite executor with a dedicated thread
//! - Schema migrations
//! - Upsert-by-id writes in a single transaction
//! - Live queries that re-read after every committed write
//!
//! # Architecture
//!
//! ```ignore
//! let store = MovieStore::open(&paths.database_file()).await?;
//! let mut movies = store.watch_movies();      // emits the current list
//! store.insert(fresh).await?;                 // commit, then notify
//! let updated = movies.next().await;          // re-read after the commit
//! ```
//!
//! **Important**: only SQL runs on the database thread. Mapping catalogue
//! responses into [`Movie`] happens before calling [`MovieStore::insert`].

mod error;
mod executor;
mod live;
mod migrations;
mod models;
pub mod queries;
mod store;

#[cfg(test)]
mod tests;

pub use error::{StoreError, StoreResult};
pub use executor::AsyncDatabase;
pub use live::LiveHub;
pub use migrations::{run_migrations, CURRENT_VERSION};
pub use models::Movie;
pub use store::{LiveQuery, MovieStore};
