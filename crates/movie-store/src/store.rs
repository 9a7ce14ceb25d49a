//! The movie cache: async reads, upserts and live queries.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use futures_util::stream::{self, BoxStream, StreamExt};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::live::LiveHub;
use crate::models::Movie;
use crate::{queries, AsyncDatabase, StoreResult};

/// A live query: the current result, then a fresh result after every
/// committed write. Ends once every handle to the store is dropped.
pub type LiveQuery<T> = BoxStream<'static, StoreResult<T>>;

/// SQLite-backed movie cache.
///
/// Cloning yields another handle to the same database and notification hub.
#[derive(Clone)]
pub struct MovieStore {
    db: AsyncDatabase,
    live: Arc<LiveHub>,
}

impl MovieStore {
    pub async fn open(path: &Path) -> StoreResult<Self> {
        Ok(Self::with_database(AsyncDatabase::open(path).await?))
    }

    pub async fn in_memory() -> StoreResult<Self> {
        Ok(Self::with_database(AsyncDatabase::in_memory().await?))
    }

    pub fn with_database(db: AsyncDatabase) -> Self {
        Self {
            db,
            live: Arc::new(LiveHub::new()),
        }
    }

    pub fn database(&self) -> &AsyncDatabase {
        &self.db
    }

    /// Upserts movies by id in a single transaction.
    ///
    /// Live queries are notified after commit. An empty batch writes nothing
    /// and notifies no one.
    pub async fn insert(&self, movies: Vec<Movie>) -> StoreResult<usize> {
        if movies.is_empty() {
            debug!("Empty batch, nothing to upsert");
            return Ok(0);
        }

        let updated_at = Utc::now().to_rfc3339();
        let written = self
            .db
            .call(move |conn| queries::upsert_movies(conn, &movies, &updated_at))
            .await?;

        self.live.notify();
        debug!(count = written, "Upserted movies");
        Ok(written)
    }

    pub async fn load_movies(&self) -> StoreResult<Vec<Movie>> {
        self.db.call(queries::list_movies).await
    }

    pub async fn load_movie(&self, id: &str) -> StoreResult<Option<Movie>> {
        let id = id.to_string();
        self.db.call(move |conn| queries::get_movie(conn, &id)).await
    }

    pub async fn count(&self) -> StoreResult<u64> {
        self.db.call(queries::count_movies).await
    }

    /// Deletes every cached movie and notifies live queries.
    pub async fn clear(&self) -> StoreResult<usize> {
        let deleted = self.db.call(queries::delete_all_movies).await?;
        self.live.notify();
        info!(count = deleted, "Cleared movie cache");
        Ok(deleted)
    }

    /// Live query over all cached movies.
    pub fn watch_movies(&self) -> LiveQuery<Vec<Movie>> {
        let db = self.db.clone();
        live_query(self.live.subscribe(), move || {
            let db = db.clone();
            async move { db.call(queries::list_movies).await }
        })
    }

    /// Live query over one cached movie.
    pub fn watch_movie(&self, id: &str) -> LiveQuery<Option<Movie>> {
        let db = self.db.clone();
        let id = id.to_string();
        live_query(self.live.subscribe(), move || {
            let db = db.clone();
            let id = id.clone();
            async move { db.call(move |conn| queries::get_movie(conn, &id)).await }
        })
    }

    /// Number of open live queries.
    pub fn live_query_count(&self) -> usize {
        self.live.subscriber_count()
    }
}

fn live_query<T, F, Fut>(rx: watch::Receiver<u64>, read: F) -> LiveQuery<T>
where
    T: Send + 'static,
    F: Fn() -> Fut + Send + 'static,
    Fut: std::future::Future<Output = StoreResult<T>> + Send + 'static,
{
    stream::unfold((rx, read, true), |(mut rx, read, first)| async move {
        if !first && rx.changed().await.is_err() {
            return None;
        }
        // Mark the revision seen before reading so a write that lands
        // during the read triggers another one.
        rx.borrow_and_update();
        let result = read().await;
        Some((result, (rx, read, false)))
    })
    .boxed()
}
