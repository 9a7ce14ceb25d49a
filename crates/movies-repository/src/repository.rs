//! The movies facade: cache-backed reconcilers plus incremental paging.

use std::sync::Arc;

use bound_resource::{
    network_bound_resource, BoxError, ExecutionContext, LoadMoreState, LocalStream,
    NetworkBoundResource, NextPageHandler, PageRequest, FIRST_PAGE,
};
use futures_util::stream::{BoxStream, StreamExt};
use movie_api_client::{MovieService, MoviesPage, RawMovie};
use movie_store::{Movie, MovieStore, StoreResult};
use tracing::{debug, info};

use crate::{BuildMovie, Configuration};

type HasMorePages = Arc<dyn Fn(&MoviesPage) -> bool + Send + Sync>;

/// Maps raw items into movies, drops the unusable ones and upserts the rest.
pub(crate) async fn save_movies(
    store: &MovieStore,
    configuration: &Configuration,
    raws: &[RawMovie],
) -> StoreResult<usize> {
    let movies: Vec<Movie> = raws
        .iter()
        .filter_map(|raw| Movie::build(raw, configuration))
        .collect();
    let dropped = raws.len() - movies.len();
    if dropped > 0 {
        debug!(count = dropped, "Dropped malformed catalogue items");
    }
    store.insert(movies).await
}

/// Movies backed by the local cache and refreshed from the catalogue.
///
/// Holds nothing but its collaborators and the single pager bound to the
/// popular listing.
pub struct MoviesRepository<C: ExecutionContext> {
    ctx: C,
    configuration: Arc<Configuration>,
    service: Arc<dyn MovieService>,
    store: MovieStore,
    next_page_handler: NextPageHandler<MoviesPage, C>,
}

impl<C: ExecutionContext> MoviesRepository<C> {
    /// Creates the facade; paging stops when [`MoviesPage::has_more_pages`]
    /// says so.
    pub fn new(
        ctx: C,
        configuration: Configuration,
        service: Arc<dyn MovieService>,
        store: MovieStore,
    ) -> Self {
        let configuration = Arc::new(configuration);
        let has_more: HasMorePages = Arc::new(MoviesPage::has_more_pages);
        let next_page_handler =
            Self::build_next_page_handler(&ctx, &configuration, &service, &store, has_more);

        Self {
            ctx,
            configuration,
            service,
            store,
            next_page_handler,
        }
    }

    /// Replaces the end-of-listing predicate. Paging restarts on the first page.
    pub fn with_has_more_pages<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&MoviesPage) -> bool + Send + Sync + 'static,
    {
        self.next_page_handler = Self::build_next_page_handler(
            &self.ctx,
            &self.configuration,
            &self.service,
            &self.store,
            Arc::new(predicate),
        );
        self
    }

    fn build_next_page_handler(
        ctx: &C,
        configuration: &Arc<Configuration>,
        service: &Arc<dyn MovieService>,
        store: &MovieStore,
        has_more: HasMorePages,
    ) -> NextPageHandler<MoviesPage, C> {
        let save_store = store.clone();
        let save_configuration = Arc::clone(configuration);
        let fetch_service = Arc::clone(service);

        NextPageHandler::new(
            ctx.clone(),
            move |page: MoviesPage| {
                let store = save_store.clone();
                let configuration = Arc::clone(&save_configuration);
                async move {
                    save_movies(&store, &configuration, page.items())
                        .await
                        .map(|_| ())
                }
            },
            move |page| {
                let service = Arc::clone(&fetch_service);
                async move { service.popular_movies(page).await }
            },
            move |page: &MoviesPage| has_more(page),
        )
    }

    /// One reconciliation cycle over the whole cached collection, refreshed
    /// from the first page of the popular listing.
    pub fn movies(&self) -> NetworkBoundResource<Vec<Movie>> {
        let local_store = self.store.clone();
        let save_store = self.store.clone();
        let configuration = Arc::clone(&self.configuration);
        let service = Arc::clone(&self.service);

        info!("Refreshing popular movies");
        network_bound_resource(
            &self.ctx,
            move || -> LocalStream<Vec<Movie>> {
                local_store
                    .watch_movies()
                    .map(|result| result.map(Some).map_err(BoxError::from))
                    .boxed()
            },
            move || async move { service.popular_movies(FIRST_PAGE).await },
            move |page: MoviesPage| async move {
                save_movies(&save_store, &configuration, page.items())
                    .await
                    .map(|_| ())
            },
        )
    }

    /// One reconciliation cycle over a single cached movie.
    pub fn movie(&self, movie_id: &str) -> NetworkBoundResource<Movie> {
        let local_store = self.store.clone();
        let save_store = self.store.clone();
        let configuration = Arc::clone(&self.configuration);
        let service = Arc::clone(&self.service);
        let local_id = movie_id.to_string();
        let fetch_id = movie_id.to_string();

        info!(movie_id, "Refreshing movie");
        network_bound_resource(
            &self.ctx,
            move || -> LocalStream<Movie> {
                local_store
                    .watch_movie(&local_id)
                    .map(|result| result.map_err(BoxError::from))
                    .boxed()
            },
            move || async move { service.movie(&fetch_id).await },
            move |raw: RawMovie| async move {
                save_movies(&save_store, &configuration, std::slice::from_ref(&raw))
                    .await
                    .map(|_| ())
            },
        )
    }

    /// Paging progress: the current state, then every transition.
    pub fn load_more_state(&self) -> BoxStream<'static, LoadMoreState> {
        self.next_page_handler.as_stream()
    }

    /// Fetches the next page of the popular listing into the cache.
    pub async fn query_next_page(&self) -> PageRequest {
        self.next_page_handler.query_next_page().await
    }

    /// Rewinds paging to the first page.
    pub fn reset_next_page(&self) {
        self.next_page_handler.reset()
    }

    pub fn next_page_handler(&self) -> &NextPageHandler<MoviesPage, C> {
        &self.next_page_handler
    }

    pub fn store(&self) -> &MovieStore {
        &self.store
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }
}
