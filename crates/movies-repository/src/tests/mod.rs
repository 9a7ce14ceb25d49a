//! Facade tests against an in-memory store and a scripted catalogue.
//!
//! - `reconcile.rs` - `movies()` and `movie(id)` cycles
//! - `paging.rs`    - `query_next_page` / `reset_next_page` through the facade


use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bound_resource::TokioExecutor;
use movie_api_client::{ApiError, ApiResult, MovieService, MoviesPage, RawMovie};
use movie_store::MovieStore;
use parking_lot::Mutex;

use crate::{Configuration, MoviesRepository};

pub(crate) fn raw(id: u64, title: &str, popularity: f64) -> RawMovie {
    RawMovie {
        id: Some(id),
        title: Some(title.to_string()),
        poster_path: Some(format!("/{id}.jpg")),
        popularity: Some(popularity),
        ..Default::default()
    }
}

pub(crate) fn page(number: u32, total_pages: u32, results: Vec<RawMovie>) -> MoviesPage {
    MoviesPage {
        page: Some(number),
        total_results: Some(results.len() as u64),
        results: Some(results),
        total_pages: Some(total_pages),
    }
}

/// Catalogue that answers from scripted responses and records every call.
#[derive(Default)]
pub(crate) struct FakeMovieService {
    pages: Mutex<HashMap<u32, Result<MoviesPage, u16>>>,
    movies: Mutex<HashMap<String, Result<RawMovie, u16>>>,
    pub page_calls: Mutex<Vec<u32>>,
    pub movie_calls: Mutex<Vec<String>>,
}

impl FakeMovieService {
    pub fn with_page(self, number: u32, response: MoviesPage) -> Self {
        self.pages.lock().insert(number, Ok(response));
        self
    }

    pub fn with_failing_page(self, number: u32, status: u16) -> Self {
        self.pages.lock().insert(number, Err(status));
        self
    }

    pub fn with_movie(self, id: &str, response: RawMovie) -> Self {
        self.movies.lock().insert(id.to_string(), Ok(response));
        self
    }

    pub fn set_page(&self, number: u32, response: MoviesPage) {
        self.pages.lock().insert(number, Ok(response));
    }

    pub fn page_calls(&self) -> Vec<u32> {
        self.page_calls.lock().clone()
    }
}

fn api_error(status: u16) -> ApiError {
    ApiError::Api {
        status,
        message: "scripted failure".to_string(),
    }
}

#[async_trait]
impl MovieService for FakeMovieService {
    async fn popular_movies(&self, page: u32) -> ApiResult<MoviesPage> {
        self.page_calls.lock().push(page);
        match self.pages.lock().get(&page) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(status)) => Err(api_error(*status)),
            None => Err(api_error(404)),
        }
    }

    async fn movie(&self, movie_id: &str) -> ApiResult<RawMovie> {
        self.movie_calls.lock().push(movie_id.to_string());
        match self.movies.lock().get(movie_id) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(status)) => Err(api_error(*status)),
            None => Err(api_error(404)),
        }
    }
}

pub(crate) async fn repository(
    service: FakeMovieService,
) -> (MoviesRepository<TokioExecutor>, Arc<FakeMovieService>) {
    let service = Arc::new(service);
    let store = MovieStore::in_memory().await.unwrap();
    let repository = MoviesRepository::new(
        TokioExecutor::try_current().unwrap(),
        Configuration::default(),
        service.clone(),
        store,
    );
    (repository, service)
}
