//! HTTP client for a TMDB-compatible catalogue.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use url::Url;

use crate::error::{ApiError, ApiResult};
use crate::service::MovieService;
use crate::types::{ErrorBody, MoviesPage, RawMovie};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Catalogue REST client.
#[derive(Clone)]
pub struct TmdbClient {
    http_client: reqwest::Client,
    api_url: Url,
    api_key: String,
    language: String,
}

impl TmdbClient {
    /// Creates a client.
    ///
    /// # Arguments
    /// * `api_url` - Catalogue base URL (e.g. `https://api.themoviedb.org/3`)
    /// * `api_key` - API key sent as the `api_key` query parameter
    /// * `language` - Response language (e.g. `en-US`)
    pub fn new(api_url: Url, api_key: impl Into<String>, language: impl Into<String>) -> ApiResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ApiError::Config("API key is empty".to_string()));
        }
        if api_url.cannot_be_a_base() {
            return Err(ApiError::Config(format!("{api_url} cannot be used as a base URL")));
        }

        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            api_url,
            api_key,
            language: language.into(),
        })
    }

    /// Builds `{api_url}/{segments..}?api_key=..&language=..[&extra..]`.
    fn endpoint(&self, segments: &[&str], extra: &[(&str, String)]) -> ApiResult<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Config(format!("{} cannot be used as a base URL", self.api_url)))?
            .pop_if_empty()
            .extend(segments);
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("api_key", &self.api_key);
            query.append_pair("language", &self.language);
            for (key, value) in extra {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }

    pub(crate) fn popular_url(&self, page: u32) -> ApiResult<Url> {
        self.endpoint(&["movie", "popular"], &[("page", page.to_string())])
    }

    pub(crate) fn movie_url(&self, movie_id: &str) -> ApiResult<Url> {
        self.endpoint(&["movie", movie_id], &[])
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        let response = self.http_client.get(url).send().await?;
        let response = Self::check_response(response).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn check_response(response: Response) -> ApiResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|parsed| parsed.status_message)
            .unwrap_or(body);
        error!(status, %message, "Catalogue request failed");
        Err(ApiError::Api { status, message })
    }
}

#[async_trait]
impl MovieService for TmdbClient {
    async fn popular_movies(&self, page: u32) -> ApiResult<MoviesPage> {
        debug!(page, "Fetching popular movies");
        let result: MoviesPage = self.get_json(self.popular_url(page)?).await?;
        debug!(
            page,
            count = result.items().len(),
            total_pages = result.total_pages,
            "Fetched popular movies"
        );
        Ok(result)
    }

    async fn movie(&self, movie_id: &str) -> ApiResult<RawMovie> {
        debug!(movie_id, "Fetching movie");
        self.get_json(self.movie_url(movie_id)?).await
    }
}

impl std::fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbClient")
            .field("api_url", &self.api_url.as_str())
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> TmdbClient {
        TmdbClient::new(Url::parse(base).unwrap(), "secret", "en-US").unwrap()
    }

    #[test]
    fn popular_url_carries_key_language_and_page() {
        let url = client("https://api.themoviedb.org/3").popular_url(2).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.themoviedb.org/3/movie/popular?api_key=secret&language=en-US&page=2"
        );
    }

    #[test]
    fn trailing_slash_in_base_is_ignored() {
        let url = client("https://api.themoviedb.org/3/").movie_url("348").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.themoviedb.org/3/movie/348?api_key=secret&language=en-US"
        );
    }

    #[test]
    fn movie_id_is_percent_encoded() {
        let url = client("http://localhost:8080").movie_url("a/b").unwrap();
        assert_eq!(url.path(), "/movie/a%2Fb");
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let err = TmdbClient::new(Url::parse("https://example.org").unwrap(), " ", "en-US")
            .unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn debug_hides_the_api_key() {
        let rendered = format!("{:?}", client("https://api.themoviedb.org/3"));
        assert!(!rendered.contains("secret"));
    }

    #[tokio::test]
    async fn unreachable_host_is_an_http_error() {
        let err = client("http://127.0.0.1:9").popular_movies(1).await.unwrap_err();
        assert!(matches!(err, ApiError::Http(_)));
    }
}
