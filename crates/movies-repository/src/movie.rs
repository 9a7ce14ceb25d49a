//! Mapping catalogue items into cached movies.

use movie_api_client::RawMovie;
use movie_store::Movie;

use crate::Configuration;

/// Construction of a domain value from its catalogue representation.
pub trait BuildMovie: Sized {
    /// Returns `None` when `raw` is unusable; such items are dropped, not
    /// reported as errors.
    fn build(raw: &RawMovie, configuration: &Configuration) -> Option<Self>;
}

impl BuildMovie for Movie {
    fn build(raw: &RawMovie, configuration: &Configuration) -> Option<Self> {
        let id = raw.id?;
        let title = raw
            .title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())?;

        Some(Movie {
            id: id.to_string(),
            title: title.to_string(),
            overview: raw.overview.clone().unwrap_or_default(),
            poster_url: raw
                .poster_path
                .as_deref()
                .and_then(|path| configuration.poster_url(path)),
            backdrop_url: raw
                .backdrop_path
                .as_deref()
                .and_then(|path| configuration.backdrop_url(path)),
            release_date: raw
                .release_date
                .clone()
                .filter(|date| !date.trim().is_empty()),
            vote_average: raw.vote_average.unwrap_or_default(),
            popularity: raw.popularity.unwrap_or_default(),
        })
    }
}
