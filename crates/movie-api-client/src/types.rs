//! Catalogue wire types.
//!
//! Every field is optional: malformed items must deserialize so they can be
//! filtered out individually instead of failing the whole page.

use serde::{Deserialize, Serialize};

/// One page of the popular movies listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoviesPage {
    pub page: Option<u32>,
    pub results: Option<Vec<RawMovie>>,
    pub total_pages: Option<u32>,
    pub total_results: Option<u64>,
}

impl MoviesPage {
    /// Items on this page; `results: null` counts as an empty page.
    pub fn items(&self) -> &[RawMovie] {
        self.results.as_deref().unwrap_or_default()
    }

    /// Whether another page is worth requesting.
    ///
    /// Trusts `page < total_pages` when the catalogue reports both, and
    /// otherwise keeps going for as long as pages are non-empty.
    pub fn has_more_pages(&self) -> bool {
        match (self.page, self.total_pages) {
            (Some(page), Some(total)) => page < total,
            _ => !self.items().is_empty(),
        }
    }
}

/// A movie as the catalogue sends it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawMovie {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub popularity: Option<f64>,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub status_message: Option<String>,
}
