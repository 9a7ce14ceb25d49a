//! Cached movie model.

use serde::{Deserialize, Serialize};

/// A movie as stored in the local cache.
///
/// `id` is the catalogue's identifier and the upsert key. Image URLs are
/// stored fully assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub overview: String,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: f64,
    pub popularity: f64,
}

impl Movie {
    pub(crate) const COLUMNS: &'static str =
        "id, title, overview, poster_url, backdrop_url, release_date, vote_average, popularity";

    pub(crate) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            overview: row.get(2)?,
            poster_url: row.get(3)?,
            backdrop_url: row.get(4)?,
            release_date: row.get(5)?,
            vote_average: row.get(6)?,
            popularity: row.get(7)?,
        })
    }
}
