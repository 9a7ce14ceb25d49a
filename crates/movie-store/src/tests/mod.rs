//! Store behavior tests.
//!
//! - `writes.rs` - Upserts, ordering and persistence across reopen
//! - `live.rs`   - Live query re-emission

mod writes;

use crate::Movie;

pub(crate) fn movie(id: &str, title: &str, popularity: f64) -> Movie {
    Movie {
        id: id.to_string(),
        title: title.to_string(),
        overview: format!("{title} overview"),
        poster_url: Some(format!("https://image.tmdb.org/t/p/w342/{id}.jpg")),
        backdrop_url: None,
        release_date: Some("1979-05-25".to_string()),
        vote_average: 8.1,
        popularity,
    }
}
