//! SQL for the movies table.
//!
//! Plain functions over a borrowed connection; they run inside
//! [`AsyncDatabase::call`](crate::AsyncDatabase::call).

use rusqlite::{params, Connection, OptionalExtension};

use crate::models::Movie;
use crate::StoreResult;

/// Upserts `movies` in one transaction. Returns the number of rows written.
pub fn upsert_movies(conn: &Connection, movies: &[Movie], updated_at: &str) -> StoreResult<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut written = 0;
    {
        let mut stmt = tx.prepare_cached(
            "INSERT INTO movies (id, title, overview, poster_url, backdrop_url, release_date,
                                 vote_average, popularity, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                overview = excluded.overview,
                poster_url = excluded.poster_url,
                backdrop_url = excluded.backdrop_url,
                release_date = excluded.release_date,
                vote_average = excluded.vote_average,
                popularity = excluded.popularity,
                updated_at = excluded.updated_at",
        )?;
        for movie in movies {
            written += stmt.execute(params![
                movie.id,
                movie.title,
                movie.overview,
                movie.poster_url,
                movie.backdrop_url,
                movie.release_date,
                movie.vote_average,
                movie.popularity,
                updated_at,
            ])?;
        }
    }
    tx.commit()?;
    Ok(written)
}

/// All cached movies, most popular first.
pub fn list_movies(conn: &Connection) -> StoreResult<Vec<Movie>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {} FROM movies ORDER BY popularity DESC, title ASC",
        Movie::COLUMNS
    ))?;
    let movies = stmt
        .query_map([], Movie::from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(movies)
}

pub fn get_movie(conn: &Connection, id: &str) -> StoreResult<Option<Movie>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {} FROM movies WHERE id = ?1",
        Movie::COLUMNS
    ))?;
    Ok(stmt.query_row(params![id], Movie::from_row).optional()?)
}

pub fn count_movies(conn: &Connection) -> StoreResult<u64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM movies", [], |row| row.get(0))?;
    Ok(count.max(0) as u64)
}

pub fn delete_all_movies(conn: &Connection) -> StoreResult<usize> {
    Ok(conn.execute("DELETE FROM movies", [])?)
}
