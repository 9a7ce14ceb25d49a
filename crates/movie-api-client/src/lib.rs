//! Remote movie catalogue access for movies-sync.
//!
//! [`MovieService`] is the seam the repository depends on; [`TmdbClient`]
//! implements it over HTTP with `reqwest`. Wire types keep every field
//! optional so one malformed item never fails a whole page.

mod client;
mod error;
mod service;
mod types;

pub use client::TmdbClient;
pub use error::{ApiError, ApiResult};
pub use service::MovieService;
pub use types::{MoviesPage, RawMovie};
