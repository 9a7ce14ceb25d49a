//! Core configuration, paths, and logging bootstrap for movies-sync.

mod config;
mod error;
mod logging;
mod paths;

pub use config::{
    Config, DEFAULT_API_URL, DEFAULT_BACKDROP_SIZE, DEFAULT_IMAGE_BASE_URL, DEFAULT_LANGUAGE,
    DEFAULT_LOG_LEVEL, DEFAULT_POSTER_SIZE,
};
pub use error::{CoreError, CoreResult};
pub use logging::init_logging;
pub use paths::Paths;
