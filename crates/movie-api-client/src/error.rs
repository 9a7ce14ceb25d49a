//! Error types for catalogue requests.

use thiserror::Error;

/// Error type for all catalogue operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or transport-level HTTP error from reqwest.
    ///
    /// Includes connection failures, timeouts, and TLS errors.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalogue returned a non-success HTTP status.
    ///
    /// `message` is the catalogue's `status_message` when the body carries
    /// one, the raw body otherwise.
    #[error("Catalogue error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The response body did not match the expected schema.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid base URL, missing API key or client construction failure.
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type ApiResult<T> = Result<T, ApiError>;
