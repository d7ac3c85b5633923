//! Error types for the library layer.

use crate::db::DbError;

/// Errors produced by the library layer, wrapping client, storage and
/// input validation failures.
#[derive(thiserror::Error, Debug)]
pub enum NewsdeskError {
    /// An error from the underlying news API client.
    #[error("API error: {0}")]
    Api(#[from] newsapi_client::Error),
    /// Reading or writing local state failed.
    #[error("Storage error: {0}")]
    Storage(#[from] DbError),
    /// The HTTP transport could not be built.
    #[error("HTTP setup error: {0}")]
    Http(#[from] reqwest::Error),
    /// User-provided input failed validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl NewsdeskError {
    /// True when the failure came from a news API call.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Api(_))
    }
}
