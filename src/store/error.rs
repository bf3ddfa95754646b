//! Error type for movie store operations.

use thiserror::Error;

/// Error type for movie store operations.
///
/// The `Display` text of each variant is the message returned to HTTP
/// callers, so keep it short and human readable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A record with this id already exists, or the id is empty.
    #[error("Movie with this ID already exists.")]
    Conflict(String),
    /// No record matches the id, or the id is empty.
    #[error("Movie not found.")]
    NotFound(String),
    /// The health probe did not complete within its bound.
    #[error("Error: timeout accessing MongoDB: {0}")]
    Timeout(String),
    /// The health probe failed for any other reason.
    #[error("Error accessing MongoDB: {0}")]
    Unavailable(String),
    /// The in-memory collection lock was poisoned by a panicking writer.
    #[error("movie store lock poisoned during {0}")]
    LockPoisoned(&'static str),
    /// The document database rejected a data operation.
    #[error("database error: {0}")]
    Database(String),
}

impl StoreError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::Conflict(_) => 409,
            StoreError::NotFound(_) => 404,
            StoreError::Timeout(_) => 500,
            StoreError::Unavailable(_) => 500,
            StoreError::LockPoisoned(_) => 500,
            StoreError::Database(_) => 500,
        }
    }

    /// Whether this error is reported as a problem document rather than a
    /// plain message.
    pub fn is_problem(&self) -> bool {
        self.status_code() >= 500
    }
}

#[cfg(feature = "mongo")]
impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}
