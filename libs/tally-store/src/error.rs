//! Error types for tally-store

use thiserror::Error;

/// Persistence errors
///
/// Every underlying failure (connectivity, key collision, malformed row)
/// surfaces as the single opaque `Storage` condition; callers cannot and
/// should not distinguish transient from permanent failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage failure: {0}")]
    Storage(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
