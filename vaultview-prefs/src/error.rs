//! Preference store error type.

use thiserror::Error;

/// Errors from the preference store and its backends.
///
/// Remote variants are recoverable by design: the store logs them and
/// keeps the local value authoritative. Database and serialization errors
/// propagate to the caller.
#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("database error: {0}")]
    Database(#[from] async_sqlite::Error),
    #[error("serialization error: {0}")]
    Serialization(bincode::Error),
    #[error("deserialization error: {0}")]
    Deserialization(bincode::Error),
    #[error("remote preference request failed: {0}")]
    Remote(#[from] reqwest::Error),
    #[error("remote preference service unavailable")]
    Unavailable,
}
