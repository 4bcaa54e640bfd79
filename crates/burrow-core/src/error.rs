use thiserror::Error;

/// Errors raised by a [`KeyValueStore`](crate::store::KeyValueStore) backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("store backend unavailable: {0}")]
    Unavailable(String),
    #[error("store operation timed out: {0}")]
    Timeout(String),
    #[error("store initialization failed: {0}")]
    Initialization(String),
    #[error("store used before initialization")]
    NotInitialized,
    #[error("store operation failed: {0}")]
    Operation(String),
}

/// Errors surfaced by a [`Shortener`](crate::shortener::Shortener).
#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("short code not found: {0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(#[source] StoreError),
    #[error("startup failed: {0}")]
    StartupFailure(#[source] StoreError),
}

impl From<StoreError> for ShortenerError {
    fn from(value: StoreError) -> Self {
        Self::Storage(value)
    }
}
