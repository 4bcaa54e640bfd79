use crate::error::StoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub type Result<T> = std::result::Result<T, StoreError>;

/// A short code to long URL mapping as handed to a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlMapping {
    /// The lookup key.
    pub short_code: String,
    /// The original URL, stored verbatim.
    pub long_url: String,
    /// How long the mapping stays readable, if bounded.
    pub ttl: Option<Duration>,
}

/// A flat string key/value store with optional per-key expiry.
///
/// Backends must be initialised with [`init`](KeyValueStore::init) before
/// any `put` or `get`. A `put` that returned `Ok` is visible to a later
/// `get` on the same backend.
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    /// Establishes the connection or state backing the store.
    async fn init(&self) -> Result<()>;

    /// Unconditionally upserts `key`.
    ///
    /// With `ttl` of `None` (or zero) the value never expires; otherwise it
    /// becomes unreadable once `ttl` has elapsed.
    async fn put(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()>;

    /// Fetches the value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key was never set or has expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores a whole [`UrlMapping`].
    async fn put_mapping(&self, mapping: &UrlMapping) -> Result<()> {
        self.put(&mapping.short_code, &mapping.long_url, mapping.ttl)
            .await
    }
}

/// Normalises a requested TTL: a zero duration means "no expiry".
pub fn effective_ttl(ttl: Option<Duration>) -> Option<Duration> {
    ttl.filter(|ttl| !ttl.is_zero())
}
