use async_trait::async_trait;
use burrow_core::store::{effective_ttl, KeyValueStore, Result};
use burrow_core::StoreError;
use jiff::{SignedDuration, Timestamp};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, trace};

/// In-memory storage entry for a key.
#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expire_at: Option<Timestamp>,
}

impl Entry {
    fn new(value: &str, ttl: Option<Duration>) -> Self {
        // a deadline past jiff's range is as good as no deadline
        let expire_at = effective_ttl(ttl)
            .and_then(|ttl| SignedDuration::try_from(ttl).ok())
            .and_then(|ttl| Timestamp::now().checked_add(ttl).ok());

        Self {
            value: value.to_owned(),
            expire_at,
        }
    }

    fn is_expired(&self) -> bool {
        self.expire_at
            .is_some_and(|expire_at| Timestamp::now() >= expire_at)
    }
}

/// In-memory implementation of [`KeyValueStore`] over a `RwLock<HashMap>`.
///
/// Readers share the lock, writers take it exclusively. Nothing is ever
/// evicted; a TTL given to `put` only makes the entry read as absent once it
/// has passed. Contents live for the lifetime of the process.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    storage: RwLock<HashMap<String, Entry>>,
    initialized: AtomicBool,
}

impl InMemoryStore {
    /// Creates a new, uninitialised in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included.
    #[cfg(test)]
    fn len(&self) -> usize {
        self.storage.read().len()
    }

    fn ensure_initialized(&self) -> Result<()> {
        if self.initialized.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(StoreError::NotInitialized)
        }
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn init(&self) -> Result<()> {
        self.initialized.store(true, Ordering::Release);
        debug!("in-memory store ready");
        Ok(())
    }

    async fn put(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        self.ensure_initialized()?;

        let entry = Entry::new(value, ttl);
        trace!(key, expire_at = ?entry.expire_at, "storing entry in memory");
        self.storage.write().insert(key.to_owned(), entry);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.ensure_initialized()?;

        let storage = self.storage.read();
        let Some(entry) = storage.get(key) else {
            trace!(key, "key not found in memory");
            return Ok(None);
        };

        if entry.is_expired() {
            trace!(key, "entry in memory has expired");
            return Ok(None);
        }

        Ok(Some(entry.value.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    async fn ready_store() -> InMemoryStore {
        let store = InMemoryStore::new();
        store.init().await.unwrap();
        store
    }

    #[tokio::test]
    async fn put_and_get() {
        let store = ready_store().await;

        store.put("abc123", "https://example.com", None).await.unwrap();

        let value = store.get("abc123").await.unwrap();
        assert_eq!(value.as_deref(), Some("https://example.com"));
    }

    #[tokio::test]
    async fn get_nonexistent() {
        let store = ready_store().await;

        assert!(store.get("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn put_overwrites_existing_key() {
        let store = ready_store().await;

        store.put("xmpl.com", "https://example.com", None).await.unwrap();
        store.put("xmpl.com", "https://exampla.com", None).await.unwrap();

        let value = store.get("xmpl.com").await.unwrap();
        assert_eq!(value.as_deref(), Some("https://exampla.com"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn operations_before_init_fail() {
        let store = InMemoryStore::new();

        let err = store.put("abc", "https://example.com", None).await.unwrap_err();
        assert_eq!(err, StoreError::NotInitialized);

        let err = store.get("abc").await.unwrap_err();
        assert_eq!(err, StoreError::NotInitialized);
    }

    #[tokio::test]
    async fn entry_within_ttl_is_readable() {
        let store = ready_store().await;

        store
            .put("abc123", "https://example.com", Some(Duration::from_secs(3600)))
            .await
            .unwrap();

        assert!(store.get("abc123").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn expired_entry_reads_as_absent() {
        let store = ready_store().await;

        store
            .put("abc123", "https://example.com", Some(Duration::from_millis(20)))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(store.get("abc123").await.unwrap().is_none());
        // nothing is evicted
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn zero_ttl_never_expires() {
        let store = ready_store().await;

        store
            .put("abc123", "https://example.com", Some(Duration::ZERO))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(store.get("abc123").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn concurrent_access() {
        let store = Arc::new(ready_store().await);
        let mut handles = vec![];

        for i in 0..10u64 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .put(&format!("code-{i:03}"), &format!("https://example{i}.com"), None)
                    .await
                    .unwrap();
            }));
        }

        for i in 0..10u64 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let _ = store.get(&format!("code-{i:03}")).await;
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        for i in 0..10u64 {
            let value = store.get(&format!("code-{i:03}")).await.unwrap();
            assert_eq!(value, Some(format!("https://example{i}.com")));
        }
    }
}
