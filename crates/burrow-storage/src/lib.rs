//! Key/value store backends for the Burrow URL shortener.

pub mod memory;
pub mod redis;

pub use burrow_core::store::{KeyValueStore, Result};
pub use burrow_core::StoreError;
pub use self::memory::InMemoryStore;
pub use self::redis::{RedisConfig, RedisStore};
