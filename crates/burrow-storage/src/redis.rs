use async_trait::async_trait;
use burrow_core::store::{effective_ttl, KeyValueStore, Result};
use burrow_core::StoreError;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, trace, warn};
use typed_builder::TypedBuilder;

/// Connection settings for [`RedisStore`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct RedisConfig {
    /// Redis server host name or address.
    #[builder(setter(into))]
    pub host: String,
    /// Redis server port.
    #[builder(default = 6379)]
    pub port: u16,
    /// Upper bound on establishing the connection during `init`.
    #[builder(default, setter(strip_option))]
    pub connect_timeout: Option<Duration>,
}

impl RedisConfig {
    /// The `redis://` connection URL for this configuration.
    pub fn url(&self) -> String {
        format!("redis://{}:{}/", self.host, self.port)
    }
}

fn map_redis_error(operation: &str, err: redis::RedisError) -> StoreError {
    let message = format!("{operation}: {err}");
    if err.is_timeout() {
        StoreError::Timeout(message)
    } else if err.is_io_error() || err.is_connection_refusal() || err.is_connection_dropped() {
        StoreError::Unavailable(message)
    } else {
        StoreError::Operation(message)
    }
}

/// A Redis-backed implementation of [`KeyValueStore`].
///
/// Keys are stored flat, without a prefix, and values are the raw long URL.
/// Expiry is delegated to Redis via `PSETEX`.
#[derive(Debug)]
pub struct RedisStore {
    client: redis::Client,
    config: RedisConfig,
    conn: OnceCell<MultiplexedConnection>,
}

impl RedisStore {
    /// Creates a store for the given configuration.
    ///
    /// No connection is made until [`init`](KeyValueStore::init).
    pub fn new(config: RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url()).map_err(|e| {
            StoreError::Initialization(format!("invalid redis url '{}': {e}", config.url()))
        })?;

        Ok(Self {
            client,
            config,
            conn: OnceCell::new(),
        })
    }

    pub fn config(&self) -> &RedisConfig {
        &self.config
    }

    async fn connect(&self) -> Result<MultiplexedConnection> {
        let connecting = self.client.get_multiplexed_async_connection();

        let conn = match self.config.connect_timeout {
            Some(limit) => tokio::time::timeout(limit, connecting)
                .await
                .map_err(|_| {
                    StoreError::Timeout(format!(
                        "connecting to {} took longer than {limit:?}",
                        self.config.url()
                    ))
                })?,
            None => connecting.await,
        };

        let mut conn = conn.map_err(|e| map_redis_error("failed to connect to Redis", e))?;

        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map_err(|e| map_redis_error("failed to ping Redis", e))?;

        Ok(conn)
    }

    fn connection(&self) -> Result<MultiplexedConnection> {
        self.conn.get().cloned().ok_or(StoreError::NotInitialized)
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn init(&self) -> Result<()> {
        let url = self.config.url();
        debug!(url = %url, "connecting to Redis");

        // only a connection that answered PING is kept
        self.conn
            .get_or_try_init(|| self.connect())
            .await
            .inspect_err(|e| warn!(url = %url, error = %e, "Redis connection failed"))?;

        debug!(url = %url, "Redis store ready");
        Ok(())
    }

    async fn put(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.connection()?;
        trace!(key, ttl = ?ttl, "storing value in Redis");

        let result = match effective_ttl(ttl) {
            Some(ttl) => {
                let millis = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1);
                conn.pset_ex::<_, _, ()>(key, value, millis).await
            }
            None => conn.set::<_, _, ()>(key, value).await,
        };

        match result {
            Ok(()) => {
                debug!(key, "stored value in Redis");
                Ok(())
            }
            Err(e) => {
                warn!(key, error = %e, "failed to store value in Redis");
                Err(map_redis_error("failed to write value to Redis", e))
            }
        }
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection()?;
        trace!(key, "fetching value from Redis");

        match conn.get::<_, Option<String>>(key).await {
            Ok(Some(value)) => {
                debug!(key, "key found in Redis");
                Ok(Some(value))
            }
            Ok(None) => {
                trace!(key, "key not found in Redis");
                Ok(None)
            }
            Err(e) => {
                warn!(key, error = %e, "Redis error on get");
                Err(map_redis_error("failed to fetch value from Redis", e))
            }
        }
    }
}
