use std::time::Duration;

use burrow_storage::{KeyValueStore, RedisConfig, RedisStore, StoreError};
use burrow_test_infra::redis::{RedisServer, RedisServerConfig};

/// Test fixture that manages a Redis container using test-infra.
struct Fixture {
    _redis: RedisServer,
    store: RedisStore,
}

impl Fixture {
    async fn start() -> Self {
        let redis = RedisServer::new(RedisServerConfig::default())
            .await
            .expect("Failed to start Redis container");
        let host = redis.host().await.expect("Failed to get Redis host");
        let port = redis.port().await.expect("Failed to get Redis port");

        let config = RedisConfig::builder().host(host).port(port).build();
        let store = RedisStore::new(config).expect("Failed to create Redis store");
        init_with_retry(&store).await;

        Self {
            _redis: redis,
            store,
        }
    }
}

async fn init_with_retry(store: &RedisStore) {
    let mut last_error = None;

    for _ in 0..20 {
        match store.init().await {
            Ok(()) => return,
            Err(err) => {
                last_error = Some(err);
                tokio::time::sleep(Duration::from_millis(250)).await;
            }
        }
    }

    panic!("failed to connect redis: {last_error:?}");
}

#[tokio::test]
async fn put_then_get_returns_value() {
    let fixture = Fixture::start().await;
    let store = &fixture.store;

    assert!(store.get("WTdeW-ZF").await.unwrap().is_none());

    store
        .put("WTdeW-ZF", "http://example.com/path", None)
        .await
        .unwrap();

    let value = store.get("WTdeW-ZF").await.unwrap();
    assert_eq!(value.as_deref(), Some("http://example.com/path"));
}

#[tokio::test]
async fn put_is_an_upsert() {
    let fixture = Fixture::start().await;
    let store = &fixture.store;

    store.put("xmpl.com", "https://example.com", None).await.unwrap();
    store.put("xmpl.com", "https://exampla.com", None).await.unwrap();

    let value = store.get("xmpl.com").await.unwrap();
    assert_eq!(value.as_deref(), Some("https://exampla.com"));
}

#[tokio::test]
async fn mapping_with_ttl_is_readable_then_absent() {
    let fixture = Fixture::start().await;
    let store = &fixture.store;

    store
        .put("1", "https://example.com", Some(Duration::from_millis(300)))
        .await
        .unwrap();

    assert!(store.get("1").await.unwrap().is_some());

    tokio::time::sleep(Duration::from_millis(800)).await;

    // expiry reads as absent, not as an error
    assert!(store.get("1").await.unwrap().is_none());
}

#[tokio::test]
async fn value_is_stored_verbatim_under_the_bare_key() {
    let fixture = Fixture::start().await;
    let store = &fixture.store;
    let long_url = "https://example.com/a%20b?q=1&r=2#frag";

    store.put("raw", long_url, Some(Duration::from_secs(86_400))).await.unwrap();

    let client = redis::Client::open(store.config().url()).unwrap();
    let mut conn = client.get_multiplexed_async_connection().await.unwrap();
    let raw: Option<String> = redis::cmd("GET")
        .arg("raw")
        .query_async(&mut conn)
        .await
        .unwrap();
    assert_eq!(raw.as_deref(), Some(long_url));

    let ttl: i64 = redis::cmd("TTL").arg("raw").query_async(&mut conn).await.unwrap();
    assert!(ttl > 86_000 && ttl <= 86_400, "unexpected ttl {ttl}");
}

#[tokio::test]
async fn init_rejected_by_server_keeps_store_uninitialised() {
    let config = RedisServerConfig::builder()
        .server_args(vec!["--requirepass".to_string(), "secret".to_string()])
        .build();
    let redis = RedisServer::new(config)
        .await
        .expect("Failed to start Redis container");
    let host = redis.host().await.expect("Failed to get Redis host");
    let port = redis.port().await.expect("Failed to get Redis port");

    let store = RedisStore::new(RedisConfig::builder().host(host).port(port).build())
        .expect("Failed to create Redis store");

    // no password is configured, so the server refuses every command
    assert!(store.init().await.is_err());

    let err = store.get("WTdeW-ZF").await.unwrap_err();
    assert_eq!(err, StoreError::NotInitialized);
    let err = store
        .put("WTdeW-ZF", "http://example.com/path", None)
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::NotInitialized);
}
