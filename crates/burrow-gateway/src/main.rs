mod app;
mod cli;
mod error;
mod handlers;
mod model;
mod state;
mod telemetry;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use burrow_core::KeyValueStore;
use burrow_generator::{AnyGenerator, Strategy};
use burrow_shortener::{ShortenerService, ShortenerSettings};
use burrow_storage::{InMemoryStore, RedisConfig, RedisStore};
use clap::Parser;
use tracing::info;

use crate::app::App;
use crate::cli::{StorageBackendArg, CLI};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    telemetry::init(config.log_format)?;

    let generator = AnyGenerator::from(Strategy::from(config.generator));
    let settings = ShortenerSettings {
        base_url: config.base_url.clone(),
        ttl: config.mapping_ttl(),
    };

    info!(
        listen_addr = %config.listen_addr,
        base_url = %settings.base_url,
        storage_backend = %config.storage,
        generator = %generator.strategy(),
        ttl = ?settings.ttl,
        "starting burrow gateway"
    );

    match config.storage {
        StorageBackendArg::InMemory => {
            run_server(config.listen_addr, InMemoryStore::new(), generator, settings).await
        }
        StorageBackendArg::Redis => {
            let host = config
                .redis_host
                .context("redis host is required when storage backend is redis")?;
            let port = config
                .redis_port
                .context("redis port is required when storage backend is redis")?;
            let store = RedisStore::new(RedisConfig::builder().host(host).port(port).build())?;
            run_server(config.listen_addr, store, generator, settings).await
        }
    }
}

async fn run_server<S: KeyValueStore>(
    listen_addr: SocketAddr,
    store: S,
    generator: AnyGenerator,
    settings: ShortenerSettings,
) -> anyhow::Result<()> {
    let service = ShortenerService::new(store, generator, settings);
    // nothing is served until the store is reachable
    service
        .init()
        .await
        .context("failed to initialise the key/value store")?;

    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("failed to bind {listen_addr}"))?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    let router = App::router(AppState::new(Arc::new(service)));
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
