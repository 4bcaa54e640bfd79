use crate::Result;
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};
use typed_builder::TypedBuilder;

const REDIS_PORT: u16 = 6379;

/// Settings for a throwaway Redis container.
#[derive(Debug, Clone, TypedBuilder)]
pub struct RedisServerConfig {
    /// Docker image name.
    #[builder(default = "redis".to_string(), setter(into))]
    pub image: String,
    /// Docker image tag.
    #[builder(default = "8.6.0".to_string(), setter(into))]
    pub tag: String,
    /// Arguments passed to `redis-server`, e.g. `["--requirepass", "secret"]`.
    #[builder(default, setter(into))]
    pub server_args: Vec<String>,
}

impl Default for RedisServerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A single Redis server running in a container.
///
/// The container is stopped when this value is dropped.
pub struct RedisServer {
    container: ContainerAsync<GenericImage>,
}

impl RedisServer {
    pub async fn new(config: RedisServerConfig) -> Result<Self> {
        let image = GenericImage::new(config.image, config.tag)
            .with_exposed_port(REDIS_PORT.tcp())
            .with_wait_for(WaitFor::message_on_stdout("Ready to accept connections"));

        let container = if config.server_args.is_empty() {
            image.start().await?
        } else {
            let cmd = std::iter::once("redis-server".to_string()).chain(config.server_args);
            image.with_cmd(cmd).start().await?
        };
        Ok(Self { container })
    }

    pub async fn host(&self) -> Result<String> {
        let host = self.container.get_host().await?.to_string();

        Ok(match host.as_str() {
            "localhost" => String::from("127.0.0.1"),
            _ => host,
        })
    }

    pub async fn port(&self) -> Result<u16> {
        Ok(self.container.get_host_port_ipv4(REDIS_PORT.tcp()).await?)
    }
}
