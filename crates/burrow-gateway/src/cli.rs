use burrow_generator::Strategy;
use burrow_shortener::DEFAULT_TTL;
use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::time::Duration;

pub const LISTEN_ADDR_ENV: &str = "BURROW_LISTEN_ADDR";
pub const BASE_URL_ENV: &str = "BASE_URL";
pub const STORAGE_BACKEND_ENV: &str = "BURROW_STORAGE_BACKEND";
pub const REDIS_HOST_ENV: &str = "REDIS_HOST";
pub const REDIS_PORT_ENV: &str = "REDIS_PORT";
pub const GENERATOR_ENV: &str = "BURROW_GENERATOR";
pub const TTL_SECS_ENV: &str = "BURROW_TTL_SECS";
pub const LOG_FORMAT_ENV: &str = "BURROW_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8888";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "redis")]
    Redis,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Redis => write!(f, "redis"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GeneratorArg {
    #[value(name = "counter")]
    Counter,
    #[value(name = "vowel-strip")]
    VowelStrip,
    #[value(name = "hash")]
    Hash,
}

impl From<GeneratorArg> for Strategy {
    fn from(value: GeneratorArg) -> Self {
        match value {
            GeneratorArg::Counter => Strategy::Counter,
            GeneratorArg::VowelStrip => Strategy::VowelStrip,
            GeneratorArg::Hash => Strategy::Hash,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[value(name = "pretty")]
    Pretty,
    #[value(name = "json")]
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "burrow", about = "URL shortener HTTP gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Prefix of every short URL handed out, e.g. http://localhost:8888
    #[arg(long, env = BASE_URL_ENV)]
    pub base_url: String,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = REDIS_HOST_ENV, required_if_eq("storage", "redis"))]
    pub redis_host: Option<String>,

    #[arg(long, env = REDIS_PORT_ENV, required_if_eq("storage", "redis"))]
    pub redis_port: Option<u16>,

    #[arg(long, env = GENERATOR_ENV, value_enum, default_value_t = GeneratorArg::Hash)]
    pub generator: GeneratorArg,

    /// Mapping lifetime in seconds; 0 disables expiry.
    /// Defaults to 24 hours for redis and no expiry in memory.
    #[arg(long, env = TTL_SECS_ENV)]
    pub ttl_secs: Option<u64>,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl CLI {
    /// The TTL attached to stored mappings for the selected backend.
    pub fn mapping_ttl(&self) -> Option<Duration> {
        match (self.ttl_secs, self.storage) {
            (Some(0), _) => None,
            (Some(secs), _) => Some(Duration::from_secs(secs)),
            (None, StorageBackendArg::Redis) => Some(DEFAULT_TTL),
            (None, StorageBackendArg::InMemory) => None,
        }
    }
}
