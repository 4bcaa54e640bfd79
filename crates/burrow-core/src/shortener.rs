use crate::error::ShortenerError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

type Result<T> = std::result::Result<T, ShortenerError>;

/// The outcome of shortening a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortLink {
    /// The generated short code.
    pub code: ShortCode,
    /// The public short URL, `base_url + "/" + code`.
    pub short_url: String,
}

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Shortens `long_url`, persists the mapping and returns the short link.
    async fn shorten(&self, long_url: &str) -> Result<ShortLink>;

    /// Resolves a short code to the long URL it was created from.
    ///
    /// Returns `Err(NotFound)` if the code is unknown or has expired.
    async fn resolve(&self, code: &ShortCode) -> Result<String>;
}
