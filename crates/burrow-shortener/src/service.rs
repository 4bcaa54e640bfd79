use async_trait::async_trait;
use burrow_core::{
    KeyValueStore, ShortCode, ShortLink, Shortener, ShortenerError, UrlMapping,
};
use burrow_generator::Generator;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, trace, warn};
use typed_builder::TypedBuilder;

/// Lifetime of a mapping written to an expiring backend.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Settings for a [`ShortenerService`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct ShortenerSettings {
    /// Public prefix of every short URL, e.g. `http://localhost:8888`.
    #[builder(setter(into))]
    pub base_url: String,
    /// TTL attached to every stored mapping; `None` keeps mappings forever.
    #[builder(default, setter(strip_option))]
    pub ttl: Option<Duration>,
}

/// A concrete implementation of the [`Shortener`] trait.
///
/// This service wraps a [`KeyValueStore`] and a [`Generator`]. Generated codes
/// are written with an unconditional upsert, so a code collision silently
/// replaces the earlier mapping. Store failures are reported once, without
/// retry.
#[derive(Debug)]
pub struct ShortenerService<S, G> {
    store: Arc<S>,
    generator: Arc<G>,
    settings: ShortenerSettings,
}

impl<S, G> Clone for ShortenerService<S, G> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            generator: Arc::clone(&self.generator),
            settings: self.settings.clone(),
        }
    }
}

impl<S: KeyValueStore, G: Generator> ShortenerService<S, G> {
    pub fn new(store: S, generator: G, settings: ShortenerSettings) -> Self {
        Self::from_shared(Arc::new(store), Arc::new(generator), settings)
    }

    /// Creates a service over a store and generator shared with other owners.
    pub fn from_shared(store: Arc<S>, generator: Arc<G>, settings: ShortenerSettings) -> Self {
        Self {
            store,
            generator,
            settings,
        }
    }

    /// Initialises the backing store.
    ///
    /// Must complete before the service takes traffic; any failure is a
    /// [`ShortenerError::StartupFailure`].
    pub async fn init(&self) -> Result<(), ShortenerError> {
        match self.store.init().await {
            Ok(()) => {
                info!(ttl = ?self.settings.ttl, "shortener store initialised");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "shortener store failed to initialise");
                Err(ShortenerError::StartupFailure(e))
            }
        }
    }

    fn generate_code(&self, long_url: &str) -> Result<ShortCode, ShortenerError> {
        let code = self.generator.generate(long_url);
        if code.is_empty() {
            return Err(ShortenerError::InvalidUrl(format!(
                "cannot derive a short code from '{long_url}'"
            )));
        }
        Ok(code)
    }
}

#[async_trait]
impl<S: KeyValueStore, G: Generator> Shortener for ShortenerService<S, G> {
    async fn shorten(&self, long_url: &str) -> Result<ShortLink, ShortenerError> {
        if long_url.is_empty() {
            return Err(ShortenerError::InvalidUrl(
                "URL cannot be empty".to_string(),
            ));
        }

        let code = self.generate_code(long_url)?;
        trace!(code = %code, "generated short code");

        let mapping = UrlMapping {
            short_code: code.to_string(),
            long_url: long_url.to_string(),
            ttl: self.settings.ttl,
        };
        self.store.put_mapping(&mapping).await.map_err(|e| {
            warn!(code = %code, error = %e, "failed to store mapping");
            ShortenerError::Storage(e)
        })?;

        let short_url = code.to_url(&self.settings.base_url);
        debug!(code = %code, short_url = %short_url, "shortened url");
        Ok(ShortLink { code, short_url })
    }

    async fn resolve(&self, code: &ShortCode) -> Result<String, ShortenerError> {
        trace!(code = %code, "resolving short code");

        match self.store.get(code.as_str()).await {
            Ok(Some(long_url)) => {
                debug!(code = %code, url = %long_url, "resolved short code");
                Ok(long_url)
            }
            Ok(None) => {
                trace!(code = %code, "short code not found");
                Err(ShortenerError::NotFound(code.to_string()))
            }
            Err(e) => {
                warn!(code = %code, error = %e, "failed to resolve short code");
                Err(ShortenerError::Storage(e))
            }
        }
    }
}
