pub mod counter;
pub mod hash;
pub mod vowel;

use burrow_core::ShortCode;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub use counter::CounterGenerator;
pub use hash::HashGenerator;
pub use vowel::VowelStripGenerator;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage.
/// An empty [`ShortCode`] means the input was rejected.
pub trait Generator: Send + Sync + 'static {
    /// Derives a short code for `long_url`.
    fn generate(&self, long_url: &str) -> ShortCode;
}

/// The available code generation strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Process-local monotonic counter.
    Counter,
    /// Long URL with the vowels before its last dot removed.
    VowelStrip,
    /// Truncated SHA-256 of host and path.
    #[default]
    Hash,
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Counter => write!(f, "counter"),
            Strategy::VowelStrip => write!(f, "vowel-strip"),
            Strategy::Hash => write!(f, "hash"),
        }
    }
}

/// A generator chosen at runtime from a [`Strategy`].
#[derive(Debug)]
pub enum AnyGenerator {
    Counter(CounterGenerator),
    VowelStrip(VowelStripGenerator),
    Hash(HashGenerator),
}

impl AnyGenerator {
    pub fn strategy(&self) -> Strategy {
        match self {
            AnyGenerator::Counter(_) => Strategy::Counter,
            AnyGenerator::VowelStrip(_) => Strategy::VowelStrip,
            AnyGenerator::Hash(_) => Strategy::Hash,
        }
    }
}

impl From<Strategy> for AnyGenerator {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Counter => AnyGenerator::Counter(CounterGenerator::new()),
            Strategy::VowelStrip => AnyGenerator::VowelStrip(VowelStripGenerator),
            Strategy::Hash => AnyGenerator::Hash(HashGenerator),
        }
    }
}

impl Generator for AnyGenerator {
    fn generate(&self, long_url: &str) -> ShortCode {
        match self {
            AnyGenerator::Counter(generator) => generator.generate(long_url),
            AnyGenerator::VowelStrip(generator) => generator.generate(long_url),
            AnyGenerator::Hash(generator) => generator.generate(long_url),
        }
    }
}
