//! URL shortener service implementation.
//!
//! This crate wires a code [`Generator`](burrow_generator::Generator) to a
//! [`KeyValueStore`](burrow_core::KeyValueStore). Core types are re-exported
//! from `burrow_core`.

pub mod service;

pub use burrow_core::{ShortCode, ShortLink, Shortener, ShortenerError};
pub use service::{ShortenerService, ShortenerSettings, DEFAULT_TTL};
