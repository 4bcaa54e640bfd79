//! Core types and traits for the Burrow URL shortener.
//!
//! This crate provides the short code type, the key/value store contract
//! and the shortener contract shared by the generator, storage, service
//! and gateway crates.

pub mod error;
pub mod shortcode;
pub mod shortener;
pub mod store;

pub use error::{ShortenerError, StoreError};
pub use shortcode::ShortCode;
pub use shortener::{ShortLink, Shortener};
pub use store::{KeyValueStore, UrlMapping};
