//! Core types for the snip URL shortener.
//!
//! This crate provides the types shared by the cache, the shortening
//! client and the command line driver.

pub mod error;
pub mod short_url;
pub mod validate;

pub use error::{CacheError, TinyUrlError};
pub use short_url::ShortUrl;
pub use validate::parse_valid_url;
