//! Persistent long-to-short URL cache with access counting.
//!
//! [`UrlCache`] keeps an insertion-ordered list of [`ShortUrl`] entries in
//! memory and mirrors it to a [`SnapshotStore`] after every mutation. The
//! default store, [`JsonFileStore`], writes a pretty-printed JSON array and
//! replaces the previous snapshot atomically.
//!
//! # Example
//!
//! ```rust,no_run
//! use snip_cache::{JsonFileStore, UrlCache};
//! use url::Url;
//!
//! let store = JsonFileStore::new(".", "ShortenedCache.json");
//! let mut cache = UrlCache::open(store);
//!
//! let long = Url::parse("http://example.com").unwrap();
//! if cache.get_short_url(&long).is_none() {
//!     let short = Url::parse("http://tinyurl.com/abc").unwrap();
//!     cache.add_url(long, short);
//! }
//! ```

pub mod cache;
pub mod store;

pub use cache::{UrlCache, DEFAULT_TOP_LIMIT};
pub use snip_core::{CacheError, ShortUrl};
pub use store::{JsonFileStore, SnapshotStore};

/// Type alias for cache results.
pub type Result<T> = std::result::Result<T, CacheError>;
