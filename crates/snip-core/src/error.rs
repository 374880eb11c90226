use thiserror::Error;

/// Errors raised while loading or saving the cache snapshot.
///
/// None of these are fatal: the cache keeps its in-memory state and the
/// caller decides whether to report them.
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    #[error("cache snapshot i/o failed: {0}")]
    Io(String),
    #[error("cache serialization failed: {0}")]
    Serialization(String),
    #[error("cache snapshot is invalid: {0}")]
    InvalidData(String),
}

impl From<std::io::Error> for CacheError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

/// Failures reported by the shortening service client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TinyUrlError {
    /// Transport failure, non-200 status, or a body that is missing or not text.
    #[error("no data returned from the shortening service")]
    NoData,
    /// The service answered with its `Error` marker: it rejected the long URL.
    #[error("the shortening service rejected the url")]
    InvalidUrlEntered,
    /// The service answered with text that is not an absolute URL.
    #[error("the shortening service returned an unparsable url")]
    ParsingError,
}
