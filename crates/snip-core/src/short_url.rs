use serde::{Deserialize, Serialize};
use url::Url;

/// A cached mapping from a long URL to the short URL the service issued for it.
///
/// `long` and `short` never change once created; only `access_count` moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortUrl {
    /// The original URL, used as the cache key.
    pub long: Url,
    /// The shortened URL returned by the service.
    pub short: Url,
    /// Times the short URL was served, including the fetch that created it.
    #[serde(rename = "accessCount")]
    pub access_count: u64,
}

impl ShortUrl {
    /// Creates an entry with an access count of 1.
    pub fn new(long: Url, short: Url) -> Self {
        Self {
            long,
            short,
            access_count: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn new_entry_starts_at_one() {
        let mut entry = ShortUrl::new(
            url("http://example.com"),
            url("https://tinyurl.com/y2vayt2q"),
        );

        assert_eq!(entry.long.as_str(), "http://example.com/");
        assert_eq!(entry.short.as_str(), "https://tinyurl.com/y2vayt2q");
        assert_eq!(entry.access_count, 1);

        entry.access_count += 1;
        assert_eq!(entry.access_count, 2);
    }

    #[test]
    fn serializes_with_camel_case_count() {
        let entry = ShortUrl::new(url("http://example.com/a"), url("http://tinyurl.com/a"));
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "long": "http://example.com/a",
                "short": "http://tinyurl.com/a",
                "accessCount": 1
            })
        );
    }
}
