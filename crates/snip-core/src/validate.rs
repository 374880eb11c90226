use url::Url;

/// Parses `candidate` and returns it if it carries both a scheme and a host.
///
/// The cache and the client assume their inputs went through this check.
pub fn parse_valid_url(candidate: &str) -> Option<Url> {
    let url = Url::parse(candidate.trim()).ok()?;
    url.host_str().filter(|host| !host.is_empty())?;
    Some(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_scheme_and_host() {
        assert!(parse_valid_url("http://example.com").is_some());
        assert!(parse_valid_url("https://example.com/a/b?c=d").is_some());
        assert!(parse_valid_url("  https://example.com  ").is_some());
    }

    #[test]
    fn rejects_missing_scheme() {
        assert!(parse_valid_url("example.com").is_none());
        assert!(parse_valid_url("").is_none());
    }

    #[test]
    fn rejects_missing_host() {
        assert!(parse_valid_url("mailto:someone@example.com").is_none());
        assert!(parse_valid_url("file:///tmp/cache.json").is_none());
    }
}
