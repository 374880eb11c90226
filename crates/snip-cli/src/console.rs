use std::io::{self, Write};

use snip_cache::{SnapshotStore, UrlCache};
use snip_client::{TinyUrlClient, Transport};
use snip_core::parse_valid_url;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

const INVALID_URL_MESSAGE: &str = "Please enter a valid URL. (including the scheme http/https)";

/// Drives the cache and the client on behalf of the user.
///
/// The cache is consulted first; only a miss reaches the network, and a
/// successful fetch is written back to the cache.
pub struct Console<S, T, W> {
    cache: UrlCache<S>,
    client: TinyUrlClient<T>,
    out: W,
}

impl<S: SnapshotStore, T: Transport, W: Write> Console<S, T, W> {
    pub fn new(cache: UrlCache<S>, client: TinyUrlClient<T>, out: W) -> Self {
        Self { cache, client, out }
    }

    /// Prints the short url for `input`, from the cache or the service.
    pub async fn shorten(&mut self, input: &str) -> io::Result<()> {
        let input = input.trim();
        let Some(long) = parse_valid_url(input) else {
            return writeln!(self.out, "{INVALID_URL_MESSAGE}");
        };

        if let Some(short) = self.cache.get_short_url(&long) {
            return writeln!(self.out, "(cached) {short}");
        }

        match self.client.shorten_result(input).await {
            Ok(short) => {
                self.cache.add_url(long, short.clone());
                writeln!(self.out, "{short}")
            }
            Err(e) => {
                debug!(long = %long, error = ?e, "Shortening failed");
                writeln!(self.out, "Error: {e}")
            }
        }
    }

    /// Prints the `limit` most used cache entries. Negative limits print none.
    pub fn top(&mut self, limit: i64) -> io::Result<()> {
        let limit = usize::try_from(limit).unwrap_or(0);
        writeln!(self.out, "Top {limit} hits")?;
        for entry in self.cache.top_by_hits(limit) {
            writeln!(
                self.out,
                "{} - {} count: {}",
                entry.long, entry.short, entry.access_count
            )?;
        }
        Ok(())
    }

    /// Reads urls line by line until `q` or end of input.
    ///
    /// Each url is fully handled before the next prompt.
    pub async fn interactive<R>(&mut self, input: R) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        writeln!(self.out, "This program will shorten and cache a valid url.")?;
        writeln!(self.out, "Type 'q' to quit.")?;

        let mut lines = input.lines();
        loop {
            write!(self.out, "\nEnter URL: ")?;
            self.out.flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let line = line.trim();
            if line.eq_ignore_ascii_case("q") {
                break;
            }
            self.shorten(line).await?;
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn cache(&self) -> &UrlCache<S> {
        &self.cache
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.out
    }
}
