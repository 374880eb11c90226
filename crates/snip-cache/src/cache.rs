use std::cmp::Reverse;
use std::collections::HashSet;

use snip_core::{CacheError, ShortUrl};
use tracing::{debug, trace, warn};
use url::Url;

use crate::store::SnapshotStore;
use crate::Result;

/// Number of entries [`UrlCache::top_by_hits`] callers ask for by default.
pub const DEFAULT_TOP_LIMIT: usize = 3;

/// An ordered, persistent mapping from long URLs to short URLs.
///
/// The in-memory list is the source of truth while the process runs; the
/// store holds a snapshot that is rewritten after every mutation. Snapshot
/// failures are logged and swallowed by the mutators, so the cache keeps
/// working in memory when the disk does not cooperate.
///
/// Mutators take `&mut self`. Sharing a cache across threads needs an outer
/// lock around each call so the read-increment-write of
/// [`get_short_url`](Self::get_short_url) and the snapshot writes do not
/// interleave.
#[derive(Debug)]
pub struct UrlCache<S> {
    store: S,
    entries: Vec<ShortUrl>,
}

impl<S: SnapshotStore> UrlCache<S> {
    /// Creates an empty cache without reading the store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            entries: Vec::new(),
        }
    }

    /// Creates a cache and loads the existing snapshot, if any.
    ///
    /// A snapshot that cannot be loaded is logged and the cache starts empty.
    pub fn open(store: S) -> Self {
        let mut cache = Self::new(store);
        if let Err(e) = cache.load() {
            warn!(error = %e, "Failed to load url cache, starting empty");
        }
        cache
    }

    /// Replaces the in-memory entries with the stored snapshot.
    ///
    /// A missing snapshot leaves the cache untouched. On any error the
    /// in-memory entries are left as they were.
    pub fn load(&mut self) -> Result<()> {
        let Some(bytes) = self.store.read()? else {
            debug!("No cache snapshot found");
            return Ok(());
        };

        let entries: Vec<ShortUrl> = serde_json::from_slice(&bytes).map_err(|e| {
            CacheError::Serialization(format!("failed to parse cache snapshot: {e}"))
        })?;
        validate(&entries)?;

        debug!(entries = entries.len(), "Loaded cache snapshot");
        self.entries = entries;
        Ok(())
    }

    /// Writes every entry to the store, replacing the previous snapshot.
    pub fn save(&self) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(&self.entries).map_err(|e| {
            CacheError::Serialization(format!("failed to serialize cache snapshot: {e}"))
        })?;
        self.store.write(&bytes)
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            warn!(error = %e, "Failed to persist url cache, keeping it in memory");
        }
    }

    /// Finds the entry for `long`, returning its position and a copy.
    pub fn lookup(&self, long: &Url) -> Option<(usize, ShortUrl)> {
        self.entries
            .iter()
            .position(|entry| &entry.long == long)
            .map(|index| (index, self.entries[index].clone()))
    }

    /// Returns the cached short URL for `long`, counting the access.
    ///
    /// On a hit the entry's access count goes up by one and the snapshot is
    /// saved. A miss changes nothing.
    pub fn get_short_url(&mut self, long: &Url) -> Option<Url> {
        let Some((index, _)) = self.lookup(long) else {
            trace!(long = %long, "Cache miss");
            return None;
        };

        let entry = &mut self.entries[index];
        // counts stop at u64::MAX
        entry.access_count = entry.access_count.saturating_add(1);
        let short = entry.short.clone();
        debug!(long = %long, access_count = entry.access_count, "Cache hit");

        self.persist();
        Some(short)
    }

    /// Inserts a new entry with an access count of 1.
    ///
    /// If `long` is already cached nothing happens: the first short URL
    /// stays and its count is not touched. Returns whether an entry was added.
    pub fn add_url(&mut self, long: Url, short: Url) -> bool {
        if self.lookup(&long).is_some() {
            trace!(long = %long, "Url already cached, ignoring insert");
            return false;
        }

        debug!(long = %long, short = %short, "Caching short url");
        self.entries.push(ShortUrl::new(long, short));
        self.persist();
        true
    }

    /// Returns up to `limit` entries, most accessed first.
    ///
    /// Entries with equal counts keep their insertion order.
    pub fn top_by_hits(&self, limit: usize) -> Vec<ShortUrl> {
        let mut ranked = self.entries.clone();
        ranked.sort_by_key(|entry| Reverse(entry.access_count));
        ranked.truncate(limit);
        ranked
    }

    /// Returns all entries in insertion order.
    pub fn entries(&self) -> &[ShortUrl] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

fn validate(entries: &[ShortUrl]) -> Result<()> {
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if entry.access_count == 0 {
            return Err(CacheError::InvalidData(format!(
                "access count of '{}' must be at least 1",
                entry.long
            )));
        }
        if !seen.insert(&entry.long) {
            return Err(CacheError::InvalidData(format!(
                "duplicate entry for '{}'",
                entry.long
            )));
        }
    }
    Ok(())
}
