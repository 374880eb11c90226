use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::trace;

use crate::Result;

/// Durable storage for the serialized cache snapshot.
///
/// A store holds exactly one snapshot; `write` replaces it wholesale.
pub trait SnapshotStore {
    /// Reads the current snapshot.
    ///
    /// Returns `Ok(None)` if nothing has been written yet.
    fn read(&self) -> Result<Option<Vec<u8>>>;

    /// Replaces the snapshot with `bytes`.
    ///
    /// Implementations must not leave a partially written snapshot behind.
    fn write(&self, bytes: &[u8]) -> Result<()>;
}

/// A [`SnapshotStore`] backed by a single file on disk.
///
/// Writes go to a temporary file in the same directory which is then renamed
/// over the target, so a crash mid-write keeps the previous snapshot intact.
/// Nothing coordinates several processes writing the same file: the last
/// rename wins.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store for `file_name` inside `dir`.
    pub fn new(dir: impl AsRef<Path>, file_name: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(file_name),
        }
    }

    /// Returns the path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

impl SnapshotStore for JsonFileStore {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        trace!(path = %self.path.display(), "Reading cache snapshot");

        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, bytes: &[u8]) -> Result<()> {
        trace!(path = %self.path.display(), len = bytes.len(), "Writing cache snapshot");

        let dir = self.parent_dir();
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path(), "missing.json");

        assert!(store.read().unwrap().is_none());
    }

    #[test]
    fn write_then_read() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path(), "cache.json");

        store.write(b"[]").unwrap();
        assert_eq!(store.read().unwrap().as_deref(), Some(&b"[]"[..]));

        store.write(b"[1]").unwrap();
        assert_eq!(store.read().unwrap().as_deref(), Some(&b"[1]"[..]));
    }

    #[test]
    fn write_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/deeper"), "cache.json");

        store.write(b"[]").unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn write_leaves_no_temporary_files() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path(), "cache.json");

        store.write(b"[]").unwrap();
        store.write(b"[]").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("cache.json")]);
    }

    #[test]
    fn read_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("cache.json")).unwrap();
        let store = JsonFileStore::new(dir.path(), "cache.json");

        assert!(store.read().is_err());
    }
}
