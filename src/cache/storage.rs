//! Cache storage trait and file-system implementation.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{FetchError, Result};

/// Trait for cache storage backends.
pub trait CacheStorage {
  /// Whether an entry exists for `key`.
  fn has(&self, key: &str) -> bool;

  /// Read the raw entry for `key`.
  fn read(&self, key: &str) -> Result<String>;

  /// Store `value` under `key`, replacing any previous entry.
  fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// Storage implementation that doesn't cache anything.
/// Used when caching is disabled - every lookup misses.
pub struct NoopStorage;

impl CacheStorage for NoopStorage {
  fn has(&self, _key: &str) -> bool {
    false
  }

  fn read(&self, key: &str) -> Result<String> {
    Err(FetchError::CacheRead {
      path: PathBuf::from(key),
      source: std::io::Error::new(std::io::ErrorKind::NotFound, "caching is disabled"),
    })
  }

  fn write(&self, _key: &str, _value: &str) -> Result<()> {
    Ok(()) // Discard
  }
}

/// One `<key>.json` file per entry inside a single directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
  dir: PathBuf,
}

impl FileStorage {
  /// The directory is created lazily, on first write.
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  pub fn path_for(&self, key: &str) -> PathBuf {
    self.dir.join(format!("{}.json", key))
  }
}

impl CacheStorage for FileStorage {
  fn has(&self, key: &str) -> bool {
    self.path_for(key).is_file()
  }

  fn read(&self, key: &str) -> Result<String> {
    let path = self.path_for(key);
    debug!(path = %path.display(), "reading cache entry");
    fs::read_to_string(&path).map_err(|source| FetchError::CacheRead { path, source })
  }

  fn write(&self, key: &str, value: &str) -> Result<()> {
    // create_dir_all is a no-op when the directory already exists
    fs::create_dir_all(&self.dir).map_err(|source| FetchError::CacheWrite {
      path: self.dir.clone(),
      source,
    })?;

    let path = self.path_for(key);
    fs::write(&path, value).map_err(|source| FetchError::CacheWrite { path, source })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_missing_entry() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());
    assert!(!storage.has("abc"));
    assert!(matches!(
      storage.read("abc"),
      Err(FetchError::CacheRead { .. })
    ));
  }

  #[test]
  fn test_write_creates_directory() {
    let dir = tempfile::tempdir().unwrap();
    let cache_dir = dir.path().join("nested").join("cache");
    let storage = FileStorage::new(&cache_dir);

    storage.write("abc", r#"{"key":"PROJ-1"}"#).unwrap();

    assert!(cache_dir.is_dir());
    assert!(storage.has("abc"));
    assert_eq!(storage.read("abc").unwrap(), r#"{"key":"PROJ-1"}"#);
    assert_eq!(storage.path_for("abc"), cache_dir.join("abc.json"));
  }

  #[test]
  fn test_write_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());

    storage.write("abc", "first").unwrap();
    storage.write("abc", "second").unwrap();

    assert_eq!(storage.read("abc").unwrap(), "second");
  }

  #[test]
  fn test_write_fails_when_directory_cannot_be_created() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file where the cache directory should go
    let blocker = dir.path().join("cache");
    fs::write(&blocker, "not a directory").unwrap();

    let storage = FileStorage::new(&blocker);
    let err = storage.write("abc", "{}").unwrap_err();
    assert!(matches!(err, FetchError::CacheWrite { .. }));
  }

  #[test]
  fn test_noop_storage_never_hits() {
    let storage = NoopStorage;
    storage.write("abc", "{}").unwrap();
    assert!(!storage.has("abc"));
  }
}
