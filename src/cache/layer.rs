//! Cache layer that puts a storage backend in front of a network fetch.

use std::future::Future;

use tracing::{debug, info};

use super::storage::CacheStorage;
use crate::error::Result;

/// Where a body came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSource {
  Network,
  Cache,
}

/// Cache layer that manages cache lookups and network fetching.
///
/// Entries never go stale: once a key is stored it is served from disk on
/// every later call until something outside this process deletes it.
pub struct CacheLayer {
  storage: Box<dyn CacheStorage>,
}

impl CacheLayer {
  /// Create a new cache layer with the given storage backend.
  pub fn new(storage: impl CacheStorage + 'static) -> Self {
    Self {
      storage: Box::new(storage),
    }
  }

  /// Fetch a raw body with a cache-first strategy.
  ///
  /// 1. If the key is cached, return the stored body
  /// 2. Otherwise run the fetcher; errors propagate and nothing is stored
  /// 3. Store the body if it is non-empty, then return it
  pub async fn fetch_raw<F, Fut>(&self, key: &str, fetcher: F) -> Result<(String, CacheSource)>
  where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<String>>,
  {
    if self.storage.has(key) {
      debug!(key, "cache hit");
      let body = self.storage.read(key)?;
      return Ok((body, CacheSource::Cache));
    }

    debug!(key, "cache miss");
    let body = fetcher().await?;

    if !body.is_empty() {
      self.storage.write(key, &body)?;
      info!(key, bytes = body.len(), "cached response");
    }

    Ok((body, CacheSource::Network))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cache::{FileStorage, NoopStorage};
  use crate::error::FetchError;
  use std::sync::atomic::{AtomicU32, Ordering};

  #[tokio::test]
  async fn test_miss_then_hit() {
    let dir = tempfile::tempdir().unwrap();
    let layer = CacheLayer::new(FileStorage::new(dir.path()));
    let counter = AtomicU32::new(0);
    let calls = &counter;

    let (first, source) = layer
      .fetch_raw("k", move || async move {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok("{\"id\":\"1\"}".to_string())
      })
      .await
      .unwrap();
    assert_eq!(source, CacheSource::Network);

    let (second, source) = layer
      .fetch_raw("k", move || async move {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(String::new())
      })
      .await
      .unwrap();
    assert_eq!(source, CacheSource::Cache);

    assert_eq!(first, second);
    assert_eq!(counter.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn test_empty_body_is_not_cached() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());
    let layer = CacheLayer::new(storage.clone());

    let (body, _) = layer
      .fetch_raw("k", || async { Ok(String::new()) })
      .await
      .unwrap();

    assert!(body.is_empty());
    assert!(!storage.has("k"));
  }

  #[tokio::test]
  async fn test_fetch_error_is_not_cached() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());
    let layer = CacheLayer::new(storage.clone());

    let result = layer
      .fetch_raw("k", || async {
        Err(FetchError::Transport("connection refused".into()))
      })
      .await;

    assert!(matches!(result, Err(FetchError::Transport(_))));
    assert!(!storage.has("k"));
    assert!(!dir.path().join("k.json").exists());
  }

  #[tokio::test]
  async fn test_noop_storage_always_fetches() {
    let layer = CacheLayer::new(NoopStorage);
    let counter = AtomicU32::new(0);
    let calls = &counter;

    for _ in 0..2 {
      layer
        .fetch_raw("k", move || async move {
          calls.fetch_add(1, Ordering::SeqCst);
          Ok("{}".to_string())
        })
        .await
        .unwrap();
    }

    assert_eq!(counter.load(Ordering::SeqCst), 2);
  }
}
