use sha2::{Digest, Sha256};

/// Cache key for a request URL.
///
/// The full URL is the only input, so two requests that build the same URL
/// share an entry regardless of who sent them.
pub fn cache_key(url: &str) -> String {
  // SHA256 hash for stable, fixed-length, filename-safe keys
  let mut hasher = Sha256::new();
  hasher.update(url.as_bytes());
  hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_same_url_same_key() {
    let url = "https://jira.example.com/rest/api/2/issue/PROJ-1?fields=summary";
    assert_eq!(cache_key(url), cache_key(url));
  }

  #[test]
  fn test_different_urls_different_keys() {
    assert_ne!(
      cache_key("https://jira.example.com/rest/api/2/issue/PROJ-1"),
      cache_key("https://jira.example.com/rest/api/2/issue/PROJ-2")
    );
  }

  #[test]
  fn test_key_is_hex_sha256() {
    let key = cache_key("");
    assert_eq!(
      key,
      "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
  }
}
