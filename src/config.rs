use std::path::PathBuf;
use std::time::Duration;

/// Runtime options that are not part of the issue request itself.
#[derive(Debug, Clone)]
pub struct Config {
  /// Directory holding `<hash>.json` response files
  pub cache_dir: PathBuf,
  /// When false, nothing is read from or written to the cache
  pub use_cache: bool,
  /// Skip TLS certificate and hostname verification
  pub insecure: bool,
  /// Overall request timeout
  pub timeout: Duration,
}

impl Config {
  /// `cache/` next to the executable, or `./cache` if the executable's
  /// location cannot be determined.
  pub fn default_cache_dir() -> PathBuf {
    std::env::current_exe()
      .ok()
      .and_then(|exe| exe.parent().map(|dir| dir.join("cache")))
      .unwrap_or_else(|| PathBuf::from("cache"))
  }

  #[cfg(test)]
  pub fn for_tests() -> Self {
    Self {
      cache_dir: PathBuf::from("cache"),
      use_cache: true,
      insecure: false,
      timeout: Duration::from_secs(5),
    }
  }
}

/// Parse an `alias=code` pair given on the command line.
pub fn parse_field_code(s: &str) -> Result<(String, String), String> {
  let (alias, code) = s
    .split_once('=')
    .ok_or_else(|| format!("expected <alias>=<code>, got '{}'", s))?;

  let (alias, code) = (alias.trim(), code.trim());
  if alias.is_empty() || code.is_empty() {
    return Err(format!("expected <alias>=<code>, got '{}'", s));
  }

  Ok((alias.to_string(), code.to_string()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_field_code() {
    assert_eq!(
      parse_field_code("epic=customfield_10008").unwrap(),
      ("epic".to_string(), "customfield_10008".to_string())
    );
  }

  #[test]
  fn test_parse_field_code_rejects_missing_parts() {
    assert!(parse_field_code("epic").is_err());
    assert!(parse_field_code("=customfield_1").is_err());
    assert!(parse_field_code("epic=").is_err());
  }

  #[test]
  fn test_default_cache_dir_is_named_cache() {
    assert!(Config::default_cache_dir().ends_with("cache"));
  }
}
