//! Error model for issue fetching and field extraction.

use std::io;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FetchError>;

/// Everything that can go wrong between building the request and returning
/// a field value. The CLI is the only place these get turned into output.
#[derive(Debug, Error)]
pub enum FetchError {
  #[error("credentials must be given as <username>:<password>")]
  InvalidCredentials,
  #[error("invalid base url {url}: {source}")]
  InvalidBaseUrl {
    url: String,
    #[source]
    source: url::ParseError,
  },
  /// Connection, DNS, TLS or timeout failure. Nothing is cached.
  #[error("transport error: {0}")]
  Transport(String),
  /// The server answered, but not with a 2xx. Nothing is cached.
  #[error("http {status}")]
  HttpStatus { status: StatusCode },
  #[error("cannot write cache file {}: {source}", path.display())]
  CacheWrite {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
  #[error("cannot read cache file {}: {source}", path.display())]
  CacheRead {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
  #[error("invalid JSON response: {0}")]
  Decode(#[from] serde_json::Error),
  #[error("no such field: {0}")]
  NoSuchField(String),
  #[error("missing field: {0}")]
  MissingField(String),
  #[error("unexpected value at {path}: {message}")]
  UnexpectedType { path: String, message: String },
}

impl From<reqwest::Error> for FetchError {
  fn from(err: reqwest::Error) -> Self {
    if let Some(status) = err.status() {
      return FetchError::HttpStatus { status };
    }
    FetchError::Transport(error_chain(&err))
  }
}

/// Join an error and its sources with `: `. reqwest keeps the interesting
/// part (connection refused, certificate problems) in the source chain.
fn error_chain(err: &dyn std::error::Error) -> String {
  let mut message = err.to_string();
  let mut source = err.source();
  while let Some(cause) = source {
    let text = cause.to_string();
    if !message.contains(&text) {
      message.push_str(": ");
      message.push_str(&text);
    }
    source = cause.source();
  }
  message
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Debug, Error)]
  #[error("outer")]
  struct Outer(#[source] io::Error);

  #[test]
  fn test_error_chain_includes_sources() {
    let err = Outer(io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"));
    assert_eq!(error_chain(&err), "outer: connection refused");
  }

  #[test]
  fn test_cache_write_message_names_path() {
    let err = FetchError::CacheWrite {
      path: PathBuf::from("/nope/cache"),
      source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
    };
    assert_eq!(
      err.to_string(),
      "cannot write cache file /nope/cache: permission denied"
    );
  }

  #[test]
  fn test_http_status_message() {
    let err = FetchError::HttpStatus {
      status: StatusCode::UNAUTHORIZED,
    };
    assert_eq!(err.to_string(), "http 401 Unauthorized");
  }
}
