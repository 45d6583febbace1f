//! Issue fetcher that puts the on-disk cache in front of the Jira client.

use tracing::debug;

use crate::cache::{cache_key, CacheLayer};
use crate::error::Result;

use super::client::Transport;
use super::fields;
use super::request::IssueRequest;
use super::types::Issue;

/// Fetches one issue, serving it from the cache when the request URL has
/// been seen before.
pub struct IssueFetcher<T: Transport> {
  request: IssueRequest,
  transport: T,
  cache: CacheLayer,
}

impl<T: Transport> IssueFetcher<T> {
  pub fn new(request: IssueRequest, transport: T, cache: CacheLayer) -> Self {
    Self {
      request,
      transport,
      cache,
    }
  }

  /// Cache-first fetch of the decoded issue.
  ///
  /// A cache hit is decoded as-is with no network activity. On a miss the
  /// body is requested, stored (when non-empty), then decoded, so a
  /// malformed body still ends up in the cache.
  pub async fn fetch_issue(&self) -> Result<Issue> {
    let url = self.request.api_url();
    let key = cache_key(&url);

    let (body, source) = self
      .cache
      .fetch_raw(&key, || self.transport.get(&url, self.request.credentials()))
      .await?;
    debug!(issue = self.request.issue_key(), ?source, "issue loaded");

    Issue::from_json(&body)
  }

  /// Fetch the issue once and extract a single field from it.
  pub async fn fetch_issue_field(&self, field: &str) -> Result<String> {
    let issue = self.fetch_issue().await?;
    fields::extract(&issue, field, self.request.field_codes())
  }
}
