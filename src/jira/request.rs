//! The request for one issue: who asks, where, and for which fields.

use std::collections::BTreeMap;
use std::fmt;

use url::Url;

use crate::error::{FetchError, Result};

/// Fields always requested alongside the sprint custom field.
const BASE_FIELDS: &[&str] = &["summary", "issuetype", "assignee", "reporter"];

const SPRINT_ALIAS: &str = "sprint";
const DEFAULT_SPRINT_CODE: &str = "customfield_10600";

/// Basic-auth credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}

impl Credentials {
  /// Parse `username:password`, splitting on the first colon only.
  pub fn parse(input: &str) -> Result<Self> {
    let (username, password) = input
      .split_once(':')
      .ok_or(FetchError::InvalidCredentials)?;
    Ok(Self {
      username: username.to_string(),
      password: password.to_string(),
    })
  }
}

impl fmt::Debug for Credentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Credentials")
      .field("username", &self.username)
      .field("password", &"***")
      .finish()
  }
}

/// Maps short aliases (e.g. `sprint`) to Jira custom field codes
/// (e.g. `customfield_10600`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCodes(BTreeMap<String, String>);

impl Default for FieldCodes {
  fn default() -> Self {
    let mut codes = BTreeMap::new();
    codes.insert(SPRINT_ALIAS.to_string(), DEFAULT_SPRINT_CODE.to_string());
    Self(codes)
  }
}

impl FieldCodes {
  /// Add or replace aliases on top of the built-in ones.
  pub fn extend<I, K, V>(mut self, entries: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
  {
    for (alias, code) in entries {
      self.0.insert(alias.into(), code.into());
    }
    self
  }

  /// Custom field code holding sprint membership.
  pub fn sprint(&self) -> &str {
    self
      .0
      .get(SPRINT_ALIAS)
      .map(String::as_str)
      .unwrap_or(DEFAULT_SPRINT_CODE)
  }

  /// The code behind `name` if it is an alias, otherwise `name` itself.
  pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
    self.0.get(name).map(String::as_str).unwrap_or(name)
  }
}

/// A single issue lookup. Built once per invocation and never mutated.
#[derive(Debug, Clone)]
pub struct IssueRequest {
  credentials: Credentials,
  base_url: String,
  issue_key: String,
  field_codes: FieldCodes,
}

impl IssueRequest {
  pub fn new(
    credentials: Credentials,
    base_url: &str,
    issue_key: impl Into<String>,
    field_codes: FieldCodes,
  ) -> Result<Self> {
    Url::parse(base_url).map_err(|source| FetchError::InvalidBaseUrl {
      url: base_url.to_string(),
      source,
    })?;

    Ok(Self {
      credentials,
      base_url: base_url.trim_end_matches('/').to_string(),
      issue_key: issue_key.into(),
      field_codes,
    })
  }

  pub fn credentials(&self) -> &Credentials {
    &self.credentials
  }

  pub fn issue_key(&self) -> &str {
    &self.issue_key
  }

  pub fn field_codes(&self) -> &FieldCodes {
    &self.field_codes
  }

  /// `<base>/rest/api/2/issue/<key>?fields=summary,issuetype,assignee,reporter,<sprint>`
  ///
  /// This string is the cache key, so it depends only on the server, the
  /// issue and the requested fields, never on the credentials.
  pub fn api_url(&self) -> String {
    format!(
      "{}/rest/api/2/issue/{}?fields={},{}",
      self.base_url,
      self.issue_key,
      BASE_FIELDS.join(","),
      self.field_codes.sprint()
    )
  }
}
