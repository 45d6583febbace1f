use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{FetchError, Result};

use super::request::Credentials;

/// Performs the authenticated GET for an issue URL and returns the raw body.
#[allow(async_fn_in_trait)]
pub trait Transport {
  async fn get(&self, url: &str, credentials: &Credentials) -> Result<String>;
}

/// Jira REST client over reqwest
#[derive(Clone)]
pub struct JiraClient {
  http: reqwest::Client,
}

impl JiraClient {
  pub fn new(config: &Config) -> Result<Self> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if config.insecure {
      warn!("TLS certificate and hostname verification is disabled");
    }

    let http = reqwest::Client::builder()
      .default_headers(headers)
      .connect_timeout(config.timeout.min(Duration::from_secs(10)))
      .timeout(config.timeout)
      .danger_accept_invalid_certs(config.insecure)
      .build()
      .map_err(|e| FetchError::Transport(format!("failed to build HTTP client: {}", e)))?;

    Ok(Self { http })
  }
}

impl Transport for JiraClient {
  async fn get(&self, url: &str, credentials: &Credentials) -> Result<String> {
    debug!(url, username = %credentials.username, "requesting issue");

    let response = self
      .http
      .get(url)
      .basic_auth(&credentials.username, Some(&credentials.password))
      .send()
      .await?;

    let status = response.status();
    debug!(%status, "response received");
    if !status.is_success() {
      return Err(FetchError::HttpStatus { status });
    }

    Ok(response.text().await?)
  }
}
