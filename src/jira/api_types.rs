//! Serde-deserializable shapes of the issue fields the extraction rules read.
//!
//! Every member is optional: the issue endpoint only returns what was asked
//! for, and Jira omits or nulls fields freely. Absence is decided by the
//! caller, wrong types fail deserialization.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ApiIssueType {
  pub name: Option<String>,
  #[serde(rename = "iconUrl")]
  pub icon_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiUser {
  #[serde(rename = "displayName")]
  pub display_name: Option<String>,
}

/// One entry of the sprint custom field.
///
/// Jira Server serializes sprints as
/// `com.atlassian.greenhopper.service.sprint.Sprint@1f2e[id=7,state=ACTIVE,name=Sprint 42,...]`,
/// newer instances return an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ApiSprint {
  Legacy(String),
  Object { name: Option<String> },
}
