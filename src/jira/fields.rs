//! Per-field extraction rules.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::{FetchError, Result};

use super::api_types::{ApiIssueType, ApiSprint, ApiUser};
use super::request::FieldCodes;
use super::types::Issue;

static SPRINT_NAME_REGEX: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"name=([^,]+)").expect("invalid sprint name regex"));

/// Display value of `field` on `issue`. Field names are matched exactly.
///
/// Names without a dedicated rule go through the alias table and must then
/// exist under `fields`, otherwise this fails with `NoSuchField`.
pub fn extract(issue: &Issue, field: &str, codes: &FieldCodes) -> Result<String> {
  match field {
    "issuetype" | "type" => issue_type(issue)?
      .name
      .ok_or_else(|| FetchError::MissingField("fields.issuetype.name".to_string())),
    "type_icon_url" => issue_type(issue)?
      .icon_url
      .ok_or_else(|| FetchError::MissingField("fields.issuetype.iconUrl".to_string())),
    "sprint" => sprint_name(issue, codes.sprint()),
    "assignee" | "reporter" => display_name(issue, field),
    other => {
      let code = codes.resolve(other);
      match issue.raw_field(code)? {
        Some(value) => Ok(render(value)),
        None => Err(FetchError::NoSuchField(other.to_string())),
      }
    }
  }
}

fn issue_type(issue: &Issue) -> Result<ApiIssueType> {
  issue
    .field::<ApiIssueType>("issuetype")?
    .ok_or_else(|| FetchError::MissingField("fields.issuetype".to_string()))
}

fn display_name(issue: &Issue, code: &str) -> Result<String> {
  Ok(
    issue
      .field::<ApiUser>(code)?
      .and_then(|user| user.display_name)
      .unwrap_or_default(),
  )
}

fn sprint_name(issue: &Issue, code: &str) -> Result<String> {
  // Only the first entry is read; later entries may hold anything
  let sprints = issue.field::<Vec<Value>>(code)?.unwrap_or_default();
  let first = match sprints.into_iter().next() {
    None | Some(Value::Null) => None,
    Some(value) => Some(serde_json::from_value::<ApiSprint>(value).map_err(|e| {
      FetchError::UnexpectedType {
        path: format!("fields.{}[0]", code),
        message: e.to_string(),
      }
    })?),
  };

  let name = match first {
    None => None,
    Some(ApiSprint::Legacy(text)) => SPRINT_NAME_REGEX
      .captures(&text)
      .and_then(|caps| caps.get(1))
      .map(|m| m.as_str().to_string()),
    Some(ApiSprint::Object { name }) => name,
  };

  Ok(name.unwrap_or_default())
}

/// Strings as-is, null as empty, anything else as compact JSON.
fn render(value: &Value) -> String {
  match value {
    Value::Null => String::new(),
    Value::String(s) => s.clone(),
    other => other.to_string(),
  }
}
