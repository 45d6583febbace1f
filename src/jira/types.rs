use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{FetchError, Result};

/// A decoded issue, as returned by the issue endpoint.
///
/// Nothing is validated at decode time; the accessors below report
/// absent, null and wrong-typed values when a rule asks for them.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue(Value);

impl Issue {
  pub fn from_json(body: &str) -> Result<Self> {
    Ok(Self(serde_json::from_str(body)?))
  }

  /// Pretty JSON with sorted keys.
  pub fn to_pretty_json(&self) -> Result<String> {
    Ok(serde_json::to_string_pretty(&self.0)?)
  }

  /// The `fields` object.
  pub fn fields(&self) -> Result<&Map<String, Value>> {
    match self.0.get("fields") {
      None => Err(FetchError::MissingField("fields".to_string())),
      Some(Value::Object(fields)) => Ok(fields),
      Some(other) => Err(FetchError::UnexpectedType {
        path: "fields".to_string(),
        message: format!("expected an object, found {}", type_name(other)),
      }),
    }
  }

  /// `fields.<code>` as stored. `None` only when the key is absent.
  pub fn raw_field(&self, code: &str) -> Result<Option<&Value>> {
    Ok(self.fields()?.get(code))
  }

  /// `fields.<code>` decoded into `T`. Absent and `null` both give `None`.
  pub fn field<T: DeserializeOwned>(&self, code: &str) -> Result<Option<T>> {
    match self.raw_field(code)? {
      None | Some(Value::Null) => Ok(None),
      Some(value) => serde_json::from_value(value.clone())
        .map(Some)
        .map_err(|e| FetchError::UnexpectedType {
          path: format!("fields.{}", code),
          message: e.to_string(),
        }),
    }
  }
}

fn type_name(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}
