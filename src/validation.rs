//! Input validation for the envelope builder.
//!
//! Both checks run before any serialization happens.

use serde_json::Value;

use crate::envelope::ProcessDefinition;
use crate::types::{Error, Result};

/// Require a structured record. `null`, primitives and arrays are rejected.
pub fn require_process_definition(value: &Value) -> Result<&ProcessDefinition> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::invalid_argument(format!(
            "processJson must be a valid object, got {}",
            json_kind(other)
        ))),
    }
}

/// Resolve an optional change description. Omitted means `""`; anything
/// provided must be a JSON string.
pub fn require_change_description(value: Option<&Value>) -> Result<&str> {
    match value {
        None => Ok(""),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(Error::invalid_argument(format!(
            "changeDescription must be a string, got {}",
            json_kind(other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_objects() {
        let value = json!({"Name": "Proc1"});
        let map = require_process_definition(&value).unwrap();
        assert_eq!(map.len(), 1);

        let empty = json!({});
        assert!(require_process_definition(&empty).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_non_objects() {
        for value in [json!(null), json!(42), json!([]), json!("x"), json!(true)] {
            let err = require_process_definition(&value).unwrap_err();
            assert!(err.is_invalid_argument(), "{value} should be rejected");
        }
    }

    #[test]
    fn test_error_names_the_kind() {
        let err = require_process_definition(&json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("got array"));
    }

    #[test]
    fn test_description_defaults_to_empty() {
        assert_eq!(require_change_description(None).unwrap(), "");
        let d = json!("fix typo");
        assert_eq!(require_change_description(Some(&d)).unwrap(), "fix typo");
    }

    #[test]
    fn test_description_must_be_string() {
        for value in [json!(123), json!(null), json!({}), json!(["a"])] {
            let err = require_change_description(Some(&value)).unwrap_err();
            assert!(err.is_invalid_argument());
        }
    }
}
