//! Parsing of read-endpoint responses.
//!
//! `GET /Api/v1/Processes/{id}` returns the process under `processJson`
//! next to permission flags, warnings and configuration. Only `processJson`
//! feeds the envelope; the rest is kept so it can be saved untouched.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::ProcessDefinition;
use crate::types::{Error, Result};
use crate::validation::require_process_definition;

/// Body of `GET /Api/v1/Processes/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetProcessResponse {
    #[serde(rename = "processJson", deserialize_with = "deserialize_definition")]
    pub process_json: ProcessDefinition,

    /// `processActions`, `processWarnings`, `configuration`, `variationSetData`, ...
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GetProcessResponse {
    pub fn into_process(self) -> ProcessDefinition {
        self.process_json
    }
}

fn deserialize_definition<'de, D>(deserializer: D) -> std::result::Result<ProcessDefinition, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    require_process_definition(&value)
        .cloned()
        .map_err(serde::de::Error::custom)
}

/// Parse a full read-endpoint response.
pub fn from_json(bytes: &[u8]) -> Result<GetProcessResponse> {
    let value: Value = serde_json::from_slice(bytes)?;
    from_value(value)
}

fn from_value(value: Value) -> Result<GetProcessResponse> {
    let Value::Object(mut map) = value else {
        return Err(Error::invalid_argument(
            "read response must be a JSON object",
        ));
    };
    let process = match map.shift_remove("processJson") {
        Some(process) => process,
        None => {
            return Err(Error::invalid_argument(
                "read response has no processJson field",
            ))
        }
    };
    let process_json = require_process_definition(&process)?.clone();
    Ok(GetProcessResponse {
        process_json,
        extra: map,
    })
}

/// Parse either a full read response or a bare process definition.
///
/// An object with a `processJson` key is treated as a read response.
pub fn process_definition_from_json(bytes: &[u8]) -> Result<ProcessDefinition> {
    let value: Value = serde_json::from_slice(bytes)?;
    if value.get("processJson").is_some() {
        return from_value(value).map(GetProcessResponse::into_process);
    }
    Ok(require_process_definition(&value)?.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_response() -> Value {
        json!({
            "processJson": {
                "Name": "Onboard a new employee",
                "Id": 1234,
                "UniqueId": "d4d28c92-9e48-44aa-a146-ee51403be621",
                "State": "Draft",
                "StateId": 1
            },
            "processActions": {"CanEdit": true},
            "processWarnings": [],
            "configuration": {"IsVariationsEnabled": false},
            "variationSetData": null
        })
    }

    #[test]
    fn test_from_json_splits_process_and_extra() {
        let bytes = serde_json::to_vec(&sample_response()).unwrap();
        let response = from_json(&bytes).unwrap();

        assert_eq!(response.process_json["Name"], "Onboard a new employee");
        let keys: Vec<&str> = response.extra.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            ["processActions", "processWarnings", "configuration", "variationSetData"]
        );
    }

    #[test]
    fn test_from_json_requires_object_process() {
        let bytes = br#"{"processJson": [1, 2]}"#;
        assert!(from_json(bytes).unwrap_err().is_invalid_argument());

        let bytes = br#"{"processActions": {}}"#;
        assert!(from_json(bytes).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let err = from_json(b"{\"processJson\":").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_accepts_bare_definition() {
        let process = process_definition_from_json(br#"{"Name":"A","Id":1}"#).unwrap();
        assert_eq!(process.keys().collect::<Vec<_>>(), ["Name", "Id"]);
    }

    #[test]
    fn test_accepts_wrapped_definition() {
        let bytes = serde_json::to_vec(&sample_response()).unwrap();
        let process = process_definition_from_json(&bytes).unwrap();
        assert_eq!(process["StateId"], 1);
        assert!(process.get("processActions").is_none());
    }

    #[test]
    fn test_serde_path_matches_manual_parse() {
        let value = sample_response();
        let via_serde: GetProcessResponse = serde_json::from_value(value.clone()).unwrap();
        let manual = from_value(value).unwrap();
        assert_eq!(via_serde, manual);
    }

    #[test]
    fn test_serde_path_rejects_non_object_process() {
        let result: std::result::Result<GetProcessResponse, _> =
            serde_json::from_value(json!({"processJson": 42}));
        assert!(result.is_err());
    }
}
