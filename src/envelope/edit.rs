//! Top-level field edits applied to a fetched definition before building.

use serde_json::Value;
use std::str::FromStr;

use super::ProcessDefinition;
use crate::types::{Error, Result};

/// One `KEY=VALUE` assignment.
///
/// The value is read as JSON when it parses (`StateId=1`, `Flag=true`,
/// `Tags=["a"]`), otherwise it is taken as a plain string.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEdit {
    pub key: String,
    pub value: Value,
}

impl FieldEdit {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

impl FromStr for FieldEdit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (key, raw) = s
            .split_once('=')
            .ok_or_else(|| Error::invalid_argument(format!("expected KEY=VALUE, got {s:?}")))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::invalid_argument(format!("empty key in {s:?}")));
        }
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        Ok(Self::new(key, value))
    }
}

/// Apply edits in order. Existing keys keep their position; new keys are appended.
pub fn apply_edits(process: &mut ProcessDefinition, edits: &[FieldEdit]) {
    for edit in edits {
        tracing::debug!(key = %edit.key, "applying field edit");
        process.insert(edit.key.clone(), edit.value.clone());
    }
}
