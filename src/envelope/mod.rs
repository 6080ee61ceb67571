//! Update envelope - the request body of the process update endpoint.
//!
//! The read endpoint returns a process as a nested JSON object under
//! `processJson`. The update endpoint wants that same object serialized to a
//! string and wrapped with change metadata:
//!
//! ```text
//!   GET  .../Processes/{id}  ->  { "processJson": { ... }, ... }
//!                                           │
//!                                  UpdateEnvelope::build
//!                                           │
//!   PUT  .../Processes/{id}  <-  { "ProcessJson": "{...}", "ChangeDescription": ..., flags }
//! ```
//!
//! Submodules handle the file and narration concerns around the envelope:
//! - **import**: parse read-endpoint responses
//! - **export**: write envelopes to disk
//! - **summary**: pull display fields out of a process definition
//! - **edit**: apply `KEY=VALUE` field edits before building

use serde::Serialize;
use serde_json::{Map, Value};

use crate::types::{Error, Result};
use crate::validation::{require_change_description, require_process_definition};

pub mod edit;
pub mod export;
pub mod import;
pub mod summary;

pub use edit::{apply_edits, FieldEdit};
pub use import::GetProcessResponse;
pub use summary::ProcessSummary;

/// A process definition as returned by the read endpoint.
///
/// Opaque, insertion-ordered key/value data. Order matters: `ProcessJson` is
/// compared byte-for-byte by callers.
pub type ProcessDefinition = Map<String, Value>;

/// Activity edits sent alongside a process update. Always empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SharedActivityCollectionEditModel {
    activities_to_delete: Vec<String>,
    activities_to_share: Vec<String>,
    activities_to_unlink: Vec<String>,
}

impl SharedActivityCollectionEditModel {
    pub fn activities_to_delete(&self) -> &[String] {
        &self.activities_to_delete
    }

    pub fn activities_to_share(&self) -> &[String] {
        &self.activities_to_share
    }

    pub fn activities_to_unlink(&self) -> &[String] {
        &self.activities_to_unlink
    }

    pub fn is_empty(&self) -> bool {
        self.activities_to_delete.is_empty()
            && self.activities_to_share.is_empty()
            && self.activities_to_unlink.is_empty()
    }
}

/// Request body for `PUT /Api/v1/Processes/{id}`.
///
/// Immutable once built. The three flags and the two collections are fixed;
/// there is no way to set them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateEnvelope {
    process_json: String,
    change_description: String,
    do_submit_for_approval: bool,
    do_publish: bool,
    suppress_change_notification: bool,
    shared_activity_collection_edit_model: SharedActivityCollectionEditModel,
    variant_connection_change_states: Vec<Value>,
}

impl UpdateEnvelope {
    /// Wrap a process definition for the update endpoint.
    ///
    /// `change_description` defaults to `""`. The definition is only read.
    pub fn build(process: &ProcessDefinition, change_description: Option<&str>) -> Result<Self> {
        let process_json = serde_json::to_string(process)?;
        tracing::debug!(
            process_json_len = process_json.len(),
            "built update envelope"
        );
        Ok(Self::with_serialized(
            process_json,
            change_description.unwrap_or_default(),
        ))
    }

    /// Untyped entry point. Rejects non-object processes and non-string
    /// descriptions with `InvalidArgument`.
    pub fn from_value(process: &Value, change_description: Option<&Value>) -> Result<Self> {
        let process = require_process_definition(process)?;
        let change_description = require_change_description(change_description)?;
        Self::build(process, Some(change_description))
    }

    /// Entry point for callers that already hold the definition as text.
    ///
    /// The text is parsed and re-serialized compactly.
    pub fn from_process_json_str(text: &str, change_description: Option<&str>) -> Result<Self> {
        let value: Value = serde_json::from_str(text).map_err(|e| {
            Error::invalid_argument(format!("processJson is not valid JSON: {e}"))
        })?;
        let process = require_process_definition(&value)?;
        Self::build(process, change_description)
    }

    fn with_serialized(process_json: String, change_description: &str) -> Self {
        Self {
            process_json,
            change_description: change_description.to_string(),
            do_submit_for_approval: false,
            do_publish: false,
            suppress_change_notification: false,
            shared_activity_collection_edit_model: SharedActivityCollectionEditModel::default(),
            variant_connection_change_states: Vec::new(),
        }
    }

    pub fn process_json(&self) -> &str {
        &self.process_json
    }

    pub fn change_description(&self) -> &str {
        &self.change_description
    }

    pub fn do_submit_for_approval(&self) -> bool {
        self.do_submit_for_approval
    }

    pub fn do_publish(&self) -> bool {
        self.do_publish
    }

    pub fn suppress_change_notification(&self) -> bool {
        self.suppress_change_notification
    }

    pub fn shared_activity_collection_edit_model(&self) -> &SharedActivityCollectionEditModel {
        &self.shared_activity_collection_edit_model
    }

    pub fn variant_connection_change_states(&self) -> &[Value] {
        &self.variant_connection_change_states
    }

    /// Parse `ProcessJson` back into a definition.
    pub fn decode_process(&self) -> Result<ProcessDefinition> {
        Ok(serde_json::from_str(&self.process_json)?)
    }

    /// First `max_chars` characters of `ProcessJson`, with `...` when cut.
    pub fn process_json_preview(&self, max_chars: usize) -> String {
        match self.process_json.char_indices().nth(max_chars) {
            Some((idx, _)) => format!("{}...", &self.process_json[..idx]),
            None => self.process_json.clone(),
        }
    }
}
