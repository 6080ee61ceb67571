//! Display fields pulled from a process definition.
//!
//! Never fails: missing or oddly typed fields simply show up as `None`.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use super::ProcessDefinition;

/// The handful of fields worth narrating before an update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProcessSummary {
    pub name: Option<String>,
    pub id: Option<i64>,
    pub unique_id: Option<String>,
    pub state: Option<String>,
    pub state_id: Option<i64>,
    pub version: Option<String>,
    pub objective: Option<String>,
    pub owner: Option<String>,
    pub expert: Option<String>,
    pub group: Option<String>,
    pub activity_count: Option<usize>,
}

impl ProcessSummary {
    pub fn from_definition(process: &ProcessDefinition) -> Self {
        Self {
            name: text(process.get("Name")),
            id: process.get("Id").and_then(Value::as_i64),
            unique_id: text(process.get("UniqueId")),
            state: text(process.get("State")),
            state_id: process.get("StateId").and_then(Value::as_i64),
            version: text(process.get("Version")),
            objective: text(process.get("Objective")),
            owner: text(process.get("Owner")),
            expert: text(process.get("Expert")),
            group: text(process.get("Group")),
            activity_count: process
                .get("ProcessProcedures")
                .and_then(|p| p.get("Activity"))
                .and_then(Value::as_array)
                .map(Vec::len),
        }
    }
}

// Strings pass through; numbers are shown as-is (Version is often numeric).
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn or_dash<T: fmt::Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map_or_else(|| "-".to_string(), ToString::to_string)
}

impl fmt::Display for ProcessSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Process Name: \"{}\"", or_dash(&self.name))?;
        writeln!(f, "Process ID: {}", or_dash(&self.id))?;
        writeln!(f, "UniqueId: {}", or_dash(&self.unique_id))?;
        writeln!(
            f,
            "State: {} (StateId: {})",
            or_dash(&self.state),
            or_dash(&self.state_id)
        )?;
        writeln!(f, "Version: {}", or_dash(&self.version))?;
        writeln!(f, "Objective: \"{}\"", or_dash(&self.objective))?;
        writeln!(f, "Owner: {}", or_dash(&self.owner))?;
        writeln!(f, "Expert: {}", or_dash(&self.expert))?;
        writeln!(f, "Group: {}", or_dash(&self.group))?;
        write!(f, "Activities: {}", or_dash(&self.activity_count))
    }
}
