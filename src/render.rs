//! Human-facing renderings: the structure overview of an envelope and the
//! equivalent `curl` invocation for sending a saved payload by hand.

use serde_json::{json, Value};
use std::path::Path;

use crate::envelope::UpdateEnvelope;

/// Envelope with `ProcessJson` replaced by a length placeholder.
pub fn structure_overview(envelope: &UpdateEnvelope) -> Value {
    let edit_model = envelope.shared_activity_collection_edit_model();
    json!({
        "ProcessJson": format!("<stringified JSON - {} chars>", envelope.process_json().chars().count()),
        "ChangeDescription": envelope.change_description(),
        "DoSubmitForApproval": envelope.do_submit_for_approval(),
        "DoPublish": envelope.do_publish(),
        "SuppressChangeNotification": envelope.suppress_change_notification(),
        "SharedActivityCollectionEditModel": {
            "ActivitiesToDelete": edit_model.activities_to_delete(),
            "ActivitiesToShare": edit_model.activities_to_share(),
            "ActivitiesToUnlink": edit_model.activities_to_unlink(),
        },
        "VariantConnectionChangeStates": envelope.variant_connection_change_states(),
    })
}

/// `curl` command that PUTs a saved payload file to the process URL.
///
/// Tokens are left as placeholders.
pub fn curl_update_command(process_url: &str, payload_path: &Path) -> String {
    format!(
        "curl --location --request PUT '{process_url}' \\\n  \
         --header 'Authorization: Bearer <your-bearer-token>' \\\n  \
         --header '__RequestVerificationToken: <your-verification-token>' \\\n  \
         --header 'Content-Type: application/json' \\\n  \
         --header 'x-requested-with: XMLHttpRequest' \\\n  \
         --data '@{}'",
        payload_path.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::ProcessDefinition;

    #[test]
    fn test_overview_hides_process_json() {
        let mut process = ProcessDefinition::new();
        process.insert("Name".to_string(), json!("Proc1"));
        let envelope = UpdateEnvelope::build(&process, Some("demo")).unwrap();

        let overview = structure_overview(&envelope);
        assert_eq!(overview["ProcessJson"], "<stringified JSON - 16 chars>");
        assert_eq!(overview["ChangeDescription"], "demo");
        assert_eq!(overview["DoPublish"], false);
        assert_eq!(
            overview["SharedActivityCollectionEditModel"]["ActivitiesToShare"],
            json!([])
        );
    }

    #[test]
    fn test_curl_command() {
        let cmd = curl_update_command(
            "https://demo.promapp.com/t1/Api/v1/Processes/p-1",
            Path::new("./user-payload-encapsulated.json"),
        );
        let lines: Vec<&str> = cmd.lines().collect();
        assert_eq!(
            lines[0],
            "curl --location --request PUT 'https://demo.promapp.com/t1/Api/v1/Processes/p-1' \\"
        );
        assert_eq!(lines[2], "  --header '__RequestVerificationToken: <your-verification-token>' \\");
        assert_eq!(lines[5], "  --data '@./user-payload-encapsulated.json'");
    }
}
