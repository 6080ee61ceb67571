//! Property tests for the envelope builder.

use process_envelope::envelope::{ProcessDefinition, UpdateEnvelope};
use process_envelope::Error;
use proptest::prelude::*;
use serde_json::{json, Map, Value};

/// Arbitrary JSON without floats (float text is not guaranteed to survive a
/// parse/print cycle byte-for-byte).
fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        ".{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec(("[A-Za-z]{1,8}", inner), 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

fn arb_definition() -> impl Strategy<Value = ProcessDefinition> {
    prop::collection::vec(("[A-Z][A-Za-z]{0,10}", arb_json()), 0..6)
        .prop_map(|entries| entries.into_iter().collect::<Map<String, Value>>())
}

proptest! {
    #[test]
    fn change_description_is_passed_through(process in arb_definition(), description in ".*") {
        let envelope = UpdateEnvelope::build(&process, Some(&description)).unwrap();
        prop_assert_eq!(envelope.change_description(), description.as_str());
    }

    #[test]
    fn constant_fields_never_vary(process in arb_definition()) {
        let envelope = UpdateEnvelope::build(&process, Some("")).unwrap();
        prop_assert!(!envelope.do_submit_for_approval());
        prop_assert!(!envelope.do_publish());
        prop_assert!(!envelope.suppress_change_notification());

        let edit_model = envelope.shared_activity_collection_edit_model();
        prop_assert!(edit_model.activities_to_delete().is_empty());
        prop_assert!(edit_model.activities_to_share().is_empty());
        prop_assert!(edit_model.activities_to_unlink().is_empty());
        prop_assert!(envelope.variant_connection_change_states().is_empty());
    }

    #[test]
    fn process_json_round_trips(process in arb_definition()) {
        let envelope = UpdateEnvelope::build(&process, None).unwrap();

        let decoded: ProcessDefinition = serde_json::from_str(envelope.process_json()).unwrap();
        prop_assert_eq!(&decoded, &process);
        // Same keys in the same order, so the text is byte-identical too.
        prop_assert_eq!(serde_json::to_string(&decoded).unwrap(), envelope.process_json());
    }

    #[test]
    fn build_is_deterministic(process in arb_definition(), description in ".{0,20}") {
        let a = UpdateEnvelope::build(&process, Some(&description)).unwrap();
        let b = UpdateEnvelope::build(&process, Some(&description)).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn non_string_descriptions_are_rejected(process in arb_definition(), n in any::<i64>()) {
        let err = UpdateEnvelope::from_value(&Value::Object(process), Some(&json!(n))).unwrap_err();
        prop_assert!(matches!(err, Error::InvalidArgument(_)));
    }
}

#[test]
fn test_rejects_null_number_and_array() {
    for process in [json!(null), json!(42), json!([])] {
        let err = UpdateEnvelope::from_value(&process, Some(&json!("x"))).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)), "{process} accepted");
    }
}

#[test]
fn test_rejects_numeric_description() {
    let err = UpdateEnvelope::from_value(&json!({}), Some(&json!(123))).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn test_omitted_description() {
    let envelope = UpdateEnvelope::from_value(&json!({"Name": "A"}), None).unwrap();
    assert_eq!(envelope.change_description(), "");
}

#[test]
fn test_concrete_scenario() {
    let envelope =
        UpdateEnvelope::from_value(&json!({"Name": "Proc1", "Id": 7}), Some(&json!("fix typo")))
            .unwrap();

    pretty_assertions::assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
        json!({
            "ProcessJson": r#"{"Name":"Proc1","Id":7}"#,
            "ChangeDescription": "fix typo",
            "DoSubmitForApproval": false,
            "DoPublish": false,
            "SuppressChangeNotification": false,
            "SharedActivityCollectionEditModel": {
                "ActivitiesToDelete": [],
                "ActivitiesToShare": [],
                "ActivitiesToUnlink": []
            },
            "VariantConnectionChangeStates": []
        })
    );
}
