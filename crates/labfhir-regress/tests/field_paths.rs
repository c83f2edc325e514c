//! Property tests for field paths and wildcard selection.

use labfhir_regress::discovery::wildcard_to_regex;
use labfhir_regress::{CaseFilter, FieldPath, Resolved, diff_fields};
use proptest::prelude::*;
use serde_json::{Value, json};

fn sample_bundle() -> Value {
    json!({
        "resourceType": "Bundle",
        "entry": [
            {"resource": {"resourceType": "Patient", "gender": "female"}},
            {"resource": {"resourceType": "DiagnosticReport", "status": "final"}},
            {"resource": {"resourceType": "Observation", "valueQuantity": {"value": 3.5}}}
        ]
    })
}

#[test]
fn test_identical_documents_have_no_differences() {
    let doc = sample_bundle();
    let fields: Vec<FieldPath> = [
        "entry.0.resource.gender",
        "entry.2.resource.valueQuantity.value",
        "entry.9.resource.id",
    ]
    .into_iter()
    .map(FieldPath::parse)
    .collect();
    assert!(diff_fields(&doc, &doc, &fields).is_empty());
}

#[test]
fn test_wildcard_selection_semantics() {
    let filter = CaseFilter::from_pattern(Some("user-?/input-[!2]*.txt")).unwrap();
    assert!(filter.matches("user-1/input-1-1.txt"));
    assert!(!filter.matches("user-1/input-2-1.txt"));
    assert!(!filter.matches("user-10/input-1-1.txt"));

    let star = CaseFilter::from_pattern(Some("*input-1.txt")).unwrap();
    assert!(star.matches("user-3/nested/input-1.txt"));

    assert_eq!(wildcard_to_regex("a[b"), r"^a\[b$");
}

proptest! {
    #[test]
    fn prop_out_of_range_index_is_absent(extra in 3usize..1000, tail in "[a-z]{1,8}") {
        let doc = sample_bundle();
        let path = FieldPath::parse(&format!("entry.{extra}.{tail}"));
        prop_assert_eq!(path.resolve(&doc), Resolved::Absent);
    }

    #[test]
    fn prop_path_display_round_trips(segments in proptest::collection::vec("[a-zA-Z0-9]{1,6}", 1..6)) {
        let raw = segments.join(".");
        let path: FieldPath = raw.parse().unwrap();
        prop_assert_eq!(path.to_string(), raw);
        prop_assert_eq!(path.segments().len(), segments.len());
    }

    #[test]
    fn prop_literal_patterns_match_only_themselves(name in "[a-z0-9/_.-]{1,24}", other in "[a-z0-9/_.-]{1,24}") {
        let filter = CaseFilter::from_pattern(Some(&name)).unwrap();
        prop_assert!(filter.matches(&name));
        prop_assert_eq!(filter.matches(&other), name == other);
    }
}
