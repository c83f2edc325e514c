//! Tests for the structural bundle validator.

use labfhir_model::{Bundle, error_count};
use labfhir_validate::checks::{codings, dates, ids, references, structure};
use labfhir_validate::{BundleValidator, NoopValidator, StructuralValidator};
use serde_json::{Value, json};

fn bundle_json() -> Value {
    json!({
        "resourceType": "Bundle",
        "id": "bundle-001",
        "type": "collection",
        "entry": [
            {"resource": {
                "resourceType": "Patient",
                "id": "patient-001",
                "name": [{"text": "Jane Doe"}],
                "gender": "female"
            }},
            {"resource": {
                "resourceType": "DiagnosticReport",
                "id": "dr-001",
                "status": "final",
                "category": [{"coding": [{
                    "system": "http://terminology.hl7.org/CodeSystem/v2-0074",
                    "code": "LAB"
                }]}],
                "code": {"coding": [{"system": "http://loinc.org", "code": "57698-3"}]},
                "subject": {"reference": "Patient/patient-001"},
                "effectiveDateTime": "2024-03-05",
                "performer": [{"display": "Clinical Laboratory"}]
            }},
            {"resource": {
                "resourceType": "Observation",
                "id": "obs-001",
                "status": "final",
                "category": [{"coding": [{
                    "system": "http://terminology.hl7.org/CodeSystem/observation-category",
                    "code": "laboratory"
                }]}],
                "code": {"coding": [{"system": "http://loinc.org", "code": "33747-0"}]},
                "subject": {"reference": "Patient/patient-001"},
                "valueQuantity": {
                    "value": 210.0,
                    "unit": "mg/dl",
                    "system": "http://unitsofmeasure.org",
                    "code": "mg/dL"
                }
            }}
        ]
    })
}

fn bundle(value: Value) -> Bundle {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_well_formed_bundle_has_no_issues() {
    let issues = StructuralValidator.validate(&bundle(bundle_json()));
    assert!(issues.is_empty(), "{issues:?}");
}

#[test]
fn test_noop_accepts_anything() {
    let mut value = bundle_json();
    value["entry"][2]["resource"]["id"] = json!("bad id!");
    assert!(NoopValidator.validate(&bundle(value)).is_empty());
}

#[test]
fn test_invalid_and_duplicate_ids() {
    let mut value = bundle_json();
    value["entry"][2]["resource"]["id"] = json!("obs_001");
    let issues = ids::check(&bundle(value));
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].code, ids::CODE_ID_SYNTAX);
    assert_eq!(issues[0].path.as_deref(), Some("entry.2.resource.id"));

    let mut value = bundle_json();
    let duplicate = value["entry"][2].clone();
    value["entry"].as_array_mut().unwrap().push(duplicate);
    let issues = ids::check(&bundle(value));
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].code, ids::CODE_ID_DUPLICATE);
    assert_eq!(issues[0].path.as_deref(), Some("entry.3.resource.id"));
}

#[test]
fn test_unresolved_subject() {
    let mut value = bundle_json();
    value["entry"][2]["resource"]["subject"]["reference"] = json!("Patient/other");
    let issues = references::check(&bundle(value));
    assert_eq!(issues.len(), 1);
    assert_eq!(
        issues[0].path.as_deref(),
        Some("entry.2.resource.subject.reference")
    );
}

#[test]
fn test_invalid_effective_date() {
    let mut value = bundle_json();
    value["entry"][1]["resource"]["effectiveDateTime"] = json!("05/03/2024");
    let issues = dates::check(&bundle(value));
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].code, dates::CODE_DATE_SYNTAX);
}

#[test]
fn test_quantity_without_system() {
    let mut value = bundle_json();
    value["entry"][2]["resource"]["valueQuantity"] = json!({"value": 1.0, "unit": "mg/dl"});
    let issues = codings::check(&bundle(value));
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].code, codings::CODE_QUANTITY_UNIT);
}

#[test]
fn test_ratio_quantity_is_valid() {
    let mut value = bundle_json();
    value["entry"][2]["resource"]["valueQuantity"] = json!({"value": 3.5});
    assert!(codings::check(&bundle(value)).is_empty());
}

#[test]
fn test_incomplete_coding() {
    let mut value = bundle_json();
    value["entry"][2]["resource"]["code"]["coding"][0]["code"] = json!("");
    let issues = codings::check(&bundle(value));
    assert_eq!(issues.len(), 1);
    assert_eq!(
        issues[0].path.as_deref(),
        Some("entry.2.resource.code.coding.0")
    );
}

#[test]
fn test_entry_order() {
    let mut value = bundle_json();
    value["entry"].as_array_mut().unwrap().swap(0, 1);
    let issues = structure::check(&bundle(value));
    assert_eq!(error_count(&issues), 2);
    assert!(issues.iter().all(|i| i.code == structure::CODE_ENTRY_ORDER));
}

#[test]
fn test_missing_report() {
    let mut value = bundle_json();
    value["entry"].as_array_mut().unwrap().truncate(1);
    let issues = structure::check(&bundle(value));
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].path.as_deref(), Some("entry"));
}
