//! Entry order: one Patient, one DiagnosticReport, then Observations.

use labfhir_model::{Bundle, Resource, ValidationIssue};

pub const CODE_ENTRY_ORDER: &str = "BNDL-ORDER";
pub const CODE_BUNDLE_TYPE: &str = "BNDL-TYPE";

pub fn check(bundle: &Bundle) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if bundle.bundle_type != "collection" {
        issues.push(
            ValidationIssue::error(
                CODE_BUNDLE_TYPE,
                format!("expected a collection bundle, found '{}'", bundle.bundle_type),
            )
            .at("type"),
        );
    }

    for (index, entry) in bundle.entry.iter().enumerate() {
        let expected = match index {
            0 => "Patient",
            1 => "DiagnosticReport",
            _ => "Observation",
        };
        let found = entry.resource.resource_type();
        if found != expected {
            issues.push(
                ValidationIssue::error(
                    CODE_ENTRY_ORDER,
                    format!("expected {expected}, found {found}"),
                )
                .at(format!("entry.{index}.resource.resourceType")),
            );
        }
    }

    let has_report = bundle
        .entry
        .iter()
        .any(|entry| matches!(entry.resource, Resource::DiagnosticReport(_)));
    if bundle.patient().is_none() || !has_report {
        issues.push(
            ValidationIssue::error(
                CODE_ENTRY_ORDER,
                "bundle must contain a Patient and a DiagnosticReport",
            )
            .at("entry"),
        );
    }

    issues
}
