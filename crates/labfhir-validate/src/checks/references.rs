//! Subject references must point at the bundle's Patient.

use labfhir_model::{Bundle, Resource, ValidationIssue};

use super::resource_path;

pub const CODE_UNRESOLVED_REFERENCE: &str = "BNDL-REF";

pub fn check(bundle: &Bundle) -> Vec<ValidationIssue> {
    let expected = bundle
        .patient()
        .map(|patient| format!("Patient/{}", patient.id));

    bundle
        .entry
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let subject = match &entry.resource {
                Resource::Patient(_) => return None,
                Resource::DiagnosticReport(report) => &report.subject,
                Resource::Observation(obs) => &obs.subject,
            };
            if expected.as_deref() == Some(subject.reference.as_str()) {
                return None;
            }
            Some(
                ValidationIssue::error(
                    CODE_UNRESOLVED_REFERENCE,
                    format!("reference '{}' does not resolve", subject.reference),
                )
                .at(resource_path(index, "subject.reference")),
            )
        })
        .collect()
}
