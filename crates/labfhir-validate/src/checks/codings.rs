//! Codings and quantities must carry a system and a code.

use labfhir_model::{Bundle, CodeableConcept, Quantity, Resource, ValidationIssue};

use super::resource_path;

pub const CODE_CODING_INCOMPLETE: &str = "BNDL-CODING";
pub const CODE_QUANTITY_UNIT: &str = "BNDL-UNIT";

pub fn check(bundle: &Bundle) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (index, entry) in bundle.entry.iter().enumerate() {
        match &entry.resource {
            Resource::Patient(_) => {}
            Resource::DiagnosticReport(report) => {
                check_concepts(&mut issues, index, "category", &report.category);
                check_concept(&mut issues, index, "code", &report.code);
            }
            Resource::Observation(obs) => {
                check_concepts(&mut issues, index, "category", &obs.category);
                check_concept(&mut issues, index, "code", &obs.code);
                check_quantity(&mut issues, index, &obs.value_quantity);
            }
        }
    }

    issues
}

fn check_concepts(
    issues: &mut Vec<ValidationIssue>,
    index: usize,
    element: &str,
    concepts: &[CodeableConcept],
) {
    for (position, concept) in concepts.iter().enumerate() {
        check_concept(issues, index, &format!("{element}.{position}"), concept);
    }
}

fn check_concept(
    issues: &mut Vec<ValidationIssue>,
    index: usize,
    element: &str,
    concept: &CodeableConcept,
) {
    if concept.coding.is_empty() && concept.text.is_none() {
        issues.push(
            ValidationIssue::warning(CODE_CODING_INCOMPLETE, "concept has no coding or text")
                .at(resource_path(index, element)),
        );
    }
    for (position, coding) in concept.coding.iter().enumerate() {
        if coding.system.trim().is_empty() || coding.code.trim().is_empty() {
            issues.push(
                ValidationIssue::error(CODE_CODING_INCOMPLETE, "coding needs a system and a code")
                    .at(resource_path(index, &format!("{element}.coding.{position}"))),
            );
        }
    }
}

fn check_quantity(issues: &mut Vec<ValidationIssue>, index: usize, quantity: &Quantity) {
    if quantity.unit.is_some() && (quantity.system.is_none() || quantity.code.is_none()) {
        issues.push(
            ValidationIssue::error(CODE_QUANTITY_UNIT, "unit without a system and code")
                .at(resource_path(index, "valueQuantity")),
        );
    }
    if quantity.code.is_some() && quantity.system.is_none() {
        issues.push(
            ValidationIssue::error(CODE_QUANTITY_UNIT, "unit code without a system")
                .at(resource_path(index, "valueQuantity.system")),
        );
    }
    if !quantity.value.is_finite() {
        issues.push(
            ValidationIssue::error(CODE_QUANTITY_UNIT, "value is not a finite number")
                .at(resource_path(index, "valueQuantity.value")),
        );
    }
}
