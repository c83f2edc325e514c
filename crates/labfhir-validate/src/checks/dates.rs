//! FHIR `date` and `dateTime` syntax.

use std::sync::LazyLock;

use labfhir_model::{Bundle, Resource, ValidationIssue};
use regex::Regex;

use super::resource_path;

pub const CODE_DATE_SYNTAX: &str = "BNDL-DATE";

/// FHIR `date`: YYYY, YYYY-MM or YYYY-MM-DD.
static FHIR_DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}(-(0[1-9]|1[0-2])(-(0[1-9]|[12][0-9]|3[01]))?)?$")
        .expect("Invalid FHIR date regex")
});

/// FHIR `dateTime`: a date, optionally followed by a time with zone.
static FHIR_DATETIME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[0-9]{4}(-(0[1-9]|1[0-2])(-(0[1-9]|[12][0-9]|3[01])(T([01][0-9]|2[0-3]):[0-5][0-9]:([0-5][0-9]|60)(\.[0-9]+)?(Z|(\+|-)((0[0-9]|1[0-3]):[0-5][0-9]|14:00)))?)?)?$",
    )
    .expect("Invalid FHIR dateTime regex")
});

pub fn is_fhir_date(value: &str) -> bool {
    FHIR_DATE_REGEX.is_match(value)
}

pub fn is_fhir_datetime(value: &str) -> bool {
    FHIR_DATETIME_REGEX.is_match(value)
}

pub fn check(bundle: &Bundle) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (index, entry) in bundle.entry.iter().enumerate() {
        match &entry.resource {
            Resource::Patient(patient) => {
                if let Some(birth_date) = &patient.birth_date
                    && !is_fhir_date(birth_date)
                {
                    issues.push(invalid(index, "birthDate", birth_date));
                }
            }
            Resource::DiagnosticReport(report) => {
                if let Some(date) = &report.effective_date_time
                    && !is_fhir_datetime(date)
                {
                    issues.push(invalid(index, "effectiveDateTime", date));
                }
            }
            Resource::Observation(obs) => {
                if let Some(date) = &obs.effective_date_time
                    && !is_fhir_datetime(date)
                {
                    issues.push(invalid(index, "effectiveDateTime", date));
                }
            }
        }
    }

    issues
}

fn invalid(index: usize, element: &str, value: &str) -> ValidationIssue {
    ValidationIssue::error(
        CODE_DATE_SYNTAX,
        format!("'{value}' is not a valid FHIR {element}"),
    )
    .at(resource_path(index, element))
}
