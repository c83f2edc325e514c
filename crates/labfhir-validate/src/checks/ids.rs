//! Resource identifier syntax and uniqueness.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use labfhir_model::{Bundle, ValidationIssue};
use regex::Regex;

use super::resource_path;

pub const CODE_ID_SYNTAX: &str = "BNDL-ID";
pub const CODE_ID_DUPLICATE: &str = "BNDL-ID-DUP";

/// FHIR `id` datatype.
static FHIR_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9\-.]{1,64}$").expect("Invalid FHIR id regex"));

pub fn is_valid_id(id: &str) -> bool {
    FHIR_ID_REGEX.is_match(id)
}

pub fn check(bundle: &Bundle) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if !is_valid_id(&bundle.id) {
        issues.push(
            ValidationIssue::error(CODE_ID_SYNTAX, format!("invalid id '{}'", bundle.id)).at("id"),
        );
    }

    let mut seen = BTreeSet::new();
    for (index, entry) in bundle.entry.iter().enumerate() {
        let id = entry.resource.id();
        if !is_valid_id(id) {
            issues.push(
                ValidationIssue::error(CODE_ID_SYNTAX, format!("invalid id '{id}'"))
                    .at(resource_path(index, "id")),
            );
        }
        let key = (entry.resource.resource_type(), id);
        if !seen.insert(key) {
            issues.push(
                ValidationIssue::error(
                    CODE_ID_DUPLICATE,
                    format!("duplicate {} id '{id}'", entry.resource.resource_type()),
                )
                .at(resource_path(index, "id")),
            );
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_syntax() {
        assert!(is_valid_id("obs-001"));
        assert!(is_valid_id("a.b-C9"));
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("obs_001"));
        assert!(!is_valid_id(&"x".repeat(65)));
    }
}
