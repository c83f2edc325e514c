//! Bundle validation.
//!
//! Validation is a capability handed to the assembler. It reports issues and
//! never rejects a bundle; callers decide what to do with the findings.

pub mod checks;

use labfhir_model::{Bundle, ValidationIssue};

/// Inspects an assembled bundle and reports structural issues.
pub trait BundleValidator {
    fn validate(&self, bundle: &Bundle) -> Vec<ValidationIssue>;
}

/// Accepts every bundle.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopValidator;

impl BundleValidator for NoopValidator {
    fn validate(&self, _bundle: &Bundle) -> Vec<ValidationIssue> {
        Vec::new()
    }
}

/// Built-in checks: identifier syntax and uniqueness, entry order, subject
/// references, date syntax, codings, and quantity units.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralValidator;

impl BundleValidator for StructuralValidator {
    fn validate(&self, bundle: &Bundle) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        issues.extend(checks::structure::check(bundle));
        issues.extend(checks::ids::check(bundle));
        issues.extend(checks::references::check(bundle));
        issues.extend(checks::dates::check(bundle));
        issues.extend(checks::codings::check(bundle));
        issues
    }
}
