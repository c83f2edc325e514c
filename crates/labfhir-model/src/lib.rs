//! Data model for lab report extraction.
//!
//! - **fields**: field names and raw values recognized in report text
//! - **resource**: FHIR R4 resources and the collection bundle
//! - **options**: pipeline configuration (rule set, derivation policy)
//! - **issue**: structural validation issues

pub mod error;
pub mod fields;
pub mod issue;
pub mod options;
pub mod resource;

pub use error::{ModelError, Result};
pub use fields::{FieldName, RawField, RawFields, RawValue};
pub use issue::{IssueSeverity, ValidationIssue, error_count, warning_count};
pub use options::{DEFAULT_FACILITY, DerivationPolicy, PipelineOptions, RuleSet};
pub use resource::{
    AdministrativeGender, BUNDLE_ID, Bundle, BundleEntry, CodeableConcept, Coding,
    DIAGNOSTIC_SERVICE_SYSTEM, DiagnosticReport, ErrorDocument, HumanName, LOINC_SYSTEM,
    OBSERVATION_CATEGORY_SYSTEM, Observation, PATIENT_ID, Patient, Performer, Quantity,
    REPORT_ID, Reference, ReferenceRange, Resource, UCUM_SYSTEM,
};
