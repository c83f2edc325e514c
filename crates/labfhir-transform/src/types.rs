use labfhir_extract::PatternEntry;
use labfhir_model::AdministrativeGender;

/// Placeholder patient name when none was recognized.
pub const UNKNOWN_PATIENT: &str = "Unknown";

/// How a measurement value is expressed on its Observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKind {
    /// Dimensionless; the quantity carries only a value.
    Ratio,
    /// A UCUM quantity. `unit` is the human-readable unit, `code` its UCUM code.
    Quantity { unit: String, code: String },
}

/// A measurement whose value parsed as a number.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedMeasurement {
    pub entry: &'static PatternEntry,
    pub value: f64,
    pub kind: ValueKind,
    pub reference_range: Option<String>,
}

/// Canonical values for one document, ready for assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedFields {
    pub patient_name: String,
    pub gender: AdministrativeGender,
    pub age: Option<u32>,
    /// Only populated under the legacy derivation policy.
    pub birth_date: Option<String>,
    pub facility: String,
    /// `YYYY-MM-DD`, or the text as found when it could not be reordered.
    pub report_date: Option<String>,
    /// Pattern Library order.
    pub measurements: Vec<NormalizedMeasurement>,
}

impl NormalizedFields {
    /// Defaults used when nothing was recognized.
    pub fn empty(facility: &str) -> Self {
        Self {
            patient_name: UNKNOWN_PATIENT.to_string(),
            gender: AdministrativeGender::Unknown,
            age: None,
            birth_date: None,
            facility: facility.to_string(),
            report_date: None,
            measurements: Vec::new(),
        }
    }
}
