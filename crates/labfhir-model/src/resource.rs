//! FHIR R4 resources emitted for one lab report.
//!
//! Field declaration order is the JSON key order. Outputs are compared
//! byte-for-byte by the regression harness, so reordering fields here changes
//! every baseline.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const LOINC_SYSTEM: &str = "http://loinc.org";
pub const UCUM_SYSTEM: &str = "http://unitsofmeasure.org";
pub const DIAGNOSTIC_SERVICE_SYSTEM: &str = "http://terminology.hl7.org/CodeSystem/v2-0074";
pub const OBSERVATION_CATEGORY_SYSTEM: &str =
    "http://terminology.hl7.org/CodeSystem/observation-category";

pub const BUNDLE_ID: &str = "bundle-001";
pub const PATIENT_ID: &str = "patient-001";
pub const REPORT_ID: &str = "dr-001";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coding {
    pub system: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl Coding {
    pub fn new(system: &str, code: &str, display: &str) -> Self {
        Self {
            system: system.to_string(),
            code: code.to_string(),
            display: Some(display.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeableConcept {
    pub coding: Vec<Coding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl CodeableConcept {
    pub fn single(coding: Coding) -> Self {
        Self {
            coding: vec![coding],
            text: None,
        }
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub reference: String,
}

impl Reference {
    pub fn patient(id: &str) -> Self {
        Self {
            reference: format!("Patient/{id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HumanName {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Performer {
    pub display: String,
}

/// Administrative gender as emitted on the Patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdministrativeGender {
    Male,
    Female,
    #[default]
    Unknown,
}

impl AdministrativeGender {
    pub const fn as_str(&self) -> &'static str {
        match self {
            AdministrativeGender::Male => "male",
            AdministrativeGender::Female => "female",
            AdministrativeGender::Unknown => "unknown",
        }
    }
}

impl fmt::Display for AdministrativeGender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A measured value. Ratios carry only `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Quantity {
    pub fn ratio(value: f64) -> Self {
        Self {
            value,
            unit: None,
            system: None,
            code: None,
        }
    }

    pub fn ucum(value: f64, unit: &str, code: &str) -> Self {
        Self {
            value,
            unit: Some(unit.to_string()),
            system: Some(UCUM_SYSTEM.to_string()),
            code: Some(code.to_string()),
        }
    }

    pub fn is_ratio(&self) -> bool {
        self.unit.is_none() && self.system.is_none() && self.code.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRange {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: Vec<HumanName>,
    pub gender: AdministrativeGender,
    #[serde(
        rename = "birthDate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub birth_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub id: String,
    pub status: String,
    pub category: Vec<CodeableConcept>,
    pub code: CodeableConcept,
    pub subject: Reference,
    #[serde(
        rename = "effectiveDateTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub effective_date_time: Option<String>,
    pub performer: Vec<Performer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub id: String,
    pub status: String,
    pub category: Vec<CodeableConcept>,
    pub code: CodeableConcept,
    pub subject: Reference,
    #[serde(
        rename = "effectiveDateTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub effective_date_time: Option<String>,
    #[serde(rename = "valueQuantity")]
    pub value_quantity: Quantity,
    #[serde(
        rename = "referenceRange",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub reference_range: Vec<ReferenceRange>,
}

/// Any resource that can sit in a bundle entry. Serializes with
/// `resourceType` as the first key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "resourceType")]
pub enum Resource {
    Patient(Patient),
    DiagnosticReport(DiagnosticReport),
    Observation(Observation),
}

impl Resource {
    pub fn resource_type(&self) -> &'static str {
        match self {
            Resource::Patient(_) => "Patient",
            Resource::DiagnosticReport(_) => "DiagnosticReport",
            Resource::Observation(_) => "Observation",
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Resource::Patient(p) => &p.id,
            Resource::DiagnosticReport(r) => &r.id,
            Resource::Observation(o) => &o.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleEntry {
    pub resource: Resource,
}

/// Collection bundle: Patient, DiagnosticReport, then Observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    #[serde(rename = "resourceType")]
    pub resource_type: String,
    pub id: String,
    #[serde(rename = "type")]
    pub bundle_type: String,
    pub entry: Vec<BundleEntry>,
}

impl Bundle {
    /// Builds a collection bundle in the fixed entry order.
    pub fn collection(
        patient: Patient,
        report: DiagnosticReport,
        observations: Vec<Observation>,
    ) -> Self {
        let mut entry = Vec::with_capacity(observations.len() + 2);
        entry.push(BundleEntry {
            resource: Resource::Patient(patient),
        });
        entry.push(BundleEntry {
            resource: Resource::DiagnosticReport(report),
        });
        entry.extend(observations.into_iter().map(|obs| BundleEntry {
            resource: Resource::Observation(obs),
        }));
        Self {
            resource_type: "Bundle".to_string(),
            id: BUNDLE_ID.to_string(),
            bundle_type: "collection".to_string(),
            entry,
        }
    }

    pub fn patient(&self) -> Option<&Patient> {
        self.entry.iter().find_map(|e| match &e.resource {
            Resource::Patient(p) => Some(p),
            _ => None,
        })
    }

    pub fn report(&self) -> Option<&DiagnosticReport> {
        self.entry.iter().find_map(|e| match &e.resource {
            Resource::DiagnosticReport(r) => Some(r),
            _ => None,
        })
    }

    pub fn observations(&self) -> impl Iterator<Item = &Observation> {
        self.entry.iter().filter_map(|e| match &e.resource {
            Resource::Observation(o) => Some(o),
            _ => None,
        })
    }
}

/// Written instead of a bundle when an upstream collaborator returned
/// nothing usable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDocument {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_output: Option<String>,
}

impl ErrorDocument {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            raw_output: None,
        }
    }

    pub fn with_raw_output(mut self, raw: impl Into<String>) -> Self {
        self.raw_output = Some(raw.into());
        self
    }
}
