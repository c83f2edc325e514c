//! Bundle Assembler.
//!
//! Builds the Patient, DiagnosticReport, and Observations for one document
//! and wraps them in a collection bundle. The validator's findings are logged
//! and returned alongside the bundle; they never prevent assembly.

use labfhir_model::{
    Bundle, CodeableConcept, Coding, DIAGNOSTIC_SERVICE_SYSTEM, DiagnosticReport, HumanName,
    LOINC_SYSTEM, OBSERVATION_CATEGORY_SYSTEM, Observation, PATIENT_ID, Patient, Performer,
    Quantity, REPORT_ID, Reference, ReferenceRange, ValidationIssue,
};
use labfhir_transform::{NormalizedFields, NormalizedMeasurement, ValueKind};
use labfhir_validate::BundleValidator;
use tracing::{debug, warn};

use crate::ids::IdSequencer;

pub const REPORT_LOINC_CODE: &str = "57698-3";
pub const REPORT_LOINC_DISPLAY: &str = "Lipid panel with direct LDL - Serum or Plasma";
pub const REPORT_TEXT: &str = "Lipid Profile";
const FINAL_STATUS: &str = "final";

/// An assembled bundle and the validation findings for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    pub bundle: Bundle,
    pub warnings: Vec<ValidationIssue>,
}

/// Assembles bundles, consulting `validator` after each one.
#[derive(Clone, Copy)]
pub struct BundleAssembler<'a> {
    validator: &'a dyn BundleValidator,
}

impl<'a> BundleAssembler<'a> {
    pub fn new(validator: &'a dyn BundleValidator) -> Self {
        Self { validator }
    }

    pub fn assemble(&self, fields: &NormalizedFields) -> Assembly {
        let mut ids = IdSequencer::new("obs");
        let effective = fields.report_date.as_deref();

        let observations: Vec<Observation> = fields
            .measurements
            .iter()
            .map(|measurement| build_observation(measurement, ids.next_id(), effective))
            .collect();
        debug!(observations = ids.issued(), "assembled observations");

        let bundle = Bundle::collection(
            build_patient(fields),
            build_report(fields),
            observations,
        );

        let warnings = self.validator.validate(&bundle);
        for issue in &warnings {
            warn!(
                code = %issue.code,
                path = issue.path.as_deref().unwrap_or("-"),
                "bundle validation: {}",
                issue.message
            );
        }

        Assembly { bundle, warnings }
    }
}

fn build_patient(fields: &NormalizedFields) -> Patient {
    Patient {
        id: PATIENT_ID.to_string(),
        name: vec![HumanName {
            text: fields.patient_name.clone(),
        }],
        gender: fields.gender,
        birth_date: fields.birth_date.clone(),
    }
}

fn build_report(fields: &NormalizedFields) -> DiagnosticReport {
    DiagnosticReport {
        id: REPORT_ID.to_string(),
        status: FINAL_STATUS.to_string(),
        category: vec![CodeableConcept::single(Coding::new(
            DIAGNOSTIC_SERVICE_SYSTEM,
            "LAB",
            "Laboratory",
        ))],
        code: CodeableConcept::single(Coding::new(
            LOINC_SYSTEM,
            REPORT_LOINC_CODE,
            REPORT_LOINC_DISPLAY,
        ))
        .with_text(REPORT_TEXT),
        subject: Reference::patient(PATIENT_ID),
        effective_date_time: fields.report_date.clone(),
        performer: vec![Performer {
            display: fields.facility.clone(),
        }],
    }
}

fn build_observation(
    measurement: &NormalizedMeasurement,
    id: String,
    effective: Option<&str>,
) -> Observation {
    let entry = measurement.entry;
    let value_quantity = match &measurement.kind {
        ValueKind::Ratio => Quantity::ratio(measurement.value),
        ValueKind::Quantity { unit, code } => Quantity::ucum(measurement.value, unit, code),
    };
    Observation {
        id,
        status: FINAL_STATUS.to_string(),
        category: vec![CodeableConcept::single(Coding::new(
            OBSERVATION_CATEGORY_SYSTEM,
            "laboratory",
            "Laboratory",
        ))],
        code: CodeableConcept::single(Coding::new(
            LOINC_SYSTEM,
            entry.loinc_code,
            entry.display,
        )),
        subject: Reference::patient(PATIENT_ID),
        effective_date_time: effective.map(str::to_string),
        value_quantity,
        reference_range: measurement
            .reference_range
            .iter()
            .map(|text| ReferenceRange { text: text.clone() })
            .collect(),
    }
}
