//! Normalization of raw fields into canonical values.
//!
//! - **datetime**: report date reordering and birth-date derivation
//! - **gender**: administrative gender codes
//! - **numeric**: measurement and age parsing
//! - **units**: ratio detection and UCUM codes

pub mod datetime;
pub mod gender;
pub mod numeric;
pub mod units;

use chrono::NaiveDate;
use labfhir_extract::PATTERN_LIBRARY;
use labfhir_model::{FieldName, PipelineOptions, RawFields};
use tracing::debug;

use crate::types::{NormalizedFields, NormalizedMeasurement};

pub use datetime::{approximate_birth_date, format_date, reorder_slash_date};
pub use gender::normalize_gender;
pub use numeric::{parse_age, parse_measurement};
pub use units::{EGFR_UCUM_CODE, ucum_code, value_kind};

/// Normalizes one document's raw fields.
///
/// `today` is only consulted under [`labfhir_model::DerivationPolicy::Legacy`],
/// for the approximate birth date and the missing report date fallback.
pub fn normalize(raw: &RawFields, options: &PipelineOptions, today: NaiveDate) -> NormalizedFields {
    let mut fields = NormalizedFields::empty(&options.default_facility);

    if let Some(name) = raw.text(FieldName::PatientName) {
        fields.patient_name = name;
    }
    if let Some(gender) = raw.text(FieldName::Gender) {
        fields.gender = normalize_gender(&gender);
    }
    if let Some(field) = raw.get(FieldName::Age) {
        fields.age = parse_age(&field.value);
        if fields.age.is_none() {
            debug!(value = %field.value.as_text(), "dropping unparseable age");
        }
    }
    if let Some(lab) = raw.text(FieldName::LabName) {
        fields.facility = lab;
    }
    fields.report_date = raw
        .text(FieldName::ReportDate)
        .map(|date| reorder_slash_date(&date));

    if options.derivation.derives_birth_date() {
        fields.birth_date = fields
            .age
            .and_then(|age| approximate_birth_date(age, today))
            .map(format_date);
    }
    if fields.report_date.is_none() && options.derivation.falls_back_to_today() {
        fields.report_date = Some(format_date(today));
    }

    for entry in PATTERN_LIBRARY {
        let Some(field) = raw.get(entry.field) else {
            continue;
        };
        let Some(value) = parse_measurement(&field.value) else {
            debug!(
                field = %entry.field,
                value = %field.value.as_text(),
                "dropping unparseable measurement"
            );
            continue;
        };
        fields.measurements.push(NormalizedMeasurement {
            entry,
            value,
            kind: value_kind(entry, field.unit.as_deref()),
            reference_range: field.reference_range.clone(),
        });
    }

    fields
}
