//! Value normalization for lab report fields.
//!
//! Turns [`labfhir_model::RawFields`] into [`NormalizedFields`]: dates become
//! `YYYY-MM-DD`, gender becomes a FHIR code, measurement values become `f64`
//! with a ratio or UCUM quantity unit. Values that cannot be coerced are
//! dropped, never zero-filled.

mod types;

pub mod normalization;

pub use normalization::{
    normalize, normalize_gender, parse_measurement, reorder_slash_date, ucum_code, value_kind,
};
pub use types::{NormalizedFields, NormalizedMeasurement, UNKNOWN_PATIENT, ValueKind};
