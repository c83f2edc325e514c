//! Structured field import.
//!
//! A document-parsing service returns a flat JSON object keyed by field name
//! (`patient_name`, `gender`, `age`, `cholesterol`, ...). This module turns
//! that object into [`RawFields`] so it flows through the same normalizer and
//! assembler as text extraction.

use labfhir_model::{FieldName, RawField, RawFields, RawValue};
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, UpstreamError};

/// Parses a structured field document.
pub fn fields_from_str(json: &str) -> Result<RawFields> {
    if json.trim().is_empty() {
        return Err(UpstreamError::NoStructuredData);
    }
    let value: Value = serde_json::from_str(json).map_err(UpstreamError::InvalidStructuredData)?;
    fields_from_value(&value)
}

/// Converts a structured field document into raw fields.
///
/// Accepts the object itself, a parse-result array (first element wins), or
/// an object wrapping the fields under `extraction`. Unknown keys, nulls, and
/// non-scalar values are skipped.
pub fn fields_from_value(value: &Value) -> Result<RawFields> {
    let object = unwrap_document(value)?;
    if object.is_empty() {
        return Err(UpstreamError::NoStructuredData);
    }

    let mut fields = RawFields::new();
    for (key, value) in object {
        let Ok(name) = key.parse::<FieldName>() else {
            debug!(key = %key, "skipping unknown structured field");
            continue;
        };
        let raw = match value {
            Value::String(text) if !text.trim().is_empty() => RawValue::Text(text.clone()),
            Value::Number(number) => match number.as_f64() {
                Some(number) => RawValue::Number(number),
                None => continue,
            },
            Value::Null | Value::String(_) => continue,
            Value::Bool(_) | Value::Array(_) | Value::Object(_) => {
                debug!(field = %name, "skipping non-scalar structured field");
                continue;
            }
        };
        fields.insert_first(RawField::new(name, raw));
    }
    Ok(fields)
}

fn unwrap_document(value: &Value) -> Result<&serde_json::Map<String, Value>> {
    match value {
        Value::Array(items) => match items.first() {
            Some(first) => unwrap_document(first),
            None => Err(UpstreamError::NoStructuredData),
        },
        Value::Object(object) => match object.get("extraction") {
            Some(inner @ Value::Object(_)) => unwrap_document(inner),
            _ => Ok(object),
        },
        Value::Null => Err(UpstreamError::NoStructuredData),
        _ => Err(UpstreamError::NotAnObject),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn scalar_fields_are_imported() {
        let fields = fields_from_value(&json!({
            "patient_name": "Jane Doe",
            "gender": "F",
            "age": 45,
            "hdl": 48.5,
            "tsh": null,
            "comment": "fasting"
        }))
        .unwrap();
        assert_eq!(fields.text(FieldName::PatientName).as_deref(), Some("Jane Doe"));
        assert_eq!(fields.text(FieldName::Age).as_deref(), Some("45"));
        assert_eq!(
            fields.get(FieldName::Hdl).map(|f| f.value.clone()),
            Some(RawValue::Number(48.5))
        );
        assert!(!fields.contains(FieldName::Tsh));
        assert_eq!(fields.len(), 4);
    }

    #[test]
    fn parse_result_wrappers_are_unwrapped() {
        let fields = fields_from_value(&json!([{ "extraction": { "ldl": 130 } }])).unwrap();
        assert!(fields.contains(FieldName::Ldl));
    }

    #[test]
    fn empty_documents_are_upstream_errors() {
        assert!(matches!(
            fields_from_value(&json!({})),
            Err(UpstreamError::NoStructuredData)
        ));
        assert!(matches!(
            fields_from_value(&json!([])),
            Err(UpstreamError::NoStructuredData)
        ));
        assert!(matches!(
            fields_from_str("  "),
            Err(UpstreamError::NoStructuredData)
        ));
        assert!(matches!(
            fields_from_value(&json!("text")),
            Err(UpstreamError::NotAnObject)
        ));
    }

    #[test]
    fn all_null_object_yields_empty_fields() {
        let fields = fields_from_value(&json!({ "patient_name": null })).unwrap();
        assert!(fields.is_empty());
    }
}
