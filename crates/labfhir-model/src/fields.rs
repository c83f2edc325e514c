//! Field names and raw values recognized in lab report text.
//!
//! A document yields at most one raw value per [`FieldName`]. The first value
//! recorded for a name wins; later candidates are ignored.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Every field the pipeline knows how to recognize.
///
/// Demographic and report-level fields come first, followed by one variant per
/// lab measurement. Declaration order is the iteration order of [`RawFields`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    PatientName,
    Gender,
    Age,
    LabName,
    ReportDate,
    Cholesterol,
    Triglycerides,
    Hdl,
    Ldl,
    Vldl,
    CholesterolHdlRatio,
    LdlHdlRatio,
    Hemoglobin,
    BloodSugar,
    Microalbuminuria,
    Tsh,
    Creatinine,
    Egfr,
}

impl FieldName {
    /// All field names in declaration order.
    pub const ALL: [FieldName; 18] = [
        FieldName::PatientName,
        FieldName::Gender,
        FieldName::Age,
        FieldName::LabName,
        FieldName::ReportDate,
        FieldName::Cholesterol,
        FieldName::Triglycerides,
        FieldName::Hdl,
        FieldName::Ldl,
        FieldName::Vldl,
        FieldName::CholesterolHdlRatio,
        FieldName::LdlHdlRatio,
        FieldName::Hemoglobin,
        FieldName::BloodSugar,
        FieldName::Microalbuminuria,
        FieldName::Tsh,
        FieldName::Creatinine,
        FieldName::Egfr,
    ];

    /// Returns the snake_case key used in structured field documents.
    pub const fn as_str(&self) -> &'static str {
        match self {
            FieldName::PatientName => "patient_name",
            FieldName::Gender => "gender",
            FieldName::Age => "age",
            FieldName::LabName => "lab_name",
            FieldName::ReportDate => "report_date",
            FieldName::Cholesterol => "cholesterol",
            FieldName::Triglycerides => "triglycerides",
            FieldName::Hdl => "hdl",
            FieldName::Ldl => "ldl",
            FieldName::Vldl => "vldl",
            FieldName::CholesterolHdlRatio => "cholesterol_hdl_ratio",
            FieldName::LdlHdlRatio => "ldl_hdl_ratio",
            FieldName::Hemoglobin => "hemoglobin",
            FieldName::BloodSugar => "blood_sugar",
            FieldName::Microalbuminuria => "microalbuminuria",
            FieldName::Tsh => "tsh",
            FieldName::Creatinine => "creatinine",
            FieldName::Egfr => "egfr",
        }
    }

    /// True for lab measurement fields (everything after the report date).
    pub const fn is_measurement(&self) -> bool {
        !matches!(
            self,
            FieldName::PatientName
                | FieldName::Gender
                | FieldName::Age
                | FieldName::LabName
                | FieldName::ReportDate
        )
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        FieldName::ALL
            .iter()
            .copied()
            .find(|name| name.as_str().eq_ignore_ascii_case(key))
            .ok_or_else(|| ModelError::UnknownField(key.to_string()))
    }
}

/// A value as it was found, before any coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Text(String),
    Number(f64),
}

impl RawValue {
    /// Returns the value as text, formatting numbers without a trailing `.0`.
    pub fn as_text(&self) -> String {
        match self {
            RawValue::Text(text) => text.clone(),
            RawValue::Number(number) if number.fract() == 0.0 && number.is_finite() => {
                format!("{number:.0}")
            }
            RawValue::Number(number) => number.to_string(),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

/// A single recognized field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawField {
    pub name: FieldName,
    pub value: RawValue,
    /// Unit text captured next to a measurement, if the rule has a unit group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Reference range text captured after a measurement, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_range: Option<String>,
}

impl RawField {
    pub fn new(name: FieldName, value: impl Into<RawValue>) -> Self {
        Self {
            name,
            value: value.into(),
            unit: None,
            reference_range: None,
        }
    }

    pub fn with_unit(mut self, unit: Option<String>) -> Self {
        self.unit = unit.filter(|u| !u.trim().is_empty());
        self
    }

    pub fn with_reference_range(mut self, range: Option<String>) -> Self {
        self.reference_range = range.filter(|r| !r.trim().is_empty());
        self
    }
}

/// Flat mapping of field name to the first raw value found for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawFields {
    fields: BTreeMap<FieldName, RawField>,
}

impl RawFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a field unless one with the same name is already present.
    ///
    /// Returns `true` when the field was recorded.
    pub fn insert_first(&mut self, field: RawField) -> bool {
        if self.fields.contains_key(&field.name) {
            return false;
        }
        self.fields.insert(field.name, field);
        true
    }

    pub fn get(&self, name: FieldName) -> Option<&RawField> {
        self.fields.get(&name)
    }

    /// Returns the raw value as trimmed text, treating blank text as absent.
    pub fn text(&self, name: FieldName) -> Option<String> {
        let text = self.get(name)?.value.as_text();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    pub fn contains(&self, name: FieldName) -> bool {
        self.fields.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RawField> {
        self.fields.values()
    }
}
