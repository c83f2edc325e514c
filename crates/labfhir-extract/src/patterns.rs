//! The Pattern Library: one declarative entry per lab measurement.
//!
//! Entries bind a [`FieldName`] to the labels it appears under in report text,
//! its LOINC coding, and the unit used when the text does not state one. The
//! recognition rules in [`crate::rules`] are generated from this table; no
//! measurement has hand-written matching logic.

use labfhir_model::FieldName;

/// Default unit marker for dimensionless ratios.
pub const RATIO_UNIT: &str = "ratio";

/// A lab measurement the extractor can recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternEntry {
    pub field: FieldName,
    /// Label alternatives, most specific first. The first label is the exact
    /// wording the strict rule set accepts.
    pub labels: &'static [&'static str],
    /// Unit pattern the strict rule set requires after the value. `None`
    /// means the value stands alone (ratios).
    pub strict_unit: Option<&'static str>,
    pub loinc_code: &'static str,
    pub display: &'static str,
    pub default_unit: &'static str,
}

impl PatternEntry {
    /// Ratios carry no unit; everything else is a quantity.
    pub fn is_ratio(&self) -> bool {
        self.display.to_lowercase().contains("ratio")
    }
}

const MG_DL: &str = "mgs?/dl";

pub static PATTERN_LIBRARY: &[PatternEntry] = &[
    PatternEntry {
        field: FieldName::Cholesterol,
        labels: &[
            "Serum Total Cholesterol",
            "Total Cholesterol",
            "Cholesterol, Total",
            "S. Cholesterol",
        ],
        strict_unit: Some(MG_DL),
        loinc_code: "33747-0",
        display: "Cholesterol [Mass/volume] in Serum or Plasma",
        default_unit: "mg/dL",
    },
    PatternEntry {
        field: FieldName::Triglycerides,
        labels: &["Serum Triglycerides", "Triglycerides", "Triglyceride"],
        strict_unit: Some(MG_DL),
        loinc_code: "2571-8",
        display: "Triglyceride [Mass/volume] in Serum or Plasma",
        default_unit: "mg/dL",
    },
    PatternEntry {
        field: FieldName::Hdl,
        labels: &["HDL Cholesterol", "HDL-C", "HDL"],
        strict_unit: Some(MG_DL),
        loinc_code: "2085-9",
        display: "Cholesterol in HDL [Mass/volume] in Serum or Plasma",
        default_unit: "mg/dL",
    },
    PatternEntry {
        field: FieldName::Ldl,
        labels: &["LDL Cholesterol", "LDL-C", "LDL"],
        strict_unit: Some(MG_DL),
        loinc_code: "18262-6",
        display: "Cholesterol in LDL [Mass/volume] in Serum or Plasma",
        default_unit: "mg/dL",
    },
    PatternEntry {
        field: FieldName::Vldl,
        labels: &["VLDL Cholesterol", "VLDL-C", "VLDL"],
        strict_unit: Some(MG_DL),
        loinc_code: "13458-5",
        display: "Cholesterol in VLDL [Mass/volume] in Serum or Plasma",
        default_unit: "mg/dL",
    },
    PatternEntry {
        field: FieldName::CholesterolHdlRatio,
        labels: &[
            "Cholesterol/HDL Ratio",
            "Total Cholesterol/HDL Ratio",
            "TC/HDL Ratio",
            "Chol/HDL Ratio",
        ],
        strict_unit: None,
        loinc_code: "9830-1",
        display: "Cholesterol.total/Cholesterol in HDL [Mass Ratio] in Serum or Plasma",
        default_unit: RATIO_UNIT,
    },
    PatternEntry {
        field: FieldName::LdlHdlRatio,
        labels: &["LDL/HDL Ratio", "LDL-C/HDL-C Ratio"],
        strict_unit: None,
        loinc_code: "11054-4",
        display: "Cholesterol in LDL/Cholesterol in HDL [Mass Ratio] in Serum or Plasma",
        default_unit: RATIO_UNIT,
    },
    PatternEntry {
        field: FieldName::Hemoglobin,
        labels: &["Hemoglobin", "Haemoglobin", "Hb"],
        strict_unit: Some("gms?/dl"),
        loinc_code: "718-7",
        display: "Hemoglobin [Mass/volume] in Blood",
        default_unit: "g/dL",
    },
    PatternEntry {
        field: FieldName::BloodSugar,
        labels: &[
            "Blood Sugar",
            "Blood Glucose",
            "Fasting Blood Sugar",
            "Random Blood Sugar",
            "Glucose",
        ],
        strict_unit: Some(MG_DL),
        loinc_code: "2339-0",
        display: "Glucose [Mass/volume] in Blood",
        default_unit: "mg/dL",
    },
    PatternEntry {
        field: FieldName::Microalbuminuria,
        labels: &["Urine Microalbuminuria", "Microalbuminuria", "Microalbumin"],
        strict_unit: Some("mg/l"),
        loinc_code: "14959-1",
        display: "Albumin [Mass/volume] in Urine",
        default_unit: "mg/L",
    },
    PatternEntry {
        field: FieldName::Tsh,
        labels: &["TSH", "Thyroid Stimulating Hormone", "Thyrotropin"],
        strict_unit: Some("(?:m|µ|u)?[il]u/ml"),
        loinc_code: "3016-3",
        display: "Thyrotropin [Units/volume] in Serum or Plasma",
        default_unit: "mIU/mL",
    },
    PatternEntry {
        field: FieldName::Creatinine,
        labels: &["Serum Creatinine", "Creatinine"],
        strict_unit: Some(MG_DL),
        loinc_code: "2160-0",
        display: "Creatinine [Mass/volume] in Serum or Plasma",
        default_unit: "mg/dL",
    },
    PatternEntry {
        field: FieldName::Egfr,
        labels: &["eGFR", "Estimated GFR", "Estimated Glomerular Filtration Rate"],
        strict_unit: Some(r"ml/min(?:/1\.73\s*m(?:2|²))?"),
        loinc_code: "33914-3",
        display: "Glomerular filtration rate/1.73 square meters [Volume Rate/Area] in Serum, Plasma or Blood by Creatinine-based formula (MDRD)",
        default_unit: "mL/min/1.73 m2",
    },
];

/// All entries in library order.
pub fn entries() -> &'static [PatternEntry] {
    PATTERN_LIBRARY
}

/// Looks up the entry for a measurement field.
pub fn entry(field: FieldName) -> Option<&'static PatternEntry> {
    PATTERN_LIBRARY.iter().find(|e| e.field == field)
}
