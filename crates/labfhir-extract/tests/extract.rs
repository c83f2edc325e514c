//! Tests for the Field Extraction Engine.
//!
//! Covers both rule sets against representative report layouts, first-match
//! semantics, and label cross-matching between similar analytes.

use labfhir_extract::{FieldExtractor, PATTERN_LIBRARY, entry, extract_fields};
use labfhir_model::{FieldName, RuleSet};
use proptest::prelude::*;

const LIPID_REPORT: &str = "\
VIGNASH CLINICAL LABORATORY
12 Main Road, Chennai
Patient Name: Jane Doe  Age / Sex: 45 F
Reported Date: 05/03/2024

LIPID PROFILE
Serum Total Cholesterol: 210 mg/dl
Serum Triglycerides: 150 mgs/dl
HDL Cholesterol: 48 mg/dl
LDL Cholesterol: 132 mg/dl
VLDL Cholesterol: 30 mg/dl
Cholesterol/HDL Ratio: 4.4
LDL/HDL Ratio: 2.8
";

// =========================================================================
// Strict rule set
// =========================================================================

#[test]
fn test_minimal_report() {
    let fields = extract_fields(
        "Patient Name: Jane Doe  Age/Sex: 45F\nSerum Total Cholesterol: 210 mg/dl\n",
        RuleSet::Strict,
    );
    assert_eq!(fields.text(FieldName::PatientName).as_deref(), Some("Jane Doe"));
    assert_eq!(fields.text(FieldName::Age).as_deref(), Some("45"));
    assert_eq!(fields.text(FieldName::Gender).as_deref(), Some("F"));
    let cholesterol = fields.get(FieldName::Cholesterol).unwrap();
    assert_eq!(cholesterol.value.as_text(), "210");
    assert_eq!(cholesterol.unit.as_deref(), Some("mg/dl"));
}

#[test]
fn test_full_lipid_report() {
    let fields = extract_fields(LIPID_REPORT, RuleSet::Strict);
    assert_eq!(
        fields.text(FieldName::LabName).as_deref(),
        Some("VIGNASH CLINICAL LABORATORY")
    );
    assert_eq!(fields.text(FieldName::ReportDate).as_deref(), Some("05/03/2024"));

    let expected = [
        (FieldName::Cholesterol, "210"),
        (FieldName::Triglycerides, "150"),
        (FieldName::Hdl, "48"),
        (FieldName::Ldl, "132"),
        (FieldName::Vldl, "30"),
        (FieldName::CholesterolHdlRatio, "4.4"),
        (FieldName::LdlHdlRatio, "2.8"),
    ];
    for (field, value) in expected {
        assert_eq!(fields.text(field).as_deref(), Some(value), "{field}");
    }
    assert_eq!(
        fields.get(FieldName::Triglycerides).unwrap().unit.as_deref(),
        Some("mgs/dl")
    );
}

#[test]
fn test_ratio_has_no_unit() {
    let fields = extract_fields("Cholesterol/HDL Ratio: 3.5", RuleSet::Strict);
    let ratio = fields.get(FieldName::CholesterolHdlRatio).unwrap();
    assert_eq!(ratio.value.as_text(), "3.5");
    assert_eq!(ratio.unit, None);
    assert!(!fields.contains(FieldName::Cholesterol));
    assert!(!fields.contains(FieldName::Hdl));
}

#[test]
fn test_strict_requires_unit() {
    let fields = extract_fields("Serum Total Cholesterol: 210", RuleSet::Strict);
    assert!(!fields.contains(FieldName::Cholesterol));
}

#[test]
fn test_strict_requires_exact_label() {
    let fields = extract_fields("Total Cholesterol: 210 mg/dl", RuleSet::Strict);
    assert!(fields.is_empty());
}

#[test]
fn test_first_match_wins() {
    let fields = extract_fields(
        "HDL Cholesterol: 45 mg/dl\nHDL Cholesterol: 50 mg/dl\n",
        RuleSet::Strict,
    );
    assert_eq!(fields.text(FieldName::Hdl).as_deref(), Some("45"));
}

#[test]
fn test_similar_labels_do_not_cross_match() {
    let fields = extract_fields("VLDL Cholesterol: 30 mg/dl\n", RuleSet::Strict);
    assert_eq!(fields.text(FieldName::Vldl).as_deref(), Some("30"));
    assert!(!fields.contains(FieldName::Ldl));

    let fields = extract_fields("LDL/HDL Ratio: 2.8\n", RuleSet::Permissive);
    assert_eq!(fields.text(FieldName::LdlHdlRatio).as_deref(), Some("2.8"));
    assert!(!fields.contains(FieldName::Hdl));
    assert!(!fields.contains(FieldName::Ldl));
}

#[test]
fn test_empty_text_yields_no_fields() {
    for rule_set in [RuleSet::Strict, RuleSet::Permissive] {
        assert!(extract_fields("", rule_set).is_empty());
        assert!(extract_fields("nothing to see here", rule_set).is_empty());
    }
}

#[test]
fn test_crlf_line_endings() {
    let fields = extract_fields(
        "Patient Name: John Smith\r\nSerum Total Cholesterol: 180 mg/dl\r\n",
        RuleSet::Strict,
    );
    assert_eq!(
        fields.text(FieldName::PatientName).as_deref(),
        Some("John Smith")
    );
    assert_eq!(fields.text(FieldName::Cholesterol).as_deref(), Some("180"));
}

// =========================================================================
// Permissive rule set
// =========================================================================

#[test]
fn test_permissive_alternative_labels() {
    let text = "\
Name of Patient: Ravi Kumar
Age / Gender: 52 Years / Male
Lab: City Diagnostics
Report Date: 7/4/2024
total cholesterol (CHOD-PAP): 199 mg/dL
Hb: 13.2 g/dL
TSH: 2.1 mIU/mL (Ref: 0.4-4.0)
";
    let fields = extract_fields(text, RuleSet::Permissive);
    assert_eq!(
        fields.text(FieldName::PatientName).as_deref(),
        Some("Ravi Kumar")
    );
    assert_eq!(fields.text(FieldName::Age).as_deref(), Some("52"));
    assert_eq!(fields.text(FieldName::Gender).as_deref(), Some("Male"));
    assert_eq!(
        fields.text(FieldName::LabName).as_deref(),
        Some("City Diagnostics")
    );
    assert_eq!(fields.text(FieldName::ReportDate).as_deref(), Some("7/4/2024"));
    assert_eq!(fields.text(FieldName::Cholesterol).as_deref(), Some("199"));
    assert_eq!(
        fields.get(FieldName::Hemoglobin).unwrap().unit.as_deref(),
        Some("g/dL")
    );
    let tsh = fields.get(FieldName::Tsh).unwrap();
    assert_eq!(tsh.value.as_text(), "2.1");
    assert_eq!(tsh.unit.as_deref(), Some("mIU/mL"));
    assert_eq!(tsh.reference_range.as_deref(), Some("0.4-4.0"));
}

#[test]
fn test_permissive_reference_range_after_method() {
    let fields = extract_fields(
        "HDL Cholesterol (Direct): 45 mg/dL (Ref: 40-60)",
        RuleSet::Permissive,
    );
    let hdl = fields.get(FieldName::Hdl).unwrap();
    assert_eq!(hdl.value.as_text(), "45");
    assert_eq!(hdl.unit.as_deref(), Some("mg/dL"));
    assert_eq!(hdl.reference_range.as_deref(), Some("40-60"));
}

#[test]
fn test_permissive_accepts_strict_layout() {
    let strict = extract_fields(LIPID_REPORT, RuleSet::Strict);
    let permissive = extract_fields(LIPID_REPORT, RuleSet::Permissive);
    for field in strict.iter() {
        assert_eq!(
            permissive.text(field.name),
            strict.text(field.name),
            "{}",
            field.name
        );
    }
}

#[test]
fn test_measurement_rules_are_independent() {
    let extractor = FieldExtractor::new(RuleSet::Strict);
    let fields = extractor.extract(LIPID_REPORT);
    for pattern in PATTERN_LIBRARY {
        let alone = extractor.extract_measurement(pattern, LIPID_REPORT);
        assert_eq!(alone.as_ref(), fields.get(pattern.field), "{}", pattern.field);
    }
    assert!(entry(FieldName::Egfr).is_some());
}

proptest! {
    #[test]
    fn prop_extraction_is_total_and_deterministic(text in "\\PC{0,200}") {
        for rule_set in [RuleSet::Strict, RuleSet::Permissive] {
            let first = extract_fields(&text, rule_set);
            let second = extract_fields(&text, rule_set);
            prop_assert_eq!(&first, &second);
            for field in first.iter().filter(|f| f.name.is_measurement()) {
                let value = field.value.as_text();
                prop_assert!(value.chars().all(|c| c.is_ascii_digit() || c == '.'));
            }
        }
    }
}
