//! Field Extraction Engine.
//!
//! Scans raw report text with one compiled rule per field and records the
//! first match for each. A field with no match is simply absent; recognition
//! never fails.

use labfhir_model::{FieldName, RawField, RawFields, RuleSet};
use regex::Captures;
use tracing::{debug, trace};

use crate::patterns::PatternEntry;
use crate::rules::{CompiledRules, MeasurementRule, rules_for};

/// Extracts raw fields from report text using one rule set.
#[derive(Debug, Clone, Copy)]
pub struct FieldExtractor {
    rules: &'static CompiledRules,
}

impl FieldExtractor {
    pub fn new(rule_set: RuleSet) -> Self {
        Self {
            rules: rules_for(rule_set),
        }
    }

    pub fn rule_set(&self) -> RuleSet {
        self.rules.rule_set
    }

    /// Runs every rule against `text` and collects the first match per field.
    pub fn extract(&self, text: &str) -> RawFields {
        let mut fields = RawFields::new();

        if let Some(name) = self.patient_name(text) {
            fields.insert_first(RawField::new(FieldName::PatientName, name));
        }
        if let Some((age, sex)) = self.age_sex(text) {
            fields.insert_first(RawField::new(FieldName::Age, age));
            fields.insert_first(RawField::new(FieldName::Gender, sex));
        }
        if let Some(lab) = self.facility(text) {
            fields.insert_first(RawField::new(FieldName::LabName, lab));
        }
        if let Some(date) = self.report_date(text) {
            fields.insert_first(RawField::new(FieldName::ReportDate, date));
        }
        for rule in &self.rules.measurements {
            if let Some(field) = apply_measurement_rule(rule, text) {
                fields.insert_first(field);
            }
        }

        debug!(
            rule_set = %self.rules.rule_set,
            recognized = fields.len(),
            "field extraction complete"
        );
        fields
    }

    /// Applies the rule for a single library entry.
    pub fn extract_measurement(&self, entry: &PatternEntry, text: &str) -> Option<RawField> {
        let rule = self
            .rules
            .measurements
            .iter()
            .find(|rule| rule.entry.field == entry.field)?;
        apply_measurement_rule(rule, text)
    }

    pub fn patient_name(&self, text: &str) -> Option<String> {
        let captures = self.rules.patient_name.captures(text)?;
        group_text(&captures, 1)
    }

    /// Returns `(age digits, sex letter or word)`.
    pub fn age_sex(&self, text: &str) -> Option<(String, String)> {
        let captures = self.rules.age_sex.captures(text)?;
        Some((group_text(&captures, 1)?, group_text(&captures, 2)?))
    }

    pub fn facility(&self, text: &str) -> Option<String> {
        self.rules.facility.iter().find_map(|rule| {
            let captures = rule.captures(text)?;
            let name = group_text(&captures, 1)?;
            let name = name.trim_end_matches([',', '-', ':', ';']).trim();
            (!name.is_empty()).then(|| name.to_string())
        })
    }

    pub fn report_date(&self, text: &str) -> Option<String> {
        let captures = self.rules.report_date.captures(text)?;
        group_text(&captures, 1)
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new(RuleSet::default())
    }
}

/// Convenience wrapper for a one-off extraction.
pub fn extract_fields(text: &str, rule_set: RuleSet) -> RawFields {
    FieldExtractor::new(rule_set).extract(text)
}

fn apply_measurement_rule(rule: &MeasurementRule, text: &str) -> Option<RawField> {
    let captures = rule.regex.captures(text)?;
    let value = group_text(&captures, 1)?;
    let unit = group_text(&captures, 2).filter(|unit| is_unit_like(unit));
    let range = group_text(&captures, 3);
    trace!(field = %rule.entry.field, value = %value, "measurement matched");
    Some(
        RawField::new(rule.entry.field, value)
            .with_unit(unit)
            .with_reference_range(range),
    )
}

/// Permissive unit groups can swallow a trailing word ("45 Normal").
fn is_unit_like(unit: &str) -> bool {
    unit.contains('/') || unit == "%"
}

fn group_text(captures: &Captures<'_>, index: usize) -> Option<String> {
    let text = captures.get(index)?.as_str().trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
