//! Recognition rules compiled from the Pattern Library.
//!
//! Each [`RuleSet`] compiles once into a [`CompiledRules`] table. Measurement
//! rules use the same capture layout in both sets:
//!
//! 1. numeric value (required)
//! 2. unit (optional)
//! 3. reference range text (optional, permissive only)

use std::sync::LazyLock;

use labfhir_model::RuleSet;
use regex::Regex;

use crate::patterns::{PATTERN_LIBRARY, PatternEntry};

/// Keeps a label from matching inside a longer label (`LDL` in `VLDL`,
/// `HDL` in `Non-HDL` or `LDL/HDL`).
const LABEL_BOUNDARY: &str = r"(?:^|[^A-Za-z/\-])";

const VALUE: &str = r"([0-9.]+)";

/// A compiled measurement rule bound to its library entry.
#[derive(Debug)]
pub struct MeasurementRule {
    pub entry: &'static PatternEntry,
    pub regex: Regex,
}

/// Compiled rules for one rule set.
#[derive(Debug)]
pub struct CompiledRules {
    pub rule_set: RuleSet,
    pub patient_name: Regex,
    pub age_sex: Regex,
    /// Tried in order; the first rule that matches wins.
    pub facility: Vec<Regex>,
    pub report_date: Regex,
    pub measurements: Vec<MeasurementRule>,
}

static STRICT_RULES: LazyLock<CompiledRules> = LazyLock::new(|| CompiledRules {
    rule_set: RuleSet::Strict,
    patient_name: compile(r"(?m)Patient Name[:\s]+([A-Za-z \t.]+?)(?:\s+Age|\r?$)"),
    age_sex: compile(r"Age\s*/\s*Sex[:\s]+([0-9]+)\s*([MF])"),
    facility: vec![compile(STRICT_FACILITY)],
    report_date: compile(r"Reported Date[:\s]+([0-9]{2}/[0-9]{2}/[0-9]{4})"),
    measurements: PATTERN_LIBRARY
        .iter()
        .map(|entry| MeasurementRule {
            entry,
            regex: compile(&strict_measurement(entry)),
        })
        .collect(),
});

static PERMISSIVE_RULES: LazyLock<CompiledRules> = LazyLock::new(|| CompiledRules {
    rule_set: RuleSet::Permissive,
    patient_name: compile(
        r"(?im)(?:Patient(?:'s)?[ \t]+Name|Name[ \t]+of[ \t]+Patient|Patient)[ \t]*[:\-][ \t]*([A-Za-z \t.]+?)(?:[ \t]+Age|[ \t]*\r?$)",
    ),
    age_sex: compile(
        r"(?i)Age\s*/\s*(?:Sex|Gender)[:\s]+([0-9]+)\s*(?:Y(?:ears?|rs?)?\.?)?\s*/?\s*(Male|Female|M|F)\b",
    ),
    facility: vec![
        compile(r"(?im)^[ \t]*Lab(?:oratory)?(?:[ \t]+Name)?[ \t]*:[ \t]*(\S[^\n]*?)[ \t]*$"),
        compile(STRICT_FACILITY),
    ],
    report_date: compile(
        r"(?i)Report(?:ed)?[ \t]*(?:Date|On)[:\s]+([0-9]{1,2}/[0-9]{1,2}/[0-9]{4})",
    ),
    measurements: PATTERN_LIBRARY
        .iter()
        .map(|entry| MeasurementRule {
            entry,
            regex: compile(&permissive_measurement(entry)),
        })
        .collect(),
});

/// An upper-case token run ending in LABORATORY, kept on one line.
const STRICT_FACILITY: &str = r"([A-Z][A-Z&.' \t]*\bLABORATOR(?:Y|IES)\b[^0-9\n]*)";

/// Returns the compiled rules for a rule set.
pub fn rules_for(rule_set: RuleSet) -> &'static CompiledRules {
    match rule_set {
        RuleSet::Strict => &STRICT_RULES,
        RuleSet::Permissive => &PERMISSIVE_RULES,
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("invalid recognition rule")
}

fn strict_measurement(entry: &PatternEntry) -> String {
    let label = regex::escape(entry.labels[0]);
    match entry.strict_unit {
        Some(unit) => format!(r"{LABEL_BOUNDARY}{label}[:\s]+{VALUE}\s*((?i:{unit}))"),
        None => format!(r"{LABEL_BOUNDARY}{label}[:\s]+{VALUE}"),
    }
}

fn permissive_measurement(entry: &PatternEntry) -> String {
    let labels = entry
        .labels
        .iter()
        .map(|label| regex::escape(label))
        .collect::<Vec<_>>()
        .join("|");
    // Labels may be followed by a parenthesized method, e.g. "(CHOD-PAP)".
    format!(
        r"(?i){LABEL_BOUNDARY}(?:{labels})(?:[ \t]*\([^)\n]*\))?[ \t]*[:\s]+{VALUE}[ \t]*([A-Za-zµ/%]*)[ \t]*(?:\(\s*Ref(?:erence)?[:.\s]*([^)\n]+)\))?"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_library_entry_compiles_in_both_sets() {
        for rule_set in [RuleSet::Strict, RuleSet::Permissive] {
            let rules = rules_for(rule_set);
            assert_eq!(rules.rule_set, rule_set);
            assert_eq!(rules.measurements.len(), PATTERN_LIBRARY.len());
        }
    }

    #[test]
    fn measurement_rules_follow_library_order() {
        let rules = rules_for(RuleSet::Strict);
        for (rule, entry) in rules.measurements.iter().zip(PATTERN_LIBRARY) {
            assert_eq!(rule.entry.field, entry.field);
        }
    }

    #[test]
    fn label_boundary_blocks_substring_labels() {
        let rules = rules_for(RuleSet::Strict);
        let ldl = rules
            .measurements
            .iter()
            .find(|r| r.entry.field == labfhir_model::FieldName::Ldl)
            .unwrap();
        assert!(!ldl.regex.is_match("VLDL Cholesterol: 30 mg/dl"));
        assert!(ldl.regex.is_match("LDL Cholesterol: 130 mg/dl"));
    }
}
