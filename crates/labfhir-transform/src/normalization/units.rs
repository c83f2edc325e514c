//! Unit handling: ratio detection and UCUM codes.

use labfhir_extract::PatternEntry;
use labfhir_model::FieldName;

use crate::types::ValueKind;

/// UCUM code for an eGFR rate normalized to body surface area.
pub const EGFR_UCUM_CODE: &str = "mL/min/{1.73_m2}";

/// Maps a printed unit to its UCUM code.
///
/// Known spellings are canonicalized; anything else is used verbatim.
pub fn ucum_code(unit: &str) -> String {
    let trimmed = unit.trim();
    let lower = trimmed.to_lowercase();
    let code = match lower.as_str() {
        "mg/dl" | "mgs/dl" => "mg/dL",
        "g/dl" | "gm/dl" | "gms/dl" => "g/dL",
        "mg/l" => "mg/L",
        "miu/ml" | "mlu/ml" => "m[IU]/mL",
        "µiu/ml" | "uiu/ml" => "u[IU]/mL",
        other if other.starts_with("ml/min") => EGFR_UCUM_CODE,
        _ => return trimmed.to_string(),
    };
    code.to_string()
}

/// Decides how a measurement's value is expressed.
///
/// Ratios never carry a unit. Quantities use the unit printed next to the
/// value, or the entry's default unit when none was captured.
pub fn value_kind(entry: &PatternEntry, matched_unit: Option<&str>) -> ValueKind {
    if entry.is_ratio() {
        return ValueKind::Ratio;
    }
    let unit = matched_unit
        .map(str::trim)
        .filter(|unit| !unit.is_empty())
        .unwrap_or(entry.default_unit);
    let code = if entry.field == FieldName::Egfr {
        EGFR_UCUM_CODE.to_string()
    } else {
        ucum_code(unit)
    };
    ValueKind::Quantity {
        unit: unit.to_string(),
        code,
    }
}

#[cfg(test)]
mod tests {
    use labfhir_extract::entry;

    use super::*;

    #[test]
    fn test_ucum_codes() {
        assert_eq!(ucum_code("mgs/dl"), "mg/dL");
        assert_eq!(ucum_code("MG/DL"), "mg/dL");
        assert_eq!(ucum_code("g/dl"), "g/dL");
        assert_eq!(ucum_code("mg/l"), "mg/L");
        assert_eq!(ucum_code("mlU/mL"), "m[IU]/mL");
        assert_eq!(ucum_code("µIU/mL"), "u[IU]/mL");
        assert_eq!(ucum_code("mL/min/1.73 m2"), EGFR_UCUM_CODE);
        assert_eq!(ucum_code("%"), "%");
    }

    #[test]
    fn test_ratio_has_no_unit() {
        let ratio = entry(FieldName::CholesterolHdlRatio).unwrap();
        assert_eq!(value_kind(ratio, Some("mg/dl")), ValueKind::Ratio);
    }

    #[test]
    fn test_matched_unit_is_kept_verbatim() {
        let hdl = entry(FieldName::Hdl).unwrap();
        assert_eq!(
            value_kind(hdl, Some("mgs/dl")),
            ValueKind::Quantity {
                unit: "mgs/dl".to_string(),
                code: "mg/dL".to_string(),
            }
        );
    }

    #[test]
    fn test_default_unit_when_missing() {
        let tsh = entry(FieldName::Tsh).unwrap();
        assert_eq!(
            value_kind(tsh, None),
            ValueKind::Quantity {
                unit: "mIU/mL".to_string(),
                code: "m[IU]/mL".to_string(),
            }
        );
        let egfr = entry(FieldName::Egfr).unwrap();
        assert_eq!(
            value_kind(egfr, Some("ml/min")),
            ValueKind::Quantity {
                unit: "ml/min".to_string(),
                code: EGFR_UCUM_CODE.to_string(),
            }
        );
    }
}
