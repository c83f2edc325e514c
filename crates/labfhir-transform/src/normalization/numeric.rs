//! Numeric coercion for measurement values.

use labfhir_model::RawValue;

/// Parses a measurement value.
///
/// Text is trimmed and parsed as `f64`; numbers pass through. Non-finite
/// results are rejected because they cannot be written as JSON numbers.
pub fn parse_measurement(value: &RawValue) -> Option<f64> {
    let number = match value {
        RawValue::Number(number) => *number,
        RawValue::Text(text) => text.trim().parse::<f64>().ok()?,
    };
    number.is_finite().then_some(number)
}

/// Parses a whole-year age.
pub fn parse_age(value: &RawValue) -> Option<u32> {
    match value {
        RawValue::Number(number) if number.fract() == 0.0 && *number >= 0.0 => {
            u32::try_from(*number as i64).ok()
        }
        RawValue::Number(_) => None,
        RawValue::Text(text) => text.trim().parse().ok(),
    }
}
