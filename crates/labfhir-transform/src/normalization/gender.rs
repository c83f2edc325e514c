use labfhir_model::AdministrativeGender;

/// Maps `M`/`MALE` and `F`/`FEMALE` (any case) to a FHIR gender code.
/// Everything else is `unknown`.
pub fn normalize_gender(value: &str) -> AdministrativeGender {
    match value.trim().to_ascii_uppercase().as_str() {
        "M" | "MALE" => AdministrativeGender::Male,
        "F" | "FEMALE" => AdministrativeGender::Female,
        _ => AdministrativeGender::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_codes() {
        assert_eq!(normalize_gender("M"), AdministrativeGender::Male);
        assert_eq!(normalize_gender(" female "), AdministrativeGender::Female);
        assert_eq!(normalize_gender("f"), AdministrativeGender::Female);
        assert_eq!(normalize_gender("X"), AdministrativeGender::Unknown);
        assert_eq!(normalize_gender(""), AdministrativeGender::Unknown);
    }
}
