//! HTTP handlers for the intake and query endpoints.

pub mod contacts;
pub mod documents;
pub mod feedback;
pub mod health;
pub mod registrations;

/// Take a required text field, recording it in `missing` when absent or
/// blank after trimming.
pub(crate) fn required_field(
    value: Option<String>,
    label: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<String> {
    match value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) {
        Some(v) => Some(v),
        None => {
            missing.push(label);
            None
        }
    }
}

/// Normalize an optional text field: blank becomes `None` so "not provided"
/// persists as NULL rather than an empty string.
pub(crate) fn optional_field(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Build the validation error message listing every missing requirement.
pub(crate) fn missing_fields_error(missing: &[&'static str]) -> formgate_core::Error {
    formgate_core::Error::Validation(format!("Missing required fields: {}", missing.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_field_present() {
        let mut missing = Vec::new();
        let v = required_field(Some("  Asha ".into()), "name", &mut missing);
        assert_eq!(v.as_deref(), Some("Asha"));
        assert!(missing.is_empty());
    }

    #[test]
    fn test_required_field_blank_counts_as_missing() {
        let mut missing = Vec::new();
        assert!(required_field(Some("   ".into()), "name", &mut missing).is_none());
        assert!(required_field(None, "email", &mut missing).is_none());
        assert_eq!(missing, vec!["name", "email"]);
    }

    #[test]
    fn test_optional_field_blank_is_none() {
        assert_eq!(optional_field(Some("".into())), None);
        assert_eq!(optional_field(Some("  ".into())), None);
        assert_eq!(optional_field(Some(" x ".into())).as_deref(), Some("x"));
        assert_eq!(optional_field(None), None);
    }

    #[test]
    fn test_missing_fields_error_lists_all() {
        let err = missing_fields_error(&["name", "photo"]);
        assert_eq!(
            err.to_string(),
            "Validation error: Missing required fields: name, photo"
        );
    }
}
