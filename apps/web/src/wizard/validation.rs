use crate::wizard::types::{Field, FormData, ValidationErrors, WizardStep};

/// Validates the fields a step requires before the user may leave it.
///
/// Steps 1–3 each require their field to be non-blank; step 4 requires nothing.
/// The returned map replaces the session's errors wholesale.
pub fn validate_step(step: WizardStep, form: &FormData) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if let Some(message) = required_message(step.field()) {
        if form.get(step.field()).trim().is_empty() {
            errors.insert(step.field(), message);
        }
    }

    errors
}

/// Message shown under a required field left blank. `None` for optional fields.
pub fn required_message(field: Field) -> Option<&'static str> {
    match field {
        Field::Name => Some("Name is required"),
        Field::Company => Some("Company name is required"),
        Field::Role => Some("Role is required"),
        Field::AdditionalInfo => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(n: u8) -> WizardStep {
        WizardStep::new(n).unwrap()
    }

    #[test]
    fn test_empty_form_fails_each_required_step() {
        let form = FormData::default();
        for (n, field) in [(1, Field::Name), (2, Field::Company), (3, Field::Role)] {
            let errors = validate_step(step(n), &form);
            assert_eq!(errors.len(), 1, "step {n}");
            assert!(errors.contains(field), "step {n}");
        }
    }

    #[test]
    fn test_whitespace_only_is_blank() {
        let form = FormData {
            name: "   \t".to_string(),
            ..Default::default()
        };
        assert_eq!(
            validate_step(step(1), &form).get(Field::Name),
            Some("Name is required")
        );
    }

    #[test]
    fn test_step_only_checks_its_own_field() {
        let form = FormData {
            company: "Acme".to_string(),
            ..Default::default()
        };
        assert!(validate_step(step(2), &form).is_empty());
    }

    #[test]
    fn test_details_step_has_no_requirements() {
        assert!(validate_step(step(4), &FormData::default()).is_empty());
    }
}
