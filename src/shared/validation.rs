//! Validation Utilities

use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use super::error::AppError;

/// Convert validation errors to AppError
///
/// Nested struct errors are reported with a dotted path, e.g.
/// `accounts_dto.branch_address`. Messages are sorted by field.
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut fields = Vec::new();
    collect_field_errors("", &errors, &mut fields);
    fields.sort();

    if fields.is_empty() {
        return AppError::Validation("Validation failed".into());
    }

    let message = fields
        .iter()
        .map(|(field, msg)| format!("{}: {}", field, msg))
        .collect::<Vec<_>>()
        .join("; ");
    AppError::Validation(message)
}

fn collect_field_errors(prefix: &str, errors: &ValidationErrors, out: &mut Vec<(String, String)>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                for e in errs {
                    let msg = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    out.push((path.clone(), msg));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_field_errors(&path, nested, out),
            ValidationErrorsKind::List(items) => {
                for (idx, nested) in items {
                    collect_field_errors(&format!("{}[{}]", path, idx), nested, out);
                }
            }
        }
    }
}

/// Mobile numbers are exactly ten ASCII digits.
pub fn validate_mobile_number(value: &str) -> Result<(), ValidationError> {
    if value.len() == 10 && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("mobile_number");
        err.message = Some("Mobile number must be 10 digits".into());
        Err(err)
    }
}

/// Check a mobile number taken from a query string.
pub fn ensure_mobile_number(value: &str) -> Result<(), AppError> {
    validate_mobile_number(value)
        .map_err(|_| AppError::Validation("mobileNumber: Mobile number must be 10 digits".into()))
}
