//! Validation Utilities

use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use super::error::AppError;

/// Convert validation errors to AppError.
///
/// Nested structs and lists are walked, so a bad feature reports as
/// `features[0].description: ...`.
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut messages = Vec::new();
    collect_messages("", &errors, &mut messages);
    messages.sort();

    match messages.into_iter().next() {
        Some(first) => AppError::Validation(first),
        None => AppError::Validation("Validation failed".into()),
    }
}

fn collect_messages(prefix: &str, errors: &ValidationErrors, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    format!("{path}: {message}")
                }));
            }
            ValidationErrorsKind::Struct(inner) => collect_messages(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_messages(&format!("{path}[{index}]"), inner, out);
                }
            }
        }
    }
}

/// Validate a request body, mapping failures into an `AppError`.
pub fn validate<T: Validate>(value: &T) -> Result<(), AppError> {
    value.validate().map_err(validation_error)
}

/// Chip IDs are ISO 11784 transponder codes: up to fifteen decimal digits.
pub fn validate_chip_id(chip_id: &str) -> Result<(), ValidationError> {
    if chip_id.is_empty() || chip_id.len() > 15 || !chip_id.bytes().all(|b| b.is_ascii_digit()) {
        let mut error = ValidationError::new("chip_id");
        error.message = Some("Chip ID must be 1-15 digits".into());
        return Err(error);
    }
    Ok(())
}
