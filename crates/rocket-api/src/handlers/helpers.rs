//! Common handler helpers
//!
//! - [`validate_request`] - Validate a DTO or fail with a validation error
//! - [`require_found`] - Convert `Option<T>` to `T` or fail with 404

use validator::{Validate, ValidationErrors};

use crate::error::ApiError;

/// Validate a request struct with the `validator` crate
///
/// The first failing field becomes the error: its `code` is appended to
/// `validation.error.` and its message is reported as is.
pub fn validate_request<T: Validate>(req: &T) -> Result<(), ApiError> {
    req.validate().map_err(validation_error)
}

fn validation_error(errors: ValidationErrors) -> ApiError {
    let mut field_errors: Vec<_> = errors.field_errors().into_iter().collect();
    field_errors.sort_by(|a, b| a.0.cmp(&b.0));

    let first = field_errors
        .into_iter()
        .flat_map(|(field, errs)| errs.iter().map(move |err| (field.clone(), err)))
        .next();

    match first {
        Some((field, err)) => ApiError::Validation {
            code: format!("validation.error.{}", err.code),
            message: err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid value for {}", field)),
        },
        None => ApiError::bad_request(format!("Validation failed: {}", errors)),
    }
}

/// Convert `Option<T>` to `T` or a not-found error for `resource` with `id`
pub fn require_found<T>(
    option: Option<T>,
    resource: &'static str,
    id: impl ToString,
) -> Result<T, ApiError> {
    option.ok_or_else(|| ApiError::not_found(resource, id))
}
