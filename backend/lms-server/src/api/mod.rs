pub mod error;
pub mod extractors;
pub mod token;
pub mod users;

use crate::ApiError;

use lms_core::ErrorLocation;

use std::panic::Location;

/// Trimmed value of a required string field, or a field-level validation error
#[track_caller]
pub(crate) fn required_field(
    value: Option<&str>,
    field: &'static str,
    trim: bool,
) -> Result<String, ApiError> {
    let location = ErrorLocation::from(Location::caller());

    let Some(value) = value else {
        return Err(ApiError::Validation {
            message: "This field is required.".to_string(),
            field: Some(field.to_string()),
            location,
        });
    };

    let value = if trim { value.trim() } else { value };
    if value.is_empty() {
        return Err(ApiError::Validation {
            message: "This field may not be blank.".to_string(),
            field: Some(field.to_string()),
            location,
        });
    }

    Ok(value.to_string())
}
