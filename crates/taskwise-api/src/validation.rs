use crate::error::AppError;

/// Validate that a string's length falls within the given range (inclusive).
pub fn validate_string_length(
    value: &str,
    min: usize,
    max: usize,
    field_name: &str,
) -> Result<(), AppError> {
    if value.len() < min || value.len() > max {
        return Err(AppError::BadRequest(format!(
            "{field_name} must be {min}-{max} characters"
        )));
    }
    Ok(())
}

/// Validate that an identifier is positive.
pub fn validate_id(value: i32, field_name: &str) -> Result<(), AppError> {
    if value <= 0 {
        return Err(AppError::BadRequest(format!(
            "{field_name} must be positive"
        )));
    }
    Ok(())
}
