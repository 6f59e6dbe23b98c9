//! Field-level checks shared by the record types.

use crate::error::ValidationError;

/// Reject blank values and values longer than `max` characters.
///
/// # Errors
///
/// [`ValidationError::MissingField`] or [`ValidationError::TooLong`].
pub fn required(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    max_len(field, value, max)
}

/// Reject optional values longer than `max` characters.
///
/// # Errors
///
/// [`ValidationError::TooLong`].
pub fn optional(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), ValidationError> {
    value.map_or(Ok(()), |v| max_len(field, v, max))
}

fn max_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

/// Require a plausible email address: one `@`, non-empty local part, and a
/// dotted domain.
///
/// # Errors
///
/// [`ValidationError::MissingField`], [`ValidationError::TooLong`] or
/// [`ValidationError::InvalidEmail`].
pub fn email(field: &'static str, value: &str) -> Result<(), ValidationError> {
    required(field, value, 254)?;
    let valid = match value.trim().split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(field))
    }
}
