//! Explicit validation of registration input.
//!
//! Validation runs before any entity is constructed and is independent of
//! the storage entity's shape.

use clavis_shared::utils::validation;

use crate::errors::{DomainResult, ValidationError};

use super::service::RegisterData;

/// Minimum length for first and last names
pub const MIN_NAME_LENGTH: usize = 2;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validates registration fields, returning the first violation found.
pub fn validate_registration(data: &RegisterData) -> DomainResult<()> {
    validate_name(&data.first_name, "first_name")?;
    validate_name(&data.last_name, "last_name")?;

    if !validation::is_valid_email(&data.email) {
        return Err(ValidationError::InvalidEmail.into());
    }

    if data.password.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "password".to_string(),
        }
        .into());
    }
    if !validation::min_length(&data.password, MIN_PASSWORD_LENGTH) {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LENGTH,
        }
        .into());
    }

    Ok(())
}

fn validate_name(value: &str, field: &str) -> DomainResult<()> {
    if !validation::not_empty(value) {
        return Err(ValidationError::RequiredField {
            field: field.to_string(),
        }
        .into());
    }
    if !validation::min_length(value.trim(), MIN_NAME_LENGTH) {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min: MIN_NAME_LENGTH,
        }
        .into());
    }
    Ok(())
}
