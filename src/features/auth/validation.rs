//! Local form validation. Failures here are reported to the user and the
//! request is never sent.

use crate::{errors::AppError, features::auth::types::RegistrationForm};
use regex::Regex;

pub const MIN_PASSWORD_LEN: usize = 6;

#[must_use]
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").map_or(false, |re| re.is_match(email))
}

/// # Errors
/// Returns `AppError::Validation` describing the first invalid field.
pub fn validate_login(email: &str, password: &str) -> Result<(), AppError> {
    if email.trim().is_empty() || password.trim().is_empty() {
        return Err(AppError::Validation(
            "Email and password are required.".to_string(),
        ));
    }
    if !valid_email(email.trim()) {
        return Err(AppError::Validation(
            "Please enter a valid email address.".to_string(),
        ));
    }
    Ok(())
}

/// # Errors
/// Returns `AppError::Validation` describing the first invalid field.
pub fn validate_registration(form: &RegistrationForm) -> Result<(), AppError> {
    if form.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required.".to_string()));
    }
    if !valid_email(form.email.trim()) {
        return Err(AppError::Validation(
            "Please enter a valid email address.".to_string(),
        ));
    }
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters."
        )));
    }
    if form.password != form.confirm_password {
        return Err(AppError::Validation("Passwords do not match.".to_string()));
    }
    Ok(())
}
