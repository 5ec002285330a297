//! Complexity rules for new passwords.
//!
//! Rules run in a fixed order and the first failure is reported:
//! too short, too long, boundary space, missing character class.

use thiserror::Error;

pub const MIN_LENGTH: usize = 8;
pub const MAX_LENGTH: usize = 72;
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("Password be longer than 8 characters")]
    TooShort,

    #[error("Password be less than 72 characters")]
    TooLong,

    #[error("Password must not start or end with empty spaces")]
    BoundarySpace,

    #[error("Password must contain 1 upper case, lower case, number and special character")]
    InsufficientComplexity,
}

/// Check `password` against every rule, returning the first violation.
///
/// Length is counted in UTF-16 code units, so a character outside the
/// Basic Multilingual Plane counts twice.
pub fn evaluate(password: &str) -> Result<(), PolicyError> {
    let length = password.encode_utf16().count();

    if length < MIN_LENGTH {
        return Err(PolicyError::TooShort);
    }
    if length > MAX_LENGTH {
        return Err(PolicyError::TooLong);
    }
    if password.starts_with(' ') || password.ends_with(' ') {
        return Err(PolicyError::BoundarySpace);
    }

    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| SPECIAL_CHARACTERS.contains(c));

    if !(has_upper && has_lower && has_digit && has_special) {
        return Err(PolicyError::InsufficientComplexity);
    }

    Ok(())
}
