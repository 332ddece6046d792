//! Input validation for user profile fields.

use std::fmt;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Invalid email format.
    InvalidEmail(String),
    /// Value too long.
    TooLong {
        field: String,
        max: usize,
        actual: usize,
    },
    /// Empty value where one is required.
    Empty(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidEmail(msg) => write!(f, "Invalid email: {}", msg),
            ValidationError::TooLong { field, max, actual } => {
                write!(f, "{} is too long ({} chars, max {})", field, actual, max)
            }
            ValidationError::Empty(field) => write!(f, "{} cannot be empty", field),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Maximum allowed length for email addresses.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum allowed length for names, schools, and class levels.
pub const MAX_TEXT_LENGTH: usize = 120;

/// Maximum allowed length for phone numbers.
pub const MAX_PHONE_LENGTH: usize = 20;

/// Validate an email address (basic format check).
///
/// Checks for exactly one @, at least one character on each side of it,
/// and at least one dot in the domain part.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Empty("email".to_string()));
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: MAX_EMAIL_LENGTH,
            actual: email.len(),
        });
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(ValidationError::InvalidEmail(
            "expected exactly one @ with text on both sides".to_string(),
        ));
    }

    if !parts[1].contains('.') {
        return Err(ValidationError::InvalidEmail(
            "domain part must contain a dot".to_string(),
        ));
    }

    Ok(())
}

/// Validate a required display name.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Empty("name".to_string()));
    }

    if name.len() > MAX_TEXT_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_TEXT_LENGTH,
            actual: name.len(),
        });
    }

    Ok(())
}

/// Validate an optional free-text profile field (school, class level).
pub fn validate_text_field(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.len() > MAX_TEXT_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT_LENGTH,
            actual: value.len(),
        });
    }

    Ok(())
}

/// Validate a phone number: length cap plus digits with optional + - ( ) and spaces.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let phone = phone.trim();

    if phone.len() > MAX_PHONE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "phone".to_string(),
            max: MAX_PHONE_LENGTH,
            actual: phone.len(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_accepts_plain_address() {
        assert!(validate_email("student@example.com").is_ok());
    }

    #[test]
    fn test_validate_email_rejects_missing_at() {
        assert!(matches!(
            validate_email("studentexample.com"),
            Err(ValidationError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_validate_email_rejects_missing_dot() {
        assert!(matches!(
            validate_email("student@example"),
            Err(ValidationError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_validate_email_rejects_empty() {
        assert!(matches!(
            validate_email("  "),
            Err(ValidationError::Empty(_))
        ));
    }

    #[test]
    fn test_validate_name_rejects_empty() {
        assert!(matches!(validate_name(""), Err(ValidationError::Empty(_))));
    }

    #[test]
    fn test_validate_name_rejects_too_long() {
        let long = "x".repeat(MAX_TEXT_LENGTH + 1);
        assert!(matches!(
            validate_name(&long),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_validate_phone_accepts_reasonable_number() {
        assert!(validate_phone("+91 98765 43210").is_ok());
    }
}
