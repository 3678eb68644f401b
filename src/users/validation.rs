use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::AppError;

pub const USERNAME_MAX_LEN: usize = 30;
pub const EMAIL_MAX_LEN: usize = 254;

/// Case-insensitive comparison used for the pre-write uniqueness checks and
/// the in-memory store. Rust's Unicode lowercasing can differ from
/// PostgreSQL `LOWER()` on some non-ASCII input; the unique indexes on
/// `LOWER(username)` and `LOWER(email)` are the authoritative guard.
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn validate_username(username: &str) -> Result<(), AppError> {
    if username.trim().is_empty() {
        return Err(AppError::validation(
            "Username is required",
            "Send a username and try again",
        ));
    }
    if username.chars().count() > USERNAME_MAX_LEN {
        return Err(AppError::validation(
            format!("Username must be at most {USERNAME_MAX_LEN} characters"),
            "Use a shorter username",
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), AppError> {
    if email.chars().count() > EMAIL_MAX_LEN {
        return Err(AppError::validation(
            format!("Email must be at most {EMAIL_MAX_LEN} characters"),
            "Use a shorter email",
        ));
    }
    if !is_valid_email(email) {
        return Err(AppError::validation(
            "Email is invalid",
            "Check the email format and try again",
        ));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.is_empty() {
        return Err(AppError::validation(
            "Password is required",
            "Send a password and try again",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_insensitive_equality() {
        assert!(eq_ignore_case("UsernameDuplicado_", "usernameduplicado_"));
        assert!(eq_ignore_case("Duplicado@example.com", "duplicado@EXAMPLE.com"));
        assert!(!eq_ignore_case("user1", "user2"));
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("matheus@example.com"));
        assert!(is_valid_email("Duplicado@example.com"));
        assert!(!is_valid_email("matheus"));
        assert!(!is_valid_email("a b@example.com"));
        assert!(!is_valid_email("a@example"));
    }

    #[test]
    fn username_limits() {
        assert!(validate_username("usernameduplicado_").is_ok());
        assert!(validate_username("   ").is_err());
        assert!(validate_username(&"x".repeat(USERNAME_MAX_LEN)).is_ok());
        let err = validate_username(&"x".repeat(USERNAME_MAX_LEN + 1)).unwrap_err();
        assert_eq!(err.name(), "ValidationError");
    }

    #[test]
    fn email_length_limit() {
        let local = "a".repeat(EMAIL_MAX_LEN);
        assert!(validate_email(&format!("{local}@example.com")).is_err());
    }

    #[test]
    fn empty_password_is_rejected() {
        assert!(validate_password("").is_err());
        assert!(validate_password("123456").is_ok());
    }
}
