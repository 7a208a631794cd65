//! Credential validation helpers

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum accepted password length
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Maximum accepted password length
pub const PASSWORD_MAX_LENGTH: usize = 40;

/// bcrypt ignores everything past this many bytes
pub const PASSWORD_MAX_BYTES: usize = 72;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// Check that an email address is syntactically plausible
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= 255 && EMAIL_REGEX.is_match(email)
}

/// Normalize an email for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check a password against the length policy
///
/// Length counts characters, and the UTF-8 encoding must also fit in the
/// bytes bcrypt actually hashes.
pub fn is_valid_password(password: &str) -> bool {
    let length = password.chars().count();
    (PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&length)
        && password.len() <= PASSWORD_MAX_BYTES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@mail.example.co"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("user@example"));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  User@Example.COM "), "user@example.com");
    }

    #[test]
    fn test_password_length_bounds() {
        assert!(!is_valid_password("12345"));
        assert!(is_valid_password("123456"));
        assert!(is_valid_password(&"x".repeat(40)));
        assert!(!is_valid_password(&"x".repeat(41)));
    }

    #[test]
    fn test_password_must_fit_bcrypt_input() {
        // 24 three-byte characters is exactly 72 bytes
        assert!(is_valid_password(&"€".repeat(24)));
        assert!(!is_valid_password(&"€".repeat(25)));
        // 40 characters, 120 bytes
        assert!(!is_valid_password(&"€".repeat(40)));
    }
}
