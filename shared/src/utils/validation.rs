//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("Invalid phone regex"));

/// Normalize an email address into its canonical match key.
///
/// Emails are matched case-insensitively, so the stored form is trimmed
/// and lowercased.
///
/// # Examples
///
/// ```
/// use bv_shared::utils::validation::normalize_email;
///
/// assert_eq!(normalize_email("  Reader@BookVerse.IO "), "reader@bookverse.io");
/// ```
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check whether an email address is structurally valid.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Check whether a phone number is structurally valid.
///
/// Accepts an optional leading `+` followed by 7 to 15 digits.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

/// Common validation predicates
pub mod validators {
    /// Check if a string is not empty
    pub fn not_empty(value: &str) -> bool {
        !value.trim().is_empty()
    }

    /// Check if a string length is within bounds
    pub fn length_between(value: &str, min: usize, max: usize) -> bool {
        let len = value.len();
        len >= min && len <= max
    }

    /// Check if a string is made up entirely of ASCII digits
    pub fn all_digits(value: &str) -> bool {
        !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
    }
}
