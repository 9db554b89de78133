//! Masking utilities for personally identifiable values
//!
//! Emails and phone numbers must never appear unmasked in log output.

/// Mask an email address for logging.
///
/// Keeps the first two characters of the local part and the full domain.
///
/// # Examples
///
/// ```
/// use bv_shared::utils::mask::mask_email;
///
/// assert_eq!(mask_email("john.doe@example.com"), "jo****@example.com");
/// assert_eq!(mask_email("a@example.com"), "a****@example.com");
/// ```
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let visible: String = local.chars().take(2).collect();
            format!("{}****@{}", visible, domain)
        }
        None => "****".to_string(),
    }
}

/// Mask a phone number for logging.
///
/// Keeps the first three and last two characters visible. Values too short
/// to mask meaningfully are replaced entirely.
///
/// # Examples
///
/// ```
/// use bv_shared::utils::mask::mask_phone;
///
/// assert_eq!(mask_phone("07911123456"), "079****56");
/// assert_eq!(mask_phone("12345"), "*****");
/// ```
pub fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() < 6 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}****{}", head, tail)
}
